//! Graph simulation state and interaction tracking.
//!
//! Wraps the `force_graph` physics simulation, which owns node positions, with
//! the resolved links, the pan/zoom view transform, and the hovered node.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::{debug, warn};

use super::geometry::Point;
use super::scale::ScaledValues;
use crate::model::{GraphDocument, Link};

/// Per-node display data attached to each node in the simulation.
#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	/// Node id from the document.
	pub id: String,
	/// Title drawn beside the node.
	pub title: String,
	/// Fill override for the node circle.
	pub color: Option<String>,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug)]
pub struct ViewTransform {
	/// Horizontal pan offset in screen pixels.
	pub x: f64,
	/// Vertical pan offset in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%, clamped to 0.1..10.0). Also the global scale
	/// used to keep text a constant size on screen.
	pub k: f64,
}

impl ViewTransform {
	/// Smallest allowed zoom.
	pub const MIN_ZOOM: f64 = 0.1;
	/// Largest allowed zoom.
	pub const MAX_ZOOM: f64 = 10.0;

	/// Zooms by `factor` around the screen point `(sx, sy)`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.k * factor).clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
		let ratio = new_k / self.k;
		self.x = sx - (sx - self.x) * ratio;
		self.y = sy - (sy - self.y) * ratio;
		self.k = new_k;
	}
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a drag is in progress.
	pub active: bool,
	/// Node being dragged.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer x at drag start.
	pub start_x: f64,
	/// Pointer y at drag start.
	pub start_y: f64,
	/// Node x at drag start.
	pub node_start_x: f32,
	/// Node y at drag start.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is in progress.
	pub active: bool,
	/// Pointer x at pan start.
	pub start_x: f64,
	/// Pointer y at pan start.
	pub start_y: f64,
	/// Transform x at pan start.
	pub transform_start_x: f64,
	/// Transform y at pan start.
	pub transform_start_y: f64,
}

fn simulation() -> ForceGraph<NodeInfo, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

/// Core graph state: the layout simulation plus view and hover tracking.
///
/// Rebuilt whenever the document is replaced; the animation loop ticks it
/// every frame.
pub struct ForceGraphState {
	/// Layout simulation owning node positions.
	pub graph: ForceGraph<NodeInfo, ()>,
	/// Current pan and zoom.
	pub transform: ViewTransform,
	/// Node drag in progress, if any.
	pub drag: DragState,
	/// Canvas pan in progress, if any.
	pub pan: PanState,
	/// Canvas width in pixels.
	pub width: f64,
	/// Canvas height in pixels.
	pub height: f64,
	/// Whether the layout advances each frame.
	pub animation_running: bool,
	hovered: Option<DefaultNodeIdx>,
	links: Vec<Link>,
}

impl ForceGraphState {
	/// Builds the layout for `document` on a canvas of the given size.
	pub fn new(document: &GraphDocument, width: f64, height: f64) -> Self {
		Self::with_positions(document, width, height, &HashMap::new())
	}

	/// Builds the layout for `document`, placing nodes found in `known` at
	/// their remembered positions.
	fn with_positions(
		document: &GraphDocument,
		width: f64,
		height: f64,
		known: &HashMap<String, (f32, f32)>,
	) -> Self {
		let mut graph = simulation();
		let mut id_to_idx = HashMap::new();
		let count = document.nodes.len().max(1) as f64;

		for (i, node) in document.nodes.iter().enumerate() {
			let angle = (i as f64) * 2.0 * PI / count;
			let (x, y) = known.get(&node.id).copied().unwrap_or_else(|| {
				match (node.x, node.y) {
					(Some(x), Some(y)) => (x as f32, y as f32),
					_ => ((100.0 * angle.cos()) as f32, (100.0 * angle.sin()) as f32),
				}
			});

			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: false,
				user_data: NodeInfo {
					id: node.id.clone(),
					title: node.title.clone(),
					color: node.color.clone(),
				},
			});
			match id_to_idx.entry(node.id.clone()) {
				Entry::Vacant(slot) => {
					slot.insert(idx);
				}
				Entry::Occupied(_) => warn!("grafo: duplicate node id {}, links use the first", node.id),
			}
		}

		let mut links = Vec::with_capacity(document.links.len());
		for link in &document.links {
			let Some(resolved) = link.resolve(&id_to_idx) else {
				debug!(
					"grafo: dropping link {} -> {}, endpoint not found",
					link.source.id(),
					link.target.id()
				);
				continue;
			};
			if let (Some(src), Some(tgt)) = (resolved.source.index(), resolved.target.index()) {
				if src != tgt {
					graph.add_edge(src, tgt, EdgeData::default());
				}
			}
			links.push(resolved);
		}

		Self {
			graph,
			links,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			width,
			height,
			animation_running: true,
			hovered: None,
		}
	}

	/// Builds state for a replacement document, keeping the view and the
	/// positions of nodes that are still present.
	pub fn rebuild(&self, document: &GraphDocument) -> Self {
		let mut known = HashMap::new();
		self.graph.visit_nodes(|node| {
			known
				.entry(node.data.user_data.id.clone())
				.or_insert((node.x(), node.y()));
		});

		let mut next = Self::with_positions(document, self.width, self.height, &known);
		next.transform = self.transform.clone();
		next
	}

	/// Links whose endpoints both resolved to nodes in the layout.
	pub fn links(&self) -> &[Link] {
		&self.links
	}

	/// Current position of every node, keyed by layout index.
	pub fn positions(&self) -> HashMap<DefaultNodeIdx, Point> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), Point::new(node.x() as f64, node.y() as f64));
		});
		positions
	}

	/// Moves a node, pinning it so the simulation leaves it there.
	pub fn place_node(&mut self, idx: DefaultNodeIdx, x: f32, y: f32) {
		self.graph.visit_nodes_mut(|node| {
			if node.index() == idx {
				node.data.x = x;
				node.data.y = y;
				node.data.is_anchor = true;
			}
		});
	}

	/// Converts a screen point to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// The node under screen point `(sx, sy)`, nearest first.
	pub fn node_at_position(&self, sx: f64, sy: f64, scale: &ScaledValues) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let pointer = Point::new(gx, gy);
		let mut found: Option<(DefaultNodeIdx, f64)> = None;
		self.graph.visit_nodes(|node| {
			let dist = pointer.distance(Point::new(node.x() as f64, node.y() as f64));
			if dist < scale.hit_radius && found.is_none_or(|(_, best)| dist < best) {
				found = Some((node.index(), dist));
			}
		});
		found.map(|(idx, _)| idx)
	}

	/// Sets the hovered node. Returns whether it changed.
	pub fn set_hover(&mut self, node: Option<DefaultNodeIdx>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		true
	}

	/// Id of the hovered node.
	pub fn hovered_id(&self) -> Option<String> {
		let idx = self.hovered?;
		let mut id = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				id = Some(node.data.user_data.id.clone());
			}
		});
		id
	}

	/// Position of the node at `idx`.
	pub fn node_position(&self, idx: DefaultNodeIdx) -> Option<(f32, f32)> {
		let mut position = None;
		self.graph.visit_nodes(|node| {
			if node.index() == idx {
				position = Some((node.x(), node.y()));
			}
		});
		position
	}

	/// Advances the layout by `dt` seconds.
	pub fn tick(&mut self, dt: f32) {
		self.graph.update(dt);
	}

	/// Records a new canvas size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

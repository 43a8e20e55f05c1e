//! Graph document model: idea nodes, labeled links and the document wrapping them.
//!
//! The model is deliberately permissive. Fields it does not name are kept in
//! `extra` so a document can be stored back exactly as it was uploaded, and
//! absent or `null` collections decode as empty.

use std::collections::HashMap;

use force_graph::DefaultNodeIdx;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// An idea in the graph.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Stable identity. Links refer to nodes by this id.
	pub id: String,
	/// Shown beside the node and in the detail card.
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	/// Free text for the detail card.
	#[serde(default, deserialize_with = "null_as_default")]
	pub description: String,
	/// Ordered bullet points shown in the detail overlay.
	#[serde(default, deserialize_with = "null_as_default")]
	pub bullets: Vec<String>,
	/// Labels listed in the detail card.
	#[serde(default, deserialize_with = "null_as_default")]
	pub tags: Vec<String>,
	/// CSS color for the node circle.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Last known layout position, if the document carried one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub x: Option<f64>,
	/// Last known vertical position.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub y: Option<f64>,
	/// Anything else the document carried for this node.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Node {
	/// Creates a node with the given id and title and everything else empty.
	pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			title: title.into(),
			..Self::default()
		}
	}
}

/// A link endpoint resolved against a live layout node.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeRef {
	/// Id the endpoint was resolved from.
	pub id: String,
	/// Layout index of the node.
	pub index: DefaultNodeIdx,
}

/// One end of a link.
///
/// Documents come in with raw ids. Once the layout has placed the nodes, links
/// are resolved into [`Endpoint::Resolved`] so the renderer can find positions
/// without another lookup. Both forms serialize to the plain id.
#[derive(Clone, Debug, PartialEq)]
pub enum Endpoint {
	/// A raw node id.
	Id(String),
	/// A node placed in the layout.
	Resolved(NodeRef),
}

impl Endpoint {
	/// The node id this endpoint points at, whichever form it is in.
	pub fn id(&self) -> &str {
		match self {
			Endpoint::Id(id) => id,
			Endpoint::Resolved(node) => &node.id,
		}
	}

	/// The layout index, available only once resolved.
	pub fn index(&self) -> Option<DefaultNodeIdx> {
		match self {
			Endpoint::Id(_) => None,
			Endpoint::Resolved(node) => Some(node.index),
		}
	}

	/// Resolves this endpoint through an id lookup table.
	pub fn resolve(&self, lookup: &HashMap<String, DefaultNodeIdx>) -> Option<Endpoint> {
		let id = self.id();
		lookup.get(id).map(|&index| {
			Endpoint::Resolved(NodeRef {
				id: id.to_string(),
				index,
			})
		})
	}
}

impl From<&str> for Endpoint {
	fn from(id: &str) -> Self {
		Endpoint::Id(id.to_string())
	}
}

impl From<String> for Endpoint {
	fn from(id: String) -> Self {
		Endpoint::Id(id)
	}
}

impl Serialize for Endpoint {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.id())
	}
}

/// Wire forms accepted for an endpoint: a bare id, or a node object dumped
/// by a layout that had already resolved the link.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEndpoint {
	Id(String),
	Node { id: String },
}

impl<'de> Deserialize<'de> for Endpoint {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		Ok(match RawEndpoint::deserialize(deserializer)? {
			RawEndpoint::Id(id) | RawEndpoint::Node { id } => Endpoint::Id(id),
		})
	}
}

/// A directed, optionally labeled edge between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Link {
	/// Node the link starts at.
	pub source: Endpoint,
	/// Node the link points to.
	pub target: Endpoint,
	/// Text drawn at the link midpoint.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// CSS stroke color; the theme default is used when unset.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Stroke width in world units.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<f64>,
	/// Anything else the document carried for this link.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl Link {
	/// Creates an unlabeled link between two node ids.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: Endpoint::Id(source.into()),
			target: Endpoint::Id(target.into()),
			label: None,
			color: None,
			width: None,
			extra: Map::new(),
		}
	}

	/// Sets the label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Returns a copy with both endpoints resolved, or `None` if either end
	/// names a node that does not exist.
	pub fn resolve(&self, lookup: &HashMap<String, DefaultNodeIdx>) -> Option<Link> {
		Some(Link {
			source: self.source.resolve(lookup)?,
			target: self.target.resolve(lookup)?,
			..self.clone()
		})
	}

	/// True when both ends point at the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source.id() == self.target.id()
	}
}

/// The unit that is loaded, stored, uploaded and exported.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
	/// Title the document was saved with.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	/// Nodes in document order. Ids should be unique.
	#[serde(default, deserialize_with = "null_as_default")]
	pub nodes: Vec<Node>,
	/// Directed links between node ids.
	#[serde(default, deserialize_with = "null_as_default")]
	pub links: Vec<Link>,
	/// Anything else the document carried.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl GraphDocument {
	/// A document with no title, nodes or links.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Looks up a node by id. The first node with a matching id wins.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|node| node.id == id)
	}

	/// Whether the document has neither nodes nor links.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty() && self.links.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use force_graph::{ForceGraph, NodeData, SimulationParameters};

	use super::*;

	#[test]
	fn endpoint_accepts_id_or_node_object() {
		let link: Link =
			serde_json::from_str(r#"{"source":"a","target":{"id":"b","x":3.5,"vx":0.1}}"#).unwrap();
		assert_eq!(link.source, Endpoint::Id("a".into()));
		assert_eq!(link.target, Endpoint::Id("b".into()));
	}

	#[test]
	fn null_collections_decode_empty() {
		let doc: GraphDocument = serde_json::from_str(r#"{"nodes":null,"links":null}"#).unwrap();
		assert!(doc.is_empty());
		assert_eq!(doc.title, None);
	}

	#[test]
	fn unknown_fields_survive_reserialization() {
		let doc: GraphDocument = serde_json::from_str(
			r#"{"version":2,"nodes":[{"id":"a","weight":7}],"links":[]}"#,
		)
		.unwrap();
		assert_eq!(doc.extra["version"], 2);
		assert_eq!(doc.nodes[0].extra["weight"], 7);

		let json = serde_json::to_value(&doc).unwrap();
		assert_eq!(json["version"], 2);
		assert_eq!(json["nodes"][0]["weight"], 7);
	}

	#[test]
	fn resolve_fails_on_unknown_endpoint() {
		let mut graph: ForceGraph<(), ()> = ForceGraph::new(SimulationParameters {
			force_charge: 150.0,
			force_spring: 0.05,
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		});
		let idx = graph.add_node(NodeData {
			x: 0.0,
			y: 0.0,
			mass: 10.0,
			is_anchor: false,
			user_data: (),
		});
		let mut lookup = HashMap::new();
		lookup.insert("a".to_string(), idx);

		assert!(Link::new("a", "missing").resolve(&lookup).is_none());

		let resolved = Link::new("a", "a").resolve(&lookup).unwrap();
		assert_eq!(resolved.source.index(), Some(idx));
		assert_eq!(resolved.target.id(), "a");
		assert!(resolved.is_self_loop());
	}
}

//! Canvas rendering for the force graph.
//!
//! Each frame clears the canvas, applies the pan/zoom transform, then draws
//! links underneath nodes:
//! 1. Links: trimmed line, arrowhead, optional label at the trimmed midpoint
//! 2. Nodes: filled circle with the title to its right

use std::collections::HashMap;

use force_graph::DefaultNodeIdx;

use super::geometry::{Point, trim_segment};
use super::scale::{ScaleConfig, ScaledValues};
use super::state::ForceGraphState;
use super::surface::Surface;
use super::theme::Theme;
use crate::model::Link;

/// What a frame ended up drawing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Nodes drawn.
	pub nodes: usize,
	/// Links drawn.
	pub links: usize,
	/// Links skipped because their endpoints coincide.
	pub degenerate_links: usize,
}

/// Renders the complete graph to the surface.
pub fn render<S: Surface>(
	state: &ForceGraphState,
	surface: &S,
	config: &ScaleConfig,
	theme: &Theme,
) -> FrameStats {
	let scale = ScaledValues::new(config, state.transform.k);
	let mut stats = FrameStats::default();

	surface.set_fill_style(&theme.background.to_css());
	surface.fill_rect(0.0, 0.0, state.width, state.height);

	surface.save();
	surface.translate(state.transform.x, state.transform.y);
	surface.scale(state.transform.k);

	draw_links(state, surface, &scale, theme, &mut stats);
	draw_nodes(state, surface, &scale, theme, &mut stats);

	surface.restore();
	stats
}

fn draw_links<S: Surface>(
	state: &ForceGraphState,
	surface: &S,
	scale: &ScaledValues,
	theme: &Theme,
	stats: &mut FrameStats,
) {
	let positions = state.positions();
	for link in state.links() {
		if draw_link(surface, link, &positions, scale, theme) {
			stats.links += 1;
		} else {
			stats.degenerate_links += 1;
		}
	}
}

/// Draws one resolved link. Returns `false` if it was skipped.
pub fn draw_link<S: Surface>(
	surface: &S,
	link: &Link,
	positions: &HashMap<DefaultNodeIdx, Point>,
	scale: &ScaledValues,
	theme: &Theme,
) -> bool {
	let endpoints = link
		.source
		.index()
		.zip(link.target.index())
		.and_then(|(src, tgt)| Some((*positions.get(&src)?, *positions.get(&tgt)?)));
	let Some((from, to)) = endpoints else {
		return false;
	};
	let Some(segment) = trim_segment(from, to, scale.node_radius, scale.arrow_length) else {
		return false;
	};

	let stroke = link.color.as_deref().unwrap_or(&theme.link_stroke);
	surface.begin_path();
	surface.move_to(segment.start.x, segment.start.y);
	surface.line_to(segment.end.x, segment.end.y);
	surface.set_stroke_style(stroke);
	surface.set_line_width(link.width.unwrap_or(theme.link_width));
	surface.stroke();

	let [tip, left, right] = segment.arrowhead(scale.arrow_length);
	surface.begin_path();
	surface.move_to(tip.x, tip.y);
	surface.line_to(left.x, left.y);
	surface.line_to(right.x, right.y);
	surface.close_path();
	surface.set_fill_style(stroke);
	surface.fill();

	if let Some(label) = link.label.as_deref().filter(|l| !l.is_empty()) {
		let mid = segment.midpoint();
		surface.set_font(&scale.link_font);
		surface.set_fill_style(&theme.text_fill);
		surface.fill_text(label, mid.x, mid.y);
	}
	true
}

fn draw_nodes<S: Surface>(
	state: &ForceGraphState,
	surface: &S,
	scale: &ScaledValues,
	theme: &Theme,
	stats: &mut FrameStats,
) {
	let (dx, dy) = scale.title_offset;
	state.graph.visit_nodes(|node| {
		let (x, y) = (node.x() as f64, node.y() as f64);
		let info = &node.data.user_data;
		let fill = info.color.as_deref().unwrap_or(&theme.node_fill);

		surface.fill_circle(x, y, scale.node_radius, fill);

		surface.set_font(&scale.node_font);
		surface.set_fill_style(&theme.text_fill);
		surface.fill_text(&info.title, x + dx, y + dy);
		stats.nodes += 1;
	});
}

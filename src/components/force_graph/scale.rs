//! Zoom-dependent scaling configuration for graph visuals.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: The coordinate system of the graph. Values in world-space
//!   scale proportionally with zoom (appear larger when zoomed in).
//! - **Screen-space**: Pixel coordinates on the canvas. Values in screen-space
//!   remain constant regardless of zoom level.
//!
//! Node circles and arrowheads live in world space. Text is screen-space: its
//! font size is divided by the zoom factor so titles and labels read the same
//! at every zoom level.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug, PartialEq)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Smallest on-screen size, in pixels.
		min_screen: f64,
		/// Largest on-screen size, in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => base.clamp(min_screen / k, max_screen / k),
		}
	}
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleConfig {
	/// Node circle radius in world units.
	pub node_radius: f64,
	/// How the node radius reacts to zoom.
	pub node_radius_behavior: ScaleBehavior,
	/// Pointer hit radius around a node center.
	pub hit_radius: f64,
	/// How the hit radius reacts to zoom.
	pub hit_behavior: ScaleBehavior,
	/// Space reserved at the target end of a link for its arrowhead.
	pub arrow_length: f64,
	/// Node title font size.
	pub node_font_px: f64,
	/// Link label font size.
	pub link_font_px: f64,
	/// How font sizes react to zoom.
	pub font_behavior: ScaleBehavior,
	/// CSS font family for all text.
	pub font_family: String,
	/// Offset of a node title from the node center, in world units.
	pub title_offset: (f64, f64),
}

impl ScaleConfig {
	/// World-space radius and arrow, screen-space fonts, clamped hit radius.
	pub fn new(node_radius: f64, arrow_length: f64, node_font_px: f64, link_font_px: f64) -> Self {
		Self {
			node_radius,
			node_radius_behavior: ScaleBehavior::World,
			hit_radius: node_radius,
			// Tiny circles stay hoverable when zoomed out.
			hit_behavior: ScaleBehavior::Clamped {
				min_screen: 6.0,
				max_screen: f64::INFINITY,
			},
			arrow_length,
			node_font_px,
			link_font_px,
			font_behavior: ScaleBehavior::Screen,
			font_family: "Sans-Serif".to_string(),
			title_offset: (10.0, 1.0),
		}
	}
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self::new(2.0, 6.0, 12.0, 8.0)
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions.
/// All sizes are in world-space (ready to use after canvas transform).
#[derive(Clone, Debug, PartialEq)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Node radius for this frame.
	pub node_radius: f64,
	/// Hit radius for this frame.
	pub hit_radius: f64,
	/// Arrowhead length for this frame.
	pub arrow_length: f64,
	/// Node title font size for this frame.
	pub node_font_size: f64,
	/// Link label font size for this frame.
	pub link_font_size: f64,
	/// Font string for node titles (e.g., "12px Sans-Serif").
	pub node_font: String,
	/// Font string for link labels.
	pub link_font: String,
	/// Offset of a node title from the node center.
	pub title_offset: (f64, f64),
}

impl ScaledValues {
	/// Resolves `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let node_font_size = config.font_behavior.apply(config.node_font_px, k);
		let link_font_size = config.font_behavior.apply(config.link_font_px, k);

		Self {
			k,
			node_radius: config.node_radius_behavior.apply(config.node_radius, k),
			hit_radius: config.hit_behavior.apply(config.hit_radius, k),
			arrow_length: config.arrow_length,
			node_font_size,
			link_font_size,
			node_font: format!("{}px {}", node_font_size, config.font_family),
			link_font: format!("{}px {}", link_font_size, config.font_family),
			title_offset: config.title_offset,
		}
	}
}

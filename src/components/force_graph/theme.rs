//! Visual theming for the force graph.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// An opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// A color with opacity `a`.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// CSS form: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Fallback colors and widths for elements that do not carry their own.
#[derive(Clone, Debug, PartialEq)]
pub struct Theme {
	/// Canvas fill behind the graph.
	pub background: Color,
	/// Node fill when a node has no `color`.
	pub node_fill: String,
	/// Link stroke when a link has no `color`.
	pub link_stroke: String,
	/// Link width in world units when a link has no `width`.
	pub link_width: f64,
	/// Fill for node titles and link labels.
	pub text_fill: String,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			node_fill: "blue".to_string(),
			link_stroke: "gray".to_string(),
			link_width: 0.2,
			text_fill: "black".to_string(),
		}
	}
}

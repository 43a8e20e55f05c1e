//! The drawing primitives the renderer needs from a 2D canvas.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

/// A canvas-like 2D drawing context.
///
/// Mirrors the subset of `CanvasRenderingContext2d` the renderer uses, so
/// frames can also be drawn into a recorder in tests.
pub trait Surface {
	fn save(&self);
	fn restore(&self);
	fn translate(&self, x: f64, y: f64);
	fn scale(&self, k: f64);
	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64);
	fn begin_path(&self);
	fn close_path(&self);
	fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64);
	fn move_to(&self, x: f64, y: f64);
	fn line_to(&self, x: f64, y: f64);
	fn fill(&self);
	fn stroke(&self);
	fn set_fill_style(&self, style: &str);
	fn set_stroke_style(&self, style: &str);
	fn set_line_width(&self, width: f64);
	fn set_font(&self, font: &str);
	fn fill_text(&self, text: &str, x: f64, y: f64);

	/// Fills a full circle.
	fn fill_circle(&self, x: f64, y: f64, radius: f64, style: &str) {
		self.begin_path();
		self.arc(x, y, radius, 0.0, 2.0 * PI);
		self.set_fill_style(style);
		self.fill();
	}
}

impl Surface for CanvasRenderingContext2d {
	fn save(&self) {
		CanvasRenderingContext2d::save(self);
	}

	fn restore(&self) {
		CanvasRenderingContext2d::restore(self);
	}

	fn translate(&self, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::translate(self, x, y);
	}

	fn scale(&self, k: f64) {
		let _ = CanvasRenderingContext2d::scale(self, k, k);
	}

	fn fill_rect(&self, x: f64, y: f64, width: f64, height: f64) {
		CanvasRenderingContext2d::fill_rect(self, x, y, width, height);
	}

	fn begin_path(&self) {
		CanvasRenderingContext2d::begin_path(self);
	}

	fn close_path(&self) {
		CanvasRenderingContext2d::close_path(self);
	}

	fn arc(&self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
		let _ = CanvasRenderingContext2d::arc(self, x, y, radius, start, end);
	}

	fn move_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::move_to(self, x, y);
	}

	fn line_to(&self, x: f64, y: f64) {
		CanvasRenderingContext2d::line_to(self, x, y);
	}

	fn fill(&self) {
		CanvasRenderingContext2d::fill(self);
	}

	fn stroke(&self) {
		CanvasRenderingContext2d::stroke(self);
	}

	fn set_fill_style(&self, style: &str) {
		self.set_fill_style_str(style);
	}

	fn set_stroke_style(&self, style: &str) {
		self.set_stroke_style_str(style);
	}

	fn set_line_width(&self, width: f64) {
		CanvasRenderingContext2d::set_line_width(self, width);
	}

	fn set_font(&self, font: &str) {
		CanvasRenderingContext2d::set_font(self, font);
	}

	fn fill_text(&self, text: &str, x: f64, y: f64) {
		let _ = CanvasRenderingContext2d::fill_text(self, text, x, y);
	}
}

//! Edge geometry in world space.
//!
//! A link is drawn from the rim of its source circle to a point short of the
//! target circle, leaving room for the arrowhead whose tip touches the target
//! rim.

/// A point or vector in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
	/// Horizontal coordinate.
	pub x: f64,
	/// Vertical coordinate.
	pub y: f64,
}

impl Point {
	/// Creates a point.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	/// Euclidean length, treating the point as a vector.
	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	/// Distance to `other`.
	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	/// Point halfway to `other`.
	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}

	/// Perpendicular vector, rotated a quarter turn counter-clockwise.
	pub fn perp(self) -> Point {
		Point::new(-self.y, self.x)
	}
}

impl std::ops::Add for Point {
	type Output = Point;
	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl std::ops::Sub for Point {
	type Output = Point;
	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl std::ops::Mul<f64> for Point {
	type Output = Point;
	fn mul(self, k: f64) -> Point {
		Point::new(self.x * k, self.y * k)
	}
}

/// Width-to-height ratio of the arrowhead triangle.
const ARROW_ASPECT: f64 = 1.6;

/// The visible part of a link.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrimmedSegment {
	/// Where the line leaves the source rim.
	pub start: Point,
	/// Base of the arrowhead.
	pub end: Point,
	/// Unit vector from source to target.
	pub direction: Point,
}

impl TrimmedSegment {
	/// Where the link label goes.
	pub fn midpoint(&self) -> Point {
		self.start.midpoint(self.end)
	}

	/// Arrowhead triangle `[tip, left, right]` with its base on the trimmed end.
	pub fn arrowhead(&self, arrow_length: f64) -> [Point; 3] {
		let tip = self.end + self.direction * arrow_length;
		let half_width = self.direction.perp() * (arrow_length / ARROW_ASPECT / 2.0);
		[tip, self.end + half_width, self.end - half_width]
	}
}

/// Trims the segment `source -> target` so it clears both node circles and
/// the arrowhead.
///
/// Returns `None` for a degenerate link whose endpoints coincide.
pub fn trim_segment(
	source: Point,
	target: Point,
	node_radius: f64,
	arrow_length: f64,
) -> Option<TrimmedSegment> {
	let delta = target - source;
	let length = delta.length();
	if length == 0.0 || !length.is_finite() {
		return None;
	}

	let direction = delta * (1.0 / length);
	Some(TrimmedSegment {
		start: source + direction * node_radius,
		end: target - direction * (node_radius + arrow_length),
		direction,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: Point, b: Point) -> bool {
		a.distance(b) < 1e-9
	}

	#[test]
	fn horizontal_link_is_trimmed_at_both_ends() {
		let seg = trim_segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 2.0, 6.0).unwrap();
		assert!(close(seg.start, Point::new(2.0, 0.0)));
		assert!(close(seg.end, Point::new(92.0, 0.0)));
		assert!(close(seg.midpoint(), Point::new(47.0, 0.0)));
	}

	#[test]
	fn arrow_tip_touches_target_rim() {
		let target = Point::new(30.0, 40.0);
		let seg = trim_segment(Point::new(0.0, 0.0), target, 2.0, 6.0).unwrap();
		let [tip, left, right] = seg.arrowhead(6.0);
		assert!((tip.distance(target) - 2.0).abs() < 1e-9);
		assert!(close(left.midpoint(right), seg.end));
	}

	#[test]
	fn coincident_endpoints_are_degenerate() {
		let p = Point::new(5.0, 5.0);
		assert_eq!(trim_segment(p, p, 2.0, 6.0), None);
	}

	#[test]
	fn non_finite_positions_are_degenerate() {
		let p = Point::new(f64::NAN, 0.0);
		assert_eq!(trim_segment(p, Point::new(1.0, 1.0), 2.0, 6.0), None);
	}
}

use std::ops::{Add, AddAssign, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A point or offset in either model or screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn length(self) -> f64 {
		(self.x * self.x + self.y * self.y).sqrt()
	}

	pub fn distance(self, other: Point) -> f64 {
		(other - self).length()
	}

	pub fn midpoint(self, other: Point) -> Point {
		Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
	}
}

impl Add for Point {
	type Output = Point;

	fn add(self, rhs: Point) -> Point {
		Point::new(self.x + rhs.x, self.y + rhs.y)
	}
}

impl AddAssign for Point {
	fn add_assign(&mut self, rhs: Point) {
		self.x += rhs.x;
		self.y += rhs.y;
	}
}

impl Sub for Point {
	type Output = Point;

	fn sub(self, rhs: Point) -> Point {
		Point::new(self.x - rhs.x, self.y - rhs.y)
	}
}

impl Mul<f64> for Point {
	type Output = Point;

	fn mul(self, k: f64) -> Point {
		Point::new(self.x * k, self.y * k)
	}
}

impl Div<f64> for Point {
	type Output = Point;

	fn div(self, k: f64) -> Point {
		Point::new(self.x / k, self.y / k)
	}
}

/// Drawing surface dimensions in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
	pub width: f64,
	pub height: f64,
}

impl Size {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	pub fn center(self) -> Point {
		Point::new(self.width / 2.0, self.height / 2.0)
	}
}

pub const CURVE_BOW_RATIO: f64 = 0.3;
pub const CURVE_BOW_MAX: f64 = 50.0;

/// Quadratic Bézier segment used for edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadCurve {
	pub from: Point,
	pub control: Point,
	pub to: Point,
}

impl QuadCurve {
	/// Bowed curve between two points: the control point sits on the
	/// perpendicular through the midpoint, `min(distance * 0.3, 50)` away.
	pub fn bowed(from: Point, to: Point) -> Self {
		let mid = from.midpoint(to);
		let delta = to - from;
		let dist = delta.length();
		// Coincident endpoints have no perpendicular; collapse onto the midpoint.
		if dist < f64::EPSILON {
			return Self {
				from,
				control: mid,
				to,
			};
		}
		let normal = Point::new(-delta.y / dist, delta.x / dist);
		let offset = (dist * CURVE_BOW_RATIO).min(CURVE_BOW_MAX);
		Self {
			from,
			control: mid + normal * offset,
			to,
		}
	}

	/// Perpendicular distance from the control point to the chord.
	pub fn bow(&self) -> f64 {
		let chord = self.to - self.from;
		let len = chord.length();
		if len < f64::EPSILON {
			return 0.0;
		}
		let rel = self.control - self.from;
		(chord.x * rel.y - chord.y * rel.x).abs() / len
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn bowed_curve_offsets_thirty_percent() {
		let curve = QuadCurve::bowed(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
		assert_eq!(curve.control, Point::new(50.0, 30.0));
		assert!((curve.bow() - 30.0).abs() < 1e-9);
	}

	#[test]
	fn bowed_curve_caps_offset() {
		let curve = QuadCurve::bowed(Point::new(0.0, 0.0), Point::new(0.0, 1000.0));
		assert!((curve.bow() - CURVE_BOW_MAX).abs() < 1e-9);
	}

	#[test]
	fn coincident_endpoints_do_not_produce_nan() {
		let p = Point::new(12.0, -4.0);
		let curve = QuadCurve::bowed(p, p);
		assert_eq!(curve.control, p);
		assert_eq!(curve.bow(), 0.0);
	}
}

//! Plane geometry shared by both diagrams: rectangles, edge anchoring and
//! the cubic curves used for connectors.

use crate::svg::fmt_num;

/// A point in diagram content space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}

	pub fn offset(self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy)
	}
}

/// Axis-aligned rectangle, origin at the top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self {
			x,
			y,
			width,
			height,
		}
	}

	pub fn right(&self) -> f64 {
		self.x + self.width
	}

	pub fn bottom(&self) -> f64 {
		self.y + self.height
	}

	pub fn center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
	}

	pub fn top_center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.y)
	}

	pub fn bottom_center(&self) -> Point {
		Point::new(self.x + self.width / 2.0, self.bottom())
	}

	pub fn left_middle(&self) -> Point {
		Point::new(self.x, self.y + self.height / 2.0)
	}

	pub fn right_middle(&self) -> Point {
		Point::new(self.right(), self.y + self.height / 2.0)
	}

	pub fn translated(&self, dx: f64, dy: f64) -> Self {
		Self::new(self.x + dx, self.y + dy, self.width, self.height)
	}

	pub fn contains(&self, p: Point) -> bool {
		p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
	}

	/// Smallest rectangle covering both.
	pub fn union(&self, other: &Rect) -> Rect {
		let (x, y) = (self.x.min(other.x), self.y.min(other.y));
		Rect::new(
			x,
			y,
			self.right().max(other.right()) - x,
			self.bottom().max(other.bottom()) - y,
		)
	}
}

/// Bounding box over a set of rectangles. `None` when the set is empty.
pub fn bounding_box<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
	rects
		.into_iter()
		.fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |a| a.union(r))))
}

/// Which pair of facing edges a connector was anchored on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Facing {
	/// `from` sits above `to`.
	Below,
	/// `from` sits below `to`.
	Above,
	/// `from` sits left of `to`.
	Right,
	/// `from` sits right of `to` (also the fallback for overlapping boxes).
	Left,
}

/// Pick connector endpoints on the facing edges of two boxes.
///
/// Vertical separation wins over horizontal; overlapping boxes fall through
/// to the left-edge case.
pub fn facing_edges(from: &Rect, to: &Rect) -> (Point, Point, Facing) {
	if from.bottom() < to.y {
		(from.bottom_center(), to.top_center(), Facing::Below)
	} else if from.y > to.bottom() {
		(from.top_center(), to.bottom_center(), Facing::Above)
	} else if from.right() < to.x {
		(from.right_middle(), to.left_middle(), Facing::Right)
	} else {
		(from.left_middle(), to.right_middle(), Facing::Left)
	}
}

/// A cubic Bézier segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicCurve {
	pub start: Point,
	pub c1: Point,
	pub c2: Point,
	pub end: Point,
}

const CONNECTOR_MAX_OFFSET: f64 = 80.0;
const CONNECTOR_OFFSET_RATIO: f64 = 0.4;

fn signum0(v: f64) -> f64 {
	if v == 0.0 { 0.0 } else { v.signum() }
}

impl CubicCurve {
	/// Connector whose control points bow out along the dominant axis by
	/// `min(80, 0.4 * |delta|)`.
	pub fn connector(start: Point, end: Point) -> Self {
		let (dx, dy) = (end.x - start.x, end.y - start.y);
		if dx.abs() > dy.abs() {
			let o = CONNECTOR_MAX_OFFSET.min(dx.abs() * CONNECTOR_OFFSET_RATIO) * signum0(dx);
			Self {
				start,
				c1: start.offset(o, 0.0),
				c2: end.offset(-o, 0.0),
				end,
			}
		} else {
			let o = CONNECTOR_MAX_OFFSET.min(dy.abs() * CONNECTOR_OFFSET_RATIO) * signum0(dy);
			Self {
				start,
				c1: start.offset(0.0, o),
				c2: end.offset(0.0, -o),
				end,
			}
		}
	}

	/// Near-straight curve whose control points sit `factor` of the way
	/// along the dominant axis.
	pub fn gentle(start: Point, end: Point, factor: f64) -> Self {
		let (dx, dy) = (end.x - start.x, end.y - start.y);
		if dx.abs() > dy.abs() {
			Self {
				start,
				c1: start.offset(dx * factor, 0.0),
				c2: end.offset(-dx * factor, 0.0),
				end,
			}
		} else {
			Self {
				start,
				c1: start.offset(0.0, dy * factor),
				c2: end.offset(0.0, -dy * factor),
				end,
			}
		}
	}

	/// Route between the facing edges of two boxes.
	pub fn between(from: &Rect, to: &Rect) -> Self {
		let (start, end, _) = facing_edges(from, to);
		Self::connector(start, end)
	}

	/// SVG path data (`M… C…`).
	pub fn to_path_data(&self) -> String {
		format!(
			"M{},{} C{},{} {},{} {},{}",
			fmt_num(self.start.x),
			fmt_num(self.start.y),
			fmt_num(self.c1.x),
			fmt_num(self.c1.y),
			fmt_num(self.c2.x),
			fmt_num(self.c2.y),
			fmt_num(self.end.x),
			fmt_num(self.end.y)
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn on_edge_midpoint(p: Point, r: &Rect) -> bool {
		let c = r.center();
		(p.x == c.x && (p.y == r.y || p.y == r.bottom()))
			|| (p.y == c.y && (p.x == r.x || p.x == r.right()))
	}

	#[test]
	fn stacked_boxes_connect_bottom_to_top() {
		let a = Rect::new(0.0, 0.0, 100.0, 50.0);
		let b = Rect::new(200.0, 120.0, 80.0, 40.0);
		let (s, e, facing) = facing_edges(&a, &b);
		assert_eq!(facing, Facing::Below);
		assert_eq!(s, Point::new(50.0, 50.0));
		assert_eq!(e, Point::new(240.0, 120.0));

		let (s, e, facing) = facing_edges(&b, &a);
		assert_eq!(facing, Facing::Above);
		assert_eq!(s, Point::new(240.0, 120.0));
		assert_eq!(e, Point::new(50.0, 50.0));
	}

	#[test]
	fn side_by_side_boxes_connect_horizontally() {
		let a = Rect::new(0.0, 0.0, 100.0, 50.0);
		let b = Rect::new(300.0, 10.0, 100.0, 50.0);
		assert_eq!(facing_edges(&a, &b).2, Facing::Right);
		assert_eq!(facing_edges(&b, &a).2, Facing::Left);
		assert_eq!(facing_edges(&b, &a).0, Point::new(300.0, 35.0));
	}

	#[test]
	fn disjoint_boxes_never_anchor_on_corners() {
		let base = Rect::new(400.0, 400.0, 120.0, 80.0);
		for (dx, dy) in [
			(-300.0, -300.0),
			(0.0, -200.0),
			(300.0, -250.0),
			(-300.0, 0.0),
			(300.0, 10.0),
			(-250.0, 300.0),
			(0.0, 200.0),
			(260.0, 260.0),
		] {
			let other = base.translated(dx, dy);
			let (s, e, _) = facing_edges(&base, &other);
			assert!(on_edge_midpoint(s, &base), "start {s:?} for offset {dx},{dy}");
			assert!(on_edge_midpoint(e, &other), "end {e:?} for offset {dx},{dy}");
		}
	}

	#[test]
	fn connector_offset_is_capped() {
		let c = CubicCurve::connector(Point::new(0.0, 0.0), Point::new(0.0, 500.0));
		assert_eq!(c.c1, Point::new(0.0, 80.0));
		assert_eq!(c.c2, Point::new(0.0, 420.0));

		let c = CubicCurve::connector(Point::new(100.0, 0.0), Point::new(0.0, 10.0));
		assert_eq!(c.c1, Point::new(60.0, 0.0));
		assert_eq!(c.c2, Point::new(40.0, 10.0));
	}

	#[test]
	fn gentle_curve_stays_close_to_the_line() {
		let c = CubicCurve::gentle(Point::new(0.0, 0.0), Point::new(200.0, 20.0), 0.05);
		assert_eq!(c.c1, Point::new(10.0, 0.0));
		assert_eq!(c.c2, Point::new(190.0, 20.0));
		assert_eq!(c.to_path_data(), "M0,0 C10,0 190,20 200,20");
	}

	#[test]
	fn bounding_box_covers_all() {
		let rects = [
			Rect::new(10.0, 10.0, 5.0, 5.0),
			Rect::new(-5.0, 20.0, 10.0, 10.0),
		];
		assert_eq!(bounding_box(&rects), Some(Rect::new(-5.0, 10.0, 20.0, 20.0)));
		assert_eq!(bounding_box(std::iter::empty()), None);
	}
}

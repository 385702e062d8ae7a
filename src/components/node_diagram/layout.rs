//! Tiered box layout for the cluster diagram.
//!
//! Boxes are stacked top to bottom: console and master side by side, hot
//! below master, ML and frozen branching off underneath hot. Each box holds a
//! node group centred inside it.

use crate::geometry::{Point, Rect, bounding_box};
use crate::settings::{ClusterSettings, HELPER_INSTANCE_TYPE, MASTER_COUNT};

use super::instance::{InstanceSizing, sizing};
use super::types::{Connection, ConnectionKind, NodeTier};

pub const NODE_RADIUS: f64 = 25.0;
/// Every content layer is shifted down by this much below the title.
pub const CONTENT_OFFSET_Y: f64 = 60.0;
pub const MAX_VISIBLE_NODES: u32 = 5;
pub const BANNER_HEIGHT: f64 = 28.0;
pub const INSTANCE_BADGE_WIDTH: f64 = 110.0;
pub const INSTANCE_BADGE_HEIGHT: f64 = 40.0;

const BASE_BOX_HEIGHT: f64 = 140.0;
const ROW_HEIGHT: f64 = 60.0;
const NODES_PER_ROW: u32 = 3;
const HELPER_BOX_X: f64 = 80.0;

/// Rectangle that frames one tier.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeBox {
	pub tier: NodeTier,
	pub rect: Rect,
}

/// The circles, badges and hover area for one tier, centred in its box.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeGroup {
	pub tier: NodeTier,
	pub center: Point,
	pub count: u32,
	pub instance_type: String,
	pub sizing: InstanceSizing,
	/// Circle centres relative to `center`.
	pub circles: Vec<Point>,
	/// Nodes beyond the visible maximum, shown as `+N more`.
	pub overflow: Option<u32>,
	/// Geometry of the enclosing box, used for connection routing.
	pub box_rect: Rect,
}

impl NodeGroup {
	/// Region that reacts to hover and drag, in layer coordinates.
	pub fn hover_area(&self) -> Rect {
		Rect::new(
			self.center.x - self.box_rect.width / 2.0,
			self.center.y - NODE_RADIUS * 2.0,
			self.box_rect.width,
			NODE_RADIUS * 6.0 + INSTANCE_BADGE_HEIGHT,
		)
	}
}

/// A positioned cluster diagram. Rebuilt from scratch on every update.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterLayout {
	pub width: f64,
	pub height: f64,
	pub boxes: Vec<NodeBox>,
	pub groups: Vec<NodeGroup>,
	pub connections: Vec<Connection>,
}

/// Height of a box holding `count` nodes: one extra row of circles per
/// three visible nodes.
pub fn box_height(count: u32) -> f64 {
	let rows = count.min(MAX_VISIBLE_NODES).div_ceil(NODES_PER_ROW);
	BASE_BOX_HEIGHT + rows.saturating_sub(1) as f64 * ROW_HEIGHT
}

fn box_width(tier: NodeTier, count: u32) -> f64 {
	match tier {
		NodeTier::Master => 240.0,
		NodeTier::Hot => (count as f64 * 40.0).clamp(300.0, 360.0),
		_ => 220.0,
	}
}

/// Offsets of the visible circles from the group centre.
pub fn circle_offsets(count: u32) -> Vec<Point> {
	let visible = count.min(MAX_VISIBLE_NODES) as usize;
	if visible == 0 {
		return Vec::new();
	}
	// Four nodes read better as a 2x2 grid.
	let cols = if visible == 4 { 2 } else { visible.min(3) };
	let rows = visible.div_ceil(cols);
	let step = NODE_RADIUS * 2.5;
	(0..visible)
		.map(|i| {
			let (col, row) = ((i % cols) as f64, (i / cols) as f64);
			let x = if visible == 4 {
				col * NODE_RADIUS * 3.0 - NODE_RADIUS * 1.5
			} else {
				(col - (cols as f64 - 1.0) / 2.0) * step
			};
			let y = (row - (rows as f64 - 1.0) / 2.0) * step;
			Point::new(x, y)
		})
		.collect()
}

fn group(tier: NodeTier, rect: Rect, count: u32, instance_type: &str) -> NodeGroup {
	let sizing = match tier {
		NodeTier::Helper => InstanceSizing {
			cpu: "2 vCPU",
			memory: "4 GiB",
		},
		_ => sizing(instance_type),
	};
	NodeGroup {
		tier,
		center: rect.center(),
		count,
		instance_type: instance_type.to_string(),
		sizing,
		circles: circle_offsets(count),
		overflow: (count > MAX_VISIBLE_NODES).then(|| count - MAX_VISIBLE_NODES),
		box_rect: rect,
	}
}

impl ClusterLayout {
	/// Lay out the cluster for the given settings on a `width x height`
	/// surface. Pure: identical inputs give identical geometry.
	pub fn compute(settings: &ClusterSettings, width: f64, height: f64) -> Self {
		let center_x = width / 2.0;
		let (spacing_h, spacing_v) = (width * 0.12, height * 0.14);
		let mut tiers: Vec<(NodeTier, Rect, u32, &str)> = Vec::with_capacity(5);

		let helper = Rect::new(HELPER_BOX_X, height * 0.15, box_width(NodeTier::Helper, 1), box_height(1));
		tiers.push((NodeTier::Helper, helper, 1, HELPER_INSTANCE_TYPE));

		let master_w = box_width(NodeTier::Master, MASTER_COUNT);
		let master = Rect::new(center_x - master_w / 2.0, helper.y, master_w, box_height(MASTER_COUNT));
		tiers.push((NodeTier::Master, master, MASTER_COUNT, settings.master_instance_type.as_str()));

		let hot_w = box_width(NodeTier::Hot, settings.hot_count);
		let hot = Rect::new(
			center_x - hot_w / 2.0,
			master.bottom() + spacing_v,
			hot_w,
			box_height(settings.hot_count),
		);
		tiers.push((NodeTier::Hot, hot, settings.hot_count, settings.hot_instance_type.as_str()));

		let third_tier_y = hot.bottom() + spacing_v;
		if settings.ml_count > 0 {
			let ml = Rect::new(
				hot.x - spacing_h / 2.0,
				third_tier_y,
				box_width(NodeTier::Ml, settings.ml_count),
				box_height(settings.ml_count),
			);
			tiers.push((NodeTier::Ml, ml, settings.ml_count, settings.ml_instance_type.as_str()));
		}
		if settings.frozen_count > 0 {
			let frozen_w = box_width(NodeTier::Frozen, settings.frozen_count);
			let frozen = Rect::new(
				hot.right() - frozen_w + spacing_h / 2.0,
				third_tier_y,
				frozen_w,
				box_height(settings.frozen_count),
			);
			tiers.push((
				NodeTier::Frozen,
				frozen,
				settings.frozen_count,
				settings.frozen_instance_type.as_str(),
			));
		}

		let boxes = tiers
			.iter()
			.map(|&(tier, rect, _, _)| NodeBox { tier, rect })
			.collect();
		let groups = tiers
			.iter()
			.map(|&(tier, rect, count, instance)| group(tier, rect, count, instance))
			.collect();

		let mut layout = Self {
			width,
			height,
			boxes,
			groups,
			connections: Vec::new(),
		};
		layout.connections = layout.wire();
		layout
	}

	fn wire(&self) -> Vec<Connection> {
		use ConnectionKind::*;
		use NodeTier::*;

		[
			(Helper, Master, Normal),
			(Master, Hot, Normal),
			(Hot, Ml, Normal),
			(Hot, Frozen, Normal),
			(Helper, Hot, Data),
			(Ml, Helper, Monitoring),
			(Frozen, Helper, Monitoring),
			(Hot, Helper, Monitoring),
			(Master, Helper, Monitoring),
		]
		.into_iter()
		.filter(|(from, to, _)| self.has(*from) && self.has(*to))
		.map(|(from, to, kind)| Connection { from, to, kind })
		.collect()
	}

	pub fn has(&self, tier: NodeTier) -> bool {
		self.boxes.iter().any(|b| b.tier == tier)
	}

	pub fn node_box(&self, tier: NodeTier) -> Option<&NodeBox> {
		self.boxes.iter().find(|b| b.tier == tier)
	}

	pub fn group(&self, tier: NodeTier) -> Option<&NodeGroup> {
		self.groups.iter().find(|g| g.tier == tier)
	}

	/// Move a tier's box (and the group inside it) so its top-left corner
	/// lands on `origin`. Returns false if the tier is not laid out.
	pub fn move_tier_to(&mut self, tier: NodeTier, origin: Point) -> bool {
		let Some(node_box) = self.boxes.iter_mut().find(|b| b.tier == tier) else {
			return false;
		};
		let (dx, dy) = (origin.x - node_box.rect.x, origin.y - node_box.rect.y);
		node_box.rect = node_box.rect.translated(dx, dy);
		if let Some(g) = self.groups.iter_mut().find(|g| g.tier == tier) {
			g.center = g.center.offset(dx, dy);
			g.box_rect = node_box.rect;
		}
		true
	}

	/// Bounds of all boxes and hover areas in layer coordinates.
	pub fn bounds(&self) -> Option<Rect> {
		let rects: Vec<Rect> = self
			.boxes
			.iter()
			.map(|b| b.rect)
			.chain(self.groups.iter().map(NodeGroup::hover_area))
			.collect();
		bounding_box(&rects)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn settings(hot: u32, ml: u32, frozen: u32) -> ClusterSettings {
		ClusterSettings {
			hot_count: hot,
			ml_count: ml,
			frozen_count: frozen,
			..Default::default()
		}
	}

	#[test]
	fn box_heights_grow_per_row() {
		assert_eq!(box_height(0), 140.0);
		assert_eq!(box_height(1), 140.0);
		assert_eq!(box_height(3), 140.0);
		assert_eq!(box_height(4), 200.0);
		assert_eq!(box_height(50), 200.0);
	}

	#[test]
	fn circle_grid_shapes() {
		assert!(circle_offsets(0).is_empty());
		assert_eq!(circle_offsets(1), vec![Point::new(0.0, 0.0)]);
		assert_eq!(
			circle_offsets(3),
			vec![Point::new(-62.5, 0.0), Point::new(0.0, 0.0), Point::new(62.5, 0.0)]
		);
		assert_eq!(
			circle_offsets(4),
			vec![
				Point::new(-37.5, -31.25),
				Point::new(37.5, -31.25),
				Point::new(-37.5, 31.25),
				Point::new(37.5, 31.25),
			]
		);
		assert_eq!(circle_offsets(12).len(), 5);
	}

	#[test]
	fn tiers_stack_top_to_bottom() {
		let l = ClusterLayout::compute(&ClusterSettings::default(), 1000.0, 700.0);
		let r = |t| l.node_box(t).unwrap().rect;
		let helper = r(NodeTier::Helper);
		assert_eq!((helper.x, helper.width, helper.height), (80.0, 220.0, 140.0));
		assert!((helper.y - 105.0).abs() < 1e-9);
		assert_eq!(r(NodeTier::Master).y, r(NodeTier::Helper).y);
		assert_eq!(r(NodeTier::Master).center().x, 500.0);
		assert_eq!(r(NodeTier::Hot).width, 300.0);
		assert_eq!(r(NodeTier::Hot).height, 200.0);
		assert!(r(NodeTier::Hot).y > r(NodeTier::Master).bottom());
		assert!(r(NodeTier::Ml).y > r(NodeTier::Hot).bottom());
		assert_eq!(r(NodeTier::Ml).y, r(NodeTier::Frozen).y);
		assert!(r(NodeTier::Ml).x < r(NodeTier::Frozen).x);
	}

	#[test]
	fn hot_box_width_clamps() {
		let wide = ClusterLayout::compute(&settings(20, 0, 0), 1000.0, 700.0);
		assert_eq!(wide.node_box(NodeTier::Hot).unwrap().rect.width, 360.0);
		let mid = ClusterLayout::compute(&settings(8, 0, 0), 1000.0, 700.0);
		assert_eq!(mid.node_box(NodeTier::Hot).unwrap().rect.width, 320.0);
	}

	#[test]
	fn empty_tiers_are_dropped_with_their_connections() {
		let l = ClusterLayout::compute(&settings(2, 0, 0), 1000.0, 700.0);
		assert!(!l.has(NodeTier::Ml));
		assert!(!l.has(NodeTier::Frozen));
		assert_eq!(l.connections.len(), 5);
		assert!(
			l.connections
				.iter()
				.all(|c| c.from != NodeTier::Ml && c.to != NodeTier::Frozen)
		);
	}

	#[test]
	fn full_cluster_wires_every_connection() {
		let l = ClusterLayout::compute(&ClusterSettings::default(), 1000.0, 700.0);
		assert_eq!(l.connections.len(), 9);
		let kinds = |k| l.connections.iter().filter(|c| c.kind == k).count();
		assert_eq!(kinds(ConnectionKind::Normal), 4);
		assert_eq!(kinds(ConnectionKind::Data), 1);
		assert_eq!(kinds(ConnectionKind::Monitoring), 4);
	}

	#[test]
	fn overflow_badge_counts_hidden_nodes() {
		let l = ClusterLayout::compute(&settings(9, 2, 3), 1000.0, 700.0);
		let hot = l.group(NodeTier::Hot).unwrap();
		assert_eq!(hot.circles.len(), 5);
		assert_eq!(hot.overflow, Some(4));
		assert_eq!(l.group(NodeTier::Ml).unwrap().overflow, None);
	}

	#[test]
	fn same_inputs_same_geometry() {
		let s = settings(6, 1, 4);
		assert_eq!(
			ClusterLayout::compute(&s, 1200.0, 800.0),
			ClusterLayout::compute(&s.clone(), 1200.0, 800.0)
		);
	}

	#[test]
	fn moving_a_tier_carries_its_group() {
		let mut l = ClusterLayout::compute(&ClusterSettings::default(), 1000.0, 700.0);
		let before = l.group(NodeTier::Hot).unwrap().center;
		let origin = l.node_box(NodeTier::Hot).unwrap().rect;
		assert!(l.move_tier_to(NodeTier::Hot, Point::new(origin.x + 40.0, origin.y - 10.0)));
		let after = l.group(NodeTier::Hot).unwrap();
		let expected = before.offset(40.0, -10.0);
		assert!((after.center.x - expected.x).abs() < 1e-9);
		assert!((after.center.y - expected.y).abs() < 1e-9);
		assert_eq!(after.box_rect, l.node_box(NodeTier::Hot).unwrap().rect);
		assert_eq!(l.node_box(NodeTier::Master).unwrap().rect, {
			ClusterLayout::compute(&ClusterSettings::default(), 1000.0, 700.0)
				.node_box(NodeTier::Master)
				.unwrap()
				.rect
		});
	}
}

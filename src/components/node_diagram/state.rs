use std::collections::BTreeSet;

use log::debug;

use crate::geometry::{CubicCurve, Point, Rect};
use crate::settings::ClusterSettings;

use super::flows::{FlowPath, flow_paths};
use super::layout::{CONTENT_OFFSET_Y, ClusterLayout};
use super::tooltip::TooltipInfo;
use super::types::{Connection, FlowKind, NodeTier};
use super::viewport::{BUTTON_ZOOM, FitPreset, PanState, ViewportTransform};

pub const MIN_WIDTH: f64 = 800.0;
pub const MIN_HEIGHT: f64 = 600.0;
/// Surface used while the host has not been laid out yet.
pub const INITIAL_WIDTH: f64 = 1000.0;
pub const INITIAL_HEIGHT: f64 = 700.0;
/// Smaller size changes keep the current layout.
pub const RESIZE_THRESHOLD: f64 = 50.0;
const PRIMARY_BUTTON: i16 = 0;

/// First surface for a host measuring `width x height`. A dimension the
/// host reports as zero takes the initial size instead.
pub fn initial_surface(width: f64, height: f64) -> (f64, f64) {
	let pick = |measured: f64, fallback: f64| if measured > 0.0 { measured } else { fallback };
	(pick(width, INITIAL_WIDTH), pick(height, INITIAL_HEIGHT))
}

/// Node group being dragged.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub tier: Option<NodeTier>,
	pub start_x: f64,
	pub start_y: f64,
	pub box_start_x: f64,
	pub box_start_y: f64,
}

/// What an event handler has to repaint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
	None,
	/// Only the root group's transform changed.
	Transform,
	/// Geometry or overlays changed; regenerate the markup.
	Content,
}

pub struct NodeDiagramState {
	pub id: String,
	pub settings: ClusterSettings,
	pub layout: ClusterLayout,
	pub transform: ViewportTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hover: Option<NodeTier>,
	pub show_monitoring: bool,
	pub flows: BTreeSet<FlowKind>,
	pub width: f64,
	pub height: f64,
}

impl NodeDiagramState {
	/// Lay out on a surface of at least `MIN_WIDTH x MIN_HEIGHT` and fit the
	/// view.
	pub fn new(id: impl Into<String>, settings: ClusterSettings, width: f64, height: f64) -> Self {
		let (width, height) = (width.max(MIN_WIDTH), height.max(MIN_HEIGHT));
		let layout = ClusterLayout::compute(&settings, width, height);
		let mut state = Self {
			id: id.into(),
			settings,
			layout,
			transform: ViewportTransform::default(),
			drag: DragState::default(),
			pan: PanState::default(),
			hover: None,
			show_monitoring: false,
			flows: BTreeSet::new(),
			width,
			height,
		};
		state.fit(FitPreset::INITIAL);
		state
	}

	/// Re-layout from new settings. Drag offsets are dropped, the view is kept.
	pub fn update(&mut self, settings: ClusterSettings) -> Redraw {
		self.settings = settings;
		self.relayout();
		Redraw::Content
	}

	fn relayout(&mut self) {
		self.layout = ClusterLayout::compute(&self.settings, self.width, self.height);
		self.drag = DragState::default();
		if self.hover.is_some_and(|t| !self.layout.has(t)) {
			self.hover = None;
		}
	}

	/// React to a new host size. Returns true when the layout was rebuilt and
	/// the caller should schedule a re-fit. A hidden host (zero size) keeps
	/// the current layout.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if width <= 0.0 || height <= 0.0 {
			debug!("{}: host hidden, keeping {}x{}", self.id, self.width, self.height);
			return false;
		}
		if (width - self.width).abs() <= RESIZE_THRESHOLD
			&& (height - self.height).abs() <= RESIZE_THRESHOLD
		{
			return false;
		}
		self.width = width.max(MIN_WIDTH);
		self.height = height.max(MIN_HEIGHT);
		debug!("{}: relayout at {}x{}", self.id, self.width, self.height);
		self.relayout();
		true
	}

	/// Bounds of everything drawn in the root group.
	pub fn content_bounds(&self) -> Option<Rect> {
		self.layout.bounds().map(|b| b.translated(0.0, CONTENT_OFFSET_Y))
	}

	pub fn fit(&mut self, preset: FitPreset) -> Redraw {
		self.transform = ViewportTransform::fit(self.content_bounds(), self.width, self.height, preset);
		Redraw::Transform
	}

	/// Screen point (relative to the host) to layer coordinates.
	pub fn screen_to_layer(&self, screen: Point) -> Point {
		self.transform.screen_to_content(screen).offset(0.0, -CONTENT_OFFSET_Y)
	}

	/// Topmost node group whose hover area contains the point.
	pub fn tier_at(&self, screen: Point) -> Option<NodeTier> {
		let p = self.screen_to_layer(screen);
		self.layout
			.groups
			.iter()
			.rev()
			.find(|g| g.hover_area().contains(p))
			.map(|g| g.tier)
	}

	pub fn pointer_down(&mut self, screen: Point, button: i16) -> Redraw {
		if button != PRIMARY_BUTTON {
			return Redraw::None;
		}
		let grabbed = self
			.tier_at(screen)
			.and_then(|t| self.layout.node_box(t))
			.map(|b| (b.tier, b.rect));
		match grabbed {
			Some((tier, rect)) => {
				self.drag = DragState {
					active: true,
					tier: Some(tier),
					start_x: screen.x,
					start_y: screen.y,
					box_start_x: rect.x,
					box_start_y: rect.y,
				};
			}
			None => self.pan.begin(screen, &self.transform),
		}
		Redraw::None
	}

	pub fn pointer_move(&mut self, screen: Point) -> Redraw {
		if self.drag.active {
			if let Some(tier) = self.drag.tier {
				let origin = Point::new(
					self.drag.box_start_x + (screen.x - self.drag.start_x) / self.transform.scale,
					self.drag.box_start_y + (screen.y - self.drag.start_y) / self.transform.scale,
				);
				if self.layout.move_tier_to(tier, origin) {
					return Redraw::Content;
				}
			}
			return Redraw::None;
		}
		if self.pan.active {
			self.pan.update(screen, &mut self.transform);
			return Redraw::Transform;
		}
		self.hover = self.tier_at(screen);
		Redraw::None
	}

	pub fn pointer_up(&mut self) {
		self.drag.active = false;
		self.drag.tier = None;
		self.pan.end();
	}

	pub fn pointer_leave(&mut self) {
		self.pointer_up();
		self.hover = None;
	}

	pub fn wheel(&mut self, delta_y: f64, screen: Point) -> Redraw {
		if self.transform.wheel(delta_y, screen) {
			Redraw::Transform
		} else {
			Redraw::None
		}
	}

	/// Button zoom about the centre of the view.
	pub fn zoom_step(&mut self, zoom_in: bool) -> Redraw {
		let factor = if zoom_in { BUTTON_ZOOM } else { 1.0 / BUTTON_ZOOM };
		let centre = Point::new(self.width / 2.0, self.height / 2.0);
		if self.transform.zoom_at(self.transform.scale * factor, centre) {
			Redraw::Transform
		} else {
			Redraw::None
		}
	}

	pub fn set_monitoring(&mut self, show: bool) -> Redraw {
		if self.show_monitoring == show {
			return Redraw::None;
		}
		self.show_monitoring = show;
		Redraw::Content
	}

	pub fn set_flows(&mut self, flows: BTreeSet<FlowKind>) -> Redraw {
		if self.flows == flows {
			return Redraw::None;
		}
		self.flows = flows;
		Redraw::Content
	}

	/// Connection curves routed between the current box positions.
	pub fn connection_paths(&self) -> Vec<(Connection, CubicCurve)> {
		self.layout
			.connections
			.iter()
			.filter_map(|c| {
				let (a, b) = (self.layout.node_box(c.from)?, self.layout.node_box(c.to)?);
				Some((*c, CubicCurve::between(&a.rect, &b.rect)))
			})
			.collect()
	}

	pub fn flow_paths(&self) -> Vec<FlowPath> {
		flow_paths(&self.layout, &self.flows)
	}

	/// Tooltip for the hovered group, hidden while the view is being panned.
	pub fn tooltip(&self) -> Option<TooltipInfo> {
		if self.pan.active {
			return None;
		}
		let tier = self.drag.tier.or(self.hover)?;
		self.layout.group(tier).map(TooltipInfo::for_group)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::node_diagram::types::ConnectionKind;

	fn state() -> NodeDiagramState {
		NodeDiagramState::new("test", ClusterSettings::default(), 1000.0, 700.0)
	}

	fn screen_of(s: &NodeDiagramState, tier: NodeTier) -> Point {
		let c = s.layout.group(tier).unwrap().center;
		s.transform.content_to_screen(c.offset(0.0, CONTENT_OFFSET_Y))
	}

	#[test]
	fn new_state_is_fitted() {
		let s = state();
		assert!(s.transform.scale <= 0.9);
		assert!(s.transform.scale >= 0.25);
		let b = s.content_bounds().unwrap();
		let tl = s.transform.content_to_screen(Point::new(b.x, b.y));
		let br = s.transform.content_to_screen(Point::new(b.right(), b.bottom()));
		assert!(((tl.x + br.x) / 2.0 - 500.0).abs() < 1e-6);
		assert!(((tl.y + br.y) / 2.0 - 350.0).abs() < 1e-6);
	}

	#[test]
	fn small_surfaces_are_raised_to_the_minimum() {
		let s = NodeDiagramState::new("test", ClusterSettings::default(), 300.0, 200.0);
		assert_eq!((s.width, s.height), (MIN_WIDTH, MIN_HEIGHT));
	}

	#[test]
	fn hit_test_finds_groups() {
		let s = state();
		for tier in NodeTier::ALL {
			assert_eq!(s.tier_at(screen_of(&s, tier)), Some(tier));
		}
		assert_eq!(s.tier_at(Point::new(2.0, 2.0)), None);
	}

	#[test]
	fn background_drag_pans() {
		let mut s = state();
		let before = s.transform;
		s.pointer_down(Point::new(2.0, 2.0), 0);
		assert!(s.pan.active);
		assert_eq!(s.pointer_move(Point::new(42.0, 12.0)), Redraw::Transform);
		assert!((s.transform.translate_x - (before.translate_x + 40.0 / before.scale)).abs() < 1e-9);
		assert!((s.transform.translate_y - (before.translate_y + 10.0 / before.scale)).abs() < 1e-9);
		s.pointer_up();
		assert!(!s.pan.active);
	}

	#[test]
	fn secondary_button_is_ignored() {
		let mut s = state();
		s.pointer_down(Point::new(2.0, 2.0), 2);
		assert!(!s.pan.active && !s.drag.active);
	}

	#[test]
	fn node_drag_moves_one_tier_and_reroutes() {
		let mut s = state();
		let untouched = s.layout.node_box(NodeTier::Master).unwrap().rect;
		let hot_before = s.layout.node_box(NodeTier::Hot).unwrap().rect;
		let routes_before = s.connection_paths();

		let grab = screen_of(&s, NodeTier::Hot);
		s.pointer_down(grab, 0);
		assert_eq!(s.drag.tier, Some(NodeTier::Hot));
		let scale = s.transform.scale;
		assert_eq!(s.pointer_move(grab.offset(60.0, 30.0)), Redraw::Content);

		let hot = s.layout.node_box(NodeTier::Hot).unwrap().rect;
		assert!((hot.x - (hot_before.x + 60.0 / scale)).abs() < 1e-9);
		assert!((hot.y - (hot_before.y + 30.0 / scale)).abs() < 1e-9);
		assert_eq!(s.layout.node_box(NodeTier::Master).unwrap().rect, untouched);

		let routes_after = s.connection_paths();
		for ((c, before), (_, after)) in routes_before.iter().zip(&routes_after) {
			let touches_hot = c.from == NodeTier::Hot || c.to == NodeTier::Hot;
			assert_eq!(before != after, touches_hot, "{c:?}");
		}
		s.pointer_up();
		assert!(!s.drag.active);
	}

	#[test]
	fn update_clears_drag_offsets() {
		let mut s = state();
		let fresh = s.layout.clone();
		let grab = screen_of(&s, NodeTier::Ml);
		s.pointer_down(grab, 0);
		s.pointer_move(grab.offset(-80.0, 5.0));
		s.pointer_up();
		assert_ne!(s.layout, fresh);
		assert_eq!(s.update(ClusterSettings::default()), Redraw::Content);
		assert_eq!(s.layout, fresh);
	}

	#[test]
	fn resize_ignores_small_changes() {
		let mut s = state();
		assert!(!s.resize(1040.0, 720.0));
		assert_eq!(s.width, 1000.0);
		assert!(s.resize(1200.0, 720.0));
		assert_eq!((s.width, s.height), (1200.0, 720.0));
		assert!(s.resize(500.0, 400.0));
		assert_eq!((s.width, s.height), (MIN_WIDTH, MIN_HEIGHT));
	}

	#[test]
	fn first_layout_uses_the_host_size() {
		let (w, h) = initial_surface(900.0, 700.0);
		let s = NodeDiagramState::new("test", ClusterSettings::default(), w, h);
		assert_eq!((s.width, s.height), (900.0, 700.0));
		assert_eq!(initial_surface(0.0, 650.0), (INITIAL_WIDTH, 650.0));
		assert_eq!(initial_surface(0.0, 0.0), (INITIAL_WIDTH, INITIAL_HEIGHT));

		let b = s.content_bounds().unwrap();
		let tl = s.transform.content_to_screen(Point::new(b.x, b.y));
		let br = s.transform.content_to_screen(Point::new(b.right(), b.bottom()));
		assert!(((tl.x + br.x) / 2.0 - 450.0).abs() < 1e-6);
		let mut s = s;
		assert!(!s.resize(900.0, 700.0));
	}

	#[test]
	fn hidden_host_keeps_layout_and_drags() {
		let mut s = state();
		let grab = screen_of(&s, NodeTier::Hot);
		s.pointer_down(grab, 0);
		s.pointer_move(grab.offset(100.0, 0.0));
		s.pointer_up();
		let dragged = s.layout.clone();

		assert!(!s.resize(0.0, 0.0));
		assert!(!s.resize(0.0, 700.0));
		assert!(!s.resize(1400.0, 0.0));
		assert_eq!((s.width, s.height), (1000.0, 700.0));
		assert_eq!(s.layout, dragged);
	}

	#[test]
	fn zoom_buttons_clamp() {
		let mut s = state();
		for _ in 0..30 {
			s.zoom_step(true);
		}
		assert_eq!(s.transform.scale, 2.5);
		assert_eq!(s.zoom_step(true), Redraw::None);
		assert_eq!(s.zoom_step(false), Redraw::Transform);
	}

	#[test]
	fn overlay_toggles_report_changes() {
		let mut s = state();
		assert_eq!(s.set_monitoring(false), Redraw::None);
		assert_eq!(s.set_monitoring(true), Redraw::Content);
		assert_eq!(s.set_flows(BTreeSet::from([FlowKind::Search])), Redraw::Content);
		assert_eq!(s.flow_paths().len(), 4);
		assert_eq!(
			s.connection_paths()
				.iter()
				.filter(|(c, _)| c.kind == ConnectionKind::Monitoring)
				.count(),
			4
		);
	}

	#[test]
	fn hovering_shows_a_tooltip() {
		let mut s = state();
		assert!(s.tooltip().is_none());
		s.pointer_move(screen_of(&s, NodeTier::Frozen));
		assert_eq!(s.tooltip().map(|t| t.title), Some("Frozen Nodes"));
		s.pointer_leave();
		assert!(s.tooltip().is_none());
	}

	#[test]
	fn panning_hides_the_tooltip() {
		let mut s = state();
		let master = screen_of(&s, NodeTier::Master);
		s.pointer_move(master);
		assert!(s.tooltip().is_some());

		s.pointer_down(Point::new(2.0, 2.0), 0);
		assert!(s.pan.active);
		s.pointer_move(master);
		assert!(s.tooltip().is_none());
		s.pointer_move(screen_of(&s, NodeTier::Hot));
		assert!(s.tooltip().is_none());

		s.pointer_up();
		s.pointer_move(screen_of(&s, NodeTier::Hot));
		assert_eq!(s.tooltip().map(|t| t.tier), Some(NodeTier::Hot));
	}
}

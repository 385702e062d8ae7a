use crate::geometry::{CubicCurve, Point};
use crate::svg::{FONT_STACK, SvgWriter, attr, num};

use super::color::{darken, lighten};
use super::flows::{FlowAnchor, FlowPath, flow_anchors};
use super::layout::{
	BANNER_HEIGHT, CONTENT_OFFSET_Y, INSTANCE_BADGE_HEIGHT, INSTANCE_BADGE_WIDTH, NODE_RADIUS,
	NodeBox, NodeGroup,
};
use super::state::NodeDiagramState;
use super::types::{ConnectionKind, FlowKind, NodeTier};

pub const TITLE: &str = "Elasticsearch Cluster Architecture";
const BACKGROUND: &str = "#f8f9fa";
const BOX_BORDER: &str = "#e0e0e0";
const TEXT_COLOR: &str = "#333333";
const MUTED_TEXT: &str = "#666";
const BOX_RADIUS: f64 = 12.0;

/// Id of the group carrying the viewport transform.
pub fn root_id(id: &str) -> String {
	format!("{id}-root")
}

/// Class list for the outer `<svg>`.
pub fn svg_class(state: &NodeDiagramState) -> &'static str {
	if state.transform.is_zoomed_out() {
		"node-diagram zoomed-out"
	} else {
		"node-diagram"
	}
}

/// Full markup for the current state.
pub fn render(state: &NodeDiagramState) -> String {
	let id = state.id.as_str();
	let mut w = SvgWriter::new();
	w.open(
		"svg",
		&[
			("xmlns", attr("http://www.w3.org/2000/svg")),
			("id", format!("{id}-svg")),
			("class", attr(svg_class(state))),
			("width", num(state.width)),
			("height", num(state.height)),
			("font-family", attr(FONT_STACK)),
		],
	);
	draw_defs(&mut w, state);
	w.empty(
		"rect",
		&[
			("class", attr("diagram-background")),
			("width", num(state.width)),
			("height", num(state.height)),
			("fill", attr(BACKGROUND)),
		],
	);

	w.open(
		"g",
		&[
			("id", root_id(id)),
			("class", attr("viewport")),
			("transform", state.transform.to_svg()),
		],
	);
	let layer = |w: &mut SvgWriter, class: &str| {
		w.open(
			"g",
			&[
				("class", attr(class)),
				("transform", format!("translate(0, {})", num(CONTENT_OFFSET_Y))),
			],
		);
	};

	layer(&mut w, "boxes-layer");
	for node_box in &state.layout.boxes {
		draw_box(&mut w, id, node_box);
	}
	w.close("g");

	layer(&mut w, "nodes-layer");
	for group in &state.layout.groups {
		draw_group(&mut w, id, group);
	}
	w.close("g");

	layer(&mut w, "connections-layer");
	for (conn, curve) in state.connection_paths() {
		let hidden = conn.kind == ConnectionKind::Monitoring && !state.show_monitoring;
		draw_connection(&mut w, id, conn.kind, &curve, hidden, conn.from, conn.to);
	}
	let flows = state.flow_paths();
	for path in &flows {
		draw_flow(&mut w, id, path);
	}
	for (anchor, at) in flow_anchors(&flows, &state.layout) {
		draw_anchor(&mut w, anchor, at);
	}
	w.close("g");
	w.close("g");

	w.text_element(
		"text",
		&[
			("class", attr("diagram-title")),
			("x", num(state.width / 2.0)),
			("y", attr("30")),
			("text-anchor", attr("middle")),
			("font-size", attr("18px")),
			("font-weight", attr("bold")),
			("fill", attr(TEXT_COLOR)),
		],
		TITLE,
	);
	draw_legends(&mut w, state.height);
	w.close("svg");
	w.finish()
}

fn draw_defs(w: &mut SvgWriter, state: &NodeDiagramState) {
	let id = state.id.as_str();
	w.open("defs", &[]);

	let markers = [
		ConnectionKind::Normal,
		ConnectionKind::Data,
		ConnectionKind::Monitoring,
	]
	.map(|k| (format!("{id}-{}", k.marker()), k.color()));
	let flow_markers = FlowKind::ALL.map(|f| (format!("{id}-{}-arrow", f.slug()), f.color()));
	for (marker_id, color) in markers.iter().chain(flow_markers.iter()) {
		w.open(
			"marker",
			&[
				("id", marker_id.clone()),
				("markerWidth", attr("10")),
				("markerHeight", attr("7")),
				("refX", attr("9")),
				("refY", attr("3.5")),
				("orient", attr("auto")),
			],
		);
		w.empty("polygon", &[("points", attr("0 0, 10 3.5, 0 7")), ("fill", attr(*color))]);
		w.close("marker");
	}

	for tier in NodeTier::ALL {
		w.open(
			"radialGradient",
			&[
				("id", format!("{id}-{}-gradient", tier.slug())),
				("cx", attr("0.5")),
				("cy", attr("0.5")),
				("r", attr("0.5")),
				("fx", attr("0.3")),
				("fy", attr("0.3")),
			],
		);
		w.empty(
			"stop",
			&[("offset", attr("0%")), ("stop-color", lighten(tier.color(), 20))],
		);
		w.empty(
			"stop",
			&[("offset", attr("100%")), ("stop-color", darken(tier.color(), 10))],
		);
		w.close("radialGradient");
	}

	w.open(
		"filter",
		&[
			("id", format!("{id}-node-shadow")),
			("x", attr("-50%")),
			("y", attr("-50%")),
			("width", attr("200%")),
			("height", attr("200%")),
		],
	);
	w.empty(
		"feDropShadow",
		&[
			("dx", attr("0")),
			("dy", attr("1")),
			("stdDeviation", attr("2")),
			("flood-opacity", attr("0.3")),
			("flood-color", attr("rgba(0,0,0,0.5)")),
		],
	);
	w.close("filter");

	// Banner clip: rounded top corners only.
	for node_box in &state.layout.boxes {
		let r = node_box.rect;
		w.open("clipPath", &[("id", banner_clip_id(id, node_box.tier))]);
		w.empty(
			"rect",
			&[
				("x", num(r.x)),
				("y", num(r.y)),
				("width", num(r.width)),
				("height", num(BANNER_HEIGHT + 10.0)),
				("rx", num(BOX_RADIUS)),
				("ry", num(BOX_RADIUS)),
			],
		);
		w.close("clipPath");
	}
	w.close("defs");
}

fn banner_clip_id(id: &str, tier: NodeTier) -> String {
	format!("{id}-{}-banner-clip", tier.slug())
}

fn draw_box(w: &mut SvgWriter, id: &str, node_box: &NodeBox) {
	let (r, tier) = (node_box.rect, node_box.tier);
	let clip = format!("url(#{})", banner_clip_id(id, tier));
	w.open(
		"g",
		&[
			("class", format!("node-box {}-box", tier.slug())),
			("data-tier", attr(tier.slug())),
		],
	);
	let mut frame = vec![
		("x", num(r.x)),
		("y", num(r.y)),
		("width", num(r.width)),
		("height", num(r.height)),
		("rx", num(BOX_RADIUS)),
		("ry", num(BOX_RADIUS)),
		("fill", attr("white")),
		("stroke", attr(BOX_BORDER)),
		("stroke-width", attr("1.5")),
	];
	if tier == NodeTier::Helper {
		frame.push(("stroke-dasharray", attr("5,3")));
	}
	w.empty("rect", &frame);
	w.empty(
		"rect",
		&[
			("class", attr("box-banner")),
			("x", num(r.x)),
			("y", num(r.y)),
			("width", num(r.width)),
			("height", num(BANNER_HEIGHT)),
			("rx", num(BOX_RADIUS)),
			("ry", num(BOX_RADIUS)),
			("fill", attr(tier.color())),
			("clip-path", clip.clone()),
		],
	);
	w.empty(
		"rect",
		&[
			("x", num(r.x)),
			("y", num(r.y + BANNER_HEIGHT - 1.0)),
			("width", num(r.width)),
			("height", attr("5")),
			("fill", attr("rgba(0,0,0,0.06)")),
			("clip-path", clip),
		],
	);
	w.text_element(
		"text",
		&[
			("class", attr("box-title")),
			("x", num(r.center().x)),
			("y", num(r.y + 18.0)),
			("text-anchor", attr("middle")),
			("font-size", attr("14px")),
			("font-weight", attr("600")),
			("fill", attr("#ffffff")),
		],
		tier.title(),
	);
	w.text_element(
		"text",
		&[
			("class", attr("box-subtitle")),
			("x", num(r.center().x)),
			("y", num(r.y + BANNER_HEIGHT + 16.0)),
			("text-anchor", attr("middle")),
			("font-size", attr("12px")),
			("fill", attr(MUTED_TEXT)),
		],
		tier.subtitle(),
	);
	w.close("g");
}

fn draw_group(w: &mut SvgWriter, id: &str, group: &NodeGroup) {
	let tier = group.tier;
	let color = tier.color();
	w.open(
		"g",
		&[
			("class", format!("node {}-node", tier.slug())),
			("data-tier", attr(tier.slug())),
			(
				"transform",
				format!("translate({}, {})", num(group.center.x), num(group.center.y)),
			),
		],
	);

	for (i, offset) in group.circles.iter().enumerate() {
		w.open(
			"g",
			&[
				("class", attr("node-circle")),
				("transform", format!("translate({}, {})", num(offset.x), num(offset.y))),
			],
		);
		w.open(
			"circle",
			&[
				("r", num(NODE_RADIUS)),
				("fill", format!("url(#{id}-{}-gradient)", tier.slug())),
				("stroke", attr("#fff")),
				("stroke-width", attr("2")),
				("filter", format!("url(#{id}-node-shadow)")),
			],
		);
		w.empty(
			"animate",
			&[
				("attributeName", attr("opacity")),
				("values", attr("1;0.8;1")),
				("dur", attr("2s")),
				("repeatCount", attr("indefinite")),
				("begin", format!("{}s", num(i as f64 * 0.3))),
			],
		);
		w.close("circle");
		w.empty(
			"circle",
			&[("r", num(NODE_RADIUS - 4.0)), ("fill", attr("rgba(255,255,255,0.2)"))],
		);
		w.text_element(
			"text",
			&[
				("y", attr("5")),
				("text-anchor", attr("middle")),
				("font-size", attr(if tier == NodeTier::Ml { "10px" } else { "12px" })),
				("font-weight", attr("bold")),
				("fill", attr("#ffffff")),
			],
			tier.icon(),
		);
		w.close("g");
	}

	if let Some(extra) = group.overflow {
		let width = extra.to_string().len() as f64 * 10.0 + 20.0;
		let y = NODE_RADIUS * 2.2;
		w.empty(
			"rect",
			&[
				("class", attr("overflow-badge")),
				("x", num(-width / 2.0)),
				("y", num(y)),
				("width", num(width)),
				("height", attr("20")),
				("rx", attr("10")),
				("fill", attr(color)),
				("opacity", attr("0.9")),
			],
		);
		w.text_element(
			"text",
			&[
				("class", attr("overflow-label")),
				("y", num(y + 14.0)),
				("text-anchor", attr("middle")),
				("font-size", attr("12px")),
				("font-weight", attr("bold")),
				("fill", attr("#ffffff")),
			],
			&format!("+{extra} more"),
		);
	}

	w.open(
		"g",
		&[
			("class", attr("instance-badge")),
			("transform", format!("translate(0, {})", num(NODE_RADIUS * 3.0))),
		],
	);
	w.empty(
		"rect",
		&[
			("x", num(-INSTANCE_BADGE_WIDTH / 2.0)),
			("y", attr("0")),
			("width", num(INSTANCE_BADGE_WIDTH)),
			("height", num(INSTANCE_BADGE_HEIGHT)),
			("rx", attr("5")),
			("fill", attr("white")),
			("stroke", attr(BOX_BORDER)),
			("stroke-width", attr("1")),
		],
	);
	w.text_element(
		"text",
		&[
			("class", attr("instance-type")),
			("y", attr("16")),
			("text-anchor", attr("middle")),
			("font-size", attr("12px")),
			("font-weight", attr("bold")),
			("fill", attr(TEXT_COLOR)),
		],
		&group.instance_type,
	);
	w.text_element(
		"text",
		&[
			("class", attr("instance-sizing")),
			("y", attr("32")),
			("text-anchor", attr("middle")),
			("font-size", attr("10px")),
			("fill", attr(MUTED_TEXT)),
		],
		&format!("{} | {}", group.sizing.cpu, group.sizing.memory),
	);
	w.close("g");

	let area = group.hover_area().translated(-group.center.x, -group.center.y);
	w.empty(
		"rect",
		&[
			("class", attr("hover-area")),
			("x", num(area.x)),
			("y", num(area.y)),
			("width", num(area.width)),
			("height", num(area.height)),
			("fill", attr("transparent")),
			("style", attr("cursor: move")),
		],
	);
	w.close("g");
}

fn traffic_dot(w: &mut SvgWriter, class: &str, color: &str, duration: &str, path_data: &str) {
	w.open(
		"circle",
		&[("class", attr(class)), ("r", attr("3")), ("fill", attr(color))],
	);
	w.empty(
		"animateMotion",
		&[
			("dur", attr(duration)),
			("repeatCount", attr("indefinite")),
			("path", attr(path_data)),
		],
	);
	w.close("circle");
}

fn draw_connection(
	w: &mut SvgWriter,
	id: &str,
	kind: ConnectionKind,
	curve: &CubicCurve,
	hidden: bool,
	from: NodeTier,
	to: NodeTier,
) {
	let d = curve.to_path_data();
	let mut attrs = vec![
		("class", format!("connection {}-connection", kind.slug())),
		("data-from", attr(from.slug())),
		("data-to", attr(to.slug())),
		("d", d.clone()),
		("fill", attr("none")),
		("stroke", attr(kind.color())),
		("stroke-width", attr(kind.stroke_width())),
		("stroke-dasharray", attr(kind.dash())),
		("marker-end", format!("url(#{id}-{})", kind.marker())),
	];
	if hidden {
		attrs.push(("display", attr("none")));
	}
	w.empty("path", &attrs);
	if hidden {
		return;
	}
	if let Some(duration) = kind.dot_duration() {
		traffic_dot(w, &format!("traffic-dot {}-dot", kind.slug()), kind.color(), duration, &d);
	}
}

fn draw_flow(w: &mut SvgWriter, id: &str, path: &FlowPath) {
	let kind = path.kind;
	let d = path.curve.to_path_data();
	w.empty(
		"path",
		&[
			("class", format!("{}-flow", kind.slug())),
			("d", d.clone()),
			("fill", attr("none")),
			("stroke", attr(kind.color())),
			("stroke-width", attr("2")),
			("marker-end", format!("url(#{id}-{}-arrow)", kind.slug())),
		],
	);
	traffic_dot(
		w,
		&format!("traffic-dot {}-flow", kind.slug()),
		kind.color(),
		"2s",
		&d,
	);
}

fn draw_anchor(w: &mut SvgWriter, anchor: FlowAnchor, at: Point) {
	let (color, glyph) = match anchor {
		FlowAnchor::DataSources => (FlowKind::Ingestion.color(), "M-10,-5 H10 M-10,0 H10 M-10,5 H10"),
		FlowAnchor::SearchClients => (FlowKind::Search.color(), "M-6,-6 A6,6 0 1 1 -5.9,-6 M2,2 L9,9"),
		FlowAnchor::LongTermStorage => (FlowKind::Archiving.color(), "M-12,-6 H12 M-12,2 H12 M-6,9 H6"),
	};
	w.open(
		"g",
		&[
			("class", format!("flow-anchor {}", anchor.slug())),
			("transform", format!("translate({}, {})", num(at.x), num(at.y))),
		],
	);
	w.empty(
		"rect",
		&[
			("x", attr("-20")),
			("y", attr("-15")),
			("width", attr("40")),
			("height", attr("30")),
			("rx", attr("5")),
			("fill", attr(color)),
		],
	);
	w.empty(
		"path",
		&[
			("d", attr(glyph)),
			("stroke", attr("white")),
			("stroke-width", attr("2")),
			("fill", attr("none")),
		],
	);
	w.text_element(
		"text",
		&[
			("y", attr("30")),
			("text-anchor", attr("middle")),
			("font-size", attr("10px")),
			("fill", attr(TEXT_COLOR)),
		],
		anchor.label(),
	);
	w.close("g");
}

fn draw_legends(w: &mut SvgWriter, height: f64) {
	w.open(
		"g",
		&[
			("class", attr("connection-legend")),
			("transform", format!("translate(20, {})", num(height - 70.0))),
		],
	);
	let kinds = [
		ConnectionKind::Normal,
		ConnectionKind::Data,
		ConnectionKind::Monitoring,
	];
	for (i, kind) in kinds.into_iter().enumerate() {
		let x = i as f64 * 150.0;
		w.empty(
			"line",
			&[
				("x1", num(x)),
				("y1", attr("8")),
				("x2", num(x + 30.0)),
				("y2", attr("8")),
				("stroke", attr(kind.color())),
				("stroke-width", attr("2")),
				("stroke-dasharray", attr(kind.dash())),
			],
		);
		w.text_element(
			"text",
			&[
				("x", num(x + 35.0)),
				("y", attr("12")),
				("fill", attr(TEXT_COLOR)),
				("font-size", attr("12px")),
			],
			kind.legend(),
		);
	}
	w.close("g");

	w.open(
		"g",
		&[
			("class", attr("node-legend")),
			("transform", format!("translate(20, {})", num(height - 40.0))),
		],
	);
	for (i, tier) in NodeTier::ALL.into_iter().enumerate() {
		let x = i as f64 * 150.0;
		w.empty(
			"circle",
			&[
				("cx", num(x + 8.0)),
				("cy", attr("8")),
				("r", attr("8")),
				("fill", attr(tier.color())),
			],
		);
		w.text_element(
			"text",
			&[
				("x", num(x + 20.0)),
				("y", attr("12")),
				("fill", attr(TEXT_COLOR)),
				("font-size", attr("12px")),
			],
			tier.title(),
		);
	}
	w.close("g");
}

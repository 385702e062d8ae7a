use crate::svg::{SvgWriter, attr, num};

use super::types::{ElementKind, NetworkElement, NetworkLayout};

const CONNECTION_COLOR: &str = "#6c757d";
const TEXT_COLOR: &str = "#333333";

/// Render the network diagram as a standalone `<svg>` document. `id` prefixes
/// every element id so several diagrams can share a page.
pub fn render(layout: &NetworkLayout, id: &str) -> String {
	let marker = format!("{id}-arrowhead");
	let mut w = SvgWriter::new();
	w.open(
		"svg",
		&[
			("xmlns", attr("http://www.w3.org/2000/svg")),
			("width", num(layout.width)),
			("height", num(layout.height)),
			("viewBox", format!("0 0 {} {}", num(layout.width), num(layout.height))),
			("class", attr("network-diagram")),
		],
	);

	w.open("defs", &[]);
	w.open(
		"marker",
		&[
			("id", marker.clone()),
			("markerWidth", attr("6")),
			("markerHeight", attr("4")),
			("refX", attr("6")),
			("refY", attr("2")),
			("orient", attr("auto")),
		],
	);
	w.empty(
		"polygon",
		&[("points", attr("0 0, 6 2, 0 4")), ("fill", attr(CONNECTION_COLOR))],
	);
	w.close("marker");
	w.close("defs");

	w.open("g", &[("class", attr("diagram-main"))]);
	for element in &layout.elements {
		draw_element(&mut w, element);
	}
	for conn in &layout.connections {
		w.empty(
			"path",
			&[
				("d", conn.curve.to_path_data()),
				("class", attr(conn.name)),
				("fill", attr("none")),
				("stroke", attr(CONNECTION_COLOR)),
				("stroke-width", attr("1")),
				("marker-end", format!("url(#{marker})")),
			],
		);
	}
	w.close("g");

	draw_legend(&mut w, layout.height, &marker);
	w.close("svg");
	w.finish()
}

fn slug(label: &str) -> String {
	label.to_lowercase().split_whitespace().collect::<Vec<_>>().join("-")
}

fn draw_element(w: &mut SvgWriter, e: &NetworkElement) {
	let r = e.rect;
	w.open("g", &[("class", format!("diagram-node {}", slug(e.label)))]);
	w.empty(
		"rect",
		&[
			("x", num(r.x)),
			("y", num(r.y)),
			("width", num(r.width)),
			("height", num(r.height)),
			("rx", num(e.radius)),
			("fill", attr(e.kind.fill())),
			("stroke", attr(e.kind.stroke())),
			("stroke-width", attr("2")),
		],
	);
	w.text_element(
		"text",
		&[
			("x", num(r.center().x)),
			("y", num(r.y + 16.0)),
			("text-anchor", attr("middle")),
			("fill", attr(TEXT_COLOR)),
			("font-size", attr("12px")),
			("font-weight", attr("bold")),
		],
		e.label,
	);
	if let Some(caption) = &e.caption {
		w.text_element(
			"text",
			&[
				("x", num(r.center().x)),
				("y", num(r.y + caption.dy)),
				("class", format!("{}-caption", slug(e.label))),
				("text-anchor", attr("middle")),
				("fill", attr(TEXT_COLOR)),
				("font-size", attr("11px")),
				("font-weight", attr("normal")),
			],
			&caption.text,
		);
	}
	w.close("g");
}

fn draw_legend(w: &mut SvgWriter, height: f64, marker: &str) {
	let entries = [
		(ElementKind::Vpc, "VPC"),
		(ElementKind::PublicSubnet, "Public Subnet"),
		(ElementKind::PrivateSubnet, "Private Subnet"),
		(ElementKind::Node, "Node"),
	];
	w.open(
		"g",
		&[
			("class", attr("diagram-legend")),
			("transform", format!("translate(20, {})", num(height - 80.0))),
		],
	);
	for (i, (kind, text)) in entries.iter().enumerate() {
		let x = i as f64 * 150.0;
		w.empty(
			"rect",
			&[
				("x", num(x)),
				("y", attr("0")),
				("width", attr("15")),
				("height", attr("15")),
				("fill", attr(kind.fill())),
				("stroke", attr(kind.stroke())),
				("stroke-width", attr("1")),
			],
		);
		w.text_element(
			"text",
			&[
				("x", num(x + 20.0)),
				("y", attr("12")),
				("fill", attr(TEXT_COLOR)),
				("font-size", attr("10px")),
			],
			text,
		);
	}
	let line_x = entries.len() as f64 * 150.0;
	w.empty(
		"line",
		&[
			("x1", num(line_x)),
			("y1", attr("7")),
			("x2", num(line_x + 30.0)),
			("y2", attr("7")),
			("stroke", attr(CONNECTION_COLOR)),
			("stroke-width", attr("1.5")),
			("marker-end", format!("url(#{marker})")),
		],
	);
	w.text_element(
		"text",
		&[
			("x", num(line_x + 40.0)),
			("y", attr("12")),
			("fill", attr(TEXT_COLOR)),
			("font-size", attr("10px")),
		],
		"Connection",
	);
	w.close("g");
}

use std::collections::{BTreeSet, HashSet};

use cluster_diagrams::components::network_diagram::{layout, render as network_render};
use cluster_diagrams::components::node_diagram::render::render;
use cluster_diagrams::components::node_diagram::state::NodeDiagramState;
use cluster_diagrams::components::node_diagram::FlowKind;
use cluster_diagrams::settings::{ClusterSettings, NetworkSettings};
use roxmltree::{Document, Node};

fn has_class(node: &Node, class: &str) -> bool {
	node.attribute("class")
		.is_some_and(|c| c.split_whitespace().any(|part| part == class))
}

fn count_class(doc: &Document, class: &str) -> usize {
	doc.descendants().filter(|n| has_class(n, class)).count()
}

fn text_of<'a>(doc: &'a Document, class: &str) -> Vec<&'a str> {
	doc.descendants()
		.filter(|n| has_class(n, class))
		.filter_map(|n| n.text())
		.collect()
}

fn cluster_svg(settings: ClusterSettings, setup: impl FnOnce(&mut NodeDiagramState)) -> String {
	let mut state = NodeDiagramState::new("cluster-main", settings, 1000.0, 700.0);
	setup(&mut state);
	render(&state)
}

#[test]
fn network_diagram_is_well_formed() {
	let svg = network_render::render(&layout::layout(&NetworkSettings::default()), "net");
	let doc = Document::parse(&svg).unwrap();
	let root = doc.root_element();
	assert_eq!(root.tag_name().name(), "svg");
	assert_eq!(root.attribute("width"), Some("900"));

	let arrows = doc
		.descendants()
		.filter(|n| n.attribute("marker-end") == Some("url(#net-arrowhead)"))
		.count();
	// Seven connectors plus the legend sample.
	assert_eq!(arrows, 8);
	assert_eq!(text_of(&doc, "vpc-caption"), vec!["CIDR: 10.0.0.0/16"]);
}

#[test]
fn network_captions_follow_the_form() {
	let settings = NetworkSettings {
		private_subnet_cidr: "172.16.9.0/24".into(),
		..Default::default()
	};
	let svg = network_render::render(&layout::layout(&settings), "net");
	let doc = Document::parse(&svg).unwrap();
	assert_eq!(
		text_of(&doc, "private-subnet-caption"),
		vec!["CIDR: 172.16.9.0/24"]
	);
	assert_eq!(
		text_of(&doc, "public-subnet-1-caption"),
		vec!["CIDR: 10.0.1.0/24"]
	);
}

#[test]
fn cluster_diagram_draws_every_tier() {
	let svg = cluster_svg(ClusterSettings::default(), |_| {});
	let doc = Document::parse(&svg).unwrap();
	assert_eq!(count_class(&doc, "node-box"), 5);
	assert_eq!(count_class(&doc, "node"), 5);
	// 1 console + 3 master + 5 of 7 hot + 2 ml + 3 frozen
	assert_eq!(count_class(&doc, "node-circle"), 14);
	assert_eq!(text_of(&doc, "overflow-label"), vec!["+2 more"]);
	assert_eq!(count_class(&doc, "connection"), 9);
	assert_eq!(
		text_of(&doc, "diagram-title"),
		vec!["Elasticsearch Cluster Architecture"]
	);
}

#[test]
fn content_layers_sit_below_the_title() {
	let svg = cluster_svg(ClusterSettings::default(), |_| {});
	let doc = Document::parse(&svg).unwrap();
	for layer in ["boxes-layer", "nodes-layer", "connections-layer"] {
		let node = doc.descendants().find(|n| has_class(n, layer)).unwrap();
		assert_eq!(node.attribute("transform"), Some("translate(0, 60)"));
		assert_eq!(node.parent_element().and_then(|p| p.attribute("id")), Some("cluster-main-root"));
	}
}

#[test]
fn ids_are_unique_and_scoped() {
	let svg = cluster_svg(ClusterSettings::default(), |s| {
		s.show_monitoring = true;
		s.flows = FlowKind::ALL.into_iter().collect();
	});
	let doc = Document::parse(&svg).unwrap();
	let ids: Vec<&str> = doc.descendants().filter_map(|n| n.attribute("id")).collect();
	let unique: HashSet<&str> = ids.iter().copied().collect();
	assert_eq!(ids.len(), unique.len());
	assert!(ids.iter().all(|id| id.starts_with("cluster-main-")), "{ids:?}");
}

#[test]
fn empty_tiers_leave_no_trace() {
	let settings = ClusterSettings {
		ml_count: 0,
		frozen_count: 0,
		..Default::default()
	};
	let svg = cluster_svg(settings, |s| {
		s.flows = BTreeSet::from([FlowKind::Archiving, FlowKind::Search]);
	});
	let doc = Document::parse(&svg).unwrap();
	assert_eq!(count_class(&doc, "frozen-box"), 0);
	assert_eq!(count_class(&doc, "ml-node"), 0);
	assert_eq!(count_class(&doc, "connection"), 5);
	assert_eq!(count_class(&doc, "archiving-flow"), 0);
	assert!(count_class(&doc, "search-flow") > 0);
	assert_eq!(count_class(&doc, "long-term-storage"), 0);
}

#[test]
fn flows_bring_their_anchor_icons() {
	let svg = cluster_svg(ClusterSettings::default(), |s| {
		s.flows = BTreeSet::from([FlowKind::Ingestion]);
	});
	let doc = Document::parse(&svg).unwrap();
	let anchor = doc
		.descendants()
		.find(|n| has_class(n, "data-sources"))
		.unwrap();
	assert_eq!(anchor.attribute("transform"), Some("translate(80, 50)"));
	// path + dot per segment
	assert_eq!(count_class(&doc, "ingestion-flow"), 4);
	let arrow = doc
		.descendants()
		.filter(|n| n.tag_name().name() == "path" && has_class(n, "ingestion-flow"))
		.all(|n| n.attribute("marker-end") == Some("url(#cluster-main-ingestion-arrow)"));
	assert!(arrow);
}

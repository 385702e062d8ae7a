//! Animated data-flow overlays: which segments each flow draws and where
//! its anchor icons sit.

use std::collections::BTreeSet;

use crate::geometry::{CubicCurve, Point};

use super::layout::ClusterLayout;
use super::types::{FlowKind, NodeTier};

/// Off-cluster endpoint drawn as an icon.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowAnchor {
	DataSources,
	SearchClients,
	LongTermStorage,
}

impl FlowAnchor {
	pub fn slug(self) -> &'static str {
		match self {
			FlowAnchor::DataSources => "data-sources",
			FlowAnchor::SearchClients => "search-clients",
			FlowAnchor::LongTermStorage => "long-term-storage",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			FlowAnchor::DataSources => "Data Sources",
			FlowAnchor::SearchClients => "Search Clients",
			FlowAnchor::LongTermStorage => "Long-term Storage",
		}
	}

	/// Position in layer coordinates. Storage hangs off the frozen tier and
	/// has no position without it.
	pub fn position(self, layout: &ClusterLayout) -> Option<Point> {
		match self {
			FlowAnchor::DataSources => Some(Point::new(80.0, 50.0)),
			FlowAnchor::SearchClients => Some(Point::new(80.0, 120.0)),
			FlowAnchor::LongTermStorage => layout
				.node_box(NodeTier::Frozen)
				.map(|b| Point::new(layout.width - 80.0, b.rect.center().y + 80.0)),
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlowEndpoint {
	Tier(NodeTier),
	Anchor(FlowAnchor),
}

/// One routed segment of a flow.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowPath {
	pub kind: FlowKind,
	pub from: FlowEndpoint,
	pub to: FlowEndpoint,
	pub curve: CubicCurve,
}

fn segments(kind: FlowKind) -> &'static [(FlowEndpoint, FlowEndpoint)] {
	use FlowAnchor::*;
	use FlowEndpoint::{Anchor, Tier};
	use NodeTier::*;

	match kind {
		FlowKind::Ingestion => &[
			(Anchor(DataSources), Tier(Helper)),
			(Tier(Helper), Tier(Hot)),
		],
		FlowKind::Search => &[
			(Anchor(SearchClients), Tier(Helper)),
			(Tier(Helper), Tier(Master)),
			(Tier(Master), Tier(Hot)),
			(Tier(Master), Tier(Frozen)),
		],
		FlowKind::Archiving => &[
			(Tier(Hot), Tier(Frozen)),
			(Tier(Frozen), Anchor(LongTermStorage)),
		],
	}
}

fn route(layout: &ClusterLayout, from: FlowEndpoint, to: FlowEndpoint) -> Option<CubicCurve> {
	let center = |e: FlowEndpoint| match e {
		FlowEndpoint::Tier(t) => layout.node_box(t).map(|b| b.rect.center()),
		FlowEndpoint::Anchor(a) => a.position(layout),
	};
	match (from, to) {
		(FlowEndpoint::Tier(a), FlowEndpoint::Tier(b)) => {
			let (a, b) = (layout.node_box(a)?, layout.node_box(b)?);
			Some(CubicCurve::between(&a.rect, &b.rect))
		}
		_ => Some(CubicCurve::connector(center(from)?, center(to)?)),
	}
}

/// Every segment of the active flows, in `FlowKind` order. Archiving needs
/// both hot and frozen tiers; other segments with a missing tier are skipped.
pub fn flow_paths(layout: &ClusterLayout, active: &BTreeSet<FlowKind>) -> Vec<FlowPath> {
	active
		.iter()
		.filter(|&&kind| {
			kind != FlowKind::Archiving || (layout.has(NodeTier::Hot) && layout.has(NodeTier::Frozen))
		})
		.flat_map(|&kind| {
			segments(kind).iter().filter_map(move |&(from, to)| {
				route(layout, from, to).map(|curve| FlowPath {
					kind,
					from,
					to,
					curve,
				})
			})
		})
		.collect()
}

/// Anchor icons the active flows actually reach.
pub fn flow_anchors(paths: &[FlowPath], layout: &ClusterLayout) -> Vec<(FlowAnchor, Point)> {
	let mut anchors: Vec<(FlowAnchor, Point)> = Vec::new();
	for path in paths {
		for end in [path.from, path.to] {
			if let FlowEndpoint::Anchor(a) = end {
				if anchors.iter().any(|(seen, _)| *seen == a) {
					continue;
				}
				if let Some(p) = a.position(layout) {
					anchors.push((a, p));
				}
			}
		}
	}
	anchors
}

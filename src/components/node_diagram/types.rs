/// One node role in the cluster. Each tier owns exactly one box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTier {
	Helper,
	Master,
	Hot,
	Ml,
	Frozen,
}

impl NodeTier {
	pub const ALL: [NodeTier; 5] = [
		NodeTier::Helper,
		NodeTier::Master,
		NodeTier::Hot,
		NodeTier::Ml,
		NodeTier::Frozen,
	];

	/// Lower-case name used in class names and element ids.
	pub fn slug(self) -> &'static str {
		match self {
			NodeTier::Helper => "helper",
			NodeTier::Master => "master",
			NodeTier::Hot => "hot",
			NodeTier::Ml => "ml",
			NodeTier::Frozen => "frozen",
		}
	}

	pub fn title(self) -> &'static str {
		match self {
			NodeTier::Helper => "Console Node",
			NodeTier::Master => "Master Nodes",
			NodeTier::Hot => "Hot Nodes",
			NodeTier::Ml => "ML Nodes",
			NodeTier::Frozen => "Frozen Nodes",
		}
	}

	/// Subtitle printed under the box banner.
	pub fn subtitle(self) -> &'static str {
		match self {
			NodeTier::Helper => "Management, Kibana, Monitoring",
			NodeTier::Master => "Coordination & Cluster State",
			NodeTier::Hot => "Active & Recent Data",
			NodeTier::Ml => "Machine Learning & Analytics",
			NodeTier::Frozen => "Historical Data Archive",
		}
	}

	/// Longer description shown in the tooltip.
	pub fn role(self) -> &'static str {
		match self {
			NodeTier::Helper => "Manages cluster, runs Kibana, monitoring, and collects metrics",
			NodeTier::Master => "Coordinates cluster operations and maintains state",
			NodeTier::Hot => "Stores and processes recent, frequently-accessed data",
			NodeTier::Ml => "Handles machine learning jobs and analytics",
			NodeTier::Frozen => "Stores historical data optimized for less frequent access",
		}
	}

	/// Letter drawn inside each node circle.
	pub fn icon(self) -> &'static str {
		match self {
			NodeTier::Helper => "",
			NodeTier::Master => "M",
			NodeTier::Hot => "H",
			NodeTier::Ml => "ML",
			NodeTier::Frozen => "F",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			NodeTier::Helper => "#6200ea",
			NodeTier::Master => "#2962ff",
			NodeTier::Hot => "#e53935",
			NodeTier::Ml => "#00acc1",
			NodeTier::Frozen => "#43a047",
		}
	}
}

/// Traffic class of a connector between two tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConnectionKind {
	Normal,
	Data,
	Monitoring,
}

impl ConnectionKind {
	pub fn slug(self) -> &'static str {
		match self {
			ConnectionKind::Normal => "normal",
			ConnectionKind::Data => "data",
			ConnectionKind::Monitoring => "monitoring",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			ConnectionKind::Normal => "#9e9e9e",
			ConnectionKind::Data => "#2979ff",
			ConnectionKind::Monitoring => "#ff6d00",
		}
	}

	/// Marker id suffix; the full id is prefixed per diagram.
	pub fn marker(self) -> &'static str {
		match self {
			ConnectionKind::Normal => "cluster-arrow",
			ConnectionKind::Data => "data-arrow",
			ConnectionKind::Monitoring => "monitoring-arrow",
		}
	}

	pub fn dash(self) -> &'static str {
		match self {
			ConnectionKind::Monitoring => "5,3",
			_ => "none",
		}
	}

	pub fn stroke_width(self) -> &'static str {
		match self {
			ConnectionKind::Data => "2",
			_ => "1.5",
		}
	}

	/// Traffic dot animation period, if this kind carries one.
	pub fn dot_duration(self) -> Option<&'static str> {
		match self {
			ConnectionKind::Normal => None,
			ConnectionKind::Data => Some("3s"),
			ConnectionKind::Monitoring => Some("4s"),
		}
	}

	pub fn legend(self) -> &'static str {
		match self {
			ConnectionKind::Normal => "Cluster Traffic",
			ConnectionKind::Data => "Data Flow",
			ConnectionKind::Monitoring => "Monitoring Traffic",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Connection {
	pub from: NodeTier,
	pub to: NodeTier,
	pub kind: ConnectionKind,
}

/// Overlay category of animated traffic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlowKind {
	Ingestion,
	Search,
	Archiving,
}

impl FlowKind {
	pub const ALL: [FlowKind; 3] = [FlowKind::Ingestion, FlowKind::Search, FlowKind::Archiving];

	pub fn slug(self) -> &'static str {
		match self {
			FlowKind::Ingestion => "ingestion",
			FlowKind::Search => "search",
			FlowKind::Archiving => "archiving",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			FlowKind::Ingestion => "Data Ingestion",
			FlowKind::Search => "Search Queries",
			FlowKind::Archiving => "Data Archiving",
		}
	}

	pub fn color(self) -> &'static str {
		match self {
			FlowKind::Ingestion => "#2979ff",
			FlowKind::Search => "#00c853",
			FlowKind::Archiving => "#ff6d00",
		}
	}
}

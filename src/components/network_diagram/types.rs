use crate::geometry::{CubicCurve, Rect};

/// Fill/stroke family an element is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
	Internet,
	Vpc,
	PublicSubnet,
	PrivateSubnet,
	Node,
}

impl ElementKind {
	pub fn fill(self) -> &'static str {
		match self {
			ElementKind::Internet => "#f8f9fa",
			ElementKind::Vpc => "#e9f0fa",
			ElementKind::PublicSubnet => "#e7f4fc",
			ElementKind::PrivateSubnet => "#e5f9ee",
			ElementKind::Node => "#ffffff",
		}
	}

	pub fn stroke(self) -> &'static str {
		match self {
			ElementKind::Internet => "#6c757d",
			ElementKind::Vpc | ElementKind::PublicSubnet => "#5b99ea",
			ElementKind::PrivateSubnet => "#5eba87",
			ElementKind::Node => "#6c757d",
		}
	}
}

/// Secondary line of text under an element's title.
#[derive(Clone, Debug, PartialEq)]
pub struct Caption {
	pub text: String,
	/// Baseline offset from the element's top edge.
	pub dy: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkElement {
	pub label: &'static str,
	pub kind: ElementKind,
	pub rect: Rect,
	pub radius: f64,
	pub caption: Option<Caption>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NetworkConnection {
	pub name: &'static str,
	pub curve: CubicCurve,
}

/// Fully positioned network diagram.
#[derive(Clone, Debug, PartialEq)]
pub struct NetworkLayout {
	pub width: f64,
	pub height: f64,
	pub elements: Vec<NetworkElement>,
	pub connections: Vec<NetworkConnection>,
}

impl NetworkLayout {
	pub fn element(&self, label: &str) -> Option<&NetworkElement> {
		self.elements.iter().find(|e| e.label == label)
	}

	pub fn connection(&self, name: &str) -> Option<&NetworkConnection> {
		self.connections.iter().find(|c| c.name == name)
	}
}

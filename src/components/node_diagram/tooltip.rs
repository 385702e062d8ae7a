use super::layout::NodeGroup;
use super::types::NodeTier;

const CURSOR_GAP: f64 = 10.0;

/// Content of the hover panel for one tier.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInfo {
	pub tier: NodeTier,
	pub title: &'static str,
	pub color: &'static str,
	pub count: u32,
	pub instance_type: String,
	pub cpu: &'static str,
	pub memory: &'static str,
	pub role: &'static str,
}

impl TooltipInfo {
	pub fn for_group(group: &NodeGroup) -> Self {
		Self {
			tier: group.tier,
			title: group.tier.title(),
			color: group.tier.color(),
			count: group.count,
			instance_type: group.instance_type.clone(),
			cpu: group.sizing.cpu,
			memory: group.sizing.memory,
			role: group.tier.role(),
		}
	}

	/// Label/value rows in display order.
	pub fn rows(&self) -> [(&'static str, String); 4] {
		[
			("Count", self.count.to_string()),
			("Instance", self.instance_type.clone()),
			("CPU", self.cpu.to_string()),
			("Memory", self.memory.to_string()),
		]
	}
}

/// Place a `width x height` tooltip next to the cursor, flipping it back
/// inside the window when it would overflow the right or bottom edge.
pub fn tooltip_position(
	cursor: (f64, f64),
	size: (f64, f64),
	window: (f64, f64),
) -> (f64, f64) {
	let (mut x, mut y) = (cursor.0 + CURSOR_GAP, cursor.1 + CURSOR_GAP);
	if x + size.0 > window.0 {
		x = window.0 - size.0 - CURSOR_GAP;
	}
	if y + size.1 > window.1 {
		y = y - size.1 - CURSOR_GAP;
	}
	(x, y)
}

//! Values the diagrams are drawn from. Every field has the default the form
//! starts out with, so a missing field never blocks a render.

/// Inputs for the VPC network diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSettings {
	pub vpc_cidr: String,
	pub public_subnet1_cidr: String,
	pub public_subnet2_cidr: String,
	pub private_subnet_cidr: String,
	/// Read alongside the CIDRs; not drawn.
	pub dns_zone_name: String,
}

impl Default for NetworkSettings {
	fn default() -> Self {
		Self {
			vpc_cidr: "10.0.0.0/16".into(),
			public_subnet1_cidr: "10.0.1.0/24".into(),
			public_subnet2_cidr: "10.0.2.0/24".into(),
			private_subnet_cidr: "10.0.3.0/24".into(),
			dns_zone_name: String::new(),
		}
	}
}

/// Master nodes are always deployed as a quorum of three.
pub const MASTER_COUNT: u32 = 3;
pub const HELPER_INSTANCE_TYPE: &str = "t3.medium";

/// Inputs for the cluster node diagram.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClusterSettings {
	pub master_instance_type: String,
	pub hot_count: u32,
	pub hot_instance_type: String,
	pub ml_count: u32,
	pub ml_instance_type: String,
	pub frozen_count: u32,
	pub frozen_instance_type: String,
}

impl Default for ClusterSettings {
	fn default() -> Self {
		Self {
			master_instance_type: "m6i.xlarge".into(),
			hot_count: 7,
			hot_instance_type: "c6i.xlarge".into(),
			ml_count: 2,
			ml_instance_type: "m6i.2xlarge".into(),
			frozen_count: 3,
			frozen_instance_type: "i3.2xlarge".into(),
		}
	}
}

/// Parse a node count the way a lenient integer parse would: surrounding
/// whitespace is ignored and trailing garbage after the digits is dropped.
/// Negative counts become zero. `None` if no digits lead the value.
pub fn parse_count(raw: &str) -> Option<u32> {
	let trimmed = raw.trim();
	let (negative, rest) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};
	let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
	if digits.is_empty() {
		return None;
	}
	if negative {
		return Some(0);
	}
	Some(digits.parse::<u64>().map_or(u32::MAX, |v| v.min(u32::MAX as u64) as u32))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn counts_parse_leniently() {
		assert_eq!(parse_count("7"), Some(7));
		assert_eq!(parse_count(" 12 "), Some(12));
		assert_eq!(parse_count("4 nodes"), Some(4));
		assert_eq!(parse_count("+3"), Some(3));
		assert_eq!(parse_count("-2"), Some(0));
		assert_eq!(parse_count(""), None);
		assert_eq!(parse_count("abc"), None);
		assert_eq!(parse_count("99999999999"), Some(u32::MAX));
	}

	#[test]
	fn defaults_match_the_form() {
		let c = ClusterSettings::default();
		assert_eq!(c.hot_count, 7);
		assert_eq!(c.frozen_instance_type, "i3.2xlarge");
		assert_eq!(NetworkSettings::default().vpc_cidr, "10.0.0.0/16");
	}
}

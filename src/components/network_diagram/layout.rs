use crate::geometry::{CubicCurve, Point, Rect};
use crate::settings::NetworkSettings;

use super::types::{Caption, ElementKind, NetworkConnection, NetworkElement, NetworkLayout};

pub const WIDTH: f64 = 900.0;
pub const HEIGHT: f64 = 600.0;

const MARGIN: f64 = 60.0;
const VPC_Y: f64 = 120.0;
const VPC_HEIGHT: f64 = 350.0;
const SUBNET_GAP: f64 = 35.0;
const SUBNET_HEIGHT: f64 = 180.0;
const CURVE_FACTOR: f64 = 0.05;

pub const INTERNET: &str = "Internet";
pub const VPC: &str = "VPC";
pub const INTERNET_GATEWAY: &str = "Internet Gateway";
pub const PUBLIC_SUBNET_1: &str = "Public Subnet 1";
pub const PUBLIC_SUBNET_2: &str = "Public Subnet 2";
pub const PRIVATE_SUBNET: &str = "Private Subnet";
pub const NAT_GATEWAY: &str = "NAT Gateway";
pub const CONSOLE_NODE: &str = "Console Node";
pub const MASTER_NODES: &str = "Master Nodes";
pub const HOT_NODES: &str = "Hot Nodes";

fn cidr(text: &str) -> Option<Caption> {
	Some(Caption {
		text: format!("CIDR: {text}"),
		dy: 35.0,
	})
}

fn role(text: &str) -> Option<Caption> {
	Some(Caption {
		text: text.to_string(),
		dy: 26.0,
	})
}

fn element(
	label: &'static str,
	kind: ElementKind,
	rect: Rect,
	radius: f64,
	caption: Option<Caption>,
) -> NetworkElement {
	NetworkElement {
		label,
		kind,
		rect,
		radius,
		caption,
	}
}

fn link(name: &'static str, from: Point, to: Point) -> NetworkConnection {
	NetworkConnection {
		name,
		curve: CubicCurve::gentle(from, to, CURVE_FACTOR),
	}
}

/// Position every element of the network diagram. Only the captions depend
/// on the settings; geometry is fixed.
pub fn layout(settings: &NetworkSettings) -> NetworkLayout {
	let vpc_x = MARGIN + 30.0;
	let vpc_w = WIDTH - 2.0 * MARGIN - 60.0;
	let vpc = Rect::new(vpc_x, VPC_Y, vpc_w, VPC_HEIGHT);
	let vpc_cx = vpc.center().x;

	let internet = Rect::new(vpc_cx - 50.0, 40.0, 100.0, 35.0);
	let igw = Rect::new(vpc_cx - 60.0, internet.y + 50.0, 120.0, 35.0);

	let subnet_w = (vpc_w - 4.0 * SUBNET_GAP) / 3.0;
	let public1 = Rect::new(vpc_x + SUBNET_GAP, VPC_Y + 50.0, subnet_w, SUBNET_HEIGHT);
	let public2 = public1.translated(subnet_w + SUBNET_GAP, 0.0);
	let private = public2.translated(subnet_w + SUBNET_GAP, 0.0);

	let nat = Rect::new(public1.x + 30.0, public1.y + 70.0, 100.0, 35.0);
	let helper = Rect::new(public1.x + 30.0, nat.y + 60.0, 100.0, 45.0);
	let master = Rect::new(private.x + 30.0, private.y + 70.0, 110.0, 45.0);
	let hot = Rect::new(private.x + 30.0, master.y + 70.0, 110.0, 45.0);

	let elements = vec![
		element(INTERNET, ElementKind::Internet, internet, 5.0, None),
		element(VPC, ElementKind::Vpc, vpc, 10.0, cidr(&settings.vpc_cidr)),
		element(
			PUBLIC_SUBNET_1,
			ElementKind::PublicSubnet,
			public1,
			5.0,
			cidr(&settings.public_subnet1_cidr),
		),
		element(
			PUBLIC_SUBNET_2,
			ElementKind::PublicSubnet,
			public2,
			5.0,
			cidr(&settings.public_subnet2_cidr),
		),
		element(
			PRIVATE_SUBNET,
			ElementKind::PrivateSubnet,
			private,
			5.0,
			cidr(&settings.private_subnet_cidr),
		),
		// "Internet Gateway" takes the internet palette.
		element(INTERNET_GATEWAY, ElementKind::Internet, igw, 5.0, None),
		element(NAT_GATEWAY, ElementKind::Node, nat, 5.0, None),
		element(CONSOLE_NODE, ElementKind::Node, helper, 5.0, role("Management")),
		element(MASTER_NODES, ElementKind::Node, master, 5.0, role("Coordination")),
		element(HOT_NODES, ElementKind::Node, hot, 5.0, role("Active Data")),
	];

	let igw_drop = igw.bottom_center();
	let connections = vec![
		link("internet-to-igw", internet.bottom_center(), igw.top_center()),
		link("igw-to-vpc", igw_drop, Point::new(igw_drop.x, vpc.y)),
		link("igw-to-public1", igw_drop, public1.top_center()),
		link("igw-to-public2", igw_drop, public2.top_center()),
		link(
			"nat-to-private",
			Point::new(nat.right(), nat.y + 17.0),
			Point::new(private.x, private.y + 85.0),
		),
		link(
			"helper-to-master",
			Point::new(helper.right(), helper.y + 22.0),
			Point::new(master.x, master.y + 22.0),
		),
		link("master-to-hot", master.bottom_center(), hot.top_center()),
	];

	NetworkLayout {
		width: WIDTH,
		height: HEIGHT,
		elements,
		connections,
	}
}

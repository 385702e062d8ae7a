//! Reads diagram settings straight from the host page's form fields.
//!
//! Fields are looked up by id on every call. A missing field, or one whose
//! value cannot be used, falls back to the default for that setting.

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement, HtmlSelectElement};

use crate::settings::{ClusterSettings, NetworkSettings, parse_count};

pub const VPC_CIDR: &str = "vpc_cidr";
pub const PUBLIC_SUBNET1_CIDR: &str = "public_subnet1_cidr";
pub const PUBLIC_SUBNET2_CIDR: &str = "public_subnet2_cidr";
pub const PRIVATE_SUBNET_CIDR: &str = "private_subnet_cidr";
pub const DNS_ZONE_NAME: &str = "dns_zone_name";

pub const INSTANCE_TYPE_MASTER: &str = "instance_type_master";
pub const HOT_NODE_COUNT: &str = "hot_node_count";
pub const INSTANCE_TYPE_HOT: &str = "instance_type_hot";
pub const ML_NODE_COUNT: &str = "ml_node_count";
pub const INSTANCE_TYPE_ML: &str = "instance_type_ml";
pub const FROZEN_NODE_COUNT: &str = "frozen_node_count";
pub const INSTANCE_TYPE_FROZEN: &str = "instance_type_frozen";

fn document() -> Option<Document> {
	web_sys::window().and_then(|w| w.document())
}

/// Raw value of an `<input>` or `<select>`. Selects report the text of the
/// selected option, falling back to its value.
fn field_value(doc: &Document, id: &str) -> Option<String> {
	let Some(el) = doc.get_element_by_id(id) else {
		debug!("form field #{id} not found, using default");
		return None;
	};
	if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
		let text = u32::try_from(select.selected_index())
			.ok()
			.and_then(|idx| select.item(idx))
			.and_then(|opt| opt.text_content())
			.map(|t| t.trim().to_string())
			.filter(|t| !t.is_empty());
		return Some(text.unwrap_or_else(|| select.value()));
	}
	el.dyn_ref::<HtmlInputElement>().map(HtmlInputElement::value)
}

fn text_or(doc: &Document, id: &str, fallback: &str) -> String {
	field_value(doc, id).unwrap_or_else(|| fallback.to_string())
}

fn count_or(doc: &Document, id: &str, fallback: u32) -> u32 {
	field_value(doc, id)
		.and_then(|v| parse_count(&v))
		.unwrap_or(fallback)
}

/// Current network settings from the page.
pub fn read_network_settings() -> NetworkSettings {
	let defaults = NetworkSettings::default();
	let Some(doc) = document() else {
		return defaults;
	};
	NetworkSettings {
		vpc_cidr: text_or(&doc, VPC_CIDR, &defaults.vpc_cidr),
		public_subnet1_cidr: text_or(&doc, PUBLIC_SUBNET1_CIDR, &defaults.public_subnet1_cidr),
		public_subnet2_cidr: text_or(&doc, PUBLIC_SUBNET2_CIDR, &defaults.public_subnet2_cidr),
		private_subnet_cidr: text_or(&doc, PRIVATE_SUBNET_CIDR, &defaults.private_subnet_cidr),
		dns_zone_name: text_or(&doc, DNS_ZONE_NAME, &defaults.dns_zone_name),
	}
}

/// Current cluster settings from the page.
pub fn read_cluster_settings() -> ClusterSettings {
	let defaults = ClusterSettings::default();
	let Some(doc) = document() else {
		return defaults;
	};
	ClusterSettings {
		master_instance_type: text_or(&doc, INSTANCE_TYPE_MASTER, &defaults.master_instance_type),
		hot_count: count_or(&doc, HOT_NODE_COUNT, defaults.hot_count),
		hot_instance_type: text_or(&doc, INSTANCE_TYPE_HOT, &defaults.hot_instance_type),
		ml_count: count_or(&doc, ML_NODE_COUNT, defaults.ml_count),
		ml_instance_type: text_or(&doc, INSTANCE_TYPE_ML, &defaults.ml_instance_type),
		frozen_count: count_or(&doc, FROZEN_NODE_COUNT, defaults.frozen_count),
		frozen_instance_type: text_or(&doc, INSTANCE_TYPE_FROZEN, &defaults.frozen_instance_type),
	}
}

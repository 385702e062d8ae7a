use leptos::ev::Event;
use leptos::prelude::*;

use crate::components::network_diagram::NetworkDiagram;
use crate::components::node_diagram::NodeDiagram;
use crate::form;
use crate::settings::{ClusterSettings, NetworkSettings};

const MASTER_TYPES: &[&str] = &["m6i.xlarge", "m6i.2xlarge", "r6i.xlarge", "r6i.2xlarge"];
const HOT_TYPES: &[&str] = &["c6i.xlarge", "c6i.2xlarge", "i3.xlarge", "i3.2xlarge", "r6i.4xlarge"];
const ML_TYPES: &[&str] = &["m6i.2xlarge", "m6i.4xlarge", "c6i.4xlarge", "r6i.8xlarge"];
const FROZEN_TYPES: &[&str] = &["i3.2xlarge", "i3.4xlarge", "i3.8xlarge", "i3.16xlarge"];

fn text_field(id: &'static str, label: &'static str, value: String) -> impl IntoView {
	view! {
		<label for=id>{label}</label>
		<input type="text" id=id name=id value=value />
	}
}

fn count_field(id: &'static str, label: &'static str, value: u32) -> impl IntoView {
	view! {
		<label for=id>{label}</label>
		<input type="number" id=id name=id min="0" value=value.to_string() />
	}
}

fn instance_select(id: &'static str, label: &'static str, options: &'static [&'static str]) -> impl IntoView {
	view! {
		<label for=id>{label}</label>
		<select id=id name=id>
			{options.iter().map(|&o| view! { <option value=o>{o}</option> }).collect_view()}
		</select>
	}
}

/// Deployment form with both diagrams. Any edit re-reads every field.
#[component]
pub fn Home() -> impl IntoView {
	let network = RwSignal::new(NetworkSettings::default());
	let cluster = RwSignal::new(ClusterSettings::default());
	let (net, clu) = (NetworkSettings::default(), ClusterSettings::default());

	let refresh = move |_: Event| {
		let next = form::read_network_settings();
		if network.with_untracked(|n| *n != next) {
			network.set(next);
		}
		let next = form::read_cluster_settings();
		if cluster.with_untracked(|c| *c != next) {
			cluster.set(next);
		}
	};

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="deployment">
				<form class="deployment-form" on:input=refresh on:change=refresh>
					<fieldset>
						<legend>"Network"</legend>
						{text_field(form::VPC_CIDR, "VPC CIDR", net.vpc_cidr.clone())}
						{text_field(form::PUBLIC_SUBNET1_CIDR, "Public subnet 1 CIDR", net.public_subnet1_cidr.clone())}
						{text_field(form::PUBLIC_SUBNET2_CIDR, "Public subnet 2 CIDR", net.public_subnet2_cidr.clone())}
						{text_field(form::PRIVATE_SUBNET_CIDR, "Private subnet CIDR", net.private_subnet_cidr.clone())}
						{text_field(form::DNS_ZONE_NAME, "DNS zone", net.dns_zone_name.clone())}
					</fieldset>
					<fieldset>
						<legend>"Cluster"</legend>
						{instance_select(form::INSTANCE_TYPE_MASTER, "Master instance", MASTER_TYPES)}
						{count_field(form::HOT_NODE_COUNT, "Hot nodes", clu.hot_count)}
						{instance_select(form::INSTANCE_TYPE_HOT, "Hot instance", HOT_TYPES)}
						{count_field(form::ML_NODE_COUNT, "ML nodes", clu.ml_count)}
						{instance_select(form::INSTANCE_TYPE_ML, "ML instance", ML_TYPES)}
						{count_field(form::FROZEN_NODE_COUNT, "Frozen nodes", clu.frozen_count)}
						{instance_select(form::INSTANCE_TYPE_FROZEN, "Frozen instance", FROZEN_TYPES)}
					</fieldset>
				</form>

				<section class="diagram-panel">
					<h2>"Network topology"</h2>
					<NetworkDiagram settings=network id="network-main" />
				</section>
				<section class="diagram-panel">
					<h2>"Cluster layout"</h2>
					<NodeDiagram settings=cluster id="cluster-main" />
				</section>
			</div>
		</ErrorBoundary>
	}
}

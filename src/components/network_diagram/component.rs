use leptos::prelude::*;
use log::debug;

use super::{layout, render};
use crate::settings::NetworkSettings;

/// VPC topology diagram. Redrawn from scratch whenever `settings` changes.
#[component]
pub fn NetworkDiagram(
	#[prop(into)] settings: Signal<NetworkSettings>,
	#[prop(into, default = "network".into())] id: String,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();

	Effect::new(move |_| {
		let settings = settings.get();
		let Some(host) = host_ref.get() else {
			return;
		};
		let positioned = layout::layout(&settings);
		host.set_inner_html(&render::render(&positioned, &id));
		debug!("network diagram redrawn for VPC {}", settings.vpc_cidr);
	});

	view! { <div node_ref=host_ref class="network-diagram-host" /> }
}

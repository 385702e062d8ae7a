use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{NodeDiagramState, Redraw, initial_surface};
use super::tooltip::{TooltipInfo, tooltip_position};
use super::types::FlowKind;
use super::viewport::FitPreset;
use crate::geometry::Point;
use crate::settings::ClusterSettings;

type SharedState = Rc<RefCell<Option<NodeDiagramState>>>;

const REFIT_DELAY_MS: i32 = 100;

/// Cluster node diagram with pan, zoom, node drag, tooltips and traffic
/// overlays. Rebuilt whenever `settings` changes; the view is kept.
#[component]
pub fn NodeDiagram(
	#[prop(into)] settings: Signal<ClusterSettings>,
	/// Prefix for every SVG id, unique per page.
	#[prop(into, default = "cluster".into())]
	id: String,
	/// Show the overlay toggles and zoom buttons.
	#[prop(default = true)]
	controls: bool,
	#[prop(default = false)] fullscreen: bool,
) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();
	let state: SharedState = Rc::new(RefCell::new(None));

	let show_monitoring = RwSignal::new(false);
	let flows = RwSignal::new(BTreeSet::<FlowKind>::new());
	let is_fullscreen = RwSignal::new(fullscreen);
	let tooltip = RwSignal::new(None::<TooltipInfo>);
	let tooltip_pos = RwSignal::new((0.0, 0.0));

	let state_init = state.clone();
	Effect::new(move |_| {
		let settings = settings.get();
		let Some(host) = host_ref.get() else {
			return;
		};
		let mut slot = state_init.borrow_mut();
		if let Some(s) = slot.as_mut() {
			let redraw = s.update(settings);
			repaint(&host, s, redraw);
			return;
		}

		let (w, h) = surface_size(&host);
		let (w, h) = initial_surface(w, h);
		let mut s = NodeDiagramState::new(id.clone(), settings, w, h);
		s.show_monitoring = show_monitoring.get_untracked();
		s.flows = flows.get_untracked();
		debug!("{}: initial layout at {}x{}", s.id, s.width, s.height);
		repaint(&host, &s, Redraw::Content);
		*slot = Some(s);
	});

	// Window listener lives as long as the component.
	let state_resize = state.clone();
	let resize_handle = window_event_listener(leptos::ev::resize, move |_| {
		let Some(host) = host_ref.get_untracked() else {
			return;
		};
		let (w, h) = surface_size(&host);
		let mut relaid = false;
		apply(&state_resize, host_ref, |s| {
			relaid = s.resize(w, h);
			if relaid { Redraw::Content } else { Redraw::None }
		});
		if relaid {
			let state_fit = state_resize.clone();
			defer(REFIT_DELAY_MS, move || {
				apply(&state_fit, host_ref, |s| s.fit(FitPreset::RESIZE));
			});
		}
	});
	on_cleanup(move || resize_handle.remove());

	let state_overlay = state.clone();
	Effect::new(move |_| {
		let (show, active) = (show_monitoring.get(), flows.get());
		apply(&state_overlay, host_ref, move |s| {
			let monitoring = s.set_monitoring(show);
			let traffic = s.set_flows(active);
			if monitoring == Redraw::Content || traffic == Redraw::Content {
				Redraw::Content
			} else {
				Redraw::None
			}
		});
	});

	let state_fs = state.clone();
	Effect::new(move |prev: Option<bool>| {
		let on = is_fullscreen.get();
		if prev.is_some_and(|was| was != on) {
			let state_fit = state_fs.clone();
			defer(REFIT_DELAY_MS, move || {
				apply(&state_fit, host_ref, |s| {
					let Some(host) = host_ref.get_untracked() else {
						return Redraw::None;
					};
					let (w, h) = surface_size(&host);
					let relaid = s.resize(w, h);
					s.fit(if on {
						FitPreset::FULLSCREEN
					} else {
						FitPreset::RESIZE
					});
					if relaid { Redraw::Content } else { Redraw::Transform }
				});
			});
		}
		on
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(host) = host_ref.get_untracked() else {
			return;
		};
		let p = local_point(&host, &ev);
		apply(&state_md, host_ref, |s| s.pointer_down(p, ev.button()));
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(host) = host_ref.get_untracked() else {
			return;
		};
		let p = local_point(&host, &ev);
		let mut info = None;
		apply(&state_mm, host_ref, |s| {
			let redraw = s.pointer_move(p);
			info = s.tooltip();
			redraw
		});
		match info {
			Some(info) => {
				if tooltip.with_untracked(|t| t.as_ref() != Some(&info)) {
					tooltip.set(Some(info));
				}
				let size = tooltip_ref
					.get_untracked()
					.map(|t| (t.offset_width() as f64, t.offset_height() as f64))
					.unwrap_or((0.0, 0.0));
				let cursor = (ev.client_x() as f64, ev.client_y() as f64);
				tooltip_pos.set(tooltip_position(cursor, size, window_size()));
			}
			None => {
				if tooltip.with_untracked(Option::is_some) {
					tooltip.set(None);
				}
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			s.pointer_up();
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.pointer_leave();
		}
		tooltip.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some(host) = host_ref.get_untracked() else {
			return;
		};
		let p = local_point(&host, &ev);
		apply(&state_wh, host_ref, |s| s.wheel(ev.delta_y(), p));
	};

	let (state_zi, state_zo, state_reset) = (state.clone(), state.clone(), state.clone());
	let toolbar = controls.then(move || {
		view! {
			<div class="diagram-controls">
				<button
					class="overlay-toggle monitoring-toggle"
					class:active=move || show_monitoring.get()
					on:click=move |_| show_monitoring.update(|v| *v = !*v)
				>
					"Monitoring"
				</button>
				{FlowKind::ALL
					.into_iter()
					.map(|kind| {
						view! {
							<button
								class=format!("overlay-toggle flow-toggle {}-toggle", kind.slug())
								class:active=move || flows.with(|f| f.contains(&kind))
								style:border-color=kind.color()
								on:click=move |_| {
									flows
										.update(|f| {
											if !f.remove(&kind) {
												f.insert(kind);
											}
										})
								}
							>
								{kind.label()}
							</button>
						}
					})
					.collect_view()}
				<button
					class="zoom-in"
					title="Zoom in"
					on:click=move |_| apply(&state_zi, host_ref, |s| s.zoom_step(true))
				>
					"+"
				</button>
				<button
					class="zoom-out"
					title="Zoom out"
					on:click=move |_| apply(&state_zo, host_ref, |s| s.zoom_step(false))
				>
					"−"
				</button>
				<button
					class="zoom-reset"
					title="Fit to view"
					on:click=move |_| apply(&state_reset, host_ref, |s| s.fit(FitPreset::RESIZE))
				>
					"Reset"
				</button>
				<button
					class="fullscreen-toggle"
					class:active=move || is_fullscreen.get()
					on:click=move |_| is_fullscreen.update(|f| *f = !*f)
				>
					{move || if is_fullscreen.get() { "Exit fullscreen" } else { "Fullscreen" }}
				</button>
			</div>
		}
	});

	view! {
		<div
			class="node-diagram-container"
			class:fullscreen=move || is_fullscreen.get()
		>
			<div
				node_ref=host_ref
				class="node-diagram-host"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style="cursor: grab;"
			/>
			{toolbar}
			<div
				node_ref=tooltip_ref
				class="node-tooltip"
				style:display=move || if tooltip.with(Option::is_some) { "block" } else { "none" }
				style:left=move || format!("{}px", tooltip_pos.get().0)
				style:top=move || format!("{}px", tooltip_pos.get().1)
			>
				{move || {
					tooltip
						.get()
						.map(|info| {
							view! {
								<div class="tooltip-title" style:color=info.color>
									{info.title}
								</div>
								<table class="tooltip-rows">
									{info
										.rows()
										.into_iter()
										.map(|(label, value)| {
											view! {
												<tr>
													<td>{label}</td>
													<td>{value}</td>
												</tr>
											}
										})
										.collect_view()}
								</table>
								<div class="tooltip-role">{info.role}</div>
								<div class="tooltip-hint">"Drag to reposition"</div>
							}
						})
				}}
			</div>
		</div>
	}
}

/// Run `f` against the live state and repaint whatever it reports.
fn apply(
	state: &SharedState,
	host_ref: NodeRef<leptos::html::Div>,
	f: impl FnOnce(&mut NodeDiagramState) -> Redraw,
) {
	let Some(host) = host_ref.get_untracked() else {
		return;
	};
	if let Some(ref mut s) = *state.borrow_mut() {
		let redraw = f(s);
		repaint(&host, s, redraw);
	}
}

fn repaint(host: &HtmlElement, state: &NodeDiagramState, redraw: Redraw) {
	match redraw {
		Redraw::None => {}
		Redraw::Content => host.set_inner_html(&render::render(state)),
		Redraw::Transform => {
			let Some(document) = web_sys::window().and_then(|w| w.document()) else {
				return;
			};
			let Some(root) = document.get_element_by_id(&render::root_id(&state.id)) else {
				debug!("{}: root group missing, redrawing", state.id);
				host.set_inner_html(&render::render(state));
				return;
			};
			let _ = root.set_attribute("transform", &state.transform.to_svg());
			if let Some(svg) = document.get_element_by_id(&format!("{}-svg", state.id)) {
				let _ = svg
					.class_list()
					.toggle_with_force("zoomed-out", state.transform.is_zoomed_out());
			}
		}
	}
}

fn surface_size(host: &HtmlElement) -> (f64, f64) {
	(host.client_width() as f64, host.client_height() as f64)
}

fn local_point(host: &HtmlElement, ev: &MouseEvent) -> Point {
	let rect = host.get_bounding_client_rect();
	Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

fn window_size() -> (f64, f64) {
	let Some(window): Option<Window> = web_sys::window() else {
		return (f64::INFINITY, f64::INFINITY);
	};
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(f64::INFINITY);
	(dim(window.inner_width()), dim(window.inner_height()))
}

/// Run `f` once after `ms` milliseconds.
fn defer(ms: i32, f: impl FnOnce() + 'static) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let cb = Closure::once_into_js(f);
	if window
		.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref::<js_sys::Function>(), ms)
		.is_err()
	{
		warn!("failed to schedule deferred diagram refit");
	}
}

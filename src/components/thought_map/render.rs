use leptos::html::Div;
use leptos::prelude::*;
use web_sys::MouseEvent;

use super::clipboard;
use super::component::local_point;
use super::state::MapState;
use crate::engine::{ConnectorKind, ConnectorPath, NodeId, NodeSize, Position};

const DASH: f64 = 6.0;
const GAP: f64 = 4.0;

/// One draggable node. Measures itself after each paint so connectors can
/// anchor on its real box.
#[component]
pub fn ThoughtNodeView(
	id: NodeId,
	state: RwSignal<MapState>,
	canvas_ref: NodeRef<Div>,
) -> impl IntoView {
	let node_ref = NodeRef::<Div>::new();
	let (text, is_linked, title) = state.with_untracked(|s| {
		s.node(id)
			.map(|n| {
				(
					n.text.clone(),
					n.is_linked,
					n.link_key.as_ref().map(|key| format!("Linked to: {}", key)),
				)
			})
			.unwrap_or_default()
	});

	Effect::new(move |_| {
		let Some(el) = node_ref.get() else {
			return;
		};
		request_animation_frame(move || {
			let size = NodeSize::new(el.offset_width() as f64, el.offset_height() as f64);
			state.maybe_update(|s| s.on_node_measured(id, size));
		});
	});

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		// Keep the canvas from starting a pan.
		ev.stop_propagation();
		if let Some(p) = local_point(canvas_ref, &ev) {
			state.update(|s| s.on_node_mouse_down(id, p));
		}
	};

	// A click that only ends a moving drag leaves focus alone.
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		state.update(|s| {
			s.on_node_click(id);
		});
	};

	let on_contextmenu = move |ev: MouseEvent| {
		ev.prevent_default();
		ev.stop_propagation();
		let anchor = Position::new(ev.client_x() as f64, ev.client_y() as f64);
		state.update(|s| s.on_node_context_menu(id, anchor));
	};

	let class = move || {
		let mut class = String::from("thought-node");
		if is_linked {
			class.push_str(" is-linked");
		}
		let emphasis = state.with(|s| s.node_emphasis(id)).class();
		if !emphasis.is_empty() {
			class.push(' ');
			class.push_str(emphasis);
		}
		class
	};
	let style = move || {
		state.with(|s| {
			s.node(id)
				.map(|n| format!("left: {}px; top: {}px;", n.position.x, n.position.y))
				.unwrap_or_default()
		})
	};

	view! {
		<div
			node_ref=node_ref
			class=class
			style=style
			title=title
			on:mousedown=on_mousedown
			on:click=on_click
			on:contextmenu=on_contextmenu
		>
			{text}
		</div>
	}
}

/// SVG layer with every connector, drawn under the nodes.
#[component]
pub fn ConnectorLayer(
	state: RwSignal<MapState>,
	connectors: Memo<Vec<ConnectorPath>>,
) -> impl IntoView {
	let paths = move || {
		let scale = state.with(|s| s.transform().scale);
		connectors
			.get()
			.into_iter()
			.map(|c| {
				let (kind, dash) = match c.kind {
					ConnectorKind::Structural => ("structural", None),
					ConnectorKind::Thematic => {
						("thematic", Some(format!("{} {}", DASH / scale, GAP / scale)))
					}
				};
				let class = format!("connector connector--{} {}", kind, c.emphasis.class());
				view! {
					<path
						d=c.d
						class=class
						fill="none"
						stroke-width=c.stroke_width.to_string()
						stroke-dasharray=dash
					/>
				}
			})
			.collect_view()
	};

	view! {
		<svg class="thought-map__edges" width="1" height="1">
			{paths}
		</svg>
	}
}

/// Context menu in the fixed overlay layer.
#[component]
pub fn ContextMenuView(state: RwSignal<MapState>) -> impl IntoView {
	move || {
		state.with(|s| s.menu().cloned()).map(|menu| {
			let copy = move |ev: MouseEvent| {
				ev.stop_propagation();
				let mut text = None;
				state.update(|s| text = s.take_copy_text());
				if let Some(text) = text {
					clipboard::copy_text(text);
				}
			};
			view! {
				<div
					class="thought-menu"
					style=format!("left: {}px; top: {}px;", menu.anchor.x, menu.anchor.y)
					on:mousedown=|ev: MouseEvent| ev.stop_propagation()
					on:click=|ev: MouseEvent| ev.stop_propagation()
					on:contextmenu=|ev: MouseEvent| ev.prevent_default()
				>
					<button class="thought-menu__item" on:click=copy>
						"Copy text"
					</button>
				</div>
			}
		})
	}
}

/// Zoom buttons, zoom readout and reset.
#[component]
pub fn Toolbar(state: RwSignal<MapState>) -> impl IntoView {
	let zoom_label = move || format!("{:.0}%", state.with(|s| s.transform().scale) * 100.0);

	view! {
		<div class="thought-toolbar">
			<button
				title="Zoom in"
				on:click=move |_| {
					state.maybe_update(|s| s.zoom_in());
				}
			>
				"+"
			</button>
			<span class="thought-toolbar__zoom">{zoom_label}</span>
			<button
				title="Zoom out"
				on:click=move |_| {
					state.maybe_update(|s| s.zoom_out());
				}
			>
				"−"
			</button>
			<button
				title="Reset view"
				on:click=move |_| {
					state.update(|s| s.reset_view());
				}
			>
				"Reset"
			</button>
		</div>
	}
}

/// Placeholder for an empty or absent document.
#[component]
pub fn EmptyForest() -> impl IntoView {
	view! {
		<div class="thought-map__empty">
			<p>"The forest is empty. Add a few notes to see them grow."</p>
		</div>
	}
}

use leptos::html::Div;
use leptos::prelude::*;
use web_sys::{MouseEvent, WheelEvent};

use super::render::{ConnectorLayer, ContextMenuView, EmptyForest, ThoughtNodeView, Toolbar};
use super::state::MapState;
use crate::engine::{EngineConfig, Position, SourceDocument};

/// Pointer position relative to the canvas element.
pub(super) fn local_point(canvas_ref: NodeRef<Div>, ev: &MouseEvent) -> Option<Position> {
	let canvas = canvas_ref.get_untracked()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Position::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Interactive node-link view of an outline document.
#[component]
pub fn ThoughtMap(
	/// Outline to render; `None` shows the placeholder.
	#[prop(into)]
	document: Signal<Option<SourceDocument>>,
	/// Layout, viewport and routing tunables.
	#[prop(optional)]
	config: EngineConfig,
) -> impl IntoView {
	let mut initial = MapState::new(config);
	document.with_untracked(|doc| initial.load(doc.as_ref()));
	let state = RwSignal::new(initial);
	let canvas_ref = NodeRef::<Div>::new();

	// Re-project whenever the host swaps the document.
	Effect::new(move |loaded: Option<()>| {
		document.with(|doc| {
			if loaded.is_some() {
				state.update(|s| s.load(doc.as_ref()));
			}
		});
	});

	let measure_canvas = move || {
		if let Some(canvas) = canvas_ref.get_untracked() {
			let (w, h) = (
				canvas.client_width() as f64,
				canvas.client_height() as f64,
			);
			state.maybe_update(|s| s.resize(w, h));
		}
	};
	Effect::new(move |_| {
		if canvas_ref.get().is_some() {
			measure_canvas();
		}
	});
	let resize_listener = window_event_listener(leptos::ev::resize, move |_| measure_canvas());
	on_cleanup(move || resize_listener.remove());

	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some(p) = local_point(canvas_ref, &ev) {
			state.update(|s| s.on_canvas_mouse_down(p));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = local_point(canvas_ref, &ev) {
			state.maybe_update(|s| s.on_mouse_move(p));
		}
	};

	let on_mouseup = move |_: MouseEvent| {
		state.maybe_update(|s| s.on_mouse_up());
	};

	let on_mouseleave = move |_: MouseEvent| {
		state.maybe_update(|s| s.on_mouse_leave());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(p) = local_point(canvas_ref, &ev) {
			let delta_y = ev.delta_y();
			state.maybe_update(|s| s.on_wheel(p, delta_y));
		}
	};

	// Any left click or background right click dismisses an open menu.
	let dismiss_menu = move |_: MouseEvent| {
		state.maybe_update(|s| s.close_menu());
	};

	let connectors = Memo::new(move |_| state.with(|s| s.connectors()));
	let canvas_class = move || {
		if state.with(|s| s.is_panning() || s.dragging().is_some()) {
			"thought-map__canvas is-grabbing"
		} else {
			"thought-map__canvas"
		}
	};
	let layer_style = move || {
		format!(
			"transform: {}; transform-origin: 0 0;",
			state.with(|s| s.transform().css())
		)
	};

	view! {
		<div class="thought-map" on:click=dismiss_menu>
			<Show
				when=move || state.with(|s| !s.is_empty())
				fallback=|| view! { <EmptyForest /> }
			>
				<div
					node_ref=canvas_ref
					class=canvas_class
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					on:contextmenu=dismiss_menu
				>
					<div class="thought-map__layer" style=layer_style>
						<ConnectorLayer state=state connectors=connectors />
						<For
							each=move || state.with(|s| s.node_keys())
							key=|key| *key
							children=move |(_, id)| {
								view! { <ThoughtNodeView id=id state=state canvas_ref=canvas_ref /> }
							}
						/>
					</div>
					<ContextMenuView state=state />
				</div>
				<Toolbar state=state />
			</Show>
		</div>
	}
}

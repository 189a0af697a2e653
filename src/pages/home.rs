use leptos::prelude::*;
use log::info;

use crate::components::thought_map::ThoughtMap;
use crate::engine::{DocumentError, SourceDocument, stamp_links};

const SAMPLE_NOTES: &str = include_str!("../data/notes.json");

/// Decode the bundled notes and stamp links on recurring items, the way the
/// offline generator prepares a saved document.
fn load_sample_notes() -> Result<Option<SourceDocument>, DocumentError> {
	let mut notes = SourceDocument::from_json(SAMPLE_NOTES)?;
	if let Some(doc) = notes.as_mut() {
		let linked = stamp_links(doc);
		info!("sample notes ready, {} linked texts", linked);
	}
	Ok(notes)
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let notes = load_sample_notes().map(|doc| {
		view! {
			<div class="fullscreen-map">
				<ThoughtMap document=Signal::stored(doc) />
				<div class="map-overlay">
					<h1>"Thought Forest"</h1>
					<p class="subtitle">
						"Drag notes to rearrange. Scroll to zoom. Drag the background to pan. Click a highlighted note to follow its theme."
					</p>
				</div>
			</div>
		}
	});

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
		}>{notes}</ErrorBoundary>
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::{LayoutConfig, derive_links, parse};

	#[test]
	fn sample_notes_parse_into_a_linked_forest() {
		let doc = load_sample_notes().unwrap().unwrap();
		let nodes = parse(&doc, &LayoutConfig::default());

		assert!(nodes.len() > 10);
		assert!(nodes.iter().any(|n| n.parent_id.is_some()));
		assert!(!derive_links(&nodes).is_empty());
	}
}

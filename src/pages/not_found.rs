use leptos::prelude::*;

/// 404 Not Found Page
#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<div class="not-found">
			<h1>"Lost in the woods"</h1>
			<p>"There is no path here."</p>
			<a href="/">"Back to the forest"</a>
		</div>
	}
}

//! Clipboard writes for the node context menu.
//!
//! The async Clipboard API is tried first; when it is missing or rejects,
//! the text goes through an off-screen textarea and `execCommand("copy")`.
//! Neither path retries, and failures are only logged.

use leptos::task::spawn_local;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Clipboard, HtmlDocument, HtmlTextAreaElement};

/// Why a copy path failed.
#[derive(Debug)]
pub enum ClipboardError {
	/// The API or DOM pieces it needs are missing.
	Unavailable(String),
	/// The browser refused the write.
	Rejected(String),
}

impl std::fmt::Display for ClipboardError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ClipboardError::Unavailable(err) => write!(f, "clipboard unavailable: {}", err),
			ClipboardError::Rejected(err) => write!(f, "clipboard write rejected: {}", err),
		}
	}
}

impl std::error::Error for ClipboardError {}

fn describe(value: &JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Fire-and-forget copy of `text`.
pub fn copy_text(text: String) {
	spawn_local(async move {
		if let Err(err) = write_text(&text).await {
			warn!("copy failed: {}", err);
		}
	});
}

/// Clipboard API first, then the `execCommand` fallback.
async fn write_text(text: &str) -> Result<(), ClipboardError> {
	match write_with_clipboard_api(text).await {
		Ok(()) => {
			debug!("copied {} bytes", text.len());
			Ok(())
		}
		Err(err) => {
			warn!("{}; trying execCommand fallback", err);
			write_with_exec_command(text)?;
			debug!("copied {} bytes via fallback", text.len());
			Ok(())
		}
	}
}

async fn write_with_clipboard_api(text: &str) -> Result<(), ClipboardError> {
	let window =
		web_sys::window().ok_or_else(|| ClipboardError::Unavailable("no window".into()))?;
	let navigator = window.navigator();
	// Absent outside secure contexts; check before calling into it.
	let clipboard = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
		.map_err(|err| ClipboardError::Unavailable(describe(&err)))?;
	if clipboard.is_undefined() || clipboard.is_null() {
		return Err(ClipboardError::Unavailable(
			"navigator.clipboard is missing".into(),
		));
	}
	let clipboard: Clipboard = clipboard.unchecked_into();
	JsFuture::from(clipboard.write_text(text))
		.await
		.map_err(|err| ClipboardError::Rejected(describe(&err)))?;
	Ok(())
}

fn write_with_exec_command(text: &str) -> Result<(), ClipboardError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or_else(|| ClipboardError::Unavailable("no document".into()))?;
	let body = document
		.body()
		.ok_or_else(|| ClipboardError::Unavailable("no body".into()))?;
	let field: HtmlTextAreaElement = document
		.create_element("textarea")
		.map_err(|err| ClipboardError::Unavailable(describe(&err)))?
		.dyn_into()
		.map_err(|_| ClipboardError::Unavailable("textarea cast".into()))?;

	field.set_value(text);
	let _ = field.set_attribute("readonly", "");
	let style = field.style();
	let _ = style.set_property("position", "fixed");
	let _ = style.set_property("left", "-9999px");
	let _ = style.set_property("top", "0");

	body.append_child(&field)
		.map_err(|err| ClipboardError::Unavailable(describe(&err)))?;
	field.select();
	let copied = match document.dyn_ref::<HtmlDocument>() {
		Some(html) => html
			.exec_command("copy")
			.map_err(|err| ClipboardError::Rejected(describe(&err))),
		None => Err(ClipboardError::Unavailable("not an html document".into())),
	};
	field.remove();

	match copied? {
		true => Ok(()),
		false => Err(ClipboardError::Rejected("copy command refused".into())),
	}
}

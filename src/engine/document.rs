//! Outline document model read by the engine.
//!
//! The host supplies a rich-text tree (`{ type, content?, text?, marks? }`).
//! On decode every node is folded into a [`DocNode`] variant so traversal
//! can match exhaustively instead of comparing type strings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mark type written by the editor extension and the link generator.
pub const AUTO_LINK_MARK: &str = "autoLink";
/// Plain mark type also accepted as a link.
pub const LINK_MARK: &str = "link";
/// Attribute carrying the link key on an `autoLink` mark.
pub const DATA_LINK_KEY: &str = "data-link-key";
/// Attribute carrying the link key on a plain `link` mark.
pub const LINK_KEY: &str = "link-key";

/// Document decoding or encoding failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentError {
	/// Malformed JSON or an unexpected node shape.
	Json(String),
}

impl std::fmt::Display for DocumentError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DocumentError::Json(err) => write!(f, "document json error: {}", err),
		}
	}
}

impl std::error::Error for DocumentError {}

/// A mark attached to a text run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mark {
	/// Mark type, e.g. `autoLink` or `bold`.
	#[serde(rename = "type")]
	pub kind: String,
	/// Raw mark attributes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub attrs: Option<Map<String, Value>>,
}

impl Mark {
	/// Link mark keyed by `key`, in the shape the editor writes.
	pub fn auto_link(key: &str) -> Self {
		let mut attrs = Map::new();
		attrs.insert(DATA_LINK_KEY.into(), Value::String(key.into()));
		Self {
			kind: AUTO_LINK_MARK.into(),
			attrs: Some(attrs),
		}
	}

	/// `true` for `autoLink` and `link` marks.
	pub fn is_link(&self) -> bool {
		self.kind == AUTO_LINK_MARK || self.kind == LINK_MARK
	}

	/// Link key attribute, if present.
	pub fn link_key(&self) -> Option<&str> {
		if !self.is_link() {
			return None;
		}
		let attrs = self.attrs.as_ref()?;
		attrs
			.get(DATA_LINK_KEY)
			.or_else(|| attrs.get(LINK_KEY))
			.and_then(Value::as_str)
	}
}

/// A single run of text and its marks.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextRun {
	/// Run text.
	pub text: String,
	/// Marks in document order.
	pub marks: Vec<Mark>,
}

impl TextRun {
	/// `true` when any mark is a link.
	pub fn is_linked(&self) -> bool {
		self.marks.iter().any(Mark::is_link)
	}
}

/// Bullet or numbered list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
	/// `bulletList`.
	Bullet,
	/// `orderedList`.
	Ordered,
}

/// One node of the outline tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawNode", into = "RawNode")]
pub enum DocNode {
	/// `doc`: top of the tree.
	Root(Vec<DocNode>),
	/// `bulletList` or `orderedList`.
	List(ListKind, Vec<DocNode>),
	/// `listItem`: one candidate thought.
	ListItem(Vec<DocNode>),
	/// `paragraph`: holds the item's text runs.
	Paragraph(Vec<DocNode>),
	/// `text`: a leaf run.
	Text(TextRun),
	/// Unrecognized type; traversed but never rendered.
	Other(String, Vec<DocNode>),
}

impl DocNode {
	/// Child nodes; empty for text runs.
	pub fn children(&self) -> &[DocNode] {
		match self {
			DocNode::Root(c)
			| DocNode::List(_, c)
			| DocNode::ListItem(c)
			| DocNode::Paragraph(c)
			| DocNode::Other(_, c) => c,
			DocNode::Text(_) => &[],
		}
	}

	/// Mutable child nodes; empty for text runs.
	pub fn children_mut(&mut self) -> &mut [DocNode] {
		match self {
			DocNode::Root(c)
			| DocNode::List(_, c)
			| DocNode::ListItem(c)
			| DocNode::Paragraph(c)
			| DocNode::Other(_, c) => c,
			DocNode::Text(_) => &mut [],
		}
	}

	/// First paragraph child of a list item, if any.
	pub fn item_paragraph(&self) -> Option<&DocNode> {
		match self {
			DocNode::ListItem(c) => c.iter().find(|n| matches!(n, DocNode::Paragraph(_))),
			_ => None,
		}
	}

	/// Concatenated text of the direct text runs, ignoring anything else.
	pub fn run_text(&self) -> String {
		self.children()
			.iter()
			.filter_map(|n| match n {
				DocNode::Text(run) => Some(run.text.as_str()),
				_ => None,
			})
			.collect()
	}

	/// Direct text runs.
	pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
		self.children().iter().filter_map(|n| match n {
			DocNode::Text(run) => Some(run),
			_ => None,
		})
	}
}

/// Immutable-per-render outline document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceDocument {
	root: DocNode,
}

impl SourceDocument {
	/// Wrap a root node.
	pub fn new(root: DocNode) -> Self {
		Self { root }
	}

	/// Decode a document. Blank input or `null` yields `Ok(None)`.
	pub fn from_json(input: &str) -> Result<Option<Self>, DocumentError> {
		if input.trim().is_empty() {
			return Ok(None);
		}
		let value: Value =
			serde_json::from_str(input).map_err(|err| DocumentError::Json(err.to_string()))?;
		Self::from_value(value)
	}

	/// Like [`SourceDocument::from_json`] for an already parsed value.
	pub fn from_value(value: Value) -> Result<Option<Self>, DocumentError> {
		if value.is_null() {
			return Ok(None);
		}
		serde_json::from_value(value)
			.map(|root| Some(Self { root }))
			.map_err(|err| DocumentError::Json(err.to_string()))
	}

	/// Encode in the editor's JSON shape.
	pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
		serde_json::to_string_pretty(self).map_err(|err| DocumentError::Json(err.to_string()))
	}

	/// Root node.
	pub fn root(&self) -> &DocNode {
		&self.root
	}

	/// Mutable root node.
	pub fn root_mut(&mut self) -> &mut DocNode {
		&mut self.root
	}
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
struct RawNode {
	#[serde(rename = "type")]
	kind: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	content: Option<Vec<DocNode>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	text: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	marks: Option<Vec<Mark>>,
}

impl From<RawNode> for DocNode {
	fn from(raw: RawNode) -> Self {
		let content = raw.content.unwrap_or_default();
		match raw.kind.as_str() {
			"doc" => DocNode::Root(content),
			"bulletList" => DocNode::List(ListKind::Bullet, content),
			"orderedList" => DocNode::List(ListKind::Ordered, content),
			"listItem" => DocNode::ListItem(content),
			"paragraph" => DocNode::Paragraph(content),
			"text" => DocNode::Text(TextRun {
				text: raw.text.unwrap_or_default(),
				marks: raw.marks.unwrap_or_default(),
			}),
			_ => DocNode::Other(raw.kind, content),
		}
	}
}

impl From<DocNode> for RawNode {
	fn from(node: DocNode) -> Self {
		let container = |kind: &str, content: Vec<DocNode>| RawNode {
			kind: kind.into(),
			content: (!content.is_empty()).then_some(content),
			..Default::default()
		};
		match node {
			DocNode::Root(c) => container("doc", c),
			DocNode::List(ListKind::Bullet, c) => container("bulletList", c),
			DocNode::List(ListKind::Ordered, c) => container("orderedList", c),
			DocNode::ListItem(c) => container("listItem", c),
			DocNode::Paragraph(c) => container("paragraph", c),
			DocNode::Other(kind, c) => container(&kind, c),
			DocNode::Text(run) => RawNode {
				kind: "text".into(),
				content: None,
				text: Some(run.text),
				marks: (!run.marks.is_empty()).then_some(run.marks),
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn blank_and_null_input_is_absent() {
		assert_eq!(SourceDocument::from_json("  \n"), Ok(None));
		assert_eq!(SourceDocument::from_json("null"), Ok(None));
	}

	#[test]
	fn malformed_json_is_an_error() {
		let err = SourceDocument::from_json("{\"type\": ").unwrap_err();
		assert!(err.to_string().starts_with("document json error"));
	}

	#[test]
	fn unknown_types_and_missing_content_decode_as_containers() {
		let doc = SourceDocument::from_value(json!({
			"type": "doc",
			"content": [
				{ "type": "blockquote", "content": [{ "type": "bulletList" }] },
				{ "type": "horizontalRule" }
			]
		}))
		.unwrap()
		.unwrap();

		assert_eq!(
			doc.root(),
			&DocNode::Root(vec![
				DocNode::Other(
					"blockquote".into(),
					vec![DocNode::List(ListKind::Bullet, vec![])]
				),
				DocNode::Other("horizontalRule".into(), vec![]),
			])
		);
	}

	#[test]
	fn link_key_is_read_from_either_attribute() {
		let auto: Mark = serde_json::from_value(json!({
			"type": "autoLink",
			"attrs": { "data-link-key": "seed" }
		}))
		.unwrap();
		let plain: Mark = serde_json::from_value(json!({
			"type": "link",
			"attrs": { "link-key": "root" }
		}))
		.unwrap();
		let bold: Mark = serde_json::from_value(json!({ "type": "bold" })).unwrap();

		assert_eq!(auto.link_key(), Some("seed"));
		assert_eq!(plain.link_key(), Some("root"));
		assert!(!bold.is_link());
		assert_eq!(bold.link_key(), None);
	}

	#[test]
	fn encoding_keeps_the_editor_shape() {
		let input = json!({
			"type": "doc",
			"content": [{
				"type": "orderedList",
				"content": [{
					"type": "listItem",
					"content": [{
						"type": "paragraph",
						"content": [{
							"type": "text",
							"text": "moss",
							"marks": [{ "type": "autoLink", "attrs": { "data-link-key": "moss" } }]
						}]
					}]
				}]
			}]
		});
		let doc = SourceDocument::from_value(input.clone()).unwrap().unwrap();
		assert_eq!(serde_json::to_value(&doc).unwrap(), input);
	}
}

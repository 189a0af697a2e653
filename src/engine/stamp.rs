//! Offline link stamping: marks list items whose text recurs in the document.
//!
//! This runs before a document reaches the renderer (the demo page runs it
//! on the bundled notes). The renderer itself only trusts existing marks.

use std::collections::{HashMap, HashSet};

use log::info;

use super::document::{AUTO_LINK_MARK, DocNode, Mark, SourceDocument};

/// Stamp an `autoLink` mark on every run of every paragraph whose text
/// occurs in two or more list items. Returns the number of linked texts.
pub fn stamp_links(doc: &mut SourceDocument) -> usize {
	let mut counts: HashMap<String, usize> = HashMap::new();
	count_texts(doc.root(), &mut counts);

	let linkable: HashSet<String> = counts
		.into_iter()
		.filter(|(_, count)| *count > 1)
		.map(|(text, _)| text)
		.collect();
	if linkable.is_empty() {
		info!("no linkable notes found");
		return 0;
	}

	info!("found {} sets of linkable notes", linkable.len());
	apply_marks(doc.root_mut(), &linkable);
	linkable.len()
}

fn count_texts(node: &DocNode, counts: &mut HashMap<String, usize>) {
	if let Some(paragraph) = node.item_paragraph() {
		let text = paragraph.run_text();
		if !text.is_empty() {
			*counts.entry(text).or_default() += 1;
		}
	}
	for child in node.children() {
		count_texts(child, counts);
	}
}

fn apply_marks(node: &mut DocNode, linkable: &HashSet<String>) {
	if let DocNode::ListItem(children) = node {
		let paragraph = children
			.iter_mut()
			.find(|n| matches!(n, DocNode::Paragraph(_)));
		if let Some(paragraph) = paragraph {
			let text = paragraph.run_text();
			if linkable.contains(&text) {
				for child in paragraph.children_mut() {
					if let DocNode::Text(run) = child {
						run.marks.retain(|m| m.kind != AUTO_LINK_MARK);
						run.marks.push(Mark::auto_link(&text));
					}
				}
			}
		}
	}
	for child in node.children_mut() {
		apply_marks(child, linkable);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::config::LayoutConfig;
	use crate::engine::links::derive_links;
	use crate::engine::parser::parse;
	use crate::engine::parser::tests::{doc, item, text};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn recurring_texts_become_linked_across_depths() {
		let mut doc = doc(vec![
			item(vec![text("light")], vec![item(vec![text("water")], vec![])]),
			item(vec![text("water")], vec![item(vec![text("light")], vec![])]),
			item(vec![text("soil")], vec![]),
		]);

		assert_eq!(stamp_links(&mut doc), 2);

		let nodes = parse(&doc, &LayoutConfig::default());
		let linked: Vec<_> = nodes
			.iter()
			.map(|n| (n.text.as_str(), n.is_linked))
			.collect();
		assert_eq!(
			linked,
			vec![("light", true), ("water", true), ("water", true), ("light", true), ("soil", false)]
		);
		assert_eq!(derive_links(&nodes).len(), 2);
	}

	#[test]
	fn every_run_is_marked_and_stale_marks_replaced() {
		let mut doc = doc(vec![
			item(
				vec![
					json!({ "type": "text", "text": "deep ", "marks": [
						{ "type": "bold" },
						{ "type": "autoLink", "attrs": { "data-link-key": "stale" } }
					]}),
					text("roots"),
				],
				vec![],
			),
			item(vec![text("deep roots")], vec![]),
		]);

		stamp_links(&mut doc);

		let DocNode::Root(lists) = doc.root() else { panic!("root") };
		let first_item = &lists[0].children()[0];
		let paragraph = first_item.item_paragraph().unwrap();
		let runs: Vec<_> = paragraph.runs().collect();
		assert_eq!(
			runs[0].marks,
			vec![
				serde_json::from_value(json!({ "type": "bold" })).unwrap(),
				Mark::auto_link("deep roots"),
			]
		);
		assert_eq!(runs[1].marks, vec![Mark::auto_link("deep roots")]);
	}

	#[test]
	fn stamped_document_persists_in_editor_shape() {
		let mut doc = doc(vec![item(vec![text("fern")], vec![]), item(vec![text("fern")], vec![])]);
		stamp_links(&mut doc);

		let saved = doc.to_json_pretty().unwrap();
		assert_eq!(saved.matches("\"data-link-key\": \"fern\"").count(), 2);
		assert_eq!(SourceDocument::from_json(&saved), Ok(Some(doc)));
	}

	#[test]
	fn unique_texts_leave_the_document_untouched() {
		let mut doc = doc(vec![item(vec![text("a")], vec![]), item(vec![text("b")], vec![])]);
		let before = doc.clone();

		assert_eq!(stamp_links(&mut doc), 0);
		assert_eq!(doc, before);
	}
}

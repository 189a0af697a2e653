//! Edge sets derived from parsed nodes.

use std::collections::BTreeMap;

use log::debug;

use super::parser::{NodeId, ThoughtNode};

/// Unordered pair of nodes sharing identical linked text; `a < b` always.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThematicLink {
	/// Lower id.
	pub a: NodeId,
	/// Higher id.
	pub b: NodeId,
}

impl ThematicLink {
	/// Normalized pair of `x` and `y`.
	pub fn new(x: NodeId, y: NodeId) -> Self {
		if x <= y {
			Self { a: x, b: y }
		} else {
			Self { a: y, b: x }
		}
	}

	/// `true` when `id` is either end.
	pub fn touches(&self, id: NodeId) -> bool {
		self.a == id || self.b == id
	}
}

/// Parent-child edge implied by nesting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructuralEdge {
	/// Enclosing item.
	pub parent: NodeId,
	/// Nested item.
	pub child: NodeId,
}

/// Complete graph over each group of linked nodes with equal text.
///
/// Text is compared exactly. Single-member groups yield nothing.
pub fn derive_links(nodes: &[ThoughtNode]) -> Vec<ThematicLink> {
	let mut groups: BTreeMap<&str, Vec<NodeId>> = BTreeMap::new();
	for node in nodes.iter().filter(|n| n.is_linked) {
		groups.entry(node.text.as_str()).or_default().push(node.id);
	}

	let mut links = Vec::new();
	for (text, ids) in &groups {
		if ids.len() < 2 {
			debug!("linked text {:?} has no partner", text);
			continue;
		}
		for (i, &x) in ids.iter().enumerate() {
			for &y in &ids[i + 1..] {
				links.push(ThematicLink::new(x, y));
			}
		}
	}
	links.sort();
	links
}

/// One edge per node with a parent, in visit order.
pub fn structural_edges(nodes: &[ThoughtNode]) -> Vec<StructuralEdge> {
	nodes
		.iter()
		.filter_map(|n| {
			n.parent_id.map(|parent| StructuralEdge {
				parent,
				child: n.id,
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::config::LayoutConfig;
	use crate::engine::parser::tests::{doc, item, linked_text, text};
	use crate::engine::parser::{Position, parse};
	use pretty_assertions::assert_eq;

	fn node(id: usize, label: &str, is_linked: bool) -> ThoughtNode {
		ThoughtNode {
			id: NodeId(id),
			parent_id: None,
			text: label.into(),
			depth: 0,
			is_linked,
			link_key: is_linked.then(|| label.to_owned()),
			position: Position::default(),
		}
	}

	#[test]
	fn two_identical_linked_items_share_one_link() {
		let doc = doc(vec![
			item(vec![linked_text("x")], vec![]),
			item(vec![linked_text("x")], vec![]),
		]);
		let nodes = parse(&doc, &LayoutConfig::default());

		assert_eq!(nodes.len(), 2);
		assert_eq!(derive_links(&nodes), vec![ThematicLink::new(NodeId(0), NodeId(1))]);
		assert!(structural_edges(&nodes).is_empty());
	}

	#[test]
	fn groups_form_complete_graphs() {
		let nodes: Vec<_> = (0..5).map(|i| node(i, "seed", true)).collect();
		let links = derive_links(&nodes);

		assert_eq!(links.len(), 5 * 4 / 2);
		for link in &links {
			assert!(link.a < link.b);
		}
	}

	#[test]
	fn singletons_and_unlinked_duplicates_produce_nothing() {
		let nodes = vec![
			node(0, "alone", true),
			node(1, "plain", false),
			node(2, "plain", false),
			node(3, "Alone", true),
		];
		assert!(derive_links(&nodes).is_empty());
	}

	#[test]
	fn comparison_is_exact() {
		let nodes = vec![node(0, "moss", true), node(1, "moss ", true), node(2, "moss", true)];
		assert_eq!(derive_links(&nodes), vec![ThematicLink::new(NodeId(2), NodeId(0))]);
	}

	#[test]
	fn structural_edges_follow_nesting() {
		let doc = doc(vec![item(
			vec![text("trunk")],
			vec![item(vec![text("branch")], vec![item(vec![text("leaf")], vec![])])],
		)]);
		let nodes = parse(&doc, &LayoutConfig::default());

		assert_eq!(
			structural_edges(&nodes),
			vec![
				StructuralEdge {
					parent: NodeId(0),
					child: NodeId(1),
				},
				StructuralEdge {
					parent: NodeId(1),
					child: NodeId(2),
				},
			]
		);
	}
}

//! Projection of the outline tree into a flat list of graph nodes.

use log::debug;

use super::config::LayoutConfig;
use super::document::{DocNode, SourceDocument};

/// Visit-order identifier, stable within one parse pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Document-space pixel position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset.
	pub x: f64,
	/// Vertical offset.
	pub y: f64,
}

impl Position {
	/// Point at (`x`, `y`).
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A list item projected into the map.
#[derive(Clone, Debug, PartialEq)]
pub struct ThoughtNode {
	/// Visit-order id.
	pub id: NodeId,
	/// Nearest accepted ancestor item.
	pub parent_id: Option<NodeId>,
	/// Concatenated paragraph text, untrimmed.
	pub text: String,
	/// Number of accepted ancestors.
	pub depth: usize,
	/// Paragraph carries a link mark.
	pub is_linked: bool,
	/// Key of the first link mark in the paragraph, if any.
	pub link_key: Option<String>,
	/// Top-left corner; moved by dragging.
	pub position: Position,
}

/// Depth-first projection of `doc` into thought nodes.
///
/// List items whose first paragraph has blank text are dropped together
/// with everything nested under them.
pub fn parse(doc: &SourceDocument, layout: &LayoutConfig) -> Vec<ThoughtNode> {
	let mut projection = Projection {
		layout,
		nodes: Vec::new(),
	};
	projection.visit(doc.root(), None, 0);
	projection.nodes
}

struct Projection<'a> {
	layout: &'a LayoutConfig,
	nodes: Vec<ThoughtNode>,
}

impl Projection<'_> {
	fn visit(&mut self, node: &DocNode, parent: Option<NodeId>, depth: usize) {
		match node {
			DocNode::ListItem(children) => {
				let Some(paragraph) = node.item_paragraph() else {
					return self.visit_all(children, parent, depth);
				};
				let text = paragraph.run_text();
				if text.trim().is_empty() {
					debug!("pruned blank item under {:?} at depth {}", parent, depth);
					return;
				}
				let id = self.accept(text, paragraph, parent, depth);
				for child in children.iter().filter(|c| !std::ptr::eq(*c, paragraph)) {
					self.visit(child, Some(id), depth + 1);
				}
			}
			DocNode::Text(_) => {}
			DocNode::Root(children)
			| DocNode::List(_, children)
			| DocNode::Paragraph(children)
			| DocNode::Other(_, children) => self.visit_all(children, parent, depth),
		}
	}

	fn visit_all(&mut self, children: &[DocNode], parent: Option<NodeId>, depth: usize) {
		for child in children {
			self.visit(child, parent, depth);
		}
	}

	fn accept(
		&mut self,
		text: String,
		paragraph: &DocNode,
		parent: Option<NodeId>,
		depth: usize,
	) -> NodeId {
		let index = self.nodes.len();
		let id = NodeId(index);
		let is_linked = paragraph.runs().any(|run| run.is_linked());
		let link_key = paragraph
			.runs()
			.flat_map(|run| run.marks.iter())
			.find_map(|mark| mark.link_key())
			.map(str::to_owned);

		self.nodes.push(ThoughtNode {
			id,
			parent_id: parent,
			text,
			depth,
			is_linked,
			link_key,
			position: Position::new(
				self.layout.base_indent + depth as f64 * self.layout.depth_width,
				index as f64 * self.layout.row_spacing,
			),
		});
		id
	}
}

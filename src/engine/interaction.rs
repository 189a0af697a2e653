//! Per-node dragging, click-to-focus and the context menu lifecycle.

use log::debug;

use super::parser::{NodeId, Position, ThoughtNode};

/// Derived visual weight of a node or edge under the current focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emphasis {
	/// Nothing is focused.
	Normal,
	/// Carries the focused text.
	Highlighted,
	/// Something else is focused.
	Dimmed,
}

impl Emphasis {
	/// CSS modifier class; empty for [`Emphasis::Normal`].
	pub fn class(&self) -> &'static str {
		match self {
			Emphasis::Normal => "",
			Emphasis::Highlighted => "is-highlighted",
			Emphasis::Dimmed => "is-dimmed",
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct DragSession {
	node: NodeId,
	/// Pointer in document space minus node position at grab time.
	offset: Position,
	moved: bool,
}

/// Open context menu, anchored in viewport (client) coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextMenu {
	/// Node the menu was opened on.
	pub node: NodeId,
	/// Text the copy action writes.
	pub text: String,
	/// Client coordinates of the opening right click.
	pub anchor: Position,
}

/// Outcome of a node click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusChange {
	/// This text is now focused.
	Focused(String),
	/// Focus was dropped.
	Cleared,
	/// Unlinked node, or the click ended a drag.
	Unchanged,
}

/// Drag, focus and menu state for one map.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InteractionController {
	drag: Option<DragSession>,
	focus: Option<String>,
	menu: Option<ContextMenu>,
	/// Node whose drag moved it; the click that follows the release belongs
	/// to the drag, not to focus.
	swallow_click: Option<NodeId>,
}

impl InteractionController {
	/// Idle controller: no drag, no focus, no menu.
	pub fn new() -> Self {
		Self::default()
	}

	/// Grab `node` at `pointer` (canvas space) under the current `scale`.
	pub fn begin_drag(&mut self, node: &ThoughtNode, pointer: Position, scale: f64) {
		self.swallow_click = None;
		self.drag = Some(DragSession {
			node: node.id,
			offset: Position::new(
				pointer.x / scale - node.position.x,
				pointer.y / scale - node.position.y,
			),
			moved: false,
		});
	}

	/// New position of the dragged node, if a drag is active.
	pub fn drag_to(&self, pointer: Position, scale: f64) -> Option<(NodeId, Position)> {
		let drag = self.drag?;
		Some((
			drag.node,
			Position::new(
				pointer.x / scale - drag.offset.x,
				pointer.y / scale - drag.offset.y,
			),
		))
	}

	/// Record that the active drag actually displaced its node.
	pub fn mark_moved(&mut self) {
		if let Some(drag) = self.drag.as_mut() {
			drag.moved = true;
		}
	}

	/// Release the drag, returning the node that was held.
	pub fn end_drag(&mut self) -> Option<NodeId> {
		let drag = self.drag.take()?;
		self.swallow_click = drag.moved.then_some(drag.node);
		Some(drag.node)
	}

	/// `true` once for the click on `id` that trails a drag which moved it.
	pub fn take_drag_click(&mut self, id: NodeId) -> bool {
		self.swallow_click.take() == Some(id)
	}

	/// Node currently held, if any.
	pub fn dragging(&self) -> Option<NodeId> {
		self.drag.map(|d| d.node)
	}

	/// Click handling: only linked nodes change focus, and clicking the
	/// focused text again clears it.
	pub fn toggle_focus(&mut self, node: &ThoughtNode) -> FocusChange {
		if !node.is_linked {
			return FocusChange::Unchanged;
		}
		if self.focus.as_deref() == Some(node.text.as_str()) {
			self.focus = None;
			debug!("focus cleared");
			FocusChange::Cleared
		} else {
			self.focus = Some(node.text.clone());
			debug!("focus on {:?}", node.text);
			FocusChange::Focused(node.text.clone())
		}
	}

	/// Text every highlighted node carries.
	pub fn focused_text(&self) -> Option<&str> {
		self.focus.as_deref()
	}

	/// Drop focus without a click.
	pub fn clear_focus(&mut self) {
		self.focus = None;
	}

	/// Emphasis of a node carrying `text`.
	pub fn node_emphasis(&self, text: &str) -> Emphasis {
		match self.focused_text() {
			None => Emphasis::Normal,
			Some(focused) if focused == text => Emphasis::Highlighted,
			Some(_) => Emphasis::Dimmed,
		}
	}

	/// Open a menu for `node`, replacing any menu already open.
	pub fn open_menu(&mut self, node: &ThoughtNode, anchor: Position) {
		debug!("context menu for {:?} at {:?}", node.id, anchor);
		self.menu = Some(ContextMenu {
			node: node.id,
			text: node.text.clone(),
			anchor,
		});
	}

	/// Close the menu; `false` when none was open.
	pub fn close_menu(&mut self) -> bool {
		self.menu.take().is_some()
	}

	/// The open menu, if any.
	pub fn menu(&self) -> Option<&ContextMenu> {
		self.menu.as_ref()
	}

	/// Close the menu and hand back the text its copy action targets.
	pub fn take_copy_text(&mut self) -> Option<String> {
		self.menu.take().map(|m| m.text)
	}
}

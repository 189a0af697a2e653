use log::{debug, info};

use crate::engine::{
	ConnectorPath, ContextMenu, Emphasis, EngineConfig, FocusChange, GeometryTracker,
	InteractionController, NodeId, NodeSize, Position, RouteInput, SourceDocument, ThematicLink,
	ThoughtNode, ViewportController, ViewportTransform, ZoomDirection, derive_links, parse, route,
};

/// All mutable state of one thought map instance.
///
/// Pointer positions handed to the `on_*` handlers are relative to the
/// canvas element, except context menu anchors which are client coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct MapState {
	config: EngineConfig,
	nodes: Vec<ThoughtNode>,
	links: Vec<ThematicLink>,
	geometry: GeometryTracker,
	viewport: ViewportController,
	interaction: InteractionController,
	generation: u64,
	/// Canvas width in CSS pixels.
	pub width: f64,
	/// Canvas height in CSS pixels.
	pub height: f64,
}

impl MapState {
	/// Empty map tuned by `config`.
	pub fn new(config: EngineConfig) -> Self {
		Self {
			nodes: Vec::new(),
			links: Vec::new(),
			geometry: GeometryTracker::new(config.default_geometry),
			viewport: ViewportController::new(config.viewport.clone()),
			interaction: InteractionController::new(),
			generation: 0,
			width: 0.0,
			height: 0.0,
			config,
		}
	}

	/// Replace the node set from a new document (or clear it).
	pub fn load(&mut self, doc: Option<&SourceDocument>) {
		self.nodes = doc
			.map(|doc| parse(doc, &self.config.layout))
			.unwrap_or_default();
		self.links = derive_links(&self.nodes);
		self.geometry.clear();
		self.interaction.end_drag();
		self.interaction.close_menu();
		self.viewport.end_pan();
		self.generation += 1;
		info!(
			"thought map loaded: {} nodes, {} thematic links",
			self.nodes.len(),
			self.links.len()
		);
	}

	/// `true` when there is nothing to draw and the placeholder shows.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Nodes in visit order.
	pub fn nodes(&self) -> &[ThoughtNode] {
		&self.nodes
	}

	/// Render keys: ids are only unique within one load.
	pub fn node_keys(&self) -> Vec<(u64, NodeId)> {
		self.nodes.iter().map(|n| (self.generation, n.id)).collect()
	}

	/// Node by id within the current load.
	pub fn node(&self, id: NodeId) -> Option<&ThoughtNode> {
		self.nodes.iter().find(|n| n.id == id)
	}

	fn node_mut(&mut self, id: NodeId) -> Option<&mut ThoughtNode> {
		self.nodes.iter_mut().find(|n| n.id == id)
	}

	/// Thematic links of the current load.
	pub fn links(&self) -> &[ThematicLink] {
		&self.links
	}

	/// Current pan/zoom transform.
	pub fn transform(&self) -> ViewportTransform {
		self.viewport.transform()
	}

	/// `true` while the background is being dragged.
	pub fn is_panning(&self) -> bool {
		self.viewport.is_panning()
	}

	/// Node held by an active drag.
	pub fn dragging(&self) -> Option<NodeId> {
		self.interaction.dragging()
	}

	/// Focused link text, if any.
	pub fn focused_text(&self) -> Option<&str> {
		self.interaction.focused_text()
	}

	/// The open context menu, if any.
	pub fn menu(&self) -> Option<&ContextMenu> {
		self.interaction.menu()
	}

	/// Emphasis of one node under the current focus.
	pub fn node_emphasis(&self, id: NodeId) -> Emphasis {
		self.node(id)
			.map(|n| self.interaction.node_emphasis(&n.text))
			.unwrap_or(Emphasis::Normal)
	}

	/// Route every structural and thematic connector.
	pub fn connectors(&self) -> Vec<ConnectorPath> {
		let input = RouteInput {
			nodes: &self.nodes,
			links: &self.links,
			geometry: &self.geometry,
			focused_text: self.interaction.focused_text(),
			scale: self.viewport.scale(),
		};
		route(&input, &self.config.routing)
	}

	/// Measurement callback; `true` means connectors need one re-route.
	pub fn on_node_measured(&mut self, id: NodeId, size: NodeSize) -> bool {
		self.node(id).is_some() && self.geometry.on_node_mounted(id, size)
	}

	/// Track the canvas size; `true` when it changed.
	pub fn resize(&mut self, width: f64, height: f64) -> bool {
		if self.width == width && self.height == height {
			return false;
		}
		self.width = width;
		self.height = height;
		true
	}

	/// Wheel zoom around the cursor; `true` when the scale changed.
	pub fn on_wheel(&mut self, cursor: Position, delta_y: f64) -> bool {
		self.viewport.zoom_at(cursor, delta_y)
	}

	/// One zoom button step in, around the canvas center.
	pub fn zoom_in(&mut self) -> bool {
		self.viewport
			.zoom_step(ZoomDirection::In, self.width, self.height)
	}

	/// One zoom button step out, around the canvas center.
	pub fn zoom_out(&mut self) -> bool {
		self.viewport
			.zoom_step(ZoomDirection::Out, self.width, self.height)
	}

	/// Restore the default transform and drop focus. Dragged nodes stay put.
	pub fn reset_view(&mut self) {
		self.viewport.reset();
		self.interaction.clear_focus();
		info!("view reset");
	}

	/// Background press: starts a pan unless a node already owns the pointer.
	pub fn on_canvas_mouse_down(&mut self, pointer: Position) {
		if self.interaction.dragging().is_none() {
			self.viewport.begin_pan(pointer);
		}
	}

	/// Press on a node: grabs it for dragging.
	pub fn on_node_mouse_down(&mut self, id: NodeId, pointer: Position) {
		let scale = self.viewport.scale();
		let Some(node) = self.nodes.iter().find(|n| n.id == id) else {
			return;
		};
		self.interaction.begin_drag(node, pointer, scale);
		self.viewport.end_pan();
	}

	/// Move the dragged node, or the surface while panning.
	pub fn on_mouse_move(&mut self, pointer: Position) -> bool {
		let scale = self.viewport.scale();
		if let Some((id, position)) = self.interaction.drag_to(pointer, scale) {
			let moved = match self.node_mut(id) {
				Some(node) if node.position != position => {
					node.position = position;
					true
				}
				_ => false,
			};
			if moved {
				self.interaction.mark_moved();
			}
			return moved;
		}
		self.viewport.pan_to(pointer)
	}

	/// Release ends both a drag and a pan.
	pub fn on_mouse_up(&mut self) -> bool {
		let was_active = self.interaction.end_drag().is_some() || self.viewport.is_panning();
		self.viewport.end_pan();
		was_active
	}

	/// Pointer left the canvas; same as a release.
	pub fn on_mouse_leave(&mut self) -> bool {
		self.on_mouse_up()
	}

	/// Left click on a node: closes any menu and toggles focus, unless the
	/// click only ends a drag that moved the node.
	pub fn on_node_click(&mut self, id: NodeId) -> FocusChange {
		self.interaction.close_menu();
		if self.interaction.take_drag_click(id) {
			return FocusChange::Unchanged;
		}
		match self.nodes.iter().find(|n| n.id == id) {
			Some(node) => self.interaction.toggle_focus(node),
			None => FocusChange::Unchanged,
		}
	}

	/// Right click on a node opens its menu at `client`.
	pub fn on_node_context_menu(&mut self, id: NodeId, client: Position) {
		if let Some(node) = self.nodes.iter().find(|n| n.id == id) {
			self.interaction.open_menu(node, client);
		}
	}

	/// Dismiss the menu; `true` when one was open.
	pub fn close_menu(&mut self) -> bool {
		let closed = self.interaction.close_menu();
		if closed {
			debug!("context menu closed");
		}
		closed
	}

	/// Close the menu, returning the text its copy action should write.
	pub fn take_copy_text(&mut self) -> Option<String> {
		self.interaction.take_copy_text()
	}
}

//! SVG path geometry for structural and thematic connectors.

use std::collections::HashMap;
use std::fmt::Write;

use super::config::RoutingConfig;
use super::geometry::GeometryTracker;
use super::interaction::Emphasis;
use super::links::{ThematicLink, structural_edges};
use super::parser::{NodeId, Position, ThoughtNode};

/// What a connector stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectorKind {
	/// Parent to child.
	Structural,
	/// Between two nodes sharing linked text.
	Thematic,
}

/// One drawable connector.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectorPath {
	/// Structural or thematic.
	pub kind: ConnectorKind,
	/// Parent, or the lower link id.
	pub from: NodeId,
	/// Child, or the higher link id.
	pub to: NodeId,
	/// SVG path data in document space.
	pub d: String,
	/// Stroke in document units, already divided by scale.
	pub stroke_width: f64,
	/// Weight under the current focus.
	pub emphasis: Emphasis,
}

/// Everything the router reads for one draw call.
pub struct RouteInput<'a> {
	/// Nodes with their current positions.
	pub nodes: &'a [ThoughtNode],
	/// Thematic links to draw.
	pub links: &'a [ThematicLink],
	/// Measured node sizes.
	pub geometry: &'a GeometryTracker,
	/// Focused link text, if any.
	pub focused_text: Option<&'a str>,
	/// Current viewport scale.
	pub scale: f64,
}

/// Structural edges in parse order, then thematic links.
pub fn route(input: &RouteInput<'_>, config: &RoutingConfig) -> Vec<ConnectorPath> {
	let by_id: HashMap<NodeId, &ThoughtNode> = input.nodes.iter().map(|n| (n.id, n)).collect();
	let mut paths = Vec::new();

	for edge in structural_edges(input.nodes) {
		let (Some(parent), Some(child)) = (by_id.get(&edge.parent), by_id.get(&edge.child)) else {
			continue;
		};
		let emphasis = match input.focused_text {
			None => Emphasis::Normal,
			Some(f) if parent.text == f || child.text == f => Emphasis::Highlighted,
			Some(_) => Emphasis::Dimmed,
		};
		paths.push(ConnectorPath {
			kind: ConnectorKind::Structural,
			from: parent.id,
			to: child.id,
			d: structural_path(parent, child, input.geometry, config.corner_radius),
			stroke_width: stroke(config.structural_stroke, emphasis, input.scale, config),
			emphasis,
		});
	}

	for link in input.links {
		let (Some(source), Some(target)) = (by_id.get(&link.a), by_id.get(&link.b)) else {
			continue;
		};
		let emphasis = match input.focused_text {
			None => Emphasis::Normal,
			Some(f) if source.text == f => Emphasis::Highlighted,
			Some(_) => Emphasis::Dimmed,
		};
		paths.push(ConnectorPath {
			kind: ConnectorKind::Thematic,
			from: source.id,
			to: target.id,
			d: thematic_path(source, target, input.geometry, config),
			stroke_width: stroke(config.thematic_stroke, emphasis, input.scale, config),
			emphasis,
		});
	}
	paths
}

fn stroke(base: f64, emphasis: Emphasis, scale: f64, config: &RoutingConfig) -> f64 {
	let width = match emphasis {
		Emphasis::Highlighted => base * config.emphasis_factor,
		_ => base,
	};
	width / scale
}

fn direction(delta: f64) -> f64 {
	if delta < 0.0 { -1.0 } else { 1.0 }
}

/// Parent bottom-center to child left-center.
fn structural_path(
	parent: &ThoughtNode,
	child: &ThoughtNode,
	geometry: &GeometryTracker,
	radius: f64,
) -> String {
	let ps = geometry.get(parent.id);
	let cs = geometry.get(child.id);
	let start = Position::new(parent.position.x + ps.width / 2.0, parent.position.y + ps.height);
	let end = Position::new(child.position.x, child.position.y + cs.height / 2.0);
	let (dx, dy) = (end.x - start.x, end.y - start.y);

	let mut path = PathData::move_to(start);
	if dy.abs() > radius {
		let (v, h) = (direction(dy), direction(dx));
		let r = radius.min(dx.abs());
		path.vertical(end.y - v * r);
		path.quad(Position::new(start.x, end.y), Position::new(start.x + h * r, end.y));
		path.horizontal(end.x);
	} else {
		path.quad(Position::new(start.x, end.y), end);
	}
	path.finish()
}

/// Source right-center to target left-center.
fn thematic_path(
	source: &ThoughtNode,
	target: &ThoughtNode,
	geometry: &GeometryTracker,
	config: &RoutingConfig,
) -> String {
	let ss = geometry.get(source.id);
	let ts = geometry.get(target.id);
	let start = Position::new(
		source.position.x + ss.width,
		source.position.y + ss.height / 2.0,
	);
	let end = Position::new(target.position.x, target.position.y + ts.height / 2.0);
	let (dx, dy) = (end.x - start.x, end.y - start.y);

	let mut path = PathData::move_to(start);
	if dx.hypot(dy) < config.proximity_threshold {
		path.line(end);
		return path.finish();
	}

	let (v, h) = (direction(dy), direction(dx));
	let mid_y = (start.y + end.y) / 2.0;
	let r = config.corner_radius.min(dy.abs() / 2.0).min(dx.abs() / 2.0);
	path.vertical(mid_y - v * r);
	path.quad(Position::new(start.x, mid_y), Position::new(start.x + h * r, mid_y));
	path.horizontal(end.x - h * r);
	path.quad(Position::new(end.x, mid_y), Position::new(end.x, mid_y + v * r));
	path.vertical(end.y);
	path.finish()
}

struct PathData(String);

impl PathData {
	fn move_to(p: Position) -> Self {
		Self(format!("M {} {}", p.x, p.y))
	}

	fn line(&mut self, p: Position) {
		let _ = write!(self.0, " L {} {}", p.x, p.y);
	}

	fn vertical(&mut self, y: f64) {
		let _ = write!(self.0, " V {}", y);
	}

	fn horizontal(&mut self, x: f64) {
		let _ = write!(self.0, " H {}", x);
	}

	fn quad(&mut self, control: Position, to: Position) {
		let _ = write!(self.0, " Q {} {} {} {}", control.x, control.y, to.x, to.y);
	}

	fn finish(self) -> String {
		self.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::geometry::NodeSize;
	use pretty_assertions::assert_eq;

	fn node(id: usize, parent: Option<usize>, text: &str, x: f64, y: f64) -> ThoughtNode {
		ThoughtNode {
			id: NodeId(id),
			parent_id: parent.map(NodeId),
			text: text.into(),
			depth: parent.map_or(0, |_| 1),
			is_linked: true,
			link_key: None,
			position: Position::new(x, y),
		}
	}

	fn route_all(
		nodes: &[ThoughtNode],
		links: &[ThematicLink],
		geometry: &GeometryTracker,
		focused_text: Option<&str>,
		scale: f64,
	) -> Vec<ConnectorPath> {
		let input = RouteInput {
			nodes,
			links,
			geometry,
			focused_text,
			scale,
		};
		route(&input, &RoutingConfig::default())
	}

	fn paths(routes: &[ConnectorPath]) -> Vec<&str> {
		routes.iter().map(|r| r.d.as_str()).collect()
	}

	#[test]
	fn structural_elbow_bends_toward_the_child() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let below = [node(0, None, "p", 40.0, 0.0), node(1, Some(0), "c", 300.0, 72.0)];
		let above = [node(0, None, "p", 40.0, 200.0), node(1, Some(0), "c", 300.0, 72.0)];

		assert_eq!(
			paths(&route_all(&below, &[], &geometry, None, 1.0)),
			vec!["M 140 48 V 84 Q 140 96 152 96 H 300"]
		);
		assert_eq!(
			paths(&route_all(&above, &[], &geometry, None, 1.0)),
			vec!["M 140 248 V 108 Q 140 96 152 96 H 300"]
		);
	}

	#[test]
	fn small_vertical_gap_is_a_single_corner() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let nodes = [node(0, None, "p", 40.0, 0.0), node(1, Some(0), "c", 300.0, 30.0)];

		assert_eq!(
			paths(&route_all(&nodes, &[], &geometry, None, 1.0)),
			vec!["M 140 48 Q 140 54 300 54"]
		);
	}

	#[test]
	fn measured_geometry_moves_the_anchors() {
		let mut geometry = GeometryTracker::new(NodeSize::default());
		geometry.on_node_mounted(NodeId(0), NodeSize::new(100.0, 20.0));
		let nodes = [node(0, None, "p", 40.0, 0.0), node(1, Some(0), "c", 300.0, 72.0)];

		assert_eq!(
			paths(&route_all(&nodes, &[], &geometry, None, 1.0)),
			vec!["M 90 20 V 84 Q 90 96 102 96 H 300"]
		);
	}

	#[test]
	fn close_thematic_anchors_get_a_straight_segment() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let nodes = [node(0, None, "x", 40.0, 0.0), node(1, None, "x", 300.0, 0.0)];
		let links = [ThematicLink::new(NodeId(0), NodeId(1))];

		let routes = route_all(&nodes, &links, &geometry, None, 1.0);
		assert_eq!(paths(&routes), vec!["M 240 24 L 300 24"]);
		assert_eq!(routes[0].kind, ConnectorKind::Thematic);
	}

	#[test]
	fn distant_thematic_anchors_get_a_two_corner_elbow() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let nodes = [node(0, None, "x", 40.0, 0.0), node(1, None, "x", 40.0, 144.0)];
		let links = [ThematicLink::new(NodeId(0), NodeId(1))];

		assert_eq!(
			paths(&route_all(&nodes, &links, &geometry, None, 1.0)),
			vec!["M 240 24 V 84 Q 240 96 228 96 H 52 Q 40 96 40 108 V 168"]
		);
	}

	#[test]
	fn stroke_width_is_constant_on_screen() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let nodes = [node(0, None, "p", 40.0, 0.0), node(1, Some(0), "c", 300.0, 72.0)];

		for scale in [0.5, 1.0, 2.0] {
			let routes = route_all(&nodes, &[], &geometry, None, scale);
			assert_eq!(routes[0].stroke_width * scale, 2.0);
		}
	}

	#[test]
	fn focus_dims_unrelated_edges_and_emphasizes_touching_ones() {
		let geometry = GeometryTracker::new(NodeSize::default());
		let nodes = [
			node(0, None, "seed", 40.0, 0.0),
			node(1, Some(0), "sprout", 300.0, 72.0),
			node(2, None, "rock", 40.0, 144.0),
			node(3, Some(2), "moss", 300.0, 216.0),
			node(4, None, "seed", 40.0, 288.0),
			node(5, None, "moss", 40.0, 360.0),
		];
		let links = [
			ThematicLink::new(NodeId(0), NodeId(4)),
			ThematicLink::new(NodeId(3), NodeId(5)),
		];

		let routes = route_all(&nodes, &links, &geometry, Some("seed"), 1.0);
		let emphasis: Vec<_> = routes.iter().map(|r| (r.from, r.to, r.emphasis)).collect();
		assert_eq!(
			emphasis,
			vec![
				(NodeId(0), NodeId(1), Emphasis::Highlighted),
				(NodeId(2), NodeId(3), Emphasis::Dimmed),
				(NodeId(0), NodeId(4), Emphasis::Highlighted),
				(NodeId(3), NodeId(5), Emphasis::Dimmed),
			]
		);
		assert_eq!(routes[0].stroke_width, 2.0 * 1.75);

		let unfocused = route_all(&nodes, &links, &geometry, None, 1.0);
		assert!(unfocused.iter().all(|r| r.emphasis == Emphasis::Normal));
	}
}

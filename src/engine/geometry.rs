//! Cache of measured node boxes used to anchor connectors.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use super::parser::NodeId;

/// Layout-pixel size of a rendered node.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeSize {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
}

impl NodeSize {
	/// Size of `width` x `height`.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	fn is_measurable(&self) -> bool {
		self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
	}
}

impl Default for NodeSize {
	fn default() -> Self {
		Self::new(200.0, 48.0)
	}
}

/// Last measured size per node, with a fallback for unmeasured ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryTracker {
	sizes: HashMap<NodeId, NodeSize>,
	fallback: NodeSize,
}

impl GeometryTracker {
	/// Empty cache answering `fallback` until nodes report in.
	pub fn new(fallback: NodeSize) -> Self {
		Self {
			sizes: HashMap::new(),
			fallback,
		}
	}

	/// Record a measurement. Returns `true` only when the cached size changed.
	///
	/// Zero or non-finite sizes (detached or hidden elements) are ignored so
	/// a measured entry never falls back to the default.
	pub fn on_node_mounted(&mut self, id: NodeId, size: NodeSize) -> bool {
		if !size.is_measurable() {
			return false;
		}
		match self.sizes.insert(id, size) {
			Some(prev) if prev == size => false,
			prev => {
				debug!("geometry {:?}: {:?} -> {:?}", id, prev, size);
				true
			}
		}
	}

	/// Measured size, or the fallback.
	pub fn get(&self, id: NodeId) -> NodeSize {
		self.sizes.get(&id).copied().unwrap_or(self.fallback)
	}

	/// `true` once a real measurement arrived.
	pub fn is_measured(&self, id: NodeId) -> bool {
		self.sizes.contains_key(&id)
	}

	/// Forget every measurement; ids are only stable within one parse pass.
	pub fn clear(&mut self) {
		self.sizes.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unknown_ids_get_the_default() {
		let tracker = GeometryTracker::new(NodeSize::default());
		assert_eq!(tracker.get(NodeId(7)), NodeSize::new(200.0, 48.0));
		assert!(!tracker.is_measured(NodeId(7)));
	}

	#[test]
	fn only_real_changes_are_reported() {
		let mut tracker = GeometryTracker::new(NodeSize::default());
		let id = NodeId(0);

		assert!(tracker.on_node_mounted(id, NodeSize::new(150.0, 40.0)));
		assert!(!tracker.on_node_mounted(id, NodeSize::new(150.0, 40.0)));
		assert!(tracker.on_node_mounted(id, NodeSize::new(150.0, 64.0)));
		assert_eq!(tracker.get(id), NodeSize::new(150.0, 64.0));
	}

	#[test]
	fn collapsed_measurements_never_regress_to_default() {
		let mut tracker = GeometryTracker::new(NodeSize::default());
		let id = NodeId(3);

		tracker.on_node_mounted(id, NodeSize::new(120.0, 36.0));
		assert!(!tracker.on_node_mounted(id, NodeSize::new(0.0, 0.0)));
		assert!(!tracker.on_node_mounted(id, NodeSize::new(f64::NAN, 10.0)));
		assert_eq!(tracker.get(id), NodeSize::new(120.0, 36.0));
	}
}

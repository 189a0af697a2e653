//! Pan/zoom state of the visualization surface.

use log::warn;

use super::config::ViewportConfig;
use super::parser::Position;

/// Screen = document * scale + translate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
	/// Zoom factor.
	pub scale: f64,
	/// Horizontal offset in screen pixels.
	pub translate_x: f64,
	/// Vertical offset in screen pixels.
	pub translate_y: f64,
}

impl ViewportTransform {
	/// Map a canvas point into document space.
	pub fn screen_to_document(&self, screen: Position) -> Position {
		Position::new(
			(screen.x - self.translate_x) / self.scale,
			(screen.y - self.translate_y) / self.scale,
		)
	}

	/// Map a document point onto the canvas.
	pub fn document_to_screen(&self, doc: Position) -> Position {
		Position::new(
			doc.x * self.scale + self.translate_x,
			doc.y * self.scale + self.translate_y,
		)
	}

	/// CSS transform for the node/edge layer.
	pub fn css(&self) -> String {
		format!(
			"translate({}px, {}px) scale({})",
			self.translate_x, self.translate_y, self.scale
		)
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct PanSession {
	origin_x: f64,
	origin_y: f64,
}

/// Zoom button direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
	/// Larger scale.
	In,
	/// Smaller scale.
	Out,
}

/// Owns the transform and the background pan session.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewportController {
	config: ViewportConfig,
	transform: ViewportTransform,
	pan: Option<PanSession>,
}

impl ViewportController {
	/// Controller at the reset transform. Bounds that fail validation are
	/// replaced by the defaults.
	pub fn new(config: ViewportConfig) -> Self {
		let config = match config.validate() {
			Ok(()) => config,
			Err(err) => {
				warn!("{}; using default viewport config", err);
				ViewportConfig::default()
			}
		};
		let mut viewport = Self {
			transform: ViewportTransform {
				scale: 1.0,
				translate_x: 0.0,
				translate_y: 0.0,
			},
			config,
			pan: None,
		};
		viewport.reset();
		viewport
	}

	/// Current transform.
	pub fn transform(&self) -> ViewportTransform {
		self.transform
	}

	/// Current scale.
	pub fn scale(&self) -> f64 {
		self.transform.scale
	}

	/// `true` while a pan session is open.
	pub fn is_panning(&self) -> bool {
		self.pan.is_some()
	}

	fn clamp_scale(&self, scale: f64) -> f64 {
		scale.max(self.config.min_scale).min(self.config.max_scale)
	}

	/// Wheel zoom keeping the document point under `cursor` in place.
	pub fn zoom_at(&mut self, cursor: Position, wheel_delta_y: f64) -> bool {
		let target = self.transform.scale - wheel_delta_y * self.config.wheel_sensitivity;
		self.zoom_to(self.clamp_scale(target), cursor)
	}

	/// Button zoom anchored on the center of a `width` x `height` viewport.
	pub fn zoom_step(&mut self, direction: ZoomDirection, width: f64, height: f64) -> bool {
		let step = match direction {
			ZoomDirection::In => self.config.button_step,
			ZoomDirection::Out => -self.config.button_step,
		};
		let target = self.clamp_scale(self.transform.scale + step);
		self.zoom_to(target, Position::new(width / 2.0, height / 2.0))
	}

	fn zoom_to(&mut self, new_scale: f64, anchor: Position) -> bool {
		let ViewportTransform {
			scale,
			translate_x,
			translate_y,
		} = self.transform;
		if new_scale == scale {
			return false;
		}
		let ratio = 1.0 - new_scale / scale;
		self.transform = ViewportTransform {
			scale: new_scale,
			translate_x: translate_x + (anchor.x - translate_x) * ratio,
			translate_y: translate_y + (anchor.y - translate_y) * ratio,
		};
		true
	}

	/// Start panning from `pointer` (canvas space).
	pub fn begin_pan(&mut self, pointer: Position) {
		self.pan = Some(PanSession {
			origin_x: pointer.x - self.transform.translate_x,
			origin_y: pointer.y - self.transform.translate_y,
		});
	}

	/// Move the surface with the pointer. Returns `false` when not panning.
	pub fn pan_to(&mut self, pointer: Position) -> bool {
		let Some(pan) = self.pan else {
			return false;
		};
		self.transform.translate_x = pointer.x - pan.origin_x;
		self.transform.translate_y = pointer.y - pan.origin_y;
		true
	}

	/// Close the pan session, if any.
	pub fn end_pan(&mut self) {
		self.pan = None;
	}

	/// Restore the default transform. Node positions are not touched.
	pub fn reset(&mut self) {
		self.pan = None;
		self.transform = ViewportTransform {
			scale: self.clamp_scale(self.config.default_scale),
			translate_x: self.config.default_x,
			translate_y: self.config.default_y,
		};
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	const EPS: f64 = 1e-9;

	fn viewport() -> ViewportController {
		ViewportController::new(ViewportConfig::default())
	}

	fn assert_close(a: Position, b: Position) {
		assert!((a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS, "{a:?} != {b:?}");
	}

	#[test]
	fn wheel_zoom_keeps_the_cursor_point_fixed() {
		let mut vp = viewport();
		vp.begin_pan(Position::new(0.0, 0.0));
		vp.pan_to(Position::new(-35.0, 120.0));
		vp.end_pan();

		let cursor = Position::new(312.0, 208.0);
		for delta in [-120.0, -240.0, 90.0, 500.0, -3000.0] {
			let under = vp.transform().screen_to_document(cursor);
			vp.zoom_at(cursor, delta);
			assert_close(vp.transform().document_to_screen(under), cursor);
		}
	}

	#[test]
	fn scale_is_clamped() {
		let mut vp = viewport();
		vp.zoom_at(Position::default(), -1.0e6);
		assert_eq!(vp.scale(), 3.0);
		assert!(!vp.zoom_at(Position::default(), -100.0));

		vp.zoom_at(Position::default(), 1.0e6);
		assert_eq!(vp.scale(), 0.2);
	}

	#[test]
	fn zero_min_scale_cannot_poison_the_transform() {
		let mut vp = ViewportController::new(ViewportConfig {
			min_scale: 0.0,
			..ViewportConfig::default()
		});
		vp.zoom_at(Position::new(50.0, 50.0), 1.0e6);
		vp.zoom_at(Position::new(50.0, 50.0), -100.0);

		let t = vp.transform();
		assert!((vp.scale() - 0.3).abs() < EPS);
		assert!(t.translate_x.is_finite() && t.translate_y.is_finite());
	}

	#[test]
	fn wheel_up_zooms_in() {
		let mut vp = viewport();
		vp.zoom_at(Position::new(100.0, 100.0), -100.0);
		assert!((vp.scale() - 1.1).abs() < EPS);
	}

	#[test]
	fn buttons_zoom_around_the_viewport_center() {
		let mut vp = viewport();
		let center = Position::new(400.0, 300.0);
		let under = vp.transform().screen_to_document(center);

		assert!(vp.zoom_step(ZoomDirection::In, 800.0, 600.0));
		assert!((vp.scale() - 1.2).abs() < EPS);
		assert_close(vp.transform().document_to_screen(under), center);

		vp.zoom_step(ZoomDirection::Out, 800.0, 600.0);
		vp.zoom_step(ZoomDirection::Out, 800.0, 600.0);
		assert!((vp.scale() - 0.8).abs() < EPS);
	}

	#[test]
	fn pan_follows_the_pointer() {
		let mut vp = viewport();
		assert!(!vp.pan_to(Position::new(10.0, 10.0)));

		vp.begin_pan(Position::new(100.0, 100.0));
		assert!(vp.is_panning());
		vp.pan_to(Position::new(130.0, 80.0));
		vp.pan_to(Position::new(150.0, 90.0));
		assert_eq!(vp.transform().translate_x, 50.0);
		assert_eq!(vp.transform().translate_y, 30.0);

		vp.end_pan();
		assert!(!vp.pan_to(Position::new(0.0, 0.0)));
		assert_eq!(vp.transform().translate_x, 50.0);
	}

	#[test]
	fn reset_is_the_same_from_any_state() {
		let fresh = viewport().transform();
		let mut vp = viewport();
		vp.zoom_at(Position::new(5.0, 9.0), -700.0);
		vp.begin_pan(Position::new(0.0, 0.0));
		vp.pan_to(Position::new(300.0, -20.0));

		vp.reset();
		assert_eq!(vp.transform(), fresh);
		assert!(!vp.is_panning());
		vp.reset();
		assert_eq!(vp.transform(), fresh);
	}
}

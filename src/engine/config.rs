//! Tunables for layout, viewport and connector routing.

use serde::Deserialize;

use super::geometry::NodeSize;

/// Rejected configuration input.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
	/// Not valid JSON for [`EngineConfig`].
	Json(String),
	/// Scale bounds or zoom steps that would break the transform.
	Viewport(String),
}

impl std::fmt::Display for ConfigError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			ConfigError::Json(err) => write!(f, "config json error: {}", err),
			ConfigError::Viewport(err) => write!(f, "invalid viewport config: {}", err),
		}
	}
}

impl std::error::Error for ConfigError {}

/// Parse-time placement of nodes.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Left offset of depth-zero nodes.
	pub base_indent: f64,
	/// Horizontal step per nesting level.
	pub depth_width: f64,
	/// Vertical step per visited node.
	pub row_spacing: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			base_indent: 40.0,
			depth_width: 260.0,
			row_spacing: 72.0,
		}
	}
}

/// Zoom bounds, reset transform and zoom input rates.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
	/// Smallest scale; must be positive.
	pub min_scale: f64,
	/// Largest scale; at least `min_scale`.
	pub max_scale: f64,
	/// Scale restored by reset.
	pub default_scale: f64,
	/// Horizontal translation restored by reset.
	pub default_x: f64,
	/// Vertical translation restored by reset.
	pub default_y: f64,
	/// Scale change per unit of wheel delta.
	pub wheel_sensitivity: f64,
	/// Scale change per zoom button press.
	pub button_step: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			min_scale: 0.2,
			max_scale: 3.0,
			default_scale: 1.0,
			default_x: 0.0,
			default_y: 40.0,
			wheel_sensitivity: 0.001,
			button_step: 0.2,
		}
	}
}

impl ViewportConfig {
	/// Check the bounds every zoom divides by.
	pub fn validate(&self) -> Result<(), ConfigError> {
		let Self {
			min_scale,
			max_scale,
			default_scale,
			default_x,
			default_y,
			wheel_sensitivity,
			button_step,
		} = *self;
		let finite = [
			("min_scale", min_scale),
			("max_scale", max_scale),
			("default_scale", default_scale),
			("default_x", default_x),
			("default_y", default_y),
			("wheel_sensitivity", wheel_sensitivity),
			("button_step", button_step),
		];
		if let Some((name, value)) = finite.iter().find(|(_, v)| !v.is_finite()) {
			return Err(ConfigError::Viewport(format!("{} is {}", name, value)));
		}
		if min_scale <= 0.0 {
			return Err(ConfigError::Viewport(format!(
				"min_scale must be positive, got {}",
				min_scale
			)));
		}
		if max_scale < min_scale {
			return Err(ConfigError::Viewport(format!(
				"max_scale {} is below min_scale {}",
				max_scale, min_scale
			)));
		}
		Ok(())
	}
}

/// Connector shapes and stroke widths.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
	/// Radius of rounded elbows.
	pub corner_radius: f64,
	/// Thematic anchors closer than this are joined by a straight segment.
	pub proximity_threshold: f64,
	/// Parent-child stroke width at scale 1.
	pub structural_stroke: f64,
	/// Link stroke width at scale 1.
	pub thematic_stroke: f64,
	/// Stroke multiplier for highlighted connectors.
	pub emphasis_factor: f64,
}

impl Default for RoutingConfig {
	fn default() -> Self {
		Self {
			corner_radius: 12.0,
			proximity_threshold: 100.0,
			structural_stroke: 2.0,
			thematic_stroke: 2.0,
			emphasis_factor: 1.75,
		}
	}
}

/// Everything a visualization instance can be tuned with.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
	/// Parse-time placement.
	pub layout: LayoutConfig,
	/// Pan and zoom.
	pub viewport: ViewportConfig,
	/// Connector routing.
	pub routing: RoutingConfig,
	/// Size assumed for nodes not yet measured.
	pub default_geometry: NodeSize,
}

impl EngineConfig {
	/// Decode partial overrides on top of the defaults and validate them.
	pub fn from_json(input: &str) -> Result<Self, ConfigError> {
		let config: Self =
			serde_json::from_str(input).map_err(|err| ConfigError::Json(err.to_string()))?;
		config.viewport.validate()?;
		Ok(config)
	}
}

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::filter::CategoryFilter;
use super::style::Color;

/// Tuning knobs for geometry and interaction. Every field has a default, so
/// a partial JSON object is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
	pub zoom_min: f64,
	pub zoom_max: f64,
	pub zoom_in_factor: f64,
	pub zoom_out_factor: f64,
	/// Wheel notch factor; inverted for scrolling down.
	pub wheel_zoom_factor: f64,
	/// Hit radius in model units at zoom 1.
	pub hit_radius: f64,
	pub base_radius: f64,
	/// Extra radius added at 100% activity.
	pub activity_radius: f64,
	/// Labels are hidden at or below this zoom.
	pub label_min_zoom: f64,
	/// Name font size in screen pixels at zoom 1.
	pub label_font_px: f64,
	/// Smallest on-screen font size labels shrink to.
	pub min_font_px: f64,
	/// Pointer travel, in pixels, that turns a press into a pan.
	pub drag_threshold: f64,
	pub background: Color,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			zoom_min: 0.3,
			zoom_max: 3.0,
			zoom_in_factor: 1.2,
			zoom_out_factor: 0.8,
			wheel_zoom_factor: 1.1,
			hit_radius: 25.0,
			base_radius: 20.0,
			activity_radius: 10.0,
			label_min_zoom: 0.5,
			label_font_px: 12.0,
			min_font_px: 9.0,
			drag_threshold: 3.0,
			background: Color::rgb(0x0f, 0x17, 0x2a),
		}
	}
}

impl EngineConfig {
	pub fn from_json(json: &str) -> Result<Self, EngineError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), EngineError> {
		if !(self.zoom_min > 0.0) {
			return Err(EngineError::InvalidConfig(format!(
				"zoomMin must be positive, got {}",
				self.zoom_min
			)));
		}
		if !(self.zoom_max >= self.zoom_min) {
			return Err(EngineError::InvalidConfig(format!(
				"zoomMax ({}) is below zoomMin ({})",
				self.zoom_max, self.zoom_min
			)));
		}
		if !(self.hit_radius > 0.0) {
			return Err(EngineError::InvalidConfig(format!(
				"hitRadius must be positive, got {}",
				self.hit_radius
			)));
		}
		if !(self.zoom_in_factor > 0.0 && self.zoom_out_factor > 0.0 && self.wheel_zoom_factor > 0.0)
		{
			return Err(EngineError::InvalidConfig(
				"zoom factors must be positive".into(),
			));
		}
		Ok(())
	}

	/// Non-finite input falls back to the default zoom of 1.
	pub fn clamp_zoom(&self, zoom: f64) -> f64 {
		let zoom = if zoom.is_finite() { zoom } else { 1.0 };
		zoom.clamp(self.zoom_min, self.zoom_max)
	}
}

/// Initial view overrides supplied by the host.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewOptions {
	pub zoom: f64,
	pub show_labels: bool,
	pub show_edges: bool,
	pub category_filter: CategoryFilter,
	pub is_playing: bool,
}

impl Default for ViewOptions {
	fn default() -> Self {
		Self {
			zoom: 1.0,
			show_labels: true,
			show_edges: true,
			category_filter: CategoryFilter::All,
			is_playing: true,
		}
	}
}

impl ViewOptions {
	pub fn from_json(json: &str) -> Result<Self, EngineError> {
		Ok(serde_json::from_str(json)?)
	}
}

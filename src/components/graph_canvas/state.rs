use log::warn;

use super::config::{EngineConfig, ViewOptions};
use super::filter::CategoryFilter;
use super::geometry::Point;
use super::scene::SceneModel;

/// All mutable view state of one engine instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewState {
	pub zoom: f64,
	/// Offset in screen pixels.
	pub pan: Point,
	pub selected_id: Option<String>,
	pub hovered_id: Option<String>,
	pub show_labels: bool,
	pub show_edges: bool,
	pub category_filter: CategoryFilter,
	pub is_playing: bool,
}

impl Default for ViewState {
	fn default() -> Self {
		Self::from_options(&ViewOptions::default(), &EngineConfig::default())
	}
}

impl ViewState {
	pub fn from_options(options: &ViewOptions, config: &EngineConfig) -> Self {
		let zoom = config.clamp_zoom(options.zoom);
		if zoom != options.zoom {
			warn!("initial zoom {} clamped to {}", options.zoom, zoom);
		}
		Self {
			zoom,
			pan: Point::ORIGIN,
			selected_id: None,
			hovered_id: None,
			show_labels: options.show_labels,
			show_edges: options.show_edges,
			category_filter: options.category_filter,
			is_playing: options.is_playing,
		}
	}

	/// Multiplies zoom by `factor` and clamps the result.
	pub fn zoom_by(&mut self, factor: f64, config: &EngineConfig) {
		self.zoom = config.clamp_zoom(self.zoom * factor);
	}

	pub fn zoom_in(&mut self, config: &EngineConfig) {
		self.zoom_by(config.zoom_in_factor, config);
	}

	pub fn zoom_out(&mut self, config: &EngineConfig) {
		self.zoom_by(config.zoom_out_factor, config);
	}

	/// Zooms around a screen point so the model point under it stays put.
	pub fn zoom_at(&mut self, anchor: Point, center: Point, factor: f64, config: &EngineConfig) {
		let model = (anchor - center - self.pan) / self.zoom;
		self.zoom_by(factor, config);
		self.pan = anchor - center - model * self.zoom;
	}

	pub fn pan_by(&mut self, delta: Point) {
		self.pan += delta;
	}

	pub fn reset_view(&mut self) {
		self.zoom = 1.0;
		self.pan = Point::ORIGIN;
	}

	pub fn toggle_labels(&mut self) {
		self.show_labels = !self.show_labels;
	}

	pub fn toggle_edges(&mut self) {
		self.show_edges = !self.show_edges;
	}

	pub fn toggle_playing(&mut self) {
		self.is_playing = !self.is_playing;
	}

	pub fn is_selected(&self, id: &str) -> bool {
		self.selected_id.as_deref() == Some(id)
	}

	pub fn is_hovered(&self, id: &str) -> bool {
		self.hovered_id.as_deref() == Some(id)
	}

	/// Drops selection and hover that no longer point at a visible node.
	pub fn retain_visible(&mut self, scene: &SceneModel) {
		if self
			.selected_id
			.as_deref()
			.is_some_and(|id| !scene.is_visible(id))
		{
			self.selected_id = None;
		}
		if self
			.hovered_id
			.as_deref()
			.is_some_and(|id| !scene.is_visible(id))
		{
			self.hovered_id = None;
		}
	}
}

/// Background drag in progress.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start: Point,
	pub pan_start: Point,
	/// Set once the pointer travelled past the drag threshold; the click
	/// that follows the release is then swallowed.
	pub moved: bool,
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn zoom_stays_clamped_under_any_sequence() {
		let config = EngineConfig::default();
		let mut view = ViewState::default();
		for step in 0..200 {
			if (step / 7) % 2 == 0 {
				view.zoom_in(&config);
			} else {
				view.zoom_out(&config);
			}
			assert!(view.zoom >= config.zoom_min && view.zoom <= config.zoom_max);
		}
		for _ in 0..50 {
			view.zoom_in(&config);
		}
		assert_eq!(view.zoom, 3.0);
		for _ in 0..50 {
			view.zoom_out(&config);
		}
		assert_eq!(view.zoom, 0.3);
	}

	#[test]
	fn reset_restores_identity() {
		let config = EngineConfig::default();
		let mut view = ViewState::default();
		view.zoom_in(&config);
		view.pan_by(Point::new(40.0, -12.0));
		view.reset_view();
		assert_eq!(view.zoom, 1.0);
		assert_eq!(view.pan, Point::ORIGIN);
	}

	#[test]
	fn zoom_at_keeps_anchor_fixed() {
		let config = EngineConfig::default();
		let mut view = ViewState::default();
		view.pan = Point::new(15.0, 5.0);
		let center = Point::new(400.0, 300.0);
		let anchor = Point::new(520.0, 250.0);
		let before = (anchor - center - view.pan) / view.zoom;
		view.zoom_at(anchor, center, 1.1, &config);
		let after = (anchor - center - view.pan) / view.zoom;
		assert!((before.x - after.x).abs() < 1e-9);
		assert!((before.y - after.y).abs() < 1e-9);
	}

	#[test]
	fn initial_zoom_override_is_clamped() {
		let options = ViewOptions {
			zoom: 10.0,
			..ViewOptions::default()
		};
		let view = ViewState::from_options(&options, &EngineConfig::default());
		assert_eq!(view.zoom, 3.0);
	}
}

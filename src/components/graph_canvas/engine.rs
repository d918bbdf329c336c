use log::debug;

use super::config::{EngineConfig, ViewOptions};
use super::error::EngineError;
use super::filter::CategoryFilter;
use super::geometry::{Point, Size};
use super::interaction::InteractionController;
use super::render;
use super::scene::SceneModel;
use super::state::ViewState;
use super::surface::DrawSurface;
use super::types::{GraphData, NodeMetrics, Status};
use super::viewport::ViewportTransform;

/// Read-only facts about one node, for tooltips and detail panes.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeSummary {
	pub id: String,
	pub name: String,
	pub category: &'static str,
	pub status: Status,
	pub connections: usize,
	pub metrics: NodeMetrics,
}

/// One independent graph view: scene, view state, input handling and the
/// surface it draws on.
pub struct GraphEngine<S: DrawSurface> {
	config: EngineConfig,
	scene: SceneModel,
	view: ViewState,
	interaction: InteractionController,
	surface: S,
}

impl<S: DrawSurface> GraphEngine<S> {
	/// Fails without side effects if the configuration is unusable.
	pub fn new(surface: S, config: EngineConfig, options: &ViewOptions) -> Result<Self, EngineError> {
		config.validate()?;
		let view = ViewState::from_options(options, &config);
		let scene = SceneModel::new(GraphData::default(), view.category_filter);
		let interaction = InteractionController::new(config.hit_radius, config.drag_threshold);
		Ok(Self {
			config,
			scene,
			view,
			interaction,
			surface,
		})
	}

	pub fn set_on_node_click(&mut self, callback: impl FnMut(&str) + 'static) {
		self.interaction.set_on_click(Some(Box::new(callback)));
	}

	pub fn config(&self) -> &EngineConfig {
		&self.config
	}

	pub fn scene(&self) -> &SceneModel {
		&self.scene
	}

	pub fn view(&self) -> &ViewState {
		&self.view
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn surface_mut(&mut self) -> &mut S {
		&mut self.surface
	}

	pub fn transform(&self) -> ViewportTransform {
		ViewportTransform::new(&self.view, self.surface.size().center())
	}

	pub fn set_data(&mut self, data: GraphData) {
		debug!(
			"graph data replaced: {} nodes, {} edges",
			data.nodes.len(),
			data.edges.len()
		);
		self.scene.replace(data);
		self.view.retain_visible(&self.scene);
	}

	pub fn set_category_filter(&mut self, filter: CategoryFilter) {
		if self.view.category_filter == filter {
			return;
		}
		debug!("category filter set to {filter}");
		self.view.category_filter = filter;
		self.scene.set_filter(filter);
		self.view.retain_visible(&self.scene);
	}

	pub fn render_frame(&mut self, timestamp: f64) {
		render::render(
			&self.scene,
			&self.view,
			&self.config,
			&mut self.surface,
			timestamp,
		);
	}

	/// New surface size; the transform re-centers on the next frame while
	/// pan and zoom are kept.
	pub fn resize(&mut self, size: Size) {
		self.surface.resize(size);
	}

	pub fn zoom_in(&mut self) {
		self.view.zoom_in(&self.config);
	}

	pub fn zoom_out(&mut self) {
		self.view.zoom_out(&self.config);
	}

	pub fn reset_view(&mut self) {
		self.view.reset_view();
	}

	pub fn toggle_labels(&mut self) {
		self.view.toggle_labels();
	}

	pub fn toggle_edges(&mut self) {
		self.view.toggle_edges();
	}

	pub fn toggle_playing(&mut self) {
		self.view.toggle_playing();
	}

	/// Wheel zoom anchored at the pointer. Negative `delta_y` zooms in.
	pub fn wheel(&mut self, screen: Point, delta_y: f64) {
		let factor = if delta_y > 0.0 {
			1.0 / self.config.wheel_zoom_factor
		} else {
			self.config.wheel_zoom_factor
		};
		let center = self.surface.size().center();
		self.view.zoom_at(screen, center, factor, &self.config);
	}

	/// Presses on the background start a pan; presses on a node wait for
	/// the click.
	pub fn pointer_down(&mut self, screen: Point) {
		self.interaction.press();
		let transform = self.transform();
		if self
			.interaction
			.node_at(&self.scene, &transform, screen)
			.is_none()
		{
			self.interaction.begin_pan(&self.view, screen);
		}
	}

	/// Pans while dragging, otherwise updates hover. Returns whether the
	/// view changed.
	pub fn pointer_move(&mut self, screen: Point) -> bool {
		if self.interaction.is_panning() {
			return self.interaction.drag_to(&mut self.view, screen);
		}
		let before = self.view.hovered_id.clone();
		let transform = self.transform();
		let after = self
			.interaction
			.hover(&self.scene, &transform, &mut self.view, screen);
		before != after
	}

	pub fn pointer_up(&mut self) {
		self.interaction.end_pan();
	}

	/// Selects (and reports) the node under the pointer, or clears the
	/// selection. A click ending a pan is ignored.
	pub fn pointer_click(&mut self, screen: Point) -> Option<String> {
		if self.interaction.take_drag_release() {
			return self.view.selected_id.clone();
		}
		let transform = self.transform();
		self.interaction
			.click(&self.scene, &transform, &mut self.view, screen)
	}

	pub fn pointer_leave(&mut self) {
		self.interaction.leave(&mut self.view);
	}

	pub fn node_summary(&self, id: &str) -> Option<NodeSummary> {
		let node = self.scene.visible_node(id)?;
		Some(NodeSummary {
			id: node.id.clone(),
			name: node.name.clone(),
			category: node.category.label(),
			status: node.status,
			connections: node.connected_ids.len(),
			metrics: node.metrics,
		})
	}

	pub fn hovered_summary(&self) -> Option<NodeSummary> {
		self.view
			.hovered_id
			.as_deref()
			.and_then(|id| self.node_summary(id))
	}
}

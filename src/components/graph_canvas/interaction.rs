use log::debug;

use super::geometry::Point;
use super::scene::SceneModel;
use super::state::{PanState, ViewState};
use super::types::GraphNode;
use super::viewport::ViewportTransform;

/// Invoked with the id of a clicked node.
pub type ClickCallback = Box<dyn FnMut(&str)>;

/// Nearest visible node within `hit_radius / zoom` model units of the
/// pointer. The hit target keeps a roughly constant size on screen.
pub fn hit_test<'a>(
	scene: &'a SceneModel,
	transform: &ViewportTransform,
	screen: Point,
	hit_radius: f64,
) -> Option<&'a GraphNode> {
	let model = transform.to_model(screen);
	let limit = hit_radius / transform.zoom;
	scene
		.visible_nodes()
		.map(|node| (node, node.position.distance(model)))
		.filter(|(_, dist)| *dist < limit)
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(node, _)| node)
}

/// Turns pointer input into selection, hover and pan updates.
pub struct InteractionController {
	hit_radius: f64,
	drag_threshold: f64,
	on_click: Option<ClickCallback>,
	pan: PanState,
}

impl InteractionController {
	pub fn new(hit_radius: f64, drag_threshold: f64) -> Self {
		Self {
			hit_radius,
			drag_threshold,
			on_click: None,
			pan: PanState::default(),
		}
	}

	pub fn set_on_click(&mut self, callback: Option<ClickCallback>) {
		self.on_click = callback;
	}

	pub fn node_at<'a>(
		&self,
		scene: &'a SceneModel,
		transform: &ViewportTransform,
		screen: Point,
	) -> Option<&'a GraphNode> {
		hit_test(scene, transform, screen, self.hit_radius)
	}

	/// Selects the node under the pointer, or clears the selection on a
	/// miss. The click callback only fires on a hit.
	pub fn click(
		&mut self,
		scene: &SceneModel,
		transform: &ViewportTransform,
		view: &mut ViewState,
		screen: Point,
	) -> Option<String> {
		let hit = self.node_at(scene, transform, screen).map(|n| n.id.clone());
		debug!("click at ({}, {}) -> {:?}", screen.x, screen.y, hit);
		view.selected_id = hit.clone();
		if let (Some(id), Some(callback)) = (hit.as_deref(), self.on_click.as_mut()) {
			callback(id);
		}
		hit
	}

	/// Updates hover; selection is left alone.
	pub fn hover(
		&mut self,
		scene: &SceneModel,
		transform: &ViewportTransform,
		view: &mut ViewState,
		screen: Point,
	) -> Option<String> {
		let hit = self.node_at(scene, transform, screen).map(|n| n.id.clone());
		view.hovered_id = hit.clone();
		hit
	}

	pub fn leave(&mut self, view: &mut ViewState) {
		view.hovered_id = None;
		self.pan.active = false;
		// No release click follows a drag that left the canvas.
		self.pan.moved = false;
	}

	/// Forgets a previous drag at the start of a new press, so a stale
	/// release never swallows the next click.
	pub fn press(&mut self) {
		self.pan.moved = false;
	}

	pub fn begin_pan(&mut self, view: &ViewState, screen: Point) {
		self.pan = PanState {
			active: true,
			start: screen,
			pan_start: view.pan,
			moved: false,
		};
	}

	pub fn is_panning(&self) -> bool {
		self.pan.active
	}

	/// Moves the view with the pointer while a pan is active. Returns
	/// whether the view changed.
	pub fn drag_to(&mut self, view: &mut ViewState, screen: Point) -> bool {
		if !self.pan.active {
			return false;
		}
		let delta = screen - self.pan.start;
		if !self.pan.moved && delta.length() < self.drag_threshold {
			return false;
		}
		self.pan.moved = true;
		view.pan = self.pan.pan_start + delta;
		true
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// True exactly once after a press that turned into a pan, so the click
	/// the browser fires on release can be ignored.
	pub fn take_drag_release(&mut self) -> bool {
		std::mem::take(&mut self.pan.moved)
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::graph_canvas::filter::CategoryFilter;
	use crate::components::graph_canvas::types::{Category, GraphData, NodeMetrics, Status};

	const CENTER: Point = Point::new(400.0, 300.0);

	fn node(id: &str, x: f64, y: f64) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: id.into(),
			category: Category::Security,
			status: Status::Active,
			position: Point::new(x, y),
			connected_ids: Vec::new(),
			metrics: NodeMetrics::default(),
		}
	}

	fn scene() -> SceneModel {
		SceneModel::new(
			GraphData {
				nodes: vec![node("a", 0.0, 0.0), node("b", 40.0, 0.0)],
				edges: Vec::new(),
			},
			CategoryFilter::All,
		)
	}

	#[test]
	fn nearest_node_wins() {
		let scene = scene();
		let transform = ViewportTransform::new(&ViewState::default(), CENTER);
		let hit = hit_test(&scene, &transform, Point::new(425.0, 300.0), 25.0);
		assert_eq!(hit.map(|n| n.id.as_str()), Some("b"));
		let hit = hit_test(&scene, &transform, Point::new(415.0, 300.0), 25.0);
		assert_eq!(hit.map(|n| n.id.as_str()), Some("a"));
	}

	#[test]
	fn hit_radius_shrinks_in_model_space_when_zoomed_in() {
		let scene = scene();
		let view = ViewState {
			zoom: 2.0,
			..ViewState::default()
		};
		let transform = ViewportTransform::new(&view, CENTER);
		// 20 px on screen is 10 model units at zoom 2, inside 25 / 2.
		assert!(hit_test(&scene, &transform, Point::new(400.0, 320.0), 25.0).is_some());
		// 30 px on screen is 15 model units, outside 12.5.
		assert!(hit_test(&scene, &transform, Point::new(400.0, 330.0), 25.0).is_none());
	}

	#[test]
	fn hover_never_touches_selection_or_callback() {
		let scene = scene();
		let transform = ViewportTransform::new(&ViewState::default(), CENTER);
		let calls = Rc::new(RefCell::new(Vec::<String>::new()));
		let sink = calls.clone();
		let mut controller = InteractionController::new(25.0, 3.0);
		controller.set_on_click(Some(Box::new(move |id: &str| {
			sink.borrow_mut().push(id.into())
		})));

		let mut view = ViewState {
			selected_id: Some("b".into()),
			..ViewState::default()
		};
		assert_eq!(
			controller.hover(&scene, &transform, &mut view, CENTER),
			Some("a".into())
		);
		assert_eq!(view.hovered_id.as_deref(), Some("a"));
		assert_eq!(view.selected_id.as_deref(), Some("b"));

		controller.hover(&scene, &transform, &mut view, Point::new(0.0, 0.0));
		assert_eq!(view.hovered_id, None);
		assert_eq!(view.selected_id.as_deref(), Some("b"));

		controller.hover(&scene, &transform, &mut view, CENTER);
		controller.leave(&mut view);
		assert_eq!(view.hovered_id, None);
		assert_eq!(view.selected_id.as_deref(), Some("b"));
		assert!(calls.borrow().is_empty());
	}

	#[test]
	fn small_jitter_is_not_a_pan() {
		let mut controller = InteractionController::new(25.0, 3.0);
		let mut view = ViewState::default();
		controller.begin_pan(&view, Point::new(100.0, 100.0));
		assert!(!controller.drag_to(&mut view, Point::new(101.0, 101.0)));
		controller.end_pan();
		assert!(!controller.take_drag_release());
		assert_eq!(view.pan, Point::ORIGIN);
	}

	#[test]
	fn drag_pans_and_swallows_one_click() {
		let mut controller = InteractionController::new(25.0, 3.0);
		let mut view = ViewState::default();
		controller.begin_pan(&view, Point::new(100.0, 100.0));
		assert!(controller.drag_to(&mut view, Point::new(130.0, 90.0)));
		controller.end_pan();
		assert_eq!(view.pan, Point::new(30.0, -10.0));
		assert!(!controller.is_panning());
		assert!(controller.take_drag_release());
		assert!(!controller.take_drag_release());
	}

	#[test]
	fn drag_that_leaves_the_canvas_swallows_nothing() {
		let mut controller = InteractionController::new(25.0, 3.0);
		let mut view = ViewState::default();
		controller.begin_pan(&view, Point::new(100.0, 100.0));
		assert!(controller.drag_to(&mut view, Point::new(10.0, 10.0)));
		controller.end_pan();
		controller.leave(&mut view);
		assert!(!controller.take_drag_release());
	}

	#[test]
	fn new_press_forgets_stale_drag() {
		let mut controller = InteractionController::new(25.0, 3.0);
		let mut view = ViewState::default();
		controller.begin_pan(&view, Point::new(100.0, 100.0));
		assert!(controller.drag_to(&mut view, Point::new(60.0, 100.0)));
		controller.end_pan();
		controller.press();
		assert!(!controller.take_drag_release());
	}
}

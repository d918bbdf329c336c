use std::cell::RefCell;
use std::rc::Rc;

use node_graph_canvas::graph_canvas::interaction::hit_test;
use node_graph_canvas::graph_canvas::{
	AnimationScheduler, Category, CategoryFilter, DrawCommand, EdgeKind, EngineConfig,
	EngineError, FrameRequester, GraphData, GraphEdge, GraphEngine, GraphNode, NodeMetrics,
	Point, RecordingSurface, SchedulerState, Size, Status, ViewOptions, ViewportTransform,
	visible_nodes,
};
use pretty_assertions::assert_eq;

fn node(id: &str, category: Category, x: f64, y: f64) -> GraphNode {
	GraphNode {
		id: id.into(),
		name: id.into(),
		category,
		status: Status::Active,
		position: Point::new(x, y),
		connected_ids: Vec::new(),
		metrics: NodeMetrics::default(),
	}
}

fn edge(from: &str, to: &str, strength: f64) -> GraphEdge {
	GraphEdge {
		from_id: from.into(),
		to_id: to.into(),
		strength,
		kind: EdgeKind::Collaboration,
	}
}

fn two_node_engine() -> GraphEngine<RecordingSurface> {
	let mut engine = GraphEngine::new(
		RecordingSurface::new(Size::new(800.0, 600.0)),
		EngineConfig::default(),
		&ViewOptions::default(),
	)
	.unwrap();
	engine.set_data(GraphData {
		nodes: vec![
			node("A", Category::Infrastructure, 0.0, 0.0),
			node("B", Category::Database, 100.0, 0.0),
		],
		edges: vec![edge("A", "B", 0.8)],
	});
	engine
}

#[test]
fn scenario_a_two_active_nodes_render_at_expected_pixels() {
	let mut engine = two_node_engine();
	let transform = engine.transform();
	assert_eq!(transform.to_screen(Point::new(0.0, 0.0)), Point::new(400.0, 300.0));
	assert_eq!(transform.to_screen(Point::new(100.0, 0.0)), Point::new(500.0, 300.0));

	engine.render_frame(1234.0);
	let surface = engine.surface();
	let applied: Vec<ViewportTransform> = surface
		.commands()
		.iter()
		.filter_map(|c| match c {
			DrawCommand::Transform(t) => Some(*t),
			_ => None,
		})
		.collect();
	assert_eq!(applied.len(), 1);
	assert_eq!(applied[0].origin(), Point::new(400.0, 300.0));
	assert_eq!(applied[0].zoom, 1.0);

	let curves: Vec<_> = surface.curves().collect();
	assert_eq!(curves.len(), 1);
	let (curve, stroke) = curves[0];
	assert_eq!(curve.from, Point::new(0.0, 0.0));
	assert_eq!(curve.to, Point::new(100.0, 0.0));
	assert!((curve.bow() - 30.0).abs() < 1e-9);
	assert!((stroke.width - 2.4).abs() < 1e-9);
	assert_eq!(stroke.opacity, 0.6);
	assert_ne!(stroke.from, stroke.to);
}

#[test]
fn scenario_b_click_selects_then_miss_clears_without_callback() {
	let mut engine = two_node_engine();
	let clicks = Rc::new(RefCell::new(Vec::<String>::new()));
	let sink = clicks.clone();
	engine.set_on_node_click(move |id| sink.borrow_mut().push(id.to_owned()));

	assert_eq!(engine.pointer_click(Point::new(400.0, 300.0)), Some("A".into()));
	assert_eq!(engine.view().selected_id.as_deref(), Some("A"));
	assert_eq!(*clicks.borrow(), vec!["A".to_string()]);

	assert_eq!(engine.pointer_click(Point::new(400.0, 500.0)), None);
	assert_eq!(engine.view().selected_id, None);
	assert_eq!(clicks.borrow().len(), 1);
}

#[derive(Default)]
struct CountingFrames {
	requested: u32,
	cancelled: u32,
}

impl FrameRequester for CountingFrames {
	type Handle = u32;

	fn request_frame(&mut self) -> Result<u32, EngineError> {
		self.requested += 1;
		Ok(self.requested)
	}

	fn cancel_frame(&mut self, _handle: u32) {
		self.cancelled += 1;
	}
}

#[test]
fn scenario_c_double_stop_is_safe() {
	let mut scheduler = AnimationScheduler::new(CountingFrames::default());
	scheduler.start();
	scheduler.stop();
	scheduler.stop();
	assert_eq!(scheduler.state(), SchedulerState::Stopped);
	assert_eq!(scheduler.requester().cancelled, 1);
}

#[test]
fn scheduler_drives_engine_frames_until_stopped() {
	let mut engine = two_node_engine();
	let mut scheduler = AnimationScheduler::new(CountingFrames::default());
	scheduler.sync(engine.view().is_playing);
	assert!(scheduler.is_running());

	for t in [16.0, 32.0, 48.0] {
		assert!(scheduler.on_frame(|| engine.render_frame(t)));
	}
	engine.toggle_playing();
	scheduler.sync(engine.view().is_playing);
	assert!(!scheduler.on_frame(|| engine.render_frame(64.0)));
	assert_eq!(scheduler.requester().requested, 4);
	assert_eq!(scheduler.requester().cancelled, 1);
}

#[test]
fn pointer_on_a_node_always_hits_it_at_any_zoom() {
	let config = EngineConfig::default();
	let data = GraphData {
		nodes: vec![
			node("a", Category::Learner, -300.0, 120.0),
			node("b", Category::Security, 0.0, 0.0),
			node("c", Category::Analytics, 250.0, -90.0),
		],
		edges: Vec::new(),
	};
	let scene = node_graph_canvas::graph_canvas::scene::SceneModel::new(data, CategoryFilter::All);
	let center = Point::new(640.0, 360.0);

	for zoom in [0.3, 0.5, 1.0, 1.44, 2.2, 3.0] {
		let view = node_graph_canvas::graph_canvas::ViewState {
			zoom,
			pan: Point::new(37.0, -18.0),
			..Default::default()
		};
		let transform = ViewportTransform::new(&view, center);
		for n in scene.visible_nodes() {
			let screen = transform.to_screen(n.position);
			let hit = hit_test(&scene, &transform, screen, config.hit_radius);
			assert_eq!(hit.map(|h| h.id.as_str()), Some(n.id.as_str()));
		}
		// Well away from every node in model space.
		let far = transform.to_screen(Point::new(0.0, 400.0));
		assert!(hit_test(&scene, &transform, far, config.hit_radius).is_none());
	}
}

#[test]
fn filtering_returns_exact_subset_and_blocks_selection() {
	let nodes = vec![
		node("db1", Category::Database, 0.0, 0.0),
		node("web", Category::ApiLayer, 200.0, 0.0),
		node("db2", Category::Database, -200.0, 0.0),
	];
	let subset: Vec<&str> = visible_nodes(&nodes, CategoryFilter::Only(Category::Database))
		.into_iter()
		.map(|n| n.id.as_str())
		.collect();
	assert_eq!(subset, vec!["db1", "db2"]);

	let mut engine = GraphEngine::new(
		RecordingSurface::new(Size::new(800.0, 600.0)),
		EngineConfig::default(),
		&ViewOptions::default(),
	)
	.unwrap();
	engine.set_data(GraphData {
		nodes,
		edges: Vec::new(),
	});
	assert_eq!(engine.pointer_click(Point::new(600.0, 300.0)), Some("web".into()));
	engine.set_category_filter("database".parse().unwrap());
	assert_eq!(engine.view().selected_id, None);
	assert_eq!(engine.pointer_click(Point::new(600.0, 300.0)), None);
}

#[test]
fn edges_to_unknown_nodes_are_omitted() {
	let mut engine = two_node_engine();
	engine.set_data(GraphData {
		nodes: vec![
			node("A", Category::Infrastructure, 0.0, 0.0),
			node("B", Category::Database, 100.0, 0.0),
		],
		edges: vec![edge("A", "ghost", 1.0), edge("A", "B", 0.5), edge("nobody", "B", 1.0)],
	});
	engine.render_frame(0.0);
	let curves: Vec<_> = engine.surface().curves().collect();
	assert_eq!(curves.len(), 1);
	assert_eq!(curves[0].0.to, Point::new(100.0, 0.0));
}

#[test]
fn reset_view_always_restores_identity() {
	let mut engine = two_node_engine();
	engine.zoom_in();
	engine.zoom_in();
	engine.wheel(Point::new(10.0, 10.0), -3.0);
	engine.pointer_down(Point::new(50.0, 50.0));
	engine.pointer_move(Point::new(90.0, 70.0));
	engine.pointer_up();
	engine.reset_view();
	assert_eq!(engine.view().zoom, 1.0);
	assert_eq!(engine.view().pan, Point::ORIGIN);
}

#[test]
fn initial_overrides_apply() {
	let options = ViewOptions::from_json(
		r#"{ "zoom": 2.0, "showLabels": false, "categoryFilter": "database", "isPlaying": false }"#,
	)
	.unwrap();
	let mut engine = GraphEngine::new(
		RecordingSurface::new(Size::new(800.0, 600.0)),
		EngineConfig::default(),
		&options,
	)
	.unwrap();
	engine.set_data(GraphData {
		nodes: vec![
			node("A", Category::Infrastructure, 0.0, 0.0),
			node("B", Category::Database, 100.0, 0.0),
		],
		edges: vec![edge("A", "B", 0.8)],
	});
	assert_eq!(engine.view().zoom, 2.0);
	assert!(!engine.view().is_playing);
	assert_eq!(engine.scene().visible_count(), 1);

	engine.render_frame(0.0);
	assert_eq!(engine.surface().texts().count(), 0);
	assert_eq!(engine.surface().curves().count(), 0);
}

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use leptos::html::Canvas;
use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::canvas::Canvas2dSurface;
use super::config::{EngineConfig, ViewOptions};
use super::engine::{GraphEngine, NodeSummary};
use super::error::EngineError;
use super::filter::CategoryFilter;
use super::geometry::{Point, Size};
use super::scheduler::{AnimationFrames, AnimationScheduler};
use super::surface::DrawSurface;
use super::types::{GraphData, GraphEdge, GraphNode};

/// Everything that lives only while the canvas is mounted.
struct Runtime {
	engine: GraphEngine<Canvas2dSurface>,
	scheduler: AnimationScheduler<AnimationFrames>,
	window: Window,
	resize_listener: Option<Closure<dyn FnMut()>>,
	last_timestamp: f64,
}

type Slot = Rc<RefCell<Option<Runtime>>>;

impl Runtime {
	fn on_frame(&mut self, timestamp: f64) {
		let engine = &mut self.engine;
		if self.scheduler.on_frame(|| engine.render_frame(timestamp)) {
			self.last_timestamp = timestamp;
		}
	}

	/// Matches the scheduler to the play flag; a paused view is repainted
	/// once with the last frame time.
	fn refresh(&mut self) {
		self.scheduler.sync(self.engine.view().is_playing);
		if !self.scheduler.is_running() {
			self.engine.render_frame(self.last_timestamp);
		}
	}

	fn teardown(&mut self) {
		self.scheduler.stop();
		if let Some(listener) = self.resize_listener.take() {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
		}
	}
}

fn with_runtime<T>(slot: &Slot, f: impl FnOnce(&mut Runtime) -> T) -> Option<T> {
	slot.borrow_mut().as_mut().map(f)
}

fn window_size(window: &Window) -> Size {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	Size::new(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

/// How the canvas picks its pixel size: the window, fixed dimensions, or
/// the parent element for any dimension left open.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	fn resolve(&self, window: Size, parent: Option<Size>) -> Size {
		if self.fullscreen {
			return window;
		}
		let parent = parent.unwrap_or(Size::new(800.0, 600.0));
		Size::new(
			self.width.unwrap_or(parent.width),
			self.height.unwrap_or(parent.height),
		)
	}

	fn measure(&self, window: &Window, canvas: &HtmlCanvasElement) -> Size {
		let parent = canvas
			.parent_element()
			.map(|p| Size::new(p.client_width() as f64, p.client_height() as f64));
		self.resolve(window_size(window), parent)
	}
}

fn pointer_position(canvas_ref: NodeRef<Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?;
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

struct MountParams {
	canvas: HtmlCanvasElement,
	window: Window,
	size: Size,
	config: EngineConfig,
	options: ViewOptions,
	on_node_click: Option<Callback<String>>,
	sizing: Sizing,
}

/// Builds the runtime into `slot`. On error nothing is installed.
fn mount(slot: &Slot, params: MountParams) -> Result<(), EngineError> {
	let canvas = params.canvas.clone();
	let surface = Canvas2dSurface::new(params.canvas, params.size)?;
	let mut engine = GraphEngine::new(surface, params.config, &params.options)?;
	if let Some(callback) = params.on_node_click {
		engine.set_on_node_click(move |id| callback.run(id.to_owned()));
	}

	let frames: Weak<RefCell<Option<Runtime>>> = Rc::downgrade(slot);
	let frame_callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
		if let Some(slot) = frames.upgrade() {
			with_runtime(&slot, |rt| rt.on_frame(timestamp));
		}
	});
	let scheduler =
		AnimationScheduler::new(AnimationFrames::new(params.window.clone(), frame_callback));

	// Installed in every sizing mode.
	let resizes = Rc::downgrade(slot);
	let sizing = params.sizing;
	let resize_listener = Closure::<dyn FnMut()>::new(move || {
		let (Some(slot), Some(window)) = (resizes.upgrade(), web_sys::window()) else {
			return;
		};
		let size = sizing.measure(&window, &canvas);
		with_runtime(&slot, |rt| {
			if rt.engine.surface().size() != size {
				rt.engine.resize(size);
				rt.refresh();
			}
		});
	});
	if let Err(err) = params
		.window
		.add_event_listener_with_callback("resize", resize_listener.as_ref().unchecked_ref())
	{
		error!("resize listener not installed: {err:?}");
	}

	info!(
		"graph canvas mounted at {}x{}",
		params.size.width, params.size.height
	);
	*slot.borrow_mut() = Some(Runtime {
		engine,
		scheduler,
		window: params.window,
		resize_listener: Some(resize_listener),
		last_timestamp: 0.0,
	});
	Ok(())
}

/// Interactive node-link view drawn on a `<canvas>`.
///
/// `nodes` and `edges` replace the scene wholesale whenever they change.
/// `on_node_click` fires with the id of a clicked node.
#[component]
pub fn GraphCanvas(
	#[prop(into)] nodes: Signal<Vec<GraphNode>>,
	#[prop(into)] edges: Signal<Vec<GraphEdge>>,
	#[prop(optional, into)] category_filter: Option<Signal<CategoryFilter>>,
	#[prop(optional, into)] on_node_click: Option<Callback<String>>,
	#[prop(optional)] options: Option<ViewOptions>,
	#[prop(optional)] config: Option<EngineConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<Canvas>::new();
	let runtime: Slot = Rc::new(RefCell::new(None));
	let options = options.unwrap_or_default();
	let config = config.unwrap_or_default();
	let playing = RwSignal::new(options.is_playing);
	let hovered = RwSignal::new(None::<NodeSummary>);

	let runtime_init = runtime.clone();
	let mut init_failed = false;
	Effect::new(move |_| {
		let data = GraphData {
			nodes: nodes.get(),
			edges: edges.get(),
		};
		let filter = category_filter.map(|f| f.get());
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if init_failed {
			return;
		}

		if runtime_init.borrow().is_none() {
			let Some(window) = web_sys::window() else {
				error!("graph canvas disabled: no window");
				init_failed = true;
				return;
			};
			let sizing = Sizing {
				fullscreen,
				width,
				height,
			};
			let size = sizing.measure(&window, &canvas);
			let params = MountParams {
				canvas,
				window,
				size,
				config: config.clone(),
				options: options.clone(),
				on_node_click,
				sizing,
			};
			if let Err(err) = mount(&runtime_init, params) {
				error!("graph canvas disabled: {err}");
				init_failed = true;
				return;
			}
		}

		with_runtime(&runtime_init, |rt| {
			rt.engine.set_data(data);
			if let Some(filter) = filter {
				rt.engine.set_category_filter(filter);
			}
			rt.refresh();
		});
	});

	let runtime_cleanup = StoredValue::new_local(runtime.clone());
	on_cleanup(move || {
		runtime_cleanup.try_with_value(|slot| {
			if let Some(mut rt) = slot.borrow_mut().take() {
				rt.teardown();
			}
		});
	});

	let runtime_md = runtime.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(canvas_ref, &ev) {
			with_runtime(&runtime_md, |rt| rt.engine.pointer_down(at));
		}
	};

	let runtime_mm = runtime.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(at) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let summary = with_runtime(&runtime_mm, |rt| {
			let changed = rt.engine.pointer_move(at);
			if changed {
				rt.refresh();
			}
			rt.engine.hovered_summary()
		});
		hovered.set(summary.flatten());
	};

	let runtime_mu = runtime.clone();
	let on_mouseup = move |_: MouseEvent| {
		with_runtime(&runtime_mu, |rt| rt.engine.pointer_up());
	};

	let runtime_click = runtime.clone();
	let on_click = move |ev: MouseEvent| {
		if let Some(at) = pointer_position(canvas_ref, &ev) {
			with_runtime(&runtime_click, |rt| {
				rt.engine.pointer_click(at);
				rt.refresh();
			});
		}
	};

	let runtime_ml = runtime.clone();
	let on_mouseleave = move |_: MouseEvent| {
		with_runtime(&runtime_ml, |rt| {
			rt.engine.pointer_up();
			rt.engine.pointer_leave();
			rt.refresh();
		});
		hovered.set(None);
	};

	let runtime_wh = runtime.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(at) = pointer_position(canvas_ref, &ev) {
			with_runtime(&runtime_wh, |rt| {
				rt.engine.wheel(at, ev.delta_y());
				rt.refresh();
			});
		}
	};

	let action = |f: fn(&mut GraphEngine<Canvas2dSurface>)| {
		let slot = runtime.clone();
		move |_: MouseEvent| {
			with_runtime(&slot, |rt| {
				f(&mut rt.engine);
				rt.refresh();
			});
		}
	};

	let runtime_play = runtime.clone();
	let toggle_play = move |_: MouseEvent| {
		let now_playing = with_runtime(&runtime_play, |rt| {
			rt.engine.toggle_playing();
			rt.refresh();
			rt.engine.view().is_playing
		});
		if let Some(now_playing) = now_playing {
			playing.set(now_playing);
		}
	};

	view! {
		<div class="graph-canvas" style="position: relative;">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas-surface"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:click=on_click
				on:wheel=on_wheel
				style="display: block; cursor: grab;"
			/>
			<div class="graph-toolbar">
				<button title="Zoom in" on:click=action(GraphEngine::zoom_in)>"+"</button>
				<button title="Zoom out" on:click=action(GraphEngine::zoom_out)>"−"</button>
				<button title="Reset view" on:click=action(GraphEngine::reset_view)>"Reset"</button>
				<button title="Toggle labels" on:click=action(GraphEngine::toggle_labels)>"Labels"</button>
				<button title="Toggle edges" on:click=action(GraphEngine::toggle_edges)>"Edges"</button>
				<button title="Play or pause" on:click=toggle_play>
					{move || if playing.get() { "Pause" } else { "Play" }}
				</button>
			</div>
			{move || {
				hovered
					.get()
					.map(|node| {
						view! {
							<div class="graph-tooltip">
								<strong>{node.name}</strong>
								<span>{node.category}</span>
								<span>{format!("status: {}", node.status)}</span>
								<span>{format!("{} connections", node.connections)}</span>
								<span>
									{format!("activity {:.0}%", node.metrics.activity_percent)}
								</span>
							</div>
						}
					})
			}}
		</div>
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	const WINDOW: Size = Size::new(1280.0, 720.0);

	#[test]
	fn fullscreen_follows_the_window() {
		let sizing = Sizing {
			fullscreen: true,
			width: Some(300.0),
			height: None,
		};
		assert_eq!(sizing.resolve(WINDOW, Some(Size::new(10.0, 10.0))), WINDOW);
	}

	#[test]
	fn open_dimensions_follow_the_parent() {
		let sizing = Sizing {
			width: Some(300.0),
			..Sizing::default()
		};
		assert_eq!(
			sizing.resolve(WINDOW, Some(Size::new(640.0, 480.0))),
			Size::new(300.0, 480.0)
		);
		assert_eq!(
			sizing.resolve(WINDOW, Some(Size::new(900.0, 500.0))),
			Size::new(300.0, 500.0)
		);
		assert_eq!(Sizing::default().resolve(WINDOW, None), Size::new(800.0, 600.0));
	}
}

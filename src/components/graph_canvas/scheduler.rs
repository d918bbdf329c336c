use log::{debug, error};
use wasm_bindgen::prelude::*;

use super::error::EngineError;

/// Something that can schedule one callback on the next display refresh.
pub trait FrameRequester {
	type Handle;

	fn request_frame(&mut self) -> Result<Self::Handle, EngineError>;

	fn cancel_frame(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchedulerState {
	Stopped,
	Running,
}

/// Self-rescheduling redraw loop with explicit start/stop.
///
/// The host delivers each frame through [`AnimationScheduler::on_frame`];
/// while running, every delivered frame is rendered and the next one is
/// requested. At most one request is pending at any time.
pub struct AnimationScheduler<R: FrameRequester> {
	requester: R,
	state: SchedulerState,
	pending: Option<R::Handle>,
}

impl<R: FrameRequester> AnimationScheduler<R> {
	pub fn new(requester: R) -> Self {
		Self {
			requester,
			state: SchedulerState::Stopped,
			pending: None,
		}
	}

	pub fn state(&self) -> SchedulerState {
		self.state
	}

	pub fn is_running(&self) -> bool {
		self.state == SchedulerState::Running
	}

	pub fn has_pending_frame(&self) -> bool {
		self.pending.is_some()
	}

	pub fn requester(&self) -> &R {
		&self.requester
	}

	pub fn start(&mut self) {
		if self.is_running() {
			return;
		}
		debug!("animation scheduler started");
		self.state = SchedulerState::Running;
		self.request_next();
	}

	/// Idempotent; safe on a stopped scheduler.
	pub fn stop(&mut self) {
		if let Some(handle) = self.pending.take() {
			self.requester.cancel_frame(handle);
		}
		if self.is_running() {
			debug!("animation scheduler stopped");
		}
		self.state = SchedulerState::Stopped;
	}

	/// Starts or stops to match `playing`.
	pub fn sync(&mut self, playing: bool) {
		if playing {
			self.start();
		} else {
			self.stop();
		}
	}

	/// Handles a delivered frame. Runs `frame` and requests the next one if
	/// running; returns whether `frame` ran. Stale deliveries after `stop()`
	/// are ignored.
	pub fn on_frame(&mut self, frame: impl FnOnce()) -> bool {
		self.pending = None;
		if !self.is_running() {
			return false;
		}
		frame();
		self.request_next();
		true
	}

	fn request_next(&mut self) {
		match self.requester.request_frame() {
			Ok(handle) => self.pending = Some(handle),
			Err(err) => {
				error!("{err}; animation stopped");
				self.state = SchedulerState::Stopped;
			}
		}
	}
}

impl<R: FrameRequester> Drop for AnimationScheduler<R> {
	fn drop(&mut self) {
		self.stop();
	}
}

/// `window.requestAnimationFrame` with a fixed callback.
pub struct AnimationFrames {
	window: web_sys::Window,
	callback: Closure<dyn FnMut(f64)>,
}

impl AnimationFrames {
	pub fn new(window: web_sys::Window, callback: Closure<dyn FnMut(f64)>) -> Self {
		Self { window, callback }
	}
}

impl FrameRequester for AnimationFrames {
	type Handle = i32;

	fn request_frame(&mut self) -> Result<i32, EngineError> {
		let function: &js_sys::Function = self.callback.as_ref().unchecked_ref();
		self.window
			.request_animation_frame(function)
			.map_err(|err| EngineError::FrameRequest(format!("{err:?}")))
	}

	fn cancel_frame(&mut self, handle: i32) {
		if let Err(err) = self.window.cancel_animation_frame(handle) {
			error!("cancelAnimationFrame({handle}) failed: {err:?}");
		}
	}
}

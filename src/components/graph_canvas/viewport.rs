use super::geometry::Point;
use super::state::ViewState;

/// Model ↔ screen mapping for one frame: translate to `center + pan`, then
/// scale by `zoom`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
	pub center: Point,
	pub pan: Point,
	pub zoom: f64,
}

impl ViewportTransform {
	pub fn new(view: &ViewState, center: Point) -> Self {
		Self {
			center,
			pan: view.pan,
			zoom: view.zoom,
		}
	}

	/// Screen-space origin of model space.
	pub fn origin(&self) -> Point {
		self.center + self.pan
	}

	pub fn to_screen(&self, model: Point) -> Point {
		self.origin() + model * self.zoom
	}

	pub fn to_model(&self, screen: Point) -> Point {
		(screen - self.origin()) / self.zoom
	}
}

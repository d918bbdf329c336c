//! Drawing primitives the renderer is written against.
//!
//! [`Canvas2dSurface`](super::canvas::Canvas2dSurface) drives a browser
//! canvas; [`RecordingSurface`] keeps the command stream in memory so frames
//! can be inspected without a display.

use super::geometry::{Point, QuadCurve, Size};
use super::style::Color;
use super::viewport::ViewportTransform;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
	pub color: Color,
	pub width: f64,
}

/// Linear gradient along a curve from its start to its end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStroke {
	pub from: Color,
	pub to: Color,
	pub width: f64,
	pub opacity: f64,
}

/// Disc filled with a radial gradient from `inner` at the center to fully
/// transparent at `radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadialGlow {
	pub center: Point,
	pub radius: f64,
	pub inner: Color,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
	/// Top-left corner.
	pub origin: Point,
	pub width: f64,
	pub height: f64,
	pub corner: f64,
}

/// Text is anchored at the horizontal center of its top edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
	pub size: f64,
	pub bold: bool,
	pub color: Color,
}

/// Minimal immediate-mode drawing API. Coordinates are in model space after
/// [`DrawSurface::set_transform`], in pixels otherwise.
pub trait DrawSurface {
	fn size(&self) -> Size;

	/// Reallocates the backing store. Pixels are lost; view state is not
	/// affected.
	fn resize(&mut self, size: Size);

	/// Fills the whole surface and resets the transform.
	fn clear(&mut self, background: Color);

	fn set_transform(&mut self, transform: &ViewportTransform);

	fn draw_curve(&mut self, curve: &QuadCurve, stroke: &GradientStroke);

	fn draw_gradient_fill(&mut self, glow: &RadialGlow);

	fn draw_circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<Stroke>);

	fn draw_rounded_rect(&mut self, rect: &RoundedRect, fill: Color);

	fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle);

	/// Advance width of `text` in the current coordinate space.
	fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64;
}

/// One recorded primitive.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
	Clear(Color),
	Transform(ViewportTransform),
	Curve(QuadCurve, GradientStroke),
	Glow(RadialGlow),
	Circle {
		center: Point,
		radius: f64,
		fill: Color,
		stroke: Option<Stroke>,
	},
	RoundedRect(RoundedRect, Color),
	Text {
		text: String,
		at: Point,
		style: TextStyle,
	},
}

/// Headless surface that records every call.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
	size: Size,
	commands: Vec<DrawCommand>,
}

/// Average glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f64 = 0.6;

impl RecordingSurface {
	pub fn new(size: Size) -> Self {
		Self {
			size,
			commands: Vec::new(),
		}
	}

	pub fn commands(&self) -> &[DrawCommand] {
		&self.commands
	}

	pub fn take_commands(&mut self) -> Vec<DrawCommand> {
		std::mem::take(&mut self.commands)
	}

	pub fn circles(&self) -> impl Iterator<Item = (Point, f64)> + '_ {
		self.commands.iter().filter_map(|cmd| match cmd {
			DrawCommand::Circle { center, radius, .. } => Some((*center, *radius)),
			_ => None,
		})
	}

	pub fn curves(&self) -> impl Iterator<Item = (&QuadCurve, &GradientStroke)> + '_ {
		self.commands.iter().filter_map(|cmd| match cmd {
			DrawCommand::Curve(curve, stroke) => Some((curve, stroke)),
			_ => None,
		})
	}

	pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
		self.commands.iter().filter_map(|cmd| match cmd {
			DrawCommand::Text { text, .. } => Some(text.as_str()),
			_ => None,
		})
	}
}

impl DrawSurface for RecordingSurface {
	fn size(&self) -> Size {
		self.size
	}

	fn resize(&mut self, size: Size) {
		self.size = size;
		self.commands.clear();
	}

	fn clear(&mut self, background: Color) {
		self.commands.clear();
		self.commands.push(DrawCommand::Clear(background));
	}

	fn set_transform(&mut self, transform: &ViewportTransform) {
		self.commands.push(DrawCommand::Transform(*transform));
	}

	fn draw_curve(&mut self, curve: &QuadCurve, stroke: &GradientStroke) {
		self.commands.push(DrawCommand::Curve(*curve, *stroke));
	}

	fn draw_gradient_fill(&mut self, glow: &RadialGlow) {
		self.commands.push(DrawCommand::Glow(*glow));
	}

	fn draw_circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<Stroke>) {
		self.commands.push(DrawCommand::Circle {
			center,
			radius,
			fill,
			stroke,
		});
	}

	fn draw_rounded_rect(&mut self, rect: &RoundedRect, fill: Color) {
		self.commands.push(DrawCommand::RoundedRect(*rect, fill));
	}

	fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) {
		self.commands.push(DrawCommand::Text {
			text: text.to_owned(),
			at,
			style: *style,
		});
	}

	fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
		text.chars().count() as f64 * style.size * GLYPH_ADVANCE
	}
}

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::EngineError;
use super::geometry::{Point, QuadCurve, Size};
use super::style::Color;
use super::surface::{DrawSurface, GradientStroke, RadialGlow, RoundedRect, Stroke, TextStyle};
use super::viewport::ViewportTransform;

/// [`DrawSurface`] backed by an HTML canvas 2D context.
pub struct Canvas2dSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	size: Size,
}

impl Canvas2dSurface {
	pub fn new(canvas: HtmlCanvasElement, size: Size) -> Result<Self, EngineError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|err| EngineError::SurfaceUnavailable(format!("{err:?}")))?
			.ok_or_else(|| EngineError::SurfaceUnavailable("2d context not supported".into()))?
			.dyn_into()
			.map_err(|_| {
				EngineError::SurfaceUnavailable("context is not a CanvasRenderingContext2d".into())
			})?;
		let mut surface = Self { canvas, ctx, size };
		surface.resize(size);
		Ok(surface)
	}

	fn font(style: &TextStyle) -> String {
		let weight = if style.bold { "600 " } else { "" };
		format!("{weight}{}px sans-serif", style.size)
	}

	fn circle_path(&self, center: Point, radius: f64) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(center.x, center.y, radius.max(0.0), 0.0, 2.0 * PI);
	}
}

impl DrawSurface for Canvas2dSurface {
	fn size(&self) -> Size {
		self.size
	}

	fn resize(&mut self, size: Size) {
		self.size = size;
		self.canvas.set_width(size.width.max(0.0) as u32);
		self.canvas.set_height(size.height.max(0.0) as u32);
	}

	fn clear(&mut self, background: Color) {
		let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		self.ctx.set_global_alpha(1.0);
		self.ctx.set_fill_style_str(&background.to_css());
		self.ctx.fill_rect(0.0, 0.0, self.size.width, self.size.height);
	}

	fn set_transform(&mut self, transform: &ViewportTransform) {
		let origin = transform.origin();
		let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
		let _ = self.ctx.translate(origin.x, origin.y);
		let _ = self.ctx.scale(transform.zoom, transform.zoom);
	}

	fn draw_curve(&mut self, curve: &QuadCurve, stroke: &GradientStroke) {
		let gradient =
			self.ctx
				.create_linear_gradient(curve.from.x, curve.from.y, curve.to.x, curve.to.y);
		let _ = gradient.add_color_stop(0.0, &stroke.from.to_css());
		let _ = gradient.add_color_stop(1.0, &stroke.to.to_css());

		self.ctx.set_global_alpha(stroke.opacity);
		#[allow(deprecated)]
		self.ctx.set_stroke_style(&gradient);
		self.ctx.set_line_width(stroke.width);
		self.ctx.begin_path();
		self.ctx.move_to(curve.from.x, curve.from.y);
		self.ctx
			.quadratic_curve_to(curve.control.x, curve.control.y, curve.to.x, curve.to.y);
		self.ctx.stroke();
		self.ctx.set_global_alpha(1.0);
	}

	fn draw_gradient_fill(&mut self, glow: &RadialGlow) {
		let Point { x, y } = glow.center;
		let Ok(gradient) = self
			.ctx
			.create_radial_gradient(x, y, 0.0, x, y, glow.radius.max(0.0))
		else {
			return;
		};
		let _ = gradient.add_color_stop(0.0, &glow.inner.to_css());
		let _ = gradient.add_color_stop(1.0, &glow.inner.transparent().to_css());
		self.circle_path(glow.center, glow.radius);
		#[allow(deprecated)]
		self.ctx.set_fill_style(&gradient);
		self.ctx.fill();
	}

	fn draw_circle(&mut self, center: Point, radius: f64, fill: Color, stroke: Option<Stroke>) {
		self.circle_path(center, radius);
		self.ctx.set_fill_style_str(&fill.to_css());
		self.ctx.fill();
		if let Some(stroke) = stroke {
			self.ctx.set_stroke_style_str(&stroke.color.to_css());
			self.ctx.set_line_width(stroke.width);
			self.ctx.stroke();
		}
	}

	fn draw_rounded_rect(&mut self, rect: &RoundedRect, fill: Color) {
		let Point { x, y } = rect.origin;
		let (w, h) = (rect.width, rect.height);
		let r = rect.corner.min(w / 2.0).min(h / 2.0).max(0.0);
		let ctx = &self.ctx;
		ctx.begin_path();
		ctx.move_to(x + r, y);
		ctx.line_to(x + w - r, y);
		ctx.quadratic_curve_to(x + w, y, x + w, y + r);
		ctx.line_to(x + w, y + h - r);
		ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
		ctx.line_to(x + r, y + h);
		ctx.quadratic_curve_to(x, y + h, x, y + h - r);
		ctx.line_to(x, y + r);
		ctx.quadratic_curve_to(x, y, x + r, y);
		ctx.close_path();
		ctx.set_fill_style_str(&fill.to_css());
		ctx.fill();
	}

	fn draw_text(&mut self, text: &str, at: Point, style: &TextStyle) {
		self.ctx.set_font(&Self::font(style));
		self.ctx.set_text_align("center");
		self.ctx.set_text_baseline("top");
		self.ctx.set_fill_style_str(&style.color.to_css());
		let _ = self.ctx.fill_text(text, at.x, at.y);
	}

	fn measure_text(&mut self, text: &str, style: &TextStyle) -> f64 {
		self.ctx.set_font(&Self::font(style));
		self.ctx
			.measure_text(text)
			.map(|metrics| metrics.width())
			.unwrap_or(0.0)
	}
}

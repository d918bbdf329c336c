use super::config::EngineConfig;
use super::geometry::{Point, QuadCurve};
use super::scene::SceneModel;
use super::state::ViewState;
use super::style::{self, Color};
use super::surface::{DrawSurface, GradientStroke, RadialGlow, RoundedRect, Stroke, TextStyle};
use super::types::{GraphNode, Status};
use super::viewport::ViewportTransform;

pub const PULSE_RATE: f64 = 0.005;
pub const PULSE_AMPLITUDE: f64 = 0.1;
pub const SELECTED_SCALE: f64 = 1.2;
pub const HOVERED_SCALE: f64 = 1.1;
const EDGE_OPACITY: f64 = 0.6;
const EDGE_WIDTH_PER_STRENGTH: f64 = 3.0;
const GLOW_SCALE: f64 = 1.5;
const GLOW_ALPHA: f64 = 0.35;
const STATUS_DOT_RADIUS: f64 = 5.0;
const LABEL_GAP: f64 = 6.0;

/// "Breathing" multiplier; only active nodes pulse.
pub fn pulse_factor(status: Status, timestamp: f64) -> f64 {
	if status.pulses() {
		(timestamp * PULSE_RATE).sin() * PULSE_AMPLITUDE + 1.0
	} else {
		1.0
	}
}

/// Radius before pulsing: base plus activity, scaled for selection/hover.
pub fn node_radius(node: &GraphNode, view: &ViewState, config: &EngineConfig) -> f64 {
	let activity = node.metrics.activity_percent.clamp(0.0, 100.0) / 100.0;
	let scale = if view.is_selected(&node.id) {
		SELECTED_SCALE
	} else if view.is_hovered(&node.id) {
		HOVERED_SCALE
	} else {
		1.0
	};
	(config.base_radius + activity * config.activity_radius) * scale
}

pub fn display_radius(
	node: &GraphNode,
	view: &ViewState,
	config: &EngineConfig,
	timestamp: f64,
) -> f64 {
	node_radius(node, view, config) * pulse_factor(node.status, timestamp)
}

pub fn edge_width(strength: f64) -> f64 {
	(strength.clamp(0.0, 1.0) * EDGE_WIDTH_PER_STRENGTH).max(1.0)
}

/// Draws one frame: edges, then nodes, then labels.
pub fn render<S: DrawSurface + ?Sized>(
	scene: &SceneModel,
	view: &ViewState,
	config: &EngineConfig,
	surface: &mut S,
	timestamp: f64,
) {
	surface.clear(config.background);
	let transform = ViewportTransform::new(view, surface.size().center());
	surface.set_transform(&transform);

	if view.show_edges {
		draw_edges(scene, surface);
	}
	draw_nodes(scene, view, config, surface, timestamp);
	if view.show_labels && view.zoom > config.label_min_zoom {
		draw_labels(scene, view, config, surface);
	}
}

fn draw_edges<S: DrawSurface + ?Sized>(scene: &SceneModel, surface: &mut S) {
	for (edge, from, to) in scene.visible_edges() {
		let curve = QuadCurve::bowed(from.position, to.position);
		surface.draw_curve(
			&curve,
			&GradientStroke {
				from: style::category_color(from.category),
				to: style::category_color(to.category),
				width: edge_width(edge.strength),
				opacity: EDGE_OPACITY,
			},
		);
	}
}

fn draw_nodes<S: DrawSurface + ?Sized>(
	scene: &SceneModel,
	view: &ViewState,
	config: &EngineConfig,
	surface: &mut S,
	timestamp: f64,
) {
	for node in scene.visible_nodes() {
		let pulse = pulse_factor(node.status, timestamp);
		let radius = node_radius(node, view, config) * pulse;
		let fill = style::node_color(node.category, node.status);
		let status = style::status_color(node.status);

		surface.draw_gradient_fill(&RadialGlow {
			center: node.position,
			radius: radius * GLOW_SCALE * pulse,
			inner: style::category_color(node.category).with_alpha(GLOW_ALPHA),
		});

		let stroke_width = if view.is_selected(&node.id) { 3.0 } else { 2.0 };
		surface.draw_circle(
			node.position,
			radius,
			fill,
			Some(Stroke {
				color: status,
				width: stroke_width,
			}),
		);

		// Upper-right, on the rim.
		let offset = radius * std::f64::consts::FRAC_1_SQRT_2;
		surface.draw_circle(
			node.position + Point::new(offset, -offset),
			STATUS_DOT_RADIUS,
			status,
			Some(Stroke {
				color: config.background,
				width: 1.5,
			}),
		);
	}
}

fn draw_labels<S: DrawSurface + ?Sized>(
	scene: &SceneModel,
	view: &ViewState,
	config: &EngineConfig,
	surface: &mut S,
) {
	// Sizes are chosen in screen pixels and converted back to model units.
	let k = view.zoom;
	let name_px = (config.label_font_px * k).max(config.min_font_px);
	let badge_px = (config.label_font_px * 0.8 * k).max(config.min_font_px);
	let name_size = name_px / k;
	let badge_size = badge_px / k;
	let pad = badge_size * 0.5;

	for node in scene.visible_nodes() {
		let radius = node_radius(node, view, config);
		let selected = view.is_selected(&node.id);
		let name_top = node.position.y + radius + LABEL_GAP;

		surface.draw_text(
			&node.name,
			Point::new(node.position.x, name_top),
			&TextStyle {
				size: name_size,
				bold: selected,
				color: Color::WHITE.with_alpha(if selected { 1.0 } else { 0.85 }),
			},
		);

		let color = style::category_color(node.category);
		let badge = TextStyle {
			size: badge_size,
			bold: false,
			color,
		};
		let label = node.category.label();
		let text_width = surface.measure_text(label, &badge);
		let height = badge_size + pad;
		let rect = RoundedRect {
			origin: Point::new(
				node.position.x - text_width / 2.0 - pad,
				name_top + name_size + pad / 2.0,
			),
			width: text_width + pad * 2.0,
			height,
			corner: height / 2.0,
		};
		surface.draw_rounded_rect(&rect, color.with_alpha(0.2));
		surface.draw_text(
			label,
			Point::new(node.position.x, rect.origin.y + pad / 2.0),
			&badge,
		);
	}
}

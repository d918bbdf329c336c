use serde::{Deserialize, Serialize};

use super::types::{Category, Status};

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	pub fn transparent(self) -> Self {
		self.with_alpha(0.0)
	}

	pub fn to_css(self) -> String {
		format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
	}
}

const COLORS: &[(Category, Color)] = &[
	(Category::Infrastructure, Color::rgb(0x3b, 0x82, 0xf6)),
	(Category::Storage, Color::rgb(0x8b, 0x5c, 0xf6)),
	(Category::Database, Color::rgb(0x06, 0xb6, 0xd4)),
	(Category::CoreEngine, Color::rgb(0xef, 0x44, 0x44)),
	(Category::ApiLayer, Color::rgb(0x10, 0xb9, 0x81)),
	(Category::Learner, Color::rgb(0xf5, 0x9e, 0x0b)),
	(Category::Security, Color::rgb(0xec, 0x48, 0x99)),
	(Category::Analytics, Color::rgb(0x63, 0x66, 0xf1)),
	(Category::Communication, Color::rgb(0x14, 0xb8, 0xa6)),
];

const FALLBACK_COLOR: Color = Color::rgb(0x6b, 0x72, 0x80);

pub fn category_color(category: Category) -> Color {
	COLORS
		.iter()
		.find(|(c, _)| *c == category)
		.map(|(_, color)| *color)
		.unwrap_or(FALLBACK_COLOR)
}

pub fn status_color(status: Status) -> Color {
	match status {
		Status::Active => Color::rgb(0x22, 0xc5, 0x5e),
		Status::Learning => Color::rgb(0xea, 0xb3, 0x08),
		Status::Error => Color::rgb(0xef, 0x44, 0x44),
		Status::Inactive | Status::Unknown => FALLBACK_COLOR,
	}
}

/// Fill color for a node. Status only tints nodes that are not running
/// normally; errors keep their category color and rely on the stroke.
pub fn node_color(category: Category, status: Status) -> Color {
	let base = category_color(category);
	match status {
		Status::Inactive => base.with_alpha(0.55),
		_ => base,
	}
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::Point;

/// Node category; drives the fill color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
	Infrastructure,
	Storage,
	Database,
	CoreEngine,
	ApiLayer,
	Learner,
	Security,
	Analytics,
	Communication,
	#[serde(other)]
	Unknown,
}

impl Category {
	pub const ALL: [Category; 9] = [
		Category::Infrastructure,
		Category::Storage,
		Category::Database,
		Category::CoreEngine,
		Category::ApiLayer,
		Category::Learner,
		Category::Security,
		Category::Analytics,
		Category::Communication,
	];

	pub fn as_str(self) -> &'static str {
		match self {
			Category::Infrastructure => "infrastructure",
			Category::Storage => "storage",
			Category::Database => "database",
			Category::CoreEngine => "core-engine",
			Category::ApiLayer => "api-layer",
			Category::Learner => "learner",
			Category::Security => "security",
			Category::Analytics => "analytics",
			Category::Communication => "communication",
			Category::Unknown => "unknown",
		}
	}

	/// Human readable badge text.
	pub fn label(self) -> &'static str {
		match self {
			Category::Infrastructure => "Infrastructure",
			Category::Storage => "Storage",
			Category::Database => "Database",
			Category::CoreEngine => "Core Engine",
			Category::ApiLayer => "API Layer",
			Category::Learner => "Learner",
			Category::Security => "Security",
			Category::Analytics => "Analytics",
			Category::Communication => "Communication",
			Category::Unknown => "Other",
		}
	}
}

impl fmt::Display for Category {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Category {
	type Err = std::convert::Infallible;

	/// Unrecognised names map to [`Category::Unknown`].
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(Category::ALL
			.into_iter()
			.find(|c| c.as_str() == s)
			.unwrap_or(Category::Unknown))
	}
}

/// Lifecycle status; drives the stroke/indicator color and the pulse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
	Active,
	#[default]
	Inactive,
	Learning,
	Error,
	#[serde(other)]
	Unknown,
}

impl Status {
	pub fn as_str(self) -> &'static str {
		match self {
			Status::Active => "active",
			Status::Inactive => "inactive",
			Status::Learning => "learning",
			Status::Error => "error",
			Status::Unknown => "unknown",
		}
	}

	pub fn pulses(self) -> bool {
		self == Status::Active
	}
}

impl fmt::Display for Status {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeKind {
	#[default]
	Collaboration,
	Communication,
	Dependency,
	#[serde(other)]
	Unknown,
}

/// Percentages in `0..=100`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeMetrics {
	pub activity_percent: f64,
	pub collaboration_percent: f64,
	pub performance_score: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
	pub id: String,
	pub name: String,
	pub category: Category,
	#[serde(default)]
	pub status: Status,
	pub position: Point,
	#[serde(default)]
	pub connected_ids: Vec<String>,
	#[serde(default)]
	pub metrics: NodeMetrics,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
	pub from_id: String,
	pub to_id: String,
	pub strength: f64,
	#[serde(default)]
	pub kind: EdgeKind,
}

/// Wholesale replacement payload from the host application.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub edges: Vec<GraphEdge>,
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::{Category, GraphNode};

/// Category selector: every node, or only one category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
	#[default]
	All,
	Only(Category),
}

impl CategoryFilter {
	pub fn matches(self, category: Category) -> bool {
		match self {
			CategoryFilter::All => true,
			CategoryFilter::Only(wanted) => wanted == category,
		}
	}
}

impl fmt::Display for CategoryFilter {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			CategoryFilter::All => f.write_str("all"),
			CategoryFilter::Only(category) => category.fmt(f),
		}
	}
}

impl FromStr for CategoryFilter {
	type Err = std::convert::Infallible;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s.is_empty() || s == "all" {
			return Ok(CategoryFilter::All);
		}
		let category: Category = s.parse()?;
		Ok(CategoryFilter::Only(category))
	}
}

impl From<String> for CategoryFilter {
	fn from(s: String) -> Self {
		match s.parse() {
			Ok(filter) => filter,
			Err(never) => match never {},
		}
	}
}

impl From<CategoryFilter> for String {
	fn from(filter: CategoryFilter) -> Self {
		filter.to_string()
	}
}

/// Nodes that pass `filter`, in input order.
pub fn visible_nodes(all: &[GraphNode], filter: CategoryFilter) -> Vec<&GraphNode> {
	all.iter().filter(|n| filter.matches(n.category)).collect()
}

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use log::{debug, trace, warn};

use super::filter::CategoryFilter;
use super::types::{GraphData, GraphEdge, GraphNode};

/// Snapshot of the host's nodes and edges plus the visible set for the
/// current filter.
#[derive(Clone, Debug, Default)]
pub struct SceneModel {
	nodes: Vec<GraphNode>,
	edges: Vec<GraphEdge>,
	filter: CategoryFilter,
	visible: Vec<usize>,
	visible_by_id: HashMap<String, usize>,
}

impl SceneModel {
	pub fn new(data: GraphData, filter: CategoryFilter) -> Self {
		let mut scene = Self {
			nodes: data.nodes,
			edges: data.edges,
			filter,
			..Self::default()
		};
		scene.rebuild();
		scene
	}

	/// Replaces nodes and edges wholesale.
	pub fn replace(&mut self, data: GraphData) {
		self.nodes = data.nodes;
		self.edges = data.edges;
		self.rebuild();
	}

	pub fn set_filter(&mut self, filter: CategoryFilter) {
		if self.filter != filter {
			self.filter = filter;
			self.rebuild();
		}
	}

	fn rebuild(&mut self) {
		self.visible.clear();
		self.visible_by_id.clear();
		for (idx, node) in self.nodes.iter().enumerate() {
			if !self.filter.matches(node.category) {
				continue;
			}
			match self.visible_by_id.entry(node.id.clone()) {
				Entry::Occupied(_) => warn!("duplicate node id {:?}, keeping the first", node.id),
				Entry::Vacant(slot) => {
					slot.insert(idx);
					self.visible.push(idx);
				}
			}
		}
		debug!(
			"scene rebuilt: {} of {} nodes visible under filter {}",
			self.visible.len(),
			self.nodes.len(),
			self.filter
		);
	}

	pub fn filter(&self) -> CategoryFilter {
		self.filter
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.nodes
	}

	pub fn edges(&self) -> &[GraphEdge] {
		&self.edges
	}

	pub fn visible_count(&self) -> usize {
		self.visible.len()
	}

	pub fn visible_nodes(&self) -> impl Iterator<Item = &GraphNode> + '_ {
		self.visible.iter().map(|&idx| &self.nodes[idx])
	}

	pub fn visible_node(&self, id: &str) -> Option<&GraphNode> {
		self.visible_by_id.get(id).map(|&idx| &self.nodes[idx])
	}

	pub fn is_visible(&self, id: &str) -> bool {
		self.visible_by_id.contains_key(id)
	}

	/// Edges whose endpoints are both visible, resolved to their nodes.
	/// Anything else is skipped for this frame.
	pub fn visible_edges(&self) -> impl Iterator<Item = (&GraphEdge, &GraphNode, &GraphNode)> + '_ {
		self.edges.iter().filter_map(|edge| {
			match (self.visible_node(&edge.from_id), self.visible_node(&edge.to_id)) {
				(Some(from), Some(to)) => Some((edge, from, to)),
				_ => {
					trace!("skipping edge {} -> {}", edge.from_id, edge.to_id);
					None
				}
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::components::graph_canvas::geometry::Point;
	use crate::components::graph_canvas::types::{Category, EdgeKind, NodeMetrics, Status};

	fn node(id: &str, category: Category) -> GraphNode {
		GraphNode {
			id: id.into(),
			name: id.into(),
			category,
			status: Status::Active,
			position: Point::ORIGIN,
			connected_ids: Vec::new(),
			metrics: NodeMetrics::default(),
		}
	}

	fn edge(from: &str, to: &str) -> GraphEdge {
		GraphEdge {
			from_id: from.into(),
			to_id: to.into(),
			strength: 0.5,
			kind: EdgeKind::Dependency,
		}
	}

	fn sample() -> GraphData {
		GraphData {
			nodes: vec![
				node("a", Category::Infrastructure),
				node("b", Category::Database),
				node("c", Category::Database),
			],
			edges: vec![edge("a", "b"), edge("b", "c"), edge("c", "ghost")],
		}
	}

	#[test]
	fn unknown_endpoints_are_skipped() {
		let scene = SceneModel::new(sample(), CategoryFilter::All);
		let pairs: Vec<(&str, &str)> = scene
			.visible_edges()
			.map(|(_, from, to)| (from.id.as_str(), to.id.as_str()))
			.collect();
		assert_eq!(pairs, vec![("a", "b"), ("b", "c")]);
	}

	#[test]
	fn filter_hides_edges_with_invisible_endpoints() {
		let scene = SceneModel::new(sample(), CategoryFilter::Only(Category::Database));
		assert_eq!(scene.visible_count(), 2);
		assert!(!scene.is_visible("a"));
		let pairs: Vec<(&str, &str)> = scene
			.visible_edges()
			.map(|(e, _, _)| (e.from_id.as_str(), e.to_id.as_str()))
			.collect();
		assert_eq!(pairs, vec![("b", "c")]);
	}

	#[test]
	fn duplicate_ids_keep_the_first_node() {
		let mut data = sample();
		let mut dup = node("a", Category::Infrastructure);
		dup.name = "second".into();
		data.nodes.push(dup);
		let scene = SceneModel::new(data, CategoryFilter::All);
		assert_eq!(scene.visible_count(), 3);
		assert_eq!(scene.visible_node("a").map(|n| n.name.as_str()), Some("a"));
	}

	#[test]
	fn replace_swaps_everything() {
		let mut scene = SceneModel::new(sample(), CategoryFilter::All);
		scene.replace(GraphData {
			nodes: vec![node("z", Category::Learner)],
			edges: Vec::new(),
		});
		assert_eq!(scene.visible_count(), 1);
		assert!(scene.is_visible("z"));
		assert!(!scene.is_visible("a"));
		assert_eq!(scene.visible_edges().count(), 0);
	}
}

use std::f64::consts::PI;

use leptos::prelude::*;
use log::info;

use crate::components::graph_canvas::{
	Category, CategoryFilter, EdgeKind, GraphCanvas, GraphData, GraphEdge, GraphNode, NodeMetrics,
	Point, Status,
};

const STATUSES: [Status; 4] = [Status::Active, Status::Inactive, Status::Learning, Status::Error];
const KINDS: [EdgeKind; 3] = [EdgeKind::Collaboration, EdgeKind::Communication, EdgeKind::Dependency];

/// Generate sample graph data: nodes on concentric rings, each linked to an
/// earlier node.
fn generate_sample_data(n: usize) -> GraphData {
	let mut nodes: Vec<GraphNode> = (0..n)
		.map(|i| {
			let ring = 1 + i / 12;
			let angle = (i % 12) as f64 * 2.0 * PI / 12.0 + ring as f64 * 0.3;
			let r = 140.0 * ring as f64;
			GraphNode {
				id: format!("n{i}"),
				name: format!("Agent {i}"),
				category: Category::ALL[i % Category::ALL.len()],
				status: STATUSES[(rand_simple(i * 7) * 4.0) as usize % 4],
				position: Point::new(r * angle.cos(), r * angle.sin()),
				connected_ids: Vec::new(),
				metrics: NodeMetrics {
					activity_percent: (rand_simple(i) * 100.0).round(),
					collaboration_percent: (rand_simple(i + 1) * 100.0).round(),
					performance_score: (rand_simple(i + 2) * 100.0).round(),
				},
			}
		})
		.collect();

	let edges: Vec<GraphEdge> = (1..n)
		.map(|i| {
			let target = (rand_simple(i) * (i as f64)) as usize;
			GraphEdge {
				from_id: format!("n{i}"),
				to_id: format!("n{target}"),
				strength: rand_simple(i + 3),
				kind: KINDS[i % KINDS.len()],
			}
		})
		.collect();

	for edge in &edges {
		for node in nodes.iter_mut() {
			if node.id == edge.from_id {
				node.connected_ids.push(edge.to_id.clone());
			} else if node.id == edge.to_id {
				node.connected_ids.push(edge.from_id.clone());
			}
		}
	}

	GraphData { nodes, edges }
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let data = generate_sample_data(36);
	let nodes = Signal::derive({
		let nodes = data.nodes.clone();
		move || nodes.clone()
	});
	let edges = Signal::derive({
		let edges = data.edges.clone();
		move || edges.clone()
	});
	let (filter, set_filter) = signal(CategoryFilter::All);
	let (selected, set_selected) = signal(None::<String>);
	let on_node_click = Callback::new(move |id: String| {
		info!("node clicked: {id}");
		set_selected.set(Some(id));
	});

	view! {
		<div class="fullscreen-graph">
			<GraphCanvas nodes=nodes edges=edges category_filter=filter on_node_click=on_node_click fullscreen=true />
			<div class="graph-overlay">
				<h1>"Agent Network"</h1>
				<p class="subtitle">"Click a node to select it. Scroll to zoom. Drag background to pan."</p>
				<select on:change=move |ev| {
					set_filter.set(event_target_value(&ev).parse().unwrap_or_default())
				}>
					<option value="all">"All categories"</option>
					{Category::ALL
						.into_iter()
						.map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
						.collect_view()}
				</select>
				<p class="selection">
					{move || selected.get().map(|id| format!("Selected: {id}")).unwrap_or_default()}
				</p>
			</div>
		</div>
	}
}

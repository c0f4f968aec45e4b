//! Reduces a canonical network to the subgraph that gets rendered.
//!
//! Nodes are ranked by the summed value of their incident edges and cut to
//! `node_top_count`. Edges survive when both endpoints do, they are not
//! self-loops and they reach `min_edge_value`. Each kept node then keeps its
//! `edge_top_count` heaviest edges; an edge stays if either endpoint keeps it.

use std::collections::{HashMap, HashSet};

use log::debug;
use serde::{Deserialize, Serialize};

use super::model::{Edge, EdgeKeyShape, Network, NodeKeyShape};

/// Default node colors, applied only where a node has none of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeStyleOverride {
	/// Outline color.
	pub stroke: Option<String>,
	/// Fill color.
	pub fill: Option<String>,
	/// Fill opacity.
	pub fill_opacity: Option<f64>,
}

/// Default edge colors, applied only where an edge has none of its own.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeStyleOverride {
	/// Line color.
	pub stroke: Option<String>,
	/// Line opacity.
	pub opacity: Option<f64>,
}

/// Parameters of [`filter_network`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterConfig {
	/// Maximum number of nodes kept.
	pub node_top_count: usize,
	/// Number of heaviest edges each kept node retains.
	pub edge_top_count: usize,
	/// Inclusive lower bound on edge value.
	pub min_edge_value: f64,
	/// Multiplier on node size.
	pub node_size_scale: f64,
	/// Multiplier on edge line width.
	pub edge_line_width_scale: f64,
	/// Node color defaults.
	pub node_style: NodeStyleOverride,
	/// Edge color defaults.
	pub edge_style: EdgeStyleOverride,
}

impl Default for FilterConfig {
	fn default() -> Self {
		Self {
			node_top_count: 30,
			edge_top_count: 3,
			min_edge_value: 1.0,
			node_size_scale: 1.0,
			edge_line_width_scale: 1.0,
			node_style: NodeStyleOverride::default(),
			edge_style: EdgeStyleOverride {
				stroke: Some("#ccc".to_string()),
				opacity: Some(0.5),
			},
		}
	}
}

impl NodeStyleOverride {
	fn apply(&self, keyshape: &mut NodeKeyShape) {
		fill_unset(&mut keyshape.stroke, &self.stroke);
		fill_unset(&mut keyshape.fill, &self.fill);
		fill_unset(&mut keyshape.fill_opacity, &self.fill_opacity);
	}
}

impl EdgeStyleOverride {
	fn apply(&self, keyshape: &mut EdgeKeyShape) {
		fill_unset(&mut keyshape.stroke, &self.stroke);
		fill_unset(&mut keyshape.opacity, &self.opacity);
	}
}

fn fill_unset<T: Clone>(target: &mut Option<T>, default: &Option<T>) {
	if target.is_none() {
		target.clone_from(default);
	}
}

/// Sum of incident edge values per node id. A self-loop counts once.
fn incident_weights(edges: &[Edge]) -> HashMap<&str, u64> {
	let mut weights: HashMap<&str, u64> = HashMap::new();
	for edge in edges {
		*weights.entry(edge.source.as_str()).or_default() += edge.value;
		if !edge.is_self_loop() {
			*weights.entry(edge.target.as_str()).or_default() += edge.value;
		}
	}
	weights
}

/// Builds the rendered subgraph of `network`. The input is left untouched.
///
/// Kept nodes and edges stay in their canonical order, so filtering the
/// result again with the same config keeps the same nodes and edges.
pub fn filter_network(network: &Network, filters: &FilterConfig) -> Network {
	let weights = incident_weights(&network.edges);
	let mut ranked: Vec<usize> = (0..network.nodes.len()).collect();
	ranked.sort_by(|&a, &b| {
		let weight = |i: usize| weights.get(network.nodes[i].id.as_str()).copied().unwrap_or(0);
		weight(b).cmp(&weight(a))
	});
	ranked.truncate(filters.node_top_count);
	let ranked_ids: Vec<&str> = ranked
		.iter()
		.map(|&i| network.nodes[i].id.as_str())
		.collect();
	// positions, not ids: an unvalidated import may repeat an id
	let mut selected = vec![false; network.nodes.len()];
	for &i in &ranked {
		selected[i] = true;
	}
	let kept: HashSet<&str> = ranked_ids.iter().copied().collect();

	let nodes: Vec<_> = network
		.nodes
		.iter()
		.zip(&selected)
		.filter(|(_, selected)| **selected)
		.map(|(node, _)| {
			let mut node = node.clone();
			node.style.keyshape.size *= filters.node_size_scale;
			filters.node_style.apply(&mut node.style.keyshape);
			node
		})
		.collect();

	let candidates: Vec<&Edge> = network
		.edges
		.iter()
		.filter(|e| {
			kept.contains(e.source.as_str())
				&& kept.contains(e.target.as_str())
				&& !e.is_self_loop()
				&& e.value as f64 >= filters.min_edge_value
		})
		.collect();

	let mut retained = vec![false; candidates.len()];
	for id in &ranked_ids {
		let mut incident: Vec<usize> = (0..candidates.len())
			.filter(|&i| candidates[i].touches(id))
			.collect();
		incident.sort_by(|&a, &b| candidates[b].value.cmp(&candidates[a].value));
		for i in incident.into_iter().take(filters.edge_top_count) {
			retained[i] = true;
		}
	}

	let edges: Vec<Edge> = candidates
		.into_iter()
		.zip(retained)
		.filter(|(_, keep)| *keep)
		.map(|(edge, _)| {
			let mut edge = edge.clone();
			edge.style.keyshape.line_width *= filters.edge_line_width_scale;
			filters.edge_style.apply(&mut edge.style.keyshape);
			edge
		})
		.collect();

	debug!(
		"filtered {}: {}/{} nodes, {}/{} edges",
		network.name,
		nodes.len(),
		network.nodes.len(),
		edges.len(),
		network.edges.len()
	);

	Network {
		name: network.name.clone(),
		direction: network.direction,
		nodes,
		edges,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::builder::{DEFAULT_NODE_LIMIT, build_network};
	use crate::network::model::Node;
	use proptest::prelude::*;

	fn network(ids: &[&str], edges: Vec<Edge>) -> Network {
		Network {
			name: "f".into(),
			direction: Some(false),
			nodes: ids.iter().map(|id| Node::new(*id, 1, 10.0)).collect(),
			edges,
		}
	}

	fn plain() -> FilterConfig {
		FilterConfig {
			node_top_count: 100,
			edge_top_count: 100,
			min_edge_value: 0.0,
			edge_style: EdgeStyleOverride::default(),
			..Default::default()
		}
	}

	fn pairs(network: &Network) -> Vec<(&str, &str, u64)> {
		network
			.edges
			.iter()
			.map(|e| (e.source.as_str(), e.target.as_str(), e.value))
			.collect()
	}

	fn star() -> Network {
		network(
			&["hub", "l1", "l2", "l3", "l4", "l5"],
			vec![
				Edge::new("hub", "l1", 1, 1.0),
				Edge::new("hub", "l2", 5, 1.0),
				Edge::new("hub", "l3", 3, 1.0),
				Edge::new("hub", "l4", 4, 1.0),
				Edge::new("hub", "l5", 2, 1.0),
			],
		)
	}

	#[test]
	fn zero_node_count_yields_an_empty_graph() {
		let config = FilterConfig {
			node_top_count: 0,
			..plain()
		};
		let filtered = filter_network(&star(), &config);
		assert!(filtered.nodes.is_empty());
		assert!(filtered.edges.is_empty());
	}

	#[test]
	fn repeated_node_ids_do_not_exceed_node_count() {
		let imported = crate::network::parse_network_text(
			"dupes.json",
			r#"{"nodes":[{"id":"a"},{"id":"b"},{"id":"a"}],
			"edges":[{"source":"a","target":"b","value":2}]}"#,
		)
		.unwrap();
		let config = FilterConfig {
			node_top_count: 2,
			..plain()
		};
		let filtered = filter_network(&imported, &config);
		assert_eq!(filtered.nodes.len(), 2);
		assert_eq!(pairs(&filtered), vec![("a", "b", 2)]);
	}

	#[test]
	fn ranks_nodes_by_incident_edge_weight() {
		let mut net = network(
			&["a", "b", "c", "d"],
			vec![
				Edge::new("c", "d", 10, 1.0),
				Edge::new("a", "d", 1, 1.0),
				Edge::new("b", "c", 2, 1.0),
			],
		);
		// stored value must not drive the ranking
		net.nodes[0].value = 1000;
		let config = FilterConfig {
			node_top_count: 2,
			..plain()
		};
		let filtered = filter_network(&net, &config);
		let ids: Vec<&str> = filtered.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["c", "d"]);
		assert_eq!(pairs(&filtered), vec![("c", "d", 10)]);
	}

	#[test]
	fn ties_keep_canonical_order() {
		let net = network(
			&["a", "b", "c"],
			vec![Edge::new("a", "b", 1, 1.0), Edge::new("c", "b", 1, 1.0)],
		);
		let config = FilterConfig {
			node_top_count: 2,
			..plain()
		};
		let ids: Vec<String> = filter_network(&net, &config)
			.nodes
			.into_iter()
			.map(|n| n.id)
			.collect();
		assert_eq!(ids, vec!["a", "b"]);
	}

	#[test]
	fn edge_cap_is_a_union_across_endpoints() {
		let config = FilterConfig {
			edge_top_count: 2,
			..plain()
		};
		let filtered = filter_network(&star(), &config);
		assert_eq!(filtered.nodes.len(), 6);
		// each leaf keeps its only edge even where the hub ranks it lower
		assert_eq!(filtered.edges.len(), 5);
		assert!(filtered.edges.len() > config.edge_top_count);
	}

	#[test]
	fn hub_keeps_only_its_top_edges_among_hub_ranked_edges() {
		// leaves are linked among themselves so their own top lists favour each other
		let mut net = star();
		net.edges.extend([
			Edge::new("l1", "l3", 9, 1.0),
			Edge::new("l1", "l5", 9, 1.0),
			Edge::new("l3", "l5", 9, 1.0),
		]);
		let config = FilterConfig {
			edge_top_count: 2,
			..plain()
		};
		let filtered = filter_network(&net, &config);
		let hub_edges: Vec<u64> = filtered
			.edges
			.iter()
			.filter(|e| e.touches("hub"))
			.map(|e| e.value)
			.collect();
		// hub top 2 is l2 (5) and l4 (4); l2 and l4 have only the hub edge
		assert_eq!(hub_edges, vec![5, 4]);
		assert_eq!(filtered.edges.len(), 5);
	}

	#[test]
	fn drops_self_loops_and_light_edges() {
		let net = network(
			&["a", "b", "c"],
			vec![
				Edge::new("a", "a", 50, 1.0),
				Edge::new("a", "b", 3, 1.0),
				Edge::new("b", "c", 2, 1.0),
			],
		);
		let config = FilterConfig {
			min_edge_value: 3.0,
			..plain()
		};
		let filtered = filter_network(&net, &config);
		assert_eq!(pairs(&filtered), vec![("a", "b", 3)]);
		assert_eq!(filtered.nodes.len(), 3);
	}

	#[test]
	fn never_emits_edges_to_excluded_or_missing_nodes() {
		let net = network(
			&["a", "b", "c"],
			vec![
				Edge::new("a", "b", 5, 1.0),
				Edge::new("b", "c", 1, 1.0),
				Edge::new("a", "ghost", 9, 1.0),
			],
		);
		let config = FilterConfig {
			node_top_count: 2,
			..plain()
		};
		let filtered = filter_network(&net, &config);
		assert!(filtered.dangling_edges().is_empty());
		assert_eq!(pairs(&filtered), vec![("a", "b", 5)]);
	}

	#[test]
	fn scales_and_fills_unset_styles_only() {
		let mut net = network(&["a", "b"], vec![Edge::new("a", "b", 1, 2.0)]);
		net.nodes[0].style.keyshape.fill = Some("#f00".into());
		net.nodes[0].style.keyshape.fill_opacity = Some(0.0);
		net.edges[0].style.keyshape.opacity = Some(1.0);
		let config = FilterConfig {
			node_size_scale: 1.5,
			edge_line_width_scale: 0.5,
			node_style: NodeStyleOverride {
				stroke: Some("#000".into()),
				fill: Some("#0f0".into()),
				fill_opacity: Some(0.8),
			},
			edge_style: EdgeStyleOverride {
				stroke: Some("#ccc".into()),
				opacity: Some(0.5),
			},
			..plain()
		};
		let filtered = filter_network(&net, &config);
		let a = &filtered.nodes[0].style.keyshape;
		assert_eq!(a.size, 15.0);
		assert_eq!(a.fill.as_deref(), Some("#f00"));
		assert_eq!(a.fill_opacity, Some(0.0));
		assert_eq!(a.stroke.as_deref(), Some("#000"));
		let b = &filtered.nodes[1].style.keyshape;
		assert_eq!(b.fill.as_deref(), Some("#0f0"));
		let edge = &filtered.edges[0].style.keyshape;
		assert_eq!(edge.line_width, 1.0);
		assert_eq!(edge.stroke.as_deref(), Some("#ccc"));
		assert_eq!(edge.opacity, Some(1.0));
	}

	#[test]
	fn input_is_not_mutated() {
		let net = star();
		let before = net.clone();
		let config = FilterConfig {
			node_top_count: 2,
			node_size_scale: 3.0,
			..Default::default()
		};
		let _ = filter_network(&net, &config);
		assert_eq!(net, before);
	}

	#[test]
	fn config_reads_camel_case_json_with_defaults() {
		let config: FilterConfig =
			serde_json::from_str(r#"{"nodeTopCount": 5, "edgeStyle": {"stroke": "red"}}"#).unwrap();
		assert_eq!(config.node_top_count, 5);
		assert_eq!(config.edge_top_count, 3);
		assert_eq!(config.edge_style.stroke.as_deref(), Some("red"));
		assert_eq!(config.edge_style.opacity, None);
	}

	fn token_groups() -> impl Strategy<Value = Vec<Vec<String>>> {
		prop::collection::vec(prop::collection::vec("[a-h]", 1..5), 0..25)
	}

	proptest! {
		#[test]
		fn filtering_is_idempotent(
			groups in token_groups(),
			node_top_count in 0usize..10,
			edge_top_count in 0usize..4,
			min_edge_value in 0.0f64..3.0,
		) {
			let network = build_network("prop", &groups, DEFAULT_NODE_LIMIT);
			let config = FilterConfig {
				node_top_count,
				edge_top_count,
				min_edge_value,
				..Default::default()
			};
			let once = filter_network(&network, &config);
			let twice = filter_network(&once, &config);
			prop_assert_eq!(once, twice);
		}

		#[test]
		fn filtered_edges_stay_attached(
			groups in token_groups(),
			node_top_count in 0usize..10,
			edge_top_count in 0usize..4,
		) {
			let network = build_network("prop", &groups, DEFAULT_NODE_LIMIT);
			let config = FilterConfig { node_top_count, edge_top_count, ..Default::default() };
			let filtered = filter_network(&network, &config);
			prop_assert!(filtered.nodes.len() <= node_top_count);
			prop_assert!(filtered.dangling_edges().is_empty());
			prop_assert!(filtered.edges.iter().all(|e| !e.is_self_loop()));
		}
	}
}

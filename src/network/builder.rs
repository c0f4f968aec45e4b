//! Turns token groups into a weighted co-occurrence network.
//!
//! Node weight is the number of times a token occurs across all lines. Edge
//! weight depends on the shape of the input: when every line is a
//! `source,target` pair the network is directed and each ordered pair is
//! counted on its own; otherwise every line is a group and each unordered
//! pair of distinct tokens in it co-occurs once per line.

use std::collections::{BTreeMap, HashMap, HashSet};

use log::debug;

use super::model::{Edge, Network, Node};

/// Default cap on the number of nodes kept by [`build_network`].
pub const DEFAULT_NODE_LIMIT: usize = 2000;

const MAX_NODE_SIZE: f64 = 50.0;
const MAX_LINE_WIDTH: f64 = 20.0;

/// `count / max_count * span`, rounded up to two decimals. Zero when `max_count` is zero.
fn scaled(count: u64, max_count: u64, span: f64) -> f64 {
	if max_count == 0 {
		return 0.0;
	}
	((count as f64 / max_count as f64) * span * 100.0).ceil() / 100.0
}

/// Node diameter for a token seen `count` times.
pub fn node_size(count: u64, max_count: u64) -> f64 {
	scaled(count, max_count, MAX_NODE_SIZE)
}

/// Edge stroke width for a pair seen `count` times.
pub fn edge_line_width(count: u64, max_count: u64) -> f64 {
	scaled(count, max_count, MAX_LINE_WIDTH)
}

/// Whether `lines` are directed `source,target` records.
///
/// Empty input is undirected.
pub fn infer_direction<S: AsRef<str>>(lines: &[Vec<S>]) -> bool {
	!lines.is_empty() && lines.iter().all(|line| line.len() == 2)
}

/// Token frequencies in first-encounter order.
fn count_tokens<S: AsRef<str>>(lines: &[Vec<S>]) -> Vec<(&str, u64)> {
	let mut index: HashMap<&str, usize> = HashMap::new();
	let mut counts: Vec<(&str, u64)> = Vec::new();
	for token in lines.iter().flatten() {
		let token = token.as_ref();
		match index.get(token) {
			Some(&i) => counts[i].1 += 1,
			None => {
				index.insert(token, counts.len());
				counts.push((token, 1));
			}
		}
	}
	counts
}

/// Builds a network from token groups, keeping the `limit` most frequent tokens.
///
/// Ties in frequency keep the order in which tokens were first seen. Pairs
/// that never co-occur and self pairs produce no edge, so every edge has a
/// positive value and both endpoints among the kept nodes.
pub fn build_network<S: AsRef<str>>(name: &str, lines: &[Vec<S>], limit: usize) -> Network {
	let mut counts = count_tokens(lines);
	counts.sort_by(|a, b| b.1.cmp(&a.1));
	counts.truncate(limit);

	let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0);
	let nodes: Vec<Node> = counts
		.iter()
		.map(|&(id, count)| Node::new(id, count, node_size(count, max_count)))
		.collect();
	let position: HashMap<&str, usize> = counts
		.iter()
		.enumerate()
		.map(|(i, &(id, _))| (id, i))
		.collect();

	let directed = infer_direction(lines);
	let pairs = if directed {
		count_directed_pairs(lines, &position)
	} else {
		count_group_pairs(lines, &position)
	};

	let edges: Vec<Edge> = pairs
		.into_iter()
		.map(|((i, j), count)| {
			Edge::new(
				nodes[i].id.clone(),
				nodes[j].id.clone(),
				count,
				edge_line_width(count, max_count),
			)
		})
		.collect();

	debug!(
		"built network {name}: {} lines, {} nodes, {} edges, directed={directed}",
		lines.len(),
		nodes.len(),
		edges.len()
	);

	Network {
		name: name.to_string(),
		direction: Some(directed),
		nodes,
		edges,
	}
}

/// Counts `line[0] -> line[1]` records between distinct kept nodes, keyed by node position.
fn count_directed_pairs<S: AsRef<str>>(
	lines: &[Vec<S>],
	position: &HashMap<&str, usize>,
) -> BTreeMap<(usize, usize), u64> {
	let mut pairs = BTreeMap::new();
	for line in lines {
		let [source, target] = line.as_slice() else {
			continue;
		};
		let (Some(&i), Some(&j)) = (position.get(source.as_ref()), position.get(target.as_ref()))
		else {
			continue;
		};
		if i != j {
			*pairs.entry((i, j)).or_insert(0) += 1;
		}
	}
	pairs
}

/// Counts lines containing both tokens of each unordered pair of distinct kept
/// nodes, keyed by `(lower, higher)` node position.
fn count_group_pairs<S: AsRef<str>>(
	lines: &[Vec<S>],
	position: &HashMap<&str, usize>,
) -> BTreeMap<(usize, usize), u64> {
	let mut pairs = BTreeMap::new();
	for line in lines {
		let mut members: Vec<usize> = line
			.iter()
			.filter_map(|token| position.get(token.as_ref()).copied())
			.collect::<HashSet<_>>()
			.into_iter()
			.collect();
		members.sort_unstable();
		for (k, &i) in members.iter().enumerate() {
			for &j in &members[k + 1..] {
				*pairs.entry((i, j)).or_insert(0) += 1;
			}
		}
	}
	pairs
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	fn lines(raw: &[&[&str]]) -> Vec<Vec<String>> {
		raw.iter()
			.map(|line| line.iter().map(|t| t.to_string()).collect())
			.collect()
	}

	fn edge<'a>(network: &'a Network, source: &str, target: &str) -> Option<&'a Edge> {
		network
			.edges
			.iter()
			.find(|e| e.source == source && e.target == target)
	}

	#[test]
	fn counts_group_co_occurrence() {
		let network = build_network(
			"langs",
			&lines(&[&["a", "b"], &["a", "b"], &["a", "c"], &["a"]]),
			DEFAULT_NODE_LIMIT,
		);
		assert_eq!(network.direction, Some(false));
		let values: Vec<(&str, u64)> = network
			.nodes
			.iter()
			.map(|n| (n.id.as_str(), n.value))
			.collect();
		assert_eq!(values, vec![("a", 4), ("b", 2), ("c", 1)]);
		assert_eq!(network.edges.len(), 2);
		assert_eq!(edge(&network, "a", "b").map(|e| e.value), Some(2));
		assert_eq!(edge(&network, "a", "c").map(|e| e.value), Some(1));
		assert!(network.edges.iter().all(|e| !e.is_self_loop()));
	}

	#[test]
	fn pair_lines_count_each_occurrence() {
		// every line is a pair, so the result is directed; the counts are the
		// same either way since no pair appears reversed
		let network = build_network(
			"pairs",
			&lines(&[&["a", "b"], &["a", "b"], &["a", "c"]]),
			DEFAULT_NODE_LIMIT,
		);
		assert_eq!(network.direction, Some(true));
		let values: Vec<(&str, u64)> = network
			.nodes
			.iter()
			.map(|n| (n.id.as_str(), n.value))
			.collect();
		assert_eq!(values, vec![("a", 3), ("b", 2), ("c", 1)]);
		assert_eq!(network.edges.len(), 2);
		assert_eq!(edge(&network, "a", "b").map(|e| e.value), Some(2));
		assert_eq!(edge(&network, "a", "c").map(|e| e.value), Some(1));
		assert!(network.edges.iter().all(|e| !e.is_self_loop()));
	}

	#[test]
	fn pair_records_with_one_group_line_stay_undirected() {
		let network = build_network(
			"mixed",
			&lines(&[&["a", "b"], &["a", "b"], &["a", "c", "d"]]),
			DEFAULT_NODE_LIMIT,
		);
		assert_eq!(network.direction, Some(false));
		assert_eq!(edge(&network, "a", "b").map(|e| e.value), Some(2));
		assert_eq!(edge(&network, "c", "d").map(|e| e.value), Some(1));
	}

	#[test]
	fn splits_directed_pairs() {
		let network = build_network(
			"moves",
			&lines(&[&["x", "y"], &["y", "x"], &["x", "y"]]),
			DEFAULT_NODE_LIMIT,
		);
		assert_eq!(network.direction, Some(true));
		assert_eq!(network.edges.len(), 2);
		assert_eq!(edge(&network, "x", "y").map(|e| e.value), Some(2));
		assert_eq!(edge(&network, "y", "x").map(|e| e.value), Some(1));
	}

	#[test]
	fn directed_self_pairs_are_not_materialized() {
		let network = build_network("loops", &lines(&[&["x", "x"], &["x", "y"]]), 10);
		assert_eq!(network.direction, Some(true));
		assert_eq!(network.nodes[0].value, 3);
		assert_eq!(network.edges.len(), 1);
		assert_eq!(edge(&network, "x", "y").map(|e| e.value), Some(1));
	}

	#[test]
	fn repeated_tokens_in_a_group_count_once_per_line() {
		let network = build_network("dupes", &lines(&[&["a", "b", "a"]]), 10);
		assert_eq!(network.nodes[0].value, 2);
		assert_eq!(edge(&network, "a", "b").map(|e| e.value), Some(1));
	}

	#[test]
	fn limit_keeps_most_frequent_with_stable_ties() {
		let network = build_network(
			"top",
			&lines(&[&["c", "b", "a"], &["a", "d"], &["b", "e"]]),
			2,
		);
		let ids: Vec<&str> = network.nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, vec!["b", "a"]);
		assert_eq!(network.edges.len(), 1);
		assert_eq!(edge(&network, "b", "a").map(|e| e.value), Some(1));
	}

	#[test]
	fn scales_sizes_and_widths_against_the_top_count() {
		let network = build_network(
			"scale",
			&lines(&[&["a", "b"], &["a", "c"], &["a", "b", "c"]]),
			10,
		);
		// a=3, b=2, c=2
		assert_eq!(network.nodes[0].style.keyshape.size, 50.0);
		assert_eq!(network.nodes[1].style.keyshape.size, 33.34);
		assert_eq!(network.nodes[0].style.label.value, "a");
		let ab = edge(&network, "a", "b").unwrap();
		assert_eq!(ab.value, 2);
		assert_eq!(ab.style.keyshape.line_width, 13.34);
		let bc = edge(&network, "b", "c").unwrap();
		assert_eq!(bc.style.keyshape.line_width, 6.67);
	}

	#[test]
	fn empty_input_builds_an_empty_network() {
		let network = build_network::<String>("empty", &[], DEFAULT_NODE_LIMIT);
		assert!(network.nodes.is_empty());
		assert!(network.edges.is_empty());
		assert_eq!(network.direction, Some(false));
		assert_eq!(node_size(0, 0), 0.0);
	}

	fn token_groups() -> impl Strategy<Value = Vec<Vec<String>>> {
		prop::collection::vec(
			prop::collection::vec("[a-f]", 1..5),
			0..20,
		)
	}

	proptest! {
		#[test]
		fn edges_are_positive_and_attached(groups in token_groups(), limit in 0usize..8) {
			let network = build_network("prop", &groups, limit);
			let ids = network.node_ids();
			prop_assert!(network.nodes.len() <= limit);
			for edge in &network.edges {
				prop_assert!(edge.value > 0);
				prop_assert!(!edge.is_self_loop());
				prop_assert!(ids.contains(edge.source.as_str()));
				prop_assert!(ids.contains(edge.target.as_str()));
			}
		}

		#[test]
		fn building_is_deterministic(groups in token_groups()) {
			let first = build_network("prop", &groups, DEFAULT_NODE_LIMIT);
			let second = build_network("prop", &groups, DEFAULT_NODE_LIMIT);
			prop_assert_eq!(first, second);
		}

		#[test]
		fn direction_follows_line_shape(groups in token_groups()) {
			let network = build_network("prop", &groups, DEFAULT_NODE_LIMIT);
			let pairs_only = !groups.is_empty() && groups.iter().all(|l| l.len() == 2);
			prop_assert_eq!(network.direction, Some(pairs_only));
		}
	}
}

//! Correlation matrix export.
//!
//! One row per node, `id,count_1,...,count_n`, columns in node order. A cell
//! sums the values of every edge between the two nodes in either direction,
//! so styles and directionality are lost. Re-importing the text runs it through
//! the co-occurrence builder, which does not reconstruct the original graph.

use std::collections::HashMap;

use super::model::Network;

/// Renders `network` as header-less comma separated correlation rows.
pub fn network_to_correlation_text(network: &Network) -> String {
	let n = network.nodes.len();
	let index: HashMap<&str, usize> = network
		.nodes
		.iter()
		.enumerate()
		.map(|(i, node)| (node.id.as_str(), i))
		.collect();

	let mut matrix = vec![vec![0u64; n]; n];
	for edge in &network.edges {
		let (Some(&i), Some(&j)) = (
			index.get(edge.source.as_str()),
			index.get(edge.target.as_str()),
		) else {
			continue;
		};
		matrix[i][j] += edge.value;
		if i != j {
			matrix[j][i] += edge.value;
		}
	}

	network
		.nodes
		.iter()
		.zip(&matrix)
		.map(|(node, row)| {
			std::iter::once(node.id.clone())
				.chain(row.iter().map(u64::to_string))
				.collect::<Vec<_>>()
				.join(",")
		})
		.collect::<Vec<_>>()
		.join("\n")
}

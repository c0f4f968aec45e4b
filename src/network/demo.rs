//! Built-in demo datasets, looked up by name.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::info;

use super::builder::{DEFAULT_NODE_LIMIT, build_network};
use super::error::{NetworkError, Result};
use super::ingest::parse_lines;
use super::model::Network;

/// Dataset loaded when the viewer starts.
pub const DEFAULT_DEMO_DATASET: &str = "wakatime-leaders";

/// Raw token groups of one demo dataset.
struct DemoDataset {
	lines: Vec<Vec<String>>,
}

static DEMO_DATASETS: LazyLock<BTreeMap<&'static str, DemoDataset>> = LazyLock::new(|| {
	[
		// languages listed together on leaderboard profiles
		(
			"wakatime-leaders",
			include_str!("../../data/wakatime-leaders.csv"),
		),
		// source,target pairs of projects moving between languages
		(
			"language-migrations",
			include_str!("../../data/language-migrations.csv"),
		),
	]
	.into_iter()
	.map(|(name, text)| {
		(
			name,
			DemoDataset {
				lines: parse_lines(text),
			},
		)
	})
	.collect()
});

/// Names of the registered demo datasets, sorted.
pub fn demo_dataset_names() -> Vec<&'static str> {
	DEMO_DATASETS.keys().copied().collect()
}

/// Builds the network of the demo dataset `name`.
pub fn get_demo_data(name: &str) -> Result<Network> {
	let dataset = DEMO_DATASETS
		.get(name)
		.ok_or_else(|| NetworkError::UnknownDemoDataset(name.to_string()))?;
	info!("loading demo dataset {name} ({} lines)", dataset.lines.len());
	Ok(build_network(name, &dataset.lines, DEFAULT_NODE_LIMIT))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn lists_registered_datasets() {
		assert_eq!(
			demo_dataset_names(),
			vec!["language-migrations", "wakatime-leaders"]
		);
	}

	#[test]
	fn default_dataset_builds_an_undirected_network() {
		let network = get_demo_data(DEFAULT_DEMO_DATASET).unwrap();
		assert_eq!(network.name, DEFAULT_DEMO_DATASET);
		assert_eq!(network.direction, Some(false));
		assert!(!network.nodes.is_empty());
		assert!(!network.edges.is_empty());
		assert!(network.validate().is_ok());
	}

	#[test]
	fn pair_dataset_is_directed() {
		let network = get_demo_data("language-migrations").unwrap();
		assert_eq!(network.direction, Some(true));
		let js_ts = network
			.edges
			.iter()
			.find(|e| e.source == "JavaScript" && e.target == "TypeScript")
			.map(|e| e.value);
		assert_eq!(js_ts, Some(3));
	}

	#[test]
	fn unknown_names_are_rejected() {
		match get_demo_data("github-stars") {
			Err(NetworkError::UnknownDemoDataset(name)) => assert_eq!(name, "github-stars"),
			other => panic!("unexpected {other:?}"),
		}
	}
}

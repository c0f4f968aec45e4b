//! Reads imported text as a prebuilt network document or as co-occurrence lines.

use log::{debug, warn};
use serde_json::Value;

use super::builder::{DEFAULT_NODE_LIMIT, build_network};
use super::error::{NetworkError, Result};
use super::model::Network;

/// Splits text into token groups: one group per non-empty line, tokens separated by commas.
///
/// Tokens are trimmed and empty tokens dropped; lines left without tokens are skipped.
pub fn parse_lines(text: &str) -> Vec<Vec<String>> {
	text.lines()
		.map(str::trim)
		.filter(|line| !line.is_empty())
		.map(|line| {
			line.split(',')
				.map(str::trim)
				.filter(|token| !token.is_empty())
				.map(str::to_string)
				.collect::<Vec<_>>()
		})
		.filter(|tokens| !tokens.is_empty())
		.collect()
}

/// Parses an imported file with the default node limit.
pub fn parse_network_text(name: &str, text: &str) -> Result<Network> {
	parse_network_text_with_limit(name, text, DEFAULT_NODE_LIMIT)
}

/// Parses an imported file.
///
/// JSON documents carrying both `nodes` and `edges` are taken as they are,
/// renamed to `name`; edges are not checked against the node set. Counts
/// must be whole numbers, though `2.0` is read as `2`; fractional or negative
/// counts and any other JSON value are rejected with
/// [`NetworkError::InvalidFormat`]. Text that is
/// not JSON is read as comma separated lines and built into a network with at
/// most `limit` nodes.
pub fn parse_network_text_with_limit(name: &str, text: &str, limit: usize) -> Result<Network> {
	if let Ok(document) = serde_json::from_str::<Value>(text) {
		return network_from_document(name, document);
	}

	let lines = parse_lines(text);
	debug!("{name}: read {} token lines", lines.len());
	Ok(build_network(name, &lines, limit))
}

fn network_from_document(name: &str, document: Value) -> Result<Network> {
	let has_graph = document.get("nodes").is_some() && document.get("edges").is_some();
	if !has_graph {
		warn!("{name}: JSON document has no nodes/edges");
		return Err(NetworkError::InvalidFormat(name.to_string()));
	}

	let mut network: Network = serde_json::from_value(document).map_err(|e| {
		warn!("{name}: {e}");
		NetworkError::InvalidFormat(format!("{name} ({e})"))
	})?;
	network.name = name.to_string();
	Ok(network)
}

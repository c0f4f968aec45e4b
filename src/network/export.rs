//! JSON export of a network, in the same layout the importer reads.

use super::error::Result;
use super::model::Network;

/// Pretty-printed JSON document of `network`, readable by [`parse_network_text`](super::parse_network_text).
pub fn network_to_json(network: &Network) -> Result<String> {
	Ok(serde_json::to_string_pretty(network)?)
}

//! Network error types

use thiserror::Error;

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors raised while importing, exporting or looking up networks
#[derive(Debug, Error)]
pub enum NetworkError {
	/// Text parsed as JSON but is not a network document.
	#[error("{0} is not a valid network file")]
	InvalidFormat(String),

	/// No demo dataset is registered under the name.
	#[error("Unknown demo dataset: {0}")]
	UnknownDemoDataset(String),

	/// An edge references a node id that is not in the network.
	#[error("Edge {from} -> {to} references a missing node")]
	DanglingEdge {
		/// Edge source id.
		from: String,
		/// Edge target id.
		to: String,
	},

	/// JSON serialization failed.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

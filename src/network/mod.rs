//! Co-occurrence network construction, interchange and filtering.
//!
//! Data flows one way: imported text is parsed ([`parse_network_text`]) or a
//! demo dataset is loaded ([`get_demo_data`]) into a canonical [`Network`],
//! which [`filter_network`] reduces to the subgraph handed to the canvas.
//! Everything here is synchronous and free of browser APIs.

mod builder;
mod correlation;
mod demo;
mod editor;
mod error;
mod export;
mod filter;
mod ingest;
mod model;

pub use builder::{DEFAULT_NODE_LIMIT, build_network, edge_line_width, infer_direction, node_size};
pub use correlation::network_to_correlation_text;
pub use demo::{DEFAULT_DEMO_DATASET, demo_dataset_names, get_demo_data};
pub use editor::{StyleRow, apply_style_rows, style_rows};
pub use error::{NetworkError, Result};
pub use export::network_to_json;
pub use filter::{EdgeStyleOverride, FilterConfig, NodeStyleOverride, filter_network};
pub use ingest::{parse_lines, parse_network_text, parse_network_text_with_limit};
pub use model::{
	Arrow, Edge, EdgeKeyShape, EdgeStyle, Label, Network, NetworkSummary, Node, NodeKeyShape,
	NodeStyle,
};

pub mod data_panel;
pub mod download;
pub mod filter_panel;
pub mod force_graph;

use std::collections::HashMap;

use crate::network::{Arrow, Network};

const DEFAULT_NODE_COLOR: &str = "#5b8ff9";
const DEFAULT_EDGE_COLOR: &str = "#ccc";
const DEFAULT_EDGE_OPACITY: f64 = 0.5;
const MIN_NODE_SIZE: f64 = 4.0;

/// Spacing between parallel edges of the same node pair.
pub const PARALLEL_EDGE_OFFSET: f64 = 50.0;
/// Self-loop size; the loop is drawn with half this diameter.
pub const SELF_LOOP_SIZE: f64 = 100.0;

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
	pub id: String,
	pub label: Option<String>,
	pub fill: String,
	pub stroke: Option<String>,
	pub fill_opacity: f64,
	pub size: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphLink {
	pub source: String,
	pub target: String,
	pub width: f64,
	pub color: String,
	pub opacity: f64,
	pub arrow: bool,
	/// Perpendicular bend in canvas units; zero draws a straight line.
	pub curve_offset: f64,
	pub self_loop: bool,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphData {
	pub nodes: Vec<GraphNode>,
	pub links: Vec<GraphLink>,
}

/// How a filtered network is decorated for drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOptions {
	pub show_arrows: bool,
}

impl Default for RenderOptions {
	fn default() -> Self {
		Self { show_arrows: true }
	}
}

impl GraphData {
	/// Decorates `network` for the canvas. Arrowheads are only drawn for
	/// directed networks and when `options.show_arrows` is set.
	pub fn from_network(network: &Network, options: RenderOptions) -> Self {
		let nodes = network
			.nodes
			.iter()
			.map(|node| {
				let shape = &node.style.keyshape;
				let label = &node.style.label.value;
				GraphNode {
					id: node.id.clone(),
					label: (!label.is_empty()).then(|| label.clone()),
					fill: shape
						.fill
						.clone()
						.unwrap_or_else(|| DEFAULT_NODE_COLOR.to_string()),
					stroke: shape.stroke.clone(),
					fill_opacity: shape.fill_opacity.unwrap_or(1.0),
					size: shape.size.max(MIN_NODE_SIZE),
				}
			})
			.collect();

		let arrows = options.show_arrows && network.is_directed();
		let offsets = route_edges(network);
		let links = network
			.edges
			.iter()
			.zip(offsets)
			.map(|(edge, curve_offset)| {
				let shape = &edge.style.keyshape;
				let arrow = arrows && shape.end_arrow.as_ref().is_none_or(Arrow::is_visible);
				GraphLink {
					source: edge.source.clone(),
					target: edge.target.clone(),
					width: shape.line_width,
					color: shape
						.stroke
						.clone()
						.unwrap_or_else(|| DEFAULT_EDGE_COLOR.to_string()),
					opacity: shape.opacity.unwrap_or(DEFAULT_EDGE_OPACITY),
					arrow,
					curve_offset,
					self_loop: edge.is_self_loop(),
				}
			})
			.collect();

		Self { nodes, links }
	}
}

/// Bend per edge so that edges sharing a node pair fan out instead of
/// overlapping. A lone edge stays straight; self-loops get the loop size.
fn route_edges(network: &Network) -> Vec<f64> {
	let mut groups: HashMap<(&str, &str), Vec<usize>> = HashMap::new();
	for (i, edge) in network.edges.iter().enumerate() {
		let (a, b) = (edge.source.as_str(), edge.target.as_str());
		let key = if a <= b { (a, b) } else { (b, a) };
		groups.entry(key).or_default().push(i);
	}

	let mut offsets = vec![0.0; network.edges.len()];
	for ((a, b), members) in groups {
		if a == b {
			for (k, &i) in members.iter().enumerate() {
				offsets[i] = SELF_LOOP_SIZE * (1.0 + k as f64 * 0.5);
			}
			continue;
		}
		if members.len() < 2 {
			continue;
		}
		for (k, &i) in members.iter().enumerate() {
			// alternate sides: +1, -1, +2, -2, ...
			let step = (k / 2 + 1) as f64;
			let side = if k % 2 == 0 { 1.0 } else { -1.0 };
			// the bend is measured along source -> target, so reversed edges flip
			let flip = if network.edges[i].source.as_str() == a { 1.0 } else { -1.0 };
			offsets[i] = PARALLEL_EDGE_OFFSET * step * side * flip;
		}
	}
	offsets
}

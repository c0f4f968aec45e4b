//! Typed network shape shared by the builder, the filter and the renderer.
//!
//! The JSON layout matches the documents the viewer imports and exports:
//! `{ name, direction?, nodes: [{ id, value, style }], edges: [{ source, target, value, style }] }`
//! with camelCase style keys (`keyshape`, `lineWidth`, `fillOpacity`, `endArrow`).

use std::collections::HashSet;

use serde::{Deserialize, Deserializer, Serialize};

use super::error::{NetworkError, Result};

/// A co-occurrence graph: weighted nodes plus the weighted links between them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
	/// Display name, usually the dataset or file name.
	#[serde(default)]
	pub name: String,
	/// `Some(true)` when edges are directed `source -> target` records.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub direction: Option<bool>,
	/// Nodes in canonical order. `id` is unique.
	pub nodes: Vec<Node>,
	/// Edges in canonical order.
	pub edges: Vec<Edge>,
}

/// A single token of the input data.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
	/// Identity key, used to join edges and style edits.
	pub id: String,
	/// Occurrence count of the token.
	#[serde(default, deserialize_with = "whole_count")]
	pub value: u64,
	/// Visual encoding.
	#[serde(default)]
	pub style: NodeStyle,
}

/// Counts may be written as integral floats (`2.0`), as other tools emit them.
fn whole_count<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Count {
		Whole(u64),
		Float(f64),
	}

	match Count::deserialize(deserializer)? {
		Count::Whole(n) => Ok(n),
		Count::Float(f) if f >= 0.0 && f.fract() == 0.0 && f <= u64::MAX as f64 => Ok(f as u64),
		Count::Float(f) => Err(serde::de::Error::custom(format!(
			"expected a non-negative whole count, found {f}"
		))),
	}
}

/// Visual encoding of a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
	/// Shape attributes.
	#[serde(default)]
	pub keyshape: NodeKeyShape,
	/// Text label.
	#[serde(default)]
	pub label: Label,
}

/// Shape attributes of a node. Absent colors fall back to filter overrides.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeKeyShape {
	/// Diameter in canvas units.
	#[serde(default)]
	pub size: f64,
	/// Outline color.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stroke: Option<String>,
	/// Fill color.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill: Option<String>,
	/// Fill opacity in `[0, 1]`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub fill_opacity: Option<f64>,
}

/// Text label of a node.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
	/// Label text.
	#[serde(default)]
	pub value: String,
}

/// A weighted link between two node ids.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Edge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Co-occurrence count, always positive for built networks.
	#[serde(default, deserialize_with = "whole_count")]
	pub value: u64,
	/// Visual encoding.
	#[serde(default)]
	pub style: EdgeStyle,
}

/// Visual encoding of an edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeStyle {
	/// Line attributes.
	#[serde(default)]
	pub keyshape: EdgeKeyShape,
}

/// Line attributes of an edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeKeyShape {
	/// Stroke width in canvas units.
	#[serde(default)]
	pub line_width: f64,
	/// Line color.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub stroke: Option<String>,
	/// Line opacity in `[0, 1]`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub opacity: Option<f64>,
	/// Arrowhead; an empty `path` suppresses it.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub end_arrow: Option<Arrow>,
}

/// Arrowhead marker of an edge.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
	/// Marker path. Empty means no arrowhead is drawn.
	#[serde(default)]
	pub path: String,
}

impl Arrow {
	/// An arrow marker that draws nothing.
	pub fn suppressed() -> Self {
		Self {
			path: String::new(),
		}
	}

	/// Whether the marker draws anything.
	pub fn is_visible(&self) -> bool {
		!self.path.is_empty()
	}
}

/// Counts shown by the data panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkSummary {
	/// Network name.
	pub name: String,
	/// Number of nodes.
	pub nodes: usize,
	/// Number of edges.
	pub edges: usize,
	/// Whether edges are directed.
	pub directed: bool,
}

impl Node {
	/// Node labelled with its own id.
	pub fn new(id: impl Into<String>, value: u64, size: f64) -> Self {
		let id = id.into();
		Self {
			style: NodeStyle {
				keyshape: NodeKeyShape {
					size,
					..Default::default()
				},
				label: Label { value: id.clone() },
			},
			id,
			value,
		}
	}
}

impl Edge {
	/// Unstyled edge with the given stroke width.
	pub fn new(
		source: impl Into<String>,
		target: impl Into<String>,
		value: u64,
		line_width: f64,
	) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			value,
			style: EdgeStyle {
				keyshape: EdgeKeyShape {
					line_width,
					..Default::default()
				},
			},
		}
	}

	/// Whether the edge starts and ends on the same node.
	pub fn is_self_loop(&self) -> bool {
		self.source == self.target
	}

	/// Whether `id` is either endpoint.
	pub fn touches(&self, id: &str) -> bool {
		self.source == id || self.target == id
	}
}

impl Network {
	/// A network without nodes or edges.
	pub fn empty(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Default::default()
		}
	}

	/// Whether edges are directed records.
	pub fn is_directed(&self) -> bool {
		self.direction.unwrap_or(false)
	}

	/// Set of node ids.
	pub fn node_ids(&self) -> HashSet<&str> {
		self.nodes.iter().map(|n| n.id.as_str()).collect()
	}

	/// Edges whose source or target is not a node of this network.
	pub fn dangling_edges(&self) -> Vec<&Edge> {
		let ids = self.node_ids();
		self.edges
			.iter()
			.filter(|e| !ids.contains(e.source.as_str()) || !ids.contains(e.target.as_str()))
			.collect()
	}

	/// Checks that every edge references existing nodes.
	pub fn validate(&self) -> Result<()> {
		match self.dangling_edges().first() {
			Some(edge) => Err(NetworkError::DanglingEdge {
				from: edge.source.clone(),
				to: edge.target.clone(),
			}),
			None => Ok(()),
		}
	}

	/// Name and element counts.
	pub fn summary(&self) -> NetworkSummary {
		NetworkSummary {
			name: self.name.clone(),
			nodes: self.nodes.len(),
			edges: self.edges.len(),
			directed: self.is_directed(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn serializes_camel_case_style_keys() {
		let mut edge = Edge::new("a", "b", 2, 1.5);
		edge.style.keyshape.end_arrow = Some(Arrow::suppressed());
		let json = serde_json::to_value(&edge).unwrap();
		assert_eq!(json["style"]["keyshape"]["lineWidth"], 1.5);
		assert_eq!(json["style"]["keyshape"]["endArrow"]["path"], "");
		assert!(json["style"]["keyshape"].get("stroke").is_none());
	}

	#[test]
	fn deserializes_minimal_documents() {
		let network: Network = serde_json::from_str(
			r#"{"nodes":[{"id":"a"},{"id":"b","style":{"keyshape":{"size":3,"fillOpacity":0.4}}}],
			"edges":[{"source":"a","target":"b","value":1}]}"#,
		)
		.unwrap();
		assert_eq!(network.name, "");
		assert_eq!(network.direction, None);
		assert_eq!(network.nodes[0].value, 0);
		assert_eq!(network.nodes[1].style.keyshape.fill_opacity, Some(0.4));
		assert_eq!(network.edges[0].style.keyshape.line_width, 0.0);
	}

	#[test]
	fn accepts_whole_float_counts() {
		let network: Network = serde_json::from_str(
			r#"{"nodes":[{"id":"a","value":3.0},{"id":"b","value":1}],
			"edges":[{"source":"a","target":"b","value":2.0}]}"#,
		)
		.unwrap();
		assert_eq!(network.nodes[0].value, 3);
		assert_eq!(network.edges[0].value, 2);

		for bad in ["2.5", "-1.0"] {
			let text = format!(r#"{{"source":"a","target":"b","value":{bad}}}"#);
			assert!(serde_json::from_str::<Edge>(&text).is_err(), "{bad}");
		}
	}

	#[test]
	fn validate_reports_first_dangling_edge() {
		let network = Network {
			name: "n".into(),
			direction: None,
			nodes: vec![Node::new("a", 1, 1.0)],
			edges: vec![Edge::new("a", "a", 1, 1.0), Edge::new("a", "ghost", 1, 1.0)],
		};
		assert_eq!(network.dangling_edges().len(), 1);
		match network.validate() {
			Err(NetworkError::DanglingEdge { from, to }) => {
				assert_eq!(from, "a");
				assert_eq!(to, "ghost");
			}
			other => panic!("unexpected {other:?}"),
		}
	}

	#[test]
	fn summary_counts_elements() {
		let mut network = Network::empty("demo");
		network.direction = Some(true);
		network.nodes.push(Node::new("a", 1, 1.0));
		let summary = network.summary();
		assert_eq!(summary.nodes, 1);
		assert_eq!(summary.edges, 0);
		assert!(summary.directed);
	}
}

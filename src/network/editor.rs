//! Row projection used by bulk style editing.
//!
//! An editor reads one flat [`StyleRow`] per node, lets the user change the
//! style columns and hands the rows back. [`apply_style_rows`] patches the
//! styles into a copy of the network by node id; ids, values and edges are
//! never changed.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::model::Network;

/// Editable style columns of one node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRow {
	/// Node id, read only.
	pub id: String,
	/// Label text.
	pub label: String,
	/// Node diameter.
	pub size: f64,
	/// Outline color.
	pub stroke: Option<String>,
	/// Fill color.
	pub fill: Option<String>,
	/// Fill opacity.
	pub fill_opacity: Option<f64>,
}

/// One row per node, in node order.
pub fn style_rows(network: &Network) -> Vec<StyleRow> {
	network
		.nodes
		.iter()
		.map(|node| {
			let shape = &node.style.keyshape;
			StyleRow {
				id: node.id.clone(),
				label: node.style.label.value.clone(),
				size: shape.size,
				stroke: shape.stroke.clone(),
				fill: shape.fill.clone(),
				fill_opacity: shape.fill_opacity,
			}
		})
		.collect()
}

/// Returns a replacement network with the styles of `rows` applied to the
/// nodes of matching id. Rows for unknown ids are ignored; when an id appears
/// twice the last row wins.
pub fn apply_style_rows(network: &Network, rows: &[StyleRow]) -> Network {
	let by_id: HashMap<&str, &StyleRow> = rows.iter().map(|r| (r.id.as_str(), r)).collect();
	let mut edited = network.clone();
	for node in &mut edited.nodes {
		let Some(row) = by_id.get(node.id.as_str()) else {
			continue;
		};
		node.style.label.value.clone_from(&row.label);
		let shape = &mut node.style.keyshape;
		shape.size = row.size;
		shape.stroke.clone_from(&row.stroke);
		shape.fill.clone_from(&row.fill);
		shape.fill_opacity = row.fill_opacity;
	}
	edited
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::network::model::{Edge, Node};

	fn network() -> Network {
		Network {
			name: "edit".into(),
			direction: Some(false),
			nodes: vec![Node::new("a", 3, 50.0), Node::new("b", 1, 16.67)],
			edges: vec![Edge::new("a", "b", 1, 6.67)],
		}
	}

	#[test]
	fn projects_one_row_per_node() {
		let rows = style_rows(&network());
		assert_eq!(rows.len(), 2);
		assert_eq!(rows[1].id, "b");
		assert_eq!(rows[1].label, "b");
		assert_eq!(rows[1].size, 16.67);
		assert_eq!(rows[1].fill, None);
	}

	#[test]
	fn patches_styles_by_id() {
		let original = network();
		let mut rows = style_rows(&original);
		rows.reverse();
		rows[0].fill = Some("#f80".into());
		rows[0].size = 20.0;
		rows.push(StyleRow {
			id: "ghost".into(),
			label: "ghost".into(),
			size: 1.0,
			stroke: None,
			fill: None,
			fill_opacity: None,
		});

		let edited = apply_style_rows(&original, &rows);
		assert_eq!(edited.nodes.len(), 2);
		assert_eq!(edited.nodes[1].style.keyshape.fill.as_deref(), Some("#f80"));
		assert_eq!(edited.nodes[1].style.keyshape.size, 20.0);
		assert_eq!(edited.nodes[0], original.nodes[0]);
		assert_eq!(edited.edges, original.edges);
		assert_eq!(original.nodes[1].style.keyshape.fill, None);
	}
}

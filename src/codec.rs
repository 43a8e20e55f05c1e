//! Conversion between graph documents and their JSON text.
//!
//! Decoding is lenient about what is missing and strict about what is wrong:
//! absent collections become empty, but a value of the wrong type fails the
//! whole document. Encoding produces the minimal export form, stripped of
//! layout state and anything else the runtime picked up along the way.

use log::{debug, error};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::GraphDocument;

const BUNDLED_DEFAULT: &str = include_str!("../assets/default_graph.json");

/// Exported form of a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportNode {
	/// Node id.
	pub id: String,
	/// Node title.
	pub title: String,
	/// Free-text description.
	pub description: String,
	/// Bullet points, in order.
	pub bullets: Vec<String>,
	/// Tags, in order.
	pub tags: Vec<String>,
	/// CSS color, omitted when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
}

/// Exported form of a link. Endpoints are always plain ids.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportLink {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Link label, omitted when unset.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
}

/// The document written to `graph_data.json`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
	/// Title shown above the graph.
	pub title: String,
	/// Every node, in document order.
	pub nodes: Vec<ExportNode>,
	/// Every link, in document order.
	pub links: Vec<ExportLink>,
}

/// Parses JSON text into a graph document.
pub fn decode(text: &str) -> Result<GraphDocument> {
	let document: GraphDocument = serde_json::from_str(text)?;
	debug!(
		"grafo: decoded {} nodes, {} links",
		document.nodes.len(),
		document.links.len()
	);
	Ok(document)
}

/// Projects a document onto the export form under the given title.
///
/// Resolved link endpoints are written back as the id they resolved from.
pub fn encode(document: &GraphDocument, title: &str) -> ExportDocument {
	ExportDocument {
		title: title.to_string(),
		nodes: document
			.nodes
			.iter()
			.map(|node| ExportNode {
				id: node.id.clone(),
				title: node.title.clone(),
				description: node.description.clone(),
				bullets: node.bullets.clone(),
				tags: node.tags.clone(),
				color: node.color.clone(),
			})
			.collect(),
		links: document
			.links
			.iter()
			.map(|link| ExportLink {
				source: link.source.id().to_string(),
				target: link.target.id().to_string(),
				label: link.label.clone(),
			})
			.collect(),
	}
}

/// Export text: the encoded document pretty-printed with 2-space indentation.
pub fn export_json(document: &GraphDocument, title: &str) -> Result<String> {
	Ok(serde_json::to_string_pretty(&encode(document, title))?)
}

/// Compact, deterministic JSON used only for change detection.
pub fn canonical(document: &GraphDocument) -> Result<String> {
	Ok(serde_json::to_string(document)?)
}

/// The dataset shipped with the application.
pub fn bundled_default() -> GraphDocument {
	decode(BUNDLED_DEFAULT).unwrap_or_else(|e| {
		error!("grafo: bundled default graph is invalid: {}", e);
		GraphDocument::empty()
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{Endpoint, Link, Node};

	#[test]
	fn decode_defaults_missing_collections() {
		let doc = decode(r#"{"title":"T"}"#).unwrap();
		assert_eq!(doc.title.as_deref(), Some("T"));
		assert!(doc.nodes.is_empty());
		assert!(doc.links.is_empty());
	}

	#[test]
	fn decode_rejects_bad_syntax_and_shape() {
		assert!(decode("{not json").unwrap_err().is_parse());
		assert!(decode("[1, 2, 3]").unwrap_err().is_parse());
		assert!(decode(r#"{"nodes": 5}"#).unwrap_err().is_parse());
		assert!(decode(r#"{"nodes": [{"title": "no id"}]}"#).unwrap_err().is_parse());
	}

	#[test]
	fn encode_strips_layout_and_link_styling() {
		let mut node = Node::new("a", "Alpha");
		node.x = Some(12.5);
		node.y = Some(-3.0);
		node.extra.insert("vx".into(), serde_json::json!(0.4));
		let mut link = Link::new("a", "a").with_label("self");
		link.color = Some("red".into());
		link.width = Some(2.0);
		let doc = GraphDocument {
			nodes: vec![node],
			links: vec![link],
			..GraphDocument::empty()
		};

		let json = serde_json::to_value(encode(&doc, "Mine")).unwrap();
		assert_eq!(
			json,
			serde_json::json!({
				"title": "Mine",
				"nodes": [{
					"id": "a",
					"title": "Alpha",
					"description": "",
					"bullets": [],
					"tags": []
				}],
				"links": [{ "source": "a", "target": "a", "label": "self" }]
			})
		);
	}

	#[test]
	fn encode_flattens_resolved_endpoints() {
		let doc = decode(r#"{"nodes":[{"id":"a"},{"id":"b"}],"links":[{"source":"a","target":"b"}]}"#)
			.unwrap();
		let state = crate::components::force_graph::ForceGraphState::new(&doc, 800.0, 600.0);
		let resolved = GraphDocument {
			links: state.links().to_vec(),
			..doc.clone()
		};
		assert!(matches!(resolved.links[0].source, Endpoint::Resolved(_)));

		assert_eq!(encode(&resolved, "t"), encode(&doc, "t"));
	}

	#[test]
	fn export_json_uses_two_space_indent() {
		let text = export_json(&GraphDocument::empty(), "T").unwrap();
		assert_eq!(text, "{\n  \"title\": \"T\",\n  \"nodes\": [],\n  \"links\": []\n}");
	}

	#[test]
	fn bundled_default_is_valid() {
		let doc = decode(BUNDLED_DEFAULT).unwrap();
		assert!(!doc.nodes.is_empty());
		for link in &doc.links {
			assert!(doc.node(link.source.id()).is_some());
			assert!(doc.node(link.target.id()).is_some());
		}
	}
}

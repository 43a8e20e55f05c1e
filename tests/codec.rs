use grafo_ideas::codec::{self, ExportLink};
use grafo_ideas::{GraphDocument, Link, Node};
use proptest::prelude::*;

type NodeFields = (String, String, Vec<String>, Vec<String>, Option<String>);

fn node_fields() -> impl Strategy<Value = NodeFields> {
	(
		"[a-z ]{0,12}",
		"[a-zA-Z .,]{0,24}",
		prop::collection::vec("[a-z ]{1,10}", 0..4),
		prop::collection::vec("[a-z]{1,6}", 0..3),
		prop::option::of("#[0-9a-f]{6}"),
	)
}

fn document() -> impl Strategy<Value = GraphDocument> {
	prop::collection::btree_set("[a-z]{1,5}", 1..6)
		.prop_flat_map(|ids| {
			let ids: Vec<String> = ids.into_iter().collect();
			let count = ids.len();
			let nodes = prop::collection::vec(node_fields(), count);
			let links = prop::collection::vec(
				(0..count, 0..count, prop::option::of("[a-z]{1,8}")),
				0..8,
			);
			(Just(ids), nodes, links)
		})
		.prop_map(|(ids, nodes, links)| GraphDocument {
			nodes: ids
				.iter()
				.zip(nodes)
				.map(|(id, (title, description, bullets, tags, color))| Node {
					description,
					bullets,
					tags,
					color,
					..Node::new(id.clone(), title)
				})
				.collect(),
			links: links
				.into_iter()
				.map(|(s, t, label)| Link {
					label,
					..Link::new(ids[s].clone(), ids[t].clone())
				})
				.collect(),
			..GraphDocument::empty()
		})
}

proptest! {
	#[test]
	fn export_round_trips(doc in document(), title in "[A-Za-z ]{0,20}") {
		let text = codec::export_json(&doc, &title).unwrap();
		let back = codec::decode(&text).unwrap();

		prop_assert_eq!(back.title.as_deref(), Some(title.as_str()));
		prop_assert_eq!(codec::encode(&back, &title), codec::encode(&doc, &title));
	}

	#[test]
	fn canonical_form_is_stable(doc in document()) {
		let once = codec::canonical(&doc).unwrap();
		let again = codec::canonical(&codec::decode(&once).unwrap()).unwrap();
		prop_assert_eq!(once, again);
	}
}

#[test]
fn minimal_document_gets_every_default() {
	let doc = codec::decode(r#"{"nodes":[{"id":"a"}]}"#).unwrap();
	assert_eq!(doc.title, None);
	assert!(doc.links.is_empty());

	let node = &doc.nodes[0];
	assert_eq!(node.title, "");
	assert_eq!(node.description, "");
	assert!(node.bullets.is_empty());
	assert!(node.tags.is_empty());
	assert_eq!(node.color, None);
}

#[test]
fn export_drops_layout_and_unknown_fields() {
	let doc = codec::decode(
		r#"{
			"generator": "tab-2",
			"nodes": [
				{"id": "a", "title": "A", "x": 4.5, "y": -2, "vx": 0.1, "index": 0},
				{"id": "b", "title": "B"}
			],
			"links": [{"source": {"id": "a", "x": 1}, "target": "b", "label": "to", "index": 3}]
		}"#,
	)
	.unwrap();

	let text = codec::export_json(&doc, "T").unwrap();
	for field in ["generator", "\"x\"", "\"y\"", "vx", "index"] {
		assert!(!text.contains(field), "{} leaked into {}", field, text);
	}

	let exported = codec::encode(&doc, "T");
	assert_eq!(
		exported.links,
		vec![ExportLink {
			source: "a".into(),
			target: "b".into(),
			label: Some("to".into()),
		}]
	);
}

#[test]
fn raw_save_keeps_what_export_drops() {
	let doc = codec::decode(r#"{"nodes":[{"id":"a","x":3,"y":4,"pinned":true}]}"#).unwrap();
	let raw = serde_json::to_value(&doc).unwrap();
	assert_eq!(raw["nodes"][0]["x"], 3.0);
	assert_eq!(raw["nodes"][0]["pinned"], true);
}

#[test]
fn wrong_shapes_are_parse_errors() {
	for text in [
		"not json",
		r#"{"nodes": {}}"#,
		r#"{"nodes": [{"id": "a", "bullets": "one"}]}"#,
		r#"{"links": [{"source": 1, "target": "b"}]}"#,
	] {
		let err = codec::decode(text).unwrap_err();
		assert!(err.is_parse(), "{}", text);
	}
}

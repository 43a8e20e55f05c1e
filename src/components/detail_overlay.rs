//! Detail card for the node under the pointer.

use leptos::prelude::*;

use crate::model::Node;

/// The tag line shown under a node's bullets.
pub fn tag_line(tags: &[String]) -> String {
	format!("Tags: {}", tags.join(", "))
}

/// Shows the hovered node's title, description, bullets and tags.
/// Renders nothing while no node is hovered.
#[component]
pub fn NodeDetail(#[prop(into)] node: Signal<Option<Node>>) -> impl IntoView {
	move || {
		node.get().map(|node| {
			let bullets = node
				.bullets
				.into_iter()
				.map(|bullet| view! { <li>{bullet}</li> })
				.collect_view();
			let tags = tag_line(&node.tags);
			view! {
				<div
					class="node-detail"
					style="position: absolute; left: 20px; top: 20px; background: #fff; padding: 10px; border: 1px solid #ccc;"
				>
					<h4>{node.title}</h4>
					<p>{node.description}</p>
					<ul>{bullets}</ul>
					<em>{tags}</em>
				</div>
			}
		})
	}
}

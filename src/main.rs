//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use grafo_ideas::{App, GrafoConfig, init_logging, read_config};
use leptos::prelude::*;
use log::{Level, warn};

fn main() {
	let config = read_config();
	init_logging(config.as_ref().map_or(Level::Debug, GrafoConfig::log_level));
	let config = config.unwrap_or_else(|e| {
		warn!("grafo: ignoring page config: {}", e);
		GrafoConfig::default()
	});

	mount_to_body(move || {
		view! { <App config=config /> }
	})
}

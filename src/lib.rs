//! grafo-ideas: an interactive graph of ideas with client-side persistence.
//!
//! The graph document is kept in a cookie, polled for changes made in other
//! tabs, importable from and exportable to JSON, and drawn as a
//! force-directed diagram on a canvas.

use std::rc::Rc;

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{File, HtmlScriptElement, Window};

pub mod codec;
pub mod components;
pub mod config;
pub mod error;
pub mod mode;
pub mod model;
pub mod persistence;
pub mod store;

pub use components::force_graph::ForceGraphCanvas;
pub use config::GrafoConfig;
pub use error::{GrafoError, Result};
pub use model::{Endpoint, GraphDocument, Link, Node};
pub use store::GraphStore;

use components::detail_overlay::NodeDetail;
use components::file_io;
use components::settings_panel::SettingsPanel;
use mode::{ImportReport, Mode, ModeController};
use persistence::{CookieStore, DurableStore, MemoryStore, PersistenceSync, PollOutcome, Poller};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("grafo: logging initialized at {}", level);
}

/// Load configuration from a script element with id="grafo-config".
/// A page without one gets the defaults.
pub fn read_config() -> Result<GrafoConfig> {
	let Some(text) = config_script_text() else {
		return Ok(GrafoConfig::default());
	};
	GrafoConfig::from_json(&text)
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("grafo-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// The cookie store, or an in-memory one when there is no HTML document to
/// keep cookies on.
pub fn open_storage() -> Rc<dyn DurableStore> {
	match CookieStore::new() {
		Some(store) => Rc::new(store),
		None => {
			warn!("grafo: cookies unavailable, graph will not survive a reload");
			Rc::new(MemoryStore::new())
		}
	}
}

/// The alert shown once an uploaded file has been handled.
fn import_message(imported: &Result<ImportReport>, expires_in_days: f64) -> String {
	match imported {
		Ok(_) => format!(
			"File loaded and saved. Persistence active for {} hours.",
			expires_in_days * 24.0
		),
		Err(e) if e.is_parse() => {
			"Error reading the JSON file. Ensure it has the correct format.".to_string()
		}
		Err(GrafoError::Storage(reason)) => format!("File loaded but not saved: {}", reason),
		Err(e) => format!("Could not load file: {}", e),
	}
}

/// Main application component.
#[component]
pub fn App(config: GrafoConfig) -> impl IntoView {
	provide_meta_context();

	let sync = Rc::new(PersistenceSync::new(
		open_storage(),
		config.storage(),
		codec::bundled_default(),
	));

	let mut initial = GraphStore::new(GraphDocument::empty(), config.default_title.clone());
	sync.load_on_mount(&mut initial);
	let store = RwSignal::new(initial);
	let controller = RwSignal::new(ModeController::default());
	let hovered = RwSignal::new(None::<String>);

	let poller = {
		let sync = sync.clone();
		Poller::start(config.poll_interval(), move || {
			store.try_maybe_update(|s| (sync.poll_and_merge(s) == PollOutcome::Replaced, ()));
		})
	};
	on_cleanup(move || drop(poller));

	let on_mode = {
		let sync = sync.clone();
		move |mode: Mode| {
			let mut next = controller.get_untracked();
			store.update(|s| {
				next.select(mode, &sync, s);
			});
			controller.set(next);
			info!("grafo: switched to {} mode", mode.as_str());
		}
	};

	let on_file = {
		let expires_in_days = config.expires_in_days;
		move |file: File| {
			let sync = sync.clone();
			let started = file_io::read_file_text(&file, move |text| {
				let imported = text.and_then(|text| {
					let current = controller.get_untracked();
					store
						.try_maybe_update(|s| {
							let revision = s.revision();
							let result = current.handle_upload(&text, &sync, s);
							// A failed save still leaves the decoded document on screen.
							(s.revision() != revision, result)
						})
						.unwrap_or_else(|| Err(GrafoError::Storage("view was closed".to_string())))
				});
				match &imported {
					Err(e) if !e.is_parse() => error!("grafo: import failed: {}", e),
					_ => {}
				}
				file_io::notify(&import_message(&imported, expires_in_days));
			});
			if let Err(e) = started {
				error!("grafo: could not read {}: {}", file.name(), e);
				file_io::notify(&format!("Could not read file: {}", e));
			}
		}
	};

	let on_download = {
		let file_name = config.export_file_name.clone();
		move || {
			let exported = store
				.with_untracked(|s| codec::export_json(s.document(), s.current_title()))
				.and_then(|text| file_io::download_json(&file_name, &text));
			if let Err(e) = exported {
				error!("grafo: export failed: {}", e);
				file_io::notify(&format!("Could not export graph: {}", e));
			}
		}
	};

	let title = Signal::derive(move || store.with(|s| s.current_title().to_string()));
	let document = Memo::new(move |_| store.with(|s| s.document().clone()));
	let hovered_node = Signal::derive(move || {
		let id = hovered.get()?;
		store.with(|s| s.document().node(&id).cloned())
	});

	let heading = move || {
		if controller.with(|c| c.is_editing_title()) {
			view! {
				<input
					type="text"
					class="title-input"
					prop:value=move || title.get()
					on:input=move |ev| store.update(|s| s.set_title(event_target_value(&ev)))
				/>
			}
			.into_any()
		} else {
			view! { <h1>{move || title.get()}</h1> }.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text=move || title.get() />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=document
				hovered=hovered
				scale=config.scale()
				initial_zoom=config.initial_zoom
				fullscreen=true
			/>
			<div class="graph-overlay">
				{heading}
				<SettingsPanel
					controller=controller
					on_mode=on_mode
					on_file=on_file
					on_download=on_download
				/>
			</div>
			<NodeDetail node=hovered_node />
		</div>
	}
}

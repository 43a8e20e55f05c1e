//! Edit/upload mode switching, title editing and file import.

use log::{info, warn};

use crate::codec;
use crate::error::Result;
use crate::persistence::{LoadOutcome, PersistenceSync};
use crate::store::GraphStore;

/// Which way the user is working with the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
	/// Show the stored (or bundled) graph.
	#[default]
	Edit,
	/// Start from an empty canvas and wait for a file.
	Upload,
}

impl Mode {
	/// Value used for the mode radio inputs.
	pub fn as_str(self) -> &'static str {
		match self {
			Mode::Edit => "edit",
			Mode::Upload => "upload",
		}
	}

	/// Parses a radio value back into a mode.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"edit" => Some(Mode::Edit),
			"upload" => Some(Mode::Upload),
			_ => None,
		}
	}
}

/// What an accepted upload contained.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportReport {
	/// Nodes in the imported document.
	pub nodes: usize,
	/// Links in the imported document.
	pub links: usize,
	/// Title carried by the file, if any.
	pub title: Option<String>,
}

/// Mode and title-editing state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeController {
	mode: Mode,
	title_editing: bool,
}

impl ModeController {
	/// The active mode.
	pub fn mode(&self) -> Mode {
		self.mode
	}

	/// Switches mode. Entering `Edit` reloads from storage; entering `Upload`
	/// empties the store without touching storage.
	///
	/// Returns where the document came from when a load happened.
	pub fn select(
		&mut self,
		mode: Mode,
		sync: &PersistenceSync,
		store: &mut GraphStore,
	) -> Option<LoadOutcome> {
		self.mode = mode;
		match mode {
			Mode::Edit => Some(sync.load_on_mount(store)),
			Mode::Upload => {
				store.clear();
				None
			}
		}
	}

	/// Whether the title editor is showing.
	pub fn is_editing_title(&self) -> bool {
		self.title_editing
	}

	/// Flips between showing and editing the title. Never persists anything.
	pub fn toggle_title_editing(&mut self) -> bool {
		self.title_editing = !self.title_editing;
		self.title_editing
	}

	/// Imports an uploaded file's text.
	///
	/// On a decode failure the store is left exactly as it was. Otherwise the
	/// decoded document replaces the current one and is saved as decoded,
	/// before any export cleanup.
	pub fn handle_upload(
		&self,
		text: &str,
		sync: &PersistenceSync,
		store: &mut GraphStore,
	) -> Result<ImportReport> {
		let document = codec::decode(text).inspect_err(|e| {
			warn!("grafo: rejected uploaded file: {}", e);
		})?;
		let report = ImportReport {
			nodes: document.nodes.len(),
			links: document.links.len(),
			title: document.title.clone(),
		};

		store.replace(document);
		store.adopt_title(report.title.as_deref());
		sync.save(store.document())?;

		info!(
			"grafo: imported {} nodes, {} links",
			report.nodes, report.links
		);
		Ok(report)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn mode_radio_values_round_trip() {
		for mode in [Mode::Edit, Mode::Upload] {
			assert_eq!(Mode::parse(mode.as_str()), Some(mode));
		}
		assert_eq!(Mode::parse("view"), None);
	}

	#[test]
	fn title_toggle_flips() {
		let mut controller = ModeController::default();
		assert!(!controller.is_editing_title());
		assert!(controller.toggle_title_editing());
		assert!(!controller.toggle_title_editing());
	}
}

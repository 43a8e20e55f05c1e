//! Load, poll and save the graph document through a durable store.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info, warn};

use super::storage::DurableStore;
use crate::codec;
use crate::error::Result;
use crate::model::GraphDocument;
use crate::store::GraphStore;

/// Where and for how long the document is kept.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageSettings {
	/// Store key holding the document.
	pub key: String,
	/// Lifetime of a write, in days.
	pub expires_in_days: f64,
}

impl Default for StorageSettings {
	fn default() -> Self {
		Self {
			key: "grafo_data".to_string(),
			expires_in_days: 0.5,
		}
	}
}

/// Where the document came from on load.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
	/// Decoded from the durable store.
	Stored,
	/// Nothing usable was stored; the bundled default was shown.
	Default,
}

/// Result of one poll cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollOutcome {
	/// Nothing stored under the key.
	Absent,
	/// Stored document is the one last applied, or matches the current one.
	Unchanged,
	/// Stored document differed and was swapped in.
	Replaced,
	/// Stored value did not decode; the cycle was skipped.
	Skipped,
}

/// Moves documents between a [`DurableStore`] and a [`GraphStore`].
///
/// Remembers the canonical form of the stored value it last applied or
/// wrote. A poll only replaces the document when the stored value has moved
/// on from that snapshot, so a stale value left behind by a failed save
/// never overrides a newer local document.
pub struct PersistenceSync {
	storage: Rc<dyn DurableStore>,
	settings: StorageSettings,
	fallback: GraphDocument,
	last_applied: RefCell<Option<String>>,
}

impl PersistenceSync {
	/// `fallback` is the bundled dataset shown when nothing usable is stored.
	pub fn new(
		storage: Rc<dyn DurableStore>,
		settings: StorageSettings,
		fallback: GraphDocument,
	) -> Self {
		Self {
			storage,
			settings,
			fallback,
			last_applied: RefCell::new(None),
		}
	}

	/// Key and lifetime used for every read and write.
	pub fn settings(&self) -> &StorageSettings {
		&self.settings
	}

	/// Reads and decodes the stored document. `None` when nothing is stored.
	pub fn read(&self) -> Option<Result<GraphDocument>> {
		self.storage
			.get(&self.settings.key)
			.map(|text| codec::decode(&text))
	}

	/// Canonical form of the stored value this instance last applied or wrote.
	pub fn last_applied(&self) -> Option<String> {
		self.last_applied.borrow().clone()
	}

	fn remember(&self, document: &GraphDocument) {
		match codec::canonical(document) {
			Ok(text) => *self.last_applied.borrow_mut() = Some(text),
			Err(e) => warn!("grafo: could not serialize graph snapshot: {}", e),
		}
	}

	/// Replaces the store's document with the stored one, or with the
	/// bundled default when nothing usable is stored.
	pub fn load_on_mount(&self, store: &mut GraphStore) -> LoadOutcome {
		let document = match self.read() {
			Some(Ok(document)) => {
				info!(
					"grafo: loaded stored graph ({} nodes, {} links)",
					document.nodes.len(),
					document.links.len()
				);
				self.remember(&document);
				store.adopt_title(document.title.as_deref());
				store.replace(document);
				return LoadOutcome::Stored;
			}
			Some(Err(e)) => {
				warn!("grafo: stored graph under {} is unreadable: {}", self.settings.key, e);
				self.fallback.clone()
			}
			None => {
				debug!("grafo: nothing stored under {}", self.settings.key);
				self.fallback.clone()
			}
		};
		*self.last_applied.borrow_mut() = None;
		store.adopt_title(document.title.as_deref());
		store.replace(document);
		LoadOutcome::Default
	}

	/// Re-reads the store and swaps the document in only if the stored value
	/// changed since it was last applied and differs from the current
	/// document. Never writes.
	pub fn poll_and_merge(&self, store: &mut GraphStore) -> PollOutcome {
		let document = match self.read() {
			None => return PollOutcome::Absent,
			Some(Ok(document)) => document,
			Some(Err(e)) => {
				warn!("grafo: skipping poll, stored graph is unreadable: {}", e);
				return PollOutcome::Skipped;
			}
		};

		let (incoming, current) = match (
			codec::canonical(&document),
			codec::canonical(store.document()),
		) {
			(Ok(incoming), Ok(current)) => (incoming, current),
			(Err(e), _) | (_, Err(e)) => {
				warn!("grafo: skipping poll, could not serialize graph: {}", e);
				return PollOutcome::Skipped;
			}
		};
		if self.last_applied.borrow().as_deref() == Some(incoming.as_str()) {
			return PollOutcome::Unchanged;
		}
		if incoming == current {
			*self.last_applied.borrow_mut() = Some(incoming);
			return PollOutcome::Unchanged;
		}

		info!("grafo: stored graph changed, reloading");
		*self.last_applied.borrow_mut() = Some(incoming);
		store.adopt_title(document.title.as_deref());
		store.replace(document);
		PollOutcome::Replaced
	}

	/// Writes `document` as-is, with the configured expiry.
	pub fn save(&self, document: &GraphDocument) -> Result<()> {
		let text = serde_json::to_string(document)?;
		self.storage
			.set(&self.settings.key, &text, self.settings.expires_in_days)?;
		self.remember(document);
		debug!("grafo: saved {} bytes under {}", text.len(), self.settings.key);
		Ok(())
	}
}

use std::rc::Rc;
use std::time::Duration;

use grafo_ideas::mode::{Mode, ModeController};
use grafo_ideas::persistence::{
	DurableStore, LoadOutcome, MemoryStore, PersistenceSync, PollOutcome, StorageSettings,
};
use grafo_ideas::store::DEFAULT_TITLE;
use grafo_ideas::{GrafoError, GraphDocument, GraphStore, Node, Result};

const KEY: &str = "grafo_data";
const TWELVE_HOURS: Duration = Duration::from_secs(12 * 3600);
const UPLOAD: &str = r#"{"title":"X","nodes":[{"id":"a","title":"A"}],"links":[]}"#;

fn fallback() -> GraphDocument {
	GraphDocument {
		nodes: vec![Node::new("default", "Default")],
		..GraphDocument::empty()
	}
}

fn setup() -> (Rc<MemoryStore>, PersistenceSync) {
	let storage = Rc::new(MemoryStore::new());
	let sync = PersistenceSync::new(storage.clone(), StorageSettings::default(), fallback());
	(storage, sync)
}

fn mount(sync: &PersistenceSync) -> (GraphStore, LoadOutcome) {
	let mut store = GraphStore::default();
	let outcome = sync.load_on_mount(&mut store);
	(store, outcome)
}

#[test]
fn upload_persists_and_survives_remount() {
	let (storage, sync) = setup();

	let (mut store, outcome) = mount(&sync);
	assert_eq!(outcome, LoadOutcome::Default);
	assert_eq!(store.document(), &fallback());
	assert_eq!(store.current_title(), DEFAULT_TITLE);

	let report = ModeController::default()
		.handle_upload(UPLOAD, &sync, &mut store)
		.unwrap();
	assert_eq!(report.nodes, 1);
	assert_eq!(report.title.as_deref(), Some("X"));
	assert_eq!(store.current_title(), "X");
	assert_eq!(storage.expires_in(KEY), Some(TWELVE_HOURS));

	let (remounted, outcome) = mount(&sync);
	assert_eq!(outcome, LoadOutcome::Stored);
	assert_eq!(remounted.current_title(), "X");
	assert_eq!(remounted.document().node("a").map(|n| n.title.as_str()), Some("A"));
}

#[test]
fn saved_document_expires_after_twelve_hours() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	ModeController::default()
		.handle_upload(UPLOAD, &sync, &mut store)
		.unwrap();

	storage.advance(TWELVE_HOURS - Duration::from_secs(1));
	assert_eq!(mount(&sync).1, LoadOutcome::Stored);

	storage.advance(Duration::from_secs(1));
	let (store, outcome) = mount(&sync);
	assert_eq!(outcome, LoadOutcome::Default);
	assert_eq!(store.document(), &fallback());
}

#[test]
fn repeated_polls_of_unchanged_storage_do_nothing() {
	let (_, sync) = setup();
	let (mut store, _) = mount(&sync);
	ModeController::default()
		.handle_upload(UPLOAD, &sync, &mut store)
		.unwrap();
	let revision = store.revision();

	for _ in 0..3 {
		assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Unchanged);
	}
	assert_eq!(store.revision(), revision);
}

#[test]
fn poll_picks_up_another_writer() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Absent);

	storage
		.set(KEY, r#"{"title":"Other tab","nodes":[{"id":"z"}]}"#, 0.5)
		.unwrap();
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Replaced);
	assert_eq!(store.current_title(), "Other tab");
	assert!(store.document().node("z").is_some());

	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Unchanged);
}

#[test]
fn poll_without_title_keeps_current_title() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	store.set_title("Mine");

	storage.set(KEY, r#"{"nodes":[{"id":"z"}]}"#, 0.5).unwrap();
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Replaced);
	assert_eq!(store.current_title(), "Mine");
}

#[test]
fn upload_mode_clears_and_edit_mode_reloads() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	let mut controller = ModeController::default();
	controller.handle_upload(UPLOAD, &sync, &mut store).unwrap();
	let writes = storage.writes();

	assert_eq!(controller.select(Mode::Upload, &sync, &mut store), None);
	assert_eq!(controller.mode(), Mode::Upload);
	assert!(store.document().is_empty());
	assert_eq!(storage.writes(), writes);

	assert_eq!(
		controller.select(Mode::Edit, &sync, &mut store),
		Some(LoadOutcome::Stored)
	);
	assert!(store.document().node("a").is_some());
	assert_eq!(storage.writes(), writes);
}

#[test]
fn edit_mode_without_storage_shows_default() {
	let (_, sync) = setup();
	let mut store = GraphStore::default();
	let mut controller = ModeController::default();
	controller.select(Mode::Upload, &sync, &mut store);

	assert_eq!(
		controller.select(Mode::Edit, &sync, &mut store),
		Some(LoadOutcome::Default)
	);
	assert_eq!(store.document(), &fallback());
}

#[test]
fn bad_upload_leaves_store_and_storage_alone() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	let before = store.clone();

	let err = ModeController::default()
		.handle_upload("{\"nodes\": 12}", &sync, &mut store)
		.unwrap_err();
	assert!(err.is_parse());
	assert_eq!(store, before);
	assert_eq!(storage.writes(), 0);
	assert_eq!(storage.get(KEY), None);
}

#[test]
fn upload_is_saved_raw() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	ModeController::default()
		.handle_upload(
			r#"{"nodes":[{"id":"a","x":10,"y":20,"note":"kept"}]}"#,
			&sync,
			&mut store,
		)
		.unwrap();

	let raw: serde_json::Value = serde_json::from_str(&storage.get(KEY).unwrap()).unwrap();
	assert_eq!(raw["nodes"][0]["x"], 10.0);
	assert_eq!(raw["nodes"][0]["note"], "kept");
}

/// Serves a fixed stored value and refuses every write, like a browser
/// dropping an oversized cookie.
struct ReadOnlyStore {
	value: String,
}

impl DurableStore for ReadOnlyStore {
	fn get(&self, _: &str) -> Option<String> {
		Some(self.value.clone())
	}

	fn set(&self, _: &str, _: &str, _: f64) -> Result<()> {
		Err(GrafoError::Storage("cookie too large".to_string()))
	}
}

#[test]
fn failed_save_is_not_undone_by_stale_storage() {
	let storage = Rc::new(ReadOnlyStore {
		value: r#"{"title":"Old","nodes":[{"id":"old"}]}"#.to_string(),
	});
	let sync = PersistenceSync::new(storage, StorageSettings::default(), fallback());
	let (mut store, outcome) = mount(&sync);
	assert_eq!(outcome, LoadOutcome::Stored);
	assert_eq!(store.current_title(), "Old");

	let err = ModeController::default()
		.handle_upload(
			r#"{"title":"New","nodes":[{"id":"new"}]}"#,
			&sync,
			&mut store,
		)
		.unwrap_err();
	assert!(matches!(err, GrafoError::Storage(_)));
	let revision = store.revision();

	for _ in 0..3 {
		assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Unchanged);
	}
	assert_eq!(store.current_title(), "New");
	assert!(store.document().node("new").is_some());
	assert!(store.document().node("old").is_none());
	assert_eq!(store.revision(), revision);
}

#[test]
fn unsaved_local_change_survives_until_storage_moves_on() {
	let (storage, sync) = setup();
	let (mut store, _) = mount(&sync);
	storage.set(KEY, r#"{"title":"Old","nodes":[{"id":"old"}]}"#, 0.5).unwrap();
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Replaced);

	store.replace(GraphDocument {
		nodes: vec![Node::new("local", "Local")],
		..GraphDocument::empty()
	});
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Unchanged);
	assert!(store.document().node("local").is_some());

	storage.set(KEY, r#"{"title":"Other tab","nodes":[{"id":"z"}]}"#, 0.5).unwrap();
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Replaced);
	assert_eq!(store.current_title(), "Other tab");
}

#[test]
fn upload_mode_stays_empty_while_polling() {
	let (_, sync) = setup();
	let (mut store, _) = mount(&sync);
	let mut controller = ModeController::default();
	controller.handle_upload(UPLOAD, &sync, &mut store).unwrap();

	controller.select(Mode::Upload, &sync, &mut store);
	assert_eq!(sync.poll_and_merge(&mut store), PollOutcome::Unchanged);
	assert!(store.document().is_empty());
}

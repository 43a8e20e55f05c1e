//! The single in-memory home of the current graph document.

use crate::model::GraphDocument;

/// Title shown until a document supplies one.
pub const DEFAULT_TITLE: &str = "Interactive Graph with Persistence";

/// Holds the current document and the visible title.
///
/// The document only ever changes by wholesale [`replace`](Self::replace).
/// The title lives beside it because it can be edited on its own and because
/// a replacement without a title must not wipe the one on screen.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphStore {
	document: GraphDocument,
	title: String,
	revision: u64,
}

impl GraphStore {
	/// Creates a store holding `document`, titled `title`.
	pub fn new(document: GraphDocument, title: impl Into<String>) -> Self {
		Self {
			document,
			title: title.into(),
			revision: 0,
		}
	}

	/// Swaps in a new document. No merging with the previous one.
	pub fn replace(&mut self, document: GraphDocument) {
		self.document = document;
		self.revision += 1;
	}

	/// Drops the current document in favour of an empty one.
	pub fn clear(&mut self) {
		self.replace(GraphDocument::empty());
	}

	/// The current document.
	pub fn document(&self) -> &GraphDocument {
		&self.document
	}

	/// The title on screen.
	pub fn current_title(&self) -> &str {
		&self.title
	}

	/// Sets the visible title, as the title editor does on every keystroke.
	pub fn set_title(&mut self, title: impl Into<String>) {
		self.title = title.into();
	}

	/// Takes over `title` if there is one, otherwise keeps the current title.
	pub fn adopt_title(&mut self, title: Option<&str>) {
		if let Some(title) = title {
			self.title = title.to_string();
		}
	}

	/// Number of replacements since construction.
	pub fn revision(&self) -> u64 {
		self.revision
	}
}

impl Default for GraphStore {
	fn default() -> Self {
		Self::new(GraphDocument::empty(), DEFAULT_TITLE)
	}
}

//! Error types for graph import, persistence and file handling.

/// Errors surfaced by the graph engine.
///
/// None of these ever reach the [`GraphStore`](crate::store::GraphStore): every
/// failure is caught where it happens and the store keeps its last good
/// document.
#[derive(Debug, thiserror::Error)]
pub enum GrafoError {
	/// Malformed JSON, or JSON that does not have the shape of a graph document.
	#[error("invalid graph document: {0}")]
	Parse(#[from] serde_json::Error),

	/// A user-selected file could not be read.
	#[error("could not read file: {0}")]
	Io(String),

	/// The durable store rejected a write.
	#[error("could not write to storage: {0}")]
	Storage(String),
}

impl GrafoError {
	/// Whether this is a decode failure rather than an I/O problem.
	pub fn is_parse(&self) -> bool {
		matches!(self, GrafoError::Parse(_))
	}
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GrafoError>;

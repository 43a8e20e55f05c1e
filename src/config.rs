//! Application configuration.
//!
//! Every field has a default, so a host page only has to mention what it
//! wants to change:
//!
//! ```html
//! <script id="grafo-config" type="application/json">
//!   { "poll_interval_ms": 5000, "node_radius": 3.0 }
//! </script>
//! ```

use std::str::FromStr;
use std::time::Duration;

use log::Level;
use serde::Deserialize;

use crate::components::force_graph::scale::ScaleConfig;
use crate::error::Result;
use crate::persistence::StorageSettings;
use crate::store::DEFAULT_TITLE;

/// Tunables for persistence, export and drawing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GrafoConfig {
	/// Durable store key holding the saved document.
	pub storage_key: String,
	/// Lifetime of a saved document, in days.
	pub expires_in_days: f64,
	/// How often the durable store is re-read for outside changes.
	pub poll_interval_ms: u64,
	/// Title shown until a document supplies one.
	pub default_title: String,
	/// Name offered for the downloaded export.
	pub export_file_name: String,
	/// `log` level name (`error`, `warn`, `info`, `debug`, `trace`).
	pub log_level: String,
	/// Node circle radius in world units.
	pub node_radius: f64,
	/// Length reserved at the target end of a link for its arrowhead.
	pub arrow_length: f64,
	/// On-screen font size of node titles, in pixels.
	pub node_font_px: f64,
	/// On-screen font size of link labels, in pixels.
	pub link_font_px: f64,
	/// Zoom factor the canvas starts at.
	pub initial_zoom: f64,
}

impl Default for GrafoConfig {
	fn default() -> Self {
		Self {
			storage_key: "grafo_data".to_string(),
			expires_in_days: 0.5,
			poll_interval_ms: 2000,
			default_title: DEFAULT_TITLE.to_string(),
			export_file_name: "graph_data.json".to_string(),
			log_level: "debug".to_string(),
			node_radius: 2.0,
			arrow_length: 6.0,
			node_font_px: 12.0,
			link_font_px: 8.0,
			initial_zoom: 1.0,
		}
	}
}

impl GrafoConfig {
	/// Parses a configuration object. Unknown keys are ignored.
	pub fn from_json(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// The configured log level, falling back to `Debug` for unknown names.
	pub fn log_level(&self) -> Level {
		Level::from_str(&self.log_level).unwrap_or(Level::Debug)
	}

	/// Poll interval as a duration.
	pub fn poll_interval(&self) -> Duration {
		Duration::from_millis(self.poll_interval_ms)
	}

	/// Storage key and lifetime.
	pub fn storage(&self) -> StorageSettings {
		StorageSettings {
			key: self.storage_key.clone(),
			expires_in_days: self.expires_in_days,
		}
	}

	/// Visual scaling derived from the drawing fields.
	pub fn scale(&self) -> ScaleConfig {
		ScaleConfig::new(
			self.node_radius,
			self.arrow_length,
			self.node_font_px,
			self.link_font_px,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_config_keeps_other_defaults() {
		let config = GrafoConfig::from_json(r#"{"poll_interval_ms": 5000, "log_level": "warn"}"#)
			.unwrap();
		assert_eq!(config.poll_interval(), Duration::from_millis(5000));
		assert_eq!(config.log_level(), Level::Warn);
		assert_eq!(config.storage_key, "grafo_data");
		assert_eq!(config.expires_in_days, 0.5);
	}

	#[test]
	fn unknown_level_falls_back_to_debug() {
		let config = GrafoConfig {
			log_level: "loud".into(),
			..GrafoConfig::default()
		};
		assert_eq!(config.log_level(), Level::Debug);
	}
}

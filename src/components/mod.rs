//! UI components.

pub mod detail_overlay;
pub mod file_io;
pub mod force_graph;
pub mod settings_panel;

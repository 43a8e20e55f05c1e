//! Force-directed graph visualization component.
//!
//! Renders the idea graph on an HTML canvas with:
//! - Node positions supplied by the `force_graph` physics simulation
//! - Links trimmed to clear node circles, with arrowheads and midpoint labels
//! - Titles and labels that keep a constant on-screen size while zooming
//! - Pan, zoom, node dragging and hover tracking
//!
//! # Example
//!
//! ```ignore
//! let hovered = RwSignal::new(None);
//! view! { <ForceGraphCanvas data=document hovered=hovered fullscreen=true /> }
//! ```

mod component;
pub mod geometry;
pub mod render;
pub mod scale;
mod state;
pub mod surface;
pub mod theme;

pub use component::ForceGraphCanvas;
pub use state::{ForceGraphState, NodeInfo, ViewTransform};
pub use surface::Surface;
pub use theme::Theme;

//! Core scene-graph logic for the atomcanvas builder.
//! Rendering and edge identity here are pure; editors and stores call in.

pub mod edge;
pub mod logging;
pub mod model;
pub mod render;

pub use edge::identity::{
    canonical_edge_string, derive_edge_id, fnv1a_32, EdgeDescriptor, EdgeEndpoint, EdgeKey,
    EdgeKeyParseError, DEFAULT_HANDLE, EDGE_KEY_PREFIX,
};
pub use edge::memory::EdgeMemoryStore;
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::atom::{AtomId, AtomKind, AtomNode, Properties, PropertyValue};
pub use model::canvas::{load_canvas_file, CanvasLoadError, CanvasState};
pub use render::html::{render_atom, render_document, style_declaration};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

//! Canvas domain model.
//!
//! # Responsibility
//! - Define the scene graph shape shared by editor, renderer and CLI.
//! - Keep the wire format at one boundary (`CanvasState::from_json_str`).
//!
//! # Invariants
//! - Every node is addressed by an opaque `AtomId`.
//! - Node kinds are a closed enum with a container fallback.

pub mod atom;
pub mod canvas;

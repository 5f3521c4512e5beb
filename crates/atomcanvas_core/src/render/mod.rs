//! Scene renderers.
//!
//! # Responsibility
//! - Turn a `CanvasState` into a concrete output document.
//! - Degrade silently on partially edited graphs instead of failing.

pub mod html;

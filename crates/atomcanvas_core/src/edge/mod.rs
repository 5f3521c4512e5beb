//! Edge identity and edge-associated memory.
//!
//! # Responsibility
//! - Derive stable keys for graph connections.
//! - Provide an explicit in-process registry keyed by those identities.
//!
//! # Invariants
//! - Identity is directional and handle-qualified.
//! - Key format `edge-` + 8 lowercase hex digits is a compatibility
//!   contract with stored memory; widening it is a breaking change.

pub mod identity;
pub mod memory;

//! In-process edge memory registry.
//!
//! # Responsibility
//! - Attach arbitrary JSON payloads to connections by their `EdgeKey`.
//! - Reattach memory to a recreated edge without storing the key anywhere.
//!
//! # Invariants
//! - Keys are always derived through `EdgeDescriptor::key`.
//! - The store is explicitly constructed and passed; there is no global
//!   instance. Durability belongs to the caller.

use crate::edge::identity::{EdgeDescriptor, EdgeKey};
use crate::logging::sanitize_for_log;
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

/// Memory payloads keyed by edge identity.
#[derive(Debug, Default, Clone)]
pub struct EdgeMemoryStore {
    entries: BTreeMap<EdgeKey, Value>,
}

impl EdgeMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `memory` for `edge`, replacing any previous payload.
    ///
    /// Returns the key the payload was stored under.
    pub fn remember(&mut self, edge: &EdgeDescriptor, memory: Value) -> EdgeKey {
        let key = edge.key();
        let replaced = self.entries.insert(key.clone(), memory).is_some();
        debug!(
            "event=edge_remember module=edge key={} source={} target={} replaced={}",
            key,
            sanitize_for_log(&edge.source.node),
            sanitize_for_log(&edge.target.node),
            replaced
        );
        key
    }

    pub fn recall(&self, edge: &EdgeDescriptor) -> Option<&Value> {
        self.entries.get(&edge.key())
    }

    pub fn recall_key(&self, key: &EdgeKey) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Removes and returns the payload stored for `edge`.
    pub fn forget(&mut self, edge: &EdgeDescriptor) -> Option<Value> {
        let key = edge.key();
        let removed = self.entries.remove(&key);
        if removed.is_some() {
            debug!("event=edge_forget module=edge key={key}");
        }
        removed
    }

    /// Returns stored keys in ascending order.
    pub fn keys(&self) -> Vec<EdgeKey> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

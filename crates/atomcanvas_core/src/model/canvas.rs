//! Canvas (scene graph) model and its JSON boundary.
//!
//! # Responsibility
//! - Own every atom of one canvas and the ordered root list.
//! - Load and store the canvas wire format losslessly.
//!
//! # Invariants
//! - `atoms` is the sole owner of node data.
//! - Dangling references are tolerated; they are reported, never rejected.

use crate::model::atom::{AtomId, AtomNode};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Errors raised at the canvas wire boundary.
#[derive(Debug)]
pub enum CanvasLoadError {
    /// Canvas file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Payload is not a valid canvas document.
    Json(serde_json::Error),
}

impl Display for CanvasLoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read canvas `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid canvas document: {err}"),
        }
    }
}

impl Error for CanvasLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for CanvasLoadError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

/// Immutable-by-convention scene graph handed to the renderer.
///
/// Serialized as `{ "atoms": {...}, "rootAtomIds": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasState {
    #[serde(default)]
    pub atoms: BTreeMap<AtomId, AtomNode>,
    #[serde(default)]
    pub root_atom_ids: Vec<AtomId>,
}

impl CanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one atom, returning the replaced node.
    pub fn insert_atom(&mut self, id: impl Into<AtomId>, node: AtomNode) -> Option<AtomNode> {
        self.atoms.insert(id.into(), node)
    }

    /// Appends one id to the root list. The id need not exist yet.
    pub fn push_root(&mut self, id: impl Into<AtomId>) {
        self.root_atom_ids.push(id.into());
    }

    pub fn atom(&self, id: &str) -> Option<&AtomNode> {
        self.atoms.get(id)
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Lists ids referenced by roots or children but absent from `atoms`.
    ///
    /// Sorted and deduplicated.
    pub fn missing_references(&self) -> Vec<AtomId> {
        let referenced = self
            .root_atom_ids
            .iter()
            .chain(self.atoms.values().flat_map(|node| node.children.iter()));
        referenced
            .filter(|id| !self.atoms.contains_key(*id))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Parses one canvas document.
    ///
    /// # Errors
    /// - Returns `CanvasLoadError::Json` for malformed JSON or for property
    ///   values that are not strings or numbers.
    pub fn from_json_str(raw: &str) -> Result<Self, CanvasLoadError> {
        let canvas: Self = serde_json::from_str(raw)?;
        debug!(
            "event=canvas_parse module=model status=ok atoms={} roots={}",
            canvas.atoms.len(),
            canvas.root_atom_ids.len()
        );
        Ok(canvas)
    }

    pub fn to_json_string(&self) -> Result<String, CanvasLoadError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Reads and parses one canvas file.
pub fn load_canvas_file(path: impl AsRef<Path>) -> Result<CanvasState, CanvasLoadError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CanvasLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    CanvasState::from_json_str(&raw)
}

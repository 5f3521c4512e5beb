//! Deterministic edge identity.
//!
//! # Responsibility
//! - Derive a short, stable storage key for a directed, handle-qualified
//!   connection between two atoms.
//!
//! # Invariants
//! - Same canonical string => same key, on every platform and run.
//! - Keys always match `edge-[0-9a-f]{8}`.
//! - The hash is FNV-1a 32 over Unicode scalar values. It is a fingerprint,
//!   not a security primitive, and collisions are not detected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Handle name used when an endpoint does not name one.
pub const DEFAULT_HANDLE: &str = "default";
/// Literal tag prepended to every edge key.
pub const EDGE_KEY_PREFIX: &str = "edge-";

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

static EDGE_KEY_DIGEST_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-f]{8}$").expect("valid edge digest regex"));

/// One side of a connection: an atom plus an optional named handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeEndpoint {
    pub node: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl EdgeEndpoint {
    pub fn new(node: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            handle: None,
        }
    }

    pub fn with_handle(node: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            node: node.into(),
            handle: Some(handle.into()),
        }
    }

    /// Handle name with the `default` fallback applied.
    pub fn handle_or_default(&self) -> &str {
        self.handle.as_deref().unwrap_or(DEFAULT_HANDLE)
    }
}

/// Directed connection `source -> target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeDescriptor {
    pub source: EdgeEndpoint,
    pub target: EdgeEndpoint,
}

impl EdgeDescriptor {
    pub fn new(source: EdgeEndpoint, target: EdgeEndpoint) -> Self {
        Self { source, target }
    }

    /// Connection between the default handles of two atoms.
    pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self::new(EdgeEndpoint::new(source), EdgeEndpoint::new(target))
    }

    pub fn canonical(&self) -> String {
        canonical_edge_string(
            &self.source.node,
            &self.target.node,
            Some(self.source.handle_or_default()),
            Some(self.target.handle_or_default()),
        )
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey::from_canonical(&self.canonical())
    }
}

/// Storage key derived from an edge, formatted `edge-xxxxxxxx`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EdgeKey(String);

impl EdgeKey {
    fn from_canonical(canonical: &str) -> Self {
        Self(format!("{EDGE_KEY_PREFIX}{:08x}", fnv1a_32(canonical)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the 32-bit fingerprint encoded in this key.
    pub fn digest(&self) -> u32 {
        // Every constructor guarantees 8 hex digits after the prefix.
        u32::from_str_radix(&self.0[EDGE_KEY_PREFIX.len()..], 16).unwrap_or_default()
    }
}

impl Display for EdgeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for EdgeKey {
    type Err = EdgeKeyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let Some(digest) = value.strip_prefix(EDGE_KEY_PREFIX) else {
            return Err(EdgeKeyParseError::MissingPrefix(value.to_string()));
        };
        if !EDGE_KEY_DIGEST_RE.is_match(digest) {
            return Err(EdgeKeyParseError::InvalidDigest(value.to_string()));
        }
        Ok(Self(value.to_string()))
    }
}

impl TryFrom<String> for EdgeKey {
    type Error = EdgeKeyParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<EdgeKey> for String {
    fn from(value: EdgeKey) -> Self {
        value.0
    }
}

/// Errors from parsing an externally supplied edge key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKeyParseError {
    MissingPrefix(String),
    InvalidDigest(String),
}

impl Display for EdgeKeyParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingPrefix(value) => {
                write!(f, "edge key must start with `{EDGE_KEY_PREFIX}`: {value}")
            }
            Self::InvalidDigest(value) => write!(
                f,
                "edge key digest must be 8 lowercase hex characters: {value}"
            ),
        }
    }
}

impl Error for EdgeKeyParseError {}

/// Builds the sole hash input: `source:handle->target:handle`.
pub fn canonical_edge_string(
    source: &str,
    target: &str,
    source_handle: Option<&str>,
    target_handle: Option<&str>,
) -> String {
    format!(
        "{source}:{}->{target}:{}",
        source_handle.unwrap_or(DEFAULT_HANDLE),
        target_handle.unwrap_or(DEFAULT_HANDLE)
    )
}

/// 32-bit FNV-1a over the Unicode scalar values of `input`.
pub fn fnv1a_32(input: &str) -> u32 {
    input.chars().fold(FNV_OFFSET_BASIS, |hash, c| {
        (hash ^ u32::from(c)).wrapping_mul(FNV_PRIME)
    })
}

/// Derives the edge key for `source -> target`.
///
/// Absent handles default to `"default"`. Swapping endpoints or changing
/// either handle yields a different key with overwhelming probability.
pub fn derive_edge_id(
    source: &str,
    target: &str,
    source_handle: Option<&str>,
    target_handle: Option<&str>,
) -> EdgeKey {
    EdgeKey::from_canonical(&canonical_edge_string(
        source,
        target,
        source_handle,
        target_handle,
    ))
}

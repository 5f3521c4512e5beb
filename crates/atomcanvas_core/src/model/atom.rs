//! Atom (scene node) domain model.
//!
//! # Responsibility
//! - Define the typed node shape consumed by the renderer.
//! - Keep the property bag closed to primitive values.
//!
//! # Invariants
//! - `AtomId` is opaque; equality is plain string equality.
//! - `Properties` iterates in insertion order and never sorts.
//! - `text` and `src` carry content, not presentation.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Property name carrying the body of `text` atoms.
pub const TEXT_PROPERTY: &str = "text";
/// Property name carrying the media reference of `image` atoms.
pub const SRC_PROPERTY: &str = "src";
/// Property names excluded from the generated style declaration.
pub const RESERVED_CONTENT_KEYS: &[&str] = &[TEXT_PROPERTY, SRC_PROPERTY];

const POSITIONAL_MIN: f64 = 1e-6;
const POSITIONAL_MAX: f64 = 1e21;

/// Opaque identifier naming one entry in a canvas.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AtomId(String);

impl AtomId {
    /// Wraps an existing identifier string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Mints a fresh identifier for editor-side creation paths.
    ///
    /// The result is still an opaque string; callers must not parse it.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AtomId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AtomId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AtomId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AtomId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Rendering behavior selector for one atom.
///
/// Unrecognized kind strings are kept in `Other` so a canvas round-trips
/// losslessly; they render exactly like `Box`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AtomKind {
    /// Leaf carrying the `text` property as its body.
    Text,
    /// Self-closing media reference carrying the `src` property.
    Image,
    /// Generic container rendering its children.
    Box,
    /// Any other kind string; falls back to container behavior.
    Other(String),
}

impl AtomKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Box => "box",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl From<&str> for AtomKind {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for AtomKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "text" => Self::Text,
            "image" => Self::Image,
            "box" => Self::Box,
            _ => Self::Other(value),
        }
    }
}

impl From<AtomKind> for String {
    fn from(value: AtomKind) -> Self {
        match value {
            AtomKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Primitive property value.
///
/// Booleans, nulls, arrays and objects are rejected when deserializing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    String(String),
    Number(f64),
}

impl Display for PropertyValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Number(value) => write_number(f, *value),
        }
    }
}

// Matches how a scripting runtime prints numbers in string interpolation:
// positional notation for magnitudes in [1e-6, 1e21), `1e+21` / `1e-7`
// exponent form outside it.
fn write_number(f: &mut Formatter<'_>, value: f64) -> std::fmt::Result {
    if value.is_nan() {
        return f.write_str("NaN");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
    }
    if value == 0.0 {
        return f.write_str("0");
    }
    if (POSITIONAL_MIN..POSITIONAL_MAX).contains(&value.abs()) {
        return write!(f, "{value}");
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        }
        _ => f.write_str(&exponential),
    }
}

impl Serialize for PropertyValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Number(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
                serializer.serialize_i64(*value as i64)
            }
            Self::Number(value) => serializer.serialize_f64(*value),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

/// Insertion-ordered property bag.
///
/// Re-inserting an existing name replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, PropertyValue)>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces one property, returning the previous value.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    pub fn remove(&mut self, name: &str) -> Option<PropertyValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<PropertyValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.insert(name, value);
        }
        properties
    }
}

impl Serialize for Properties {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PropertiesVisitor;

        impl<'de> Visitor<'de> for PropertiesVisitor {
            type Value = Properties;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map of property names to strings or numbers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Properties, A::Error> {
                let mut properties = Properties::new();
                while let Some((name, value)) = access.next_entry::<String, PropertyValue>()? {
                    properties.insert(name, value);
                }
                Ok(properties)
            }
        }

        deserializer.deserialize_map(PropertiesVisitor)
    }
}

/// One addressable node of a canvas.
///
/// `children` lists references only; the owning `CanvasState` holds every
/// node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomNode {
    pub kind: AtomKind,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub children: Vec<AtomId>,
}

impl AtomNode {
    /// Creates a node with no properties and no children.
    pub fn new(kind: AtomKind) -> Self {
        Self {
            kind,
            properties: Properties::new(),
            children: Vec::new(),
        }
    }

    /// Creates a `box` container.
    pub fn container() -> Self {
        Self::new(AtomKind::Box)
    }

    /// Creates a `text` leaf with its body set.
    pub fn text(body: impl Into<String>) -> Self {
        Self::new(AtomKind::Text)
            .with_property(TEXT_PROPERTY, PropertyValue::String(body.into()))
    }

    /// Creates an `image` node referencing `src`.
    pub fn image(src: impl Into<String>) -> Self {
        Self::new(AtomKind::Image)
            .with_property(SRC_PROPERTY, PropertyValue::String(src.into()))
    }

    pub fn with_property(
        mut self,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Self {
        self.properties.insert(name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<AtomId>) -> Self {
        self.children.push(child.into());
        self
    }
}

/// Returns whether `name` carries content rather than presentation.
pub fn is_reserved_content_key(name: &str) -> bool {
    RESERVED_CONTENT_KEYS.contains(&name)
}

//! Configuration tree data model.
//!
//! A [`ConfigTree`] is the parsed form of a semi-structured configuration
//! document, the shape both NXAPI/YANG-style JSON payloads and operator-written
//! YAML intent files share. It is a closed tagged union so the reconciliation
//! logic in [`crate::reconcile`] can dispatch on an exhaustive set of cases
//! instead of inspecting runtime types:
//!
//! - [`ConfigTree::Leaf`]: an opaque scalar (null, bool, number, string)
//! - [`ConfigTree::Sequence`]: a list, ordered in storage but unordered for
//!   comparison purposes
//! - [`ConfigTree::Mapping`]: string-keyed entries, key order irrelevant for
//!   comparison
//! - [`ConfigTree::Required`]: a presence marker, "this item must exist with
//!   some value"
//!
//! The textual form of the presence marker is a single-element list holding
//! null (`[null]` in JSON, `- null` in YAML). Conversion normalizes that shape
//! into the explicit [`ConfigTree::Required`] variant, so the comparator never
//! has to re-infer it from list shape.
//!
//! Documents from untrusted sources are guarded by a nesting limit
//! ([`MAX_DEPTH`]); conversion fails with [`Error::DepthExceeded`] instead of
//! recursing without bound.

use std::fmt;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Maximum nesting depth accepted when converting a document into a tree.
///
/// Real device configuration payloads nest a handful of levels; 64 leaves
/// generous headroom while keeping recursion bounded for untrusted input.
pub const MAX_DEPTH: usize = 64;

// ============================================================================
// Scalar values
// ============================================================================

/// An opaque scalar leaf value.
///
/// Scalars compare with JSON semantics: values of different kinds are never
/// equal (the string `"1"` does not equal the number `1`), and numbers keep
/// the representation distinctions of [`serde_json::Number`].
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Explicit null
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (integer or float, JSON semantics)
    Number(serde_json::Number),
    /// String value
    String(String),
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

// ============================================================================
// ConfigTree
// ============================================================================

/// A parsed configuration document.
///
/// Trees are acyclic and finite-depth by construction. They are read-only
/// within a reconciliation call; the comparator borrows them and never clones.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigTree {
    /// A scalar value
    Leaf(Scalar),
    /// A list of subtrees; element order carries no comparison meaning
    Sequence(Vec<ConfigTree>),
    /// String-keyed entries; key order carries no comparison meaning
    Mapping(IndexMap<String, ConfigTree>),
    /// Presence marker: the item must exist with some non-null value
    Required,
}

impl ConfigTree {
    /// An empty mapping, the coercion target for absent or null documents.
    #[must_use]
    pub fn empty() -> Self {
        ConfigTree::Mapping(IndexMap::new())
    }

    /// Whether this tree is an explicit null leaf.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigTree::Leaf(Scalar::Null))
    }

    /// Whether this tree requires nothing of the current state: a null leaf,
    /// an empty mapping, or an empty sequence.
    #[must_use]
    pub fn is_vacuous(&self) -> bool {
        match self {
            ConfigTree::Leaf(Scalar::Null) => true,
            ConfigTree::Sequence(items) => items.is_empty(),
            ConfigTree::Mapping(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Parse a JSON document into a tree.
    ///
    /// A blank document is treated as an empty mapping, matching what a
    /// device returns for a feature block with no configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonParse`] for malformed input and
    /// [`Error::DepthExceeded`] when the document nests past [`MAX_DEPTH`].
    pub fn from_json_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::empty());
        }
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::try_from(value)
    }

    /// Parse a YAML document into a tree, with the same blank-input and
    /// depth-limit contract as [`ConfigTree::from_json_str`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::YamlParse`] for malformed input,
    /// [`Error::NonStringKey`] for non-string mapping keys,
    /// [`Error::NonFiniteNumber`] for `.nan`/`.inf`, and
    /// [`Error::DepthExceeded`] past [`MAX_DEPTH`].
    pub fn from_yaml_str(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Ok(Self::empty());
        }
        let value: serde_yaml::Value = serde_yaml::from_str(input)?;
        Self::try_from(value)
    }

    /// Render the tree back to compact JSON, mainly for log output.
    #[must_use]
    pub fn to_json_string(&self) -> String {
        // Serialization of this shape cannot fail
        serde_json::to_string(self).unwrap_or_else(|_| String::from("null"))
    }
}

impl Default for ConfigTree {
    fn default() -> Self {
        Self::empty()
    }
}

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ConfigTree::Leaf(scalar) => scalar.serialize(serializer),
            ConfigTree::Sequence(items) => items.serialize(serializer),
            ConfigTree::Mapping(entries) => entries.serialize(serializer),
            ConfigTree::Required => {
                // Round-trips to the textual presence-marker form
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&Scalar::Null)?;
                seq.end()
            }
        }
    }
}

impl fmt::Display for ConfigTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_json_string())
    }
}

// ============================================================================
// Conversions
// ============================================================================

impl TryFrom<serde_json::Value> for ConfigTree {
    type Error = Error;

    fn try_from(value: serde_json::Value) -> Result<Self> {
        from_json_value(value, 0)
    }
}

impl TryFrom<serde_yaml::Value> for ConfigTree {
    type Error = Error;

    fn try_from(value: serde_yaml::Value) -> Result<Self> {
        from_yaml_value(value, 0)
    }
}

fn from_json_value(value: serde_json::Value, depth: usize) -> Result<ConfigTree> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { max_depth: MAX_DEPTH });
    }
    Ok(match value {
        serde_json::Value::Null => ConfigTree::Leaf(Scalar::Null),
        serde_json::Value::Bool(b) => ConfigTree::Leaf(Scalar::Bool(b)),
        serde_json::Value::Number(n) => ConfigTree::Leaf(Scalar::Number(n)),
        serde_json::Value::String(s) => ConfigTree::Leaf(Scalar::String(s)),
        serde_json::Value::Array(items) => {
            if items.len() == 1 && items[0].is_null() {
                ConfigTree::Required
            } else {
                let mut seq = Vec::with_capacity(items.len());
                for item in items {
                    seq.push(from_json_value(item, depth + 1)?);
                }
                ConfigTree::Sequence(seq)
            }
        }
        serde_json::Value::Object(entries) => {
            let mut mapping = IndexMap::with_capacity(entries.len());
            for (key, entry) in entries {
                mapping.insert(key, from_json_value(entry, depth + 1)?);
            }
            ConfigTree::Mapping(mapping)
        }
    })
}

fn from_yaml_value(value: serde_yaml::Value, depth: usize) -> Result<ConfigTree> {
    if depth > MAX_DEPTH {
        return Err(Error::DepthExceeded { max_depth: MAX_DEPTH });
    }
    Ok(match value {
        serde_yaml::Value::Null => ConfigTree::Leaf(Scalar::Null),
        serde_yaml::Value::Bool(b) => ConfigTree::Leaf(Scalar::Bool(b)),
        serde_yaml::Value::Number(n) => ConfigTree::Leaf(Scalar::Number(yaml_number(&n)?)),
        serde_yaml::Value::String(s) => ConfigTree::Leaf(Scalar::String(s)),
        serde_yaml::Value::Sequence(items) => {
            if items.len() == 1 && items[0].is_null() {
                ConfigTree::Required
            } else {
                let mut seq = Vec::with_capacity(items.len());
                for item in items {
                    seq.push(from_yaml_value(item, depth + 1)?);
                }
                ConfigTree::Sequence(seq)
            }
        }
        serde_yaml::Value::Mapping(entries) => {
            let mut mapping = IndexMap::with_capacity(entries.len());
            for (key, entry) in entries {
                let serde_yaml::Value::String(key) = key else {
                    return Err(Error::NonStringKey {
                        key: serde_yaml::to_string(&key)
                            .unwrap_or_else(|_| String::from("<unprintable>"))
                            .trim_end()
                            .to_string(),
                    });
                };
                mapping.insert(key, from_yaml_value(entry, depth + 1)?);
            }
            ConfigTree::Mapping(mapping)
        }
        // Tags carry no comparison meaning; keep the tagged value
        serde_yaml::Value::Tagged(tagged) => from_yaml_value(tagged.value, depth)?,
    })
}

/// Convert a YAML number to the JSON number used for scalar comparison.
fn yaml_number(n: &serde_yaml::Number) -> Result<serde_json::Number> {
    if let Some(i) = n.as_i64() {
        Ok(serde_json::Number::from(i))
    } else if let Some(u) = n.as_u64() {
        Ok(serde_json::Number::from(u))
    } else if let Some(f) = n.as_f64() {
        serde_json::Number::from_f64(f).ok_or_else(|| Error::NonFiniteNumber {
            value: n.to_string(),
        })
    } else {
        Err(Error::NonFiniteNumber { value: n.to_string() })
    }
}

// ============================================================================
// Tests
// ============================================================================

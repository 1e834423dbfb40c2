//! Error types for Confsync.
//!
//! This module defines the error types used throughout Confsync. Errors only
//! arise while ingesting documents into a [`ConfigTree`](crate::tree::ConfigTree);
//! comparison outcomes are always plain booleans and never surface as errors.

use thiserror::Error;

/// Result type alias for Confsync operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Confsync.
#[derive(Error, Debug)]
pub enum Error {
    /// Error parsing a JSON configuration document.
    #[error("Failed to parse JSON configuration document: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Error parsing a YAML configuration document.
    #[error("Failed to parse YAML configuration document: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A document nests deeper than the supported limit.
    #[error("Configuration tree exceeds maximum nesting depth of {max_depth}")]
    DepthExceeded {
        /// The enforced nesting limit
        max_depth: usize,
    },

    /// A mapping key in a YAML document is not a string.
    #[error("Mapping key is not a string: {key}")]
    NonStringKey {
        /// Display form of the offending key
        key: String,
    },

    /// A YAML number (e.g. `.nan` or `.inf`) has no JSON-comparable form.
    #[error("Number '{value}' has no finite representation")]
    NonFiniteNumber {
        /// Display form of the offending number
        value: String,
    },
}

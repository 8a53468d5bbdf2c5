//! Error type for loading, querying, and tuning specs.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::ValueKind;

/// Errors produced by the tunable spec library.
#[derive(Debug, Error)]
pub enum TunableError {
    /// The spec file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The spec file is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON is well-formed but does not describe a valid spec.
    #[error("malformed entry at index {index}: {reason}")]
    Malformed {
        /// Position of the offending object in the array
        index: usize,
        /// What is wrong with it
        reason: String,
    },

    /// Two entries share a key.
    #[error("duplicate key '{0}'")]
    DuplicateKey(String),

    /// No entry exists for the requested key.
    #[error("unknown key '{0}'")]
    UnknownKey(String),

    /// The entry exists but holds a different kind of value.
    #[error("key '{key}' holds a {actual} value, not a {requested} value")]
    KindMismatch {
        /// Requested key
        key: String,
        /// Kind the caller asked for
        requested: ValueKind,
        /// Kind fixed at load time
        actual: ValueKind,
    },

    /// A value cannot be stored (for example a NaN double).
    #[error("invalid value for '{key}': {reason}")]
    InvalidValue {
        /// Key being set
        key: String,
        /// Why the value was rejected
        reason: &'static str,
    },

    /// A color string could not be parsed.
    #[error("invalid color '{value}': {reason}")]
    InvalidColor {
        /// The offending string
        value: String,
        /// Parse failure description
        reason: &'static str,
    },

    /// The spec failed to load, so tuning is unavailable.
    #[error("spec '{name}' is disabled: {reason}")]
    Disabled {
        /// Spec name
        name: String,
        /// Why loading failed
        reason: String,
    },
}

/// Result alias used throughout the library.
pub type TunableResult<T> = Result<T, TunableError>;

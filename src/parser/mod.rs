//! Parsing and serialization for spec files.
//!
//! This module reads the JSON array format that backs a tunable spec and
//! writes it back out for export.

pub mod spec_json;

// Re-export commonly used functions
pub use spec_json::{parse_spec_file, parse_spec_json, spec_to_json};

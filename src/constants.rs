//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and environment variable names.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "TuneSpec";

/// The binary name of the application (used in command examples).
pub const APP_BINARY_NAME: &str = "tunespec";

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "TuneSpec";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "TUNESPEC_CONFIG_DIR";

/// File extension of spec resources.
pub const SPEC_EXTENSION: &str = "json";

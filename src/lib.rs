//! Tunable Spec Library
//!
//! Runtime-adjustable settings backed by JSON spec files: typed lookup,
//! owner-scoped change maintainers, a headless control model for editing
//! surfaces, and export of tuned values back to the file format.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod controls;
pub mod error;
pub mod export;
pub mod models;
pub mod parser;
pub mod registry;
pub mod spec;
#[cfg(feature = "ratatui")]
pub mod tui;

pub use controls::{Control, ControlPanel, ControlState};
pub use error::{TunableError, TunableResult};
pub use models::{RgbaColor, TunableValue, ValueKind};
pub use registry::SpecRegistry;
pub use spec::TunableSpec;

//! CLI command handlers.
//!
//! Headless, scriptable access to spec files: inspect, query, tune single
//! values, validate, export, and manage configuration. `tune` opens the
//! terminal panel, which needs the `ratatui` feature.

pub mod common;
pub mod config;
pub mod export;
pub mod get;
pub mod set;
pub mod show;
pub mod tune;
pub mod validate;

// Re-export types used by main.rs
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use export::ExportArgs;
pub use get::GetArgs;
pub use set::SetArgs;
pub use show::ShowArgs;
pub use tune::TuneArgs;
pub use validate::ValidateArgs;

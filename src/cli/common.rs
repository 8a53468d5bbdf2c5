//! Shared CLI plumbing: error kinds, exit codes and spec resolution.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::Args;
use serde::Serialize;

use crate::config::Config;
use crate::constants::SPEC_EXTENSION;
use crate::error::TunableError;
use crate::models::TunableValue;
use crate::registry::SpecRegistry;
use crate::spec::TunableSpec;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Input was read but is not acceptable
    Validation = 1,
    /// Reading or writing failed
    Io = 2,
    /// Arguments were wrong
    Usage = 3,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Error returned by a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Exit code to report
    pub kind: ExitCode,
    /// Message printed on stderr
    pub message: String,
}

impl CliError {
    /// A validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Validation,
            message: message.into(),
        }
    }

    /// An I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Io,
            message: message.into(),
        }
    }

    /// A usage error (exit code 3).
    pub fn usage(message: impl Into<String>) -> Self {
        Self {
            kind: ExitCode::Usage,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.kind.code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<TunableError> for CliError {
    fn from(err: TunableError) -> Self {
        match err {
            TunableError::Io { .. } => Self::io(err.to_string()),
            TunableError::UnknownKey(_) | TunableError::KindMismatch { .. } => {
                Self::usage(err.to_string())
            }
            _ => Self::validation(err.to_string()),
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Which spec a command works on.
#[derive(Debug, Clone, Args)]
pub struct SpecArg {
    /// Spec name in the resources directory, or a path ending in `.json`
    #[arg(value_name = "SPEC")]
    pub spec: String,

    /// Resources directory (overrides the configured one)
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,
}

impl SpecArg {
    /// Whether `spec` names a file rather than a resource.
    #[must_use]
    pub fn is_path(&self) -> bool {
        Path::new(&self.spec)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SPEC_EXTENSION))
    }

    /// Spec name: the file stem for paths, the argument otherwise.
    #[must_use]
    pub fn name(&self) -> String {
        if self.is_path() {
            Path::new(&self.spec)
                .file_stem()
                .map_or_else(|| self.spec.clone(), |s| s.to_string_lossy().to_string())
        } else {
            self.spec.clone()
        }
    }

    /// File the spec is read from.
    pub fn path(&self) -> CliResult<PathBuf> {
        if self.is_path() {
            return Ok(PathBuf::from(&self.spec));
        }
        let resources = match &self.resources {
            Some(dir) => dir.clone(),
            None => load_config()?.paths.resources_dir,
        };
        Ok(SpecRegistry::new(resources).spec_path(&self.spec))
    }

    /// Loads the spec, failing on a missing or malformed file.
    pub fn load(&self) -> CliResult<Rc<TunableSpec>> {
        let path = self.path()?;
        if !path.is_file() {
            return Err(CliError::io(format!(
                "Spec file not found: {}",
                path.display()
            )));
        }
        let spec = TunableSpec::load(self.name(), &path)
            .map_err(|e| CliError::validation(format!("Failed to load {}: {e}", path.display())))?;
        Ok(Rc::new(spec))
    }
}

/// Loads the configuration, mapping failures to a validation error.
pub fn load_config() -> CliResult<Config> {
    Config::load().map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Human-readable rendering of a value.
#[must_use]
pub fn describe_value(value: &TunableValue) -> String {
    match value {
        TunableValue::Double(v) => format_number(*v),
        TunableValue::Bool(flag) => (if *flag { "on" } else { "off" }).to_string(),
        TunableValue::Color(color) => color.to_hex(),
    }
}

/// Formats a double without a trailing `.0` when it is integral.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

//! Validation command for spec files.

use crate::cli::common::{format_number, print_json, CliError, CliResult, SpecArg};
use crate::models::EntryValue;
use crate::spec::TunableSpec;
use clap::Args;
use serde::Serialize;

/// Check a spec file for errors and warnings
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON validation report
#[derive(Serialize, Debug)]
struct ValidationResponse {
    valid: bool,
    name: String,
    path: String,
    entries: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let path = self.spec.path()?;
        if !path.is_file() {
            return Err(CliError::io(format!(
                "Spec file not found: {}",
                path.display()
            )));
        }

        let mut response = ValidationResponse {
            valid: true,
            name: self.spec.name(),
            path: path.display().to_string(),
            entries: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        match TunableSpec::load(self.spec.name(), &path) {
            Ok(spec) => {
                response.entries = spec.len();
                response.warnings = range_warnings(&spec);
            }
            Err(err) => {
                response.valid = false;
                response.errors.push(err.to_string());
            }
        }

        if self.json {
            print_json(&response)?;
        } else {
            print_report(&response);
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }
        if self.strict && !response.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }
        Ok(())
    }
}

/// Slider entries whose value sits outside their range, or whose range is empty.
fn range_warnings(spec: &TunableSpec) -> Vec<String> {
    spec.entries()
        .iter()
        .filter_map(|entry| match entry.value {
            EntryValue::Slider(slider) if slider.span() <= 0.0 => Some(format!(
                "{}: slider range is empty ({} .. {})",
                entry.key,
                format_number(slider.min),
                format_number(slider.max)
            )),
            EntryValue::Slider(slider) if slider.clamp(slider.value) != slider.value => {
                Some(format!(
                    "{}: value {} is outside {} .. {}",
                    entry.key,
                    format_number(slider.value),
                    format_number(slider.min),
                    format_number(slider.max)
                ))
            }
            _ => None,
        })
        .collect()
}

fn print_report(response: &ValidationResponse) {
    if response.valid {
        println!("✓ {} is valid ({} entries)", response.name, response.entries);
    } else {
        println!("✗ {} is invalid", response.name);
    }

    for error in &response.errors {
        println!("  ✗ {error}");
    }
    for warning in &response.warnings {
        println!("  ⚠ {warning}");
    }
}

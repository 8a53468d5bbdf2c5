//! Set command: tunes one value and writes the spec file back.

use crate::cli::common::{describe_value, CliError, CliResult, SpecArg};
use crate::models::{TunableValue, ValueKind};
use clap::Args;

/// Change one value and save the spec file
#[derive(Debug, Clone, Args)]
pub struct SetArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Entry key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// New value: a number, on/off (true/false), or #RRGGBB[AA]
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,
}

impl SetArgs {
    /// Execute the set command
    pub fn execute(&self) -> CliResult<()> {
        let spec = self.spec.load()?;
        let kind = spec.kind_of(&self.key)?;

        let value = TunableValue::parse_as(kind, &self.value).ok_or_else(|| {
            CliError::usage(format!(
                "'{}' is not a valid {} value for {}{}",
                self.value,
                kind,
                self.key,
                expected_hint(kind)
            ))
        })?;

        let changed = spec.set_value(&self.key, value)?;
        if !changed {
            println!("{} is already {}", self.key, describe_value(&value));
            return Ok(());
        }

        let path = spec
            .save()
            .map_err(|e| CliError::io(format!("Failed to save spec: {e}")))?;
        println!(
            "{} = {} (saved {})",
            self.key,
            describe_value(&value),
            path.display()
        );
        Ok(())
    }
}

const fn expected_hint(kind: ValueKind) -> &'static str {
    match kind {
        ValueKind::Double => " (expected a finite number)",
        ValueKind::Bool => " (expected on/off, true/false, yes/no or 1/0)",
        ValueKind::Color => " (expected #RRGGBB or #RRGGBBAA)",
    }
}

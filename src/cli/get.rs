//! Get command: prints one value.

use crate::cli::common::{describe_value, print_json, CliResult, SpecArg};
use crate::cli::show::EntryOutput;
use clap::Args;

/// Print the current value of one key
#[derive(Debug, Clone, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Entry key
    #[arg(value_name = "KEY")]
    pub key: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl GetArgs {
    /// Execute the get command
    pub fn execute(&self) -> CliResult<()> {
        let spec = self.spec.load()?;
        let entry = spec.entry(&self.key)?;

        if self.json {
            print_json(&EntryOutput::from(&entry))
        } else {
            println!("{}", describe_value(&entry.value.current()));
            Ok(())
        }
    }
}

//! Export command: writes a spec out as a new spec file.

use crate::cli::common::{load_config, CliError, CliResult, SpecArg};
use crate::export;
use clap::Args;
use std::path::PathBuf;

/// Export a spec to a new JSON file or the clipboard
#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Output path (defaults to <spec>_export_<date>.json in the export directory)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Copy the JSON to the clipboard instead of writing a file
    #[arg(long)]
    pub clipboard: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub fn execute(&self) -> CliResult<()> {
        let spec = self.spec.load()?;

        if self.clipboard {
            let text = spec.to_json_string()?;
            export::copy_to_clipboard(&text)
                .map_err(|e| CliError::io(format!("Failed to copy to clipboard: {e:#}")))?;
            println!("Copied {} ({} entries) to the clipboard", spec.name(), spec.len());
            return Ok(());
        }

        let output = match &self.output {
            Some(path) => path.clone(),
            None => {
                let config = load_config()?;
                export::default_export_path(&config.export.output_dir, spec.name())
            }
        };

        spec.export_to(&output)
            .map_err(|e| CliError::io(format!("Failed to write export: {e}")))?;

        println!("Exported {} to {}", spec.name(), output.display());
        Ok(())
    }
}

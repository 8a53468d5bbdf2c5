//! Tune command: opens the terminal tuning panel.

use crate::cli::common::{CliError, CliResult, SpecArg};
use clap::Args;

/// Tune a spec interactively in the terminal
#[derive(Debug, Clone, Args)]
pub struct TuneArgs {
    #[command(flatten)]
    pub(crate) spec: SpecArg,

    /// Start with the controls hidden
    #[arg(long)]
    pub hidden: bool,
}

impl TuneArgs {
    /// Execute the tune command
    #[cfg(feature = "ratatui")]
    pub fn execute(&self) -> CliResult<()> {
        let spec = self.spec.load()?;
        let mut config = crate::cli::common::load_config()?;
        if self.hidden {
            config.ui.show_controls_on_startup = false;
        }

        crate::tui::run(spec, &config).map_err(|e| CliError::io(format!("Terminal error: {e:#}")))
    }

    /// Execute the tune command
    #[cfg(not(feature = "ratatui"))]
    pub fn execute(&self) -> CliResult<()> {
        Err(CliError::usage(format!(
            "Cannot tune {}: built without the ratatui feature",
            self.spec.spec
        )))
    }
}

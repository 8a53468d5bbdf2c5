//! Configuration management CLI commands.

use crate::cli::common::{load_config, print_json, CliError, CliResult};
use crate::config::{Config, ThemeMode};
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::warn;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Directory holding spec resources
    #[arg(long, value_name = "DIR")]
    resources_dir: Option<PathBuf>,

    /// Directory exports are written to
    #[arg(long, value_name = "DIR")]
    export_dir: Option<PathBuf>,

    /// Theme mode (auto, light, or dark)
    #[arg(long, value_name = "MODE")]
    theme: Option<String>,

    /// Nudges across a slider's full range
    #[arg(long, value_name = "N")]
    slider_steps: Option<u32>,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    config_file: String,
    paths: PathsOutput,
    export: ExportOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    resources_dir: String,
}

#[derive(Serialize, Debug)]
struct ExportOutput {
    output_dir: String,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    theme: String,
    slider_steps: u32,
    show_controls_on_startup: bool,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config()?;
        let output = ConfigOutput::from(&config);

        if self.json {
            print_json(&output)?;
        } else {
            output_human_readable(&output);
        }

        Ok(())
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.resources_dir.is_none()
            && self.export_dir.is_none()
            && self.theme.is_none()
            && self.slider_steps.is_none()
        {
            return Err(CliError::usage(
                "At least one configuration option must be specified: --resources-dir, --export-dir, --theme, or --slider-steps",
            ));
        }

        let mut config = match Config::load() {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %format!("{err:#}"), "replacing unreadable configuration with defaults");
                Config::default()
            }
        };

        if let Some(path) = &self.resources_dir {
            if !path.is_dir() {
                return Err(CliError::validation(format!(
                    "Resources directory does not exist: {}",
                    path.display()
                )));
            }
            config.paths.resources_dir.clone_from(path);
        }

        if let Some(path) = &self.export_dir {
            std::fs::create_dir_all(path).map_err(|e| {
                CliError::io(format!(
                    "Failed to create export directory {}: {}",
                    path.display(),
                    e
                ))
            })?;
            config.export.output_dir.clone_from(path);
        }

        if let Some(theme) = &self.theme {
            config.ui.theme_mode = ThemeMode::parse(theme).ok_or_else(|| {
                CliError::validation("Invalid theme mode. Must be 'auto', 'light', or 'dark'")
            })?;
        }

        if let Some(steps) = self.slider_steps {
            if steps == 0 {
                return Err(CliError::validation("Slider steps must be at least 1"));
            }
            config.ui.slider_steps = steps;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

impl From<&Config> for ConfigOutput {
    fn from(config: &Config) -> Self {
        Self {
            config_file: Config::config_file_path()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            paths: PathsOutput {
                resources_dir: config.paths.resources_dir.display().to_string(),
            },
            export: ExportOutput {
                output_dir: config.export.output_dir.display().to_string(),
            },
            ui: UiOutput {
                theme: config.ui.theme_mode.as_str().to_string(),
                slider_steps: config.ui.slider_steps,
                show_controls_on_startup: config.ui.show_controls_on_startup,
            },
        }
    }
}

fn output_human_readable(output: &ConfigOutput) {
    println!("Configuration ({})", output.config_file);
    println!();
    println!("Paths:");
    println!("  Resources:  {}", output.paths.resources_dir);
    println!();
    println!("Export:");
    println!("  Output Dir: {}", output.export.output_dir);
    println!();
    println!("UI:");
    println!("  Theme:         {}", output.ui.theme);
    println!("  Slider Steps:  {}", output.ui.slider_steps);
    println!("  Show Controls: {}", output.ui.show_controls_on_startup);
}

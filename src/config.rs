//! User configuration stored as TOML in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{APP_DIR_NAME, CONFIG_DIR_ENV};
use crate::export::write_atomic;

const CONFIG_FILE_NAME: &str = "config.toml";

/// Which terminal theme to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Follow the OS appearance
    #[default]
    Auto,
    /// Dark background
    Dark,
    /// Light background
    Light,
}

impl ThemeMode {
    /// Parses a user-supplied mode name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Lowercase name as accepted by [`ThemeMode::parse`].
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}

/// Where spec resources live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory that holds `<name>.json` spec resources
    pub resources_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            resources_dir: PathBuf::from("resources"),
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Directory exported specs are written to when no output path is given
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        let output_dir = Self::default_output_dir().unwrap_or_else(|_| PathBuf::from("exports"));

        Self { output_dir }
    }
}

impl ExportConfig {
    /// `exports/` next to the config file.
    fn default_output_dir() -> Result<PathBuf> {
        Config::config_dir().map(|dir| dir.join("exports"))
    }
}

/// Tuning panel preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Open the tuning panel with controls already visible
    pub show_controls_on_startup: bool,
    /// Terminal theme
    #[serde(default)]
    pub theme_mode: ThemeMode,
    /// Number of nudge steps across a slider's full range
    #[serde(default = "default_slider_steps")]
    pub slider_steps: u32,
}

/// Default slider resolution (100 steps = 1% per nudge)
const fn default_slider_steps() -> u32 {
    100
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_controls_on_startup: true,
            theme_mode: ThemeMode::default(),
            slider_steps: default_slider_steps(),
        }
    }
}

/// Settings read from `config.toml`.
///
/// Default location:
///
/// - Linux: `~/.config/TuneSpec/config.toml`
/// - macOS: `~/Library/Application Support/TuneSpec/config.toml`
/// - Windows: `%APPDATA%\TuneSpec\config.toml`
///
/// The directory can be overridden with the `TUNESPEC_CONFIG_DIR` environment
/// variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// `[paths]` section
    #[serde(default)]
    pub paths: PathConfig,
    /// `[export]` section
    #[serde(default)]
    pub export: ExportConfig,
    /// `[ui]` section
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory holding `config.toml` and default exports.
    ///
    /// `TUNESPEC_CONFIG_DIR` wins when set and non-empty.
    pub fn config_dir() -> Result<PathBuf> {
        match std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
            Some(dir) => Ok(PathBuf::from(dir)),
            None => dirs::config_dir()
                .map(|base| base.join(APP_DIR_NAME))
                .context("No platform config directory available"),
        }
    }

    /// Location of `config.toml`.
    pub fn config_file_path() -> Result<PathBuf> {
        Self::config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
    }

    /// Reads `config.toml`, or returns defaults when there is none yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text)
                .with_context(|| format!("Invalid configuration in {}", path.display())),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(err) => Err(err).with_context(|| format!("Cannot read {}", path.display())),
        }
    }

    /// Parses and validates configuration text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates and writes `config.toml`, replacing any previous file atomically.
    pub fn save(&self) -> Result<()> {
        self.validate()?;
        let text = toml::to_string_pretty(self).context("Cannot encode configuration as TOML")?;
        let path = Self::config_file_path()?;
        write_atomic(&path, &text)?;
        tracing::debug!(path = %path.display(), "saved configuration");
        Ok(())
    }

    /// Rejects values the rest of the crate cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.ui.slider_steps == 0 {
            anyhow::bail!("ui.slider_steps must be at least 1");
        }
        if self.paths.resources_dir.as_os_str().is_empty() {
            anyhow::bail!("paths.resources_dir must not be empty");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.resources_dir, PathBuf::from("resources"));
        assert!(config.ui.show_controls_on_startup);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert_eq!(config.ui.slider_steps, 100);
    }

    #[test]
    fn test_config_validate() {
        let mut config = Config::new();
        assert!(config.validate().is_ok());

        config.ui.slider_steps = 0;
        assert!(config.validate().is_err());

        config.ui.slider_steps = 10;
        config.paths.resources_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_theme_mode_parsing() {
        assert_eq!(ThemeMode::parse("auto"), Some(ThemeMode::Auto));
        assert_eq!(ThemeMode::parse(" Light "), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("DARK"), Some(ThemeMode::Dark));
        assert_eq!(ThemeMode::parse("sepia"), None);
        assert_eq!(ThemeMode::Dark.as_str(), "dark");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = Config::from_toml_str("[ui]\nshow_controls_on_startup = false\n").unwrap();
        assert!(!config.ui.show_controls_on_startup);
        assert_eq!(config.ui.slider_steps, 100);
        assert_eq!(config.paths.resources_dir, PathBuf::from("resources"));
    }

    #[test]
    fn test_invalid_config_text_is_rejected() {
        assert!(Config::from_toml_str("[ui]\nslider_steps = 0\nshow_controls_on_startup = true\n").is_err());
        assert!(Config::from_toml_str("not = [valid").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::new();
        config.ui.slider_steps = 40;
        config.ui.theme_mode = ThemeMode::Light;
        config.paths.resources_dir = temp_dir.path().join("specs");

        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("[ui]"));
        assert_eq!(Config::from_toml_str(&text).unwrap(), config);
    }
}

//! Shared test fixtures for spec and CLI tests.
#![allow(dead_code)] // Each test binary uses a different subset

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// A spec with one entry of each kind plus a bare slider.
pub const MAIN_SPEC: &str = r##"[
  {
    "key": "GridSpacing",
    "label": "Grid Spacing",
    "sliderValue": 175,
    "sliderMinValue": 10,
    "sliderMaxValue": 300
  },
  {
    "key": "SoundEnabled",
    "label": "Sound",
    "switchValue": true
  },
  {
    "key": "AccentColor",
    "colorValue": "#3366CC"
  },
  {
    "key": "Damping",
    "sliderValue": 0.5
  }
]
"##;

/// Writes `content` as `<name>.json` inside `dir`.
pub fn write_spec(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(format!("{name}.json"));
    fs::write(&path, content).expect("Failed to write spec fixture");
    path
}

/// A resources directory holding `MainSpec.json`.
pub fn resources_with_main_spec() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    write_spec(dir.path(), "MainSpec", MAIN_SPEC);
    dir
}

/// Path to the tunespec binary
pub fn tunespec_bin() -> &'static str {
    env!("CARGO_BIN_EXE_tunespec")
}

/// Creates a Command with an isolated config directory.
pub fn isolated_command(args: &[&str], config_dir: &Path) -> Command {
    let mut cmd = Command::new(tunespec_bin());
    cmd.env("TUNESPEC_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd.args(args);
    cmd
}

/// Parses a command's stdout as JSON.
pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

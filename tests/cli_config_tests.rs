//! End-to-end tests for `tunespec config` commands.

mod fixtures;
use fixtures::*;

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_config_show_defaults() {
    let config = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "show"], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Show config should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Resources:"));
    assert!(stdout.contains("Slider Steps:  100"));
}

#[test]
fn test_config_show_json_schema() {
    let config = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "show", "--json"], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let result = stdout_json(&output);

    assert!(result["config_file"].as_str().unwrap().ends_with("config.toml"));
    assert_eq!(result["paths"]["resources_dir"], "resources");
    assert!(result["export"]["output_dir"].is_string());
    assert_eq!(result["ui"]["theme"], "auto");
    assert_eq!(result["ui"]["slider_steps"], 100);
    assert_eq!(result["ui"]["show_controls_on_startup"], true);
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_config_set_round_trip() {
    let config = tempfile::TempDir::new().unwrap();
    let resources = resources_with_main_spec();
    let export_dir = config.path().join("out");

    let output = isolated_command(
        &[
            "config",
            "set",
            "--theme",
            "light",
            "--slider-steps",
            "40",
            "--resources-dir",
            resources.path().to_str().unwrap(),
            "--export-dir",
            export_dir.to_str().unwrap(),
        ],
        config.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(config.path().join("config.toml").exists());
    assert!(export_dir.is_dir());

    let output = isolated_command(&["config", "show", "--json"], config.path())
        .output()
        .expect("Failed to execute command");
    let result = stdout_json(&output);
    assert_eq!(result["ui"]["theme"], "light");
    assert_eq!(result["ui"]["slider_steps"], 40);
    assert_eq!(
        result["paths"]["resources_dir"].as_str(),
        resources.path().to_str()
    );

    // Names now resolve against the configured resources directory.
    let output = isolated_command(&["get", "MainSpec", "GridSpacing"], config.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "175");
}

#[test]
fn test_config_set_requires_an_option() {
    let config = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["config", "set"], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let config = tempfile::TempDir::new().unwrap();
    let missing = config.path().join("missing");

    for args in [
        vec!["config", "set", "--theme", "sepia"],
        vec!["config", "set", "--slider-steps", "0"],
        vec!["config", "set", "--resources-dir", missing.to_str().unwrap()],
    ] {
        let output = isolated_command(&args, config.path())
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(1), "{args:?} should be rejected");
    }
    assert!(!config.path().join("config.toml").exists());
}

#[test]
fn test_config_set_over_broken_file_warns() {
    let config = tempfile::TempDir::new().unwrap();
    std::fs::write(config.path().join("config.toml"), "[ui\ntheme = ").unwrap();

    let output = isolated_command(&["config", "set", "--theme", "dark"], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("replacing unreadable configuration with defaults"),
        "stderr: {stderr}"
    );

    let output = isolated_command(&["config", "show", "--json"], config.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(stdout_json(&output)["ui"]["theme"], "dark");
}

#[test]
fn test_unknown_subcommand_is_usage_error() {
    let config = tempfile::TempDir::new().unwrap();

    let output = isolated_command(&["frobnicate"], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(3));
}

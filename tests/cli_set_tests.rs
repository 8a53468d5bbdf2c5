//! End-to-end tests for `tunespec set`.

use std::fs;

mod fixtures;
use fixtures::*;

fn reload(path: &std::path::Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_set_writes_file_back() {
    let resources = resources_with_main_spec();
    let config = tempfile::TempDir::new().unwrap();
    let spec_path = resources.path().join("MainSpec.json");
    let spec = spec_path.to_str().unwrap();

    for (key, value) in [
        ("GridSpacing", "-40"),
        ("SoundEnabled", "off"),
        ("AccentColor", "#ff000080"),
    ] {
        let output = isolated_command(&["set", spec, key, value], config.path())
            .output()
            .expect("Failed to execute command");
        assert_eq!(
            output.status.code(),
            Some(0),
            "set {key} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    let saved = reload(&spec_path);
    assert_eq!(saved[0]["sliderValue"].as_i64(), Some(-40));
    assert_eq!(saved[0]["sliderMinValue"].as_i64(), Some(10));
    assert_eq!(saved[0]["label"], "Grid Spacing");
    assert_eq!(saved[1]["switchValue"], false);
    assert_eq!(saved[2]["colorValue"], "#FF000080");
    assert_eq!(saved[3]["key"], "Damping");
}

#[test]
fn test_set_unchanged_value_leaves_file_alone() {
    let resources = resources_with_main_spec();
    let config = tempfile::TempDir::new().unwrap();
    let spec_path = resources.path().join("MainSpec.json");

    let output = isolated_command(
        &["set", spec_path.to_str().unwrap(), "SoundEnabled", "yes"],
        config.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("already on"));
    assert_eq!(fs::read_to_string(&spec_path).unwrap(), MAIN_SPEC);
}

#[test]
fn test_set_rejects_bad_values() {
    let resources = resources_with_main_spec();
    let config = tempfile::TempDir::new().unwrap();
    let spec_path = resources.path().join("MainSpec.json");
    let spec = spec_path.to_str().unwrap();

    for (key, value) in [
        ("GridSpacing", "wide"),
        ("GridSpacing", "NaN"),
        ("SoundEnabled", "maybe"),
        ("AccentColor", "#12"),
        ("Missing", "1"),
    ] {
        let output = isolated_command(&["set", spec, key, value], config.path())
            .output()
            .expect("Failed to execute command");
        assert_eq!(output.status.code(), Some(3), "set {key} {value} should be a usage error");
    }

    assert_eq!(fs::read_to_string(&spec_path).unwrap(), MAIN_SPEC);
}

#[test]
fn test_set_on_malformed_spec_fails_validation() {
    let resources = tempfile::TempDir::new().unwrap();
    let config = tempfile::TempDir::new().unwrap();
    let path = write_spec(resources.path(), "Broken", "[{ \"label\": \"no key\", \"switchValue\": true }]");

    let output = isolated_command(
        &["set", path.to_str().unwrap(), "Anything", "1"],
        config.path(),
    )
    .output()
    .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

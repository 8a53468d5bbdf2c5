//! End-to-end tests for `tunespec validate`.

mod fixtures;
use fixtures::*;

#[test]
fn test_validate_valid_spec() {
    let resources = resources_with_main_spec();
    let config = tempfile::TempDir::new().unwrap();
    let spec_path = resources.path().join("MainSpec.json");

    let output = isolated_command(&["validate", spec_path.to_str().unwrap()], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("MainSpec is valid (4 entries)"));
}

#[test]
fn test_validate_json_report_for_malformed_specs() {
    let resources = tempfile::TempDir::new().unwrap();
    let config = tempfile::TempDir::new().unwrap();

    let cases = [
        ("NotArray", r#"{ "key": "A" }"#),
        ("TwoKinds", r#"[{ "key": "A", "sliderValue": 1, "switchValue": true }]"#),
        ("NoValue", r#"[{ "key": "A", "label": "Nothing" }]"#),
        ("Duplicate", r#"[{ "key": "A", "switchValue": true }, { "key": "A", "switchValue": true }]"#),
        ("BadColor", r#"[{ "key": "A", "colorValue": "blue" }]"#),
        ("Truncated", r#"[{ "key": "A", "#),
    ];

    for (name, content) in cases {
        let path = write_spec(resources.path(), name, content);
        let output = isolated_command(
            &["validate", path.to_str().unwrap(), "--json"],
            config.path(),
        )
        .output()
        .expect("Failed to execute command");

        assert_eq!(output.status.code(), Some(1), "{name} should fail validation");
        let report = stdout_json(&output);
        assert_eq!(report["valid"], false, "{name}");
        assert_eq!(report["name"], name);
        assert_eq!(report["errors"].as_array().unwrap().len(), 1, "{name}");
    }
}

#[test]
fn test_validate_warnings_and_strict_mode() {
    let resources = tempfile::TempDir::new().unwrap();
    let config = tempfile::TempDir::new().unwrap();
    let path = write_spec(
        resources.path(),
        "Loose",
        r#"[{ "key": "Zoom", "sliderValue": 50, "sliderMinValue": 0, "sliderMaxValue": 10 }]"#,
    );
    let spec = path.to_str().unwrap();

    let output = isolated_command(&["validate", spec, "--json"], config.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["valid"], true);
    assert!(report["warnings"][0]
        .as_str()
        .unwrap()
        .contains("value 50 is outside 0 .. 10"));

    let output = isolated_command(&["validate", spec, "--strict"], config.path())
        .output()
        .expect("Failed to execute command");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_validate_missing_file() {
    let resources = tempfile::TempDir::new().unwrap();
    let config = tempfile::TempDir::new().unwrap();
    let missing = resources.path().join("Gone.json");

    let output = isolated_command(&["validate", missing.to_str().unwrap()], config.path())
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}

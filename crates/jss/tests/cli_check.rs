#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

use serde_json::Value;

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "jsscli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn jss(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_jss"))
        .args(["--format", "json", "--log-level", "error"])
        .args(args)
        .output()
        .expect("jss should run")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

fn write_schema_dir(tag: &str) -> PathBuf {
    let dir = unique_temp_dir(tag);
    std::fs::create_dir_all(dir.join("todo")).expect("nested dir should be creatable");
    std::fs::write(
        dir.join("isEven.schema.json"),
        r#"{ "type": "integer", "multipleOf": 2 }"#,
    )
    .expect("schema should be writable");
    std::fs::write(
        dir.join("todo").join("item.schema.json"),
        r#"{
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "done": { "type": "boolean" }
            },
            "required": ["title"]
        }"#,
    )
    .expect("schema should be writable");
    dir
}

#[test]
fn builtin_reference_accepts_matching_value() {
    let output = jss(&["check", "jss/integer", "--json", "4"]);

    assert_eq!(output.status.code(), Some(0));
    let report = stdout_json(&output);
    assert_eq!(report["valid"], Value::Bool(true));
    assert_eq!(report["errors"], serde_json::json!([]));
}

#[test]
fn inline_schema_reports_labelled_error() {
    let output = jss(&["check", r#"{"type":"integer"}"#, "--json", "\"x\""]);

    assert_eq!(output.status.code(), Some(60));
    let report = stdout_json(&output);
    assert_eq!(report["valid"], Value::Bool(false));
    assert_eq!(
        report["errors"],
        serde_json::json!(["\"value\" should be integer"])
    );
}

#[test]
fn unknown_reference_is_a_usage_error() {
    let output = jss(&["check", "ns/missing", "--json", "1"]);

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Unknown schema reference \"ns/missing\""),
        "stderr: {stderr}"
    );
}

#[test]
fn malformed_inline_schema_is_a_usage_error() {
    let output = jss(&["check", r#"{"minLength":"four"}"#, "--json", "\"abc\""]);

    assert_eq!(output.status.code(), Some(64));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid schema for \"value\""),
        "stderr: {stderr}"
    );
}

#[test]
fn directory_schemas_are_registered_by_relative_name() {
    let dir = write_schema_dir("dir");
    let dir_arg = dir.to_string_lossy().to_string();

    let ok = jss(&["check", "todo/item", "--json", r#"{"title":"milk"}"#, "--schemas", &dir_arg]);
    assert_eq!(ok.status.code(), Some(0));

    let bad = jss(&["check", "isEven", "--json", "3", "--schemas", &dir_arg, "--label", "n"]);
    assert_eq!(bad.status.code(), Some(60));
    assert_eq!(
        stdout_json(&bad)["errors"],
        serde_json::json!(["\"n\" should be multiple of 2"])
    );

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn strict_flag_rejects_undeclared_properties() {
    let dir = write_schema_dir("strict");
    let dir_arg = dir.to_string_lossy().to_string();
    let value = r#"{"title":"milk","extra":1}"#;

    let loose = jss(&["check", "todo/item", "--json", value, "--schemas", &dir_arg]);
    assert_eq!(loose.status.code(), Some(0));

    let strict = jss(&["check", "todo/item", "--json", value, "--schemas", &dir_arg, "--strict"]);
    assert_eq!(strict.status.code(), Some(60));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn value_can_be_read_from_file() {
    let dir = unique_temp_dir("file");
    let path = dir.join("value.json");
    std::fs::write(&path, "[1, 2, 3]").expect("value should be writable");

    let output = jss(&["check", "jss/array", "--file", &path.to_string_lossy()]);
    assert_eq!(output.status.code(), Some(0));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn schemas_lists_builtins_and_registered_names() {
    let dir = write_schema_dir("list");
    let output = jss(&["schemas", "--schemas", &dir.to_string_lossy()]);

    assert_eq!(output.status.code(), Some(0));
    let listing = stdout_json(&output);
    assert_eq!(listing["count"], serde_json::json!(9));
    let names: Vec<&str> = listing["schemas"]
        .as_array()
        .expect("schemas should be an array")
        .iter()
        .filter_map(|entry| entry["name"].as_str())
        .collect();
    assert!(names.contains(&"isEven"));
    assert!(names.contains(&"todo/item"));
    assert!(names.contains(&"jss/null"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn version_prints_package_version() {
    let output = jss(&["version"]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), format!("jss {}", env!("CARGO_PKG_VERSION")));
}

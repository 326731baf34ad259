#![allow(missing_docs)]

use std::process::{Command, Output};

use recast_testkit::fixture_path;

fn fixture_arg(name: &str) -> String {
	fixture_path(name).to_string_lossy().into_owned()
}

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_recast")).args(args).output().expect("recast command executes")
}

fn run_json(args: &[&str]) -> serde_json::Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"recast command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

#[test]
fn build_object_round_trips_to_plain_json() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("object.json");
	let json = run_json(&["build", "--schema", &schema, "--type", "Object", &input, "--json"]);

	assert_eq!(json["value"]["pairs"][1], serde_json::json!({"first": "f1", "last": "l1"}));
	let unconsumed: Vec<_> = json["unconsumed"]
		.as_array()
		.expect("unconsumed array")
		.iter()
		.map(|item| format!("{}.{}", item["record"].as_str().unwrap_or_default(), item["key"].as_str().unwrap_or_default()))
		.collect();
	assert_eq!(unconsumed, ["Pair.middle", "Object.note"]);
}

#[test]
fn build_derived_applies_defaults_and_dedupes_sets() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("derived.json");
	let json = run_json(&["build", "--schema", &schema, "--type", "Derived", &input, "--json"]);

	assert_eq!(json["value"], serde_json::json!({"a": "base", "b": 2, "c": 0.0, "tags": ["x", "y"]}));
}

#[test]
fn missing_required_field_exits_with_error() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("pascal.json");
	let output = run(&["build", "--schema", &schema, "--type", "ExampleDC", &input]);

	assert_eq!(output.status.code(), Some(1));
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("missing required field url_encoded on ExampleDC"), "{stderr}");
}

#[test]
fn verbose_logs_unconsumed_fields_to_stderr() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("object.json");
	let output = run(&["--verbose", "build", "--schema", &schema, "--type", "Object", &input, "--json"]);

	assert!(output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("unconsumed input field"), "{stderr}");
	serde_json::from_slice::<serde_json::Value>(&output.stdout).expect("stdout stays pure json");
}

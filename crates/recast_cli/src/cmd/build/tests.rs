use crate::cmd::test_support::{fixture_arg, run_recast, run_recast_json, run_recast_with_stdin};

#[test]
fn build_json_lists_unconsumed_fields_bottom_up() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("nested_extra.json");
	let json = run_recast_json(&["build", "--schema", &schema, "--type", "A", &input, "--json"]);

	assert_eq!(json["type"], "A");
	assert_eq!(json["value"]["b"]["c"]["num"], 10);
	let records: Vec<_> = json["unconsumed"]
		.as_array()
		.expect("unconsumed array")
		.iter()
		.map(|item| item["record"].as_str().expect("record label").to_owned())
		.collect();
	assert_eq!(records, ["C", "B", "A"]);
	assert_eq!(json["unconsumed"][0]["value"], 11);
}

#[test]
fn build_strict_fails_on_extra_field() {
	let schema = fixture_arg("schema.json");
	let input = fixture_arg("object.json");
	let output = run_recast(&["build", "--schema", &schema, "--type", "Object", &input, "--strict"]);

	assert!(!output.status.success());
	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("error: unconsumed field middle on Pair"), "{stderr}");
}

#[test]
fn build_reads_stdin_and_applies_rename() {
	let schema = fixture_arg("schema.json");
	let output = run_recast_with_stdin(
		&["build", "--schema", &schema, "--type", "list<ExampleDC>", "-", "--rename", "pascal", "--json"],
		r#"[{"UrlEncoded": "a"}, {"UrlEncoded": "b"}]"#,
	);
	assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

	let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("stdout json");
	assert_eq!(json["type"], "list<ExampleDC>");
	assert_eq!(json["value"][1]["url_encoded"], "b");
	assert!(json["unconsumed"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn build_select_and_implicit_optional() {
	let schema = fixture_arg("schema.json");
	let nulls = fixture_arg("nulls.json");
	let json = run_recast_json(&["build", "--schema", &schema, "--type", "Pair", &nulls, "--implicit-optional", "--json"]);
	assert!(json["value"]["first"].is_null());

	let object = fixture_arg("object.json");
	let json = run_recast_json(&["build", "--schema", &schema, "--type", "Object", &object, "--select", "pairs[0].first", "--json"]);
	assert_eq!(json["value"], "f0");

	let output = run_recast(&["build", "--schema", &schema, "--type", "Object", &object, "--select", "pairs[9]"]);
	assert!(!output.status.success());
}

#[test]
fn build_depth_limit_is_configurable() {
	let schema = fixture_arg("schema.json");
	let output = run_recast_with_stdin(
		&["build", "--schema", &schema, "--type", "Node", "--max-depth", "2"],
		r#"{"value": 1, "next": {"value": 2, "next": {"value": 3, "next": null}}}"#,
	);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("depth exceeded"));
}

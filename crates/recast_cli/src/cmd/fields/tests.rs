use crate::cmd::test_support::{fixture_arg, run_recast, run_recast_json};

#[test]
fn fields_json_merges_inherited_fields() {
	let schema = fixture_arg("schema.json");
	let json = run_recast_json(&["fields", "--schema", &schema, "--record", "Derived", "--json"]);

	assert_eq!(json["record"], "Derived");
	assert_eq!(json["extends"], "Base");
	let names: Vec<_> = json["fields"]
		.as_array()
		.expect("fields array")
		.iter()
		.map(|field| field["name"].as_str().expect("field name").to_owned())
		.collect();
	assert_eq!(names, ["a", "b", "c", "tags"]);
	assert_eq!(json["fields"][2]["default"], 0.0);
	assert_eq!(json["fields"][3]["type"], "set<str>");
	assert!(json["fields"][0].get("default").is_none());
}

#[test]
fn fields_text_marks_optional_types() {
	let schema = fixture_arg("schema.json");
	let output = run_recast(&["fields", "--schema", &schema, "--record", "Node"]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("record: Node"));
	assert!(stdout.contains("next: optional<Node>"), "{stdout}");
}

#[test]
fn fields_unknown_record_fails() {
	let schema = fixture_arg("schema.json");
	let output = run_recast(&["fields", "--schema", &schema, "--record", "Ghost"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("unknown record type: Ghost"));
}

use super::{RecordSchema, SchemaRegistry};
use crate::record::{ErrorKind, RecordError, ScalarKind, TypeDesc};

fn int() -> TypeDesc {
	TypeDesc::Scalar(ScalarKind::Int)
}

fn names(registry: &SchemaRegistry, record: &str) -> Vec<String> {
	registry
		.fields_of(record)
		.expect("fields resolve")
		.into_iter()
		.map(|field| field.name.to_string())
		.collect()
}

#[test]
fn inherited_fields_come_first() {
	let registry = SchemaRegistry::from_records([
		RecordSchema::new("Derived").extends("Base").field("b", int()).field("c", int()),
		RecordSchema::new("Base").field("a", TypeDesc::Scalar(ScalarKind::Str)),
	])
	.expect("schemas register");

	assert_eq!(names(&registry, "Derived"), ["a", "b", "c"]);
	assert_eq!(names(&registry, "Base"), ["a"]);
}

#[test]
fn override_keeps_position_and_takes_derived_type() {
	let registry = SchemaRegistry::from_records([
		RecordSchema::new("Base").field("a", int()).field("b", int()),
		RecordSchema::new("Mid").extends("Base").field("c", int()),
		RecordSchema::new("Leaf").extends("Mid").field("a", TypeDesc::optional(int())).field("d", int()),
	])
	.expect("schemas register");

	let fields = registry.fields_of("Leaf").expect("fields resolve");
	let order: Vec<_> = fields.iter().map(|field| &*field.name).collect();
	assert_eq!(order, ["a", "b", "c", "d"]);
	assert!(fields[0].ty.is_optional(), "most derived declaration wins");
}

#[test]
fn fields_of_is_repeatable() {
	let registry = SchemaRegistry::from_records([RecordSchema::new("Pair").field("first", int()).field("last", int())]).expect("schemas register");
	assert_eq!(names(&registry, "Pair"), names(&registry, "Pair"));
}

#[test]
fn duplicate_declarations_are_rejected() {
	let mut registry = SchemaRegistry::new();
	let err = registry
		.register(RecordSchema::new("Pair").field("first", int()).field("first", int()))
		.expect_err("duplicate field");
	assert!(matches!(err, RecordError::DuplicateField { .. }));

	registry.register(RecordSchema::new("Pair").field("first", int())).expect("registers");
	let err = registry.register(RecordSchema::new("Pair")).expect_err("duplicate record");
	assert!(matches!(err, RecordError::DuplicateRecord { .. }));
}

#[test]
fn malformed_field_types_fail_at_registration() {
	let mut registry = SchemaRegistry::new();
	let err = registry
		.register(RecordSchema::new("Bad").field("a", TypeDesc::optional(TypeDesc::optional(int()))))
		.expect_err("nested optional");
	assert_eq!(err.kind(), ErrorKind::SchemaDefinition);

	let err = registry
		.register(RecordSchema::new("Bad").field("m", TypeDesc::map(int(), int())))
		.expect_err("int map key");
	assert!(matches!(err, RecordError::NonStringMapKey { .. }));
	assert!(registry.is_empty());
}

#[test]
fn validate_reports_dangling_references_and_cycles() {
	let err = SchemaRegistry::from_records([RecordSchema::new("A").field("b", TypeDesc::seq(TypeDesc::record("B")))]).expect_err("B is unknown");
	assert!(matches!(err, RecordError::UnknownRecord { ref name } if name == "B"));

	let err = SchemaRegistry::from_records([RecordSchema::new("A").extends("Missing")]).expect_err("parent unknown");
	assert!(matches!(err, RecordError::UnknownRecord { .. }));

	let err = SchemaRegistry::from_records([RecordSchema::new("A").extends("B"), RecordSchema::new("B").extends("A")]).expect_err("cycle");
	assert!(matches!(err, RecordError::InheritanceCycle { .. }));
}

#[test]
fn self_reference_through_optional_is_allowed() {
	let registry = SchemaRegistry::from_records([RecordSchema::new("Node")
		.field("value", int())
		.field("next", TypeDesc::optional(TypeDesc::record("Node")))])
	.expect("recursive record registers");
	assert_eq!(registry.len(), 1);
}

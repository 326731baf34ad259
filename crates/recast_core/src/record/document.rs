use std::path::Path;

use serde::Deserialize;

use crate::record::{FieldDesc, RecordSchema, Result, SchemaRegistry, TypeDesc, Value, parse_type_expr};

/// On-disk schema description, usually JSON.
///
/// ```json
/// { "records": [ { "name": "Pair", "fields": [ { "name": "first", "type": "str" } ] } ] }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SchemaDocument {
	/// Record declarations in any order.
	pub records: Vec<RecordDoc>,
}

/// One record declaration inside a [`SchemaDocument`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDoc {
	/// Record type name.
	pub name: String,
	/// Optional parent record name.
	#[serde(default)]
	pub extends: Option<String>,
	/// Own field declarations.
	#[serde(default)]
	pub fields: Vec<FieldDoc>,
}

/// One field declaration inside a [`RecordDoc`].
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDoc {
	/// Field name.
	pub name: String,
	/// Type expression, see [`parse_type_expr`].
	#[serde(rename = "type")]
	pub ty: String,
	/// Fallback value, present only when the key appears.
	#[serde(default, deserialize_with = "present_value")]
	pub default: Option<serde_json::Value>,
}

// Distinguishes `"default": null` (a null default) from an absent key.
fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<serde_json::Value>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	serde_json::Value::deserialize(deserializer).map(Some)
}

impl SchemaDocument {
	/// Parse JSON text.
	pub fn from_json_str(text: &str) -> Result<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Read and parse a JSON file.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
		let text = std::fs::read_to_string(path)?;
		Self::from_json_str(&text)
	}

	/// Parse every type expression and build a validated registry.
	pub fn into_registry(self) -> Result<SchemaRegistry> {
		let records = self.records.into_iter().map(RecordDoc::into_schema).collect::<Result<Vec<_>>>()?;
		SchemaRegistry::from_records(records)
	}
}

impl RecordDoc {
	fn into_schema(self) -> Result<RecordSchema> {
		let fields = self
			.fields
			.into_iter()
			.map(|field| -> Result<FieldDesc> {
				let ty: TypeDesc = parse_type_expr(&field.ty)?;
				Ok(FieldDesc {
					name: field.name.into(),
					ty,
					default: field.default.map(Value::from),
				})
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(RecordSchema {
			name: self.name.into(),
			extends: self.extends.map(Into::into),
			fields,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::SchemaDocument;
	use crate::record::{RecordError, Value};

	#[test]
	fn document_builds_registry_with_defaults() {
		let doc = SchemaDocument::from_json_str(
			r#"{
				"records": [
					{ "name": "Example", "extends": "Base", "fields": [
						{ "name": "b", "type": "int" },
						{ "name": "c", "type": "float", "default": 0.0 },
						{ "name": "d", "type": "str?", "default": null }
					] },
					{ "name": "Base", "fields": [ { "name": "a", "type": "str" } ] }
				]
			}"#,
		)
		.expect("document parses");
		let registry = doc.into_registry().expect("registry builds");

		let fields = registry.fields_of("Example").expect("fields resolve");
		assert_eq!(fields.len(), 4);
		assert_eq!(fields[2].default, Some(Value::Float(0.0)));
		assert_eq!(fields[3].default, Some(Value::Null));
		assert!(!fields[1].has_default());
	}

	#[test]
	fn bad_type_expression_surfaces() {
		let doc = SchemaDocument::from_json_str(r#"{ "records": [ { "name": "A", "fields": [ { "name": "x", "type": "int | str" } ] } ] }"#)
			.expect("document parses");
		assert!(matches!(doc.into_registry(), Err(RecordError::UnsupportedUnion { .. })));
	}

	#[test]
	fn unknown_document_keys_are_rejected() {
		let err = SchemaDocument::from_json_str(r#"{ "records": [], "version": 2 }"#).expect_err("unknown key");
		assert!(matches!(err, RecordError::Json(_)));
	}
}

use indexmap::IndexMap;

use crate::record::{Datum, NameTransform, RecordInstance, Value};

/// Options for converting typed data back into a plain tree.
#[derive(Debug, Clone, Default)]
pub struct FlattenOptions {
	/// Maps a record field name to the output key. Use the inverse of the build transform
	/// to round-trip renamed inputs.
	pub name_transform: NameTransform,
}

impl FlattenOptions {
	/// Replace the field-name transform.
	pub fn with_name_transform(mut self, transform: impl Into<NameTransform>) -> Self {
		self.name_transform = transform.into();
		self
	}
}

/// Convert typed data into a plain data tree, keyed by schema field names.
pub fn flatten(datum: &Datum) -> Value {
	flatten_with(datum, &FlattenOptions::default())
}

/// Convert one record into a mapping keyed by schema field names.
pub fn flatten_record(record: &RecordInstance) -> Value {
	flatten_record_with(record, &FlattenOptions::default())
}

/// [`flatten`] with explicit options.
pub fn flatten_with(datum: &Datum, options: &FlattenOptions) -> Value {
	match datum {
		Datum::Null => Value::Null,
		Datum::Bool(v) => Value::Bool(*v),
		Datum::Int(v) => Value::Int(*v),
		Datum::UInt(v) => Value::UInt(*v),
		Datum::Float(v) => Value::Float(v.0),
		Datum::String(v) => Value::String(v.to_string()),
		Datum::Seq(items) => Value::Array(items.iter().map(|item| flatten_with(item, options)).collect()),
		Datum::Set(items) => Value::Array(items.iter().map(|item| flatten_with(item, options)).collect()),
		Datum::Map(entries) => Value::Map(entries.iter().map(|(key, value)| (key.to_string(), flatten_with(value, options))).collect()),
		Datum::Record(record) => flatten_record_with(record, options),
	}
}

/// [`flatten_record`] with explicit options.
pub fn flatten_record_with(record: &RecordInstance, options: &FlattenOptions) -> Value {
	let mut out = IndexMap::with_capacity(record.fields().len());
	for field in record.fields() {
		let key = options.name_transform.apply(&field.name).into_owned();
		out.insert(key, flatten_with(&field.value, options));
	}
	Value::Map(out)
}

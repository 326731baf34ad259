use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::record::{FromDatum, RecordError, Result, Value};

/// Totally ordered `f64` so materialized values can live in sets.
#[derive(Debug, Clone, Copy)]
pub struct F64(pub f64);

impl PartialEq for F64 {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl Eq for F64 {}

impl PartialOrd for F64 {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for F64 {
	fn cmp(&self, other: &Self) -> Ordering {
		self.0.total_cmp(&other.0)
	}
}

impl Hash for F64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.0.to_bits().hash(state);
	}
}

/// Materialized value tree produced by [`build`](crate::record::build).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Datum {
	/// Null or absent optional.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// Unsigned integer scalar.
	UInt(u64),
	/// Floating point scalar.
	Float(F64),
	/// String scalar.
	String(Box<str>),
	/// Ordered sequence.
	Seq(Vec<Datum>),
	/// Duplicate-free collection.
	Set(BTreeSet<Datum>),
	/// String-keyed mapping in input order.
	Map(DatumMap),
	/// Constructed record.
	Record(RecordInstance),
}

impl Datum {
	/// Short kind label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "str",
			Self::Seq(_) => "sequence",
			Self::Set(_) => "set",
			Self::Map(_) => "mapping",
			Self::Record(_) => "record",
		}
	}

	/// Whether this is the null marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the record payload, if any.
	pub fn as_record(&self) -> Option<&RecordInstance> {
		match self {
			Self::Record(item) => Some(item),
			_ => None,
		}
	}

	/// Borrow the string payload, if any.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::String(item) => Some(item),
			_ => None,
		}
	}
}

impl From<&Value> for Datum {
	/// Deep structural copy of untyped data.
	fn from(value: &Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(v) => Self::Bool(*v),
			Value::Int(v) => Self::Int(*v),
			Value::UInt(v) => Self::UInt(*v),
			Value::Float(v) => Self::Float(F64(*v)),
			Value::String(v) => Self::String(v.as_str().into()),
			Value::Array(items) => Self::Seq(items.iter().map(Self::from).collect()),
			Value::Map(map) => Self::Map(map.iter().map(|(key, value)| (Box::from(key.as_str()), Self::from(value))).collect()),
		}
	}
}

/// String-keyed mapping that keeps insertion order.
///
/// Equality, ordering and hashing ignore entry order, so two maps with the same
/// entries collapse inside a set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatumMap(IndexMap<Box<str>, Datum>);

impl DatumMap {
	/// Empty mapping.
	pub fn new() -> Self {
		Self::default()
	}

	/// Insert or replace an entry, keeping the first-seen position.
	pub fn insert(&mut self, key: impl Into<Box<str>>, value: Datum) -> Option<Datum> {
		self.0.insert(key.into(), value)
	}

	fn sorted(&self) -> Vec<(&str, &Datum)> {
		let mut entries: Vec<_> = self.0.iter().map(|(key, value)| (&**key, value)).collect();
		entries.sort_unstable_by(|left, right| left.0.cmp(right.0));
		entries
	}
}

impl Deref for DatumMap {
	type Target = IndexMap<Box<str>, Datum>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl FromIterator<(Box<str>, Datum)> for DatumMap {
	fn from_iter<I: IntoIterator<Item = (Box<str>, Datum)>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl PartialOrd for DatumMap {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for DatumMap {
	fn cmp(&self, other: &Self) -> Ordering {
		self.sorted().cmp(&other.sorted())
	}
}

impl Hash for DatumMap {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.sorted().hash(state);
	}
}

/// Fully constructed, immutable record value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordInstance {
	type_name: Arc<str>,
	fields: Vec<FieldValue>,
}

/// Named record field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldValue {
	/// Schema-level field name.
	pub name: Arc<str>,
	/// Materialized payload.
	pub value: Datum,
}

impl RecordInstance {
	pub(crate) fn new(type_name: Arc<str>, fields: Vec<FieldValue>) -> Self {
		Self { type_name, fields }
	}

	/// Record type name.
	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	/// Fields in merged declaration order.
	pub fn fields(&self) -> &[FieldValue] {
		&self.fields
	}

	/// Look up a field payload by schema name.
	pub fn get(&self, name: &str) -> Option<&Datum> {
		self.fields.iter().find(|field| &*field.name == name).map(|field| &field.value)
	}

	/// Look up and convert a field payload.
	pub fn get_as<T: FromDatum>(&self, name: &str) -> Result<T> {
		let value = self.get(name).ok_or_else(|| RecordError::NoSuchField {
			record: self.type_name.to_string(),
			field: name.to_owned(),
		})?;
		T::from_datum(value)
	}
}

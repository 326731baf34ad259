use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::record::{RecordError, Result, TypeDesc, Value};

/// One declared record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDesc {
	/// Schema-level field identifier.
	pub name: Arc<str>,
	/// Expected shape of the field payload.
	pub ty: TypeDesc,
	/// Fallback used when the input omits the field.
	pub default: Option<Value>,
}

impl FieldDesc {
	/// Field without a default.
	pub fn new(name: impl Into<Arc<str>>, ty: TypeDesc) -> Self {
		Self {
			name: name.into(),
			ty,
			default: None,
		}
	}

	/// Whether the schema supplies a fallback value.
	pub fn has_default(&self) -> bool {
		self.default.is_some()
	}
}

/// Declared fields of one record type, plus its optional parent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
	/// Record type name.
	pub name: Arc<str>,
	/// Parent record whose fields are inherited.
	pub extends: Option<Arc<str>>,
	/// Own field declarations in source order.
	pub fields: Vec<FieldDesc>,
}

impl RecordSchema {
	/// Empty record declaration.
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			extends: None,
			fields: Vec::new(),
		}
	}

	/// Inherit fields from `parent`.
	pub fn extends(mut self, parent: impl Into<Arc<str>>) -> Self {
		self.extends = Some(parent.into());
		self
	}

	/// Append a field declaration.
	pub fn field(mut self, name: impl Into<Arc<str>>, ty: TypeDesc) -> Self {
		self.fields.push(FieldDesc::new(name, ty));
		self
	}

	/// Append a field declaration with a fallback value.
	pub fn field_with_default(mut self, name: impl Into<Arc<str>>, ty: TypeDesc, default: impl Into<Value>) -> Self {
		let mut field = FieldDesc::new(name, ty);
		field.default = Some(default.into());
		self.fields.push(field);
		self
	}

	fn check_local(&self) -> Result<()> {
		let mut seen = HashSet::with_capacity(self.fields.len());
		for field in &self.fields {
			if !seen.insert(&*field.name) {
				return Err(RecordError::DuplicateField {
					record: self.name.to_string(),
					field: field.name.to_string(),
				});
			}
			field.ty.validate()?;
		}
		Ok(())
	}
}

/// Named record schemas available to the materializer.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
	records: IndexMap<Arc<str>, RecordSchema>,
}

impl SchemaRegistry {
	/// Empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register every schema, then run [`SchemaRegistry::validate`].
	pub fn from_records(records: impl IntoIterator<Item = RecordSchema>) -> Result<Self> {
		let mut registry = Self::new();
		for record in records {
			registry.register(record)?;
		}
		registry.validate()?;
		Ok(registry)
	}

	/// Add one record schema after checking its own declarations.
	///
	/// References to other records are not checked here so declarations may arrive in
	/// any order; call [`SchemaRegistry::validate`] once all are registered.
	pub fn register(&mut self, schema: RecordSchema) -> Result<()> {
		schema.check_local()?;
		if self.records.contains_key(&schema.name) {
			return Err(RecordError::DuplicateRecord { name: schema.name.to_string() });
		}
		debug!(record = %schema.name, fields = schema.fields.len(), "registered record schema");
		self.records.insert(Arc::clone(&schema.name), schema);
		Ok(())
	}

	/// Look up a record schema by name.
	pub fn get(&self, name: &str) -> Option<&RecordSchema> {
		self.records.get(name)
	}

	/// Look up a record schema, failing when it is not registered.
	pub fn resolve(&self, name: &str) -> Result<&RecordSchema> {
		self.get(name).ok_or_else(|| RecordError::UnknownRecord { name: name.to_owned() })
	}

	/// Registered schemas in registration order.
	pub fn records(&self) -> impl Iterator<Item = &RecordSchema> {
		self.records.values()
	}

	/// Number of registered records.
	pub fn len(&self) -> usize {
		self.records.len()
	}

	/// Whether no records are registered.
	pub fn is_empty(&self) -> bool {
		self.records.is_empty()
	}

	/// Check cross-record references: parents and field record types exist, inheritance is acyclic.
	pub fn validate(&self) -> Result<()> {
		for record in self.records.values() {
			self.fields_of(&record.name)?;
			for field in &record.fields {
				let mut missing = None;
				field.ty.for_each_record(&mut |name| {
					if missing.is_none() && !self.records.contains_key(name) {
						missing = Some(name.to_owned());
					}
				});
				if let Some(name) = missing {
					return Err(RecordError::UnknownRecord { name });
				}
			}
		}
		Ok(())
	}

	/// Merged field list of `name` across its inheritance chain.
	///
	/// Base fields come first. A redeclared field keeps its first-seen position but takes
	/// the most-derived descriptor, so every name appears exactly once.
	pub fn fields_of(&self, name: &str) -> Result<Vec<&FieldDesc>> {
		let mut chain = Vec::new();
		let mut visited = HashSet::new();
		let mut current = Some(self.resolve(name)?);

		while let Some(record) = current {
			if !visited.insert(&*record.name) {
				return Err(RecordError::InheritanceCycle { record: record.name.to_string() });
			}
			chain.push(record);
			current = match &record.extends {
				Some(parent) => Some(self.resolve(parent)?),
				None => None,
			};
		}

		let mut merged: IndexMap<&str, &FieldDesc> = IndexMap::new();
		for record in chain.iter().rev() {
			for field in &record.fields {
				merged.insert(&field.name, field);
			}
		}
		Ok(merged.into_values().collect())
	}
}

#[cfg(test)]
mod tests;

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::record::{
	DataPath, Datum, DatumMap, F64, FieldDesc, FieldValue, FromDatum, NameTransform, PathStep, RecordError, RecordInstance, Result, SchemaRegistry, TypeDesc, Value,
};

/// Input key that no declared field of the record consumed.
#[derive(Debug, Clone, Copy)]
pub struct UnconsumedField<'a> {
	/// Record type being built.
	pub record: &'a str,
	/// Unmatched input key.
	pub key: &'a str,
	/// Value stored under `key`.
	pub value: &'a Value,
}

/// Hook invoked once per unconsumed input key. An `Err` aborts the build.
pub type UnconsumedHook = Arc<dyn Fn(&UnconsumedField<'_>) -> Result<()> + Send + Sync>;

/// Behavior switches and limits for materialization.
#[derive(Clone)]
pub struct BuildOptions {
	/// Maps a declared field name to the input key it is read from.
	pub name_transform: NameTransform,
	/// Called bottom-up for input keys no field consumed.
	pub on_unconsumed_field: Option<UnconsumedHook>,
	/// Treat every field as optional.
	pub implicit_optional: bool,
	/// Maximum recursion depth.
	pub max_depth: u32,
}

impl Default for BuildOptions {
	fn default() -> Self {
		Self {
			name_transform: NameTransform::Identity,
			on_unconsumed_field: None,
			implicit_optional: false,
			max_depth: 64,
		}
	}
}

impl fmt::Debug for BuildOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BuildOptions")
			.field("name_transform", &self.name_transform)
			.field("on_unconsumed_field", &self.on_unconsumed_field.as_ref().map(|_| ".."))
			.field("implicit_optional", &self.implicit_optional)
			.field("max_depth", &self.max_depth)
			.finish()
	}
}

impl BuildOptions {
	/// Preset accepting nulls and absent keys for every field.
	pub fn lenient() -> Self {
		Self {
			implicit_optional: true,
			..Self::default()
		}
	}

	/// Replace the field-name transform.
	pub fn with_name_transform(mut self, transform: impl Into<NameTransform>) -> Self {
		self.name_transform = transform.into();
		self
	}

	/// Install an unconsumed-field hook.
	pub fn on_unconsumed(mut self, hook: impl Fn(&UnconsumedField<'_>) -> Result<()> + Send + Sync + 'static) -> Self {
		self.on_unconsumed_field = Some(Arc::new(hook));
		self
	}

	/// Set implicit optionality.
	pub fn with_implicit_optional(mut self, implicit_optional: bool) -> Self {
		self.implicit_optional = implicit_optional;
		self
	}
}

/// Materialize `data` according to `ty`.
///
/// `ty` is shape-checked up front, whatever the data holds. Null data and scalar types
/// pass through as a structural copy. The whole call either succeeds or fails; no
/// partially built value escapes.
pub fn build(registry: &SchemaRegistry, ty: &TypeDesc, data: &Value, options: &BuildOptions) -> Result<Datum> {
	ty.validate()?;
	Materializer::new(registry, options).build(ty, data, 0)
}

/// Materialize `data` as an instance of the named record type.
pub fn build_record(registry: &SchemaRegistry, name: &str, data: &Value, options: &BuildOptions) -> Result<RecordInstance> {
	Materializer::new(registry, options).build_record(name, data, 0)
}

/// Materialize `data` and convert the result with [`FromDatum`].
pub fn build_as<T: FromDatum>(registry: &SchemaRegistry, ty: &TypeDesc, data: &Value, options: &BuildOptions) -> Result<T> {
	T::from_datum(&build(registry, ty, data, options)?)
}

struct Materializer<'a> {
	registry: &'a SchemaRegistry,
	options: &'a BuildOptions,
	path: DataPath,
}

impl<'a> Materializer<'a> {
	fn new(registry: &'a SchemaRegistry, options: &'a BuildOptions) -> Self {
		Self {
			registry,
			options,
			path: DataPath::default(),
		}
	}

	fn build(&mut self, ty: &TypeDesc, data: &Value, depth: u32) -> Result<Datum> {
		if depth > self.options.max_depth {
			return Err(RecordError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let (_, ty) = ty.unwrap_optional();
		if data.is_null() {
			return Ok(Datum::Null);
		}

		match ty {
			TypeDesc::Scalar(_) => Ok(Datum::from(data)),
			TypeDesc::Record(name) => self.build_record(name, data, depth).map(Datum::Record),
			TypeDesc::Sequence(element) => {
				let items = self.expect_array(data, "sequence")?;
				let mut out = Vec::with_capacity(items.len());
				for (index, item) in items.iter().enumerate() {
					self.path.push(PathStep::Index(index));
					out.push(self.build(element, item, depth + 1)?);
					self.path.pop();
				}
				Ok(Datum::Seq(out))
			}
			TypeDesc::Set(element) => {
				let items = self.expect_array(data, "set")?;
				let mut out = BTreeSet::new();
				for (index, item) in items.iter().enumerate() {
					self.path.push(PathStep::Index(index));
					let datum = self.build(element, item, depth + 1)?;
					if !numeric_twin(&datum).is_some_and(|twin| out.contains(&twin)) {
						out.insert(datum);
					}
					self.path.pop();
				}
				Ok(Datum::Set(out))
			}
			TypeDesc::Map(_, value_ty) => {
				let map = data.as_map().ok_or_else(|| self.mismatch("mapping", data))?;
				let mut out = DatumMap::new();
				for (key, value) in map {
					self.path.push(PathStep::Field(key.clone()));
					out.insert(key.as_str(), self.build(value_ty, value, depth + 1)?);
					self.path.pop();
				}
				Ok(Datum::Map(out))
			}
			TypeDesc::Optional(_) => Err(RecordError::NestedOptional { ty: ty.to_string() }),
		}
	}

	fn build_record(&mut self, name: &str, data: &Value, depth: u32) -> Result<RecordInstance> {
		if depth > self.options.max_depth {
			return Err(RecordError::DepthExceeded {
				max_depth: self.options.max_depth,
			});
		}

		let registry = self.registry;
		let schema = registry.resolve(name)?;
		let map = data.as_map().ok_or_else(|| self.mismatch("mapping", data))?;
		let fields = registry.fields_of(name)?;
		trace!(record = name, path = %self.path, fields = fields.len(), "building record");

		let mut consumed = HashSet::with_capacity(fields.len());
		let mut slots: Vec<Option<Datum>> = Vec::with_capacity(fields.len());

		for field in &fields {
			let key = self.options.name_transform.apply(&field.name);
			let Some((stored_key, value)) = map.get_key_value(key.as_ref()) else {
				trace!(record = name, field = %field.name, key = %key, "field absent from input");
				slots.push(None);
				continue;
			};
			consumed.insert(stored_key.as_str());

			let (declared_optional, ty) = field.ty.unwrap_optional();
			let optional = self.options.implicit_optional || declared_optional;

			self.path.push(PathStep::Field(field.name.to_string()));
			let datum = if value.is_null() {
				if !optional {
					return Err(RecordError::NullForRequiredField {
						path: self.path.to_string(),
						record: name.to_owned(),
						field: field.name.to_string(),
					});
				}
				Datum::Null
			} else {
				self.build(ty, value, depth + 1)?
			};
			self.path.pop();
			slots.push(Some(datum));
		}

		for (key, value) in map {
			if consumed.contains(key.as_str()) {
				continue;
			}
			debug!(record = name, key = %key, path = %self.path, "unconsumed input field");
			if let Some(hook) = &self.options.on_unconsumed_field {
				hook(&UnconsumedField { record: name, key, value })?;
			}
		}

		let instance = self.construct(&schema.name, &fields, slots, depth)?;
		debug!(record = name, path = %self.path, "built record");
		Ok(instance)
	}

	// Absent fields take the schema default, else null when optional, else fail.
	fn construct(&mut self, type_name: &Arc<str>, fields: &[&FieldDesc], slots: Vec<Option<Datum>>, depth: u32) -> Result<RecordInstance> {
		let mut out = Vec::with_capacity(fields.len());
		for (field, slot) in fields.iter().zip(slots) {
			let value = match slot {
				Some(value) => value,
				None => match &field.default {
					Some(default) => {
						self.path.push(PathStep::Field(field.name.to_string()));
						let value = self.build(&field.ty, default, depth + 1)?;
						self.path.pop();
						value
					}
					None if self.options.implicit_optional || field.ty.is_optional() => Datum::Null,
					None => {
						return Err(RecordError::MissingField {
							record: type_name.to_string(),
							field: field.name.to_string(),
						});
					}
				},
			};
			out.push(FieldValue {
				name: Arc::clone(&field.name),
				value,
			});
		}
		Ok(RecordInstance::new(Arc::clone(type_name), out))
	}

	fn expect_array<'v>(&self, data: &'v Value, expected: &'static str) -> Result<&'v [Value]> {
		match data {
			Value::Array(items) => Ok(items.as_slice()),
			other => Err(self.mismatch(expected, other)),
		}
	}

	fn mismatch(&self, expected: &'static str, got: &Value) -> RecordError {
		RecordError::TypeMismatch {
			path: self.path.to_string(),
			expected,
			got: got.kind_name(),
		}
	}
}

// Integral floats and integers that compare equal collapse inside a set; the first one wins.
fn numeric_twin(datum: &Datum) -> Option<Datum> {
	match datum {
		Datum::Int(v) => {
			let float = *v as f64;
			(float as i64 == *v && float != 9_223_372_036_854_775_808.0).then_some(Datum::Float(F64(float)))
		}
		Datum::Float(F64(v)) if v.fract() == 0.0 && *v >= -9_223_372_036_854_775_808.0 && *v < 9_223_372_036_854_775_808.0 => Some(Datum::Int(*v as i64)),
		_ => None,
	}
}

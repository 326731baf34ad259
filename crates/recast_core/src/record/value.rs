use indexmap::IndexMap;

/// Untyped data tree as produced by a text-format parser.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Signed integer scalar.
	Int(i64),
	/// Unsigned integer scalar too large for `i64`.
	UInt(u64),
	/// Floating point scalar.
	Float(f64),
	/// String scalar.
	String(String),
	/// Ordered sequence.
	Array(Vec<Value>),
	/// String-keyed mapping in input key order.
	Map(IndexMap<String, Value>),
}

impl Value {
	/// Short kind label used in diagnostics.
	pub fn kind_name(&self) -> &'static str {
		match self {
			Self::Null => "null",
			Self::Bool(_) => "bool",
			Self::Int(_) | Self::UInt(_) => "int",
			Self::Float(_) => "float",
			Self::String(_) => "str",
			Self::Array(_) => "sequence",
			Self::Map(_) => "mapping",
		}
	}

	/// Whether this is the null marker.
	pub fn is_null(&self) -> bool {
		matches!(self, Self::Null)
	}

	/// Borrow the mapping payload, if any.
	pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
		match self {
			Self::Map(map) => Some(map),
			_ => None,
		}
	}

	/// Parse JSON text into a value tree.
	pub fn from_json_str(text: &str) -> crate::record::Result<Self> {
		let json: serde_json::Value = serde_json::from_str(text)?;
		Ok(Self::from(json))
	}
}

impl From<serde_json::Value> for Value {
	fn from(json: serde_json::Value) -> Self {
		match json {
			serde_json::Value::Null => Self::Null,
			serde_json::Value::Bool(v) => Self::Bool(v),
			serde_json::Value::Number(n) => {
				if let Some(v) = n.as_i64() {
					Self::Int(v)
				} else if let Some(v) = n.as_u64() {
					Self::UInt(v)
				} else {
					Self::Float(n.as_f64().unwrap_or(f64::NAN))
				}
			}
			serde_json::Value::String(v) => Self::String(v),
			serde_json::Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			serde_json::Value::Object(map) => Self::Map(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect()),
		}
	}
}

impl From<Value> for serde_json::Value {
	fn from(value: Value) -> Self {
		match value {
			Value::Null => Self::Null,
			Value::Bool(v) => Self::Bool(v),
			Value::Int(v) => Self::from(v),
			Value::UInt(v) => Self::from(v),
			// Non-finite floats have no JSON form.
			Value::Float(v) => serde_json::Number::from_f64(v).map(Self::Number).unwrap_or(Self::Null),
			Value::String(v) => Self::String(v),
			Value::Array(items) => Self::Array(items.into_iter().map(Self::from).collect()),
			Value::Map(map) => Self::Object(map.into_iter().map(|(key, value)| (key, Self::from(value))).collect()),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Self::Int(value)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Self::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

#[cfg(test)]
mod tests {
	use super::Value;

	#[test]
	fn json_object_keeps_document_key_order() {
		let value = Value::from_json_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).expect("json parses");
		let keys: Vec<_> = value.as_map().expect("mapping").keys().cloned().collect();
		assert_eq!(keys, ["zeta", "alpha", "mid"]);
	}

	#[test]
	fn large_unsigned_numbers_stay_unsigned() {
		let value = Value::from_json_str("18446744073709551615").expect("json parses");
		assert_eq!(value, Value::UInt(u64::MAX));
		assert_eq!(Value::from_json_str("-3").expect("json parses"), Value::Int(-3));
		assert_eq!(Value::from_json_str("2.5").expect("json parses"), Value::Float(2.5));
	}

	#[test]
	fn non_finite_float_renders_as_json_null() {
		let json = serde_json::Value::from(Value::Float(f64::INFINITY));
		assert!(json.is_null());
	}
}

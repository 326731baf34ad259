use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;

use crate::record::{Datum, RecordError, Result};

/// Conversion from a materialized [`Datum`] into a Rust value.
///
/// Hand-written record structs implement this by reading fields off the
/// [`RecordInstance`](crate::record::RecordInstance) with `get_as`.
pub trait FromDatum: Sized {
	/// Convert `datum`, failing with [`RecordError::TypeMismatch`] on a shape mismatch.
	fn from_datum(datum: &Datum) -> Result<Self>;
}

fn mismatch(expected: &'static str, datum: &Datum) -> RecordError {
	RecordError::TypeMismatch {
		path: "$".to_owned(),
		expected,
		got: datum.kind_name(),
	}
}

impl FromDatum for Datum {
	fn from_datum(datum: &Datum) -> Result<Self> {
		Ok(datum.clone())
	}
}

impl FromDatum for bool {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Bool(v) => Ok(*v),
			other => Err(mismatch("bool", other)),
		}
	}
}

impl FromDatum for i64 {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Int(v) => Ok(*v),
			Datum::UInt(v) => i64::try_from(*v).map_err(|_| mismatch("i64", datum)),
			other => Err(mismatch("int", other)),
		}
	}
}

impl FromDatum for u64 {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::UInt(v) => Ok(*v),
			Datum::Int(v) => u64::try_from(*v).map_err(|_| mismatch("u64", datum)),
			other => Err(mismatch("int", other)),
		}
	}
}

impl FromDatum for f64 {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Float(v) => Ok(v.0),
			Datum::Int(v) => Ok(*v as f64),
			Datum::UInt(v) => Ok(*v as f64),
			other => Err(mismatch("float", other)),
		}
	}
}

impl FromDatum for String {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::String(v) => Ok(v.to_string()),
			other => Err(mismatch("str", other)),
		}
	}
}

impl<T: FromDatum> FromDatum for Option<T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Null => Ok(None),
			other => T::from_datum(other).map(Some),
		}
	}
}

impl<T: FromDatum> FromDatum for Vec<T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Seq(items) => items.iter().map(T::from_datum).collect(),
			Datum::Set(items) => items.iter().map(T::from_datum).collect(),
			other => Err(mismatch("sequence", other)),
		}
	}
}

impl<T: FromDatum + Ord> FromDatum for BTreeSet<T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Set(items) => items.iter().map(T::from_datum).collect(),
			Datum::Seq(items) => items.iter().map(T::from_datum).collect(),
			other => Err(mismatch("set", other)),
		}
	}
}

impl<T: FromDatum + Eq + Hash> FromDatum for HashSet<T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Set(items) => items.iter().map(T::from_datum).collect(),
			Datum::Seq(items) => items.iter().map(T::from_datum).collect(),
			other => Err(mismatch("set", other)),
		}
	}
}

impl<T: FromDatum> FromDatum for BTreeMap<String, T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Map(map) => map.iter().map(|(key, value)| T::from_datum(value).map(|value| (key.to_string(), value))).collect(),
			other => Err(mismatch("mapping", other)),
		}
	}
}

impl<T: FromDatum> FromDatum for HashMap<String, T> {
	fn from_datum(datum: &Datum) -> Result<Self> {
		match datum {
			Datum::Map(map) => map.iter().map(|(key, value)| T::from_datum(value).map(|value| (key.to_string(), value))).collect(),
			other => Err(mismatch("mapping", other)),
		}
	}
}

use std::fmt;
use std::sync::Arc;

use crate::record::{RecordError, Result};

/// Leaf scalar kinds. Advisory only: scalar-typed data passes through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
	/// Any value.
	Any,
	/// Boolean.
	Bool,
	/// Integer.
	Int,
	/// Floating point.
	Float,
	/// String.
	Str,
}

impl ScalarKind {
	/// Canonical type-expression spelling.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Any => "any",
			Self::Bool => "bool",
			Self::Int => "int",
			Self::Float => "float",
			Self::Str => "str",
		}
	}
}

/// Expected shape of one field or value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDesc {
	/// Opaque leaf, passed through unchanged.
	Scalar(ScalarKind),
	/// Nested record type, by registered name.
	Record(Arc<str>),
	/// Ordered sequence of elements.
	Sequence(Box<TypeDesc>),
	/// Duplicate-free collection of elements.
	Set(Box<TypeDesc>),
	/// String-keyed mapping.
	Map(Box<TypeDesc>, Box<TypeDesc>),
	/// Nullable wrapper around exactly one descriptor.
	Optional(Box<TypeDesc>),
}

impl TypeDesc {
	/// Reference a record type by name.
	pub fn record(name: impl Into<Arc<str>>) -> Self {
		Self::Record(name.into())
	}

	/// Sequence of `element`.
	pub fn seq(element: TypeDesc) -> Self {
		Self::Sequence(Box::new(element))
	}

	/// Set of `element`.
	pub fn set(element: TypeDesc) -> Self {
		Self::Set(Box::new(element))
	}

	/// Mapping from `key` to `value`.
	pub fn map(key: TypeDesc, value: TypeDesc) -> Self {
		Self::Map(Box::new(key), Box::new(value))
	}

	/// Nullable `inner`.
	pub fn optional(inner: TypeDesc) -> Self {
		Self::Optional(Box::new(inner))
	}

	/// Whether the outermost descriptor is optional.
	pub fn is_optional(&self) -> bool {
		matches!(self, Self::Optional(_))
	}

	/// Split off one optional layer, returning the inner descriptor.
	pub fn unwrap_optional(&self) -> (bool, &TypeDesc) {
		match self {
			Self::Optional(inner) => (true, inner),
			other => (false, other),
		}
	}

	/// Check the local shape rules: no nested optionals, string map keys.
	pub fn validate(&self) -> Result<()> {
		match self {
			Self::Scalar(_) | Self::Record(_) => Ok(()),
			Self::Sequence(element) | Self::Set(element) => element.validate(),
			Self::Map(key, value) => {
				check_map_key(key)?;
				value.validate()
			}
			Self::Optional(inner) => {
				check_optional_inner(self, inner)?;
				inner.validate()
			}
		}
	}

	/// Visit every record name referenced by this descriptor.
	pub fn for_each_record(&self, visit: &mut dyn FnMut(&str)) {
		match self {
			Self::Scalar(_) => {}
			Self::Record(name) => visit(name),
			Self::Sequence(element) | Self::Set(element) | Self::Optional(element) => element.for_each_record(visit),
			Self::Map(key, value) => {
				key.for_each_record(visit);
				value.for_each_record(visit);
			}
		}
	}
}

pub(crate) fn check_map_key(key: &TypeDesc) -> Result<()> {
	match key {
		TypeDesc::Scalar(ScalarKind::Str) => Ok(()),
		other => Err(RecordError::NonStringMapKey { key: other.to_string() }),
	}
}

pub(crate) fn check_optional_inner(outer: &TypeDesc, inner: &TypeDesc) -> Result<()> {
	if inner.is_optional() {
		return Err(RecordError::NestedOptional { ty: outer.to_string() });
	}
	Ok(())
}

impl From<ScalarKind> for TypeDesc {
	fn from(kind: ScalarKind) -> Self {
		Self::Scalar(kind)
	}
}

impl fmt::Display for TypeDesc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Scalar(kind) => f.write_str(kind.as_str()),
			Self::Record(name) => f.write_str(name),
			Self::Sequence(element) => write!(f, "list<{element}>"),
			Self::Set(element) => write!(f, "set<{element}>"),
			Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
			Self::Optional(inner) => write!(f, "optional<{inner}>"),
		}
	}
}

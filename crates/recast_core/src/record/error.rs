use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RecordError>;

/// Coarse classification of [`RecordError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// Input shape disagrees with the schema.
	TypeMismatch,
	/// The schema itself cannot be represented.
	SchemaDefinition,
	/// A required field was absent and had no default.
	MissingField,
	/// Null was supplied for a field that is not optional.
	NullAssignedToRequiredField,
	/// Raised by a caller-supplied hook.
	Caller,
	/// A configured limit was exceeded.
	Limit,
	/// Reading or parsing an external document failed.
	Io,
}

/// Errors produced while registering schemas, materializing, and loading documents.
#[derive(Debug, Error)]
pub enum RecordError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// JSON document could not be parsed.
	#[error("json: {0}")]
	Json(#[from] serde_json::Error),
	/// Input value shape did not match the expected type.
	#[error("type mismatch at {path}: expected {expected}, got {got}")]
	TypeMismatch {
		/// Data path of the offending value.
		path: String,
		/// Expected value kind.
		expected: &'static str,
		/// Actual value kind.
		got: &'static str,
	},
	/// `optional<optional<..>>` was declared.
	#[error("nested optional type {ty}")]
	NestedOptional {
		/// Rendered offending descriptor.
		ty: String,
	},
	/// Map key type is not a string scalar.
	#[error("map key type must be str, got {key}")]
	NonStringMapKey {
		/// Rendered key descriptor.
		key: String,
	},
	/// Multi-branch unions are not representable.
	#[error("unsupported union type: {expr}")]
	UnsupportedUnion {
		/// Original type expression.
		expr: String,
	},
	/// Type expression text could not be parsed.
	#[error("invalid type expression {expr:?}: {reason}")]
	InvalidTypeExpr {
		/// Original type expression.
		expr: String,
		/// Parser diagnostic.
		reason: &'static str,
	},
	/// Referenced record type is not registered.
	#[error("unknown record type: {name}")]
	UnknownRecord {
		/// Requested record name.
		name: String,
	},
	/// Record name registered twice.
	#[error("duplicate record type: {name}")]
	DuplicateRecord {
		/// Duplicated record name.
		name: String,
	},
	/// One declaration lists the same field twice.
	#[error("duplicate field {field} in {record}")]
	DuplicateField {
		/// Declaring record name.
		record: String,
		/// Duplicated field name.
		field: String,
	},
	/// `extends` chain loops back on itself.
	#[error("inheritance cycle through {record}")]
	InheritanceCycle {
		/// Record where the cycle was detected.
		record: String,
	},
	/// Non-optional field absent from input with no default.
	#[error("missing required field {field} on {record}")]
	MissingField {
		/// Record type being constructed.
		record: String,
		/// Missing field name.
		field: String,
	},
	/// Null supplied for a non-optional field.
	#[error("null for required field {field} on {record} at {path}")]
	NullForRequiredField {
		/// Data path of the null value.
		path: String,
		/// Record type being constructed.
		record: String,
		/// Field name.
		field: String,
	},
	/// Input key not consumed by a record, raised by strict callers.
	#[error("unconsumed field {key} on {record}")]
	UnconsumedField {
		/// Record type being constructed.
		record: String,
		/// Unmatched input key.
		key: String,
	},
	/// Failure raised by a caller-supplied hook.
	#[error("{0}")]
	Callback(String),
	/// Materializer recursion exceeded the configured limit.
	#[error("build depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Data path expression syntax is invalid.
	#[error("invalid data path: {path}")]
	InvalidDataPath {
		/// Original path string.
		path: String,
	},
	/// Accessor named a field the record does not declare.
	#[error("record {record} has no field {field}")]
	NoSuchField {
		/// Record type name.
		record: String,
		/// Requested field name.
		field: String,
	},
	/// Data path does not address a value in the tree.
	#[error("no value at {path}")]
	PathNotFound {
		/// Rendered data path.
		path: String,
	},
}

impl RecordError {
	/// Classify this error.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) | Self::Json(_) => ErrorKind::Io,
			Self::TypeMismatch { .. } | Self::InvalidDataPath { .. } => ErrorKind::TypeMismatch,
			Self::NestedOptional { .. }
			| Self::NonStringMapKey { .. }
			| Self::UnsupportedUnion { .. }
			| Self::InvalidTypeExpr { .. }
			| Self::UnknownRecord { .. }
			| Self::DuplicateRecord { .. }
			| Self::DuplicateField { .. }
			| Self::InheritanceCycle { .. } => ErrorKind::SchemaDefinition,
			Self::MissingField { .. } => ErrorKind::MissingField,
			Self::NullForRequiredField { .. } => ErrorKind::NullAssignedToRequiredField,
			Self::UnconsumedField { .. } | Self::Callback(_) | Self::NoSuchField { .. } | Self::PathNotFound { .. } => ErrorKind::Caller,
			Self::DepthExceeded { .. } => ErrorKind::Limit,
		}
	}
}

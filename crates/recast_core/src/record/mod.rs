mod build;
mod datum;
mod decl;
mod document;
mod error;
mod extract;
mod flatten;
mod path;
mod rename;
mod schema;
mod types;
mod value;

/// Materialization entry points and options.
pub use build::{BuildOptions, UnconsumedField, UnconsumedHook, build, build_as, build_record};
/// Typed data produced by the materializer.
pub use datum::{Datum, DatumMap, F64, FieldValue, RecordInstance};
/// Type expression parser.
pub use decl::parse_type_expr;
/// JSON schema document model.
pub use document::{FieldDoc, RecordDoc, SchemaDocument};
/// Error and result aliases.
pub use error::{ErrorKind, RecordError, Result};
/// Conversion from typed data into native Rust values.
pub use extract::FromDatum;
/// Typed data back to plain trees.
pub use flatten::{FlattenOptions, flatten, flatten_record, flatten_record_with, flatten_with};
/// Data path parser and selection.
pub use path::{DataPath, PathStep};
/// Field-name transforms.
pub use rename::{NameTransform, RenameRule};
/// Record schema declarations and registry.
pub use schema::{FieldDesc, RecordSchema, SchemaRegistry};
/// Type descriptors.
pub use types::{ScalarKind, TypeDesc};
/// Untyped input data tree.
pub use value::Value;

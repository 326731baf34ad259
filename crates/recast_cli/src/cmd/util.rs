use std::io::Read;
use std::path::Path;

use recast::record::{RecordError, Result, SchemaDocument, SchemaRegistry, Value};
use serde::Serialize;
use tracing::debug;

/// Print `payload` as pretty JSON on stdout.
pub(crate) fn emit_json(payload: &impl Serialize) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Load and validate a schema document.
pub(crate) fn load_registry(path: &Path) -> Result<SchemaRegistry> {
	let registry = SchemaDocument::from_path(path)?.into_registry()?;
	debug!(path = %path.display(), records = registry.len(), "loaded schema");
	Ok(registry)
}

/// Read input JSON from a file, or from stdin when `path` is absent or `-`.
pub(crate) fn read_input(path: Option<&Path>) -> Result<Value> {
	let text = match path {
		Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
		_ => {
			let mut text = String::new();
			std::io::stdin().read_to_string(&mut text)?;
			text
		}
	};
	Value::from_json_str(&text)
}

/// Parse a `--rename` label.
pub(crate) fn parse_rename(label: &str) -> std::result::Result<recast::record::RenameRule, String> {
	recast::record::RenameRule::from_label(label).ok_or_else(|| format!("unknown rename rule {label:?}; expected camel, pascal, snake, kebab, or screaming"))
}

/// Render an untyped value as compact JSON text.
pub(crate) fn value_json(value: &Value) -> serde_json::Value {
	serde_json::Value::from(value.clone())
}

/// Error for a `--select` path that addresses nothing.
pub(crate) fn path_not_found(path: &str) -> RecordError {
	RecordError::PathNotFound { path: path.to_owned() }
}

use std::path::PathBuf;

use recast::record::{FieldDesc, Result};
use serde::Serialize;

use crate::cmd::util::{emit_json, load_registry, value_json};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long)]
	pub record: String,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct FieldsJson {
	record: String,
	extends: Option<String>,
	fields: Vec<FieldJson>,
}

#[derive(Serialize)]
struct FieldJson {
	name: String,
	#[serde(rename = "type")]
	ty: String,
	optional: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	default: Option<serde_json::Value>,
}

impl From<&FieldDesc> for FieldJson {
	fn from(field: &FieldDesc) -> Self {
		Self {
			name: field.name.to_string(),
			ty: field.ty.to_string(),
			optional: field.ty.is_optional(),
			default: field.default.as_ref().map(value_json),
		}
	}
}

/// Print the merged, inheritance-resolved field list of one record.
pub fn run(args: Args) -> Result<()> {
	let Args { schema, record, json } = args;

	let registry = load_registry(&schema)?;
	let declared = registry.resolve(&record)?;
	let fields: Vec<FieldJson> = registry.fields_of(&record)?.into_iter().map(FieldJson::from).collect();

	if json {
		return emit_json(&FieldsJson {
			record,
			extends: declared.extends.as_deref().map(str::to_owned),
			fields,
		});
	}

	match &declared.extends {
		Some(parent) => println!("record: {record} extends {parent}"),
		None => println!("record: {record}"),
	}
	for field in &fields {
		match &field.default {
			Some(default) => println!("  {}: {} = {}", field.name, field.ty, default),
			None => println!("  {}: {}", field.name, field.ty),
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;

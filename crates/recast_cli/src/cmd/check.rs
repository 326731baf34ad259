use std::path::PathBuf;

use recast::record::Result;
use serde::Serialize;

use crate::cmd::util::{emit_json, load_registry};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long)]
	pub json: bool,
}

#[derive(Serialize)]
struct CheckJson {
	path: String,
	record_count: usize,
	records: Vec<RecordJson>,
}

#[derive(Serialize)]
struct RecordJson {
	name: String,
	extends: Option<String>,
	field_count: usize,
}

/// Validate a schema document and list its records.
pub fn run(args: Args) -> Result<()> {
	let Args { schema, json } = args;

	let registry = load_registry(&schema)?;
	let records = registry
		.records()
		.map(|record| -> Result<RecordJson> {
			Ok(RecordJson {
				name: record.name.to_string(),
				extends: record.extends.as_deref().map(str::to_owned),
				field_count: registry.fields_of(&record.name)?.len(),
			})
		})
		.collect::<Result<Vec<_>>>()?;

	if json {
		return emit_json(&CheckJson {
			path: schema.display().to_string(),
			record_count: records.len(),
			records,
		});
	}

	println!("ok: {} records", records.len());
	for record in &records {
		match &record.extends {
			Some(parent) => println!("  {} ({} fields, extends {parent})", record.name, record.field_count),
			None => println!("  {} ({} fields)", record.name, record.field_count),
		}
	}
	Ok(())
}

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use recast::record::{BuildOptions, DataPath, RecordError, RenameRule, Result, Value, build, flatten, parse_type_expr};
use serde::Serialize;
use tracing::warn;

use crate::cmd::util::{emit_json, load_registry, parse_rename, path_not_found, read_input, value_json};

#[derive(clap::Args)]
pub struct Args {
	/// Input JSON file; stdin when omitted or `-`.
	pub input: Option<PathBuf>,
	#[arg(long)]
	pub schema: PathBuf,
	#[arg(long = "type")]
	pub type_expr: String,
	#[arg(long, value_parser = parse_rename)]
	pub rename: Option<RenameRule>,
	#[arg(long)]
	pub implicit_optional: bool,
	/// Fail on the first input key no field consumes.
	#[arg(long)]
	pub strict: bool,
	#[arg(long)]
	pub json: bool,
	/// Print only the value at this data path.
	#[arg(long)]
	pub select: Option<String>,
	#[arg(long, default_value_t = 64)]
	pub max_depth: u32,
}

#[derive(Serialize)]
struct BuildJson {
	#[serde(rename = "type")]
	ty: String,
	value: serde_json::Value,
	unconsumed: Vec<UnconsumedJson>,
}

#[derive(Debug, Clone, Serialize)]
struct UnconsumedJson {
	record: String,
	key: String,
	value: serde_json::Value,
}

/// Materialize input data and print the flattened result.
pub fn run(args: Args) -> Result<()> {
	let Args {
		input,
		schema,
		type_expr,
		rename,
		implicit_optional,
		strict,
		json,
		select,
		max_depth,
	} = args;

	let registry = load_registry(&schema)?;
	let ty = parse_type_expr(&type_expr)?;
	let select = select.as_deref().map(DataPath::parse).transpose()?;
	let data = read_input(input.as_deref())?;

	let unconsumed: Arc<Mutex<Vec<UnconsumedJson>>> = Arc::default();
	let sink = Arc::clone(&unconsumed);
	let mut options = BuildOptions {
		max_depth,
		..BuildOptions::default()
	}
	.with_implicit_optional(implicit_optional)
	.on_unconsumed(move |field| {
		if strict {
			return Err(RecordError::UnconsumedField {
				record: field.record.to_owned(),
				key: field.key.to_owned(),
			});
		}
		warn!(record = field.record, key = field.key, "ignoring unconsumed field");
		sink.lock().unwrap_or_else(PoisonError::into_inner).push(UnconsumedJson {
			record: field.record.to_owned(),
			key: field.key.to_owned(),
			value: value_json(field.value),
		});
		Ok(())
	});
	if let Some(rule) = rename {
		options = options.with_name_transform(rule);
	}

	let datum = build(&registry, &ty, &data, &options)?;
	let selected = match &select {
		Some(path) => datum.select(path).ok_or_else(|| path_not_found(&path.to_string()))?,
		None => &datum,
	};
	let value = flatten(selected);
	let unconsumed = std::mem::take(&mut *unconsumed.lock().unwrap_or_else(PoisonError::into_inner));

	if json {
		return emit_json(&BuildJson {
			ty: ty.to_string(),
			value: value_json(&value),
			unconsumed,
		});
	}

	print_text(&ty.to_string(), &value, &unconsumed)
}

fn print_text(ty: &str, value: &Value, unconsumed: &[UnconsumedJson]) -> Result<()> {
	println!("type: {ty}");
	println!("{}", serde_json::to_string_pretty(&value_json(value))?);
	if !unconsumed.is_empty() {
		println!("unconsumed:");
		for item in unconsumed {
			println!("  {}.{} = {}", item.record, item.key, item.value);
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests;

use std::fmt;

use crate::record::{Datum, RecordError, Result};

/// One step in a data path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathStep {
	/// Select a record field or mapping key.
	Field(String),
	/// Select a sequence element by zero-based index.
	Index(usize),
}

/// Location inside a data tree, rendered as `$.pairs[0].first`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataPath {
	/// Ordered sequence of path steps.
	pub steps: Vec<PathStep>,
}

impl DataPath {
	/// Parse dotted field syntax with optional `[index]` selectors and an optional `$` root.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = || RecordError::InvalidDataPath { path: input.to_owned() };
		let body = input.strip_prefix('$').map(|rest| rest.strip_prefix('.').unwrap_or(rest)).unwrap_or(input);
		if body.is_empty() {
			return if input.starts_with('$') { Ok(Self::default()) } else { Err(invalid()) };
		}

		let bytes = body.as_bytes();
		let mut idx = 0_usize;
		let mut steps = Vec::new();

		while idx < bytes.len() {
			let start = idx;
			while idx < bytes.len() && (bytes[idx].is_ascii_alphanumeric() || bytes[idx] == b'_' || bytes[idx] == b'-') {
				idx += 1;
			}
			if idx == start && bytes[idx] != b'[' {
				return Err(invalid());
			}
			if idx > start {
				steps.push(PathStep::Field(body[start..idx].to_owned()));
			}

			while idx < bytes.len() && bytes[idx] == b'[' {
				idx += 1;
				let n_start = idx;
				while idx < bytes.len() && bytes[idx].is_ascii_digit() {
					idx += 1;
				}
				if idx == n_start || idx >= bytes.len() || bytes[idx] != b']' {
					return Err(invalid());
				}
				let number = body[n_start..idx].parse::<usize>().map_err(|_| invalid())?;
				steps.push(PathStep::Index(number));
				idx += 1;
			}

			if idx < bytes.len() {
				if bytes[idx] != b'.' {
					return Err(invalid());
				}
				idx += 1;
				if idx >= bytes.len() {
					return Err(invalid());
				}
			}
		}

		Ok(Self { steps })
	}

	pub(crate) fn push(&mut self, step: PathStep) {
		self.steps.push(step);
	}

	pub(crate) fn pop(&mut self) {
		self.steps.pop();
	}
}

impl fmt::Display for DataPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("$")?;
		for step in &self.steps {
			match step {
				PathStep::Field(name) => write!(f, ".{name}")?,
				PathStep::Index(index) => write!(f, "[{index}]")?,
			}
		}
		Ok(())
	}
}

impl Datum {
	/// Walk `path` into this tree. Set elements are indexed in their sorted order.
	pub fn select(&self, path: &DataPath) -> Option<&Datum> {
		let mut current = self;
		for step in &path.steps {
			current = match (step, current) {
				(PathStep::Field(name), Datum::Record(item)) => item.get(name)?,
				(PathStep::Field(name), Datum::Map(map)) => map.get(name.as_str())?,
				(PathStep::Index(index), Datum::Seq(items)) => items.get(*index)?,
				(PathStep::Index(index), Datum::Set(items)) => items.iter().nth(*index)?,
				_ => return None,
			};
		}
		Some(current)
	}
}

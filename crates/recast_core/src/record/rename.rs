use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use convert_case::{Case, Casing};

/// Case conversion presets for field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
	/// camelCase
	CamelCase,
	/// PascalCase
	PascalCase,
	/// snake_case
	SnakeCase,
	/// kebab-case
	KebabCase,
	/// SCREAMING_SNAKE_CASE
	ScreamingSnakeCase,
}

impl RenameRule {
	/// Apply the rename rule to a field name.
	pub fn apply(&self, name: &str) -> String {
		match self {
			Self::CamelCase => name.to_case(Case::Camel),
			Self::PascalCase => name.to_case(Case::Pascal),
			Self::SnakeCase => name.to_case(Case::Snake),
			Self::KebabCase => name.to_case(Case::Kebab),
			Self::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
		}
	}

	/// Parse a short rule label (`camel`, `pascal`, `snake`, `kebab`, `screaming`).
	pub fn from_label(label: &str) -> Option<Self> {
		match label {
			"camel" | "camelCase" => Some(Self::CamelCase),
			"pascal" | "PascalCase" => Some(Self::PascalCase),
			"snake" | "snake_case" => Some(Self::SnakeCase),
			"kebab" | "kebab-case" => Some(Self::KebabCase),
			"screaming" | "SCREAMING_SNAKE_CASE" => Some(Self::ScreamingSnakeCase),
			_ => None,
		}
	}
}

/// Maps a schema field name to the key used in external data.
#[derive(Clone, Default)]
pub enum NameTransform {
	/// Use field names verbatim.
	#[default]
	Identity,
	/// Apply a case-conversion preset.
	Rule(RenameRule),
	/// Caller-supplied mapping.
	Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl NameTransform {
	/// Wrap a closure as a custom transform.
	pub fn custom(transform: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
		Self::Custom(Arc::new(transform))
	}

	/// Transform one field name.
	pub fn apply<'a>(&self, name: &'a str) -> Cow<'a, str> {
		match self {
			Self::Identity => Cow::Borrowed(name),
			Self::Rule(rule) => Cow::Owned(rule.apply(name)),
			Self::Custom(transform) => Cow::Owned(transform(name)),
		}
	}
}

impl From<RenameRule> for NameTransform {
	fn from(rule: RenameRule) -> Self {
		Self::Rule(rule)
	}
}

impl fmt::Debug for NameTransform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Identity => f.write_str("Identity"),
			Self::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
			Self::Custom(_) => f.write_str("Custom(..)"),
		}
	}
}

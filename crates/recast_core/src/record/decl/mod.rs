use std::str::FromStr;

use crate::record::{RecordError, Result, ScalarKind, TypeDesc};

/// Parse a textual type expression such as `map<str, list<Pair>>` or `int?`.
///
/// The result is shape-checked with [`TypeDesc::validate`], so nested optionals and
/// non-string map keys are rejected here rather than at build time.
pub fn parse_type_expr(raw: &str) -> Result<TypeDesc> {
	let mut parser = ExprParser {
		src: raw,
		bytes: raw.as_bytes(),
		pos: 0,
	};
	let ty = parser.parse_type()?;
	parser.skip_ws();
	if parser.pos < parser.bytes.len() {
		if parser.bytes[parser.pos] == b'|' {
			return Err(RecordError::UnsupportedUnion { expr: raw.to_owned() });
		}
		return Err(parser.invalid("trailing input"));
	}
	ty.validate()?;
	Ok(ty)
}

impl FromStr for TypeDesc {
	type Err = RecordError;

	fn from_str(s: &str) -> Result<Self> {
		parse_type_expr(s)
	}
}

struct ExprParser<'a> {
	src: &'a str,
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> ExprParser<'a> {
	fn parse_type(&mut self) -> Result<TypeDesc> {
		self.skip_ws();
		let ident = self.ident()?;
		self.skip_ws();

		let args = if self.eat(b'<') { self.args()? } else { Vec::new() };
		let mut ty = self.resolve(ident, args)?;

		self.skip_ws();
		while self.eat(b'?') {
			ty = TypeDesc::optional(ty);
			self.skip_ws();
		}
		Ok(ty)
	}

	fn args(&mut self) -> Result<Vec<TypeDesc>> {
		let mut args = vec![self.parse_type()?];
		loop {
			self.skip_ws();
			if self.eat(b',') {
				args.push(self.parse_type()?);
				continue;
			}
			if self.eat(b'>') {
				return Ok(args);
			}
			if self.peek() == Some(b'|') {
				return Err(RecordError::UnsupportedUnion { expr: self.src.to_owned() });
			}
			return Err(self.invalid("expected ',' or '>'"));
		}
	}

	fn resolve(&self, ident: &str, args: Vec<TypeDesc>) -> Result<TypeDesc> {
		let scalar = match ident {
			"any" => Some(ScalarKind::Any),
			"bool" => Some(ScalarKind::Bool),
			"int" => Some(ScalarKind::Int),
			"float" => Some(ScalarKind::Float),
			"str" | "string" => Some(ScalarKind::Str),
			_ => None,
		};
		if let Some(kind) = scalar {
			return if args.is_empty() { Ok(TypeDesc::Scalar(kind)) } else { Err(self.invalid("scalar types take no parameters")) };
		}

		match (ident, args.len()) {
			("union", _) => Err(RecordError::UnsupportedUnion { expr: self.src.to_owned() }),
			("list" | "seq", 1) | ("set", 1) | ("optional", 1) | ("map" | "dict", 2) => {
				let mut args = args.into_iter();
				let first = args.next().ok_or_else(|| self.invalid("missing type parameter"))?;
				Ok(match ident {
					"list" | "seq" => TypeDesc::seq(first),
					"set" => TypeDesc::set(first),
					"optional" => TypeDesc::optional(first),
					_ => {
						let value = args.next().ok_or_else(|| self.invalid("missing type parameter"))?;
						TypeDesc::map(first, value)
					}
				})
			}
			("list" | "seq" | "set" | "optional" | "map" | "dict", _) => Err(self.invalid("wrong number of type parameters")),
			(_, 0) => Ok(TypeDesc::record(ident)),
			_ => Err(self.invalid("record types take no parameters")),
		}
	}

	fn ident(&mut self) -> Result<&'a str> {
		let start = self.pos;
		while let Some(byte) = self.peek() {
			let ok = if self.pos == start {
				byte.is_ascii_alphabetic() || byte == b'_'
			} else {
				byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'.'
			};
			if !ok {
				break;
			}
			self.pos += 1;
		}
		if self.pos == start {
			return Err(self.invalid("expected type name"));
		}
		let src = self.src;
		Ok(&src[start..self.pos])
	}

	fn skip_ws(&mut self) {
		while self.peek().is_some_and(|byte| byte.is_ascii_whitespace()) {
			self.pos += 1;
		}
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn eat(&mut self, byte: u8) -> bool {
		if self.peek() == Some(byte) {
			self.pos += 1;
			return true;
		}
		false
	}

	fn invalid(&self, reason: &'static str) -> RecordError {
		RecordError::InvalidTypeExpr {
			expr: self.src.to_owned(),
			reason,
		}
	}
}

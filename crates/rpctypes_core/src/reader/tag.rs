use std::str::Chars;

use crate::reader::JsonInfo;

/// Strip the delimiters from a raw tag literal.
///
/// Raw (backtick) literals are taken verbatim; interpreted (double-quoted) literals are
/// unescaped. Anything else is returned unchanged.
pub fn tag_value(literal: &str) -> Option<String> {
	let literal = literal.trim();
	if let Some(inner) = literal.strip_prefix('`').and_then(|rest| rest.strip_suffix('`')) {
		return Some(inner.to_owned());
	}
	if literal.len() >= 2 && literal.starts_with('"') && literal.ends_with('"') {
		return unquote(literal);
	}
	Some(literal.to_owned())
}

/// Outcome of looking up one key in a tag string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagLookup {
	/// The key is present and its value decoded.
	Found(String),
	/// The key is absent, or the tag stops being well formed before reaching it.
	Missing,
	/// The key is present but its quoted value is not a valid string literal.
	Undecodable,
}

/// Look up `key` in a conventional `key:"value" other:"value"` tag string.
pub fn lookup_tag(tag: &str, key: &str) -> Option<String> {
	match find_tag(tag, key) {
		TagLookup::Found(value) => Some(value),
		TagLookup::Missing | TagLookup::Undecodable => None,
	}
}

/// Like [`lookup_tag`], but tells an absent key apart from a value that fails to decode.
pub fn find_tag(tag: &str, key: &str) -> TagLookup {
	let mut rest = tag;
	while !rest.is_empty() {
		rest = rest.trim_start_matches(' ');
		let bytes = rest.as_bytes();

		let name_len = bytes.iter().take_while(|b| **b > b' ' && **b != b':' && **b != b'"' && **b != 0x7f).count();
		if name_len == 0 || name_len + 1 >= bytes.len() || bytes[name_len] != b':' || bytes[name_len + 1] != b'"' {
			return TagLookup::Missing;
		}
		let name = &rest[..name_len];
		rest = &rest[name_len + 1..];

		let bytes = rest.as_bytes();
		let mut end = 1;
		while end < bytes.len() && bytes[end] != b'"' {
			if bytes[end] == b'\\' {
				end += 1;
			}
			end += 1;
		}
		if end >= bytes.len() {
			return TagLookup::Missing;
		}
		let quoted = &rest[..=end];
		rest = &rest[end + 1..];

		if name == key {
			return match unquote(quoted) {
				Some(value) => TagLookup::Found(value),
				None => TagLookup::Undecodable,
			};
		}
	}
	TagLookup::Missing
}

/// Parse a serialization-annotation value such as `name,omitempty`.
///
/// Only the first two comma-separated parts carry meaning; anything after them is ignored.
pub fn parse_json_tag(value: &str) -> Option<JsonInfo> {
	if value.is_empty() {
		return None;
	}

	let parts: Vec<&str> = value.split(',').map(str::trim).collect();
	let mut info = JsonInfo::default();
	match parts.as_slice() {
		[] => return None,
		["-"] => info.ignore = true,
		[name] => info.name = (*name).into(),
		[name, option, ..] => {
			if !name.is_empty() {
				info.name = (*name).into();
			}
			match *option {
				"omitempty" => info.omit_empty = true,
				"string" => info.force_string_type = true,
				_ => {}
			}
		}
	}
	Some(info)
}

/// Decode a double-quoted literal with the full escape set: single-char escapes,
/// `\xHH`, octal `\NNN`, `\uXXXX` and `\UXXXXXXXX`. Byte escapes must form valid UTF-8.
fn unquote(quoted: &str) -> Option<String> {
	let inner = quoted.strip_prefix('"')?.strip_suffix('"')?;
	let mut out = Vec::with_capacity(inner.len());
	let mut chars = inner.chars();
	while let Some(ch) = chars.next() {
		match ch {
			'\\' => {}
			'"' | '\n' => return None,
			_ => {
				push_char(&mut out, ch);
				continue;
			}
		}
		match chars.next()? {
			'a' => out.push(0x07),
			'b' => out.push(0x08),
			'f' => out.push(0x0c),
			'n' => out.push(b'\n'),
			'r' => out.push(b'\r'),
			't' => out.push(b'\t'),
			'v' => out.push(0x0b),
			'\\' => out.push(b'\\'),
			'"' => out.push(b'"'),
			'x' => out.push(u8::try_from(digits(&mut chars, 2, 16)?).ok()?),
			'u' => push_char(&mut out, char::from_u32(digits(&mut chars, 4, 16)?)?),
			'U' => push_char(&mut out, char::from_u32(digits(&mut chars, 8, 16)?)?),
			first @ '0'..='7' => {
				let value = first.to_digit(8)? * 64 + digits(&mut chars, 2, 8)?;
				out.push(u8::try_from(value).ok()?);
			}
			_ => return None,
		}
	}
	String::from_utf8(out).ok()
}

fn digits(chars: &mut Chars<'_>, count: usize, radix: u32) -> Option<u32> {
	(0..count).try_fold(0, |acc, _| Some(acc * radix + chars.next()?.to_digit(radix)?))
}

fn push_char(out: &mut Vec<u8>, ch: char) {
	let mut buf = [0; 4];
	out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
}

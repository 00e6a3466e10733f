use crate::reader::{
	Diagnostic, Field, FieldDecl, FileImports, JsonInfo, ReadOptions, ScalarType, Struct, TagLookup, Trace, TypeExpr, Value, ValueKind, find_tag, is_exported, parse_json_tag, tag_value,
};

/// Map a builtin identifier to its scalar kind.
pub fn scalar_type(ident: &str) -> ScalarType {
	match ident {
		"string" => ScalarType::String,
		"bool" => ScalarType::Bool,
		"int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16" | "uint32" | "uint64" | "uintptr" | "byte" | "rune" | "float" | "float32"
		| "float64" => ScalarType::Number,
		_ => ScalarType::None,
	}
}

/// Converts type expressions of one file into [`Value`]s.
///
/// Recursion follows the nesting of the expression text only. Named types become
/// [`ValueKind::StructRef`] and are never expanded, so self-referencing structs terminate.
pub struct Walker<'a> {
	imports: &'a FileImports,
	options: &'a ReadOptions,
	trace: &'a mut dyn Trace,
}

impl<'a> Walker<'a> {
	/// Create a walker for one file.
	pub fn new(imports: &'a FileImports, options: &'a ReadOptions, trace: &'a mut dyn Trace) -> Self {
		Self { imports, options, trace }
	}

	/// Convert one expression. `None` means the shape is unsupported and was reported.
	pub fn walk(&mut self, field: &str, expr: &TypeExpr) -> Option<Value> {
		match expr {
			TypeExpr::Ident(name) => Some(self.ident(name)),
			TypeExpr::Star(inner) => self.walk(field, inner).map(Value::pointer),
			TypeExpr::Array { elem, .. } => self.walk(field, elem).map(Value::array),
			TypeExpr::Map { key, value } => {
				let key = self.map_key(field, key);
				self.walk(field, value).map(|value| Value::map(key, value))
			}
			TypeExpr::Selector { x, sel } => self.selector(field, x, sel),
			TypeExpr::Struct { fields } => {
				let fields = self.read_fields("", fields);
				Some(Value::new(ValueKind::InlineStruct(Struct::inline(fields))))
			}
			TypeExpr::Paren(inner) => self.walk(field, inner),
			TypeExpr::Func | TypeExpr::Interface | TypeExpr::Chan => {
				self.trace.emit(Diagnostic::UnsupportedExpr {
					field: field.to_owned(),
					shape: expr.shape(),
				});
				None
			}
		}
	}

	/// Extract the exported fields of a struct literal in declaration order.
	///
	/// Names are filtered before the type or tag is looked at.
	pub fn read_fields(&mut self, owner: &str, decls: &[FieldDecl]) -> Vec<Field> {
		let mut fields = Vec::with_capacity(decls.len());
		for decl in decls {
			if decl.names.is_empty() {
				self.trace.emit(Diagnostic::EmbeddedField { owner: owner.to_owned() });
				continue;
			}

			let exported: Vec<&str> = decl.names.iter().map(String::as_str).filter(|name| is_exported(name)).collect();
			let Some(first) = exported.first() else {
				continue;
			};
			let Some(value) = self.walk(first, &decl.ty) else {
				continue;
			};
			let json_info = decl.tag.as_deref().and_then(|raw| self.json_info(first, raw));

			for name in exported {
				fields.push(Field {
					name: name.into(),
					value: value.clone(),
					json_info: json_info.clone(),
				});
			}
		}
		fields
	}

	fn json_info(&mut self, field: &str, raw: &str) -> Option<JsonInfo> {
		let value = match tag_value(raw).map(|tag| find_tag(&tag, &self.options.tag_key)) {
			Some(TagLookup::Found(value)) => value,
			Some(TagLookup::Missing) => return None,
			Some(TagLookup::Undecodable) | None => {
				self.trace.emit(Diagnostic::UndecodableTag {
					field: field.to_owned(),
					tag: raw.to_owned(),
				});
				return None;
			}
		};
		parse_json_tag(&value)
	}

	fn ident(&self, name: &str) -> Value {
		match scalar_type(name) {
			ScalarType::None => Value::struct_ref(self.imports.own_path(), name),
			scalar => Value::keyword(scalar, name),
		}
	}

	fn map_key(&mut self, field: &str, key: &TypeExpr) -> ScalarType {
		match key {
			TypeExpr::Ident(name) => scalar_type(name),
			TypeExpr::Paren(inner) => self.map_key(field, inner),
			TypeExpr::Selector { .. } => ScalarType::None,
			other => {
				self.trace.emit(Diagnostic::UnsupportedMapKey {
					field: field.to_owned(),
					shape: other.shape(),
				});
				ScalarType::None
			}
		}
	}

	fn selector(&mut self, field: &str, x: &TypeExpr, sel: &str) -> Option<Value> {
		let TypeExpr::Ident(alias) = x else {
			self.trace.emit(Diagnostic::UnsupportedSelector {
				field: field.to_owned(),
				sel: sel.to_owned(),
			});
			return None;
		};

		let imports = self.imports;
		let package = match imports.lookup(alias) {
			Some(path) => path,
			None => {
				self.trace.emit(Diagnostic::UnknownImport {
					field: field.to_owned(),
					alias: alias.clone(),
				});
				alias.as_str()
			}
		};
		Some(Value::struct_ref(package, sel))
	}
}

#[cfg(test)]
mod tests;

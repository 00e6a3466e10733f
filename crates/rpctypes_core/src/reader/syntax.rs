use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::reader::Result;

/// All packages found by the external parser in one source directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParsedDir {
	/// Parsed packages, one per package clause.
	#[serde(default)]
	pub packages: Vec<Package>,
}

/// One parsed package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Package {
	/// Package clause name.
	pub name: String,
	/// Source files belonging to the package.
	#[serde(default)]
	pub files: Vec<File>,
}

/// One parsed source file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct File {
	/// File name as reported by the parser.
	pub name: String,
	/// Import declarations in source order.
	#[serde(default)]
	pub imports: Vec<ImportSpec>,
	/// Top-level declarations in source order.
	#[serde(default)]
	pub decls: Vec<Decl>,
}

/// One import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportSpec {
	/// Explicit local name, including `_` and `.`.
	#[serde(default)]
	pub name: Option<String>,
	/// Imported package path.
	pub path: String,
}

/// Top-level declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decl {
	/// `type Name <expr>`.
	Type {
		/// Declared type name.
		name: String,
		/// Underlying type expression.
		#[serde(rename = "type")]
		ty: TypeExpr,
	},
	/// Function or method declaration.
	Func {
		/// Function name.
		name: String,
	},
	/// `var` or `const` declaration.
	Value {
		/// Declared names.
		#[serde(default)]
		names: Vec<String>,
	},
}

/// One field line inside a struct literal.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldDecl {
	/// Declared names; empty for embedded fields.
	#[serde(default)]
	pub names: Vec<String>,
	/// Field type expression.
	#[serde(rename = "type")]
	pub ty: TypeExpr,
	/// Raw tag literal including its delimiters.
	#[serde(default)]
	pub tag: Option<String>,
}

/// Type expression shapes understood by the walker.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeExpr {
	/// Bare identifier, e.g. `string` or `Address`.
	Ident(String),
	/// Pointer, `*X`.
	Star(Box<TypeExpr>),
	/// Slice `[]X` or array `[N]X`.
	Array {
		/// Array length expression text; absent for slices.
		#[serde(default)]
		len: Option<String>,
		/// Element type.
		elem: Box<TypeExpr>,
	},
	/// `map[K]V`.
	Map {
		/// Key type.
		key: Box<TypeExpr>,
		/// Value type.
		value: Box<TypeExpr>,
	},
	/// Qualified identifier `x.Sel`.
	Selector {
		/// Qualifier expression, normally a package alias identifier.
		x: Box<TypeExpr>,
		/// Selected name.
		sel: String,
	},
	/// Anonymous struct literal.
	Struct {
		/// Field lines in source order.
		#[serde(default)]
		fields: Vec<FieldDecl>,
	},
	/// Parenthesized type, `(X)`.
	Paren(Box<TypeExpr>),
	/// Function type.
	Func,
	/// Interface type.
	Interface,
	/// Channel type.
	Chan,
}

impl FieldDecl {
	/// Single-name field without a tag.
	pub fn new(name: &str, ty: TypeExpr) -> Self {
		Self {
			names: vec![name.to_owned()],
			ty,
			tag: None,
		}
	}

	/// Attach a raw tag literal.
	pub fn with_tag(mut self, tag: &str) -> Self {
		self.tag = Some(tag.to_owned());
		self
	}
}

impl ParsedDir {
	/// Parse a parsed-directory document from JSON bytes.
	pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(bytes)?)
	}

	/// Read and parse a parsed-directory document from disk.
	pub fn load(path: impl AsRef<Path>) -> Result<Self> {
		let bytes = fs::read(path)?;
		Self::from_json_slice(&bytes)
	}

	/// Look up a package by its clause name.
	pub fn package(&self, name: &str) -> Option<&Package> {
		self.packages.iter().find(|item| item.name == name)
	}
}

impl TypeExpr {
	/// `name`.
	pub fn ident(name: &str) -> Self {
		Self::Ident(name.to_owned())
	}

	/// `*inner`.
	pub fn star(inner: TypeExpr) -> Self {
		Self::Star(Box::new(inner))
	}

	/// `[]elem`.
	pub fn slice(elem: TypeExpr) -> Self {
		Self::Array { len: None, elem: Box::new(elem) }
	}

	/// `map[key]value`.
	pub fn map(key: TypeExpr, value: TypeExpr) -> Self {
		Self::Map {
			key: Box::new(key),
			value: Box::new(value),
		}
	}

	/// `alias.sel`.
	pub fn qualified(alias: &str, sel: &str) -> Self {
		Self::Selector {
			x: Box::new(Self::ident(alias)),
			sel: sel.to_owned(),
		}
	}

	/// `struct { fields }`.
	pub fn struct_of(fields: Vec<FieldDecl>) -> Self {
		Self::Struct { fields }
	}

	/// Short shape label used in diagnostics.
	pub fn shape(&self) -> &'static str {
		match self {
			Self::Ident(_) => "ident",
			Self::Star(_) => "pointer",
			Self::Array { len: None, .. } => "slice",
			Self::Array { len: Some(_), .. } => "array",
			Self::Map { .. } => "map",
			Self::Selector { .. } => "selector",
			Self::Struct { .. } => "struct",
			Self::Paren(_) => "paren",
			Self::Func => "func",
			Self::Interface => "interface",
			Self::Chan => "chan",
		}
	}
}

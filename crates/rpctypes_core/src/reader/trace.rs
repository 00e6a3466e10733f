use std::fmt;

/// Event reported while extracting one package.
///
/// Progress events describe what the driver is looking at; the remaining variants describe
/// members that were omitted or degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
	/// Extraction of a package started.
	ReadingPackage {
		/// Package path used as qualifier.
		package: String,
	},
	/// A file of the package is being read.
	ReadingFile {
		/// File name.
		file: String,
	},
	/// A struct declaration is being filled.
	ReadingStruct {
		/// Registry key.
		key: String,
	},
	/// A type expression shape the walker does not model.
	UnsupportedExpr {
		/// Owning field, empty for a top-level declaration.
		field: String,
		/// Shape label of the offending expression.
		shape: &'static str,
	},
	/// A selector whose qualifier is not a plain identifier.
	UnsupportedSelector {
		/// Owning field.
		field: String,
		/// Selected name.
		sel: String,
	},
	/// A map key that is not an identifier.
	UnsupportedMapKey {
		/// Owning field.
		field: String,
		/// Shape label of the key.
		shape: &'static str,
	},
	/// A qualifier missing from the file's imports.
	UnknownImport {
		/// Owning field.
		field: String,
		/// Unresolved alias.
		alias: String,
	},
	/// A tag literal or tag value that is not a valid string literal; the field keeps no annotation.
	UndecodableTag {
		/// Owning field.
		field: String,
		/// Raw tag literal as written.
		tag: String,
	},
	/// A field without names.
	EmbeddedField {
		/// Registry key of the owner, empty for inline structs.
		owner: String,
	},
	/// A type declaration whose underlying shape is not a struct.
	NotAStruct {
		/// Registry key.
		key: String,
		/// Shape label of the underlying type.
		shape: &'static str,
	},
	/// A type declared twice under the same key.
	DuplicateType {
		/// Registry key.
		key: String,
	},
}

impl Diagnostic {
	/// Whether the event reports an omitted or degraded member.
	pub fn is_problem(&self) -> bool {
		!matches!(self, Self::ReadingPackage { .. } | Self::ReadingFile { .. } | Self::ReadingStruct { .. })
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ReadingPackage { package } => write!(f, "reading files in package {package}"),
			Self::ReadingFile { file } => write!(f, "reading file {file}"),
			Self::ReadingStruct { key } => write!(f, "reading struct {key}"),
			Self::UnsupportedExpr { field, shape } => write!(f, "field {field}: unsupported {shape} expression"),
			Self::UnsupportedSelector { field, sel } => write!(f, "field {field}: selector .{sel} on a non-identifier"),
			Self::UnsupportedMapKey { field, shape } => write!(f, "field {field}: {shape} map key treated as non-scalar"),
			Self::UnknownImport { field, alias } => write!(f, "field {field}: unknown import alias {alias}"),
			Self::UndecodableTag { field, tag } => write!(f, "field {field}: tag {tag} could not be decoded"),
			Self::EmbeddedField { owner } => write!(f, "{owner}: embedded field skipped"),
			Self::NotAStruct { key, shape } => write!(f, "{key}: {shape} declaration registered without fields"),
			Self::DuplicateType { key } => write!(f, "{key}: declared more than once, keeping the last"),
		}
	}
}

/// Diagnostics sink injected into each extraction call.
pub trait Trace {
	/// Receive one event.
	fn emit(&mut self, diagnostic: Diagnostic);
}

/// Sink that drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTrace;

impl Trace for NoTrace {
	fn emit(&mut self, _diagnostic: Diagnostic) {}
}

/// Sink forwarding events to `tracing`.
///
/// Progress goes out at `trace` level, problems at `debug`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl Trace for TracingSink {
	fn emit(&mut self, diagnostic: Diagnostic) {
		if diagnostic.is_problem() {
			tracing::debug!(target: "rpctypes::reader", "{diagnostic}");
		} else {
			tracing::trace!(target: "rpctypes::reader", "{diagnostic}");
		}
	}
}

/// Sink that keeps every event in arrival order.
#[derive(Debug, Default, Clone)]
pub struct CollectTrace {
	/// Collected events.
	pub events: Vec<Diagnostic>,
}

impl CollectTrace {
	/// Collected problem events only.
	pub fn problems(&self) -> impl Iterator<Item = &Diagnostic> {
		self.events.iter().filter(|item| item.is_problem())
	}
}

impl Trace for CollectTrace {
	fn emit(&mut self, diagnostic: Diagnostic) {
		self.events.push(diagnostic);
	}
}

use crate::reader::{Decl, Diagnostic, File, FileImports, Package, ParsedDir, ReaderError, Registry, Result, Trace, TypeExpr, Walker, is_exported};

/// Behavior switches for package extraction.
#[derive(Debug, Clone)]
pub struct ReadOptions {
	/// Tag key holding the serialization annotation.
	pub tag_key: Box<str>,
	/// Register only exported type declarations.
	pub exported_types_only: bool,
}

impl Default for ReadOptions {
	fn default() -> Self {
		Self {
			tag_key: "json".into(),
			exported_types_only: true,
		}
	}
}

impl ReadOptions {
	/// Preset that also registers unexported type declarations.
	pub fn for_all_types() -> Self {
		Self {
			exported_types_only: false,
			..Self::default()
		}
	}
}

/// Extract the struct registry of package `name` from a parsed directory.
///
/// `path` is the fully qualified package path used as the qualifier of every struct.
/// The only failure is a missing package; problems inside declarations go to `trace`.
pub fn read_structs(dir: &ParsedDir, name: &str, path: &str, options: &ReadOptions, trace: &mut dyn Trace) -> Result<Registry> {
	let package = dir.package(name).ok_or_else(|| ReaderError::PackageNotFound { name: name.to_owned() })?;
	Ok(read_package_structs(package, path, options, trace))
}

/// Extract the struct registry of one parsed package.
pub fn read_package_structs(package: &Package, path: &str, options: &ReadOptions, trace: &mut dyn Trace) -> Registry {
	let mut registry = Registry::new();
	trace.emit(Diagnostic::ReadingPackage { package: path.to_owned() });
	for file in &package.files {
		extract_structs(file, path, options, &mut registry, trace);
	}
	registry
}

fn extract_structs(file: &File, path: &str, options: &ReadOptions, registry: &mut Registry, trace: &mut dyn Trace) {
	trace.emit(Diagnostic::ReadingFile { file: file.name.clone() });
	let imports = FileImports::new(&file.imports, path);

	for decl in &file.decls {
		let Decl::Type { name, ty } = decl else {
			continue;
		};
		if options.exported_types_only && !is_exported(name) {
			continue;
		}

		let key = format!("{path}.{name}");
		if registry.contains_key(&key) {
			trace.emit(Diagnostic::DuplicateType { key: key.clone() });
		}
		let id = registry.insert_empty(path, name);

		match ty {
			TypeExpr::Struct { fields } => {
				trace.emit(Diagnostic::ReadingStruct { key: key.clone() });
				let fields = Walker::new(&imports, options, trace).read_fields(&key, fields);
				registry.set_fields(id, fields);
			}
			other => trace.emit(Diagnostic::NotAStruct { key, shape: other.shape() }),
		}
	}
}

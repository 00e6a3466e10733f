use std::collections::BTreeMap;

use crate::reader::ImportSpec;

/// Alias table for one source file.
///
/// The empty alias names the file's own package, so unqualified references resolve to the
/// declaring package path.
#[derive(Debug, Clone)]
pub struct FileImports {
	package_path: Box<str>,
	aliases: BTreeMap<Box<str>, Box<str>>,
}

impl FileImports {
	/// Build the alias table from a file's imports.
	pub fn new(imports: &[ImportSpec], package_path: &str) -> Self {
		let mut aliases = BTreeMap::new();
		for spec in imports {
			let alias = match spec.name.as_deref() {
				Some("_") => continue,
				Some(name) => name,
				None => default_package_name(&spec.path),
			};
			if alias.is_empty() {
				continue;
			}
			aliases.insert(alias.into(), spec.path.as_str().into());
		}

		Self {
			package_path: package_path.into(),
			aliases,
		}
	}

	/// Path of the package the file belongs to.
	pub fn own_path(&self) -> &str {
		&self.package_path
	}

	/// Resolve an alias, returning `None` for unknown qualifiers.
	///
	/// Dot imports are recorded under `.` and never match a qualifier.
	pub fn lookup(&self, alias: &str) -> Option<&str> {
		if alias.is_empty() {
			return Some(&self.package_path);
		}
		self.aliases.get(alias).map(|path| &**path)
	}

	/// Resolve an alias leniently: unknown aliases come back unchanged.
	pub fn package_path<'a>(&'a self, alias: &'a str) -> &'a str {
		self.lookup(alias).unwrap_or(alias)
	}
}

/// Derive the implicit local name of an unnamed import from its path.
pub(crate) fn default_package_name(path: &str) -> &str {
	let mut segments = path.trim_end_matches('/').rsplit('/');
	let mut last = segments.next().unwrap_or(path);
	if is_major_version(last)
		&& let Some(prev) = segments.next()
	{
		last = prev;
	}

	match last.rsplit_once(".v") {
		Some((head, version)) if !head.is_empty() && !version.is_empty() && version.bytes().all(|b| b.is_ascii_digit()) => head,
		_ => last,
	}
}

fn is_major_version(segment: &str) -> bool {
	segment
		.strip_prefix('v')
		.is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

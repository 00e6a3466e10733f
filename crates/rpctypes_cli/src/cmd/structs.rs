use std::path::PathBuf;

use rpctypes::reader::{CollectTrace, Diagnostic, JsonInfo, ParsedDir, ReadOptions, Registry, ScalarType, Struct, Trace, TracingSink, Value, ValueKind, read_structs};

use crate::DynError;

#[derive(clap::Args)]
pub struct Args {
	/// Parsed package document produced by the source parser.
	pub file: PathBuf,
	/// Package clause name to extract.
	#[arg(long)]
	pub package: String,
	/// Fully qualified package path; defaults to the package name.
	#[arg(long)]
	pub path: Option<String>,
	/// Tag key carrying the serialization annotation.
	#[arg(long = "tag-key", default_value = "json")]
	pub tag_key: String,
	/// Register unexported type declarations too.
	#[arg(long = "all-types")]
	pub all_types: bool,
	/// Print only this struct name.
	#[arg(long = "struct")]
	pub struct_name: Option<String>,
	/// Print diagnostics collected during extraction.
	#[arg(long)]
	pub diagnostics: bool,
	/// Emit JSON instead of text.
	#[arg(long)]
	pub json: bool,
}

/// Extract and print the struct registry of one package.
pub fn run(args: Args) -> Result<(), DynError> {
	let Args {
		file,
		package,
		path,
		tag_key,
		all_types,
		struct_name,
		diagnostics,
		json,
	} = args;

	let path = path.unwrap_or_else(|| package.clone());
	let mut options = if all_types { ReadOptions::for_all_types() } else { ReadOptions::default() };
	options.tag_key = tag_key.into();

	let dir = ParsedDir::load(&file)?;
	let mut sink = CollectTrace::default();
	let registry = read_structs(&dir, &package, &path, &options, &mut sink)?;
	tracing::debug!(package = %path, structs = registry.len(), events = sink.events.len(), "extracted registry");
	let mut forward = TracingSink;
	for event in &sink.events {
		forward.emit(event.clone());
	}

	let selected: Vec<(&str, &Struct)> = registry.iter().filter(|(_, item)| struct_name.as_deref().is_none_or(|name| &*item.name == name)).collect();
	if let Some(name) = &struct_name
		&& selected.is_empty()
	{
		return Err(format!("struct not found: {name}").into());
	}

	let problems: Vec<&Diagnostic> = if diagnostics { sink.problems().collect() } else { Vec::new() };

	if json {
		print_json(&path, &registry, &selected, &problems)?;
		return Ok(());
	}

	println!("file: {}", file.display());
	println!("package: {path}");
	println!("structs: {}", registry.len());
	for (key, item) in &selected {
		println!("{key}");
		for field in &item.fields {
			match &field.json_info {
				Some(info) => println!("  {}\t{}\t{}", field.name, render_value(&field.value), render_json_info(info)),
				None => println!("  {}\t{}", field.name, render_value(&field.value)),
			}
		}
	}
	if diagnostics {
		println!("diagnostics: {}", problems.len());
		for item in problems {
			println!("  {item}");
		}
	}

	Ok(())
}

fn print_json(path: &str, registry: &Registry, selected: &[(&str, &Struct)], problems: &[&Diagnostic]) -> Result<(), DynError> {
	let payload = StructsJson {
		package: path,
		count: registry.len(),
		structs: selected.iter().copied().collect(),
		diagnostics: problems.iter().map(ToString::to_string).collect(),
	};
	println!("{}", serde_json::to_string_pretty(&payload)?);
	Ok(())
}

/// Render a value in declaration syntax, e.g. `*[]map[string]*pkg.Address`.
pub(crate) fn render_value(value: &Value) -> String {
	let inner = match &value.kind {
		ValueKind::Scalar(scalar) => value.go_type.as_deref().unwrap_or(render_scalar(*scalar)).to_owned(),
		ValueKind::StructRef(target) => target.key(),
		ValueKind::InlineStruct(item) => {
			let fields: Vec<String> = item.fields.iter().map(|field| format!("{} {}", field.name, render_value(&field.value))).collect();
			format!("struct {{ {} }}", fields.join("; "))
		}
		ValueKind::Array(elem) => format!("[]{}", render_value(elem)),
		ValueKind::Map { key, value } => format!("map[{}]{}", render_scalar(*key), render_value(value)),
	};
	if value.is_ptr { format!("*{inner}") } else { inner }
}

fn render_scalar(scalar: ScalarType) -> &'static str {
	match scalar {
		ScalarType::String => "string",
		ScalarType::Bool => "bool",
		ScalarType::Number => "number",
		ScalarType::None => "?",
	}
}

/// Render an annotation back into tag form.
pub(crate) fn render_json_info(info: &JsonInfo) -> String {
	if info.ignore {
		return "json:\"-\"".to_owned();
	}
	let mut out = format!("json:\"{}", info.name);
	if info.omit_empty {
		out.push_str(",omitempty");
	}
	if info.force_string_type {
		out.push_str(",string");
	}
	out.push('"');
	out
}

#[derive(serde::Serialize)]
struct StructsJson<'a> {
	package: &'a str,
	count: usize,
	structs: std::collections::BTreeMap<&'a str, &'a Struct>,
	diagnostics: Vec<String>,
}

use super::{Walker, scalar_type};
use crate::reader::{CollectTrace, Diagnostic, FieldDecl, FileImports, ImportSpec, ReadOptions, ScalarType, TypeExpr, Value, ValueKind};

const PKG: &str = "example.com/demo";

fn imports() -> FileImports {
	FileImports::new(
		&[ImportSpec {
			name: Some("nstd".to_owned()),
			path: "example.com/demo/nested".to_owned(),
		}],
		PKG,
	)
}

fn walk(expr: &TypeExpr) -> (Option<Value>, CollectTrace) {
	let imports = imports();
	let options = ReadOptions::default();
	let mut sink = CollectTrace::default();
	let value = Walker::new(&imports, &options, &mut sink).walk("F", expr);
	(value, sink)
}

fn read(decls: &[FieldDecl]) -> (Vec<crate::reader::Field>, CollectTrace) {
	let imports = imports();
	let options = ReadOptions::default();
	let mut sink = CollectTrace::default();
	let fields = Walker::new(&imports, &options, &mut sink).read_fields("example.com/demo.T", decls);
	(fields, sink)
}

#[test]
fn scalar_keywords_map_to_scalar_types() {
	assert_eq!(scalar_type("string"), ScalarType::String);
	assert_eq!(scalar_type("bool"), ScalarType::Bool);
	for ident in ["int", "int8", "int16", "int32", "int64", "uint", "uint8", "uint16", "uint32", "uint64", "uintptr", "byte", "rune", "float", "float32", "float64"] {
		assert_eq!(scalar_type(ident), ScalarType::Number, "{ident}");
	}
	assert_eq!(scalar_type("String"), ScalarType::None);
	assert_eq!(scalar_type("error"), ScalarType::None);
}

#[test]
fn builtin_identifier_yields_scalar() {
	let (value, sink) = walk(&TypeExpr::ident("float64"));
	let value = value.expect("scalar resolves");
	assert_eq!(value.as_scalar(), Some(ScalarType::Number));
	assert_eq!(value.go_type.as_deref(), Some("float64"));
	assert!(!value.is_ptr);
	assert!(sink.events.is_empty());
}

#[test]
fn scalar_keyword_survives_pointers_and_containers() {
	let (value, _) = walk(&TypeExpr::slice(TypeExpr::star(TypeExpr::ident("uint8"))));
	let elem = value.as_ref().and_then(Value::elem).expect("slice elem");
	assert!(elem.is_ptr);
	assert_eq!(elem.go_type.as_deref(), Some("uint8"));
	assert_eq!(value.and_then(|value| value.go_type), None);

	let (value, _) = walk(&TypeExpr::ident("Address"));
	assert_eq!(value.and_then(|value| value.go_type), None);
}

#[test]
fn other_identifier_yields_same_package_ref() {
	let (value, _) = walk(&TypeExpr::ident("Address"));
	let item = value.expect("ref resolves");
	let target = item.as_struct_ref().expect("struct ref");
	assert_eq!(&*target.package, PKG);
	assert_eq!(&*target.name, "Address");
}

#[test]
fn pointer_sets_sticky_flag() {
	let (value, _) = walk(&TypeExpr::star(TypeExpr::star(TypeExpr::ident("string"))));
	let value = value.expect("pointer resolves");
	assert!(value.is_ptr);
	assert_eq!(value.as_scalar(), Some(ScalarType::String));
}

#[test]
fn slice_of_pointer_to_named_struct() {
	let (value, _) = walk(&TypeExpr::slice(TypeExpr::star(TypeExpr::ident("Person"))));
	let value = value.expect("slice resolves");
	assert!(!value.is_ptr);
	let elem = value.elem().expect("array elem");
	assert!(elem.is_ptr);
	assert_eq!(elem.as_struct_ref().map(|item| item.key()), Some(format!("{PKG}.Person")));
}

#[test]
fn nested_slices_and_fixed_arrays() {
	let expr = TypeExpr::slice(TypeExpr::Array {
		len: Some("3".to_owned()),
		elem: Box::new(TypeExpr::star(TypeExpr::ident("Address"))),
	});
	let (value, _) = walk(&expr);
	let inner = value.as_ref().and_then(Value::elem).and_then(Value::elem).expect("two array levels");
	assert!(inner.is_ptr);
	assert_eq!(inner.as_struct_ref().map(|item| &*item.name), Some("Address"));
}

#[test]
fn map_with_scalar_key_and_nested_map_value() {
	let expr = TypeExpr::map(TypeExpr::ident("string"), TypeExpr::map(TypeExpr::ident("int"), TypeExpr::ident("bool")));
	let (value, _) = walk(&expr);
	let value = value.expect("map resolves");

	let ValueKind::Map { key, value: inner } = &value.kind else {
		panic!("expected map");
	};
	assert_eq!(*key, ScalarType::String);
	assert_eq!(**inner, Value::map(ScalarType::Number, Value::scalar(ScalarType::Bool)));
}

#[test]
fn map_with_named_key_uses_none() {
	let (value, sink) = walk(&TypeExpr::map(TypeExpr::ident("Color"), TypeExpr::ident("string")));
	assert!(matches!(value.expect("map resolves").kind, ValueKind::Map { key: ScalarType::None, .. }));
	assert!(sink.events.is_empty());
}

#[test]
fn map_with_composite_key_is_reported_and_kept() {
	let (value, sink) = walk(&TypeExpr::map(TypeExpr::star(TypeExpr::ident("Color")), TypeExpr::ident("string")));
	assert!(matches!(value.expect("map resolves").kind, ValueKind::Map { key: ScalarType::None, .. }));
	assert_eq!(
		sink.events,
		vec![Diagnostic::UnsupportedMapKey {
			field: "F".to_owned(),
			shape: "pointer",
		}]
	);
}

#[test]
fn qualified_identifier_resolves_through_imports() {
	let (value, sink) = walk(&TypeExpr::star(TypeExpr::qualified("nstd", "Nested")));
	let value = value.expect("selector resolves");
	assert!(value.is_ptr);
	assert_eq!(value.as_struct_ref().map(|item| item.key()), Some("example.com/demo/nested.Nested".to_owned()));
	assert!(sink.events.is_empty());
}

#[test]
fn unknown_alias_is_lenient() {
	let (value, sink) = walk(&TypeExpr::qualified("time", "Time"));
	let target = value.expect("selector still resolves");
	assert_eq!(target.as_struct_ref().map(|item| &*item.package), Some("time"));
	assert_eq!(
		sink.events,
		vec![Diagnostic::UnknownImport {
			field: "F".to_owned(),
			alias: "time".to_owned(),
		}]
	);
}

#[test]
fn selector_on_non_identifier_is_unresolved() {
	let expr = TypeExpr::Selector {
		x: Box::new(TypeExpr::star(TypeExpr::ident("pkg"))),
		sel: "T".to_owned(),
	};
	let (value, sink) = walk(&expr);
	assert!(value.is_none());
	assert!(matches!(&sink.events[..], [Diagnostic::UnsupportedSelector { sel, .. }] if sel == "T"));
}

#[test]
fn anonymous_struct_becomes_inline() {
	let expr = TypeExpr::star(TypeExpr::struct_of(vec![FieldDecl::new("Foo", TypeExpr::ident("bool")), FieldDecl::new("bar", TypeExpr::ident("int"))]));
	let (value, _) = walk(&expr);
	let value = value.expect("inline resolves");
	assert!(value.is_ptr);

	let ValueKind::InlineStruct(item) = &value.kind else {
		panic!("expected inline struct");
	};
	assert!(item.is_inline());
	assert_eq!(item.fields.len(), 1);
	assert_eq!(&*item.fields[0].name, "Foo");
}

#[test]
fn paren_is_transparent() {
	let (value, _) = walk(&TypeExpr::Paren(Box::new(TypeExpr::star(TypeExpr::ident("Address")))));
	assert!(value.expect("paren resolves").is_ptr);
}

#[test]
fn unsupported_shapes_are_reported() {
	for (expr, shape) in [(TypeExpr::Func, "func"), (TypeExpr::Interface, "interface"), (TypeExpr::Chan, "chan")] {
		let (value, sink) = walk(&expr);
		assert!(value.is_none());
		assert_eq!(sink.events, vec![Diagnostic::UnsupportedExpr { field: "F".to_owned(), shape }]);
	}
}

#[test]
fn unresolved_element_drops_the_container() {
	let (value, _) = walk(&TypeExpr::slice(TypeExpr::Interface));
	assert!(value.is_none());
	let (value, _) = walk(&TypeExpr::map(TypeExpr::ident("string"), TypeExpr::Func));
	assert!(value.is_none());
}

#[test]
fn read_fields_filters_before_looking_at_type_or_tag() {
	let decls = vec![
		FieldDecl::new("hidden", TypeExpr::Func).with_tag("`json:\"Hidden\"`"),
		FieldDecl::new("Name", TypeExpr::ident("string")).with_tag("`json:\"name,omitempty\"`"),
	];
	let (fields, sink) = read(&decls);

	assert_eq!(fields.len(), 1);
	assert_eq!(&*fields[0].name, "Name");
	let info = fields[0].json_info.as_ref().expect("tag parsed");
	assert_eq!(&*info.name, "name");
	assert!(info.omit_empty);
	assert!(sink.events.is_empty(), "private field must not be walked");
}

#[test]
fn read_fields_expands_multi_name_lines_and_skips_embedded() {
	let decls = vec![
		FieldDecl {
			names: vec!["X".to_owned(), "y".to_owned(), "Z".to_owned()],
			ty: TypeExpr::ident("float64"),
			tag: None,
		},
		FieldDecl {
			names: Vec::new(),
			ty: TypeExpr::ident("Base"),
			tag: None,
		},
		FieldDecl::new("Callback", TypeExpr::Func),
	];
	let (fields, sink) = read(&decls);

	let names: Vec<&str> = fields.iter().map(|field| &*field.name).collect();
	assert_eq!(names, ["X", "Z"]);
	assert!(fields.iter().all(|field| field.json_info.is_none()));
	assert_eq!(sink.problems().count(), 2);
	assert!(matches!(&sink.events[0], Diagnostic::EmbeddedField { owner } if owner == "example.com/demo.T"));
}

#[test]
fn read_fields_honours_custom_tag_key() {
	let imports = imports();
	let options = ReadOptions {
		tag_key: "msgpack".into(),
		..ReadOptions::default()
	};
	let mut sink = CollectTrace::default();
	let decls = vec![FieldDecl::new("City", TypeExpr::ident("string")).with_tag("`json:\"city\" msgpack:\"c\"`")];
	let fields = Walker::new(&imports, &options, &mut sink).read_fields("", &decls);

	assert_eq!(fields[0].json_info.as_ref().map(|info| &*info.name), Some("c"));
}

#[test]
fn escaped_tag_values_are_decoded() {
	let decls = vec![FieldDecl::new("Cafe", TypeExpr::ident("string")).with_tag(r#"`json:"café,omitempty"`"#)];
	let (fields, sink) = read(&decls);

	let info = fields[0].json_info.as_ref().expect("annotation kept");
	assert_eq!(info.name.as_ref(), "café");
	assert!(info.omit_empty);
	assert!(sink.events.is_empty());
}

#[test]
fn undecodable_tag_is_reported_and_field_kept() {
	let decls = vec![
		FieldDecl::new("Bad", TypeExpr::ident("string")).with_tag(r#"`json:"bad\q"`"#),
		FieldDecl::new("Worse", TypeExpr::ident("string")).with_tag(r#""json:\"x\" \z""#),
		FieldDecl::new("Plain", TypeExpr::ident("string")).with_tag(r#"`xml:"p"`"#),
	];
	let (fields, sink) = read(&decls);

	assert_eq!(fields.len(), 3);
	assert!(fields.iter().all(|field| field.json_info.is_none()));
	assert_eq!(
		sink.events,
		[
			Diagnostic::UndecodableTag {
				field: "Bad".to_owned(),
				tag: r#"`json:"bad\q"`"#.to_owned(),
			},
			Diagnostic::UndecodableTag {
				field: "Worse".to_owned(),
				tag: r#""json:\"x\" \z""#.to_owned(),
			},
		]
	);
}

#![allow(missing_docs)]

use std::process::{Command, Output};

use rpctypes_testkit::{DEMO_PACKAGE, DEMO_PATH, fixture_path};
use serde_json::Value;

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_rpctypes")).args(args).output().expect("command executes")
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args);
	assert!(
		output.status.success(),
		"rpctypes failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

#[test]
fn structs_json_contains_registry() {
	let fixture = fixture_path(DEMO_PACKAGE).display().to_string();
	let json = run_json(&["structs", &fixture, "--package", "demo", "--path", DEMO_PATH, "--json"]);

	assert_eq!(json["package"], DEMO_PATH);
	assert_eq!(json["count"], 6);
	let person = &json["structs"][format!("{DEMO_PATH}.Person")];
	assert_eq!(person["fields"][0]["name"], "Name");
	assert_eq!(person["fields"][0]["value"]["scalar"], "string");
	assert!(json["diagnostics"].as_array().is_some_and(Vec::is_empty));
}

#[test]
fn structs_json_filters_and_reports_diagnostics() {
	let fixture = fixture_path(DEMO_PACKAGE).display().to_string();
	let json = run_json(&["structs", &fixture, "--package", "demo", "--path", DEMO_PATH, "--struct", "Node", "--diagnostics", "--json"]);

	let structs = json["structs"].as_object().expect("structs object");
	assert_eq!(structs.len(), 1);
	assert!(json["diagnostics"].as_array().is_some_and(|items| items.iter().any(|item| item.as_str().is_some_and(|text| text.contains("chan")))));
}

#[test]
fn all_types_flag_registers_unexported() {
	let fixture = fixture_path(DEMO_PACKAGE).display().to_string();
	let json = run_json(&["structs", &fixture, "--package", "demo", "--path", DEMO_PATH, "--all-types", "--json"]);
	assert_eq!(json["count"], 7);
}

#[test]
fn missing_package_exits_with_error() {
	let fixture = fixture_path(DEMO_PACKAGE).display().to_string();
	let output = run(&["structs", &fixture, "--package", "nested"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("package not found: nested"));
}

#[test]
fn text_output_lists_fields_with_tags() {
	let fixture = fixture_path(DEMO_PACKAGE).display().to_string();
	let output = run(&["structs", &fixture, "--package", "demo", "--struct", "Address"]);
	assert!(output.status.success());

	let stdout = String::from_utf8_lossy(&output.stdout);
	assert!(stdout.contains("demo.Address"));
	assert!(stdout.contains("City\tstring\tjson:\"city,omitempty\""));
	assert!(stdout.contains("NestedPtr\t*github.com/foomo/gotsrpc/demo/nested.Nested"));
}

#[test]
fn call_rejects_invalid_argument_json_before_posting() {
	let output = run(&["call", "http://127.0.0.1:9", "/svc/", "Method", "--arg", "{not json"]);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("argument 0 is not valid json"));
}

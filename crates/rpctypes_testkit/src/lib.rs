//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

/// Fixture holding the parsed demo package.
pub const DEMO_PACKAGE: &str = "demo_package.json";

/// Import path the demo fixture is extracted under.
pub const DEMO_PATH: &str = "github.com/foomo/gotsrpc/demo";

/// Resolve the workspace root path.
pub fn workspace_root() -> PathBuf {
	let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
	manifest_dir
		.join("..")
		.join("..")
		.canonicalize()
		.unwrap_or_else(|_| manifest_dir.join("..").join(".."))
}

/// Resolve a fixture path under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	workspace_root().join("fixtures").join(name)
}

/// Read a fixture as untyped JSON.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let bytes = fs::read(&path).unwrap_or_else(|err| panic!("failed to read fixture {}: {err}", path.display()));
	serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("fixture {} is not valid json: {err}", path.display()))
}

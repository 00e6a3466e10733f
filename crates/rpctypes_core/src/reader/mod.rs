mod error;
mod imports;
mod model;
mod read;
mod registry;
mod syntax;
mod tag;
mod trace;
mod visibility;
mod walk;

/// Error and result aliases.
pub use error::{ReaderError, Result};
/// Per-file import alias resolution.
pub use imports::FileImports;
/// Extracted type model.
pub use model::{Field, JsonInfo, ScalarType, Struct, StructType, Value, ValueKind};
/// Package extraction entry points and options.
pub use read::{ReadOptions, read_package_structs, read_structs};
/// Struct arena and key index.
pub use registry::{Registry, StructId};
/// Parser-supplied declaration trees.
pub use syntax::{Decl, FieldDecl, File, ImportSpec, Package, ParsedDir, TypeExpr};
/// Field tag lookup and serialization-annotation parsing.
pub use tag::{TagLookup, find_tag, lookup_tag, parse_json_tag, tag_value};
/// Injected diagnostics sinks.
pub use trace::{CollectTrace, Diagnostic, NoTrace, Trace, TracingSink};
/// Exported-name filter.
pub use visibility::is_exported;
/// Single-expression conversion.
pub use walk::{Walker, scalar_type};

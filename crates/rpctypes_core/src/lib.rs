//! Public library API for extracting RPC type models from parsed Go-style packages.

/// JSON-over-HTTP call helper used by generated clients.
pub mod client;
/// Declaration input, expression walking, tag parsing, and struct registry.
pub mod reader;

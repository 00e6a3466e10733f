use thiserror::Error;

/// Crate-local result type for extraction.
pub type Result<T> = std::result::Result<T, ReaderError>;

/// Errors that abort a whole extraction call.
///
/// Structural problems inside declarations are never errors; they are reported to the
/// injected [`Trace`](crate::reader::Trace) sink and the offending member is omitted.
#[derive(Debug, Error)]
pub enum ReaderError {
	/// Filesystem or stream IO failure while loading a parsed document.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Parsed document was not valid JSON for the declaration schema.
	#[error("invalid parsed package document: {0}")]
	Json(#[from] serde_json::Error),
	/// Requested package is absent from the parsed directory.
	#[error("package not found: {name}")]
	PackageNotFound {
		/// Requested package name.
		name: String,
	},
}

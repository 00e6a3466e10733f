use thiserror::Error;

/// Result type for remote calls.
pub type Result<T> = std::result::Result<T, CallError>;

/// Errors that abort a remote call. None of them are retried.
#[derive(Debug, Error)]
pub enum CallError {
	/// An argument could not be marshaled; nothing was sent.
	#[error("marshal argument {index}: {source}")]
	Marshal {
		/// Position of the failing argument.
		index: usize,
		/// Serializer error.
		#[source]
		source: serde_json::Error,
	},
	/// Spawning or talking to the transport failed.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// The transport reported a failure before a response was received.
	#[error("transport: {message}")]
	Transport {
		/// Transport diagnostic text.
		message: String,
	},
	/// The raw response could not be split into status, headers, and body.
	#[error("malformed http response: {reason}")]
	MalformedResponse {
		/// What was wrong with the response.
		reason: &'static str,
	},
	/// The server answered with a status other than `200`.
	#[error("Error: {status}")]
	Status {
		/// Status code and reason, e.g. `404 Not Found`.
		status: String,
	},
	/// The response body was not a JSON array matching the reply slots.
	#[error("unmarshal reply: {0}")]
	Unmarshal(#[source] serde_json::Error),
}

mod call;
mod error;
mod transport;

/// Call builder and request encoding.
pub use call::{CONTENT_TYPE, Call, post_url, request_body};
/// Error and result aliases.
pub use error::{CallError, Result};
/// HTTP transport seam and the `curl` implementation.
pub use transport::{CurlTransport, HttpResponse, Transport, parse_http_response};

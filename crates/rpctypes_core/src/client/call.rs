use serde::Serialize;
use serde::de::{self, DeserializeOwned};

use crate::client::{CallError, Result, Transport};

/// Content type of every request.
pub const CONTENT_TYPE: &str = "application/json";

/// One remote method invocation.
///
/// Each argument is marshaled on its own as soon as it is added; the request body is the
/// comma-joined fragments inside `[` `]`.
#[derive(Debug, Clone)]
pub struct Call {
	url: String,
	fragments: Vec<String>,
}

impl Call {
	/// Start a call to `method` on the service mounted at `endpoint` of `url`.
	pub fn new(url: &str, endpoint: &str, method: &str) -> Self {
		Self {
			url: post_url(url, endpoint, method),
			fragments: Vec::new(),
		}
	}

	/// Marshal and append one argument.
	pub fn arg<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
		let index = self.fragments.len();
		let fragment = serde_json::to_string(value).map_err(|source| CallError::Marshal { index, source })?;
		self.fragments.push(fragment);
		Ok(self)
	}

	/// Target URL.
	pub fn url(&self) -> &str {
		&self.url
	}

	/// Request body as it will be posted.
	pub fn body(&self) -> String {
		request_body(&self.fragments)
	}

	/// Post the call and decode the reply array positionally into `R`, usually a tuple.
	///
	/// A non-200 status fails without looking at the body.
	pub fn send<R: DeserializeOwned>(&self, transport: &dyn Transport) -> Result<R> {
		let body = self.body();
		tracing::debug!(url = %self.url, args = self.fragments.len(), "posting call");

		let response = transport.post(&self.url, CONTENT_TYPE, body.as_bytes())?;
		if response.status != 200 {
			return Err(CallError::Status { status: response.status_line() });
		}

		let reply: serde_json::Value = serde_json::from_slice(&response.body).map_err(CallError::Unmarshal)?;
		if !reply.is_array() {
			return Err(CallError::Unmarshal(de::Error::custom("reply body is not a JSON array")));
		}
		serde_json::from_value(reply).map_err(CallError::Unmarshal)
	}
}

/// Join pre-serialized argument fragments into a JSON array body.
pub fn request_body(fragments: &[String]) -> String {
	format!("[{}]", fragments.join(","))
}

/// Concatenate base URL, endpoint path, and method name.
pub fn post_url(url: &str, endpoint: &str, method: &str) -> String {
	format!("{url}{endpoint}{method}")
}

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::client::{CallError, Result};

/// Blocking HTTP POST seam used by [`Call::send`](crate::client::Call::send).
pub trait Transport {
	/// Post `body` to `url` and return the final response.
	fn post(&self, url: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse>;
}

/// Final HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	/// Status code.
	pub status: u16,
	/// Reason phrase, possibly empty (HTTP/2).
	pub reason: String,
	/// Header lines in arrival order.
	pub headers: Vec<(String, String)>,
	/// Raw body bytes.
	pub body: Vec<u8>,
}

impl HttpResponse {
	/// Status rendered as `code reason`.
	pub fn status_line(&self) -> String {
		if self.reason.is_empty() {
			self.status.to_string()
		} else {
			format!("{} {}", self.status, self.reason)
		}
	}

	/// First header value matching `name`, case-insensitively.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.iter().find(|(key, _)| key.eq_ignore_ascii_case(name)).map(|(_, value)| value.as_str())
	}

	/// A proxy's `2xx` answer to `CONNECT`: no entity headers, the tunnelled response follows.
	fn is_connect_reply(&self) -> bool {
		(200..300).contains(&self.status)
			&& (self.reason.eq_ignore_ascii_case("connection established")
				|| ["content-length", "content-type", "transfer-encoding"].iter().all(|name| self.header(name).is_none()))
	}
}

/// Transport that shells out to `curl`.
#[derive(Debug, Clone)]
pub struct CurlTransport {
	/// Program to run.
	pub program: PathBuf,
	/// Optional whole-request timeout in seconds.
	pub max_time: Option<u32>,
}

impl Default for CurlTransport {
	fn default() -> Self {
		Self {
			program: PathBuf::from("curl"),
			max_time: None,
		}
	}
}

impl CurlTransport {
	fn command(&self, url: &str, content_type: &str) -> Command {
		let mut command = Command::new(&self.program);
		command
			.arg("--silent")
			.arg("--show-error")
			.arg("--include")
			.arg("--request")
			.arg("POST")
			.arg("--header")
			.arg(format!("Content-Type: {content_type}"))
			.arg("--header")
			.arg("Expect:")
			.arg("--data-binary")
			.arg("@-");
		if let Some(max_time) = self.max_time {
			command.arg("--max-time").arg(max_time.to_string());
		}
		command.arg(url);
		command
	}
}

impl Transport for CurlTransport {
	fn post(&self, url: &str, content_type: &str, body: &[u8]) -> Result<HttpResponse> {
		let child = self.command(url, content_type).stdin(Stdio::piped()).stdout(Stdio::piped()).stderr(Stdio::piped()).spawn();
		let mut child = match child {
			Ok(child) => child,
			Err(err) if err.kind() == io::ErrorKind::NotFound => {
				return Err(CallError::Transport {
					message: format!("`{}` is not available; install curl to make calls", self.program.display()),
				});
			}
			Err(err) => return Err(err.into()),
		};

		if let Some(mut stdin) = child.stdin.take()
			&& let Err(err) = stdin.write_all(body)
		{
			drop(stdin);
			let _ = child.kill();
			let _ = child.wait();
			return Err(err.into());
		}
		let output = child.wait_with_output()?;
		if !output.status.success() {
			let stderr = String::from_utf8_lossy(&output.stderr);
			let message = match stderr.trim() {
				"" => format!("curl exited with status {}", output.status),
				text => text.to_owned(),
			};
			return Err(CallError::Transport { message });
		}

		parse_http_response(&output.stdout)
	}
}

/// Split raw `--include` output into the final status, headers, and body.
///
/// Interim `1xx` blocks and a proxy's `CONNECT` reply are skipped. A missing reason phrase
/// (HTTP/2) is filled in from the status code.
pub fn parse_http_response(raw: &[u8]) -> Result<HttpResponse> {
	let mut rest = raw;
	loop {
		let (head, body) = split_head(rest).ok_or(CallError::MalformedResponse { reason: "missing header terminator" })?;
		let head = std::str::from_utf8(head).map_err(|_| CallError::MalformedResponse { reason: "header is not utf-8" })?;
		let mut lines = head.lines();

		let status_line = lines.next().ok_or(CallError::MalformedResponse { reason: "missing status line" })?;
		let mut parts = status_line.trim_end().splitn(3, ' ');
		let version = parts.next().unwrap_or_default();
		if !version.starts_with("HTTP/") {
			return Err(CallError::MalformedResponse { reason: "status line does not start with HTTP/" });
		}
		let status = parts
			.next()
			.and_then(|code| code.parse::<u16>().ok())
			.ok_or(CallError::MalformedResponse { reason: "invalid status code" })?;
		if (100..200).contains(&status) {
			rest = body;
			continue;
		}
		let reason = match parts.next().unwrap_or_default().trim() {
			"" => canonical_reason(status).to_owned(),
			text => text.to_owned(),
		};

		let headers: Vec<(String, String)> = lines
			.filter_map(|line| line.split_once(':'))
			.map(|(name, value)| (name.trim().to_owned(), value.trim().to_owned()))
			.collect();

		let response = HttpResponse {
			status,
			reason,
			headers,
			body: body.to_vec(),
		};
		if response.is_connect_reply() && body.starts_with(b"HTTP/") {
			rest = body;
			continue;
		}
		return Ok(response);
	}
}

/// Standard reason phrase of a status code, empty when unknown.
fn canonical_reason(status: u16) -> &'static str {
	match status {
		100 => "Continue",
		101 => "Switching Protocols",
		102 => "Processing",
		103 => "Early Hints",
		200 => "OK",
		201 => "Created",
		202 => "Accepted",
		203 => "Non-Authoritative Information",
		204 => "No Content",
		205 => "Reset Content",
		206 => "Partial Content",
		207 => "Multi-Status",
		208 => "Already Reported",
		226 => "IM Used",
		300 => "Multiple Choices",
		301 => "Moved Permanently",
		302 => "Found",
		303 => "See Other",
		304 => "Not Modified",
		305 => "Use Proxy",
		307 => "Temporary Redirect",
		308 => "Permanent Redirect",
		400 => "Bad Request",
		401 => "Unauthorized",
		402 => "Payment Required",
		403 => "Forbidden",
		404 => "Not Found",
		405 => "Method Not Allowed",
		406 => "Not Acceptable",
		407 => "Proxy Authentication Required",
		408 => "Request Timeout",
		409 => "Conflict",
		410 => "Gone",
		411 => "Length Required",
		412 => "Precondition Failed",
		413 => "Request Entity Too Large",
		414 => "Request URI Too Long",
		415 => "Unsupported Media Type",
		416 => "Requested Range Not Satisfiable",
		417 => "Expectation Failed",
		418 => "I'm a teapot",
		421 => "Misdirected Request",
		422 => "Unprocessable Entity",
		423 => "Locked",
		424 => "Failed Dependency",
		425 => "Too Early",
		426 => "Upgrade Required",
		428 => "Precondition Required",
		429 => "Too Many Requests",
		431 => "Request Header Fields Too Large",
		451 => "Unavailable For Legal Reasons",
		500 => "Internal Server Error",
		501 => "Not Implemented",
		502 => "Bad Gateway",
		503 => "Service Unavailable",
		504 => "Gateway Timeout",
		505 => "HTTP Version Not Supported",
		506 => "Variant Also Negotiates",
		507 => "Insufficient Storage",
		508 => "Loop Detected",
		510 => "Not Extended",
		511 => "Network Authentication Required",
		_ => "",
	}
}

fn split_head(raw: &[u8]) -> Option<(&[u8], &[u8])> {
	if let Some(at) = find(raw, b"\r\n\r\n") {
		return Some((&raw[..at], &raw[at + 4..]));
	}
	find(raw, b"\n\n").map(|at| (&raw[..at], &raw[at + 2..]))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	haystack.windows(needle.len()).position(|window| window == needle)
}

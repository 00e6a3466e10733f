use rpctypes::client::{Call, CurlTransport};

use crate::DynError;

#[derive(clap::Args)]
pub struct Args {
	/// Service base URL, e.g. `http://localhost:8080`.
	pub url: String,
	/// Endpoint path the service is mounted at, e.g. `/service/demo/`.
	pub endpoint: String,
	/// Method name.
	pub method: String,
	/// One JSON-encoded argument; repeat in call order.
	#[arg(long = "arg")]
	pub args: Vec<String>,
	/// Abort the request after this many seconds.
	#[arg(long = "max-time")]
	pub max_time: Option<u32>,
}

/// Post one call and print the reply slots as a JSON array.
pub fn run(args: Args) -> Result<(), DynError> {
	let Args {
		url,
		endpoint,
		method,
		args,
		max_time,
	} = args;

	let mut call = Call::new(&url, &endpoint, &method);
	for (index, raw) in args.iter().enumerate() {
		let value: serde_json::Value = serde_json::from_str(raw).map_err(|err| format!("argument {index} is not valid json: {err}"))?;
		call = call.arg(&value)?;
	}

	let transport = CurlTransport {
		max_time,
		..CurlTransport::default()
	};
	let reply: Vec<serde_json::Value> = call.send(&transport)?;

	println!("{}", serde_json::to_string_pretty(&reply)?);
	Ok(())
}

#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

type DynError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "rpctypes", about = "Extract RPC type models and call JSON services")]
struct Cli {
	/// Log extractor progress and diagnostics to stderr.
	#[arg(long, global = true)]
	trace: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Extract the struct registry of a parsed package document.
	Structs(cmd::structs::Args),
	/// Post one call to a JSON RPC endpoint and print the reply array.
	Call(cmd::call::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.trace);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> Result<(), DynError> {
	match command {
		Commands::Structs(args) => cmd::structs::run(args),
		Commands::Call(args) => cmd::call::run(args),
	}
}

/// Install a stderr subscriber when `--trace` or `RUST_LOG` asks for one.
fn init_tracing(trace: bool) {
	let filter = if trace {
		EnvFilter::new("rpctypes=trace")
	} else {
		match EnvFilter::try_from_default_env() {
			Ok(filter) => filter,
			Err(_) => return,
		}
	};

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).init();
}

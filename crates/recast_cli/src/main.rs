#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "recast", about = "Schema-directed record materialization")]
struct Cli {
	/// Log materializer activity at debug level.
	#[arg(long, short, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Materialize input data against a schema.
	Build(cmd::build::Args),
	/// Print the merged field list of one record.
	Fields(cmd::fields::Args),
	/// Validate a schema document.
	Check(cmd::check::Args),
}

fn main() {
	let cli = Cli::parse();
	init_tracing(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run(command: Commands) -> recast::record::Result<()> {
	match command {
		Commands::Build(args) => cmd::build::run(args),
		Commands::Fields(args) => cmd::fields::run(args),
		Commands::Check(args) => cmd::check::run(args),
	}
}

fn init_tracing(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
	};
	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

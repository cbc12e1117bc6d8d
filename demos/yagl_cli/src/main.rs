//! Thin demonstration binary for the `yagl` codec.
//!
//! Exercises `decode`/`encode`/`print`/`parse` directly against stdin/stdout
//! for manual inspection. Not a specified front-end: sprite-sheet and sound
//! blob I/O are collaborator concerns the core library leaves abstract, so
//! this binary only ever round-trips the container's own records and its V2
//! graphics section.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use yagl_internal::prelude::*;

#[derive(Parser)]
#[command(name = "yagl_cli")]
#[command(author = "yagl project")]
#[command(version = "0.1")]
#[command(about = "Round-trips a NewGRF-style binary package and its YAGL text form", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	/// Load debug/palette defaults from a TOML config file instead of flags
	#[arg(long, global = true, value_name = "CONFIG")]
	config: Option<PathBuf>,

	/// Enable debug-level logging of per-record progress
	#[arg(short, long, global = true)]
	verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a binary package into its YAGL text representation
	Decode {
		/// Binary input path (reads stdin if omitted)
		#[arg(value_name = "INPUT")]
		input: Option<PathBuf>,

		/// YAGL text output path (writes stdout if omitted)
		#[arg(short, long, value_name = "OUTPUT")]
		output: Option<PathBuf>,
	},

	/// Encode a YAGL text script back into its binary package
	Encode {
		/// YAGL text input path (reads stdin if omitted)
		#[arg(value_name = "INPUT")]
		input: Option<PathBuf>,

		/// Binary output path (writes stdout if omitted)
		#[arg(short, long, value_name = "OUTPUT")]
		output: Option<PathBuf>,
	},
}

fn main() -> ExitCode {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Decode { input, output } => handle_decode(input, output, &cli.config, cli.verbose),
		Commands::Encode { input, output } => handle_encode(input, output, &cli.config, cli.verbose),
	};

	match result {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			eprintln!("error: {err}");
			ExitCode::FAILURE
		}
	}
}

fn handle_decode(input: Option<PathBuf>, output: Option<PathBuf>, config: &Option<PathBuf>, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
	let bytes = read_input_bytes(&input)?;
	let ctx = resolve_context(config, verbose);

	let package = decode(&bytes, &ctx)?;
	log::debug!("decoded {} top-level record(s)", package.records.len());
	let text = print(&package, &ctx)?;

	write_output_text(&output, &text)
}

fn handle_encode(input: Option<PathBuf>, output: Option<PathBuf>, config: &Option<PathBuf>, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
	let text = read_input_text(&input)?;
	let ctx = resolve_context(config, verbose);

	let package = parse(&text, &ctx)?;
	log::debug!("parsed {} top-level record(s)", package.records.len());
	let bytes = encode(&package, &ctx)?;

	write_output_bytes(&output, &bytes)
}

fn resolve_context(config: &Option<PathBuf>, verbose: bool) -> Context {
	let mut ctx = match config {
		Some(path) => load_context(&path.to_string_lossy()).unwrap_or_default(),
		None => Context::default(),
	};
	if verbose {
		ctx.debug = true;
	}
	ctx
}

fn read_input_bytes(input: &Option<PathBuf>) -> io::Result<Vec<u8>> {
	match input {
		Some(path) => fs::read(path),
		None => {
			let mut buf = Vec::new();
			io::stdin().read_to_end(&mut buf)?;
			Ok(buf)
		}
	}
}

fn read_input_text(input: &Option<PathBuf>) -> io::Result<String> {
	match input {
		Some(path) => fs::read_to_string(path),
		None => {
			let mut buf = String::new();
			io::stdin().read_to_string(&mut buf)?;
			Ok(buf)
		}
	}
}

fn write_output_text(output: &Option<PathBuf>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
	match output {
		Some(path) => fs::write(path, text)?,
		None => io::stdout().write_all(text.as_bytes())?,
	}
	Ok(())
}

fn write_output_bytes(output: &Option<PathBuf>, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
	match output {
		Some(path) => fs::write(path, bytes)?,
		None => io::stdout().write_all(bytes)?,
	}
	Ok(())
}

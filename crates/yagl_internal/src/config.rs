//! Optional TOML-backed loader for [`yagl_core::Context`].
//!
//! The core codec never requires this: every entry point takes an explicit
//! `Context` value. This module exists for batch tools and the demo CLI that
//! want to read debug/palette defaults from a project-local config file instead
//! of wiring up their own `clap` flags for them.

use thiserror::Error;
use yagl_core::Context;

/// Errors loading a [`Context`] from a configuration source.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// The underlying `config` crate failed to build or deserialize the source.
	#[error("failed to load configuration: {0}")]
	Config(#[from] config::ConfigError),
}

/// Shape of the on-disk configuration file, deserialized by the `config` crate
/// and then converted into a [`Context`].
#[derive(Debug, Default, serde::Deserialize)]
struct ContextFile {
	debug: Option<bool>,
	default_palette: Option<u8>,
}

/// Loads a [`Context`] from a TOML file at `path`, falling back to
/// [`Context::default`] for any field the file omits.
pub fn load_context(path: &str) -> Result<Context, ConfigError> {
	let settings = config::Config::builder()
		.add_source(config::File::with_name(path).required(false))
		.build()?;

	let file: ContextFile = settings.try_deserialize().unwrap_or_default();

	let mut ctx = Context::default();
	if let Some(debug) = file.debug {
		ctx.debug = debug;
	}
	if let Some(palette) = file.default_palette {
		ctx.default_palette = palette;
	}
	Ok(ctx)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_file_yields_default_context() {
		let ctx = load_context("does-not-exist").expect("missing file is tolerated");
		assert_eq!(ctx, Context::default());
	}
}

//! Explicit, explicitly-passed configuration for the codec.
//!
//! The original implementation consults a process-wide command-line singleton for
//! its debug flag. This crate threads a [`Context`] value through every read,
//! write, print, and parse call instead; nothing in `yagl_core` reads global or
//! thread-local state.

/// Configuration threaded explicitly through decode/encode/print/parse.
///
/// `Context` carries nothing that changes the bytes a correct encode produces;
/// `debug` only gates extra `log::debug!` tracing, and `default_palette` is
/// consulted only by collaborators packing sprite sheets into PNGs, never by the
/// core codec itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
	/// Container format version recorded by the package's Action08 identity
	/// record. `0` until an Action08 has been read.
	pub format_version: u8,
	/// When set, subsystems log the record index and partial contents before
	/// surfacing an error.
	pub debug: bool,
	/// Default palette id handed to collaborators that pack palette-indexed
	/// sprites into PNGs. Unused by the core codec.
	pub default_palette: u8,
}

impl Default for Context {
	fn default() -> Self {
		Self {
			format_version: 0,
			debug: false,
			default_palette: 0,
		}
	}
}

impl Context {
	/// Creates a context with the given format version and default settings
	/// otherwise.
	pub fn with_format_version(format_version: u8) -> Self {
		Self {
			format_version,
			..Self::default()
		}
	}
}

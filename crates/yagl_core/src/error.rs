//! Error types for the codec.
//!
//! Each subsystem defines its own `thiserror`-derived enum; [`YaglError`]
//! aggregates all of them so that orchestrator-level callers can match on a
//! single type while subsystem code keeps precise, local error kinds.

use thiserror::Error;

use crate::chunk::ChunkError;
use crate::dispatch::DispatchError;
use crate::pixel::PixelError;
use crate::property::PropertyError;
use crate::record::RecordError;
use crate::stream::StreamError;
use crate::text::{LexError, ParseError};

/// Top-level error type returned by [`crate::decode`], [`crate::encode`],
/// [`crate::print`], and [`crate::parse`].
#[derive(Debug, Error)]
pub enum YaglError {
	/// A stream primitive ran out of input.
	#[error(transparent)]
	Stream(#[from] StreamError),

	/// The container framer encountered malformed framing.
	#[error(transparent)]
	Framer(#[from] FramerError),

	/// The record dispatcher could not classify a record.
	#[error(transparent)]
	Dispatch(#[from] DispatchError),

	/// A record variant failed to read, write, print, or parse itself.
	#[error(transparent)]
	Record(#[from] RecordError),

	/// A property descriptor failed to read, write, print, or parse a value.
	#[error(transparent)]
	Property(#[from] PropertyError),

	/// The chunk codec encountered malformed chunked sprite data.
	#[error(transparent)]
	Chunk(#[from] ChunkError),

	/// The pixel-format resolver saw an unrecognised compression flag combination.
	#[error(transparent)]
	Pixel(#[from] PixelError),

	/// The text tokeniser encountered an invalid token.
	#[error(transparent)]
	Lex(#[from] LexError),

	/// The text parser encountered an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Errors from the container framer (§4.6): header detection, record-length
/// framing, graphics-section framing.
#[derive(Debug, Error)]
pub enum FramerError {
	/// Declared record length did not match the bytes actually consumed.
	#[error("record length mismatch: declared {declared}, consumed {consumed}")]
	LengthMismatch {
		/// Length declared by the record's length prefix.
		declared: usize,
		/// Bytes actually consumed while reading the record body.
		consumed: usize,
	},

	/// The V2 identifier was present but did not match the expected magic.
	#[error("invalid V2 magic: {0:02X?}")]
	InvalidMagic([u8; 8]),

	/// The fixed record-counter pseudo-sprite immediately following a V2
	/// header did not carry the expected `0xFF` info byte.
	#[error("expected the V2 record counter's info byte (0xFF), found {0:#04X}")]
	MissingRecordCounter(u8),

	/// A record's body exceeded the length prefix width the container
	/// format allows (65535 bytes for V1's 16-bit prefix).
	#[error("record body of {length} bytes does not fit the container format's length prefix")]
	RecordTooLarge {
		/// The body length that overflowed the prefix width.
		length: usize,
	},

	/// Ran out of bytes while reading framing structure.
	#[error(transparent)]
	Stream(#[from] StreamError),
}

//! Resolves a sprite's compression-flag byte into a pixel layout.
//!
//! Mirrors the small flags-byte-to-enum resolvers used throughout the file
//! modules this crate grew out of (e.g. a `Compression` enum derived from a
//! single flags byte): one byte in, one small typed value out, no state.

use thiserror::Error;

/// Bit in the compression flag byte selecting the chunked (RLE) sprite
/// encoding over the flat block encoding.
pub const FLAG_CHUNKED: u8 = 0x08;
/// Bit selecting RGB channels (in addition to or instead of palette).
pub const FLAG_RGB: u8 = 0x02;
/// Bit selecting an alpha channel.
pub const FLAG_ALPHA: u8 = 0x04;
/// Bit selecting palette-indexed pixels.
pub const FLAG_PALETTE: u8 = 0x01;

/// Errors produced while resolving a pixel layout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PixelError {
	/// The compression flags did not match any known pixel layout.
	#[error("unrecognised pixel compression flags: {0:#04x}")]
	UnknownFlags(u8),
}

/// Resolved pixel layout for a sprite, derived from its compression flag byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelLayout {
	/// Bytes occupied by one pixel.
	pub bpp: usize,
	/// Byte offset within a pixel used for the chunk codec's transparency test.
	pub alpha_test_offset: usize,
	/// Whether the sprite payload uses the per-row chunk (RLE) encoding.
	pub chunked: bool,
}

impl PixelLayout {
	/// Resolves the pixel layout implied by a sprite's compression flag byte.
	///
	/// - palette only: `bpp=1, ato=0` (`0` is transparent)
	/// - RGB + alpha: `bpp=4, ato=3`
	/// - palette + RGB + alpha: `bpp=5, ato=3`
	/// - the chunked bit clear: the image is a flat `width * height * bpp` block
	pub fn from_flags(flags: u8) -> Result<Self, PixelError> {
		let chunked = flags & FLAG_CHUNKED != 0;
		let palette = flags & FLAG_PALETTE != 0;
		let rgb = flags & FLAG_RGB != 0;
		let alpha = flags & FLAG_ALPHA != 0;

		let (bpp, alpha_test_offset) = match (palette, rgb, alpha) {
			(true, false, false) => (1, 0),
			(false, true, true) => (4, 3),
			(true, true, true) => (5, 3),
			_ => return Err(PixelError::UnknownFlags(flags)),
		};

		Ok(Self {
			bpp,
			alpha_test_offset,
			chunked,
		})
	}

	/// Returns `true` when the byte at `alpha_test_offset` within `pixel`
	/// indicates a transparent pixel (zero).
	pub fn is_transparent(&self, pixel: &[u8]) -> bool {
		pixel[self.alpha_test_offset] == 0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn palette_only_layout() {
		let layout = PixelLayout::from_flags(FLAG_PALETTE | FLAG_CHUNKED).unwrap();
		assert_eq!(layout.bpp, 1);
		assert_eq!(layout.alpha_test_offset, 0);
		assert!(layout.chunked);
	}

	#[test]
	fn rgba_layout() {
		let layout = PixelLayout::from_flags(FLAG_RGB | FLAG_ALPHA).unwrap();
		assert_eq!(layout.bpp, 4);
		assert_eq!(layout.alpha_test_offset, 3);
		assert!(!layout.chunked);
	}

	#[test]
	fn palette_rgb_alpha_layout() {
		let layout = PixelLayout::from_flags(FLAG_PALETTE | FLAG_RGB | FLAG_ALPHA).unwrap();
		assert_eq!(layout.bpp, 5);
		assert_eq!(layout.alpha_test_offset, 3);
	}

	#[test]
	fn unknown_flags_error() {
		assert_eq!(
			PixelLayout::from_flags(0x00),
			Err(PixelError::UnknownFlags(0x00))
		);
	}
}

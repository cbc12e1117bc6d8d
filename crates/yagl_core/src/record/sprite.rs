//! The sprite-family records: real sprites (container-version dependent
//! framing), recolour tables, fake sprites, and sprite-id references
//! (§4.4).

use crate::chunk::{decode_image, encode_image, ChunkError};
use crate::pixel::{PixelError, PixelLayout};
use crate::stream::{read_i8, read_u16, read_u32, read_u8, write_i8, write_u16, write_u32, write_u8, StreamError};
use crate::text::{ParseError, TokenKind, TokenStream};
use thiserror::Error;

/// Errors raised while reading, writing, printing, or parsing a sprite
/// record.
#[derive(Debug, Error)]
pub enum SpriteError {
	/// A stream primitive ran out of input.
	#[error(transparent)]
	Stream(#[from] StreamError),
	/// The pixel layout byte was unrecognised.
	#[error(transparent)]
	Pixel(#[from] PixelError),
	/// The chunk codec failed.
	#[error(transparent)]
	Chunk(#[from] ChunkError),
	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// A real (graphical) sprite: dimensions, a pixel layout, and chunk-coded
/// pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RealSprite {
	/// Assigned sprite id this sprite is stored under.
	pub sprite_id: u32,
	/// Sprite width in pixels.
	pub width: u16,
	/// Sprite height in pixels.
	pub height: u16,
	/// X offset applied when the sprite is drawn.
	pub x_offset: i8,
	/// Y offset applied when the sprite is drawn.
	pub y_offset: i8,
	/// Raw pixel-format flag byte (bpp/alpha/chunked bits, §pixel).
	pub flags: u8,
	/// Decoded pixel bytes, `width * height * bpp` long, row-major.
	pub pixels: Vec<u8>,
}

impl RealSprite {
	/// Reads a V1-framed real sprite body: `sprite_id` has already been
	/// consumed by the caller (the v1 container inlines sprites directly
	/// in the record stream, keyed by the preceding id).
	pub fn read(bytes: &[u8], sprite_id: u32) -> Result<Self, SpriteError> {
		let mut offset = 0;
		let (flags, n) = read_u8(bytes, offset)?;
		offset += n;
		let (width, n) = read_u16(bytes, offset)?;
		offset += n;
		let (height, n) = read_u16(bytes, offset)?;
		offset += n;
		let (x_offset, n) = read_i8(bytes, offset)?;
		offset += n;
		let (y_offset, n) = read_i8(bytes, offset)?;
		offset += n;

		let layout = PixelLayout::from_flags(flags)?;
		let pixels = if layout.chunked {
			decode_image(&bytes[offset..], width, height, layout.bpp)?
		} else {
			let expected = usize::from(width) * usize::from(height) * usize::from(layout.bpp);
			bytes.get(offset..offset + expected).ok_or(StreamError::Eof { offset, needed: expected, available: bytes.len().saturating_sub(offset) })?.to_vec()
		};

		Ok(Self { sprite_id, width, height, x_offset, y_offset, flags, pixels })
	}

	/// Writes this sprite's body, not including the leading `sprite_id`
	/// the v1 container frames it with.
	pub fn write(&self) -> Result<Vec<u8>, SpriteError> {
		let mut out = Vec::new();
		write_u8(&mut out, self.flags);
		write_u16(&mut out, self.width);
		write_u16(&mut out, self.height);
		write_i8(&mut out, self.x_offset);
		write_i8(&mut out, self.y_offset);

		let layout = PixelLayout::from_flags(self.flags)?;
		if layout.chunked {
			out.extend(encode_image(&self.pixels, self.width, self.height, layout.bpp, layout.alpha_test_offset));
		} else {
			out.extend_from_slice(&self.pixels);
		}
		Ok(out)
	}

	/// Renders `RealSprite { sprite_id: ...; width: ...; ...; pixels: [ .. ]; }`.
	///
	/// Pixel bytes are printed flat (not chunk-decoded into a grid); the
	/// binary chunk codec is reapplied uniformly on `write`.
	pub fn print(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str("RealSprite\n");
		crate::text::pad(&mut out, indent);
		out.push_str("{\n");
		let field = |out: &mut String, name: &str, value: String| {
			crate::text::pad(out, indent + 4);
			out.push_str(&format!("{name}: {value};\n"));
		};
		field(&mut out, "sprite_id", format!("{:#X}", self.sprite_id));
		field(&mut out, "width", self.width.to_string());
		field(&mut out, "height", self.height.to_string());
		field(&mut out, "x_offset", self.x_offset.to_string());
		field(&mut out, "y_offset", self.y_offset.to_string());
		field(&mut out, "flags", format!("{:#X}", self.flags));
		let pixels = self.pixels.iter().map(|b| format!("{b:#04X}")).collect::<Vec<_>>().join(", ");
		field(&mut out, "pixels", format!("[ {pixels} ]"));
		crate::text::pad(&mut out, indent);
		out.push_str("}\n");
		out
	}

	/// Parses a `RealSprite { ... }` block. The leading keyword must
	/// already be consumed by the caller.
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, SpriteError> {
		tokens.expect(TokenKind::OpenBrace)?;
		let mut sprite_id = 0u32;
		let mut width = 0u16;
		let mut height = 0u16;
		let mut x_offset = 0i8;
		let mut y_offset = 0i8;
		let mut flags = 0u8;
		let mut pixels = Vec::new();

		while tokens.peek().kind != TokenKind::CloseBrace {
			let field = tokens.match_ident()?;
			tokens.expect(TokenKind::Colon)?;
			match field.as_str() {
				"sprite_id" => sprite_id = tokens.match_integer()? as u32,
				"width" => width = tokens.match_integer()? as u16,
				"height" => height = tokens.match_integer()? as u16,
				"x_offset" => x_offset = tokens.match_integer()? as i8,
				"y_offset" => y_offset = tokens.match_integer()? as i8,
				"flags" => flags = tokens.match_integer()? as u8,
				"pixels" => {
					tokens.expect(TokenKind::OpenBracket)?;
					if tokens.peek().kind != TokenKind::CloseBracket {
						loop {
							pixels.push(tokens.match_integer()? as u8);
							if !tokens.eat(&TokenKind::Comma) {
								break;
							}
						}
					}
					tokens.expect(TokenKind::CloseBracket)?;
				}
				_ => {
					return Err(ParseError::Unexpected {
						expected: "known RealSprite field".into(),
						found: tokens.peek().kind.clone(),
						line: tokens.peek().line,
						column: tokens.peek().column,
					}
					.into())
				}
			}
			let _ = tokens.eat(&TokenKind::SemiColon);
		}
		tokens.expect(TokenKind::CloseBrace)?;
		Ok(Self { sprite_id, width, height, x_offset, y_offset, flags, pixels })
	}
}

/// A 256-entry palette recolour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecolourTable {
	/// Replacement palette index for each of the 256 source indices.
	pub table: Vec<u8>,
}

impl RecolourTable {
	/// Reads the fixed 256-byte table.
	pub fn read(bytes: &[u8]) -> Result<Self, SpriteError> {
		let slice = bytes.get(0..256).ok_or(StreamError::Eof { offset: 0, needed: 256, available: bytes.len() })?;
		Ok(Self { table: slice.to_vec() })
	}

	/// Writes the 256-byte table back out.
	pub fn write(&self) -> Vec<u8> {
		self.table.clone()
	}

	/// Renders the table as a flat 256-entry array.
	pub fn print(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str("RecolourTable [ ");
		out.push_str(&self.table.iter().map(|b| format!("{b:#04X}")).collect::<Vec<_>>().join(", "));
		out.push_str(" ];\n");
		out
	}

	/// Parses a flat `[ ... ]` list of exactly 256 entries.
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, SpriteError> {
		tokens.expect(TokenKind::OpenBracket)?;
		let mut table = Vec::with_capacity(256);
		if tokens.peek().kind != TokenKind::CloseBracket {
			loop {
				table.push(tokens.match_integer()? as u8);
				if !tokens.eat(&TokenKind::Comma) {
					break;
				}
			}
		}
		tokens.expect(TokenKind::CloseBracket)?;
		let _ = tokens.eat(&TokenKind::SemiColon);
		Ok(Self { table })
	}
}

/// A zero-length placeholder sprite, used where a container expects a
/// child slot to exist but carry no pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FakeSprite;

impl FakeSprite {
	/// Renders the bare `FakeSprite;` marker.
	pub fn print(indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str("FakeSprite;\n");
		out
	}
}

/// A V1-container reference to a sprite stored in the package's sprite-id
/// map, resolved by the orchestrator when writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteIndex {
	/// The referenced sprite's id.
	pub sprite_id: u32,
}

impl SpriteIndex {
	/// Reads a 32-bit sprite id.
	pub fn read(bytes: &[u8]) -> Result<Self, SpriteError> {
		let (sprite_id, _) = read_u32(bytes, 0)?;
		Ok(Self { sprite_id })
	}

	/// Writes the 32-bit sprite id.
	pub fn write(&self) -> Vec<u8> {
		let mut out = Vec::new();
		write_u32(&mut out, self.sprite_id);
		out
	}

	/// Renders `SpriteIndex { sprite_id: 0xNN; }`.
	pub fn print(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str(&format!("SpriteIndex {{ sprite_id: {:#X}; }}\n", self.sprite_id));
		out
	}

	/// Parses `{ sprite_id: 0xNN; }`.
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, SpriteError> {
		tokens.expect(TokenKind::OpenBrace)?;
		tokens.expect(TokenKind::Ident("sprite_id".to_string()))?;
		tokens.expect(TokenKind::Colon)?;
		let sprite_id = tokens.match_integer()? as u32;
		let _ = tokens.eat(&TokenKind::SemiColon);
		tokens.expect(TokenKind::CloseBrace)?;
		Ok(Self { sprite_id })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn real_sprite_round_trips_uncompressed() {
		let sprite = RealSprite { sprite_id: 1, width: 2, height: 1, x_offset: -1, y_offset: 3, flags: 0x01, pixels: vec![5, 6] };
		let bytes = sprite.write().unwrap();
		let decoded = RealSprite::read(&bytes, 1).unwrap();
		assert_eq!(decoded, sprite);
	}

	#[test]
	fn real_sprite_round_trips_chunked() {
		let sprite = RealSprite { sprite_id: 7, width: 3, height: 1, x_offset: 0, y_offset: 0, flags: 0x09, pixels: vec![0, 9, 0] };
		let bytes = sprite.write().unwrap();
		let decoded = RealSprite::read(&bytes, 7).unwrap();
		assert_eq!(decoded.pixels, sprite.pixels);
	}

	#[test]
	fn real_sprite_text_round_trips() {
		let sprite = RealSprite { sprite_id: 1, width: 2, height: 1, x_offset: -1, y_offset: 3, flags: 0x01, pixels: vec![5, 6] };
		let printed = sprite.print(0);
		let mut tokens = TokenStream::new(printed.trim_start_matches("RealSprite")).unwrap();
		let parsed = RealSprite::parse(&mut tokens).unwrap();
		assert_eq!(parsed, sprite);
	}

	#[test]
	fn recolour_table_round_trips() {
		let table = RecolourTable { table: (0..256u16).map(|v| v as u8).collect() };
		let bytes = table.write();
		assert_eq!(bytes.len(), 256);
		let decoded = RecolourTable::read(&bytes).unwrap();
		assert_eq!(decoded, table);
	}

	#[test]
	fn sprite_index_round_trips() {
		let index = SpriteIndex { sprite_id: 0xABCD };
		let bytes = index.write();
		assert_eq!(SpriteIndex::read(&bytes).unwrap(), index);
	}
}

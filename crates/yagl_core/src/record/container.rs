//! Container action kinds (Action01/05/0A/11/12): records whose body is
//! purely a header declaring how many child records follow (§4.4).
//!
//! Action0A's header is grounded directly on `Action0ARecord.h`'s
//! `m_sets: Vec<SpriteSet{num_sprites, first_sprite}>`; the other four
//! kinds have no retrieved C++ source, so they share a single simplified
//! header shape (one id/type byte plus an extended-byte sprite count),
//! the single-set case `Action0ARecord.h` itself reduces to.

use crate::stream::{read_extended_byte, read_u16, read_u8, write_extended_byte, write_u16, write_u8, StreamError};
use crate::text::{ParseError, TokenKind, TokenStream};
use thiserror::Error;

/// Errors specific to a container record's own header framing.
#[derive(Debug, Error)]
pub enum ContainerError {
	/// A stream primitive ran out of input.
	#[error(transparent)]
	Stream(#[from] StreamError),
	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// Which container action this record's header was read as; controls the
/// header's wire shape and its print/parse keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
	/// Action01: defines a set of real-sprite replacements for a feature.
	Action01,
	/// Action05: defines a set of replacement sprites for a fixed UI block.
	Action05,
	/// Action0A: defines one or more named sprite sets.
	Action0A,
	/// Action11: defines a set of replacement sound effects.
	Action11,
	/// Action12: defines font glyph sets.
	Action12,
}

impl ContainerKind {
	/// The action byte this kind reads/writes as.
	pub fn action_byte(self) -> u8 {
		match self {
			Self::Action01 => 0x01,
			Self::Action05 => 0x05,
			Self::Action0A => 0x0A,
			Self::Action11 => 0x11,
			Self::Action12 => 0x12,
		}
	}

	/// Stable text keyword for this kind.
	pub fn name(self) -> &'static str {
		match self {
			Self::Action01 => "Action01",
			Self::Action05 => "Action05",
			Self::Action0A => "Action0A",
			Self::Action11 => "Action11",
			Self::Action12 => "Action12",
		}
	}
}

/// One named sprite set within an Action0A header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSet {
	/// Number of consecutive child records this set claims.
	pub num_sprites: u8,
	/// Id of the first sprite in this set.
	pub first_sprite: u16,
}

/// A container record's header, parameterised by [`ContainerKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerHeader {
	/// Action01/05/11: a single id/type byte and one sprite count.
	Single {
		/// Feature, UI-block, or type id this set replaces.
		id: u8,
		/// Number of child records this set claims.
		num_sprites: u16,
	},
	/// Action0A: one or more named sprite sets.
	Sets(Vec<SpriteSet>),
	/// Action12: one or more font glyph sets.
	FontSets(Vec<FontSet>),
}

/// One font glyph set within an Action12 header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontSet {
	/// Font size this set provides glyphs for.
	pub font_size: u8,
	/// Number of consecutive glyph sprites this set claims.
	pub num_chars: u8,
	/// Character code of the first glyph in this set.
	pub base_char: u16,
}

/// A container action record: kind, header, and the decoded children the
/// grouping engine attached after reading the header's declared count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
	/// Which container action this is.
	pub kind: ContainerKind,
	/// The parsed header.
	pub header: ContainerHeader,
}

impl ContainerRecord {
	/// Reads a container header for `kind` from `bytes` (everything after
	/// the action byte).
	pub fn read(kind: ContainerKind, bytes: &[u8]) -> Result<Self, ContainerError> {
		let mut offset = 0;
		let header = match kind {
			ContainerKind::Action0A => {
				let (num_sets, n) = read_u8(bytes, offset)?;
				offset += n;
				let mut sets = Vec::with_capacity(num_sets.into());
				for _ in 0..num_sets {
					let (num_sprites, n) = read_u8(bytes, offset)?;
					offset += n;
					let (first_sprite, n) = read_u16(bytes, offset)?;
					offset += n;
					sets.push(SpriteSet { num_sprites, first_sprite });
				}
				ContainerHeader::Sets(sets)
			}
			ContainerKind::Action12 => {
				let (num_sets, n) = read_u8(bytes, offset)?;
				offset += n;
				let mut sets = Vec::with_capacity(num_sets.into());
				for _ in 0..num_sets {
					let (font_size, n) = read_u8(bytes, offset)?;
					offset += n;
					let (num_chars, n) = read_u8(bytes, offset)?;
					offset += n;
					let (base_char, n) = read_extended_byte(bytes, offset)?;
					offset += n;
					sets.push(FontSet { font_size, num_chars, base_char });
				}
				ContainerHeader::FontSets(sets)
			}
			ContainerKind::Action01 | ContainerKind::Action05 | ContainerKind::Action11 => {
				let (id, n) = read_u8(bytes, offset)?;
				offset += n;
				let (num_sprites, n) = read_extended_byte(bytes, offset)?;
				offset += n;
				ContainerHeader::Single { id, num_sprites }
			}
		};
		Ok(Self { kind, header })
	}

	/// Writes this record's header back out.
	pub fn write(&self) -> Vec<u8> {
		let mut out = Vec::new();
		match &self.header {
			ContainerHeader::Single { id, num_sprites } => {
				write_u8(&mut out, *id);
				write_extended_byte(&mut out, *num_sprites);
			}
			ContainerHeader::Sets(sets) => {
				write_u8(&mut out, sets.len() as u8);
				for set in sets {
					write_u8(&mut out, set.num_sprites);
					write_u16(&mut out, set.first_sprite);
				}
			}
			ContainerHeader::FontSets(sets) => {
				write_u8(&mut out, sets.len() as u8);
				for set in sets {
					write_u8(&mut out, set.font_size);
					write_u8(&mut out, set.num_chars);
					write_extended_byte(&mut out, set.base_char);
				}
			}
		}
		out
	}

	/// Total number of child records the header declares; the grouping
	/// engine reads this many records off the stream and attaches them.
	pub fn num_children(&self) -> u32 {
		match &self.header {
			ContainerHeader::Single { num_sprites, .. } => u32::from(*num_sprites),
			ContainerHeader::Sets(sets) => sets.iter().map(|s| u32::from(s.num_sprites)).sum(),
			ContainerHeader::FontSets(sets) => sets.iter().map(|s| u32::from(s.num_chars)).sum(),
		}
	}

	/// Renders this header; `num_children` real children are printed by
	/// the caller immediately after, inside the same braces.
	pub fn print_header(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str(self.kind.name());
		out.push('\n');
		crate::text::pad(&mut out, indent);
		out.push_str("{\n");
		match &self.header {
			ContainerHeader::Single { id, num_sprites } => {
				crate::text::pad(&mut out, indent + 4);
				out.push_str(&format!("id: {id:#X};\n"));
				crate::text::pad(&mut out, indent + 4);
				out.push_str(&format!("num_sprites: {num_sprites};\n"));
			}
			ContainerHeader::Sets(sets) => {
				for set in sets {
					crate::text::pad(&mut out, indent + 4);
					out.push_str(&format!("set {{ num_sprites: {}; first_sprite: {:#X}; }}\n", set.num_sprites, set.first_sprite));
				}
			}
			ContainerHeader::FontSets(sets) => {
				for set in sets {
					crate::text::pad(&mut out, indent + 4);
					out.push_str(&format!("set {{ font_size: {}; num_chars: {}; base_char: {:#X}; }}\n", set.font_size, set.num_chars, set.base_char));
				}
			}
		}
		out
	}

	/// Parses a header of the given `kind`; the caller is responsible for
	/// the trailing `}` that closes over the children it reads next.
	pub fn parse_header(kind: ContainerKind, tokens: &mut TokenStream) -> Result<Self, ContainerError> {
		tokens.expect(TokenKind::OpenBrace)?;
		let header = match kind {
			ContainerKind::Action0A => {
				let mut sets = Vec::new();
				while tokens.peek().kind == TokenKind::Ident("set".to_string()) {
					tokens.bump_set_keyword()?;
					tokens.expect(TokenKind::OpenBrace)?;
					tokens.expect(TokenKind::Ident("num_sprites".to_string()))?;
					tokens.expect(TokenKind::Colon)?;
					let num_sprites = tokens.match_integer()? as u8;
					let _ = tokens.eat(&TokenKind::SemiColon);
					tokens.expect(TokenKind::Ident("first_sprite".to_string()))?;
					tokens.expect(TokenKind::Colon)?;
					let first_sprite = tokens.match_integer()? as u16;
					let _ = tokens.eat(&TokenKind::SemiColon);
					tokens.expect(TokenKind::CloseBrace)?;
					sets.push(SpriteSet { num_sprites, first_sprite });
				}
				ContainerHeader::Sets(sets)
			}
			ContainerKind::Action12 => {
				let mut sets = Vec::new();
				while tokens.peek().kind == TokenKind::Ident("set".to_string()) {
					tokens.bump_set_keyword()?;
					tokens.expect(TokenKind::OpenBrace)?;
					tokens.expect(TokenKind::Ident("font_size".to_string()))?;
					tokens.expect(TokenKind::Colon)?;
					let font_size = tokens.match_integer()? as u8;
					let _ = tokens.eat(&TokenKind::SemiColon);
					tokens.expect(TokenKind::Ident("num_chars".to_string()))?;
					tokens.expect(TokenKind::Colon)?;
					let num_chars = tokens.match_integer()? as u8;
					let _ = tokens.eat(&TokenKind::SemiColon);
					tokens.expect(TokenKind::Ident("base_char".to_string()))?;
					tokens.expect(TokenKind::Colon)?;
					let base_char = tokens.match_integer()? as u16;
					let _ = tokens.eat(&TokenKind::SemiColon);
					tokens.expect(TokenKind::CloseBrace)?;
					sets.push(FontSet { font_size, num_chars, base_char });
				}
				ContainerHeader::FontSets(sets)
			}
			ContainerKind::Action01 | ContainerKind::Action05 | ContainerKind::Action11 => {
				tokens.expect(TokenKind::Ident("id".to_string()))?;
				tokens.expect(TokenKind::Colon)?;
				let id = tokens.match_integer()? as u8;
				let _ = tokens.eat(&TokenKind::SemiColon);
				tokens.expect(TokenKind::Ident("num_sprites".to_string()))?;
				tokens.expect(TokenKind::Colon)?;
				let num_sprites = tokens.match_integer()? as u16;
				let _ = tokens.eat(&TokenKind::SemiColon);
				ContainerHeader::Single { id, num_sprites }
			}
		};
		Ok(Self { kind, header })
	}
}

trait BumpSetKeyword {
	fn bump_set_keyword(&mut self) -> Result<(), ParseError>;
}

impl BumpSetKeyword for TokenStream {
	fn bump_set_keyword(&mut self) -> Result<(), ParseError> {
		self.expect_ident("set")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn action01_single_header_round_trips() {
		let bytes = [0x07, 0x02];
		let record = ContainerRecord::read(ContainerKind::Action01, &bytes).unwrap();
		assert_eq!(record.num_children(), 2);
		assert_eq!(record.write(), bytes);
	}

	#[test]
	fn action0a_sets_header_round_trips() {
		let bytes = [
			0x02, // 2 sets
			0x03, 0x00, 0x10, // set 0: 3 sprites, first_sprite=0x1000
			0x01, 0x00, 0x20, // set 1: 1 sprite, first_sprite=0x2000
		];
		let record = ContainerRecord::read(ContainerKind::Action0A, &bytes).unwrap();
		assert_eq!(record.num_children(), 4);
		assert_eq!(record.write(), bytes);
	}

	#[test]
	fn action0a_text_round_trips() {
		let bytes = [0x01, 0x03, 0x00, 0x10];
		let record = ContainerRecord::read(ContainerKind::Action0A, &bytes).unwrap();
		let printed = record.print_header(0);
		let mut tokens = TokenStream::new(printed.trim_start_matches("Action0A")).unwrap();
		let parsed = ContainerRecord::parse_header(ContainerKind::Action0A, &mut tokens).unwrap();
		assert_eq!(parsed.write(), bytes);
	}
}

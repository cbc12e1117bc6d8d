//! The record family: a tagged union over every NewGRF record kind (§4.3,
//! §9).
//!
//! The C++ source models each record kind as a subclass of a shared
//! `Record` base with virtual `read`/`write`/`print`/`parse`. This crate
//! keeps the same four-operation capability set but represents the closed
//! set of kinds as a plain enum matched on, rather than a class hierarchy:
//! the set of record kinds is fixed by the format, so an enum is
//! exhaustive where a trait object would need a fallback arm anyway.

mod action00;
mod action08;
mod container;
mod opaque;
mod sprite;

pub use action00::{Action00, Action00Error};
pub use action08::{Action08, Action08Error};
pub use container::{ContainerError, ContainerHeader, ContainerKind, ContainerRecord, FontSet, SpriteSet};
pub use opaque::OpaqueAction;
pub use sprite::{FakeSprite, RealSprite, RecolourTable, SpriteError, SpriteIndex};

use crate::text::{ParseError, TokenKind, TokenStream};
use thiserror::Error;

/// Errors raised while reading, writing, printing, or parsing any record.
#[derive(Debug, Error)]
pub enum RecordError {
	/// An Action00 record failed its own operation.
	#[error(transparent)]
	Action00(#[from] Action00Error),
	/// An Action08 record failed its own operation.
	#[error(transparent)]
	Action08(#[from] Action08Error),
	/// A container record failed its own operation.
	#[error(transparent)]
	Container(#[from] ContainerError),
	/// A sprite-family record failed its own operation.
	#[error(transparent)]
	Sprite(#[from] SpriteError),
	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// The keyword at the start of a text record did not name a known kind.
	#[error("unknown record keyword {0:?}")]
	UnknownKeyword(String),
}

/// Every record kind this crate's closed tagged union distinguishes
/// (§4.3/§4.4). Kinds without a full field-level schema are carried by
/// [`Record::Opaque`] tagged with the matching [`RecordKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
	/// `0x00`: defines new properties for feature instances.
	Action00,
	/// `0x01`: real-sprite replacement set.
	Action01,
	/// `0x02`: sprite layout / variational / random-switch definitions.
	Action02,
	/// `0x03`: associates actions with vehicles/features (callback graph).
	Action03,
	/// `0x04`: sets vehicle/feature display names.
	Action04,
	/// `0x05`: replacement sprites for a fixed UI block.
	Action05,
	/// `0x06`: patches a preceding real sprite's properties.
	Action06,
	/// `0x07`: conditionally skips following sprites.
	Action07,
	/// `0x08`: GRF identity (version, id, name).
	Action08,
	/// `0x09`: conditionally skips following sprites based on GRF params.
	Action09,
	/// `0x0A`: named sprite sets.
	Action0A,
	/// `0x0B`: error/warning message display.
	Action0B,
	/// `0x0C`: a comment block, ignored by the game.
	Action0C,
	/// `0x0D`: sets/reads GRF configuration parameters.
	Action0D,
	/// `0x0E`: GRF dependency/compatibility table.
	Action0E,
	/// `0x0F`: town name generation rules.
	Action0F,
	/// `0x10`: sets up Action06/Action0D label targets.
	Action10,
	/// `0x11`: replacement sound effects.
	Action11,
	/// `0x12`: font glyph sets.
	Action12,
	/// `0x13`: translated string table.
	Action13,
	/// `0x14`: extended/feature-test metadata block.
	Action14,
	/// `0xFE`: reserved for sound-effect definitions.
	ActionFE,
	/// `0xFF`: reserved for binary sound-data blobs.
	ActionFF,
	/// A 256-entry palette recolour table.
	RecolourTable,
	/// A v1-container reference to a sprite held in the package's sprite map.
	SpriteIndex,
	/// A real (graphical) sprite.
	RealSprite,
	/// A zero-length placeholder sprite.
	FakeSprite,
}

impl RecordKind {
	/// The action byte this kind is introduced by, when it is a
	/// pseudo-sprite action (`None` for the sprite-family kinds, which the
	/// framer distinguishes by info byte instead).
	pub fn action_byte(self) -> Option<u8> {
		match self {
			Self::Action00 => Some(0x00),
			Self::Action01 => Some(0x01),
			Self::Action02 => Some(0x02),
			Self::Action03 => Some(0x03),
			Self::Action04 => Some(0x04),
			Self::Action05 => Some(0x05),
			Self::Action06 => Some(0x06),
			Self::Action07 => Some(0x07),
			Self::Action08 => Some(0x08),
			Self::Action09 => Some(0x09),
			Self::Action0A => Some(0x0A),
			Self::Action0B => Some(0x0B),
			Self::Action0C => Some(0x0C),
			Self::Action0D => Some(0x0D),
			Self::Action0E => Some(0x0E),
			Self::Action0F => Some(0x0F),
			Self::Action10 => Some(0x10),
			Self::Action11 => Some(0x11),
			Self::Action12 => Some(0x12),
			Self::Action13 => Some(0x13),
			Self::Action14 => Some(0x14),
			Self::ActionFE => Some(0xFE),
			Self::ActionFF => Some(0xFF),
			Self::RecolourTable | Self::SpriteIndex | Self::RealSprite | Self::FakeSprite => None,
		}
	}

	/// Resolves the container variant's kind, if this kind is one.
	fn container_kind(self) -> Option<ContainerKind> {
		match self {
			Self::Action01 => Some(ContainerKind::Action01),
			Self::Action05 => Some(ContainerKind::Action05),
			Self::Action0A => Some(ContainerKind::Action0A),
			Self::Action11 => Some(ContainerKind::Action11),
			Self::Action12 => Some(ContainerKind::Action12),
			_ => None,
		}
	}

	/// Stable text keyword used for this kind's print/parse form.
	pub fn name(self) -> &'static str {
		match self {
			Self::Action00 => "Action00",
			Self::Action01 => "Action01",
			Self::Action02 => "Action02",
			Self::Action03 => "Action03",
			Self::Action04 => "Action04",
			Self::Action05 => "Action05",
			Self::Action06 => "Action06",
			Self::Action07 => "Action07",
			Self::Action08 => "Action08",
			Self::Action09 => "Action09",
			Self::Action0A => "Action0A",
			Self::Action0B => "Action0B",
			Self::Action0C => "Action0C",
			Self::Action0D => "Action0D",
			Self::Action0E => "Action0E",
			Self::Action0F => "Action0F",
			Self::Action10 => "Action10",
			Self::Action11 => "Action11",
			Self::Action12 => "Action12",
			Self::Action13 => "Action13",
			Self::Action14 => "Action14",
			Self::ActionFE => "ActionFE",
			Self::ActionFF => "ActionFF",
			Self::RecolourTable => "RecolourTable",
			Self::SpriteIndex => "SpriteIndex",
			Self::RealSprite => "RealSprite",
			Self::FakeSprite => "FakeSprite",
		}
	}
}

/// A single decoded record, plus (for container kinds) the children the
/// grouping engine has attached to it.
///
/// Does not derive `PartialEq`/`Clone`: [`Action00`] holds `Box<dyn
/// FeatureInstance>` instances, which neither trait is owed (feature
/// instances are compared and duplicated through their own read/write/
/// print methods instead, never structurally).
#[derive(Debug)]
pub enum Record {
	/// An Action00 feature-property record.
	Action00(Action00),
	/// An Action08 GRF identity record.
	Action08(Action08),
	/// An Action01/05/0A/11/12 container record with its children.
	Container { record: ContainerRecord, children: Vec<Record> },
	/// A real (graphical) sprite.
	RealSprite(RealSprite),
	/// A zero-length placeholder sprite.
	FakeSprite,
	/// A 256-entry palette recolour table.
	RecolourTable(RecolourTable),
	/// A v1-container reference to a sprite held in the package's sprite map.
	SpriteIndex(SpriteIndex),
	/// Any kind without a full field-level schema, preserved verbatim.
	Opaque { kind: RecordKind, action: OpaqueAction },
}

impl Record {
	/// This record's kind.
	pub fn kind(&self) -> RecordKind {
		match self {
			Self::Action00(_) => RecordKind::Action00,
			Self::Action08(_) => RecordKind::Action08,
			Self::Container { record, .. } => match record.kind {
				ContainerKind::Action01 => RecordKind::Action01,
				ContainerKind::Action05 => RecordKind::Action05,
				ContainerKind::Action0A => RecordKind::Action0A,
				ContainerKind::Action11 => RecordKind::Action11,
				ContainerKind::Action12 => RecordKind::Action12,
			},
			Self::RealSprite(_) => RecordKind::RealSprite,
			Self::FakeSprite => RecordKind::FakeSprite,
			Self::RecolourTable(_) => RecordKind::RecolourTable,
			Self::SpriteIndex(_) => RecordKind::SpriteIndex,
			Self::Opaque { kind, .. } => *kind,
		}
	}

	/// Number of following pseudo-sprites this record's header declares as
	/// its children (nonzero only for container kinds).
	pub fn num_children(&self) -> u32 {
		match self {
			Self::Container { record, .. } => record.num_children(),
			_ => 0,
		}
	}

	/// Reads a non-container, non-sprite pseudo-sprite body for `kind`
	/// (the dispatcher has already classified the action byte).
	pub fn read_action(kind: RecordKind, body: &[u8]) -> Result<Self, RecordError> {
		match kind {
			RecordKind::Action00 => Ok(Self::Action00(Action00::read(body)?)),
			RecordKind::Action08 => Ok(Self::Action08(Action08::read(body)?)),
			other => Ok(Self::Opaque { kind: other, action: OpaqueAction::read(body) }),
		}
	}

	/// Reads a container header for `kind`, to be completed with children
	/// by the grouping engine.
	pub fn read_container(kind: RecordKind, body: &[u8]) -> Result<ContainerRecord, RecordError> {
		let container_kind = kind.container_kind().expect("read_container called with a non-container kind");
		Ok(ContainerRecord::read(container_kind, body)?)
	}

	/// Writes this record's body, excluding any leading info/action byte
	/// (the framer owns that framing).
	pub fn write_body(&self) -> Result<Vec<u8>, RecordError> {
		match self {
			Self::Action00(action) => Ok(action.write()?),
			Self::Action08(action) => Ok(action.write()),
			Self::Container { record, .. } => Ok(record.write()),
			Self::RealSprite(sprite) => Ok(sprite.write()?),
			Self::FakeSprite => Ok(Vec::new()),
			Self::RecolourTable(table) => Ok(table.write()),
			Self::SpriteIndex(index) => Ok(index.write()),
			Self::Opaque { action, .. } => Ok(action.write()),
		}
	}

	/// Renders this record (and, for containers, its children) as YAGL text.
	pub fn print(&self, indent: usize) -> Result<String, RecordError> {
		Ok(match self {
			Self::Action00(action) => action.print(indent)?,
			Self::Action08(action) => action.print(indent),
			Self::Container { record, children } => {
				let mut out = record.print_header(indent);
				for child in children {
					out.push_str(&child.print(indent + 4)?);
				}
				crate::text::pad(&mut out, indent);
				out.push_str("}\n");
				out
			}
			Self::RealSprite(sprite) => sprite.print(indent),
			Self::FakeSprite => FakeSprite::print(indent),
			Self::RecolourTable(table) => table.print(indent),
			Self::SpriteIndex(index) => index.print(indent),
			Self::Opaque { kind, action } => {
				let mut out = String::new();
				crate::text::pad(&mut out, indent);
				out.push_str(kind.name());
				out.push('\n');
				crate::text::pad(&mut out, indent);
				out.push_str("{\n");
				out.push_str(&action.print(indent + 4));
				crate::text::pad(&mut out, indent);
				out.push_str("}\n");
				out
			}
		})
	}

	/// Parses one record: the leading keyword selects which kind's own
	/// `parse` is invoked. For containers, children are parsed inline and
	/// attached directly (mirroring how `print` nests them).
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, RecordError> {
		let keyword = tokens.match_ident()?;
		match keyword.as_str() {
			"Action00" => Ok(Self::Action00(Action00::parse(tokens)?)),
			"Action08" => Ok(Self::Action08(Action08::parse(tokens)?)),
			"RealSprite" => Ok(Self::RealSprite(RealSprite::parse(tokens)?)),
			"FakeSprite" => {
				let _ = tokens.eat(&TokenKind::SemiColon);
				Ok(Self::FakeSprite)
			}
			"RecolourTable" => Ok(Self::RecolourTable(RecolourTable::parse(tokens)?)),
			"SpriteIndex" => Ok(Self::SpriteIndex(SpriteIndex::parse(tokens)?)),
			"Action01" | "Action05" | "Action0A" | "Action11" | "Action12" => {
				let container_kind = match keyword.as_str() {
					"Action01" => ContainerKind::Action01,
					"Action05" => ContainerKind::Action05,
					"Action0A" => ContainerKind::Action0A,
					"Action11" => ContainerKind::Action11,
					_ => ContainerKind::Action12,
				};
				let record = ContainerRecord::parse_header(container_kind, tokens)?;
				let mut children = Vec::new();
				while tokens.peek().kind != TokenKind::CloseBrace {
					children.push(Record::parse(tokens)?);
				}
				tokens.expect(TokenKind::CloseBrace)?;
				Ok(Self::Container { record, children })
			}
			other => {
				if let Some(kind) = opaque_kind_from_name(other) {
					tokens.expect(TokenKind::OpenBrace)?;
					let mut bytes = Vec::new();
					while tokens.peek().kind != TokenKind::CloseBrace {
						tokens.expect_ident("raw")?;
						tokens.expect(TokenKind::Colon)?;
						tokens.expect(TokenKind::OpenBracket)?;
						if tokens.peek().kind != TokenKind::CloseBracket {
							loop {
								bytes.push(tokens.match_integer()? as u8);
								if !tokens.eat(&TokenKind::Comma) {
									break;
								}
							}
						}
						tokens.expect(TokenKind::CloseBracket)?;
						let _ = tokens.eat(&TokenKind::SemiColon);
					}
					tokens.expect(TokenKind::CloseBrace)?;
					Ok(Self::Opaque { kind, action: OpaqueAction { body: bytes } })
				} else {
					Err(RecordError::UnknownKeyword(other.to_string()))
				}
			}
		}
	}
}

fn opaque_kind_from_name(name: &str) -> Option<RecordKind> {
	Some(match name {
		"Action02" => RecordKind::Action02,
		"Action03" => RecordKind::Action03,
		"Action04" => RecordKind::Action04,
		"Action06" => RecordKind::Action06,
		"Action07" => RecordKind::Action07,
		"Action09" => RecordKind::Action09,
		"Action0B" => RecordKind::Action0B,
		"Action0C" => RecordKind::Action0C,
		"Action0D" => RecordKind::Action0D,
		"Action0E" => RecordKind::Action0E,
		"Action0F" => RecordKind::Action0F,
		"Action10" => RecordKind::Action10,
		"Action13" => RecordKind::Action13,
		"Action14" => RecordKind::Action14,
		"ActionFE" => RecordKind::ActionFE,
		"ActionFF" => RecordKind::ActionFF,
		_ => return None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn opaque_record_round_trips_binary() {
		let record = Record::read_action(RecordKind::Action03, &[0x01, 0x02, 0x03]).unwrap();
		assert_eq!(record.write_body().unwrap(), vec![0x01, 0x02, 0x03]);
	}

	#[test]
	fn opaque_record_round_trips_text() {
		let record = Record::read_action(RecordKind::Action03, &[0xAB, 0xCD]).unwrap();
		let printed = record.print(0).unwrap();
		let mut tokens = TokenStream::new(&printed).unwrap();
		let parsed = Record::parse(&mut tokens).unwrap();
		assert_eq!(parsed.write_body().unwrap(), vec![0xAB, 0xCD]);
	}

	#[test]
	fn container_record_with_children_round_trips_text() {
		let header = ContainerRecord::read(ContainerKind::Action01, &[0x07, 0x01]).unwrap();
		let child = Record::RealSprite(RealSprite { sprite_id: 1, width: 1, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![9] });
		let record = Record::Container { record: header, children: vec![child] };
		let printed = record.print(0).unwrap();
		let mut tokens = TokenStream::new(&printed).unwrap();
		let parsed = Record::parse(&mut tokens).unwrap();
		assert_eq!(parsed.write_body().unwrap(), record.write_body().unwrap());
		match parsed {
			Record::Container { children, .. } => assert_eq!(children.len(), 1),
			_ => panic!("expected a container record"),
		}
	}
}

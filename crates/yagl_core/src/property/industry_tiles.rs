//! The "Industry Tiles" feature property table: a smaller representative
//! table reusing the same descriptor kinds as [`super::houses`], per
//! §4.5/§9.
//!
//! Grounded on `Action00AirportTiles.cpp`, the closest sibling feature
//! table in the original implementation (industry tiles and airport tiles
//! share the same small set of tile-override/animation properties).

use super::descriptor::{IntegerDescriptor, PropFormat};
use super::{FeatureInstance, PropertyError};
use crate::stream::{read_u8, write_u8};
use crate::text::{TokenKind, TokenStream};

const FEATURE: &str = "IndustryTiles";

const DESC_08: IntegerDescriptor = IntegerDescriptor { id: 0x08, name: "substitute_tile_id", width: 1, format: PropFormat::Hex };
const DESC_09: IntegerDescriptor = IntegerDescriptor { id: 0x09, name: "tile_override", width: 1, format: PropFormat::Hex };
const DESC_0E: IntegerDescriptor = IntegerDescriptor { id: 0x0E, name: "callback_flags", width: 1, format: PropFormat::Hex };
const DESC_0F0: IntegerDescriptor = IntegerDescriptor { id: 0x0F, name: "animation_frames", width: 1, format: PropFormat::Hex };
const DESC_0F1: IntegerDescriptor = IntegerDescriptor { id: 0x0F, name: "animation_type", width: 1, format: PropFormat::Hex };
const DESC_10: IntegerDescriptor = IntegerDescriptor { id: 0x10, name: "animation_speed", width: 1, format: PropFormat::Hex };
const DESC_11: IntegerDescriptor = IntegerDescriptor { id: 0x11, name: "animation_triggers", width: 1, format: PropFormat::Hex };

/// A single Industry Tiles feature instance.
#[derive(Debug, Default, Clone)]
pub struct IndustryTiles {
	substitute_tile_id: u8,
	tile_override: u8,
	callback_flags: u8,
	animation_frames: u8,
	animation_type: u8,
	animation_speed: u8,
	animation_triggers: u8,
}

fn unknown(property: u8) -> PropertyError {
	PropertyError::UnknownProperty { feature: FEATURE, property }
}

impl FeatureInstance for IndustryTiles {
	fn read_property(&mut self, bytes: &[u8], offset: &mut usize, property: u8) -> Result<(), PropertyError> {
		match property {
			0x08 => self.substitute_tile_id = DESC_08.read(bytes, offset)? as u8,
			0x09 => self.tile_override = DESC_09.read(bytes, offset)? as u8,
			0x0E => self.callback_flags = DESC_0E.read(bytes, offset)? as u8,
			0x0F => {
				let (frames, n) = read_u8(bytes, *offset)?;
				*offset += n;
				let (kind, n) = read_u8(bytes, *offset)?;
				*offset += n;
				self.animation_frames = frames;
				self.animation_type = kind;
			}
			0x10 => self.animation_speed = DESC_10.read(bytes, offset)? as u8,
			0x11 => self.animation_triggers = DESC_11.read(bytes, offset)? as u8,
			_ => return Err(unknown(property)),
		}
		Ok(())
	}

	fn write_property(&self, out: &mut Vec<u8>, property: u8) -> Result<(), PropertyError> {
		match property {
			0x08 => write_u8(out, self.substitute_tile_id),
			0x09 => write_u8(out, self.tile_override),
			0x0E => write_u8(out, self.callback_flags),
			0x0F => {
				write_u8(out, self.animation_frames);
				write_u8(out, self.animation_type);
			}
			0x10 => write_u8(out, self.animation_speed),
			0x11 => write_u8(out, self.animation_triggers),
			_ => return Err(unknown(property)),
		}
		Ok(())
	}

	fn print_property(&self, out: &mut String, property: u8, indent: usize) -> Result<(), PropertyError> {
		crate::text::pad(out, indent);
		match property {
			0x08 => out.push_str(&DESC_08.print(self.substitute_tile_id.into())),
			0x09 => out.push_str(&DESC_09.print(self.tile_override.into())),
			0x0E => out.push_str(&DESC_0E.print(self.callback_flags.into())),
			0x0F => {
				out.push_str(&DESC_0F0.print(self.animation_frames.into()));
				out.push('\n');
				crate::text::pad(out, indent);
				out.push_str(&DESC_0F1.print(self.animation_type.into()));
			}
			0x10 => out.push_str(&DESC_10.print(self.animation_speed.into())),
			0x11 => out.push_str(&DESC_11.print(self.animation_triggers.into())),
			_ => return Err(unknown(property)),
		}
		out.push('\n');
		Ok(())
	}

	fn parse_property(&mut self, tokens: &mut TokenStream, name: &str) -> Result<u8, PropertyError> {
		match name {
			"substitute_tile_id" => self.substitute_tile_id = DESC_08.parse(tokens)? as u8,
			"tile_override" => self.tile_override = DESC_09.parse(tokens)? as u8,
			"callback_flags" => self.callback_flags = DESC_0E.parse(tokens)? as u8,
			"animation_frames" => self.animation_frames = DESC_0F0.parse(tokens)? as u8,
			"animation_type" => self.animation_type = DESC_0F1.parse(tokens)? as u8,
			"animation_speed" => self.animation_speed = DESC_10.parse(tokens)? as u8,
			"animation_triggers" => self.animation_triggers = DESC_11.parse(tokens)? as u8,
			_ => return Err(unknown(0xFF)),
		}
		let _ = tokens.eat(&TokenKind::SemiColon);
		let id = match name {
			"substitute_tile_id" => 0x08,
			"tile_override" => 0x09,
			"callback_flags" => 0x0E,
			"animation_frames" | "animation_type" => 0x0F,
			"animation_speed" => 0x10,
			"animation_triggers" => 0x11,
			_ => unreachable!("checked above"),
		};
		Ok(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn property_0x0f_reads_two_bytes() {
		let mut tile = IndustryTiles::default();
		let bytes = [0x05u8, 0x01];
		let mut offset = 0;
		tile.read_property(&bytes, &mut offset, 0x0F).unwrap();
		assert_eq!(tile.animation_frames, 0x05);
		assert_eq!(tile.animation_type, 0x01);
		assert_eq!(offset, 2);

		let mut out = Vec::new();
		tile.write_property(&mut out, 0x0F).unwrap();
		assert_eq!(out, bytes);
	}

	#[test]
	fn unknown_property_errors() {
		let mut tile = IndustryTiles::default();
		let mut offset = 0;
		assert!(tile.read_property(&[0x00], &mut offset, 0x7F).is_err());
	}
}

//! The "Houses" (town buildings) feature property table, properties
//! `0x08`-`0x22`.
//!
//! Grounded on `Action00Houses.cpp`'s `read_property`/`write_property`/
//! `print_property`/`parse_property` switches: every property is a plain
//! typed field on [`Houses`], read/written directly, with a matching
//! [`descriptor`](super::descriptor) used only for the text side.

use super::descriptor::{ArrayDescriptor, BooleanDescriptor, CargoListDescriptor, IntegerDescriptor, PropFormat};
use super::{FeatureInstance, PropertyError};
use crate::stream::{read_u8, read_u16, write_u8, write_u16};
use crate::text::{TokenKind, TokenStream};

const FEATURE: &str = "Houses";

const DESC_08: IntegerDescriptor = IntegerDescriptor { id: 0x08, name: "substitute_building_id", width: 1, format: PropFormat::Hex };
const DESC_09: IntegerDescriptor = IntegerDescriptor { id: 0x09, name: "building_flags", width: 1, format: PropFormat::Hex };
const DESC_0A0: IntegerDescriptor = IntegerDescriptor { id: 0x0A, name: "first_year_available", width: 1, format: PropFormat::Hex };
const DESC_0A1: IntegerDescriptor = IntegerDescriptor { id: 0x0A, name: "last_year_available", width: 1, format: PropFormat::Hex };
const DESC_0B: IntegerDescriptor = IntegerDescriptor { id: 0x0B, name: "population", width: 1, format: PropFormat::Hex };
const DESC_0C: IntegerDescriptor = IntegerDescriptor { id: 0x0C, name: "mail_multiplier", width: 1, format: PropFormat::Hex };
const DESC_0D: IntegerDescriptor = IntegerDescriptor { id: 0x0D, name: "passenger_acceptance", width: 1, format: PropFormat::Hex };
const DESC_0E: IntegerDescriptor = IntegerDescriptor { id: 0x0E, name: "mail_acceptance", width: 1, format: PropFormat::Hex };
const DESC_0F0: BooleanDescriptor = BooleanDescriptor { id: 0x0F, name: "accepts_goods" };
const DESC_0F1: IntegerDescriptor = IntegerDescriptor { id: 0x0F, name: "goods_etc_acceptance", width: 1, format: PropFormat::Hex };
const DESC_10: IntegerDescriptor = IntegerDescriptor { id: 0x10, name: "la_rating_decrease", width: 2, format: PropFormat::Hex };
const DESC_11: IntegerDescriptor = IntegerDescriptor { id: 0x11, name: "removal_cost_multiplier", width: 1, format: PropFormat::Hex };
const DESC_12: IntegerDescriptor = IntegerDescriptor { id: 0x12, name: "building_name_id", width: 2, format: PropFormat::Hex };
const DESC_13: IntegerDescriptor = IntegerDescriptor { id: 0x13, name: "availability_mask", width: 2, format: PropFormat::Hex };
const DESC_14: IntegerDescriptor = IntegerDescriptor { id: 0x14, name: "callback_flags", width: 1, format: PropFormat::Hex };
const DESC_15: IntegerDescriptor = IntegerDescriptor { id: 0x15, name: "override_byte", width: 1, format: PropFormat::Hex };
const DESC_16: IntegerDescriptor = IntegerDescriptor { id: 0x16, name: "refresh_multiplier", width: 1, format: PropFormat::Hex };
const DESC_17: ArrayDescriptor<4> = ArrayDescriptor { id: 0x17, name: "four_random_colours", format: PropFormat::Hex };
const DESC_18: IntegerDescriptor = IntegerDescriptor { id: 0x18, name: "appearance_probability", width: 1, format: PropFormat::Hex };
const DESC_19: IntegerDescriptor = IntegerDescriptor { id: 0x19, name: "extra_flags", width: 1, format: PropFormat::Hex };
const DESC_1A0: IntegerDescriptor = IntegerDescriptor { id: 0x1A, name: "animation_frames", width: 1, format: PropFormat::Hex };
const DESC_1A1: BooleanDescriptor = BooleanDescriptor { id: 0x1A, name: "animation_loops" };
const DESC_1B: IntegerDescriptor = IntegerDescriptor { id: 0x1B, name: "animation_speed", width: 1, format: PropFormat::Hex };
const DESC_1C: IntegerDescriptor = IntegerDescriptor { id: 0x1C, name: "building_class", width: 1, format: PropFormat::Hex };
const DESC_1D: IntegerDescriptor = IntegerDescriptor { id: 0x1D, name: "callback_flags_2", width: 1, format: PropFormat::Hex };
const DESC_1E: ArrayDescriptor<4> = ArrayDescriptor { id: 0x1E, name: "accepted_cargo_types", format: PropFormat::Hex };
const DESC_1F: IntegerDescriptor = IntegerDescriptor { id: 0x1F, name: "minimum_life_years", width: 2, format: PropFormat::Hex };
const DESC_20: CargoListDescriptor = CargoListDescriptor { id: 0x20, name: "accepted_cargo_list" };
const DESC_21: IntegerDescriptor = IntegerDescriptor { id: 0x21, name: "long_minimum_year", width: 2, format: PropFormat::Hex };
const DESC_22: IntegerDescriptor = IntegerDescriptor { id: 0x22, name: "long_maximum_year", width: 2, format: PropFormat::Hex };

/// A single Houses feature instance: one struct member per property,
/// matching `Action00Houses`'s member layout.
#[derive(Debug, Default, Clone)]
pub struct Houses {
	substitute_building_id: u8,
	building_flags: u8,
	first_year_available: u8,
	last_year_available: u8,
	population: u8,
	mail_multiplier: u8,
	passenger_acceptance: u8,
	mail_acceptance: u8,
	accepts_goods: bool,
	goods_etc_acceptance: u8,
	la_rating_decrease: u16,
	removal_cost_multiplier: u8,
	building_name_id: u16,
	availability_mask: u16,
	callback_flags: u8,
	override_byte: u8,
	refresh_multiplier: u8,
	four_random_colours: [u8; 4],
	appearance_probability: u8,
	extra_flags: u8,
	animation_frames: u8,
	animation_loops: bool,
	animation_speed: u8,
	building_class: u8,
	callback_flags_2: u8,
	accepted_cargo_types: [u8; 4],
	minimum_life_years: u16,
	accepted_cargo_list: Vec<u8>,
	long_minimum_year: u16,
	long_maximum_year: u16,
}

fn unknown(property: u8) -> PropertyError {
	PropertyError::UnknownProperty { feature: FEATURE, property }
}

impl FeatureInstance for Houses {
	fn read_property(&mut self, bytes: &[u8], offset: &mut usize, property: u8) -> Result<(), PropertyError> {
		match property {
			0x08 => self.substitute_building_id = DESC_08.read(bytes, offset)? as u8,
			0x09 => self.building_flags = DESC_09.read(bytes, offset)? as u8,
			0x0A => {
				self.first_year_available = DESC_0A0.read(bytes, offset)? as u8;
				self.last_year_available = DESC_0A1.read(bytes, offset)? as u8;
			}
			0x0B => self.population = DESC_0B.read(bytes, offset)? as u8,
			0x0C => self.mail_multiplier = DESC_0C.read(bytes, offset)? as u8,
			0x0D => self.passenger_acceptance = DESC_0D.read(bytes, offset)? as u8,
			0x0E => self.mail_acceptance = DESC_0E.read(bytes, offset)? as u8,
			0x0F => {
				let (raw, n) = read_u8(bytes, *offset)?;
				*offset += n;
				self.accepts_goods = raw & 0x80 == 0x00;
				self.goods_etc_acceptance = if self.accepts_goods { raw } else { raw.wrapping_neg() };
			}
			0x10 => self.la_rating_decrease = DESC_10.read(bytes, offset)?,
			0x11 => self.removal_cost_multiplier = DESC_11.read(bytes, offset)? as u8,
			0x12 => self.building_name_id = DESC_12.read(bytes, offset)?,
			0x13 => self.availability_mask = DESC_13.read(bytes, offset)?,
			0x14 => self.callback_flags = DESC_14.read(bytes, offset)? as u8,
			0x15 => self.override_byte = DESC_15.read(bytes, offset)? as u8,
			0x16 => self.refresh_multiplier = DESC_16.read(bytes, offset)? as u8,
			0x17 => self.four_random_colours = DESC_17.read(bytes, offset)?,
			0x18 => self.appearance_probability = DESC_18.read(bytes, offset)? as u8,
			0x19 => self.extra_flags = DESC_19.read(bytes, offset)? as u8,
			0x1A => {
				let (raw, n) = read_u8(bytes, *offset)?;
				*offset += n;
				self.animation_loops = raw & 0x80 == 0x80;
				self.animation_frames = raw & 0x7F;
			}
			0x1B => self.animation_speed = DESC_1B.read(bytes, offset)? as u8,
			0x1C => self.building_class = DESC_1C.read(bytes, offset)? as u8,
			0x1D => self.callback_flags_2 = DESC_1D.read(bytes, offset)? as u8,
			0x1E => self.accepted_cargo_types = DESC_1E.read(bytes, offset)?,
			0x1F => self.minimum_life_years = DESC_1F.read(bytes, offset)?,
			0x20 => self.accepted_cargo_list = DESC_20.read(bytes, offset)?,
			0x21 => self.long_minimum_year = DESC_21.read(bytes, offset)?,
			0x22 => self.long_maximum_year = DESC_22.read(bytes, offset)?,
			_ => return Err(unknown(property)),
		}
		Ok(())
	}

	fn write_property(&self, out: &mut Vec<u8>, property: u8) -> Result<(), PropertyError> {
		match property {
			0x08 => write_u8(out, self.substitute_building_id),
			0x09 => write_u8(out, self.building_flags),
			0x0A => {
				write_u8(out, self.first_year_available);
				write_u8(out, self.last_year_available);
			}
			0x0B => write_u8(out, self.population),
			0x0C => write_u8(out, self.mail_multiplier),
			0x0D => write_u8(out, self.passenger_acceptance),
			0x0E => write_u8(out, self.mail_acceptance),
			0x0F => {
				let raw = if self.accepts_goods { self.goods_etc_acceptance } else { self.goods_etc_acceptance.wrapping_neg() };
				write_u8(out, raw);
			}
			0x10 => write_u16(out, self.la_rating_decrease),
			0x11 => write_u8(out, self.removal_cost_multiplier),
			0x12 => write_u16(out, self.building_name_id),
			0x13 => write_u16(out, self.availability_mask),
			0x14 => write_u8(out, self.callback_flags),
			0x15 => write_u8(out, self.override_byte),
			0x16 => write_u8(out, self.refresh_multiplier),
			0x17 => DESC_17.write(out, &self.four_random_colours),
			0x18 => write_u8(out, self.appearance_probability),
			0x19 => write_u8(out, self.extra_flags),
			0x1A => write_u8(out, self.animation_frames | if self.animation_loops { 0x80 } else { 0x00 }),
			0x1B => write_u8(out, self.animation_speed),
			0x1C => write_u8(out, self.building_class),
			0x1D => write_u8(out, self.callback_flags_2),
			0x1E => DESC_1E.write(out, &self.accepted_cargo_types),
			0x1F => write_u16(out, self.minimum_life_years),
			0x20 => DESC_20.write(out, &self.accepted_cargo_list),
			0x21 => write_u16(out, self.long_minimum_year),
			0x22 => write_u16(out, self.long_maximum_year),
			_ => return Err(unknown(property)),
		}
		Ok(())
	}

	fn print_property(&self, out: &mut String, property: u8, indent: usize) -> Result<(), PropertyError> {
		crate::text::pad(out, indent);
		match property {
			0x08 => out.push_str(&DESC_08.print(self.substitute_building_id.into())),
			0x09 => out.push_str(&DESC_09.print(self.building_flags.into())),
			0x0A => {
				out.push_str(&DESC_0A0.print(self.first_year_available.into()));
				out.push('\n');
				crate::text::pad(out, indent);
				out.push_str(&DESC_0A1.print(self.last_year_available.into()));
			}
			0x0B => out.push_str(&DESC_0B.print(self.population.into())),
			0x0C => out.push_str(&DESC_0C.print(self.mail_multiplier.into())),
			0x0D => out.push_str(&DESC_0D.print(self.passenger_acceptance.into())),
			0x0E => out.push_str(&DESC_0E.print(self.mail_acceptance.into())),
			0x0F => {
				out.push_str(&DESC_0F0.print(self.accepts_goods));
				out.push('\n');
				crate::text::pad(out, indent);
				out.push_str(&DESC_0F1.print(self.goods_etc_acceptance.into()));
			}
			0x10 => out.push_str(&DESC_10.print(self.la_rating_decrease)),
			0x11 => out.push_str(&DESC_11.print(self.removal_cost_multiplier.into())),
			0x12 => out.push_str(&DESC_12.print(self.building_name_id)),
			0x13 => out.push_str(&DESC_13.print(self.availability_mask)),
			0x14 => out.push_str(&DESC_14.print(self.callback_flags.into())),
			0x15 => out.push_str(&DESC_15.print(self.override_byte.into())),
			0x16 => out.push_str(&DESC_16.print(self.refresh_multiplier.into())),
			0x17 => out.push_str(&DESC_17.print(&self.four_random_colours)),
			0x18 => out.push_str(&DESC_18.print(self.appearance_probability.into())),
			0x19 => out.push_str(&DESC_19.print(self.extra_flags.into())),
			0x1A => {
				out.push_str(&DESC_1A0.print(self.animation_frames.into()));
				out.push('\n');
				crate::text::pad(out, indent);
				out.push_str(&DESC_1A1.print(self.animation_loops));
			}
			0x1B => out.push_str(&DESC_1B.print(self.animation_speed.into())),
			0x1C => out.push_str(&DESC_1C.print(self.building_class.into())),
			0x1D => out.push_str(&DESC_1D.print(self.callback_flags_2.into())),
			0x1E => out.push_str(&DESC_1E.print(&self.accepted_cargo_types)),
			0x1F => out.push_str(&DESC_1F.print(self.minimum_life_years)),
			0x20 => out.push_str(&DESC_20.print(&self.accepted_cargo_list)),
			0x21 => out.push_str(&DESC_21.print(self.long_minimum_year)),
			0x22 => out.push_str(&DESC_22.print(self.long_maximum_year)),
			_ => return Err(unknown(property)),
		}
		out.push('\n');
		Ok(())
	}

	fn parse_property(&mut self, tokens: &mut TokenStream, name: &str) -> Result<u8, PropertyError> {
		match name {
			"substitute_building_id" => self.substitute_building_id = DESC_08.parse(tokens)? as u8,
			"building_flags" => self.building_flags = DESC_09.parse(tokens)? as u8,
			"first_year_available" => self.first_year_available = DESC_0A0.parse(tokens)? as u8,
			"last_year_available" => self.last_year_available = DESC_0A1.parse(tokens)? as u8,
			"population" => self.population = DESC_0B.parse(tokens)? as u8,
			"mail_multiplier" => self.mail_multiplier = DESC_0C.parse(tokens)? as u8,
			"passenger_acceptance" => self.passenger_acceptance = DESC_0D.parse(tokens)? as u8,
			"mail_acceptance" => self.mail_acceptance = DESC_0E.parse(tokens)? as u8,
			"accepts_goods" => self.accepts_goods = DESC_0F0.parse(tokens)?,
			"goods_etc_acceptance" => self.goods_etc_acceptance = DESC_0F1.parse(tokens)? as u8,
			"la_rating_decrease" => self.la_rating_decrease = DESC_10.parse(tokens)?,
			"removal_cost_multiplier" => self.removal_cost_multiplier = DESC_11.parse(tokens)? as u8,
			"building_name_id" => self.building_name_id = DESC_12.parse(tokens)?,
			"availability_mask" => self.availability_mask = DESC_13.parse(tokens)?,
			"callback_flags" => self.callback_flags = DESC_14.parse(tokens)? as u8,
			"override_byte" => self.override_byte = DESC_15.parse(tokens)? as u8,
			"refresh_multiplier" => self.refresh_multiplier = DESC_16.parse(tokens)? as u8,
			"four_random_colours" => self.four_random_colours = DESC_17.parse(tokens)?,
			"appearance_probability" => self.appearance_probability = DESC_18.parse(tokens)? as u8,
			"extra_flags" => self.extra_flags = DESC_19.parse(tokens)? as u8,
			"animation_frames" => self.animation_frames = DESC_1A0.parse(tokens)? as u8,
			"animation_loops" => self.animation_loops = DESC_1A1.parse(tokens)?,
			"animation_speed" => self.animation_speed = DESC_1B.parse(tokens)? as u8,
			"building_class" => self.building_class = DESC_1C.parse(tokens)? as u8,
			"callback_flags_2" => self.callback_flags_2 = DESC_1D.parse(tokens)? as u8,
			"accepted_cargo_types" => self.accepted_cargo_types = DESC_1E.parse(tokens)?,
			"minimum_life_years" => self.minimum_life_years = DESC_1F.parse(tokens)?,
			"accepted_cargo_list" => self.accepted_cargo_list = DESC_20.parse(tokens)?,
			"long_minimum_year" => self.long_minimum_year = DESC_21.parse(tokens)?,
			"long_maximum_year" => self.long_maximum_year = DESC_22.parse(tokens)?,
			_ => return Err(unknown(0xFF)),
		}
		let _ = tokens.eat(&TokenKind::SemiColon);
		let id = match name {
			"substitute_building_id" => 0x08,
			"building_flags" => 0x09,
			"first_year_available" | "last_year_available" => 0x0A,
			"population" => 0x0B,
			"mail_multiplier" => 0x0C,
			"passenger_acceptance" => 0x0D,
			"mail_acceptance" => 0x0E,
			"accepts_goods" | "goods_etc_acceptance" => 0x0F,
			"la_rating_decrease" => 0x10,
			"removal_cost_multiplier" => 0x11,
			"building_name_id" => 0x12,
			"availability_mask" => 0x13,
			"callback_flags" => 0x14,
			"override_byte" => 0x15,
			"refresh_multiplier" => 0x16,
			"four_random_colours" => 0x17,
			"appearance_probability" => 0x18,
			"extra_flags" => 0x19,
			"animation_frames" | "animation_loops" => 0x1A,
			"animation_speed" => 0x1B,
			"building_class" => 0x1C,
			"callback_flags_2" => 0x1D,
			"accepted_cargo_types" => 0x1E,
			"minimum_life_years" => 0x1F,
			"accepted_cargo_list" => 0x20,
			"long_minimum_year" => 0x21,
			"long_maximum_year" => 0x22,
			_ => unreachable!("checked above"),
		};
		Ok(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn property_0x0f_two_complement_round_trip() {
		let mut accepts_true = Houses::default();
		accepts_true.accepts_goods = true;
		accepts_true.goods_etc_acceptance = 0x42;
		let mut out = Vec::new();
		accepts_true.write_property(&mut out, 0x0F).unwrap();
		assert_eq!(out, vec![0x42]);

		let mut accepts_false = Houses::default();
		accepts_false.accepts_goods = false;
		accepts_false.goods_etc_acceptance = 0x42;
		let mut out = Vec::new();
		accepts_false.write_property(&mut out, 0x0F).unwrap();
		assert_eq!(out, vec![0xBE]);
	}

	#[test]
	fn property_0x0f_round_trips_through_read() {
		let mut house = Houses::default();
		let bytes = [0xBEu8];
		let mut offset = 0;
		house.read_property(&bytes, &mut offset, 0x0F).unwrap();
		assert!(!house.accepts_goods);
		assert_eq!(house.goods_etc_acceptance, 0x42);
	}

	#[test]
	fn property_0x0a_reads_two_sequential_bytes() {
		let mut house = Houses::default();
		let bytes = [0x10u8, 0x20];
		let mut offset = 0;
		house.read_property(&bytes, &mut offset, 0x0A).unwrap();
		assert_eq!(house.first_year_available, 0x10);
		assert_eq!(house.last_year_available, 0x20);
		assert_eq!(offset, 2);
	}

	#[test]
	fn unknown_property_errors() {
		let mut house = Houses::default();
		let mut offset = 0;
		assert!(house.read_property(&[], &mut offset, 0xFF).is_err());
	}

	#[test]
	fn text_round_trip_via_parse_property() {
		let house = Houses::default();
		let mut out = String::new();
		house.print_property(&mut out, 0x08, 0).unwrap();
		assert_eq!(out, "substitute_building_id: 0x0;\n");

		let mut parsed = Houses::default();
		let mut tokens = TokenStream::new("0x7B;").unwrap();
		let id = parsed.parse_property(&mut tokens, "substitute_building_id").unwrap();
		assert_eq!(id, 0x08);
		assert_eq!(parsed.substitute_building_id, 0x7B);
	}
}

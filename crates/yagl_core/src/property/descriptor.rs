//! Small, reusable binary/text codecs for a single typed property field.
//!
//! The original implementation parameterises a C++ template class per
//! (property id, name, format hint); this crate represents the same idea as
//! a handful of plain value-holding structs with `read`/`write`/`print`/
//! `parse` methods, one per descriptor kind named in §4.5.

use chrono::Datelike;
use thiserror::Error;

use crate::stream::{read_u8, read_u16, write_u8, write_u16, StreamError};
use crate::text::{ParseError, TokenKind, TokenStream};

/// Errors raised by a property descriptor's own binary or text operations,
/// beyond the stream/lex/parse errors it wraps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
	/// A stream primitive ran out of input while reading a property value.
	#[error(transparent)]
	Stream(#[from] StreamError),

	/// The text parser produced an unexpected token while parsing a value.
	#[error(transparent)]
	Parse(#[from] ParseError),

	/// A flag-list token did not match any of the descriptor's known names.
	#[error("unknown flag name {0:?}")]
	UnknownFlag(String),
}

/// Whether an integer descriptor renders its value in decimal or `0x` hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropFormat {
	/// `123`
	Decimal,
	/// `0x7B`
	Hex,
}

/// A fixed-width unsigned integer property (`u8` or `u16` on the wire).
pub struct IntegerDescriptor {
	/// Property id this descriptor formats/parses.
	pub id: u8,
	/// Stable text name used in the YAGL grammar.
	pub name: &'static str,
	/// Wire width: 1 or 2 bytes.
	pub width: u8,
	/// Decimal or hex text rendering.
	pub format: PropFormat,
}

impl IntegerDescriptor {
	/// Reads the property's raw value from `bytes` at `offset`, advancing it.
	pub fn read(&self, bytes: &[u8], offset: &mut usize) -> Result<u16, DescriptorError> {
		let (value, n) = match self.width {
			1 => {
				let (v, n) = read_u8(bytes, *offset)?;
				(u16::from(v), n)
			}
			_ => read_u16(bytes, *offset)?,
		};
		*offset += n;
		Ok(value)
	}

	/// Appends the wire form of `value`.
	pub fn write(&self, out: &mut Vec<u8>, value: u16) {
		match self.width {
			1 => write_u8(out, value as u8),
			_ => write_u16(out, value),
		}
	}

	/// Renders `name: value;` using this descriptor's format.
	pub fn print(&self, value: u16) -> String {
		match self.format {
			PropFormat::Decimal => format!("{}: {};", self.name, value),
			PropFormat::Hex => format!("{}: {:#X};", self.name, value),
		}
	}

	/// Parses the value half of `name: <value>` (the name and colon must
	/// already have been consumed by the caller).
	pub fn parse(&self, tokens: &mut TokenStream) -> Result<u16, DescriptorError> {
		Ok(tokens.match_integer()? as u16)
	}
}

/// A single-byte boolean property with the feature's chosen true/false
/// wire values (most features use `0x00`/non-zero, but the packed
/// high-bit-flag properties reuse this descriptor purely for text
/// formatting, since their binary form is packed alongside a sibling
/// integer field).
pub struct BooleanDescriptor {
	/// Property id this descriptor formats/parses.
	pub id: u8,
	/// Stable text name used in the YAGL grammar.
	pub name: &'static str,
}

impl BooleanDescriptor {
	/// Renders `name: true;` / `name: false;`.
	pub fn print(&self, value: bool) -> String {
		format!("{}: {};", self.name, value)
	}

	/// Parses `true` or `false`.
	pub fn parse(&self, tokens: &mut TokenStream) -> Result<bool, DescriptorError> {
		let ident = tokens.match_ident()?;
		match ident.as_str() {
			"true" => Ok(true),
			"false" => Ok(false),
			_ => Err(DescriptorError::UnknownFlag(ident)),
		}
	}
}

/// A fixed-length array of `u8`, e.g. `four_random_colours` (N=4).
pub struct ArrayDescriptor<const N: usize> {
	/// Property id this descriptor formats/parses.
	pub id: u8,
	/// Stable text name used in the YAGL grammar.
	pub name: &'static str,
	/// Decimal or hex text rendering of each element.
	pub format: PropFormat,
}

impl<const N: usize> ArrayDescriptor<N> {
	/// Reads `N` raw bytes from `bytes` at `offset`, advancing it.
	pub fn read(&self, bytes: &[u8], offset: &mut usize) -> Result<[u8; N], DescriptorError> {
		let mut out = [0u8; N];
		for slot in &mut out {
			let (v, n) = read_u8(bytes, *offset)?;
			*slot = v;
			*offset += n;
		}
		Ok(out)
	}

	/// Appends the wire form of `value`.
	pub fn write(&self, out: &mut Vec<u8>, value: &[u8; N]) {
		for &byte in value {
			write_u8(out, byte);
		}
	}

	/// Renders `name: [ a, b, c, d ];`.
	pub fn print(&self, value: &[u8; N]) -> String {
		let items: Vec<String> = value
			.iter()
			.map(|b| match self.format {
				PropFormat::Decimal => b.to_string(),
				PropFormat::Hex => format!("{b:#X}"),
			})
			.collect();
		format!("{}: [ {} ];", self.name, items.join(", "))
	}

	/// Parses `[ a, b, c, d ]`.
	pub fn parse(&self, tokens: &mut TokenStream) -> Result<[u8; N], DescriptorError> {
		let mut out = [0u8; N];
		tokens.expect(TokenKind::OpenBracket)?;
		for (i, slot) in out.iter_mut().enumerate() {
			if i > 0 {
				tokens.expect(TokenKind::Comma)?;
			}
			*slot = tokens.match_integer()? as u8;
		}
		tokens.expect(TokenKind::CloseBracket)?;
		Ok(out)
	}
}

/// A 32-bit days-since-epoch date property, rendered as `YYYY-MM-DD`.
pub struct LongDateDescriptor {
	/// Property id this descriptor formats/parses.
	pub id: u8,
	/// Stable text name used in the YAGL grammar.
	pub name: &'static str,
}

/// Fixed epoch for long-date properties: `0001-01-01` in the proleptic
/// Gregorian calendar, matching `chrono`'s `NaiveDate` day numbering.
const LONG_DATE_EPOCH_DAYS: i32 = 1;

impl LongDateDescriptor {
	/// Reads the raw days-since-epoch `u32` from `bytes` at `offset`.
	pub fn read(&self, bytes: &[u8], offset: &mut usize) -> Result<u32, DescriptorError> {
		let (value, n) = crate::stream::read_u32(bytes, *offset)?;
		*offset += n;
		Ok(value)
	}

	/// Appends the raw days-since-epoch `u32`.
	pub fn write(&self, out: &mut Vec<u8>, value: u32) {
		crate::stream::write_u32(out, value);
	}

	/// Renders `name: "YYYY-MM-DD";`.
	pub fn print(&self, value: u32) -> String {
		let date = chrono::NaiveDate::from_num_days_from_ce_opt(LONG_DATE_EPOCH_DAYS + value as i32);
		match date {
			Some(date) => format!("{}: \"{}\";", self.name, date.format("%Y-%m-%d")),
			None => format!("{}: {};", self.name, value),
		}
	}

	/// Parses a `"YYYY-MM-DD"` string literal back into days-since-epoch.
	pub fn parse(&self, tokens: &mut TokenStream) -> Result<u32, DescriptorError> {
		let text = tokens.match_string()?;
		let date = chrono::NaiveDate::parse_from_str(&text, "%Y-%m-%d")
			.map_err(|_| DescriptorError::UnknownFlag(text.clone()))?;
		Ok((date.num_days_from_ce() - LONG_DATE_EPOCH_DAYS) as u32)
	}
}

/// A length-prefixed list of 8-bit cargo ids.
pub struct CargoListDescriptor {
	/// Property id this descriptor formats/parses.
	pub id: u8,
	/// Stable text name used in the YAGL grammar.
	pub name: &'static str,
}

impl CargoListDescriptor {
	/// Reads a `u8` count followed by that many raw `u8` cargo ids.
	pub fn read(&self, bytes: &[u8], offset: &mut usize) -> Result<Vec<u8>, DescriptorError> {
		let (count, n) = read_u8(bytes, *offset)?;
		*offset += n;
		let mut ids = Vec::with_capacity(count.into());
		for _ in 0..count {
			let (id, n) = read_u8(bytes, *offset)?;
			*offset += n;
			ids.push(id);
		}
		Ok(ids)
	}

	/// Appends the `u8` count followed by each cargo id.
	pub fn write(&self, out: &mut Vec<u8>, ids: &[u8]) {
		write_u8(out, ids.len() as u8);
		for &id in ids {
			write_u8(out, id);
		}
	}

	/// Renders `name: [ a, b, c ];`.
	pub fn print(&self, ids: &[u8]) -> String {
		let items: Vec<String> = ids.iter().map(|b| format!("{b:#X}")).collect();
		format!("{}: [ {} ];", self.name, items.join(", "))
	}

	/// Parses `[ a, b, c ]` into a cargo id list.
	pub fn parse(&self, tokens: &mut TokenStream) -> Result<Vec<u8>, DescriptorError> {
		let mut ids = Vec::new();
		tokens.expect(TokenKind::OpenBracket)?;
		if tokens.peek().kind != TokenKind::CloseBracket {
			loop {
				ids.push(tokens.match_integer()? as u8);
				if !tokens.eat(&TokenKind::Comma) {
					break;
				}
			}
		}
		tokens.expect(TokenKind::CloseBracket)?;
		Ok(ids)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn integer_descriptor_round_trips() {
		let desc = IntegerDescriptor { id: 0x08, name: "substitute_building_id", width: 1, format: PropFormat::Hex };
		let mut buf = Vec::new();
		desc.write(&mut buf, 0x42);
		let mut offset = 0;
		assert_eq!(desc.read(&buf, &mut offset).unwrap(), 0x42);
		assert_eq!(offset, 1);
		assert_eq!(desc.print(0x42), "substitute_building_id: 0x42;");
	}

	#[test]
	fn array_descriptor_round_trips() {
		let desc = ArrayDescriptor::<4> { id: 0x17, name: "four_random_colours", format: PropFormat::Hex };
		let value = [1u8, 2, 3, 4];
		let mut buf = Vec::new();
		desc.write(&mut buf, &value);
		let mut offset = 0;
		assert_eq!(desc.read(&buf, &mut offset).unwrap(), value);
		let printed = desc.print(&value);
		let mut tokens = TokenStream::new(printed.trim_start_matches("four_random_colours: ").trim_end_matches(';')).unwrap();
		assert_eq!(desc.parse(&mut tokens).unwrap(), value);
	}

	#[test]
	fn cargo_list_round_trips() {
		let desc = CargoListDescriptor { id: 0x20, name: "accepted_cargo_list" };
		let ids = vec![1u8, 2, 3];
		let mut buf = Vec::new();
		desc.write(&mut buf, &ids);
		let mut offset = 0;
		assert_eq!(desc.read(&buf, &mut offset).unwrap(), ids);
	}

	#[test]
	fn long_date_round_trips_through_text() {
		let desc = LongDateDescriptor { id: 0x21, name: "long_minimum_year" };
		let mut buf = Vec::new();
		desc.write(&mut buf, 730_000);
		let mut offset = 0;
		let value = desc.read(&buf, &mut offset).unwrap();
		let printed = desc.print(value);
		let text = printed
			.trim_start_matches("long_minimum_year: ")
			.trim_end_matches(';');
		let mut tokens = TokenStream::new(text).unwrap();
		assert_eq!(desc.parse(&mut tokens).unwrap(), value);
	}
}

//! Two deliberately minimal [`FeatureInstance`] implementations: a raw,
//! single-byte-per-property fallback for feature bytes without a full
//! schema, and `OriginalStrings`, which the original implementation
//! recognises but never implements.

use std::collections::BTreeMap;

use super::{FeatureInstance, PropertyError};
use crate::stream::{read_u8, write_u8};
use crate::text::{TokenKind, TokenStream};

/// Stores every property of an unmodelled feature as a single raw byte,
/// the modal width for undocumented properties. This is a documented
/// scope limitation (§4.5), not a silent one: a property whose true
/// wire width is not one byte will desynchronise the remaining body, and
/// that failure surfaces as a length mismatch at the framer, not here.
#[derive(Debug, Default, Clone)]
pub struct RawFallback {
	values: BTreeMap<u8, u8>,
}

impl FeatureInstance for RawFallback {
	fn read_property(&mut self, bytes: &[u8], offset: &mut usize, property: u8) -> Result<(), PropertyError> {
		let (value, n) = read_u8(bytes, *offset)?;
		*offset += n;
		self.values.insert(property, value);
		Ok(())
	}

	fn write_property(&self, out: &mut Vec<u8>, property: u8) -> Result<(), PropertyError> {
		let value = self.values.get(&property).copied().unwrap_or(0);
		write_u8(out, value);
		Ok(())
	}

	fn print_property(&self, out: &mut String, property: u8, indent: usize) -> Result<(), PropertyError> {
		let value = self.values.get(&property).copied().unwrap_or(0);
		crate::text::pad(out, indent);
		out.push_str(&format!("prop_{property:02X}: {value:#X};\n"));
		Ok(())
	}

	fn parse_property(&mut self, tokens: &mut TokenStream, name: &str) -> Result<u8, PropertyError> {
		let property = name
			.strip_prefix("prop_")
			.and_then(|hex| u8::from_str_radix(hex, 16).ok())
			.ok_or_else(|| PropertyError::UnknownProperty { feature: "Other", property: 0xFF })?;
		let value = tokens.match_integer()? as u8;
		let _ = tokens.eat(&TokenKind::SemiColon);
		self.values.insert(property, value);
		Ok(property)
	}
}

/// `Action00OriginalStrings`: a recognised feature whose every operation
/// is unimplemented in the original implementation. This crate preserves
/// that as an explicit [`PropertyError::Unsupported`] rather than a panic
/// or a silent default, per §9.
#[derive(Debug, Default, Clone, Copy)]
pub struct OriginalStrings;

impl FeatureInstance for OriginalStrings {
	fn read_property(&mut self, _bytes: &[u8], _offset: &mut usize, _property: u8) -> Result<(), PropertyError> {
		Err(PropertyError::Unsupported("OriginalStrings"))
	}

	fn write_property(&self, _out: &mut Vec<u8>, _property: u8) -> Result<(), PropertyError> {
		Err(PropertyError::Unsupported("OriginalStrings"))
	}

	fn print_property(&self, _out: &mut String, _property: u8, _indent: usize) -> Result<(), PropertyError> {
		Err(PropertyError::Unsupported("OriginalStrings"))
	}

	fn parse_property(&mut self, _tokens: &mut TokenStream, _name: &str) -> Result<u8, PropertyError> {
		Err(PropertyError::Unsupported("OriginalStrings"))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn raw_fallback_round_trips_a_single_byte_property() {
		let mut instance = RawFallback::default();
		let mut offset = 0;
		instance.read_property(&[0x42], &mut offset, 0x30).unwrap();
		let mut out = Vec::new();
		instance.write_property(&mut out, 0x30).unwrap();
		assert_eq!(out, vec![0x42]);
	}

	#[test]
	fn original_strings_is_unsupported_everywhere() {
		let mut instance = OriginalStrings;
		let mut offset = 0;
		assert!(matches!(
			instance.read_property(&[], &mut offset, 0x00),
			Err(PropertyError::Unsupported("OriginalStrings"))
		));
		let mut out = String::new();
		assert!(instance.print_property(&mut out, 0x00, 0).is_err());
	}
}

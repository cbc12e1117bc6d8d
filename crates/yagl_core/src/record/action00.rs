//! Action00: defines new properties for feature instances (§3, §4.4).
//!
//! Grounded on `Action00Record.cpp`'s `read`/`write`/`print`/`parse`: body
//! is property-major (every instance is created first, then for each
//! property id in turn every instance reads/writes its copy), and the
//! property-id list is stored verbatim, duplicates and order included,
//! purely so `write` can reproduce it.

use crate::property::{make_feature, FeatureInstance, FeatureKind, PropertyError};
use crate::stream::{read_extended_byte, read_u8, write_extended_byte, write_u8, StreamError};
use crate::text::{ParseError, TokenKind, TokenStream};
use thiserror::Error;

/// Errors specific to Action00's own framing, beyond a property's own
/// [`PropertyError`].
#[derive(Debug, Error)]
pub enum Action00Error {
	/// A stream primitive ran out of input.
	#[error(transparent)]
	Stream(#[from] StreamError),
	/// A property failed its own read/write/print/parse.
	#[error(transparent)]
	Property(#[from] PropertyError),
	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// An Action00 record: a feature, a first instance id, an ordered (possibly
/// duplicate) list of property ids, and one feature instance per id in
/// `0..num_instances`.
pub struct Action00 {
	/// The feature these properties apply to.
	pub feature: FeatureKind,
	/// Id of the first feature instance; subsequent instances are
	/// numbered consecutively from here in print output.
	pub first_id: u16,
	/// Property ids in the order they appear on the wire, duplicates
	/// included — this list, not a set, is what `write` replays.
	pub properties: Vec<u8>,
	/// One feature instance per `num_instances`, each holding a value for
	/// every id in `properties`. A [`FeatureInstance`] stores one named
	/// field per property id, so a repeated id within `properties`
	/// overwrites the earlier occurrence here; `occurrences` is what
	/// keeps the two wire appearances distinguishable for `write`.
	pub instances: Vec<Box<dyn FeatureInstance>>,
	/// Per instance, per entry of `properties` (same index, duplicates
	/// included), the exact wire bytes that occurrence encoded to. `write`
	/// replays these verbatim instead of re-deriving them from `instances`,
	/// so a property id repeated within one instance round-trips both of
	/// its distinct values rather than replaying the last one twice.
	occurrences: Vec<Vec<Vec<u8>>>,
}

impl std::fmt::Debug for Action00 {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Action00")
			.field("feature", &self.feature)
			.field("first_id", &self.first_id)
			.field("properties", &self.properties)
			.field("num_instances", &self.instances.len())
			.finish()
	}
}

/// Encodes `instance`'s current value for `property` in isolation, used to
/// capture one occurrence's wire bytes right after it is set.
fn encode_occurrence(instance: &dyn FeatureInstance, property: u8) -> Result<Vec<u8>, Action00Error> {
	let mut out = Vec::new();
	instance.write_property(&mut out, property)?;
	Ok(out)
}

impl Action00 {
	/// Reads an Action00 body (everything after the `0x00` action byte).
	pub fn read(bytes: &[u8]) -> Result<Self, Action00Error> {
		let mut offset = 0;
		let (feature_byte, n) = read_u8(bytes, offset)?;
		offset += n;
		let feature = FeatureKind::from_byte(feature_byte);

		let (num_props, n) = read_u8(bytes, offset)?;
		offset += n;
		let (num_instances, n) = read_u8(bytes, offset)?;
		offset += n;
		let (first_id, n) = read_extended_byte(bytes, offset)?;
		offset += n;

		let mut instances: Vec<Box<dyn FeatureInstance>> = (0..num_instances).map(|_| make_feature(feature)).collect();
		let mut occurrences: Vec<Vec<Vec<u8>>> = (0..num_instances).map(|_| Vec::with_capacity(num_props.into())).collect();
		let mut properties = Vec::with_capacity(num_props.into());

		for _ in 0..num_props {
			let (property, n) = read_u8(bytes, offset)?;
			offset += n;
			properties.push(property);
			for (instance, occurrences) in instances.iter_mut().zip(occurrences.iter_mut()) {
				let start = offset;
				instance.read_property(bytes, &mut offset, property)?;
				occurrences.push(bytes[start..offset].to_vec());
			}
		}

		Ok(Self { feature, first_id, properties, instances, occurrences })
	}

	/// Writes this record's body (excluding the `0x00` action byte, which
	/// the dispatcher/framer prefixes).
	pub fn write(&self) -> Result<Vec<u8>, Action00Error> {
		let mut out = Vec::new();
		write_u8(&mut out, self.feature.to_byte());
		write_u8(&mut out, self.properties.len() as u8);
		write_u8(&mut out, self.instances.len() as u8);
		write_extended_byte(&mut out, self.first_id);

		for (prop_idx, &property) in self.properties.iter().enumerate() {
			write_u8(&mut out, property);
			for (inst_idx, instance) in self.instances.iter().enumerate() {
				match self.occurrences.get(inst_idx).and_then(|o| o.get(prop_idx)) {
					Some(raw) => out.extend_from_slice(raw),
					None => instance.write_property(&mut out, property)?,
				}
			}
		}
		Ok(out)
	}

	/// Renders `Action00<Feature, 0xNN> { instance_id: 0xNN { ... } ... }`.
	pub fn print(&self, indent: usize) -> Result<String, Action00Error> {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str(&format!("Action00<{}, {:#X}>\n", self.feature.name(), self.first_id));
		crate::text::pad(&mut out, indent);
		out.push_str("{\n");

		let mut id = self.first_id;
		for instance in &self.instances {
			crate::text::pad(&mut out, indent + 4);
			out.push_str(&format!("instance_id: {id:#X}\n"));
			crate::text::pad(&mut out, indent + 4);
			out.push_str("{\n");
			for &property in &self.properties {
				instance.print_property(&mut out, property, indent + 8)?;
			}
			crate::text::pad(&mut out, indent + 4);
			out.push_str("}\n");
			id += 1;
		}

		crate::text::pad(&mut out, indent);
		out.push_str("}\n");
		Ok(out)
	}

	/// Parses an `Action00<Feature, first_id> { instance_id: ... { ... } }`
	/// block. The leading `Action00` keyword must already be consumed by
	/// the caller (the dispatcher matches the keyword to decide which
	/// variant's `parse` to invoke).
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, Action00Error> {
		tokens.expect(TokenKind::OpenAngle)?;
		let feature = FeatureKind::from_name(&tokens.match_ident()?);
		tokens.expect(TokenKind::Comma)?;
		let first_id = tokens.match_integer()? as u16;
		tokens.expect(TokenKind::CloseAngle)?;
		tokens.expect(TokenKind::OpenBrace)?;

		let mut properties = Vec::new();
		let mut instances: Vec<Box<dyn FeatureInstance>> = Vec::new();
		let mut occurrences: Vec<Vec<Vec<u8>>> = Vec::new();
		let mut seen_properties = false;

		while tokens.peek().kind == TokenKind::Ident("instance_id".to_string()) {
			tokens.expect(TokenKind::Ident("instance_id".to_string()))?;
			tokens.expect(TokenKind::Colon)?;
			let _id = tokens.match_integer()?;
			tokens.expect(TokenKind::OpenBrace)?;

			let mut instance = make_feature(feature);
			let mut instance_occurrences = Vec::new();
			while tokens.peek().kind != TokenKind::CloseBrace {
				let name = tokens.match_ident()?;
				tokens.expect(TokenKind::Colon)?;
				let property = instance.parse_property(tokens, &name)?;
				if !seen_properties {
					properties.push(property);
				}
				instance_occurrences.push(encode_occurrence(instance.as_ref(), property)?);
			}
			tokens.expect(TokenKind::CloseBrace)?;
			instances.push(instance);
			occurrences.push(instance_occurrences);
			seen_properties = true;
		}

		tokens.expect(TokenKind::CloseBrace)?;
		Ok(Self { feature, first_id, properties, instances, occurrences })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn binary_round_trip_houses_single_instance() {
		let bytes = [
			0x07, // feature = Houses
			0x01, // 1 property
			0x01, // 1 instance
			0x05, // first_id (extended byte, plain form)
			0x08, // property id 0x08
			0x42, // substitute_building_id = 0x42
		];
		let action00 = Action00::read(&bytes).unwrap();
		let encoded = action00.write().unwrap();
		assert_eq!(encoded, bytes);
	}

	#[test]
	fn every_instance_stores_the_same_property_sequence() {
		let bytes = [
			0x07, 0x02, 0x02, 0x00, // feature, 2 props, 2 instances, first_id=0
			0x08, 0x01, 0x02, // property 0x08 for instance 0 and 1
			0x08, 0x03, 0x04, // property 0x08 again (duplicate) for instance 0 and 1
		];
		let action00 = Action00::read(&bytes).unwrap();
		assert_eq!(action00.properties, vec![0x08, 0x08]);
		assert_eq!(action00.instances.len(), 2);
		let encoded = action00.write().unwrap();
		assert_eq!(encoded, bytes);
	}

	#[test]
	fn text_round_trip_preserves_property_and_value() {
		let bytes = [0x07, 0x01, 0x01, 0x05, 0x08, 0x42];
		let action00 = Action00::read(&bytes).unwrap();
		let printed = action00.print(0).unwrap();
		assert!(printed.contains("Action00<Houses, 0x5>"));
		assert!(printed.contains("substitute_building_id: 0x42;"));

		let mut tokens = TokenStream::new(printed.trim_start_matches("Action00")).unwrap();
		let parsed = Action00::parse(&mut tokens).unwrap();
		assert_eq!(parsed.write().unwrap(), bytes);
	}
}

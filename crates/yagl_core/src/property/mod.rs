//! Feature property tables: per-feature maps of `{property-id ↔ name ↔
//! descriptor}` (§4.5) backing every Action00 feature instance.
//!
//! Each [`FeatureKind`] owns a concrete [`FeatureInstance`] implementation
//! that stores its properties as plain typed fields (mirroring the original
//! implementation's one-member-per-property `Action00<Feature>` classes)
//! and exposes the four capability operations the record family drives it
//! through.

mod descriptor;
mod fallback;
mod houses;
mod industry_tiles;

pub use descriptor::{ArrayDescriptor, BooleanDescriptor, CargoListDescriptor, DescriptorError, IntegerDescriptor, LongDateDescriptor, PropFormat};

use std::fmt::Debug;
use thiserror::Error;

use crate::text::{ParseError, TokenStream};

/// Errors raised while reading, writing, printing, or parsing a feature's
/// property values.
#[derive(Debug, Error)]
pub enum PropertyError {
	/// `property` is not a recognised id for the current feature.
	#[error("unknown property {property:#04X} for feature {feature}")]
	UnknownProperty {
		/// The feature this property was looked up against.
		feature: &'static str,
		/// The unrecognised property id.
		property: u8,
	},

	/// The feature recognises the operation but deliberately does not
	/// support it (`OriginalStrings`, per §9).
	#[error("feature {0} does not support this operation")]
	Unsupported(&'static str),

	/// A descriptor failed its own read/write/print/parse.
	#[error(transparent)]
	Descriptor(#[from] DescriptorError),

	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
}

/// The game-entity category an Action00 record's properties apply to.
///
/// The source carries one variant per historical feature (trains, road
/// vehicles, ships, ...); this crate fully schemas two of them plus
/// `OriginalStrings` and a raw fallback for the rest, per §4.5/§9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
	/// Feature byte `0x07`: town buildings ("Houses").
	Houses,
	/// Feature byte `0x09`: industry tiles.
	IndustryTiles,
	/// Feature byte `0x15` in the original table: global strings, every
	/// operation raises [`PropertyError::Unsupported`].
	OriginalStrings,
	/// Any other feature byte: properties are stored and round-tripped as
	/// a single raw byte each, the modal width for undocumented
	/// properties, documented as a known scope limitation (§4.5).
	Other(u8),
}

impl FeatureKind {
	/// Resolves a feature byte read from an Action00 header.
	pub fn from_byte(byte: u8) -> Self {
		match byte {
			0x07 => Self::Houses,
			0x09 => Self::IndustryTiles,
			0x15 => Self::OriginalStrings,
			other => Self::Other(other),
		}
	}

	/// The feature byte this kind serialises as.
	pub fn to_byte(self) -> u8 {
		match self {
			Self::Houses => 0x07,
			Self::IndustryTiles => 0x09,
			Self::OriginalStrings => 0x15,
			Self::Other(byte) => byte,
		}
	}

	/// Stable text name used as the `feature` field of an Action00 record
	/// header (`properties<Houses, 0x00> { ... }`).
	pub fn name(self) -> &'static str {
		match self {
			Self::Houses => "Houses",
			Self::IndustryTiles => "IndustryTiles",
			Self::OriginalStrings => "OriginalStrings",
			Self::Other(_) => "Other",
		}
	}

	/// Resolves a feature by its text name, falling back to [`Self::Other`]
	/// with byte `0xFF` for anything unrecognised (the parser has no
	/// numeric feature byte to fall back on from text alone).
	pub fn from_name(name: &str) -> Self {
		match name {
			"Houses" => Self::Houses,
			"IndustryTiles" => Self::IndustryTiles,
			"OriginalStrings" => Self::OriginalStrings,
			_ => Self::Other(0xFF),
		}
	}
}

/// Capability set implemented by every feature's property-instance type
/// (§9: "interface abstraction, not inheritance").
pub trait FeatureInstance: Debug {
	/// Reads one property's value from `bytes` at `offset`, advancing it
	/// past everything the property consumes (some properties, like
	/// Houses' `0x0A`, consume more than one wire field).
	fn read_property(&mut self, bytes: &[u8], offset: &mut usize, property: u8) -> Result<(), PropertyError>;

	/// Appends the wire form of `property`'s current value.
	fn write_property(&self, out: &mut Vec<u8>, property: u8) -> Result<(), PropertyError>;

	/// Appends this instance's rendering of `property` to `out`, one line
	/// per text field, each already indented by `indent` spaces.
	fn print_property(&self, out: &mut String, property: u8, indent: usize) -> Result<(), PropertyError>;

	/// Parses the value following `name:` (already consumed by the
	/// caller) and returns the property id it belongs to.
	fn parse_property(&mut self, tokens: &mut TokenStream, name: &str) -> Result<u8, PropertyError>;
}

/// Constructs a fresh, zeroed feature instance for `kind`.
pub fn make_feature(kind: FeatureKind) -> Box<dyn FeatureInstance> {
	match kind {
		FeatureKind::Houses => Box::new(houses::Houses::default()),
		FeatureKind::IndustryTiles => Box::new(industry_tiles::IndustryTiles::default()),
		FeatureKind::OriginalStrings => Box::new(fallback::OriginalStrings),
		FeatureKind::Other(_) => Box::new(fallback::RawFallback::default()),
	}
}

//! The top-level package model and its orchestrating `decode`/`encode`/
//! `print`/`parse` entry points (§3, §9).
//!
//! Grounded on the original implementation's single class owning both the
//! record list and the sprite-id map and exposing read/write/print/parse
//! as its own methods; this crate keeps the same four-operation surface
//! but the package owns its sprite map by value and a `SpriteIndex` child
//! stores only the id it resolves against, rather than a reference-counted
//! pointer into shared storage (§9 "Shared sprite ownership").

use crate::container_format;
use crate::context::Context;
use crate::error::YaglError;
use crate::record::{Record, RecordKind, RealSprite};
use crate::text::{TokenKind, TokenStream};

/// Which on-disk container dialect a package uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
	/// The original, data-section-only dialect: v1 inline real sprites.
	V1,
	/// The later dialect: a signed header plus a trailing graphics section
	/// of sprite-id-keyed real sprites.
	V2,
}

/// An ordered map from sprite id to the sequence of [`RealSprite`] zoom/
/// depth variants stored under it. A plain `Vec` of `(id, Vec<RealSprite>)`
/// pairs rather than a `HashMap`: insertion order is load-bearing (§3,
/// §5 "Ordering") and this crate never looks sprites up by anything but id,
/// so a small linear scan costs nothing a hash map would meaningfully save.
#[derive(Debug, Clone, Default)]
pub struct SpriteMap {
	entries: Vec<(u32, Vec<RealSprite>)>,
}

impl SpriteMap {
	/// Creates an empty sprite map.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends one real sprite under `id`, creating a new bucket in
	/// insertion order if `id` has not been seen before.
	pub fn push(&mut self, id: u32, sprite: RealSprite) {
		match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
			Some((_, sprites)) => sprites.push(sprite),
			None => self.entries.push((id, vec![sprite])),
		}
	}

	/// Returns the zoom/depth variants stored under `id`, if any.
	pub fn get(&self, id: u32) -> Option<&[RealSprite]> {
		self.entries.iter().find(|(existing, _)| *existing == id).map(|(_, sprites)| sprites.as_slice())
	}

	/// `true` when no sprite id has been recorded.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Number of distinct sprite ids recorded.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Iterates buckets in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &(u32, Vec<RealSprite>)> {
		self.entries.iter()
	}
}

/// The top-level decoded (or parsed) package: container format, declared
/// GRF version, the V2 header fields (stored verbatim, never recomputed,
/// so a V2 package round-trips bit-exactly even when those fields hold
/// values this crate never reads for anything), the top-level record
/// list, and the sprite-id map.
#[derive(Debug, Clone)]
pub struct Package {
	/// Which container dialect this package uses.
	pub format: ContainerFormat,
	/// GRF format version, carried by the package's `Action08` record (0 if
	/// the package has none).
	pub version: u8,
	/// V2 header's graphics-compression byte; meaningless for V1.
	pub graphics_compression: u8,
	/// V2 header's sprite-section offset; meaningless for V1.
	pub sprite_section_offset: u32,
	/// Top-level records, in file order; container children are nested
	/// inside their [`Record::Container`] entry rather than listed here.
	pub records: Vec<Record>,
	/// The sprite-id-keyed real-sprite store (V2's graphics section; empty
	/// for V1, whose real sprites live inline in `records`' containers).
	pub sprites: SpriteMap,
}

impl Package {
	/// Creates an empty package of the given container format.
	pub fn new(format: ContainerFormat) -> Self {
		Self { format, version: 0, graphics_compression: 0, sprite_section_offset: 0, records: Vec::new(), sprites: SpriteMap::new() }
	}
}

/// Decodes a binary package from `bytes`.
pub fn decode(bytes: &[u8], ctx: &Context) -> Result<Package, YaglError> {
	container_format::decode_package(bytes, ctx)
}

/// Encodes `package` back into its binary form.
pub fn encode(package: &Package, ctx: &Context) -> Result<Vec<u8>, YaglError> {
	container_format::encode_package(package, ctx)
}

/// Renders `package` as a YAGL text script.
pub fn print(package: &Package, ctx: &Context) -> Result<String, YaglError> {
	let mut out = String::new();
	out.push_str("yagl_version: 1:0:0;\n");
	out.push_str(&format!("container: {};\n", format_name(package.format)));
	if package.format == ContainerFormat::V2 {
		out.push_str(&format!("sprite_section_offset: {:#010X};\n", package.sprite_section_offset));
		out.push_str(&format!("graphics_compression: {:#04X};\n", package.graphics_compression));
	}
	out.push('\n');

	for record in &package.records {
		out.push_str(&record.print(0)?);
	}

	if !package.sprites.is_empty() {
		out.push_str("\nsprites\n{\n");
		for (id, sprites) in package.sprites.iter() {
			out.push_str(&format!("    sprite {id:#X}\n    {{\n"));
			for sprite in sprites {
				out.push_str(&sprite.print(8));
			}
			out.push_str("    }\n");
		}
		out.push_str("}\n");
	}

	if ctx.debug {
		log::debug!("printed package: {} top-level record(s), {} sprite id(s)", package.records.len(), package.sprites.len());
	}

	Ok(out)
}

/// Parses a YAGL text script back into a package.
pub fn parse(text: &str, ctx: &Context) -> Result<Package, YaglError> {
	let mut tokens = TokenStream::new(text)?;

	tokens.expect_ident("yagl_version")?;
	tokens.expect(TokenKind::Colon)?;
	tokens.match_integer()?;
	tokens.expect(TokenKind::Colon)?;
	tokens.match_integer()?;
	tokens.expect(TokenKind::Colon)?;
	tokens.match_integer()?;
	let _ = tokens.eat(&TokenKind::SemiColon);

	tokens.expect_ident("container")?;
	tokens.expect(TokenKind::Colon)?;
	let format = match tokens.match_ident()?.as_str() {
		"V2" => ContainerFormat::V2,
		_ => ContainerFormat::V1,
	};
	let _ = tokens.eat(&TokenKind::SemiColon);

	let mut package = Package::new(format);

	if format == ContainerFormat::V2 {
		tokens.expect_ident("sprite_section_offset")?;
		tokens.expect(TokenKind::Colon)?;
		package.sprite_section_offset = tokens.match_integer()? as u32;
		let _ = tokens.eat(&TokenKind::SemiColon);
		tokens.expect_ident("graphics_compression")?;
		tokens.expect(TokenKind::Colon)?;
		package.graphics_compression = tokens.match_integer()? as u8;
		let _ = tokens.eat(&TokenKind::SemiColon);
	}

	let mut records = Vec::new();
	while !tokens.at_eof() && tokens.peek().kind != TokenKind::Ident("sprites".to_string()) {
		records.push(Record::parse(&mut tokens)?);
	}
	package.records = records;

	if tokens.peek().kind == TokenKind::Ident("sprites".to_string()) {
		tokens.expect_ident("sprites")?;
		tokens.expect(TokenKind::OpenBrace)?;
		while tokens.peek().kind != TokenKind::CloseBrace {
			tokens.expect_ident("sprite")?;
			let id = tokens.match_integer()? as u32;
			tokens.expect(TokenKind::OpenBrace)?;
			while tokens.peek().kind != TokenKind::CloseBrace {
				tokens.expect_ident("RealSprite")?;
				let sprite = RealSprite::parse(&mut tokens)?;
				package.sprites.push(id, sprite);
			}
			tokens.expect(TokenKind::CloseBrace)?;
		}
		tokens.expect(TokenKind::CloseBrace)?;
	}

	if let Some(version) = find_version(&package.records) {
		package.version = version;
	}

	if ctx.debug {
		log::debug!("parsed package: {} top-level record(s)", package.records.len());
	}

	Ok(package)
}

fn format_name(format: ContainerFormat) -> &'static str {
	match format {
		ContainerFormat::V1 => "V1",
		ContainerFormat::V2 => "V2",
	}
}

fn find_version(records: &[Record]) -> Option<u8> {
	records.iter().find_map(|record| match (record.kind(), record) {
		(RecordKind::Action08, Record::Action08(action)) => Some(action.grf_version),
		_ => None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::Action08;

	#[test]
	fn new_package_is_empty() {
		let package = Package::new(ContainerFormat::V1);
		assert!(package.records.is_empty());
		assert!(package.sprites.is_empty());
		assert_eq!(package.version, 0);
	}

	#[test]
	fn sprite_map_preserves_insertion_and_zoom_order() {
		let mut map = SpriteMap::new();
		map.push(5, RealSprite { sprite_id: 5, width: 1, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![1] });
		map.push(2, RealSprite { sprite_id: 2, width: 1, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![2] });
		map.push(5, RealSprite { sprite_id: 5, width: 2, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![3, 4] });

		let ids: Vec<u32> = map.iter().map(|(id, _)| *id).collect();
		assert_eq!(ids, vec![5, 2]);
		assert_eq!(map.get(5).unwrap().len(), 2);
	}

	#[test]
	fn print_then_parse_round_trips_an_action08_package() {
		let ctx = Context::default();
		let mut package = Package::new(ContainerFormat::V1);
		package.records.push(Record::Action08(Action08 { grf_version: 7, grf_id: 0xABCD, name: "YAGL".to_string() }));
		package.version = 7;

		let text = print(&package, &ctx).unwrap();
		let parsed = parse(&text, &ctx).unwrap();
		assert_eq!(parsed.version, 7);
		assert_eq!(parsed.records.len(), 1);
		match &parsed.records[0] {
			Record::Action08(action) => assert_eq!(action.grf_id, 0xABCD),
			_ => panic!("expected an Action08 record"),
		}
	}
}

//! Whole-package round-trip tests driven through the public `decode`/
//! `encode`/`print`/`parse` entry points, rather than any one module's own
//! unit tests.

use test_log::test;
use yagl_core::context::Context;
use yagl_core::package::{decode, encode, parse, print, ContainerFormat, Package};
use yagl_core::record::{Action08, ContainerKind, ContainerRecord, Record, RecolourTable};

#[test]
fn encode_decode_round_trips_a_v1_container_with_sprite_and_recolour_children() {
	let ctx = Context::default();
	let header = ContainerRecord::read(ContainerKind::Action01, &[0x07, 0x03]).unwrap();
	let sprite = Record::RealSprite(yagl_core::record::RealSprite {
		sprite_id: 1,
		width: 2,
		height: 1,
		x_offset: 0,
		y_offset: 0,
		flags: 0x01,
		pixels: vec![0x01, 0x02],
	});
	let fake = Record::FakeSprite;
	let recolour = Record::RecolourTable(RecolourTable { table: (0..=255u8).collect() });

	let mut package = Package::new(ContainerFormat::V1);
	package.records.push(Record::Container { record: header, children: vec![sprite, fake, recolour] });

	let bytes = encode(&package, &ctx).unwrap();
	let decoded = decode(&bytes, &ctx).unwrap();
	assert_eq!(encode(&decoded, &ctx).unwrap(), bytes);

	match &decoded.records[0] {
		Record::Container { children, .. } => {
			assert_eq!(children.len(), 3);
			assert!(matches!(children[0], Record::RealSprite(_)));
			assert!(matches!(children[1], Record::FakeSprite));
			assert!(matches!(children[2], Record::RecolourTable(_)));
		}
		other => panic!("expected a container, got {other:?}"),
	}
}

#[test]
fn print_then_parse_then_encode_round_trips_a_houses_package() {
	let ctx = Context::default();
	let bytes = [
		0xFF, 0x00, // pseudo-sprite, Action00
		0x07, // feature = Houses
		0x02, // 2 properties
		0x01, // 1 instance
		0x05, // first_id
		0x08, 0x42, // substitute_building_id = 0x42
		0x0F, 0x42, // accepts_goods=true, goods_etc_acceptance=0x42
	];
	let length_prefixed: Vec<u8> = {
		let mut out = Vec::new();
		out.push(bytes.len() as u8);
		out.push(0);
		out.extend_from_slice(&bytes);
		out.push(0);
		out.push(0);
		out
	};

	let package = decode(&length_prefixed, &ctx).unwrap();
	let text = print(&package, &ctx).unwrap();
	assert!(text.contains("Action00<Houses, 0x5>"));
	assert!(text.contains("accepts_goods: true;"));
	assert!(text.contains("goods_etc_acceptance: 0x42;"));

	let reparsed = parse(&text, &ctx).unwrap();
	assert_eq!(encode(&reparsed, &ctx).unwrap(), length_prefixed);
}

#[test]
fn action08_sets_package_version_across_decode_and_parse() {
	let ctx = Context::default();
	let mut package = Package::new(ContainerFormat::V1);
	package.records.push(Record::Action08(Action08 { grf_version: 7, grf_id: 0xABCD, name: "YAGL".to_string() }));
	package.version = 7;

	let bytes = encode(&package, &ctx).unwrap();
	let decoded = decode(&bytes, &ctx).unwrap();
	assert_eq!(decoded.version, 7);

	let text = print(&decoded, &ctx).unwrap();
	let reparsed = parse(&text, &ctx).unwrap();
	assert_eq!(reparsed.version, 7);
	assert_eq!(encode(&reparsed, &ctx).unwrap(), bytes);
}

#[test]
fn v2_graphics_section_survives_a_full_decode_print_parse_encode_cycle() {
	let ctx = Context::default();
	let mut package = Package::new(ContainerFormat::V2);
	package.sprite_section_offset = 0x20;
	package.graphics_compression = 0x00;
	package.sprites.push(
		1,
		yagl_core::record::RealSprite { sprite_id: 1, width: 2, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![9, 8] },
	);

	let bytes = encode(&package, &ctx).unwrap();
	let decoded = decode(&bytes, &ctx).unwrap();
	let text = print(&decoded, &ctx).unwrap();
	assert!(text.contains("sprites"));

	let reparsed = parse(&text, &ctx).unwrap();
	assert_eq!(reparsed.sprites.get(1).unwrap()[0].pixels, vec![9, 8]);
}

//! Child-grouping engine: attaches a container record's declared children
//! as they stream past, and flattens them back out again on encode (§4.7,
//! §9).
//!
//! `NewGRFData::read()`'s main loop tracks this with an inline `num_sprites`
//! counter. This crate factors the
//! same bookkeeping into an explicit stack of in-progress containers, so
//! the record loop itself (in [`crate::container_format`]) stays a flat
//! read-one-record-at-a-time loop regardless of nesting.

use crate::dispatch::Dispatched;
use crate::error::YaglError;
use crate::record::{ContainerRecord, Record};

struct Frame {
	header: ContainerRecord,
	remaining: u32,
	children: Vec<Record>,
}

/// Accumulates records read one at a time into a flat top-level list,
/// automatically nesting each container's declared children underneath it.
pub struct Grouper {
	stack: Vec<Frame>,
	top_level: Vec<Record>,
}

impl Grouper {
	/// Creates an empty grouper.
	pub fn new() -> Self {
		Self { stack: Vec::new(), top_level: Vec::new() }
	}

	/// `true` while a container is still waiting for more of its declared
	/// children; dispatch uses this to decide whether a recolour table is
	/// expected or anomalous.
	pub fn in_container(&self) -> bool {
		!self.stack.is_empty()
	}

	/// Feeds one classified record into the grouper, attaching it to the
	/// innermost open container if any are still waiting for children.
	pub fn push(&mut self, dispatched: Dispatched) {
		match dispatched {
			Dispatched::Container(header) => {
				let remaining = header.num_children();
				self.stack.push(Frame { header, remaining, children: Vec::new() });
				self.close_finished_frames();
			}
			Dispatched::Leaf(record) => {
				self.attach(record);
				self.close_finished_frames();
			}
		}
	}

	fn attach(&mut self, record: Record) {
		match self.stack.last_mut() {
			Some(frame) => {
				frame.children.push(record);
				frame.remaining = frame.remaining.saturating_sub(1);
			}
			None => self.top_level.push(record),
		}
	}

	fn close_finished_frames(&mut self) {
		while matches!(self.stack.last(), Some(frame) if frame.remaining == 0) {
			let frame = self.stack.pop().expect("checked by matches! above");
			self.attach(Record::Container { record: frame.header, children: frame.children });
		}
	}

	/// Returns the finished top-level record list. Errors if any container
	/// is still waiting for children (the stream ended mid-container).
	pub fn finish(self) -> Result<Vec<Record>, YaglError> {
		if let Some(frame) = self.stack.into_iter().next() {
			return Err(YaglError::Framer(crate::error::FramerError::LengthMismatch {
				declared: frame.remaining as usize,
				consumed: 0,
			}));
		}
		Ok(self.top_level)
	}
}

impl Default for Grouper {
	fn default() -> Self {
		Self::new()
	}
}

/// Flattens a top-level record list back into the order [`Grouper`] would
/// have read it in: each container immediately followed by its children.
pub fn flatten(records: &[Record]) -> Vec<&Record> {
	let mut out = Vec::new();
	for record in records {
		flatten_into(record, &mut out);
	}
	out
}

fn flatten_into<'a>(record: &'a Record, out: &mut Vec<&'a Record>) {
	out.push(record);
	if let Record::Container { children, .. } = record {
		for child in children {
			flatten_into(child, out);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::record::{ContainerKind, RealSprite};

	fn real_sprite_leaf(id: u32) -> Dispatched {
		Dispatched::Leaf(Record::RealSprite(RealSprite { sprite_id: id, width: 1, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![1] }))
	}

	#[test]
	fn attaches_children_to_the_preceding_container() {
		let header = ContainerRecord::read(ContainerKind::Action01, &[0x07, 0x02]).unwrap();
		let mut grouper = Grouper::new();
		grouper.push(Dispatched::Container(header));
		grouper.push(real_sprite_leaf(1));
		grouper.push(real_sprite_leaf(2));
		let records = grouper.finish().unwrap();
		assert_eq!(records.len(), 1);
		match &records[0] {
			Record::Container { children, .. } => assert_eq!(children.len(), 2),
			_ => panic!("expected a container"),
		}
	}

	#[test]
	fn top_level_leaves_stay_flat() {
		let mut grouper = Grouper::new();
		grouper.push(real_sprite_leaf(1));
		grouper.push(real_sprite_leaf(2));
		let records = grouper.finish().unwrap();
		assert_eq!(records.len(), 2);
	}

	#[test]
	fn unfinished_container_is_an_error() {
		let header = ContainerRecord::read(ContainerKind::Action01, &[0x07, 0x02]).unwrap();
		let mut grouper = Grouper::new();
		grouper.push(Dispatched::Container(header));
		grouper.push(real_sprite_leaf(1));
		assert!(grouper.finish().is_err());
	}

	#[test]
	fn flatten_round_trips_nesting_order() {
		let header = ContainerRecord::read(ContainerKind::Action01, &[0x07, 0x01]).unwrap();
		let child = Record::RealSprite(RealSprite { sprite_id: 1, width: 1, height: 1, x_offset: 0, y_offset: 0, flags: 0x01, pixels: vec![1] });
		let records = vec![Record::Container { record: header, children: vec![child] }];
		let flat = flatten(&records);
		assert_eq!(flat.len(), 2);
	}
}

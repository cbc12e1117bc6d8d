//! Fallback storage for every action kind without a full field-level
//! schema: the raw body is kept verbatim so `encode(decode(bytes)) ==
//! bytes` holds even for the ~20 action kinds the feature list (§4.4)
//! does not model byte-by-byte.

/// An action record preserved as an opaque byte blob.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OpaqueAction {
	/// The record body exactly as read, excluding the action byte.
	pub body: Vec<u8>,
}

impl OpaqueAction {
	/// Wraps a raw body.
	pub fn read(bytes: &[u8]) -> Self {
		Self { body: bytes.to_vec() }
	}

	/// Returns the stored body unchanged.
	pub fn write(&self) -> Vec<u8> {
		self.body.clone()
	}

	/// Renders the body as a flat hex byte list, since an unschema'd
	/// action has no field names to print.
	pub fn print(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str("raw: [ ");
		out.push_str(&self.body.iter().map(|b| format!("{b:#04X}")).collect::<Vec<_>>().join(", "));
		out.push_str(" ];\n");
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn preserves_the_body_verbatim() {
		let bytes = [0x01, 0x02, 0x03, 0xFF];
		let action = OpaqueAction::read(&bytes);
		assert_eq!(action.write(), bytes);
	}

	#[test]
	fn prints_as_a_raw_byte_list() {
		let action = OpaqueAction::read(&[0xAB, 0xCD]);
		assert_eq!(action.print(0), "raw: [ 0xAB, 0xCD ];\n");
	}
}

//! Action08: declares the GRF's identity (format version, id, name) and is
//! the record that carries [`crate::context::Context::format_version`]
//! into the rest of a decode (§4.4, §9).

use crate::stream::{read_u32, read_u8, write_u32, write_u8, StreamError};
use crate::text::{ParseError, TokenKind, TokenStream};
use thiserror::Error;

/// Errors specific to Action08's own framing.
#[derive(Debug, Error)]
pub enum Action08Error {
	/// A stream primitive ran out of input.
	#[error(transparent)]
	Stream(#[from] StreamError),
	/// The text parser produced an unexpected token.
	#[error(transparent)]
	Parse(#[from] ParseError),
	/// The name field was not valid UTF-8.
	#[error("grf name is not valid UTF-8")]
	InvalidName,
}

/// A GRF identity record: version byte, 32-bit id, and a null-terminated
/// display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action08 {
	/// Format version this GRF declares itself as (propagated into
	/// [`crate::context::Context`] by the orchestrator on decode).
	pub grf_version: u8,
	/// 32-bit GRF id.
	pub grf_id: u32,
	/// Human-readable display name.
	pub name: String,
}

impl Action08 {
	/// Reads an Action08 body (everything after the `0x08` action byte).
	pub fn read(bytes: &[u8]) -> Result<Self, Action08Error> {
		let mut offset = 0;
		let (grf_version, n) = read_u8(bytes, offset)?;
		offset += n;
		let (grf_id, n) = read_u32(bytes, offset)?;
		offset += n;

		let nul = bytes[offset..].iter().position(|&b| b == 0).unwrap_or(bytes.len() - offset);
		let name = std::str::from_utf8(&bytes[offset..offset + nul]).map_err(|_| Action08Error::InvalidName)?.to_string();

		Ok(Self { grf_version, grf_id, name })
	}

	/// Writes this record's body (excluding the `0x08` action byte).
	pub fn write(&self) -> Vec<u8> {
		let mut out = Vec::new();
		write_u8(&mut out, self.grf_version);
		write_u32(&mut out, self.grf_id);
		out.extend_from_slice(self.name.as_bytes());
		write_u8(&mut out, 0x00);
		out
	}

	/// Renders `Action08 { grf_version: 0x7; grf_id: 0xABCD; name: "YAGL"; }`.
	pub fn print(&self, indent: usize) -> String {
		let mut out = String::new();
		crate::text::pad(&mut out, indent);
		out.push_str("Action08\n");
		crate::text::pad(&mut out, indent);
		out.push_str("{\n");
		crate::text::pad(&mut out, indent + 4);
		out.push_str(&format!("grf_version: {:#X};\n", self.grf_version));
		crate::text::pad(&mut out, indent + 4);
		out.push_str(&format!("grf_id: {:#X};\n", self.grf_id));
		crate::text::pad(&mut out, indent + 4);
		out.push_str(&format!("name: {:?};\n", self.name));
		crate::text::pad(&mut out, indent);
		out.push_str("}\n");
		out
	}

	/// Parses an `Action08 { ... }` block. The leading `Action08` keyword
	/// must already be consumed by the caller.
	pub fn parse(tokens: &mut TokenStream) -> Result<Self, Action08Error> {
		tokens.expect(TokenKind::OpenBrace)?;
		let mut grf_version = 0u8;
		let mut grf_id = 0u32;
		let mut name = String::new();

		while tokens.peek().kind != TokenKind::CloseBrace {
			let field = tokens.match_ident()?;
			tokens.expect(TokenKind::Colon)?;
			match field.as_str() {
				"grf_version" => grf_version = tokens.match_integer()? as u8,
				"grf_id" => grf_id = tokens.match_integer()? as u32,
				"name" => name = tokens.match_string()?,
				_ => return Err(ParseError::Unexpected { expected: "known Action08 field".into(), found: tokens.peek().kind.clone(), line: tokens.peek().line, column: tokens.peek().column }.into()),
			}
			let _ = tokens.eat(&TokenKind::SemiColon);
		}
		tokens.expect(TokenKind::CloseBrace)?;
		Ok(Self { grf_version, grf_id, name })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn binary_round_trips() {
		let action = Action08 { grf_version: 7, grf_id: 0xABCD, name: "YAGL".to_string() };
		let bytes = action.write();
		let decoded = Action08::read(&bytes).unwrap();
		assert_eq!(decoded, action);
	}

	#[test]
	fn text_round_trips() {
		let action = Action08 { grf_version: 7, grf_id: 0xABCD, name: "YAGL".to_string() };
		let printed = action.print(0);
		let mut tokens = TokenStream::new(printed.trim_start_matches("Action08")).unwrap();
		let parsed = Action08::parse(&mut tokens).unwrap();
		assert_eq!(parsed, action);
	}
}

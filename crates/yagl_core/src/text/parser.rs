//! A small token-stream cursor shared by every record variant's `parse`.
//!
//! Record and property parsers do not build a generic AST: each variant
//! matches the tokens it expects directly off a [`TokenStream`], mirroring
//! the original implementation's hand-written recursive-descent parse
//! methods (`Record::parse`, `Action00Feature::parse_property`, ...).

use thiserror::Error;

use super::lexer::{Lexer, Token, TokenKind};

/// Errors raised while parsing a YAGL token stream.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	/// The parser expected one token kind but found another.
	#[error("expected {expected} at line {line}, column {column}, found {found:?}")]
	Unexpected {
		/// Human-readable description of what was expected.
		expected: String,
		/// The token kind actually found.
		found: TokenKind,
		/// Line of the offending token.
		line: u32,
		/// Column of the offending token.
		column: u32,
	},

	/// A lex error surfaced while tokenising the source.
	#[error(transparent)]
	Lex(#[from] super::lexer::LexError),
}

/// Cursor over a pre-tokenised YAGL source.
pub struct TokenStream {
	tokens: Vec<Token>,
	pos: usize,
}

impl TokenStream {
	/// Tokenises `source` and returns a cursor positioned at its first token.
	pub fn new(source: &str) -> Result<Self, ParseError> {
		let tokens = Lexer::new(source).tokenize()?;
		Ok(Self { tokens, pos: 0 })
	}

	/// Returns the current token without consuming it.
	pub fn peek(&self) -> &Token {
		&self.tokens[self.pos.min(self.tokens.len() - 1)]
	}

	/// Returns `true` when the current token is [`TokenKind::Eof`].
	pub fn at_eof(&self) -> bool {
		self.peek().kind == TokenKind::Eof
	}

	fn bump(&mut self) -> Token {
		let token = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
		if self.pos + 1 < self.tokens.len() {
			self.pos += 1;
		}
		token
	}

	fn unexpected(&self, expected: impl Into<String>) -> ParseError {
		let token = self.peek();
		ParseError::Unexpected {
			expected: expected.into(),
			found: token.kind.clone(),
			line: token.line,
			column: token.column,
		}
	}

	/// Consumes and returns an identifier, whatever its text.
	pub fn match_ident(&mut self) -> Result<String, ParseError> {
		match &self.peek().kind {
			TokenKind::Ident(name) => {
				let name = name.clone();
				self.bump();
				Ok(name)
			}
			_ => Err(self.unexpected("identifier")),
		}
	}

	/// Consumes an identifier and asserts its text equals `expected`.
	pub fn expect_ident(&mut self, expected: &str) -> Result<(), ParseError> {
		let error = self.unexpected(format!("identifier '{expected}'"));
		match &self.peek().kind {
			TokenKind::Ident(name) if name == expected => {
				self.bump();
				Ok(())
			}
			_ => Err(error),
		}
	}

	/// Consumes an integer literal (decimal or `0x` hex, optionally
	/// `-`-prefixed).
	pub fn match_integer(&mut self) -> Result<i64, ParseError> {
		match self.peek().kind {
			TokenKind::Integer(value) => {
				self.bump();
				Ok(value)
			}
			_ => Err(self.unexpected("integer")),
		}
	}

	/// Consumes a string literal.
	pub fn match_string(&mut self) -> Result<String, ParseError> {
		match &self.peek().kind {
			TokenKind::Str(value) => {
				let value = value.clone();
				self.bump();
				Ok(value)
			}
			_ => Err(self.unexpected("string literal")),
		}
	}

	/// Consumes a token of exactly the given punctuation kind.
	pub fn expect(&mut self, kind: TokenKind) -> Result<(), ParseError> {
		if self.peek().kind == kind {
			self.bump();
			Ok(())
		} else {
			Err(self.unexpected(format!("{kind:?}")))
		}
	}

	/// Returns `true` and consumes the token if the current token matches
	/// `kind`, otherwise leaves the cursor untouched.
	pub fn eat(&mut self, kind: &TokenKind) -> bool {
		if &self.peek().kind == kind {
			self.bump();
			true
		} else {
			false
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matches_ident_colon_integer_semicolon() {
		let mut ts = TokenStream::new("population: 10;").unwrap();
		assert_eq!(ts.match_ident().unwrap(), "population");
		ts.expect(TokenKind::Colon).unwrap();
		assert_eq!(ts.match_integer().unwrap(), 10);
		ts.expect(TokenKind::SemiColon).unwrap();
		assert!(ts.at_eof());
	}

	#[test]
	fn expect_ident_reports_position_on_mismatch() {
		let mut ts = TokenStream::new("wrong_name").unwrap();
		let err = ts.expect_ident("expected_name").unwrap_err();
		assert!(matches!(err, ParseError::Unexpected { line: 1, column: 1, .. }));
	}
}

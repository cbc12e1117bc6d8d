//! Tokeniser for the YAGL textual grammar (§6).
//!
//! Whitespace and `//` line comments are insignificant. Identifiers,
//! integers (decimal or `0x`-prefixed hex, optionally `-`-prefixed for
//! signed fields like a sprite's `x_offset`/`y_offset`), quoted strings,
//! and the small set of punctuation the grammar needs (`:`, `;`, `,`, `{`,
//! `}`, `<`, `>`, `[`, `]`, `|`) are the only token kinds.

use thiserror::Error;

/// A lexical token together with the line/column it started at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	/// The token's kind and payload.
	pub kind: TokenKind,
	/// 1-based line number the token started on.
	pub line: u32,
	/// 1-based column number the token started on.
	pub column: u32,
}

/// The kind of a lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
	/// A bare identifier, e.g. `accepts_goods`, `Action00`, `true`.
	Ident(String),
	/// A decimal or `0x`-prefixed hexadecimal integer literal, optionally
	/// `-`-prefixed.
	Integer(i64),
	/// A double-quoted string literal, unescaped.
	Str(String),
	/// `:`
	Colon,
	/// `;`
	SemiColon,
	/// `,`
	Comma,
	/// `{`
	OpenBrace,
	/// `}`
	CloseBrace,
	/// `<`
	OpenAngle,
	/// `>`
	CloseAngle,
	/// `[`
	OpenBracket,
	/// `]`
	CloseBracket,
	/// `|`
	Pipe,
	/// End of input.
	Eof,
}

/// Errors raised while tokenising YAGL text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
	/// An unrecognised character was encountered outside any token.
	#[error("unexpected character {found:?} at line {line}, column {column}")]
	UnexpectedChar {
		/// The offending character.
		found: char,
		/// Line the character was found on.
		line: u32,
		/// Column the character was found at.
		column: u32,
	},

	/// A `"..."` string literal was not closed before end of input.
	#[error("unterminated string literal starting at line {line}, column {column}")]
	UnterminatedString {
		/// Line the string literal started on.
		line: u32,
		/// Column the string literal started on.
		column: u32,
	},
}

/// Tokenises an entire YAGL source string up front.
pub struct Lexer<'a> {
	chars: std::iter::Peekable<std::str::CharIndices<'a>>,
	source: &'a str,
	line: u32,
	column: u32,
}

impl<'a> Lexer<'a> {
	/// Creates a lexer over `source`.
	pub fn new(source: &'a str) -> Self {
		Self {
			chars: source.char_indices().peekable(),
			source,
			line: 1,
			column: 1,
		}
	}

	/// Tokenises the whole source, returning every token including a
	/// trailing [`TokenKind::Eof`].
	pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
		let mut tokens = Vec::new();
		loop {
			let token = self.next_token()?;
			let is_eof = token.kind == TokenKind::Eof;
			tokens.push(token);
			if is_eof {
				break;
			}
		}
		Ok(tokens)
	}

	fn bump(&mut self) -> Option<char> {
		let (_, ch) = self.chars.next()?;
		if ch == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(ch)
	}

	fn peek_char(&mut self) -> Option<char> {
		self.chars.peek().map(|&(_, ch)| ch)
	}

	fn skip_trivia(&mut self) {
		loop {
			match self.peek_char() {
				Some(ch) if ch.is_whitespace() => {
					self.bump();
				}
				Some('/') => {
					let mut lookahead = self.chars.clone();
					lookahead.next();
					if lookahead.peek().map(|&(_, c)| c) == Some('/') {
						while !matches!(self.peek_char(), None | Some('\n')) {
							self.bump();
						}
					} else {
						break;
					}
				}
				_ => break,
			}
		}
	}

	fn next_token(&mut self) -> Result<Token, LexError> {
		self.skip_trivia();
		let line = self.line;
		let column = self.column;

		let Some(ch) = self.peek_char() else {
			return Ok(Token { kind: TokenKind::Eof, line, column });
		};

		let kind = match ch {
			':' => {
				self.bump();
				TokenKind::Colon
			}
			';' => {
				self.bump();
				TokenKind::SemiColon
			}
			',' => {
				self.bump();
				TokenKind::Comma
			}
			'{' => {
				self.bump();
				TokenKind::OpenBrace
			}
			'}' => {
				self.bump();
				TokenKind::CloseBrace
			}
			'<' => {
				self.bump();
				TokenKind::OpenAngle
			}
			'>' => {
				self.bump();
				TokenKind::CloseAngle
			}
			'[' => {
				self.bump();
				TokenKind::OpenBracket
			}
			']' => {
				self.bump();
				TokenKind::CloseBracket
			}
			'|' => {
				self.bump();
				TokenKind::Pipe
			}
			'"' => self.lex_string(line, column)?,
			c if c.is_ascii_digit() => self.lex_number(),
			'-' if self.peek_is_sign_of_number() => self.lex_number(),
			c if c.is_alphabetic() || c == '_' => self.lex_ident(),
			c => {
				return Err(LexError::UnexpectedChar { found: c, line, column });
			}
		};

		Ok(Token { kind, line, column })
	}

	fn lex_string(&mut self, line: u32, column: u32) -> Result<TokenKind, LexError> {
		self.bump(); // opening quote
		let mut value = String::new();
		loop {
			match self.bump() {
				Some('"') => return Ok(TokenKind::Str(value)),
				Some(c) => value.push(c),
				None => return Err(LexError::UnterminatedString { line, column }),
			}
		}
	}

	/// `true` when the `-` under the cursor is a number's sign rather than
	/// some other use of the character (the grammar has no other use for
	/// it, but this keeps the check local to where it matters).
	fn peek_is_sign_of_number(&mut self) -> bool {
		let mut lookahead = self.chars.clone();
		lookahead.next();
		matches!(lookahead.peek(), Some(&(_, c)) if c.is_ascii_digit())
	}

	fn lex_number(&mut self) -> TokenKind {
		let negative = if self.peek_char() == Some('-') {
			self.bump();
			true
		} else {
			false
		};

		let start = self.current_byte_offset();
		if self.peek_char() == Some('0') {
			let mut lookahead = self.chars.clone();
			lookahead.next();
			if matches!(lookahead.peek().map(|&(_, c)| c), Some('x') | Some('X')) {
				self.bump();
				self.bump();
				let hex_start = self.current_byte_offset();
				while matches!(self.peek_char(), Some(c) if c.is_ascii_hexdigit()) {
					self.bump();
				}
				let text = &self.source[hex_start..self.current_byte_offset()];
				let value = i64::from_str_radix(text, 16).unwrap_or(0);
				return TokenKind::Integer(if negative { -value } else { value });
			}
		}
		while matches!(self.peek_char(), Some(c) if c.is_ascii_digit()) {
			self.bump();
		}
		let text = &self.source[start..self.current_byte_offset()];
		let value: i64 = text.parse().unwrap_or(0);
		TokenKind::Integer(if negative { -value } else { value })
	}

	fn lex_ident(&mut self) -> TokenKind {
		let start = self.current_byte_offset();
		while matches!(self.peek_char(), Some(c) if c.is_alphanumeric() || c == '_') {
			self.bump();
		}
		TokenKind::Ident(self.source[start..self.current_byte_offset()].to_string())
	}

	fn current_byte_offset(&mut self) -> usize {
		self.chars.peek().map_or(self.source.len(), |&(idx, _)| idx)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn kinds(source: &str) -> Vec<TokenKind> {
		Lexer::new(source)
			.tokenize()
			.unwrap()
			.into_iter()
			.map(|t| t.kind)
			.collect()
	}

	#[test]
	fn tokenises_identifiers_and_punctuation() {
		assert_eq!(
			kinds("feature: Houses;"),
			vec![
				TokenKind::Ident("feature".into()),
				TokenKind::Colon,
				TokenKind::Ident("Houses".into()),
				TokenKind::SemiColon,
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn tokenises_decimal_and_hex_integers() {
		assert_eq!(
			kinds("10 0x1A 0XFF"),
			vec![
				TokenKind::Integer(10),
				TokenKind::Integer(0x1A),
				TokenKind::Integer(0xFF),
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn tokenises_negative_integers() {
		assert_eq!(
			kinds("-1 -128 -0x7F"),
			vec![
				TokenKind::Integer(-1),
				TokenKind::Integer(-128),
				TokenKind::Integer(-0x7F),
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn skips_line_comments() {
		assert_eq!(
			kinds("foo // a comment\nbar"),
			vec![
				TokenKind::Ident("foo".into()),
				TokenKind::Ident("bar".into()),
				TokenKind::Eof,
			]
		);
	}

	#[test]
	fn unterminated_string_is_an_error() {
		assert_eq!(
			Lexer::new("\"abc").tokenize(),
			Err(LexError::UnterminatedString { line: 1, column: 1 })
		);
	}

	#[test]
	fn unexpected_char_is_an_error() {
		assert_eq!(
			Lexer::new("@").tokenize(),
			Err(LexError::UnexpectedChar { found: '@', line: 1, column: 1 })
		);
	}
}

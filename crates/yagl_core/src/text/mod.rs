//! Tokeniser and token-stream cursor for the YAGL textual grammar (§6).
//!
//! This module supplies the tokenisation contract only; the recursive-descent
//! grammar itself lives alongside each record/property type's own `parse`.

mod lexer;
mod parser;

pub use lexer::{LexError, Lexer, Token, TokenKind};
pub use parser::{ParseError, TokenStream};

/// Indents `out` by `indent` spaces, matching the original implementation's
/// `pad(indent)` convention of plain space runs.
pub fn pad(out: &mut String, indent: usize) {
	out.extend(std::iter::repeat_n(' ', indent));
}

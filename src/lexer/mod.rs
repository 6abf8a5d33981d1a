//! Lexical analysis.
//!
//! This module turns source text into a flat stream of classified tokens:
//!
//! - Character classes (`chars`)
//! - Token kinds and the keyword table (`tokens`)
//! - The cursor, sub-scanners and ordered rule table (`lexer`)
//!
//! Comments and whitespace produce no tokens. A cleaned copy of the
//! source is rebuilt alongside the token stream.

pub mod chars;
pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;

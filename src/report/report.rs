use std::{
    collections::{BTreeMap, BTreeSet},
    io::{self, Write},
};

use crate::lexer::tokens::{Token, TokenKind};

const COLUMN_WIDTH: usize = 15;
const RULE_WIDTH: usize = 35;
const LEXEME_SEPARATOR: &str = "   ";

/// Distinct lexemes per kind. Both levels are ordered, so iteration gives
/// canonical kind order and natural text order.
pub type Categories = BTreeMap<TokenKind, BTreeSet<String>>;

pub fn categorize(tokens: &[Token]) -> Categories {
    let mut categories = Categories::new();
    for token in tokens {
        categories.entry(token.kind).or_default().insert(token.value.clone());
    }
    categories
}

/// One `Type: <KIND>, Value: <text>` line per token, in stream order.
pub fn write_tokens<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    for token in tokens {
        writeln!(out, "{}", token)?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(out: &mut W, tokens: &[Token]) -> io::Result<()> {
    writeln!(out, "{:<width$}{:<width$}", "Category", "Tokens", width = COLUMN_WIDTH)?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

    for (kind, lexemes) in categorize(tokens) {
        let lexemes = lexemes.into_iter().collect::<Vec<_>>();
        writeln!(
            out,
            "{:<width$}{}",
            kind.name(),
            lexemes.join(LEXEME_SEPARATOR),
            width = COLUMN_WIDTH
        )?;
    }
    Ok(())
}

pub fn write_cleaned<W: Write>(out: &mut W, cleaned: &str) -> io::Result<()> {
    writeln!(out, "Cleaned-up Input:")?;
    writeln!(out, "{}", cleaned)?;
    writeln!(out)
}

pub fn render(tokens: &[Token]) -> io::Result<()> {
    write_tokens(&mut io::stdout().lock(), tokens)
}

pub fn summarize(tokens: &[Token]) -> io::Result<()> {
    write_summary(&mut io::stdout().lock(), tokens)
}

pub fn print_cleaned(cleaned: &str) -> io::Result<()> {
    write_cleaned(&mut io::stdout().lock(), cleaned)
}

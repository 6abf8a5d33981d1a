//! ASCII character classes used by the scanner.
//!
//! None of these are locale or Unicode aware: anything outside ASCII is
//! neither a letter nor a digit and ends up as an `Unknown` token.

pub fn is_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

pub fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

/// Letters and digits. Underscore is deliberately excluded.
pub fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

pub fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '=' | '<' | '>' | '^' | '/')
}

pub fn is_separator(c: char) -> bool {
    matches!(c, '(' | ')' | '{' | '}' | ',' | ';')
}

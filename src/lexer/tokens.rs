use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    pub static ref KEYWORDS: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("int", TokenKind::Keyword);
        map.insert("float", TokenKind::Keyword);
        map.insert("if", TokenKind::Keyword);
        map.insert("else", TokenKind::Keyword);
        map.insert("while", TokenKind::Keyword);
        map.insert("return", TokenKind::Keyword);
        map.insert("string", TokenKind::Keyword);
        map.insert("do", TokenKind::Keyword);
        map.insert("void", TokenKind::Keyword);
        map.insert("cout", TokenKind::Keyword);
        map.insert("endl", TokenKind::Keyword);
        map.insert("for", TokenKind::Keyword);
        map.insert("#include", TokenKind::Keyword);
        map.insert("using", TokenKind::Keyword);
        map.insert("namespace", TokenKind::Keyword);
        map.insert("std", TokenKind::Keyword);
        map.insert("iostream", TokenKind::Keyword);
        map.insert("fstream", TokenKind::Keyword);
        map.insert("vector", TokenKind::Keyword);
        map
    };
}

/// Returns the kind a scanned word resolves to: `Keyword` when it is in
/// [`KEYWORDS`], `Identifier` otherwise. Matching is exact and case-sensitive.
pub fn lookup_word(word: &str) -> TokenKind {
    KEYWORDS.get(word).copied().unwrap_or(TokenKind::Identifier)
}

/// Lexical category of a token.
///
/// Declaration order is the canonical display order used by the summary.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Literal,
    Operator,
    Separator,
    Unknown,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Literal => "LITERAL",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Separator => "SEPARATOR",
            TokenKind::Unknown => "UNKNOWN",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type: {}, Value: {}", self.kind, self.value)
    }
}

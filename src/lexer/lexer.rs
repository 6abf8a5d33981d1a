use std::rc::Rc;

use tracing::{debug, trace, warn};

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_DEFAULT_HANDLER, MK_TOKEN};

use super::{
    chars::{is_alpha, is_alphanumeric, is_digit, is_operator, is_separator, is_whitespace},
    tokens::{lookup_word, Token, TokenKind},
};

/// A classification rule. Returns `Ok(true)` when it consumed input at the
/// cursor and `Ok(false)` when it declined without moving the cursor.
pub type RuleHandler = fn(&mut Lexer) -> Result<bool, Error>;

#[derive(Clone, Copy)]
pub struct Rule {
    name: &'static str,
    handler: RuleHandler,
}

pub struct Lexer {
    rules: Vec<Rule>,
    tokens: Vec<Token>,
    source: Vec<char>,
    pos: usize,
    file: Rc<String>,
    // Offset of the `/*` currently being skipped, if any.
    comment_start: Option<usize>,
    cleaned: String,
    pending_gap: Option<char>,
}

/// The result of a completed scan.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    cleaned: String,
}

impl Lexed {
    /// Source rebuilt from the emitted lexemes, with comments dropped and
    /// whitespace collapsed to one separator per gap.
    pub fn cleaned_text(&self) -> &str {
        &self.cleaned
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            rules: vec![
                Rule { name: "whitespace", handler: whitespace_handler },
                Rule { name: "block_comment", handler: block_comment_handler },
                Rule { name: "line_comment", handler: line_comment_handler },
                Rule { name: "directive", handler: directive_handler },
                Rule { name: "word", handler: word_handler },
                Rule { name: "number", handler: number_handler },
                Rule { name: "shift_left", handler: MK_DEFAULT_HANDLER!(TokenKind::Operator, "<<") },
                Rule { name: "shift_right", handler: MK_DEFAULT_HANDLER!(TokenKind::Operator, ">>") },
                Rule { name: "operator", handler: operator_handler },
                Rule { name: "separator", handler: separator_handler },
                Rule { name: "string", handler: string_handler },
                Rule { name: "unknown", handler: unknown_handler },
            ],
            tokens: vec![],
            source: source.chars().collect(),
            pos: 0,
            file: file_name,
            comment_start: None,
            cleaned: String::new(),
            pending_gap: None,
        }
    }

    /// Rule names in the order they are tried at each cursor position.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    pub fn at(&self) -> char {
        self.peek(0).unwrap_or('\0')
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    pub fn starts_with(&self, lexeme: &str) -> bool {
        lexeme.chars().enumerate().all(|(i, c)| self.peek(i) == Some(c))
    }

    fn position(&self, offset: usize) -> Position {
        Position::new(offset, Rc::clone(&self.file))
    }

    /// Pushes a token spanning `start..pos` and appends its text to the
    /// cleaned output.
    pub fn emit(&mut self, kind: TokenKind, value: String, start: usize) {
        self.write_cleaned(&value);
        let span = Span { start: self.position(start), end: self.position(self.pos) };
        self.tokens.push(MK_TOKEN!(kind, value, span));
    }

    fn write_cleaned(&mut self, text: &str) {
        if let Some(gap) = self.pending_gap.take() {
            if !self.cleaned.is_empty() {
                self.cleaned.push(gap);
            }
        }
        self.cleaned.push_str(text);
    }

    /// Records skipped input between two lexemes. Collapses to a newline if
    /// any skipped part contained one, otherwise to a single space.
    fn note_gap(&mut self, newline: bool) {
        self.pending_gap = match (self.pending_gap, newline) {
            (Some('\n'), _) | (_, true) => Some('\n'),
            _ => Some(' '),
        };
    }

    /// Consumes a maximal run of letters and digits.
    fn scan_word(&mut self) -> String {
        let start = self.pos;
        while !self.at_eof() && is_alphanumeric(self.at()) {
            self.pos += 1;
        }
        self.source[start..self.pos].iter().collect()
    }

    /// Consumes digits and at most one decimal point. A second point is left
    /// in place for the next rule.
    fn scan_number(&mut self) -> String {
        let start = self.pos;
        let mut has_decimal = false;
        while !self.at_eof() && (is_digit(self.at()) || self.at() == '.') {
            if self.at() == '.' {
                if has_decimal {
                    break;
                }
                has_decimal = true;
            }
            self.pos += 1;
        }
        self.source[start..self.pos].iter().collect()
    }

    /// Consumes a string body, starting just past the opening quote, up to
    /// and including the closing quote. The closing quote is not part of the
    /// returned text. A backslash is dropped and the character after it kept
    /// as-is. Returns `false` alongside the text when input ran out first.
    fn scan_string(&mut self) -> (String, bool) {
        let mut literal = String::new();
        let mut escaped = false;

        while !self.at_eof() {
            let c = self.at();
            self.pos += 1;

            if escaped {
                literal.push(c);
                escaped = false;
            } else if c == '"' {
                return (literal, true);
            } else if c == '\\' {
                escaped = true;
            } else {
                literal.push(c);
            }
        }

        (literal, false)
    }

    /// One step inside a block comment: closes it on `*/`, otherwise skips a
    /// single character.
    fn skip_comment_body(&mut self) {
        if self.starts_with("*/") {
            self.pos += 2;
            self.comment_start = None;
            return;
        }

        if self.at() == '\n' {
            self.note_gap(true);
        }
        self.pos += 1;
    }

    pub fn run(mut self) -> Result<Lexed, Error> {
        debug!(file = %self.file, chars = self.source.len(), "scanning");
        let rules = self.rules.clone();

        while !self.at_eof() {
            if self.comment_start.is_some() {
                self.skip_comment_body();
                continue;
            }

            let mut matched = false;
            for rule in rules.iter() {
                let start = self.pos;
                if (rule.handler)(&mut self)? {
                    trace!(rule = rule.name, start, end = self.pos, "matched");
                    matched = true;
                    break;
                }
            }
            debug_assert!(matched, "the unknown rule accepts every character");
        }

        if let Some(start) = self.comment_start {
            return Err(Error::new(ErrorImpl::UnterminatedComment, self.position(start)));
        }

        debug!(tokens = self.tokens.len(), "scan finished");
        Ok(Lexed { tokens: self.tokens, cleaned: self.cleaned })
    }
}

fn whitespace_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if lexer.at_eof() || !is_whitespace(lexer.at()) {
        return Ok(false);
    }

    let mut newline = false;
    while !lexer.at_eof() && is_whitespace(lexer.at()) {
        newline |= lexer.at() == '\n';
        lexer.advance_n(1);
    }
    lexer.note_gap(newline);
    Ok(true)
}

fn block_comment_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if !lexer.starts_with("/*") {
        return Ok(false);
    }

    lexer.comment_start = Some(lexer.pos);
    lexer.note_gap(false);
    lexer.advance_n(2);
    Ok(true)
}

fn line_comment_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if !lexer.starts_with("//") {
        return Ok(false);
    }

    while !lexer.at_eof() && lexer.at() != '\n' {
        lexer.advance_n(1);
    }
    lexer.note_gap(false);
    Ok(true)
}

fn directive_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if lexer.at() != '#' || !lexer.peek(1).is_some_and(is_alphanumeric) {
        return Ok(false);
    }

    let start = lexer.pos;
    lexer.advance_n(1);
    let directive = format!("#{}", lexer.scan_word());
    lexer.emit(TokenKind::Keyword, directive, start);
    Ok(true)
}

fn word_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if lexer.at_eof() || !is_alpha(lexer.at()) {
        return Ok(false);
    }

    let start = lexer.pos;
    let word = lexer.scan_word();
    lexer.emit(lookup_word(&word), word, start);
    Ok(true)
}

fn number_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if lexer.at_eof() || !is_digit(lexer.at()) {
        return Ok(false);
    }

    let start = lexer.pos;
    let number = lexer.scan_number();
    lexer.emit(TokenKind::Literal, number, start);
    Ok(true)
}

fn operator_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    single_char_handler(lexer, is_operator, TokenKind::Operator)
}

fn separator_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    single_char_handler(lexer, is_separator, TokenKind::Separator)
}

fn single_char_handler(lexer: &mut Lexer, class: fn(char) -> bool, kind: TokenKind) -> Result<bool, Error> {
    if lexer.at_eof() || !class(lexer.at()) {
        return Ok(false);
    }

    let start = lexer.pos;
    let c = lexer.at();
    lexer.advance_n(1);
    lexer.emit(kind, c.to_string(), start);
    Ok(true)
}

fn string_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    if lexer.at() != '"' {
        return Ok(false);
    }

    let start = lexer.pos;
    lexer.advance_n(1);
    let (literal, terminated) = lexer.scan_string();
    if !terminated {
        warn!(file = %lexer.file, start, "unterminated string literal");
    }

    let mut quoted = String::with_capacity(literal.len() + 2);
    quoted.push('"');
    for c in literal.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');

    // `""` still shows up in the cleaned text but yields no token.
    lexer.write_cleaned(&quoted);
    if !literal.is_empty() {
        let span = Span { start: lexer.position(start), end: lexer.position(lexer.pos) };
        lexer.tokens.push(MK_TOKEN!(TokenKind::Literal, literal, span));
    }
    Ok(true)
}

fn unknown_handler(lexer: &mut Lexer) -> Result<bool, Error> {
    let start = lexer.pos;
    let c = lexer.at();
    lexer.advance_n(1);
    lexer.emit(TokenKind::Unknown, c.to_string(), start);
    Ok(true)
}

/// Scans `source` to completion, returning the tokens and the cleaned text.
pub fn lex(source: &str, file: Option<String>) -> Result<Lexed, Error> {
    Lexer::new(source, file).run()
}

pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    lex(source, file).map(Lexed::into_tokens)
}

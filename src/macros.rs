//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_DEFAULT_HANDLER!` - Creates a rule handler for a fixed lexeme
//!
//! These macros keep the rule table in `lexer.rs` down to one line per rule.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's text
/// * `$span` - The source span
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Literal, "42".to_string(), span);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $span:expr) => {
        Token {
            kind: $kind,
            value: $value,
            span: $span,
        }
    };
}

/// Creates a rule handler that accepts exactly the lexeme `$value`.
///
/// The handler declines (returns `Ok(false)`) without moving the cursor when
/// the input at the cursor does not start with `$value`. Otherwise it emits a
/// token of kind `$kind` and moves the cursor past the lexeme.
///
/// # Example
///
/// ```ignore
/// Rule {
///     name: "shift_left",
///     handler: MK_DEFAULT_HANDLER!(TokenKind::Operator, "<<"),
/// }
/// ```
#[macro_export]
macro_rules! MK_DEFAULT_HANDLER {
    ($kind:expr, $value:literal) => {
        |lexer: &mut Lexer| -> Result<bool, Error> {
            if !lexer.starts_with($value) {
                return Ok(false);
            }

            let start = lexer.pos();
            lexer.advance_n($value.chars().count());
            lexer.emit($kind, String::from($value), start);
            Ok(true)
        }
    };
}

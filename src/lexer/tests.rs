//! Unit tests for the lexer module.
//!
//! Covers:
//! - Keywords, identifiers and directives
//! - Numeric and string literals
//! - Operators and separators, including the greedy shift operators
//! - Comments and the cleaned-text rebuild
//! - Error cases

use pretty_assertions::assert_eq;

use super::{
    chars::{is_alphanumeric, is_operator, is_separator, is_whitespace},
    lexer::{lex, tokenize, Lexer},
    tokens::{lookup_word, TokenKind},
};
use crate::errors::errors::ErrorImpl;

fn pairs(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source, Some("test.cpp".to_string()))
        .unwrap()
        .iter()
        .map(|token| (token.kind, token.value.clone()))
        .collect()
}

fn tok(kind: TokenKind, value: &str) -> (TokenKind, String) {
    (kind, value.to_string())
}

fn cleaned(source: &str) -> String {
    lex(source, None).unwrap().cleaned_text().to_string()
}

use TokenKind::{Identifier, Keyword, Literal, Operator, Separator, Unknown};

#[test]
fn test_tokenize_simple_declaration() {
    assert_eq!(
        pairs("int x = 5;"),
        vec![
            tok(Keyword, "int"),
            tok(Identifier, "x"),
            tok(Operator, "="),
            tok(Literal, "5"),
            tok(Separator, ";"),
        ]
    );
}

#[test]
fn test_tokenize_keywords() {
    let source = "int float if else while return string do void cout endl for using namespace std iostream fstream vector";
    let tokens = pairs(source);

    assert_eq!(tokens.len(), 18);
    for ((kind, value), expected) in tokens.iter().zip(source.split(' ')) {
        assert_eq!(*kind, Keyword);
        assert_eq!(value, expected);
    }
}

#[test]
fn test_keyword_lookup_is_case_sensitive() {
    assert_eq!(lookup_word("int"), Keyword);
    assert_eq!(lookup_word("Int"), Identifier);
    assert_eq!(pairs("Int INT"), vec![tok(Identifier, "Int"), tok(Identifier, "INT")]);
}

#[test]
fn test_tokenize_identifiers() {
    assert_eq!(
        pairs("foo bar2 CamelCase"),
        vec![tok(Identifier, "foo"), tok(Identifier, "bar2"), tok(Identifier, "CamelCase")]
    );
}

#[test]
fn test_underscore_is_not_part_of_a_word() {
    assert_eq!(
        pairs("foo_bar"),
        vec![tok(Identifier, "foo"), tok(Unknown, "_"), tok(Identifier, "bar")]
    );
    assert_eq!(pairs("_x"), vec![tok(Unknown, "_"), tok(Identifier, "x")]);
}

#[test]
fn test_tokenize_directives() {
    assert_eq!(
        pairs("#include <iostream>"),
        vec![
            tok(Keyword, "#include"),
            tok(Operator, "<"),
            tok(Keyword, "iostream"),
            tok(Operator, ">"),
        ]
    );
    assert_eq!(pairs("#define X"), vec![tok(Keyword, "#define"), tok(Identifier, "X")]);
}

#[test]
fn test_lone_hash_is_unknown() {
    assert_eq!(pairs("#"), vec![tok(Unknown, "#")]);
    assert_eq!(pairs("# x"), vec![tok(Unknown, "#"), tok(Identifier, "x")]);
}

#[test]
fn test_tokenize_numbers() {
    assert_eq!(
        pairs("42 3.14 0 100.5"),
        vec![tok(Literal, "42"), tok(Literal, "3.14"), tok(Literal, "0"), tok(Literal, "100.5")]
    );
}

#[test]
fn test_second_decimal_point_splits_number() {
    assert_eq!(
        pairs("1.2.3"),
        vec![tok(Literal, "1.2"), tok(Unknown, "."), tok(Literal, "3")]
    );
}

#[test]
fn test_number_edges() {
    assert_eq!(pairs("5."), vec![tok(Literal, "5.")]);
    assert_eq!(pairs(".5"), vec![tok(Unknown, "."), tok(Literal, "5")]);
    assert_eq!(pairs("1abc"), vec![tok(Literal, "1"), tok(Identifier, "abc")]);
    assert_eq!(pairs("x = -5"), vec![tok(Identifier, "x"), tok(Operator, "="), tok(Operator, "-"), tok(Literal, "5")]);
}

#[test]
fn test_tokenize_strings() {
    assert_eq!(pairs(r#""hi""#), vec![tok(Literal, "hi")]);
    assert_eq!(
        pairs(r#""hello" "multiple words""#),
        vec![tok(Literal, "hello"), tok(Literal, "multiple words")]
    );
}

#[test]
fn test_empty_string_yields_no_token() {
    assert!(pairs(r#""""#).is_empty());
    assert_eq!(cleaned(r#""""#), r#""""#);
    assert_eq!(pairs(r#"x = "";"#), vec![tok(Identifier, "x"), tok(Operator, "="), tok(Separator, ";")]);
}

#[test]
fn test_string_escapes_keep_the_escaped_character() {
    // `\\` is one escaped backslash, not two escape markers, so the quote
    // after it still closes the literal.
    assert_eq!(pairs(r#""quote\"test""#), vec![tok(Literal, "quote\"test")]);
    assert_eq!(pairs(r#""a\nb""#), vec![tok(Literal, "anb")]);
    assert_eq!(pairs(r#""back\\slash""#), vec![tok(Literal, "back\\slash")]);
    assert_eq!(pairs(r#""end\\" x"#), vec![tok(Literal, "end\\"), tok(Identifier, "x")]);
}

#[test]
fn test_unterminated_string_runs_to_end_of_input() {
    assert_eq!(pairs(r#"x "abc"#), vec![tok(Identifier, "x"), tok(Literal, "abc")]);
    assert_eq!(cleaned(r#"x "abc"#), r#"x "abc""#);
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        pairs("+ - * = < > ^ /"),
        "+-*=<>^/".chars().map(|c| tok(Operator, &c.to_string())).collect::<Vec<_>>()
    );
}

#[test]
fn test_tokenize_separators() {
    assert_eq!(
        pairs("( ) { } , ;"),
        "(){},;".chars().map(|c| tok(Separator, &c.to_string())).collect::<Vec<_>>()
    );
}

#[test]
fn test_single_character_rules_follow_character_classes() {
    for byte in 0u8..128 {
        let c = byte as char;
        if is_whitespace(c) || is_alphanumeric(c) || matches!(c, '#' | '"') {
            continue;
        }

        let tokens = pairs(&c.to_string());
        let expected = if is_operator(c) {
            Operator
        } else if is_separator(c) {
            Separator
        } else {
            Unknown
        };
        assert_eq!(tokens, vec![tok(expected, &c.to_string())], "character {:?}", c);
    }
}

#[test]
fn test_shift_operators_are_greedy() {
    assert_eq!(pairs("a << 2"), vec![tok(Identifier, "a"), tok(Operator, "<<"), tok(Literal, "2")]);
    assert_eq!(pairs("<<<"), vec![tok(Operator, "<<"), tok(Operator, "<")]);
    assert_eq!(pairs(">>="), vec![tok(Operator, ">>"), tok(Operator, "=")]);
    assert_eq!(pairs("< <"), vec![tok(Operator, "<"), tok(Operator, "<")]);
}

#[test]
fn test_tokenize_line_comment() {
    assert_eq!(
        pairs("// comment\nint x;"),
        vec![tok(Keyword, "int"), tok(Identifier, "x"), tok(Separator, ";")]
    );
    assert_eq!(pairs("a // trailing"), vec![tok(Identifier, "a")]);
}

#[test]
fn test_tokenize_block_comment() {
    assert_eq!(pairs("x /* a\nb */ y"), vec![tok(Identifier, "x"), tok(Identifier, "y")]);
    assert!(pairs("/**/").is_empty());
    assert_eq!(pairs("a/**/b"), vec![tok(Identifier, "a"), tok(Identifier, "b")]);
}

#[test]
fn test_line_comment_marker_inside_block_comment_is_ignored() {
    assert_eq!(pairs("/* a // b */ c"), vec![tok(Identifier, "c")]);
}

#[test]
fn test_comment_close_outside_comment_is_two_operators() {
    assert_eq!(pairs("*/"), vec![tok(Operator, "*"), tok(Operator, "/")]);
    assert_eq!(pairs("a/b"), vec![tok(Identifier, "a"), tok(Operator, "/"), tok(Identifier, "b")]);
}

#[test]
fn test_unterminated_comment() {
    let error = tokenize("int x; /* never closed", Some("test.cpp".to_string())).unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::UnterminatedComment);
    assert_eq!(error.get_position().0, 7);
    assert_eq!(error.get_position().1.as_str(), "test.cpp");
}

#[test]
fn test_comment_opener_cannot_close_itself() {
    let error = tokenize("/*/", None).unwrap_err();

    assert_eq!(error.get_error_name(), "UnterminatedComment");
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_unrecognised_characters_are_unknown() {
    assert_eq!(
        pairs("x@y"),
        vec![tok(Identifier, "x"), tok(Unknown, "@"), tok(Identifier, "y")]
    );
    assert_eq!(pairs("é"), vec![tok(Unknown, "é")]);
}

#[test]
fn test_empty_input() {
    assert!(pairs("").is_empty());
    assert!(pairs(" \t\r\n").is_empty());
    assert_eq!(cleaned("  \n "), "");
}

#[test]
fn test_token_spans() {
    let tokens = tokenize(r#"int x = "hi";"#, Some("test.cpp".to_string())).unwrap();
    let spans = tokens.iter().map(|t| (t.span.start.0, t.span.end.0)).collect::<Vec<_>>();

    assert_eq!(spans, vec![(0, 3), (4, 5), (6, 7), (8, 12), (12, 13)]);
    assert_eq!(tokens[0].span.start.1.as_str(), "test.cpp");
}

#[test]
fn test_default_file_name() {
    let tokens = tokenize("x", None).unwrap();

    assert_eq!(tokens[0].span.start.1.as_str(), "shell");
}

#[test]
fn test_cleaned_text_collapses_gaps() {
    assert_eq!(cleaned("int  x\n\n=5 ;"), "int x\n=5 ;");
    assert_eq!(cleaned("x /* a\nb */ y"), "x\ny");
    assert_eq!(cleaned("  a // note\n  b  "), "a\nb");
    assert_eq!(cleaned("#include <iostream>"), "#include <iostream>");
}

#[test]
fn test_cleaned_text_reescapes_strings() {
    assert_eq!(cleaned(r#"s = "a\"b";"#), r#"s = "a\"b";"#);
    assert_eq!(cleaned(r#""a\nb""#), r#""anb""#);
}

#[test]
fn test_rule_order() {
    let lexer = Lexer::new("", None);
    let names = lexer.rule_names();

    let index = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert_eq!(names[0], "whitespace");
    assert!(index("block_comment") < index("line_comment"));
    assert!(index("line_comment") < index("operator"));
    assert!(index("shift_left") < index("operator"));
    assert!(index("shift_right") < index("operator"));
    assert!(index("operator") < index("separator"));
    assert!(index("directive") < index("unknown"));
    assert_eq!(*names.last().unwrap(), "unknown");
}

#[test]
fn test_tokenize_small_program() {
    let source = "#include <iostream>\nusing namespace std;\n\nint main() {\n    cout << \"hi\" << endl;\n    return 0;\n}\n";
    let tokens = pairs(source);

    assert_eq!(
        tokens,
        vec![
            tok(Keyword, "#include"),
            tok(Operator, "<"),
            tok(Keyword, "iostream"),
            tok(Operator, ">"),
            tok(Keyword, "using"),
            tok(Keyword, "namespace"),
            tok(Keyword, "std"),
            tok(Separator, ";"),
            tok(Keyword, "int"),
            tok(Identifier, "main"),
            tok(Separator, "("),
            tok(Separator, ")"),
            tok(Separator, "{"),
            tok(Keyword, "cout"),
            tok(Operator, "<<"),
            tok(Literal, "hi"),
            tok(Operator, "<<"),
            tok(Keyword, "endl"),
            tok(Separator, ";"),
            tok(Keyword, "return"),
            tok(Literal, "0"),
            tok(Separator, ";"),
            tok(Separator, "}"),
        ]
    );
}

//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords, identifiers and booleans
//! - Numeric literals in every base and floats
//! - Operators, comments and newlines
//! - Error cases, which end the stream

use super::{
    lexer::{tokenize, Lexer},
    tokens::{Token, TokenKind},
};

fn scan(source: &str) -> Vec<Token> {
    tokenize(source.to_string(), Some("test.calc".to_string()))
}

fn kinds(source: &str) -> Vec<TokenKind> {
    scan(source).iter().map(|token| token.kind).collect()
}

fn kinds_and_values(source: &str) -> Vec<(TokenKind, String)> {
    scan(source)
        .into_iter()
        .map(|token| (token.kind, token.value))
        .collect()
}

#[test]
fn test_tokenize_empty_input() {
    let tokens = scan("");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::EOF);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[0].offset(), 0);
}

#[test]
fn test_tokenize_add() {
    assert_eq!(
        kinds_and_values("4+4"),
        vec![
            (TokenKind::Int, "4".to_string()),
            (TokenKind::Add, "+".to_string()),
            (TokenKind::Int, "4".to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_tokenize_keywords() {
    assert_eq!(
        kinds("if true then 8 else 10 end let var val"),
        vec![
            TokenKind::If,
            TokenKind::Bool,
            TokenKind::Then,
            TokenKind::Int,
            TokenKind::Else,
            TokenKind::Int,
            TokenKind::End,
            TokenKind::Let,
            TokenKind::Var,
            TokenKind::Val,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = scan("foo bar_1 _under CamelCase trueish");

    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar_1");
    assert_eq!(tokens[2].value, "_under");
    assert_eq!(tokens[3].value, "CamelCase");
    assert_eq!(tokens[4].kind, TokenKind::Identifier);
    assert_eq!(tokens[4].value, "trueish");
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_integer_bases() {
    assert_eq!(
        kinds_and_values("42 0x1F 0XaB 0c17 0b101"),
        vec![
            (TokenKind::Int, "42".to_string()),
            (TokenKind::Int, "0x1F".to_string()),
            (TokenKind::Int, "0XaB".to_string()),
            (TokenKind::Int, "0c17".to_string()),
            (TokenKind::Int, "0b101".to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_tokenize_float_arithmetic() {
    let source = "3.1-2.0\n64.*9.0\n10.%2.\n9.9/3.1e-2";

    assert_eq!(
        kinds_and_values(source),
        vec![
            (TokenKind::Float, "3.1".to_string()),
            (TokenKind::Sub, "-".to_string()),
            (TokenKind::Float, "2.0".to_string()),
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::Float, "64.".to_string()),
            (TokenKind::Mul, "*".to_string()),
            (TokenKind::Float, "9.0".to_string()),
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::Float, "10.".to_string()),
            (TokenKind::Rem, "%".to_string()),
            (TokenKind::Float, "2.".to_string()),
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::Float, "9.9".to_string()),
            (TokenKind::Quo, "/".to_string()),
            (TokenKind::Float, "3.1e-2".to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_tokenize_exponent_without_fraction() {
    assert_eq!(
        kinds_and_values("1e10 2E+3"),
        vec![
            (TokenKind::Float, "1e10".to_string()),
            (TokenKind::Float, "2E+3".to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_tokenize_comparisons() {
    let source = "9.>=9.\n8 <= 2\n8<10\n1.>2\ntrue==true\n2.!=2\n";

    assert_eq!(
        kinds(source),
        vec![
            TokenKind::Float,
            TokenKind::Geq,
            TokenKind::Float,
            TokenKind::Newline,
            TokenKind::Int,
            TokenKind::Leq,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::Int,
            TokenKind::Lss,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::Float,
            TokenKind::Gtr,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::Bool,
            TokenKind::Eql,
            TokenKind::Bool,
            TokenKind::Newline,
            TokenKind::Float,
            TokenKind::Neq,
            TokenKind::Int,
            TokenKind::Newline,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_logical_and_parens() {
    assert_eq!(
        kinds("!(false)\ntrue||(false)\nfalse&&true"),
        vec![
            TokenKind::Not,
            TokenKind::LeftParen,
            TokenKind::Bool,
            TokenKind::RightParen,
            TokenKind::Newline,
            TokenKind::Bool,
            TokenKind::LOr,
            TokenKind::LeftParen,
            TokenKind::Bool,
            TokenKind::RightParen,
            TokenKind::Newline,
            TokenKind::Bool,
            TokenKind::LAnd,
            TokenKind::Bool,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_adjacent_operators() {
    assert_eq!(
        kinds("-+2*-(3)/8"),
        vec![
            TokenKind::Sub,
            TokenKind::Add,
            TokenKind::Int,
            TokenKind::Mul,
            TokenKind::Sub,
            TokenKind::LeftParen,
            TokenKind::Int,
            TokenKind::RightParen,
            TokenKind::Quo,
            TokenKind::Int,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("a=!b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Assign,
            TokenKind::Not,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_comments() {
    assert_eq!(
        kinds_and_values("\n//aoeu\n///*test*/\n/*test*/"),
        vec![
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::LineComment, "//aoeu".to_string()),
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::LineComment, "///*test*/".to_string()),
            (TokenKind::Newline, "\n".to_string()),
            (TokenKind::BlockComment, "/*test*/".to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_tokenize_multiline_block_comment() {
    let tokens = scan("1 /* a\n b */ + 2");

    assert_eq!(tokens[1].kind, TokenKind::BlockComment);
    assert_eq!(tokens[1].value, "/* a\n b */");
    assert_eq!(tokens[2].kind, TokenKind::Add);
}

#[test]
fn test_newline_run_is_one_token() {
    let tokens = scan("1\n\r\n\n2");

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[1].kind, TokenKind::Newline);
    assert_eq!(tokens[1].value, "\n\r\n\n");
    assert_eq!(tokens[2].offset(), 5);
}

#[test]
fn test_tokenize_strings_and_semicolons() {
    assert_eq!(
        kinds_and_values(r#""hi";"a \"q\"""#),
        vec![
            (TokenKind::String, "\"hi\"".to_string()),
            (TokenKind::Semicolon, ";".to_string()),
            (TokenKind::String, r#""a \"q\"""#.to_string()),
            (TokenKind::EOF, "".to_string()),
        ]
    );
}

#[test]
fn test_token_positions() {
    let tokens = scan("ab + 12");

    assert_eq!(tokens[0].offset(), 0);
    assert_eq!(tokens[0].end(), 2);
    assert_eq!(tokens[1].offset(), 3);
    assert_eq!(tokens[2].offset(), 5);
    assert_eq!(tokens[3].offset(), 7);
    assert_eq!(tokens[0].pos.file(), "test.calc");
}

#[test]
fn test_unterminated_block_comment() {
    let tokens = scan("1 + /*unterminated");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[2].kind, TokenKind::Error);
    assert_eq!(tokens[2].value, "unterminated block comment");
    assert_eq!(tokens[2].offset(), 4);
}

#[test]
fn test_only_unterminated_block_comment() {
    let tokens = scan("/*unterminated");

    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_error());
}

#[test]
fn test_block_comment_opener_is_not_closer() {
    let tokens = scan("/*/");

    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_error());
}

#[test]
fn test_bad_number_syntax() {
    let tokens = scan("12ab + 1");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Error);
    assert!(tokens[0].value.starts_with("bad number syntax"));

    assert!(scan("0x").last().unwrap().is_error());
    assert!(scan("0b102").last().unwrap().is_error());
    assert!(scan("1e").last().unwrap().is_error());
}

#[test]
fn test_unknown_operator_run() {
    let tokens = scan("1 & 2");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].value, "bad operator: \"&\"");
}

#[test]
fn test_unknown_character() {
    let tokens = scan("1 @ 2");

    assert_eq!(tokens.len(), 2);
    assert!(tokens[1].is_error());
    assert!(tokens[1].value.contains("unknown syntax"));
}

#[test]
fn test_unbalanced_right_paren() {
    let tokens = scan("(1))");

    assert_eq!(
        tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
        vec![
            TokenKind::LeftParen,
            TokenKind::Int,
            TokenKind::RightParen,
            TokenKind::Error,
        ]
    );
}

#[test]
fn test_unterminated_string() {
    let tokens = scan("\"abc\n\"");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].value, "unterminated string literal");
}

#[test]
fn test_scanning_is_repeatable() {
    let source = "a + (b * 2) // c\n-3.5 >= x";

    assert_eq!(scan(source), scan(source));
}

#[test]
fn test_lexer_is_lazy_iterator() {
    let mut lexer = Lexer::new("1 2".to_string(), None);

    let first = lexer.next().unwrap();
    assert_eq!(first.kind, TokenKind::Int);
    assert_eq!(first.pos.file(), "shell");
    assert_eq!(lexer.next().unwrap().value, "2");
    assert_eq!(lexer.next().unwrap().kind, TokenKind::EOF);
    assert!(lexer.next().is_none());
}

#[test]
fn test_token_display() {
    let tokens = scan("if x + 12345678901 \"short\"");

    assert_eq!(tokens[0].to_string(), "<if>");
    assert_eq!(tokens[1].to_string(), "\"x\"");
    assert_eq!(tokens[2].to_string(), "[+]");
    assert_eq!(tokens[3].to_string(), "\"1234567890\"...");
    assert_eq!(tokens[5].to_string(), "EOF");
}

#[test]
fn test_precedence_levels() {
    assert_eq!(TokenKind::LOr.precedence(), 1);
    assert_eq!(TokenKind::LAnd.precedence(), 2);
    assert_eq!(TokenKind::Leq.precedence(), 3);
    assert_eq!(TokenKind::Sub.precedence(), 4);
    assert_eq!(TokenKind::Rem.precedence(), 5);
    assert_eq!(TokenKind::Not.precedence(), 0);
    assert_eq!(TokenKind::Assign.precedence(), 0);
    assert_eq!(TokenKind::Identifier.precedence(), 0);
}

#[test]
fn test_kind_predicates() {
    assert!(TokenKind::Not.is_operator());
    assert!(!TokenKind::Not.is_binary_op());
    assert!(TokenKind::Not.is_unary_op());
    assert!(!TokenKind::Assign.is_operator());
    assert!(TokenKind::Val.is_keyword());
    assert!(TokenKind::String.is_literal());
    assert!(!TokenKind::Identifier.is_literal());
    assert!(TokenKind::Semicolon.is_terminator());
    assert!(TokenKind::BlockComment.is_comment());
}

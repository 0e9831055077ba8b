// tests/lexer_tests.rs

use valgen::ast::Token;
use valgen::lexer::{LexError, Lexer};

fn tokens(input: &str) -> Vec<Token> {
    Lexer::new(input).tokenize().unwrap()
}

// ============================================================================
// Single Character Tokens
// ============================================================================

#[test]
fn test_single_char_tokens() {
    let test_cases = vec![
        ("|", Token::Pipe),
        ("*", Token::Star),
        ("+", Token::Plus),
        ("?", Token::Question),
        ("#", Token::Hash),
        ("{", Token::LBrace),
        ("}", Token::RBrace),
        ("[", Token::LBracket),
        ("]", Token::RBracket),
        (",", Token::Comma),
    ];

    for (input, expected) in test_cases {
        let mut lexer = Lexer::new(input);
        let token = lexer.next_token().unwrap();
        assert_eq!(token, expected, "Failed for input: {}", input);
        assert_eq!(lexer.next_token().unwrap(), Token::Eof);
    }
}

// ============================================================================
// Two Character Tokens
// ============================================================================

#[test]
fn test_two_char_tokens() {
    assert_eq!(tokens("||"), vec![Token::DoublePipe]);
    assert_eq!(tokens("&&"), vec![Token::DoubleAmpersand]);
    // `||` wins over two single pipes
    assert_eq!(tokens("|||"), vec![Token::DoublePipe, Token::Pipe]);
}

#[test]
fn test_single_ampersand_is_rejected() {
    let mut lexer = Lexer::new("a & b");
    assert_eq!(
        lexer.next_token().unwrap(),
        Token::Identifier("a".to_string())
    );
    assert_eq!(
        lexer.next_token(),
        Err(LexError {
            offset: 2,
            found: '&'
        })
    );
}

// ============================================================================
// Terms
// ============================================================================

#[test]
fn test_identifiers() {
    assert_eq!(
        tokens("none -moz-box small_caps x1"),
        vec![
            Token::Identifier("none".to_string()),
            Token::Identifier("-moz-box".to_string()),
            Token::Identifier("small_caps".to_string()),
            Token::Identifier("x1".to_string()),
        ]
    );
}

#[test]
fn test_types() {
    assert_eq!(
        tokens("<color> <line-width>"),
        vec![
            Token::Type("color".to_string()),
            Token::Type("line-width".to_string()),
        ]
    );
}

#[test]
fn test_strings() {
    assert_eq!(
        tokens(r#""none" 'inherit' ‘auto’ ‘both‘"#),
        vec![
            Token::String("none".to_string()),
            Token::String("inherit".to_string()),
            Token::String("auto".to_string()),
            Token::String("both".to_string()),
        ]
    );
}

#[test]
fn test_string_keeps_other_quote() {
    assert_eq!(tokens(r#"'a"b'"#), vec![Token::String("a\"b".to_string())]);
}

#[test]
fn test_empty_double_quoted_string_is_rejected() {
    assert!(Lexer::new(r#""""#).tokenize().is_err());
}

#[test]
fn test_numbers() {
    assert_eq!(
        tokens("0 12 1.5"),
        vec![
            Token::Number("0".to_string()),
            Token::Number("12".to_string()),
            Token::Number("1.5".to_string()),
        ]
    );
}

#[test]
fn test_number_followed_by_unit() {
    assert_eq!(
        tokens("10px"),
        vec![
            Token::Number("10".to_string()),
            Token::Identifier("px".to_string()),
        ]
    );
}

// ============================================================================
// Whitespace and Comments
// ============================================================================

#[test]
fn test_whitespace_and_newlines_are_skipped() {
    assert_eq!(
        tokens("  a\n\t|\r\n b  "),
        vec![
            Token::Identifier("a".to_string()),
            Token::Pipe,
            Token::Identifier("b".to_string()),
        ]
    );
}

#[test]
fn test_line_comments_are_skipped() {
    assert_eq!(
        tokens("a // trailing note | b\n| c"),
        vec![
            Token::Identifier("a".to_string()),
            Token::Pipe,
            Token::Identifier("c".to_string()),
        ]
    );
}

#[test]
fn test_unexpected_character() {
    let err = Lexer::new("a @ b").tokenize().unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(err.found, '@');
}

#[test]
fn test_offset_counts_bytes() {
    let mut lexer = Lexer::new("‘a’ b");
    lexer.next_token().unwrap();
    lexer.next_token().unwrap();
    assert_eq!(lexer.offset(), "‘a’ ".len());
}

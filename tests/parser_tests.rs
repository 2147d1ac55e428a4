// tests/parser_tests.rs

use tether_lang::ast::Ast;
use tether_lang::lexer::LexError;
use tether_lang::parser::{AstBuilder, ParseError};
use tether_lang::value::Value;

fn build(text: &str) -> Result<Ast, ParseError> {
    AstBuilder::new().build(text)
}

fn program(value: Value) -> Ast {
    Ast::Program {
        body: Box::new(Ast::Literal { value }),
    }
}

// ============================================================================
// Tree Shapes
// ============================================================================

#[test]
fn test_number_literal() {
    assert_eq!(build("42").unwrap(), program(Value::Number(42.0)));
    assert_eq!(build("3.14e2").unwrap(), program(Value::Number(314.0)));
}

#[test]
fn test_string_literal() {
    assert_eq!(
        build("'hello'").unwrap(),
        program(Value::String("hello".to_string()))
    );
}

#[test]
fn test_reserved_constants() {
    assert_eq!(build("null").unwrap(), program(Value::Null));
    assert_eq!(build("true").unwrap(), program(Value::Boolean(true)));
    assert_eq!(build("false").unwrap(), program(Value::Boolean(false)));
}

#[test]
fn test_constants_require_exact_text_match() {
    // Near-misses are plain identifiers, which have no production yet
    for input in ["nullx", "True", "FALSE", "nul"] {
        let result = build(input);
        assert!(
            matches!(result, Err(ParseError::InvalidExpression(_))),
            "Expected InvalidExpression for input: {}, got {:?}",
            input,
            result
        );
    }
}

#[test]
fn test_quoted_reserved_word_is_a_string() {
    // Quoting makes it a string literal, not a constant
    assert_eq!(
        build("'null'").unwrap(),
        program(Value::String("null".to_string()))
    );
}

// ============================================================================
// Current-Grammar Limits
// ============================================================================

#[test]
fn test_trailing_tokens_are_accepted_unvalidated() {
    // Only the first token is consulted; the rest pass through silently.
    assert_eq!(build("42 99").unwrap(), program(Value::Number(42.0)));
    assert_eq!(build("true false").unwrap(), program(Value::Boolean(true)));
    assert_eq!(
        build("'a' junk 12").unwrap(),
        program(Value::String("a".to_string()))
    );
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_empty_expression() {
    let err = build("").unwrap_err();
    assert!(matches!(err, ParseError::InvalidExpression(_)));
    assert!(err.to_string().contains("expression is empty"));

    // Whitespace-only input lexes to an empty sequence too
    assert!(matches!(
        build("   "),
        Err(ParseError::InvalidExpression(_))
    ));
}

#[test]
fn test_bare_identifier_is_rejected() {
    let err = build("aVariable").unwrap_err();
    assert!(matches!(err, ParseError::InvalidExpression(_)));
    assert!(err.to_string().contains("aVariable"));
}

#[test]
fn test_lex_errors_propagate() {
    let err = build("'abc").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lex(LexError::UnmatchedQuote { position: 0 })
    );
    // The transparent wrapper keeps the lexer's message
    assert!(err.to_string().contains("unmatched quote"));

    assert_eq!(
        build("1e").unwrap_err(),
        ParseError::Lex(LexError::InvalidExponent { position: 1 })
    );
}

#[test]
fn test_builder_is_reusable_across_calls() {
    let mut builder = AstBuilder::new();
    assert_eq!(builder.build("1").unwrap(), program(Value::Number(1.0)));
    assert!(builder.build("'oops").is_err());
    // A failed build does not poison the next one
    assert_eq!(builder.build("2").unwrap(), program(Value::Number(2.0)));
}

use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::ast::{Ast, Token};
use crate::lexer::{LexError, Lexer};
use crate::value::Value;

/// Errors raised while building the AST.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The lexer rejected the expression text.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// The token sequence does not form a valid expression.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
}

/// Reserved words that map directly to literal nodes.
static CONSTANTS: LazyLock<HashMap<&'static str, Value>> = LazyLock::new(|| {
    HashMap::from([
        ("null", Value::Null),
        ("true", Value::Boolean(true)),
        ("false", Value::Boolean(false)),
    ])
});

/// Builds the AST for one binding expression.
///
/// Delegates lexing to [`Lexer`], then parses a single primary expression
/// and wraps it in [`Ast::Program`]. The grammar has no recursive
/// productions yet, so there is no descent stack: `primary` looks at the
/// first token and nothing else. Tokens past the first are currently
/// accepted without validation.
#[derive(Default)]
pub struct AstBuilder {
    tokens: Vec<Token>,
}

impl AstBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lex `text` and build the tree for it.
    pub fn build(&mut self, text: &str) -> Result<Ast, ParseError> {
        self.tokens = Lexer::new(text).lex()?;
        self.program()
    }

    fn program(&self) -> Result<Ast, ParseError> {
        Ok(Ast::Program {
            body: Box::new(self.primary()?),
        })
    }

    fn primary(&self) -> Result<Ast, ParseError> {
        let token = self.tokens.first().ok_or_else(|| {
            ParseError::InvalidExpression("expression is empty".to_string())
        })?;

        if let Some(value) = CONSTANTS.get(token.text()) {
            return Ok(Ast::Literal {
                value: value.clone(),
            });
        }
        self.constant(token)
    }

    fn constant(&self, token: &Token) -> Result<Ast, ParseError> {
        match token {
            Token::Number { value, .. } => Ok(Ast::Literal {
                value: Value::Number(*value),
            }),
            Token::String(s) => Ok(Ast::Literal {
                value: Value::String(s.clone()),
            }),
            // Identifiers other than the reserved words carry no value;
            // there is no scope-reference production yet.
            Token::Identifier(name) => Err(ParseError::InvalidExpression(format!(
                "unexpected identifier `{name}`"
            ))),
        }
    }
}

#[test]
fn test_constants_table_resolves_reserved_words() {
    let mut builder = AstBuilder::new();
    let ast = builder.build("null").unwrap();
    assert_eq!(
        ast,
        Ast::Program {
            body: Box::new(Ast::Literal { value: Value::Null }),
        }
    );
}

//! Tokens and tree nodes for the binding expression language.
//!
//! The pipeline turns expression text into an ordered [`Token`] sequence,
//! then into an [`Ast`] whose root is always a [`Program`](Ast::Program)
//! node. The grammar currently has a single production (one literal), so
//! the tree is always `Program { body: Literal }`; the remaining variants
//! mark where identifier and operator support will attach.

use crate::value::Value;

/// A lexical token produced by [`Lexer::lex`](crate::lexer::Lexer::lex).
///
/// Tokens are emitted in left-to-right source order; order is the only
/// structure the grammar relies on.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    ///
    /// Keeps the scanned text alongside the parsed value.
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 3.14e2
    /// .5
    /// ```
    Number {
        /// The accumulated source text, lowercased during scanning
        text: String,
        /// The numeric value of that text
        value: f64,
    },

    /// String literal with escape sequences already processed
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// "it's"
    /// 'a\nb'
    /// ```
    String(String),

    /// Identifier: a name, or one of the reserved words
    /// `null` / `true` / `false`
    ///
    /// Starts with an ASCII letter, `_`, or `$`; continues with those or
    /// digits. Carries no value: reserved words are resolved against the
    /// constants table by the AST builder, and other names wait on
    /// identifier resolution.
    Identifier(String),
}

impl Token {
    /// The source text this token was scanned from.
    ///
    /// For string tokens this is the processed content, as the original
    /// quoting and escapes are gone by the time the token exists.
    pub fn text(&self) -> &str {
        match self {
            Token::Number { text, .. } => text,
            Token::String(s) => s,
            Token::Identifier(name) => name,
        }
    }
}

/// Abstract syntax tree node for a parsed binding expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    /// The tree root, wrapping the whole expression.
    ///
    /// Currently always wraps exactly one [`Literal`](Ast::Literal).
    Program { body: Box<Ast> },

    /// A constant literal value
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 'hello'
    /// null
    /// ```
    Literal { value: Value },

    /// Scope member reference (`aVariable`)
    ///
    /// Reserved: the builder has no production for this yet.
    Identifier { name: String },

    /// Binary operation (`a + b`)
    ///
    /// Reserved: the builder has no production for this yet.
    BinaryExpression {
        operator: String,
        left: Box<Ast>,
        right: Box<Ast>,
    },
}

impl Ast {
    /// The constant value this tree evaluates to, if it is wholly literal.
    ///
    /// Returns `None` as soon as any node would need the scope.
    pub fn literal_value(&self) -> Option<Value> {
        match self {
            Ast::Program { body } => body.literal_value(),
            Ast::Literal { value } => Some(value.clone()),
            Ast::Identifier { .. } | Ast::BinaryExpression { .. } => None,
        }
    }
}

#[test]
fn test_literal_value_walks_to_the_root_body() {
    let ast = Ast::Program {
        body: Box::new(Ast::Literal {
            value: Value::Number(42.0),
        }),
    };
    assert_eq!(ast.literal_value(), Some(Value::Number(42.0)));
}

#[test]
fn test_literal_value_is_none_for_reserved_nodes() {
    let ast = Ast::Program {
        body: Box::new(Ast::Identifier {
            name: "aVariable".to_string(),
        }),
    };
    assert_eq!(ast.literal_value(), None);
}

//! Compiles a built AST into a callable expression function.
//!
//! The compiler walks the tree and emits source fragments (`return`, the
//! escaped literal, `;`) into an accumulator: exactly the body a dynamic
//! host language would hand to its function constructor. Rust has no such
//! facility, so materialization instead boxes a closure capturing the
//! literal value; the generated source body is kept on the compiled
//! expression for inspection. The "compile once, call many times cheaply"
//! contract is the same either way.
//!
//! Escaping is the one subtle part: every string character outside
//! `[a-zA-Z0-9]` is re-encoded as a `\uXXXX` escape of its UTF-16 code
//! units, so no quote, backslash, or control character from the input can
//! ever appear raw inside the generated quoting context.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::ast::Ast;
use crate::parser::{AstBuilder, ParseError};
use crate::value::{Scope, Value};

/// Matches every string character that must be re-encoded when a literal is
/// emitted into generated source.
static STRING_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[^a-zA-Z0-9]").unwrap());

/// Compiles expression text into a [`CompiledExpression`].
///
/// Owns the AST builder (which owns the lexer) and a fragment accumulator
/// scoped to a single compile call.
#[derive(Default)]
pub struct Compiler {
    builder: AstBuilder,
    body: Vec<String>,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the AST for `text` and compile it into a callable.
    ///
    /// Compilation itself cannot fail for the literal grammar (escaping is
    /// total), so every error here comes from the lex or build stages.
    pub fn compile(&mut self, text: &str) -> Result<CompiledExpression, ParseError> {
        let ast = self.builder.build(text)?;

        self.body.clear();
        self.recurse(&ast);
        let source = self.body.concat();

        let value = ast.literal_value().ok_or_else(|| {
            ParseError::InvalidExpression("expression is not a constant".to_string())
        })?;
        Ok(CompiledExpression {
            source,
            program: Box::new(move |_scope| value.clone()),
        })
    }

    /// Emit the source fragments for `ast`, returning the fragment that
    /// represents it inside an enclosing expression.
    fn recurse(&mut self, ast: &Ast) -> String {
        match ast {
            Ast::Program { body } => {
                let fragment = self.recurse(body);
                self.body.push("return ".to_string());
                self.body.push(fragment);
                self.body.push(";".to_string());
                String::new()
            }
            Ast::Literal { value } => escape(value),
            // The builder has no productions for these yet.
            Ast::Identifier { .. } | Ast::BinaryExpression { .. } => {
                unreachable!("node kind not produced by the current grammar")
            }
        }
    }
}

/// Render a literal value as a source fragment that can never break out of
/// its quoting context.
fn escape(value: &Value) -> String {
    match value {
        Value::String(s) => {
            let escaped = STRING_ESCAPE.replace_all(s, |caps: &regex::Captures| {
                caps[0].chars().map(escape_char).collect::<String>()
            });
            format!("'{escaped}'")
        }
        Value::Null => "null".to_string(),
        Value::Boolean(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
    }
}

/// Encode one character as `\uXXXX` escapes of its UTF-16 code units.
///
/// Characters outside the BMP yield two escapes, one per surrogate, since
/// the expression language has JavaScript-style string semantics.
fn escape_char(c: char) -> String {
    let mut units = [0u16; 2];
    c.encode_utf16(&mut units)
        .iter()
        .map(|unit| format!("\\u{unit:04x}"))
        .collect()
}

/// A compiled binding expression: a function of one [`Scope`] argument.
///
/// Holds no reference to any pipeline state, only the captured literal and
/// the generated source body, so it is safe to call repeatedly and from
/// multiple threads at once.
pub struct CompiledExpression {
    source: String,
    program: Box<dyn Fn(&Scope) -> Value + Send + Sync>,
}

impl CompiledExpression {
    /// Evaluate the expression against `scope`.
    ///
    /// The literal-only grammar never reads the scope; the value returned
    /// is always the constant the expression text denoted.
    pub fn call(&self, scope: &Scope) -> Value {
        (self.program)(scope)
    }

    /// The generated source body this expression was materialized from.
    ///
    /// ```
    /// use tether_lang::parse;
    ///
    /// let expr = parse("42").unwrap();
    /// assert_eq!(expr.source(), "return 42;");
    /// ```
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
fn unit_escape(unit: u16) -> String {
    format!("{}u{:04x}", '\\', unit)
}

#[test]
fn test_escape_reencodes_everything_outside_the_alphanumeric_set() {
    let value = Value::String("it's".to_string());
    assert_eq!(escape(&value), format!("'it{}s'", unit_escape(0x27)));

    let value = Value::String("a\nb".to_string());
    assert_eq!(escape(&value), format!("'a{}b'", unit_escape(0x0a)));
}

#[test]
fn test_escape_emits_surrogate_pairs_for_non_bmp_characters() {
    let value = Value::String("\u{1F600}".to_string());
    let expected = format!("'{}{}'", unit_escape(0xd83d), unit_escape(0xde00));
    assert_eq!(escape(&value), expected);
}

#[test]
fn test_escape_is_total_over_the_other_value_kinds() {
    assert_eq!(escape(&Value::Null), "null");
    assert_eq!(escape(&Value::Boolean(true)), "true");
    assert_eq!(escape(&Value::Number(314.0)), "314");
}

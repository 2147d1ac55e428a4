//! A minimal data-binding expression language.
//!
//! Expression text (literals only, for now) is compiled through a
//! three-stage pipeline into a directly callable artifact:
//!
//! ```text
//! "3.14e2"
//!   -> lexer        (ordered token sequence)
//!   -> AST builder  (Program / Literal tree)
//!   -> compiler     (callable expression function)
//! ```
//!
//! The result is a function of one [`Scope`] argument:
//!
//! ```
//! use tether_lang::{parse, Scope, Value};
//!
//! let expr = parse("3.14e2").unwrap();
//! assert_eq!(expr.call(&Scope::new()), Value::Number(314.0));
//! ```
//!
//! The grammar covers numbers (decimal and scientific notation), quoted
//! strings with escape sequences, and the reserved words `null`, `true`,
//! and `false`. Identifier resolution and operators are reserved extension
//! points in the AST with no productions yet.

pub mod ast;
pub mod compiler;
pub mod lexer;
pub mod parser;
pub mod value;

pub use ast::{Ast, Token};
pub use compiler::{CompiledExpression, Compiler};
pub use lexer::{LexError, Lexer};
pub use parser::{AstBuilder, ParseError};
pub use value::{Scope, Value, scope_from_json};

/// Compile expression text into a callable expression function.
///
/// Wires up a fresh lexer, AST builder, and compiler per call; no scan or
/// compile state is ever shared between calls. The caller receives either a
/// working callable or an error naming the offending character, position,
/// or condition.
pub fn parse(text: &str) -> Result<CompiledExpression, ParseError> {
    let mut compiler = Compiler::new();
    compiler.compile(text)
}

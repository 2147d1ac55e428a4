use std::collections::HashMap;
use std::sync::LazyLock;

use thiserror::Error;

use crate::ast::Token;

/// Errors raised while scanning expression text.
///
/// Any lex failure aborts the whole parse immediately; there is no recovery
/// and no partial token sequence.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {position}")]
    UnexpectedCharacter { ch: char, position: usize },

    #[error("unmatched quote for string starting at position {position}")]
    UnmatchedQuote { position: usize },

    #[error("invalid exponent in number at position {position}")]
    InvalidExponent { position: usize },

    #[error("invalid unicode escape at position {position}: expected 4 hex digits")]
    InvalidUnicodeEscape { position: usize },
}

/// Single-character escape sequences recognized inside string literals.
///
/// An escaped character absent from this table passes through unchanged
/// (`\w` is just `w`). `\u` is handled separately as a unicode escape.
static ESCAPE: LazyLock<HashMap<char, char>> = LazyLock::new(|| {
    HashMap::from([
        ('n', '\n'),
        ('f', '\u{000C}'),
        ('r', '\r'),
        ('t', '\t'),
        ('v', '\u{000B}'),
        ('\'', '\''),
        ('"', '"'),
    ])
});

/// Single left-to-right scanner over expression text.
///
/// One character of lookahead, no backtracking. [`Lexer::lex`] consumes the
/// scanner, so state never leaks between scans; construct one per expression.
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
            tokens: Vec::new(),
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Scan the whole input into an ordered token sequence.
    ///
    /// Either the entire input is consumed or an error is returned; a
    /// partial token sequence is never handed out. Empty input is valid
    /// here and produces an empty sequence (the AST builder rejects it).
    pub fn lex(mut self) -> Result<Vec<Token>, LexError> {
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit()
                || (ch == '.' && self.peek_char(1).is_some_and(|c| c.is_ascii_digit()))
            {
                self.read_number()?;
            } else if ch == '\'' || ch == '"' {
                self.read_string(ch)?;
            } else if is_identifier_start(ch) {
                self.read_identifier();
            } else if ch.is_whitespace() {
                self.advance();
            } else {
                return Err(LexError::UnexpectedCharacter {
                    ch,
                    position: self.position,
                });
            }
        }
        Ok(self.tokens)
    }

    fn read_number(&mut self) -> Result<(), LexError> {
        let mut number = String::new();

        while let Some(ch) = self.current_char() {
            let ch = ch.to_ascii_lowercase();
            if ch == '.' || ch.is_ascii_digit() {
                number.push(ch);
                self.advance();
            } else if ch == 'e' {
                // The exponent marker only belongs to the number when a
                // digit follows, directly or behind a sign.
                match self.peek_char(1) {
                    Some(next) if next.is_ascii_digit() => {
                        number.push(ch);
                        self.advance();
                    }
                    Some(sign @ ('+' | '-')) => {
                        if !self.peek_char(2).is_some_and(|c| c.is_ascii_digit()) {
                            return Err(LexError::InvalidExponent {
                                position: self.position,
                            });
                        }
                        number.push(ch);
                        number.push(sign);
                        self.advance();
                        self.advance();
                    }
                    _ => {
                        return Err(LexError::InvalidExponent {
                            position: self.position,
                        });
                    }
                }
            } else {
                break;
            }
        }

        // JavaScript Number() semantics: accumulations like `1.2.3`
        // become NaN rather than a lex error.
        let value = number.parse::<f64>().unwrap_or(f64::NAN);
        self.tokens.push(Token::Number {
            text: number,
            value,
        });
        Ok(())
    }

    fn read_string(&mut self, quote: char) -> Result<(), LexError> {
        let start = self.position;
        self.advance(); // consume opening quote
        let mut string = String::new();

        while let Some(ch) = self.current_char() {
            if ch == '\\' {
                self.advance();
                match self.current_char() {
                    Some('u') => {
                        let hex: String =
                            (1..=4).filter_map(|offset| self.peek_char(offset)).collect();
                        let code = if hex.len() == 4 && hex.chars().all(|c| c.is_ascii_hexdigit())
                        {
                            u32::from_str_radix(&hex, 16).ok()
                        } else {
                            None
                        };
                        // from_u32 also rejects lone surrogates, which a
                        // Rust string cannot hold.
                        let decoded = code.and_then(char::from_u32).ok_or(
                            LexError::InvalidUnicodeEscape {
                                position: self.position,
                            },
                        )?;
                        string.push(decoded);
                        self.position += 5; // 'u' plus the 4 hex digits
                    }
                    Some(escaped) => {
                        string.push(ESCAPE.get(&escaped).copied().unwrap_or(escaped));
                        self.advance();
                    }
                    // Lone backslash at end of input: the quote is still open.
                    None => break,
                }
            } else if ch == quote {
                self.advance();
                self.tokens.push(Token::String(string));
                return Ok(());
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError::UnmatchedQuote { position: start })
    }

    fn read_identifier(&mut self) {
        let mut text = String::new();
        while let Some(ch) = self.current_char() {
            if is_identifier_start(ch) || ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        self.tokens.push(Token::Identifier(text));
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || ch == '$'
}

#[test]
fn test_reserved_words_lex_as_identifiers() {
    let tokens = Lexer::new("null true false").lex().unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::Identifier("null".to_string()),
            Token::Identifier("true".to_string()),
            Token::Identifier("false".to_string()),
        ]
    );
}

#[test]
fn test_scientific_notation() {
    let tokens = Lexer::new("3.14e2").lex().unwrap();
    assert_eq!(
        tokens,
        vec![Token::Number {
            text: "3.14e2".to_string(),
            value: 314.0,
        }]
    );
}

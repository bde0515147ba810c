// crates/rill-docs-engine/src/source.rs
// ============================================================================
// Module: Example Source Parser
// Description: Parser for the documented example call-expression surface.
// Purpose: Turn example source text into a call the executor can bind.
// Dependencies: serde_json, thiserror, std
// ============================================================================

//! ## Overview
//! Documented examples use the call-expression surface of the Rill language:
//! a function call with literal arguments (strings, numbers, booleans, null,
//! arrays, objects), optional named arguments, and nested calls to other
//! registered functions. This module parses that surface only; the full Rill
//! interpreter is an external collaborator.
//!
//! A parse failure here is a validation failure attributed to the example,
//! never a crash.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// SECTION: Limits
// ============================================================================

/// Maximum nesting depth for calls, arrays, and objects.
const MAX_NESTING_DEPTH: usize = 32;

// ============================================================================
// SECTION: Syntax Tree
// ============================================================================

/// A parsed call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    /// Called function identifier.
    pub identifier: String,
    /// Positional arguments in call order.
    pub positional: Vec<Expr>,
    /// Named arguments in call order.
    pub named: Vec<(String, Expr)>,
}

/// One argument expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Value),
    /// A nested call to another registered function.
    Call(CallExpr),
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while parsing example source text.
///
/// Positions are character offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The source ended before the expression was complete.
    #[error("unexpected end of source")]
    UnexpectedEnd,
    /// An unexpected character was found.
    #[error("unexpected character `{found}` at position {position}")]
    UnexpectedChar {
        /// Offset of the character.
        position: usize,
        /// The character found.
        found: char,
    },
    /// A specific construct was expected.
    #[error("expected {expected} at position {position}")]
    Expected {
        /// Offset where the construct was expected.
        position: usize,
        /// Description of the expected construct.
        expected: &'static str,
    },
    /// A numeric literal did not parse.
    #[error("invalid number at position {position}")]
    InvalidNumber {
        /// Offset of the literal.
        position: usize,
    },
    /// A string escape sequence was invalid.
    #[error("invalid escape sequence at position {position}")]
    InvalidEscape {
        /// Offset of the escape.
        position: usize,
    },
    /// Nesting exceeded the supported depth.
    #[error("expression nests deeper than {MAX_NESTING_DEPTH} levels")]
    TooDeep,
    /// A positional argument followed a named argument.
    #[error("positional argument after named argument at position {position}")]
    PositionalAfterNamed {
        /// Offset of the positional argument.
        position: usize,
    },
    /// Input remained after the call expression.
    #[error("trailing input at position {position}")]
    TrailingInput {
        /// Offset of the first trailing character.
        position: usize,
    },
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Parses example source text into a call expression.
///
/// # Errors
///
/// Returns [`ParseError`] when the text is not a single well-formed call.
pub fn parse_example_source(source: &str) -> Result<CallExpr, ParseError> {
    let mut parser = Parser::new(source);
    parser.skip_whitespace();
    let call = parser.parse_call(0)?;
    parser.skip_whitespace();
    match parser.peek() {
        None => Ok(call),
        Some(_) => Err(ParseError::TrailingInput {
            position: parser.position,
        }),
    }
}

// ============================================================================
// SECTION: Parser
// ============================================================================

/// Recursive-descent parser over the source characters.
struct Parser {
    /// Source characters.
    chars: Vec<char>,
    /// Current offset into `chars`.
    position: usize,
}

impl Parser {
    /// Creates a parser over the source text.
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
        }
    }

    /// Returns the current character without consuming it.
    fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// Consumes and returns the current character.
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    /// Skips whitespace, including newlines in multiline sources.
    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.position += 1;
        }
    }

    /// Consumes the expected character or reports what was wanted.
    fn expect(&mut self, wanted: char, description: &'static str) -> Result<(), ParseError> {
        match self.peek() {
            Some(ch) if ch == wanted => {
                self.position += 1;
                Ok(())
            }
            Some(_) => Err(ParseError::Expected {
                position: self.position,
                expected: description,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parses an identifier (`[a-z_][a-z0-9_]*`).
    fn parse_identifier(&mut self) -> Result<String, ParseError> {
        let start = self.position;
        match self.peek() {
            Some(ch) if ch.is_ascii_lowercase() || ch == '_' => {}
            Some(found) => {
                return Err(ParseError::UnexpectedChar {
                    position: self.position,
                    found,
                });
            }
            None => return Err(ParseError::UnexpectedEnd),
        }
        while self
            .peek()
            .is_some_and(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            self.position += 1;
        }
        Ok(self.chars[start .. self.position].iter().collect())
    }

    /// Parses a call expression: `identifier(argument, ...)`.
    fn parse_call(&mut self, depth: usize) -> Result<CallExpr, ParseError> {
        let identifier = self.parse_identifier()?;
        self.skip_whitespace();
        self.parse_call_arguments(identifier, depth)
    }

    /// Parses one positional or named argument into the call.
    fn parse_argument(&mut self, call: &mut CallExpr, depth: usize) -> Result<(), ParseError> {
        let start = self.position;
        let is_identifier_start =
            self.peek().is_some_and(|ch| ch.is_ascii_lowercase() || ch == '_');
        if is_identifier_start {
            let identifier = self.parse_identifier()?;
            self.skip_whitespace();
            match self.peek() {
                Some(':') => {
                    self.position += 1;
                    self.skip_whitespace();
                    let value = self.parse_expr(depth + 1)?;
                    call.named.push((identifier, value));
                    return Ok(());
                }
                Some('(') => {
                    self.check_positional_allowed(call, start)?;
                    let nested = self.parse_call_arguments(identifier, depth + 1)?;
                    call.positional.push(Expr::Call(nested));
                    return Ok(());
                }
                _ => {
                    self.check_positional_allowed(call, start)?;
                    let value = keyword_literal(&identifier).ok_or(ParseError::Expected {
                        position: start,
                        expected: "a literal or function call",
                    })?;
                    call.positional.push(Expr::Literal(value));
                    return Ok(());
                }
            }
        }
        self.check_positional_allowed(call, start)?;
        let value = self.parse_expr(depth + 1)?;
        call.positional.push(value);
        Ok(())
    }

    /// Rejects positional arguments once a named argument has appeared.
    fn check_positional_allowed(&self, call: &CallExpr, start: usize) -> Result<(), ParseError> {
        if call.named.is_empty() {
            Ok(())
        } else {
            Err(ParseError::PositionalAfterNamed {
                position: start,
            })
        }
    }

    /// Parses the argument list of a call whose identifier is already read.
    fn parse_call_arguments(
        &mut self,
        identifier: String,
        depth: usize,
    ) -> Result<CallExpr, ParseError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep);
        }
        self.expect('(', "`(` after function name")?;
        let mut call = CallExpr {
            identifier,
            positional: Vec::new(),
            named: Vec::new(),
        };
        self.skip_whitespace();
        if self.peek() == Some(')') {
            self.position += 1;
            return Ok(call);
        }
        loop {
            self.skip_whitespace();
            self.parse_argument(&mut call, depth)?;
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(')') => return Ok(call),
                Some(_) => {
                    return Err(ParseError::Expected {
                        position: self.position - 1,
                        expected: "`,` or `)` in argument list",
                    });
                }
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    /// Parses an expression: a literal or a nested call.
    fn parse_expr(&mut self, depth: usize) -> Result<Expr, ParseError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep);
        }
        match self.peek() {
            Some(ch) if ch.is_ascii_lowercase() || ch == '_' => {
                let start = self.position;
                let identifier = self.parse_identifier()?;
                self.skip_whitespace();
                if self.peek() == Some('(') {
                    return self.parse_call_arguments(identifier, depth).map(Expr::Call);
                }
                keyword_literal(&identifier).map(Expr::Literal).ok_or(ParseError::Expected {
                    position: start,
                    expected: "a literal or function call",
                })
            }
            Some(_) => self.parse_literal(depth).map(Expr::Literal),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parses a literal value.
    fn parse_literal(&mut self, depth: usize) -> Result<Value, ParseError> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep);
        }
        match self.peek() {
            Some('"') => self.parse_string().map(Value::String),
            Some('[') => self.parse_array(depth),
            Some('{') => self.parse_object(depth),
            Some(ch) if ch == '-' || ch.is_ascii_digit() => self.parse_number(),
            Some(ch) if ch.is_ascii_lowercase() || ch == '_' => {
                let start = self.position;
                let identifier = self.parse_identifier()?;
                keyword_literal(&identifier).ok_or(ParseError::Expected {
                    position: start,
                    expected: "a literal",
                })
            }
            Some(found) => Err(ParseError::UnexpectedChar {
                position: self.position,
                found,
            }),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Parses a double-quoted string with JSON-style escapes.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        self.expect('"', "`\"` to open a string")?;
        let mut text = String::new();
        loop {
            let position = self.position;
            match self.bump() {
                Some('"') => return Ok(text),
                Some('\\') => match self.bump() {
                    Some('"') => text.push('"'),
                    Some('\\') => text.push('\\'),
                    Some('/') => text.push('/'),
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('r') => text.push('\r'),
                    Some('u') => text.push(self.parse_unicode_escape(position)?),
                    Some(_) => {
                        return Err(ParseError::InvalidEscape {
                            position,
                        });
                    }
                    None => return Err(ParseError::UnexpectedEnd),
                },
                Some(ch) => text.push(ch),
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    /// Parses the four hex digits of a `\uXXXX` escape.
    fn parse_unicode_escape(&mut self, position: usize) -> Result<char, ParseError> {
        let mut code = 0_u32;
        for _ in 0 .. 4 {
            let digit = self
                .bump()
                .and_then(|ch| ch.to_digit(16))
                .ok_or(ParseError::InvalidEscape {
                    position,
                })?;
            code = code * 16 + digit;
        }
        char::from_u32(code).ok_or(ParseError::InvalidEscape {
            position,
        })
    }

    /// Parses an integer or float literal.
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let start = self.position;
        if self.peek() == Some('-') {
            self.position += 1;
        }
        let mut is_float = false;
        while let Some(ch) = self.peek() {
            match ch {
                '0' ..= '9' => self.position += 1,
                '.' | 'e' | 'E' | '+' | '-' => {
                    is_float = true;
                    self.position += 1;
                }
                _ => break,
            }
        }
        let text: String = self.chars[start .. self.position].iter().collect();
        if is_float {
            let parsed: f64 = text.parse().map_err(|_| ParseError::InvalidNumber {
                position: start,
            })?;
            return serde_json::Number::from_f64(parsed).map(Value::Number).ok_or(
                ParseError::InvalidNumber {
                    position: start,
                },
            );
        }
        text.parse::<i64>().map(Value::from).map_err(|_| ParseError::InvalidNumber {
            position: start,
        })
    }

    /// Parses an array literal of nested literals.
    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect('[', "`[` to open an array")?;
        let mut elements = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(']') {
            self.position += 1;
            return Ok(Value::Array(elements));
        }
        loop {
            self.skip_whitespace();
            elements.push(self.parse_literal(depth + 1)?);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some(']') => return Ok(Value::Array(elements)),
                Some(_) => {
                    return Err(ParseError::Expected {
                        position: self.position - 1,
                        expected: "`,` or `]` in array",
                    });
                }
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }

    /// Parses an object literal with string keys and nested literal values.
    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        self.expect('{', "`{` to open an object")?;
        let mut entries = Map::new();
        self.skip_whitespace();
        if self.peek() == Some('}') {
            self.position += 1;
            return Ok(Value::Object(entries));
        }
        loop {
            self.skip_whitespace();
            let key = self.parse_string()?;
            self.skip_whitespace();
            self.expect(':', "`:` after object key")?;
            self.skip_whitespace();
            let value = self.parse_literal(depth + 1)?;
            entries.insert(key, value);
            self.skip_whitespace();
            match self.bump() {
                Some(',') => {}
                Some('}') => return Ok(Value::Object(entries)),
                Some(_) => {
                    return Err(ParseError::Expected {
                        position: self.position - 1,
                        expected: "`,` or `}` in object",
                    });
                }
                None => return Err(ParseError::UnexpectedEnd),
            }
        }
    }
}

/// Maps keyword identifiers to their literal values.
fn keyword_literal(identifier: &str) -> Option<Value> {
    match identifier {
        "true" => Some(Value::Bool(true)),
        "false" => Some(Value::Bool(false)),
        "null" => Some(Value::Null),
        _ => None,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

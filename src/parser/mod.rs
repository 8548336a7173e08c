//! Expression-language front end
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parser cursor, error type, and recovery
//! - `expressions`: Grammar productions (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported Grammar
//!
//! Arithmetic, comparison, and equality expressions over number, string,
//! boolean, and `nil` literals, with grouping and prefix `-`/`!`. The lexer
//! already recognizes the full keyword set so statement grammar can be added
//! on top without touching the scanner.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one method per precedence tier.
//! No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;

pub use ast::{Expr, Number, Value};
pub use lexer::{tokenize, Lexer, Token, TokenKind, TokenLiteral};
pub use parse::{parse, ParseError, Parser};

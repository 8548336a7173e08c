//! # Introduction
//!
//! loxfront turns the source text of a small expression-oriented language into
//! a validated abstract syntax tree, reporting line-anchored diagnostics for
//! malformed input. It is the front end of an interpreter pipeline; nothing
//! here evaluates expressions.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Tokens → Parser → AST → Printer
//! ```
//!
//! 1. [`parser::lexer`] — single-pass scanner with one character of lookahead.
//!    Lexical errors are reported and skipped.
//! 2. [`parser::parse`] — recursive descent over the finished token sequence.
//!    A syntax error yields no tree at all.
//! 3. [`diagnostics`] — the [`diagnostics::Reporter`] channel both stages
//!    report through, plus the caret-style rendering.
//! 4. [`printer`] — infix, postfix, and tree views of an AST.
//! 5. [`pipeline`] — glue used by the `loxfront` binary.
//!
//! ## Example
//!
//! ```
//! use loxfront::diagnostics::CollectingReporter;
//! use loxfront::parser::{parse, tokenize};
//! use loxfront::printer::infix;
//!
//! let mut reporter = CollectingReporter::new();
//! let tokens = tokenize("-2 * 3", &mut reporter);
//! let expr = parse(&tokens, &mut reporter).unwrap();
//! assert_eq!(infix(&expr), "(* (- 2) 3)");
//! ```

pub mod constants;
pub mod diagnostics;
pub mod parser;
pub mod pipeline;
pub mod printer;

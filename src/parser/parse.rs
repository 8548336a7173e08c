//! Main parser coordinator
//!
//! This module provides the [`Parser`] cursor and core parsing infrastructure,
//! including the error type, helper methods, and the top-level parse entry point.
//!
//! # Parser Architecture
//!
//! - This module: Parser struct, cursor helpers, error recovery
//! - `expressions`: one method per grammar level, lowest precedence first
//!
//! Every production returns `Result<Expr, ParseError>`. A syntax error unwinds
//! through `?` to [`Parser::parse`], the only place that catches it: the error
//! is reported, the cursor is resynchronized, and the caller gets `None`
//! instead of a partial tree.

use crate::constants::MAX_NESTING_DEPTH;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::parser::ast::Expr;
use crate::parser::lexer::{Token, TokenKind};
use std::fmt;

/// Parser error type
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    /// Lexeme of the offending token, or `at end`
    pub location: String,
}

impl ParseError {
    /// Build an error anchored at `token`
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        let location = if token.is_eof() {
            "at end".to_string()
        } else {
            token.lexeme.clone()
        };
        Self {
            message: message.into(),
            line: token.line,
            location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {} ({}): {}",
            self.line, self.location, self.message
        )
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Diagnostic {
    fn from(err: ParseError) -> Self {
        Diagnostic::syntax(err.line, err.message, err.location)
    }
}

/// Recursive descent parser over a finished token sequence.
///
/// The tokens are borrowed; the parser only owns its index. The index never
/// moves past the trailing `Eof` token, so lookahead always has a token to see.
pub struct Parser<'a> {
    pub(crate) tokens: &'a [Token],
    pub(crate) position: usize,
    pub(crate) depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `tokens`, which must end with an `Eof` token.
    pub fn new(tokens: &'a [Token]) -> Result<Self, ParseError> {
        match tokens.last() {
            Some(last) if last.is_eof() => Ok(Self {
                tokens,
                position: 0,
                depth: 0,
            }),
            Some(last) => Err(ParseError::at(
                last,
                "Token stream is not terminated by end of input.",
            )),
            None => Err(ParseError {
                message: "Token stream is empty.".to_string(),
                line: 1,
                location: "at end".to_string(),
            }),
        }
    }

    /// Parse one top-level expression.
    ///
    /// On a syntax error the diagnostic goes to `reporter`, the cursor skips
    /// to the next statement boundary, and `None` is returned. Callers must not
    /// evaluate anything for this input when they get `None`.
    pub fn parse(&mut self, reporter: &mut dyn Reporter) -> Option<Expr> {
        match self.parse_expression() {
            Ok(expr) => Some(expr),
            Err(err) => {
                reporter.report(err.into());
                self.synchronize();
                None
            }
        }
    }

    /// Panic-mode recovery: discard tokens until just after a `;` or just
    /// before a keyword that starts a statement. Always stops at `Eof`.
    pub fn synchronize(&mut self) {
        self.advance();

        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            if self.peek().kind.starts_statement() {
                return;
            }
            self.advance();
        }
    }

    /// Index of the next unconsumed token
    pub fn position(&self) -> usize {
        self.position
    }

    // ===== Helper methods =====

    /// Consume the current token if its kind is one of `kinds`
    pub(crate) fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|&kind| self.check(kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.peek().kind == kind
    }

    pub(crate) fn advance(&mut self) -> &'a Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn peek(&self) -> &'a Token {
        &self.tokens[self.position]
    }

    /// Most recently consumed token. Before anything is consumed this is the
    /// first token.
    pub(crate) fn previous(&self) -> &'a Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn expect_token(
        &mut self,
        kind: TokenKind,
        message: &str,
    ) -> Result<&'a Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(message))
        }
    }

    pub(crate) fn error_at_current(&self, message: &str) -> ParseError {
        ParseError::at(self.peek(), message)
    }

    /// Run `production` one nesting level deeper, refusing to recurse past
    /// `MAX_NESTING_DEPTH`.
    pub(crate) fn nested<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error_at_current("Expression nests too deeply."));
        }
        self.depth += 1;
        let result = production(self);
        self.depth -= 1;
        result
    }
}

/// Parse a token sequence into an expression, reporting syntax errors to
/// `reporter`. Returns `None` when the sequence does not form an expression.
pub fn parse(tokens: &[Token], reporter: &mut dyn Reporter) -> Option<Expr> {
    match Parser::new(tokens) {
        Ok(mut parser) => parser.parse(reporter),
        Err(err) => {
            reporter.report(err.into());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingReporter, DiagnosticKind};
    use crate::parser::ast::{Number, Value};
    use crate::parser::lexer::tokenize;
    use crate::printer::infix;

    fn parse_source(source: &str) -> (Option<Expr>, CollectingReporter) {
        let mut reporter = CollectingReporter::new();
        let tokens = tokenize(source, &mut reporter);
        let expr = parse(&tokens, &mut reporter);
        (expr, reporter)
    }

    fn shape(source: &str) -> String {
        let (expr, reporter) = parse_source(source);
        assert!(!reporter.had_error(), "unexpected diagnostics: {:?}", reporter.diagnostics());
        infix(&expr.expect("Parsing failed"))
    }

    #[test]
    fn test_parse_literals() {
        let cases = [
            ("42", Value::Number(Number::Int(42))),
            ("4.25", Value::Number(Number::Float(4.25))),
            ("\"text\"", Value::Str("text".to_string())),
            ("true", Value::Bool(true)),
            ("false", Value::Bool(false)),
            ("nil", Value::Nil),
        ];

        for (source, expected) in cases {
            let (expr, _) = parse_source(source);
            match expr {
                Some(Expr::Literal(value)) => assert_eq!(value, expected, "source: {}", source),
                other => panic!("Expected literal for {}, got {:?}", source, other),
            }
        }
    }

    #[test]
    fn test_integer_and_float_stay_distinct() {
        let (int_expr, _) = parse_source("2");
        let (float_expr, _) = parse_source("2.0");

        assert_eq!(int_expr, Some(Expr::Literal(Value::Number(Number::Int(2)))));
        assert_eq!(float_expr, Some(Expr::Literal(Value::Number(Number::Float(2.0)))));
        assert_ne!(int_expr, float_expr);
    }

    #[test]
    fn test_unary_binds_tighter_than_factor() {
        assert_eq!(shape("-2 * 3"), "(* (- 2) 3)");
        assert_eq!(shape("2 * -3"), "(* 2 (- 3))");
    }

    #[test]
    fn test_chained_unary() {
        assert_eq!(shape("!!true"), "(! (! true))");
        assert_eq!(shape("- -1"), "(- (- 1))");
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(shape("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(shape("8 / 4 / 2"), "(/ (/ 8 4) 2)");
    }

    #[test]
    fn test_precedence_levels() {
        assert_eq!(shape("1 + 2 * 3"), "(+ 1 (* 2 3))");
        assert_eq!(shape("1 < 2 == true"), "(== (< 1 2) true)");
        assert_eq!(shape("1 + 2 >= 3 != false"), "(!= (>= (+ 1 2) 3) false)");
    }

    #[test]
    fn test_comparison_chains() {
        assert_eq!(shape("1 < 2 < 3"), "(< (< 1 2) 3)");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(shape("(1 + 2) * 3"), "(* (group (+ 1 2)) 3)");
    }

    #[test]
    fn test_unbalanced_grouping() {
        let (expr, reporter) = parse_source("(1 + 2");

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics().len(), 1);
        let diagnostic = &reporter.diagnostics()[0];
        assert_eq!(diagnostic.kind, DiagnosticKind::Syntax);
        assert_eq!(diagnostic.message, "Expect ')' after expression.");
        assert_eq!(diagnostic.location, "at end");
    }

    #[test]
    fn test_unbalanced_grouping_cites_next_token() {
        let (expr, reporter) = parse_source("(1 + 2 3");

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics()[0].location, "3");
    }

    #[test]
    fn test_missing_operand() {
        let (expr, reporter) = parse_source("1 +");

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics()[0].message, "Expect expression.");
        assert_eq!(reporter.diagnostics()[0].location, "at end");
    }

    #[test]
    fn test_empty_input() {
        let (expr, reporter) = parse_source("");

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics().len(), 1);
    }

    #[test]
    fn test_error_line_number() {
        let (_, reporter) = parse_source("1 +\n\n)");

        assert_eq!(reporter.diagnostics()[0].line, 3);
        assert_eq!(reporter.diagnostics()[0].location, ")");
    }

    #[test]
    fn test_synchronize_stops_after_semicolon() {
        let mut reporter = CollectingReporter::new();
        let tokens = tokenize(") 1 2; 3", &mut reporter);
        let mut parser = Parser::new(&tokens).unwrap();

        assert!(parser.parse(&mut reporter).is_none());
        assert_eq!(tokens[parser.position()].lexeme, "3");
    }

    #[test]
    fn test_synchronize_stops_before_statement_keyword() {
        let mut reporter = CollectingReporter::new();
        let tokens = tokenize("* 1 print 2", &mut reporter);
        let mut parser = Parser::new(&tokens).unwrap();

        assert!(parser.parse(&mut reporter).is_none());
        assert_eq!(tokens[parser.position()].kind, TokenKind::Print);
    }

    #[test]
    fn test_synchronize_exhausts_input() {
        let mut reporter = CollectingReporter::new();
        let tokens = tokenize("(1 + ) 2 3 4", &mut reporter);
        let mut parser = Parser::new(&tokens).unwrap();

        assert!(parser.parse(&mut reporter).is_none());
        assert!(parser.is_at_end());
        assert_eq!(reporter.diagnostics().len(), 1);
    }

    #[test]
    fn test_trailing_tokens_are_left_unconsumed() {
        let mut reporter = CollectingReporter::new();
        let tokens = tokenize("1 2", &mut reporter);
        let mut parser = Parser::new(&tokens).unwrap();

        let expr = parser.parse(&mut reporter);
        assert_eq!(expr, Some(Expr::Literal(Value::Number(Number::Int(1)))));
        assert_eq!(parser.position(), 1);
    }

    #[test]
    fn test_parser_requires_eof() {
        let tokens = vec![Token::new(TokenKind::Nil, "nil", 1)];
        assert!(Parser::new(&tokens).is_err());
        assert!(Parser::new(&[]).is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let source = format!("{}1{}", "(".repeat(MAX_NESTING_DEPTH + 1), ")".repeat(MAX_NESTING_DEPTH + 1));
        let (expr, reporter) = parse_source(&source);

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics()[0].message, "Expression nests too deeply.");
    }

    #[test]
    fn test_nesting_within_limit() {
        let depth = 100;
        let source = format!("{}1", "-".repeat(depth));
        let (expr, reporter) = parse_source(&source);

        assert!(!reporter.had_error());
        assert_eq!(expr.map(|e| e.node_count()), Some(depth + 1));
    }

    #[test]
    fn test_identifier_is_not_an_expression_yet() {
        let (expr, reporter) = parse_source("x + 1");

        assert!(expr.is_none());
        assert_eq!(reporter.diagnostics()[0].location, "x");
    }
}

//! Expression parsing implementation
//!
//! One method per precedence tier, lowest first:
//!
//! ```text
//! expression → equality
//! equality   → comparison ( ( "!=" | "==" ) comparison )*
//! comparison → term ( ( "<" | "<=" | ">" | ">=" ) term )*
//! term       → factor ( ( "-" | "+" ) factor )*
//! factor     → unary ( ( "/" | "*" ) unary )*
//! unary      → ( "-" | "!" ) unary | primary
//! primary    → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")"
//! ```
//!
//! Binary tiers loop and fold to the left, so `1 - 2 - 3` leans left. `unary`
//! recurses on itself, so prefix operators nest to the right and bind tighter
//! than any binary operator.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Expr, Value};
use crate::parser::lexer::{TokenKind, TokenLiteral};
use crate::parser::parse::{ParseError, Parser};

impl<'a> Parser<'a> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_equality()
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::parse_comparison,
        )
    }

    /// Parse comparison (< <= > >=)
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::parse_term,
        )
    }

    /// Parse term (- +)
    fn parse_term(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::Minus, TokenKind::Plus], Self::parse_factor)
    }

    /// Parse factor (/ *)
    fn parse_factor(&mut self) -> Result<Expr, ParseError> {
        self.parse_left_assoc(&[TokenKind::Slash, TokenKind::Star], Self::parse_unary)
    }

    /// Shared loop for the binary tiers: one operand, then any number of
    /// `operator operand` pairs folded into a left-leaning tree.
    fn parse_left_assoc(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while self.match_kinds(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            left = Expr::binary(left, operator, right);
        }

        Ok(left)
    }

    /// Parse unary (! -)
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.nested(Self::parse_unary)?;
            return Ok(Expr::unary(operator, right));
        }

        self.parse_primary()
    }

    /// Parse primary: literals and parenthesized expressions
    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek();

        let value = match token.kind {
            TokenKind::False => Value::Bool(false),
            TokenKind::True => Value::Bool(true),
            TokenKind::Nil => Value::Nil,
            TokenKind::Number | TokenKind::String => match &token.literal {
                Some(TokenLiteral::Number(n)) => Value::Number(*n),
                Some(TokenLiteral::Str(s)) => Value::Str(s.clone()),
                None => return Err(ParseError::at(token, "Literal token carries no value.")),
            },
            TokenKind::LeftParen => {
                self.advance();
                let inner = self.nested(Self::parse_expression)?;
                self.expect_token(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::grouping(inner));
            }
            _ => return Err(self.error_at_current("Expect expression.")),
        };

        self.advance();
        Ok(Expr::Literal(value))
    }
}

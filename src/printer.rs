//! AST printers.
//!
//! Three read-only views of an [`Expr`] tree:
//! - [`infix`]: fully parenthesized prefix-operator form, `(* (- 2) 3)`
//! - [`rpn`]: postfix order, `2 neg 3 *`
//! - [`tree`]: indented one-node-per-line dump
//!
//! Every composite node gets its own parentheses in the infix form, so the
//! printed text determines the tree shape exactly.

use crate::parser::ast::Expr;
use crate::parser::lexer::TokenKind;

/// Print `expr` as `(op left right)` / `(op right)` / `(group inner)`.
pub fn infix(expr: &Expr) -> String {
    InfixPrinter::new().print(expr)
}

/// Print `expr` in reverse Polish notation.
pub fn rpn(expr: &Expr) -> String {
    RpnPrinter::new().print(expr)
}

/// Print `expr` as an indented tree.
pub fn tree(expr: &Expr) -> String {
    TreePrinter::new().print(expr)
}

#[derive(Debug, Default)]
pub struct InfixPrinter {
    output: String,
}

impl InfixPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.write_expr(expr);
        std::mem::take(&mut self.output)
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                self.output.push('(');
                self.output.push_str(&operator.lexeme);
                self.output.push(' ');
                self.write_expr(left);
                self.output.push(' ');
                self.write_expr(right);
                self.output.push(')');
            }
            Expr::Unary { operator, right } => {
                self.output.push('(');
                self.output.push_str(&operator.lexeme);
                self.output.push(' ');
                self.write_expr(right);
                self.output.push(')');
            }
            Expr::Grouping(inner) => {
                self.output.push_str("(group ");
                self.write_expr(inner);
                self.output.push(')');
            }
            Expr::Literal(value) => self.output.push_str(&value.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct RpnPrinter {
    output: String,
}

impl RpnPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.write_expr(expr);
        std::mem::take(&mut self.output)
    }

    fn write_word(&mut self, word: &str) {
        if !self.output.is_empty() {
            self.output.push(' ');
        }
        self.output.push_str(word);
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                self.write_expr(left);
                self.write_expr(right);
                self.write_word(&operator.lexeme);
            }
            Expr::Unary { operator, right } => {
                self.write_expr(right);
                // `-` alone would read as subtraction in postfix
                match operator.kind {
                    TokenKind::Minus => self.write_word("neg"),
                    _ => self.write_word(&operator.lexeme),
                }
            }
            // postfix order needs no grouping
            Expr::Grouping(inner) => self.write_expr(inner),
            Expr::Literal(value) => self.write_word(&value.to_string()),
        }
    }
}

#[derive(Debug, Default)]
pub struct TreePrinter {
    output: String,
    indent: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&mut self, expr: &Expr) -> String {
        self.output.clear();
        self.indent = 0;
        self.write_expr(expr);
        std::mem::take(&mut self.output)
    }

    fn writeln(&mut self, s: &str) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
        self.output.push_str(s);
        self.output.push('\n');
    }

    fn write_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                self.writeln(&format!("Binary {}", operator.lexeme));
                self.indent += 1;
                self.write_expr(left);
                self.write_expr(right);
                self.indent -= 1;
            }
            Expr::Unary { operator, right } => {
                self.writeln(&format!("Unary {}", operator.lexeme));
                self.indent += 1;
                self.write_expr(right);
                self.indent -= 1;
            }
            Expr::Grouping(inner) => {
                self.writeln("Grouping");
                self.indent += 1;
                self.write_expr(inner);
                self.indent -= 1;
            }
            Expr::Literal(value) => self.writeln(&format!("Literal {}", value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{Number, Value};
    use crate::parser::lexer::Token;

    fn op(kind: TokenKind, lexeme: &str) -> Token {
        Token::new(kind, lexeme, 1)
    }

    fn int(n: i64) -> Expr {
        Expr::Literal(Value::Number(Number::Int(n)))
    }

    /// (-2) * (3.0 + 4)
    fn sample() -> Expr {
        Expr::binary(
            Expr::unary(op(TokenKind::Minus, "-"), int(2)),
            op(TokenKind::Star, "*"),
            Expr::grouping(Expr::binary(
                Expr::Literal(Value::Number(Number::Float(3.0))),
                op(TokenKind::Plus, "+"),
                int(4),
            )),
        )
    }

    #[test]
    fn test_infix() {
        assert_eq!(infix(&sample()), "(* (- 2) (group (+ 3.0 4)))");
    }

    #[test]
    fn test_infix_literals() {
        assert_eq!(infix(&Expr::Literal(Value::Str("hi".to_string()))), "\"hi\"");
        assert_eq!(infix(&Expr::Literal(Value::Bool(false))), "false");
        assert_eq!(infix(&Expr::Literal(Value::Nil)), "nil");
        assert_eq!(infix(&Expr::Literal(Value::Number(Number::Float(0.5)))), "0.5");
    }

    #[test]
    fn test_display_matches_infix() {
        let expr = sample();
        assert_eq!(expr.to_string(), infix(&expr));
    }

    #[test]
    fn test_rpn() {
        assert_eq!(rpn(&sample()), "2 neg 3.0 4 + *");
    }

    #[test]
    fn test_rpn_bang() {
        let expr = Expr::unary(op(TokenKind::Bang, "!"), Expr::Literal(Value::Bool(true)));
        assert_eq!(rpn(&expr), "true !");
    }

    #[test]
    fn test_tree() {
        let expected = "\
Binary *
  Unary -
    Literal 2
  Grouping
    Binary +
      Literal 3.0
      Literal 4
";
        assert_eq!(tree(&sample()), expected);
    }

    #[test]
    fn test_printer_is_reusable() {
        let mut printer = InfixPrinter::new();
        assert_eq!(printer.print(&int(1)), "1");
        assert_eq!(printer.print(&int(2)), "2");
    }
}

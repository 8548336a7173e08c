//! Lexer (scanner) for the expression language
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! The scan is a single left-to-right pass with one character of lookahead.
//! Lexical errors are handed to a [`Reporter`] and scanning carries on, so one
//! bad character or an unterminated string never hides later tokens.

use super::ast::Number;
use crate::diagnostics::{Diagnostic, Reporter};
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Lexical categories produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character punctuation
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character operators
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals
    Identifier,
    String,
    Number,

    // Keywords
    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Keywords that open a declaration or statement; the parser resynchronizes
    /// in front of these after a syntax error.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return
        )
    }
}

/// Reserved words, built once on first lookup and never mutated afterwards
static KEYWORDS: Lazy<FxHashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut map = FxHashMap::default();
    map.insert("and", TokenKind::And);
    map.insert("or", TokenKind::Or);
    map.insert("class", TokenKind::Class);
    map.insert("else", TokenKind::Else);
    map.insert("print", TokenKind::Print);
    map.insert("false", TokenKind::False);
    map.insert("for", TokenKind::For);
    map.insert("fun", TokenKind::Fun);
    map.insert("if", TokenKind::If);
    map.insert("nil", TokenKind::Nil);
    map.insert("return", TokenKind::Return);
    map.insert("super", TokenKind::Super);
    map.insert("this", TokenKind::This);
    map.insert("true", TokenKind::True);
    map.insert("var", TokenKind::Var);
    map.insert("while", TokenKind::While);
    map
});

/// Look up a reserved word. Returns `None` for ordinary identifiers.
pub fn keyword(ident: &str) -> Option<TokenKind> {
    KEYWORDS.get(ident).copied()
}

/// Decoded payload of a literal token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenLiteral {
    Str(String),
    Number(Number),
}

impl fmt::Display for TokenLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenLiteral::Str(s) => write!(f, "\"{}\"", s),
            TokenLiteral::Number(n) => write!(f, "{}", n),
        }
    }
}

/// A classified, line-tagged slice of source text
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// 1-based line on which the token starts
    pub line: usize,
    pub literal: Option<TokenLiteral>,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            literal: None,
        }
    }

    pub fn with_literal(mut self, literal: TokenLiteral) -> Self {
        self.literal = Some(literal);
        self
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<4} {:<16} '{}'", self.line, format!("{:?}", self.kind), self.lexeme)?;
        if let Some(literal) = &self.literal {
            write!(f, " = {}", literal)?;
        }
        Ok(())
    }
}

/// Decode an `N.M` lexeme. The integer part must fit in `i64`, like an integer
/// literal, and the value must be finite.
fn decode_float(text: &str) -> Option<f64> {
    let (whole, _) = text.split_once('.')?;
    whole.parse::<i64>().ok()?;
    text.parse::<f64>().ok().filter(|x| x.is_finite())
}

/// Scanner over one in-memory source buffer
pub struct Lexer {
    input: Vec<char>,
    start: usize,
    start_line: usize,
    position: usize,
    line: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            start: 0,
            start_line: 1,
            position: 0,
            line: 1,
        }
    }

    /// Tokenize the entire input.
    ///
    /// The returned sequence always ends with exactly one [`TokenKind::Eof`]
    /// token. After any lexical error the sequence is best-effort: the bad
    /// span contributes no token.
    pub fn tokenize(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
        let mut tokens = Vec::new();

        while !self.is_at_end() {
            self.start = self.position;
            self.start_line = self.line;
            if let Some(token) = self.scan_token(reporter) {
                tokens.push(token);
            }
        }

        tokens.push(Token::new(TokenKind::Eof, "", self.line));
        tokens
    }

    /// Scan one lexeme starting at `self.start`. Returns `None` for
    /// whitespace, comments, and spans that produced a diagnostic.
    fn scan_token(&mut self, reporter: &mut dyn Reporter) -> Option<Token> {
        let ch = self.advance()?;

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            '-' => TokenKind::Minus,
            '+' => TokenKind::Plus,
            ';' => TokenKind::Semicolon,
            '*' => TokenKind::Star,

            '!' => self.either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                    return None;
                }
                TokenKind::Slash
            }

            // Newlines are counted in `advance`
            ' ' | '\t' | '\r' | '\n' => return None,

            '"' => return self.string_literal(reporter),
            c if c.is_ascii_digit() => return self.number_literal(reporter),
            c if c.is_alphabetic() => return Some(self.identifier_or_keyword()),

            _ => {
                reporter.report(Diagnostic::lexical(
                    self.line,
                    "Unexpected character.",
                    self.lexeme(),
                ));
                return None;
            }
        };

        Some(self.make_token(kind))
    }

    /// Resolve a one-or-two character operator
    fn either(&mut self, next: char, matched: TokenKind, single: TokenKind) -> TokenKind {
        if self.match_char(next) {
            matched
        } else {
            single
        }
    }

    /// Parse string literal; the opening quote is already consumed
    fn string_literal(&mut self, reporter: &mut dyn Reporter) -> Option<Token> {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            self.advance();
        }

        if self.is_at_end() {
            // Only the part of the span on the reported (last) line
            let lexeme = self.lexeme();
            let tail = lexeme.rsplit('\n').next().unwrap_or_default();
            let location = if tail.is_empty() { "at end" } else { tail };
            reporter.report(Diagnostic::lexical(
                self.line,
                "Unterminated string.",
                location,
            ));
            return None;
        }

        self.advance(); // closing quote

        let value: String = self.input[self.start + 1..self.position - 1].iter().collect();
        Some(self.make_token(TokenKind::String).with_literal(TokenLiteral::Str(value)))
    }

    /// Parse numeric literal: digits, optionally `.` followed by more digits
    fn number_literal(&mut self, reporter: &mut dyn Reporter) -> Option<Token> {
        self.consume_digits();

        let mut is_float = false;
        if self.peek() == Some('.') && self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance(); // '.'
            self.consume_digits();
        }

        let text = self.lexeme();
        let number = if is_float {
            decode_float(&text).map(Number::Float)
        } else {
            text.parse::<i64>().ok().map(Number::Int)
        };

        match number {
            Some(number) => {
                Some(self.make_token(TokenKind::Number).with_literal(TokenLiteral::Number(number)))
            }
            None => {
                reporter.report(Diagnostic::lexical(
                    self.start_line,
                    "Invalid number literal.",
                    text,
                ));
                None
            }
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self) -> Token {
        while self.peek().is_some_and(char::is_alphabetic) {
            self.advance();
        }

        let kind = keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.make_token(kind)
    }

    /// Skip the rest of a `//` comment, leaving the newline in place
    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.lexeme(), self.start_line)
    }

    /// Source text of the lexeme scanned so far
    fn lexeme(&self) -> String {
        self.input[self.start..self.position].iter().collect()
    }

    /// Consume the next character only if it equals `expected`
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
        }

        Some(ch)
    }

    /// Check if at end of input
    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }
}

/// Scan `source` into tokens, reporting lexical errors to `reporter`.
pub fn tokenize(source: &str, reporter: &mut dyn Reporter) -> Vec<Token> {
    Lexer::new(source).tokenize(reporter)
}

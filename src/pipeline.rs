//! Source → tokens → AST → printed output, as driven by the command line.

use crate::diagnostics::Reporter;
use crate::parser::ast::Expr;
use crate::parser::lexer::{tokenize, Token};
use crate::parser::parse::parse;
use crate::printer;

/// Which printer(s) render a successfully parsed AST
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrintFormat {
    #[default]
    Infix,
    Rpn,
    Tree,
    All,
}

/// Per-run settings collected from the command line
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Print the token sequence before the AST
    pub show_tokens: bool,
    pub format: PrintFormat,
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub tokens: Vec<Token>,
    pub ast: Option<Expr>,
    /// Lines for the driver to print, in order
    pub rendered: Vec<String>,
}

/// Scan and parse one source buffer.
///
/// Lexical errors do not stop the parser: it still runs over the best-effort
/// token stream so a single pass reports as much as possible. The AST is
/// rendered only when parsing succeeded.
pub fn run_source(source: &str, options: &RunOptions, reporter: &mut dyn Reporter) -> RunOutput {
    let tokens = tokenize(source, reporter);
    let ast = parse(&tokens, reporter);

    let mut rendered = Vec::new();

    if options.show_tokens {
        rendered.extend(tokens.iter().map(|token| token.to_string()));
    }

    if let Some(expr) = &ast {
        let format = options.format;
        if matches!(format, PrintFormat::Infix | PrintFormat::All) {
            rendered.push(format!("AST: {}", printer::infix(expr)));
        }
        if matches!(format, PrintFormat::Rpn | PrintFormat::All) {
            rendered.push(format!("RPN: {}", printer::rpn(expr)));
        }
        if matches!(format, PrintFormat::Tree | PrintFormat::All) {
            rendered.extend(printer::tree(expr).lines().map(str::to_string));
        }
    }

    RunOutput {
        tokens,
        ast,
        rendered,
    }
}

/// Decode one raw prompt line, dropping its line terminator.
///
/// Input that is not UTF-8 is returned as the error so the caller can report
/// it and keep reading.
pub fn decode_line(raw: &[u8]) -> Result<&str, std::str::Utf8Error> {
    std::str::from_utf8(raw).map(|line| line.trim_end_matches(['\n', '\r']))
}

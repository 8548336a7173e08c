//! Diagnostic reporting shared by the lexer and the parser
//!
//! Both front-end stages report problems through the [`Reporter`] trait rather
//! than printing directly. [`StderrReporter`] prints each diagnostic as soon as
//! it arrives; [`CollectingReporter`] keeps them in order for tests and for
//! callers that want to inspect them afterwards.

use crate::constants::CARET_MARKER;
use crossterm::style::Stylize;
use std::fmt;

/// Which stage produced a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::Lexical => write!(f, "Lexical error"),
            DiagnosticKind::Syntax => write!(f, "Syntax error"),
        }
    }
}

/// A single reported problem: which line, what went wrong, and where on the line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: usize,
    pub message: String,
    /// Offending source text, or `at end` for errors at end of input
    pub location: String,
}

impl Diagnostic {
    pub fn lexical(line: usize, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Lexical,
            line,
            message: message.into(),
            location: location.into(),
        }
    }

    pub fn syntax(line: usize, message: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Syntax,
            line,
            message: message.into(),
            location: location.into(),
        }
    }

    /// Line-number gutter printed in front of the location text
    fn gutter(&self) -> String {
        format!("  {} | ", self.line)
    }

    /// Render with terminal colors. Same layout as the `Display` output.
    pub fn render_styled(&self) -> String {
        let gutter = self.gutter();
        format!(
            "{}: {}\n{}{}\n{}{}",
            self.kind.to_string().red().bold(),
            self.message.as_str().bold(),
            gutter.as_str().dim(),
            self.location,
            " ".repeat(gutter.chars().count()),
            CARET_MARKER.yellow(),
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gutter = self.gutter();
        writeln!(f, "{}: {}", self.kind, self.message)?;
        writeln!(f, "{}{}", gutter, self.location)?;
        write!(f, "{}{}", " ".repeat(gutter.chars().count()), CARET_MARKER)
    }
}

/// Sink for diagnostics. Implementations must keep report order.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    /// Whether anything has been reported so far
    fn had_error(&self) -> bool;
}

/// Keeps every diagnostic in arrival order
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Count diagnostics of one kind
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }
}

impl Reporter for CollectingReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn had_error(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Prints each diagnostic to stderr the moment it is reported
#[derive(Debug, Clone, Default)]
pub struct StderrReporter {
    color: bool,
    reported: usize,
}

impl StderrReporter {
    pub fn new(color: bool) -> Self {
        Self { color, reported: 0 }
    }

    pub fn reported(&self) -> usize {
        self.reported
    }
}

impl Reporter for StderrReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.reported += 1;
        if self.color {
            eprintln!("{}", diagnostic.render_styled());
        } else {
            eprintln!("{}", diagnostic);
        }
    }

    fn had_error(&self) -> bool {
        self.reported > 0
    }
}

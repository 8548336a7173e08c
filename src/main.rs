// loxfront: scanner and parser front end for a small expression language

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};
use crossterm::tty::IsTty;

use loxfront::constants::{EXIT_DATA_ERR, EXIT_NO_INPUT, PROMPT, REPL_FAREWELL};
use loxfront::diagnostics::{Reporter, StderrReporter};
use loxfront::pipeline::{decode_line, run_source, PrintFormat, RunOptions};

#[derive(Parser)]
#[command(name = "loxfront")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tokenize and parse expressions, printing the resulting AST", long_about = None)]
struct Cli {
    /// Source file to run once; omit to start an interactive prompt
    file: Option<PathBuf>,

    /// Print the token sequence before the AST
    #[arg(long)]
    tokens: bool,

    /// How to print a successfully parsed AST
    #[arg(long, value_enum, default_value_t = FormatArg::Infix)]
    format: FormatArg,

    /// When to style diagnostics with terminal colors
    #[arg(long, value_enum, default_value_t = ColorArg::Auto)]
    color: ColorArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Infix,
    Rpn,
    Tree,
    All,
}

impl From<FormatArg> for PrintFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Infix => PrintFormat::Infix,
            FormatArg::Rpn => PrintFormat::Rpn,
            FormatArg::Tree => PrintFormat::Tree,
            FormatArg::All => PrintFormat::All,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ColorArg {
    Auto,
    Always,
    Never,
}

impl ColorArg {
    fn enabled(self) -> bool {
        match self {
            ColorArg::Auto => io::stderr().is_tty(),
            ColorArg::Always => true,
            ColorArg::Never => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let options = RunOptions {
        show_tokens: cli.tokens,
        format: cli.format.into(),
    };
    let color = cli.color.enabled();

    match &cli.file {
        Some(path) => run_file(path, &options, color),
        None => {
            if let Err(e) = run_prompt(&options, color) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    }
}

/// Run a whole file once; exits non-zero if anything was reported
fn run_file(path: &Path, options: &RunOptions, color: bool) {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: could not read '{}': {}", path.display(), e);
            process::exit(EXIT_NO_INPUT);
        }
    };

    let mut reporter = StderrReporter::new(color);
    let output = run_source(&source, options, &mut reporter);
    for line in &output.rendered {
        println!("{}", line);
    }

    if reporter.had_error() {
        eprintln!("{} error(s) reported", reporter.reported());
        process::exit(EXIT_DATA_ERR);
    }
}

/// Interactive loop: one line per run, until an empty line or end of input
fn run_prompt(options: &RunOptions, color: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut raw = Vec::new();

    loop {
        write!(stdout, "{}", PROMPT)?;
        stdout.flush()?;

        raw.clear();
        if stdin.lock().read_until(b'\n', &mut raw)? == 0 {
            break;
        }

        let input = match decode_line(&raw) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("Error: line is not valid UTF-8: {}", e);
                continue;
            }
        };
        if input.is_empty() {
            break;
        }

        // Fresh reporter per line so one bad line doesn't taint the next
        let mut reporter = StderrReporter::new(color);
        let output = run_source(input, options, &mut reporter);
        for rendered in &output.rendered {
            writeln!(stdout, "{}", rendered)?;
        }
    }

    writeln!(stdout, "\n{}", REPL_FAREWELL)?;
    Ok(())
}

// Constants for the expression front end

/// Prompt printed before each line in interactive mode
pub const PROMPT: &str = ">>> ";

/// Message printed when the interactive session ends
pub const REPL_FAREWELL: &str = "shutting down repl";

/// Pointer printed beneath the location text of a diagnostic
pub const CARET_MARKER: &str = "^-- Here.";

/// Deepest grouping/unary nesting the parser accepts before reporting an error
/// instead of recursing further
pub const MAX_NESTING_DEPTH: usize = 128;

/// Process exit status when the input produced diagnostics (sysexits EX_DATAERR)
pub const EXIT_DATA_ERR: i32 = 65;

/// Process exit status when the input file cannot be read (sysexits EX_NOINPUT)
pub const EXIT_NO_INPUT: i32 = 66;

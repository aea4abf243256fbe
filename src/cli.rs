use crate::config::Action;
use clap::Parser;
use std::path::PathBuf;

/// Recursive line picker and text replacer.
///
/// `reword` walks a directory tree, picks files by extension and finds or
/// replaces text line by line. Start with `echo` to see which files are in
/// scope, `audit` to preview each change, then `update` to write them.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Recursive line picker and text replacer",
    long_about = "reword - find and replace text across a source tree, one line at a time.

Three actions:
  echo    list the files in scope
  audit   show every line that would change, write nothing
  update  rewrite matching lines in place

QUICK EXAMPLES:
  reword src -x .scss                                   # Which .scss files are in scope?
  reword src -x .js,.jsx -t 'Copyright 2021' -r 'Copyright 2022' -a audit
  reword src -t 'v\\d+' --regex -r 'v2' -a update -e '/\\.|node_modules|vendor'
  reword -c rename-term.yaml .                          # Take options from a run file"
)]
pub struct Args {
    /// The directory to process.
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// The text to search for in each line.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Treat the target as a regular expression.
    #[arg(long)]
    pub regex: bool,

    /// The text to put in place of every occurrence of the target.
    #[arg(short, long)]
    pub replacement: Option<String>,

    /// What to do with each file.
    #[arg(short, long, value_enum)]
    pub action: Option<Action>,

    /// A comma-separated list of file extensions to include (default: .js).
    #[arg(short = 'x', long = "ext", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// A regex over directory paths; matching directories are skipped entirely.
    #[arg(short = 'e', long = "exclude")]
    pub exclude: Option<String>,

    /// A regex over line text; matching lines are never replaced.
    #[arg(long = "skip-line")]
    pub skip_line: Option<String>,

    /// Path to a YAML or JSON run file. Flags given on the command line win.
    #[arg(short, long, env = "REWORD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log diagnostics to stderr (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

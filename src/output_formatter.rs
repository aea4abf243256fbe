//! The log line grammar.
//!
//! Downstream tooling parses these lines, so every line a run emits is built
//! here and nowhere else:
//!
//! ```text
//! Total file count = <int>
//! Matched file count = <int>
//! <path>
//! *** File(<int> lines): <path>
//! @@@ Found:  <original line text>
//! --- Change: <replaced line text>
//! *** Omitted: <path>
//! @@@ Updated(<int> lines): <path>
//! ```

use std::io::Write;
use std::path::Path;

/// Receives each log line of a run, one call per line, without a trailing newline.
pub type LineSink = Box<dyn FnMut(&str)>;

/// The default sink: one line per call on standard output.
pub fn stdout_sink() -> LineSink {
    Box::new(|line: &str| {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        // Write errors on stdout, such as a closed pipe, are dropped.
        let _ = writeln!(handle, "{line}");
    })
}

pub fn total_count(count: usize) -> String {
    format!("Total file count = {count}")
}

pub fn matched_count(count: usize) -> String {
    format!("Matched file count = {count}")
}

/// The `echo` line: just the path.
pub fn echo(path: &Path) -> String {
    path.display().to_string()
}

pub fn audit_header(lines: usize, path: &Path) -> String {
    format!("*** File({lines} lines): {}", path.display())
}

pub fn found(line: &str) -> String {
    format!("@@@ Found:  {line}")
}

pub fn change(line: &str) -> String {
    format!("--- Change: {line}")
}

pub fn omitted(path: &Path) -> String {
    format!("*** Omitted: {}", path.display())
}

pub fn updated(lines: usize, path: &Path) -> String {
    format!("@@@ Updated({lines} lines): {}", path.display())
}

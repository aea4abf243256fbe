//! `reword` recursively walks a directory tree and finds/replaces text within
//! the lines of selected files.
//!
//! It provides the core logic for the `reword` command-line tool but can also be
//! used as a standalone library. The main components are:
//!
//! - `walker`: The tree walker and the [`process_all_files`] entry point.
//! - `replacer`: The `echo`, `audit` and `update` actions applied to each file.
//! - `scanner`: The line-scan primitive shared by `audit` and `update`.
//! - `patterns`: Literal vs. regex targets, extension sets and default exclusions.
//! - `output_formatter`: The exact, parseable log line grammar.
//! - `config`: Run options and YAML/JSON run files.
//!
//! Processing is single-threaded and deterministic: entries are visited
//! depth-first in file-name order, and every result is reported through the
//! emit-line sink as it happens.

pub mod cli;
pub mod config;
pub mod errors;
pub mod output_formatter;
pub mod patterns;
pub mod replacer;
pub mod scanner;
pub mod walker;

// Re-export main types for easier access by library users.
pub use config::{Action, Options};
pub use errors::{Error, Result};
pub use patterns::Target;
pub use walker::{process_all_files, RunState};

use crate::errors::{Error, Result};
use crate::patterns::Target;
use std::fs;
use std::path::Path;

/// A single line that matched the target and survived the replacement filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChange {
    /// 1-based line number within the file.
    pub line_number: usize,
    /// The line as it was read.
    pub found: String,
    /// The line with every occurrence of the target replaced.
    pub change: String,
}

/// The outcome of scanning one file.
#[derive(Debug, Clone)]
pub struct FileScan {
    lines: Vec<String>,
    /// Surviving matches, in line order.
    pub changes: Vec<LineChange>,
}

impl FileScan {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// The file content with all surviving substitutions applied.
    ///
    /// Lines are rejoined with `\n`, so a scan without changes reproduces the
    /// original text byte for byte.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}

/// The line-scan primitive shared by the `audit` and `update` actions.
///
/// A `Scanner` borrows the run's target, replacement and optional filter; it
/// holds no state of its own between files.
pub struct Scanner<'a> {
    target: &'a Target,
    replacement: &'a str,
    filter: Option<&'a dyn Fn(&Path, &str) -> bool>,
}

impl<'a> Scanner<'a> {
    pub fn new(
        target: &'a Target,
        replacement: &'a str,
        filter: Option<&'a dyn Fn(&Path, &str) -> bool>,
    ) -> Self {
        Self {
            target,
            replacement,
            filter,
        }
    }

    /// Reads `path` as UTF-8 text and scans it.
    pub fn scan_file(&self, path: &Path) -> Result<FileScan> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.scan_str(path, &content))
    }

    /// Scans already-loaded content.
    ///
    /// Lines are split strictly on `\n`; a trailing `\r` stays part of the
    /// line. Every matching line is considered, not just the first. The
    /// filter sees the original line and can veto that line alone.
    pub fn scan_str(&self, path: &Path, content: &str) -> FileScan {
        let mut lines: Vec<String> = content.split('\n').map(String::from).collect();
        let mut changes = Vec::new();

        for (idx, line) in lines.iter_mut().enumerate() {
            if !self.target.is_match(line.as_str()) {
                continue;
            }
            if let Some(filter) = self.filter {
                if !filter(path, line.as_str()) {
                    log::trace!("filter vetoed {}:{}", path.display(), idx + 1);
                    continue;
                }
            }

            let change = self.target.replace_all(line.as_str(), self.replacement);
            let found = std::mem::replace(line, change.clone());
            changes.push(LineChange {
                line_number: idx + 1,
                found,
                change,
            });
        }

        FileScan { lines, changes }
    }
}

use crate::config::Action;
use crate::errors::{Error, Result};
use crate::output_formatter as fmt;
use crate::scanner::Scanner;
use crate::walker::RunState;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The file action engine.
///
/// A `Replacer` pairs the configured [`Action`] with the shared line scanner
/// and applies it to one accepted file at a time, updating the run counters
/// and emitting the log lines for that file.
pub struct Replacer<'a> {
    action: Action,
    scanner: Scanner<'a>,
}

impl<'a> Replacer<'a> {
    pub fn new(action: Action, scanner: Scanner<'a>) -> Self {
        Self { action, scanner }
    }

    /// Applies the action to a single file.
    ///
    /// `total_file_count` goes up once for every call; `matched_file_count`
    /// once per file with at least one surviving match. Any read or write
    /// failure is returned and ends the run.
    pub fn process_file(
        &self,
        path: &Path,
        state: &mut RunState,
        emit: &mut dyn FnMut(&str),
    ) -> Result<()> {
        match self.action {
            Action::Echo => emit(&fmt::echo(path)),
            Action::Audit => self.audit(path, state, emit)?,
            Action::Update => self.update(path, state, emit)?,
        }
        state.total_file_count += 1;
        Ok(())
    }

    fn audit(&self, path: &Path, state: &mut RunState, emit: &mut dyn FnMut(&str)) -> Result<()> {
        let scan = self.scanner.scan_file(path)?;

        if !scan.has_changes() {
            emit(&fmt::omitted(path));
            return Ok(());
        }

        emit(&fmt::audit_header(scan.changes.len(), path));
        for line in &scan.changes {
            emit(&fmt::found(&line.found));
            emit(&fmt::change(&line.change));
        }
        state.matched_file_count += 1;
        Ok(())
    }

    fn update(&self, path: &Path, state: &mut RunState, emit: &mut dyn FnMut(&str)) -> Result<()> {
        let scan = self.scanner.scan_file(path)?;

        if !scan.has_changes() {
            return Ok(());
        }

        write_atomically(path, &scan.content())?;
        log::debug!("rewrote {} ({} lines)", path.display(), scan.changes.len());
        emit(&fmt::updated(scan.changes.len(), path));
        state.matched_file_count += 1;
        Ok(())
    }
}

/// Replaces the content of `path` without ever leaving it half-written.
///
/// The new content goes to a temporary file in the same directory, which
/// takes over the original's permissions and is then renamed over it.
fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let write_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut temp_file = NamedTempFile::new_in(parent).map_err(write_err)?;
    temp_file.write_all(content.as_bytes()).map_err(write_err)?;

    let perms = fs::metadata(path).map_err(write_err)?.permissions();
    fs::set_permissions(temp_file.path(), perms).map_err(write_err)?;

    temp_file.persist(path)?;
    Ok(())
}

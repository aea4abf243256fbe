use crate::config::{Action, Options};
use crate::errors::{Error, Result};
use crate::output_formatter::{self as fmt, stdout_sink};
use crate::patterns::{default_exclude_dirs, path_text, ExtensionSet};
use crate::replacer::Replacer;
use crate::scanner::Scanner;
use regex::Regex;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Counters for a single run. Created fresh by [`process_all_files`] and
/// never shared between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Files that passed the extension filter, matched or not.
    pub total_file_count: usize,
    /// Files with at least one surviving match. Never exceeds the total.
    pub matched_file_count: usize,
}

/// Walks `start_dir` and applies the configured action to every accepted file.
///
/// Traversal is depth-first with entries in file-name order. A subdirectory
/// whose path matches the exclusion pattern is pruned when it is found, so
/// nothing beneath it is ever opened. Once the whole tree is done the summary
/// is emitted: `Total file count = N`, then `Matched file count = M` unless the
/// action is [`Action::Echo`].
///
/// The first I/O error aborts the run, including a `start_dir` that is
/// missing or is not a directory. Files already rewritten stay rewritten.
///
/// # Example
///
/// ```no_run
/// use reword::{process_all_files, Action, Options, Target};
///
/// let options = Options::new()
///     .with_target(Target::literal("Copyright 2021"))
///     .with_replacement("Copyright 2022")
///     .with_include_exts([".js", ".scss"])
///     .with_action(Action::Audit);
///
/// let state = process_all_files("src", options)?;
/// println!("{} of {} files would change", state.matched_file_count, state.total_file_count);
/// # Ok::<(), reword::Error>(())
/// ```
pub fn process_all_files(start_dir: impl AsRef<Path>, options: Options) -> Result<RunState> {
    let start_dir = match start_dir.as_ref() {
        dir if dir.as_os_str().is_empty() => Path::new("."),
        dir => dir,
    };
    ensure_directory(start_dir)?;

    let Options {
        target,
        replacement,
        action,
        include_exts,
        exclude_dirs,
        replacement_filter,
        emit,
    } = options;

    let exclude_dirs = match exclude_dirs {
        Some(regex) => regex,
        None => default_exclude_dirs(start_dir)?,
    };
    let mut emit = emit.unwrap_or_else(stdout_sink);

    let scanner = Scanner::new(&target, &replacement, replacement_filter.as_deref());
    let walker = Walker {
        start_dir,
        include_exts: &include_exts,
        exclude_dirs: &exclude_dirs,
        replacer: Replacer::new(action, scanner),
    };

    log::debug!("walking {} ({action:?})", start_dir.display());
    let state = walker.walk(&mut *emit)?;

    emit(&fmt::total_count(state.total_file_count));
    if action != Action::Echo {
        emit(&fmt::matched_count(state.matched_file_count));
    }

    Ok(state)
}

/// Fails with [`Error::Read`] unless `path` is an existing directory.
fn ensure_directory(path: &Path) -> Result<()> {
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(read_err)?;
    if !metadata.is_dir() {
        return Err(read_err(io::Error::new(
            io::ErrorKind::NotADirectory,
            "start path is not a directory",
        )));
    }
    Ok(())
}

/// The tree walker for one run.
struct Walker<'a> {
    start_dir: &'a Path,
    include_exts: &'a ExtensionSet,
    exclude_dirs: &'a Regex,
    replacer: Replacer<'a>,
}

impl Walker<'_> {
    fn walk(&self, emit: &mut dyn FnMut(&str)) -> Result<RunState> {
        let mut state = RunState::default();

        let entries = WalkDir::new(self.start_dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_excluded_dir(entry));

        for entry in entries {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_file() && self.include_exts.contains(path) {
                self.replacer.process_file(path, &mut state, emit)?;
            } else {
                log::trace!("skipping {}", path.display());
            }
        }

        Ok(state)
    }

    /// A directory is excluded when its own full path matches; the start
    /// directory is never tested.
    fn is_excluded_dir(&self, entry: &DirEntry) -> bool {
        if !entry.file_type().is_dir() {
            return false;
        }
        let excluded = self.exclude_dirs.is_match(&path_text(entry.path()));
        if excluded {
            log::debug!("pruning {}", entry.path().display());
        }
        excluded
    }
}

use crate::errors::{Error, Result};
use crate::output_formatter::LineSink;
use crate::patterns::{ExtensionSet, Target};
use regex::Regex;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Per-line veto over a match: called with the file path and the original
/// line text. Returning `false` drops that line as if it had not matched.
pub type ReplacementFilter = Box<dyn Fn(&Path, &str) -> bool>;

/// What to do with each file that passes the extension filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// List the file path only; contents are never read.
    #[default]
    Echo,
    /// Show every line that would change, without writing anything.
    Audit,
    /// Rewrite matching files in place.
    Update,
}

/// Everything a run needs, fixed before the walk starts.
pub struct Options {
    /// The literal or pattern searched for in each line.
    pub target: Target,
    /// Inserted verbatim in place of every occurrence of the target.
    pub replacement: String,
    pub action: Action,
    /// Extensions eligible for processing. Defaults to `.js`.
    pub include_exts: ExtensionSet,
    /// Directories whose path matches are pruned. `None` selects the default
    /// for the start directory, see [`crate::patterns::default_exclude_dirs`].
    pub exclude_dirs: Option<Regex>,
    pub replacement_filter: Option<ReplacementFilter>,
    /// Receives every log line. `None` writes to standard output.
    pub emit: Option<LineSink>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            target: Target::default(),
            replacement: String::new(),
            action: Action::default(),
            include_exts: ExtensionSet::default(),
            exclude_dirs: None,
            replacement_filter: None,
            emit: None,
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.replacement = replacement.into();
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    pub fn with_include_exts<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.include_exts = ExtensionSet::new(extensions);
        self
    }

    pub fn with_exclude_dirs(mut self, exclude_dirs: Regex) -> Self {
        self.exclude_dirs = Some(exclude_dirs);
        self
    }

    pub fn with_replacement_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path, &str) -> bool + 'static,
    {
        self.replacement_filter = Some(Box::new(filter));
        self
    }

    pub fn with_emit<F>(mut self, emit: F) -> Self
    where
        F: FnMut(&str) + 'static,
    {
        self.emit = Some(Box::new(emit));
        self
    }
}

/// A run description loaded from a YAML or JSON file.
///
/// ```yaml
/// target: 'Copyright 2021'
/// replacement: 'Copyright 2022'
/// action: audit
/// extensions: ['.js', '.scss']
/// exclude: '/\.|node_modules|vendor'
/// skip_lines: 'LEGACY'
/// ```
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct FileConfig {
    /// Text to search for.
    pub target: Option<String>,
    /// If `true`, `target` is compiled as a regular expression.
    pub regex: bool,
    pub replacement: Option<String>,
    pub action: Option<Action>,
    pub extensions: Option<Vec<String>>,
    /// Regex over directory paths; matching directories are pruned.
    pub exclude: Option<String>,
    /// Regex over line text; matching lines are never replaced.
    pub skip_lines: Option<String>,
}

impl FileConfig {
    /// Compiles the description into run `Options`.
    ///
    /// Fails if any of the contained patterns is not a valid regex.
    pub fn into_options(self) -> Result<Options> {
        let target_text = self.target.unwrap_or_default();
        let target = if self.regex {
            Target::pattern(&target_text)?
        } else {
            Target::literal(target_text)
        };

        let mut options = Options::new()
            .with_target(target)
            .with_replacement(self.replacement.unwrap_or_default())
            .with_action(self.action.unwrap_or_default());

        if let Some(extensions) = self.extensions {
            options = options.with_include_exts(extensions);
        }
        if let Some(exclude) = self.exclude {
            options = options.with_exclude_dirs(Regex::new(&exclude)?);
        }
        if let Some(skip) = self.skip_lines {
            let skip = Regex::new(&skip)?;
            options = options.with_replacement_filter(move |_path, line| !skip.is_match(line));
        }

        Ok(options)
    }
}

/// A utility for locating and loading run configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file by searching in a prioritized list of locations.
    ///
    /// The search order is:
    /// 1. The path as given (absolute, or relative to the current directory).
    /// 2. A path relative to `working_dir`.
    /// 3. Inside the user's `reword` configuration directory.
    pub fn find_config(config_path: &Path, working_dir: &Path) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let mut tried_locations = vec![config_path.display().to_string()];

        if config_path.is_relative() {
            let in_working_dir = working_dir.join(config_path);
            if in_working_dir.exists() {
                return Ok(in_working_dir);
            }
            tried_locations.push(in_working_dir.display().to_string());

            if let Some(config_dir) = dirs::config_dir() {
                let user_config = config_dir.join("reword").join(config_path);
                if user_config.exists() {
                    return Ok(user_config);
                }
                tried_locations.push(user_config.display().to_string());
            }
        }

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads a `FileConfig`, choosing JSON for `.json` files and YAML otherwise.
    pub fn load(path: &Path) -> Result<FileConfig> {
        let file = File::open(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Ok(serde_json::from_reader(file)?)
        } else {
            Ok(serde_yaml::from_reader(file)?)
        }
    }
}

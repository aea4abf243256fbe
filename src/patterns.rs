use crate::errors::Result;
use regex::{NoExpand, Regex};
use std::path::Path;

/// Default exclusion when the start directory itself begins with a dot.
///
/// Leaving out the `^\.` alternative keeps a start dir such as `./src` or
/// `../app` from pruning every one of its own subdirectories.
const DOT_START_EXCLUDE: &str = r"(?i)/\.|node_modules";

/// Default exclusion for every other start directory: hidden directories
/// and dependency caches.
const DEFAULT_EXCLUDE: &str = r"(?i)^\.|/\.|node_modules";

/// The text searched for within each line.
///
/// The variant is fixed when the target is built; matching and replacing
/// never have to guess which kind of target they are looking at.
#[derive(Debug, Clone)]
pub enum Target {
    /// Plain substring containment.
    Literal(String),
    /// A compiled regular expression, matched anywhere in the line.
    Pattern(Regex),
}

impl Default for Target {
    fn default() -> Self {
        Target::Literal(String::new())
    }
}

impl Target {
    /// Creates a literal target.
    pub fn literal(text: impl Into<String>) -> Self {
        Target::Literal(text.into())
    }

    /// Compiles a pattern target, failing on malformed regex syntax.
    pub fn pattern(pattern: &str) -> Result<Self> {
        Ok(Target::Pattern(Regex::new(pattern)?))
    }

    /// Returns `true` if the line contains the target.
    pub fn is_match(&self, line: &str) -> bool {
        match self {
            Target::Literal(text) => line.contains(text.as_str()),
            Target::Pattern(regex) => regex.is_match(line),
        }
    }

    /// Replaces every occurrence of the target in `line`.
    ///
    /// The replacement is inserted verbatim for both variants; `$1` style
    /// capture references are not expanded.
    pub fn replace_all(&self, line: &str, replacement: &str) -> String {
        match self {
            Target::Literal(text) => line.replace(text.as_str(), replacement),
            Target::Pattern(regex) => regex.replace_all(line, NoExpand(replacement)).into_owned(),
        }
    }
}

/// Builds the default directory exclusion for a run rooted at `start_dir`.
pub fn default_exclude_dirs(start_dir: &Path) -> Result<Regex> {
    let pattern = if path_text(start_dir).starts_with('.') {
        DOT_START_EXCLUDE
    } else {
        DEFAULT_EXCLUDE
    };
    Ok(Regex::new(pattern)?)
}

/// Renders a path as text with `/` separators on every platform, so one
/// exclusion pattern behaves the same everywhere.
pub fn path_text(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}

/// The set of file extensions eligible for processing.
///
/// Extensions may be given as `.scss` or `scss`. Comparison is exact and
/// case-sensitive against the final extension of the file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<String>,
}

impl Default for ExtensionSet {
    fn default() -> Self {
        Self::new([".js"])
    }
}

impl ExtensionSet {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            let ext = ext.strip_prefix('.').unwrap_or(ext).to_string();
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        Self {
            extensions: normalized,
        }
    }

    /// Returns `true` if the file's extension is a member of the set.
    pub fn contains(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|os| os.to_str())
            .map(|ext| self.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_and_pattern_agree() {
        let literal = Target::literal("2021");
        let pattern = Target::pattern("2021").unwrap();
        let line = "/* (c) 2021, 2021 */";

        assert!(literal.is_match(line));
        assert!(pattern.is_match(line));
        assert_eq!(literal.replace_all(line, "2022"), "/* (c) 2022, 2022 */");
        assert_eq!(
            literal.replace_all(line, "2022"),
            pattern.replace_all(line, "2022")
        );
    }

    #[test]
    fn test_pattern_replacement_is_literal() {
        let target = Target::pattern(r"(\d+)px").unwrap();
        assert_eq!(target.replace_all("width: 10px;", "$1em"), "width: $1em;");
    }

    #[test]
    fn test_literal_is_not_a_regex() {
        let target = Target::literal("a.b");
        assert!(target.is_match("x a.b y"));
        assert!(!target.is_match("x acb y"));
    }

    #[test]
    fn test_malformed_pattern_is_rejected() {
        assert!(Target::pattern("(unclosed").is_err());
    }

    #[test]
    fn test_default_exclusion_depends_on_start_dir() {
        let plain = default_exclude_dirs(Path::new("project")).unwrap();
        assert!(plain.is_match(".git"));
        assert!(plain.is_match("project/.cache"));
        assert!(plain.is_match("project/Node_Modules"));
        assert!(!plain.is_match("project/src"));

        let dotted = default_exclude_dirs(Path::new("./project")).unwrap();
        assert!(!dotted.is_match("./project/src"));
        assert!(!dotted.is_match("../project/src"));
        assert!(dotted.is_match("./project/.git"));
        assert!(dotted.is_match("./project/node_modules"));
    }

    #[test]
    fn test_extension_set_accepts_both_spellings() {
        let exts = ExtensionSet::new([".scss", "jsx"]);
        assert!(exts.contains(Path::new("styles/_app.scss")));
        assert!(exts.contains(Path::new("ui/Button.jsx")));
        assert!(!exts.contains(Path::new("ui/Button.js")));
        assert!(!exts.contains(Path::new("ui/Button.JSX")));
        assert!(!exts.contains(Path::new("Makefile")));
        assert!(!exts.contains(Path::new(".scss")));
    }

    #[test]
    fn test_default_extension_set_is_js() {
        let exts = ExtensionSet::default();
        assert!(exts.contains(Path::new("index.js")));
        assert!(!exts.contains(Path::new("index.ts")));
    }
}

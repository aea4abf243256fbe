use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all operations in `reword`.
///
/// Every variant is fatal to a run: the walker stops at the first error and
/// hands it back to the caller without touching the remaining files.
#[derive(Error, Debug)]
pub enum Error {
    /// An error related to file system I/O.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A file could not be read (missing, unreadable, or not valid UTF-8).
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A file could not be rewritten.
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An error that occurred during regex compilation.
    #[error("Pattern compilation failed: {0}")]
    Regex(#[from] regex::Error),

    /// An error that occurred while parsing a YAML configuration file.
    #[error("Config parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// An error that occurred while parsing a JSON configuration file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A general configuration-related error.
    #[error("Config error: {0}")]
    Config(String),

    /// A directory could not be listed or an entry could not be stat'ed.
    #[error("Walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    /// The rewritten temporary file could not be moved over the original.
    #[error("Tempfile error: {0}")]
    TempFile(#[from] tempfile::PersistError),
}

/// A convenient type alias for `Result<T, reword::errors::Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Config(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Config(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_error_names_the_path() {
        let err = Error::Read {
            path: PathBuf::from("src/app.js"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        let message = err.to_string();
        assert!(message.contains("src/app.js"));
        assert!(message.contains("gone"));
    }

    #[test]
    fn test_str_converts_to_config_error() {
        let err: Error = "bad option".into();
        assert!(matches!(err, Error::Config(ref m) if m == "bad option"));
    }
}

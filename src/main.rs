//! The main entry point for the `reword` command-line application.
//!
//! This file parses command-line arguments, merges them over an optional run
//! file and hands the result to the `reword` library.

use anyhow::{Context, Result};
use reword::cli::{self, Args};
use reword::config::{ConfigLoader, FileConfig};
use std::env;

fn main() -> Result<()> {
    let args = cli::parse_args();
    init_logging(args.verbose);

    let dir = args.dir.clone();
    let config = resolve_config(args)?;
    let options = config
        .into_options()
        .context("Invalid target, exclude or skip-line pattern")?;

    reword::process_all_files(&dir, options)
        .with_context(|| format!("Failed while processing {}", dir.display()))?;
    Ok(())
}

/// Sets up `env_logger` on stderr. `RUST_LOG` takes precedence over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Loads the run file, if any, and lays the command-line flags over it.
fn resolve_config(args: Args) -> Result<FileConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let working_dir = env::current_dir().context("Cannot determine current directory")?;
            let resolved = ConfigLoader::find_config(path, &working_dir)?;
            log::info!("using run file {}", resolved.display());
            ConfigLoader::load(&resolved)
                .with_context(|| format!("Cannot load run file {}", resolved.display()))?
        }
        None => FileConfig::default(),
    };

    if args.target.is_some() {
        config.target = args.target;
    }
    if args.regex {
        config.regex = true;
    }
    if args.replacement.is_some() {
        config.replacement = args.replacement;
    }
    if args.action.is_some() {
        config.action = args.action;
    }
    if !args.extensions.is_empty() {
        config.extensions = Some(args.extensions);
    }
    if args.exclude.is_some() {
        config.exclude = args.exclude;
    }
    if args.skip_line.is_some() {
        config.skip_lines = args.skip_line;
    }

    Ok(config)
}

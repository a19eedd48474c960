//! # Logging
//!
//! Installs the tracing subscriber. The terminal belongs to the UI, so log
//! records go to a file instead of stderr.

use crate::config::LOG_LEVEL_ENV_VAR;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

/// Dependencies whose debug output drowns ours
const QUIET_TARGETS: &[&str] = &[
    "reqwest", "hyper", "hyper_util", "h2", "rustls", "tokio", "mio", "tower",
];

/// Filter from `PANTRY_LOG_LEVEL`, falling back to info (debug when verbose)
pub fn build_filter(verbose: bool) -> Result<EnvFilter> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let mut filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .with_env_var(LOG_LEVEL_ENV_VAR)
        .from_env_lossy();
    for target in QUIET_TARGETS {
        filter = filter.add_directive(format!("{target}=warn").parse()?);
    }
    Ok(filter)
}

/// Append log records to `path`
pub fn init_file_logging(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {e}"))?;

    tracing::info!("{} {} started", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_filter_should_succeed_for_both_levels() {
        assert!(build_filter(false).is_ok());
        assert!(build_filter(true).is_ok());
    }

    #[test]
    fn init_file_logging_should_create_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("pantry.log");

        // Another test may already own the global subscriber; the file must exist either way
        let _ = init_file_logging(&path, false);

        assert!(path.exists());
    }
}

//! Logging setup: human-readable stderr output plus an optional JSONL file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

const LOG_PATH_ENV: &str = "STRCALC_LOG_PATH";
const LOG_DIR_ENV: &str = "STRCALC_LOG_DIR";
const LOG_FILE_NAME: &str = "strcalc.jsonl";

/// Where structured logs go, beyond stderr.
#[derive(Debug, Clone, Default)]
pub struct ObservabilityConfig {
    /// JSONL log file; `None` disables file logging.
    pub log_path: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from `STRCALC_LOG_PATH`, then `STRCALC_LOG_DIR`,
    /// then the configured `log_dir`.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self {
            log_path: resolve_log_path(
                std::env::var_os(LOG_PATH_ENV),
                std::env::var_os(LOG_DIR_ENV),
                config_log_dir,
            ),
        }
    }
}

/// File path wins over directory; empty variables count as unset.
fn resolve_log_path(
    path_var: Option<OsString>,
    dir_var: Option<OsString>,
    config_log_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(path) = path_var.filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dir_var
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or(config_log_dir)
        .map(|dir| dir.join(LOG_FILE_NAME))
}

/// Build the level filter. `RUST_LOG` wins over flags and config.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => default_level,
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    EnvFilter::new(level)
}

/// Install the global subscriber.
///
/// Hold the returned guard until exit so buffered file logs are flushed.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match config.log_path {
        Some(ref path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().json().with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("log path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

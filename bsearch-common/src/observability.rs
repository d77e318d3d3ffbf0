//! Logging initialisation for the `b` binary and its tests.
//!
//! The CLI keeps stdout for its output contract and stderr for diagnostics,
//! so the default filter is `off`: nothing is logged unless `RUST_LOG` asks
//! for it. When a log directory is configured, events are additionally
//! written to a daily rolling file. Call [`init_logging`] once near process
//! start; later calls are no-ops that hand back the first result.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Output encoding for structured logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration passed to [`init_logging`].
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Logical name of the component (used for the log file name).
    pub app_name: &'static str,
    /// Directory for the rolling file sink. `None` disables the file sink.
    pub log_dir: Option<PathBuf>,
    /// Whether to emit events to `stderr`.
    pub emit_stderr: bool,
    /// Preferred log encoding.
    pub format: LogFormat,
    /// Default filter applied when `RUST_LOG` is unset.
    pub default_filter: &'static str,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            app_name: "b",
            log_dir: None,
            emit_stderr: true,
            format: LogFormat::Text,
            default_filter: "off",
        }
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Returns the log file path for the current day when a file sink is
/// configured.
pub fn init_logging(config: LogConfig) -> anyhow::Result<Option<PathBuf>> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let mut full_path = None;
    let file_writer = match config.log_dir.as_deref() {
        Some(dir) => {
            let dir = expand_home(dir);
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

            full_path = Some(daily_log_path(&dir, config.app_name));

            let appender = rolling::daily(dir, format!("{}.log", config.app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = LOG_GUARD.set(guard);
            Some(writer)
        }
        None => None,
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.default_filter));

    let registry = tracing_subscriber::registry().with(env_filter);
    let installed = match config.format {
        LogFormat::Text => registry
            .with(file_writer.map(|w| fmt::layer().with_writer(w).with_ansi(false)))
            .with(
                config
                    .emit_stderr
                    .then(|| fmt::layer().with_writer(std::io::stderr)),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(file_writer.map(|w| fmt::layer().json().with_writer(w)))
            .with(
                config
                    .emit_stderr
                    .then(|| fmt::layer().json().with_writer(std::io::stderr)),
            )
            .try_init(),
    };
    installed.map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(full_path.clone());
    Ok(full_path)
}

/// Path `tracing_appender::rolling::daily` writes to today.
fn daily_log_path(dir: &Path, app_name: &str) -> PathBuf {
    let today = Local::now().format("%Y-%m-%d");
    dir.join(format!("{app_name}.log.{today}"))
}

fn expand_home(path: &Path) -> PathBuf {
    if let Some(rest) = path.to_str().and_then(|s| s.strip_prefix("~/")) {
        if let Ok(home) = std::env::var("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    path.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_path_uses_app_name_and_date_suffix() {
        let path = daily_log_path(Path::new("/tmp/logs"), "b");
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("b.log."));
        assert_eq!(name.len(), "b.log.".len() + "YYYY-MM-DD".len());
        assert_eq!(path.parent(), Some(Path::new("/tmp/logs")));
    }

    #[test]
    fn absolute_paths_are_not_expanded() {
        assert_eq!(expand_home(Path::new("/var/log/b")), PathBuf::from("/var/log/b"));
    }

    #[test]
    fn log_format_parses_lowercase_names() {
        let json: LogFormat = serde_json::from_str("\"json\"").unwrap();
        let text: LogFormat = serde_json::from_str("\"text\"").unwrap();
        assert_eq!(json, LogFormat::Json);
        assert_eq!(text, LogFormat::Text);
    }

    #[test]
    fn default_config_is_quiet() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.default_filter, "off");
        assert!(cfg.log_dir.is_none());
    }
}

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

const LOG_FILE_NAME: &str = "seb.log";

/// Installs the global subscriber writing to a daily rolling file.
///
/// The terminal belongs to the UI, so nothing is written to stdout/stderr.
/// Keep the returned guard alive until shutdown to flush buffered lines.
pub fn init_logging(config: &LogConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("seb=info"));

    let Some(dir) = config.dir.clone().or_else(default_log_dir) else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init();
        return None;
    };

    if let Err(err) = std::fs::create_dir_all(&dir) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .try_init();
        tracing::warn!("failed to create log directory {}: {err}", dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init();

    tracing::info!("logging initialized to {}", log_file_hint(&dir).display());
    Some(guard)
}

pub fn default_log_dir() -> Option<PathBuf> {
    if let Some(state) = std::env::var_os("XDG_STATE_HOME")
        && !state.is_empty()
    {
        return Some(PathBuf::from(state).join("seb"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("seb"),
        );
    }
    if let Some(appdata) = std::env::var_os("LOCALAPPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("seb").join("logs"));
    }
    None
}

fn log_file_hint(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

//! Subscriber setup: stderr plus a per-session log file.
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_FILE: &str = "server.log";

/// Installs the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive for the
/// whole process.
pub fn setup_logging(session_id: &Option<String>, log_root: Option<&Path>) -> Result<WorkerGuard> {
    let session_id = session_id.clone().unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        format!("session_{timestamp}")
    });

    let session_log_dir = log_root
        .map(Path::to_path_buf)
        .unwrap_or_else(default_log_directory)
        .join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("failed to create {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}/{}", session_log_dir.display(), LOG_FILE);

    Ok(guard)
}

/// Platform cache directory, or `./logs` when the platform has none.
fn default_log_directory() -> PathBuf {
    ProjectDirs::from("dev", "holdable", "holdable")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

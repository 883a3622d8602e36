use std::path::Path;

use anyhow::{Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "catalog-portal.log";

fn env_filter(default: &str) -> EnvFilter {
    // arboard logs through `log` on every clipboard open
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("{},arboard=off", default)))
}

/// Log to stderr; used by the one-shot subcommands. `RUST_LOG` overrides the default `warn`.
pub fn init_stderr() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}

/// Log to a daily rolling file under `dir` so output never lands on the alternate screen.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for the whole run.
pub fn init_file(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir).map_err(|e| anyhow!("Failed to create log directory {}: {}", dir.display(), e))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter("info"))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(guard)
}

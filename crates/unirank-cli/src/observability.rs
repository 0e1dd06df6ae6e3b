//! `tracing` setup for the binary.
//!
//! Scrapes log to a daily rolling file under the configured log directory
//! (INFO and above, no ANSI) and to stderr. The stderr filter comes from
//! `RUST_LOG` and defaults to `warn`. Other commands only log to stderr.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "unirank.log";
const FILE_FILTER: &str = "warn,unirank=info,unirank_core=info";
const DEFAULT_CONSOLE_FILTER: &str = "warn";

fn console_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_FILTER))
}

/// Log to stderr only.
pub fn init_console() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(console_filter()))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))
}

/// Log to stderr and to a daily file in `log_dir`.
///
/// Keep the returned guard alive until the process exits; dropping it
/// flushes and stops the file writer.
pub fn init_file_logging(log_dir: &Path) -> anyhow::Result<(WorkerGuard, PathBuf)> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory: {}", log_dir.display()))?;

    let appender = rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(FILE_FILTER)),
        )
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(console_filter()))
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    Ok((guard, log_dir.join(LOG_FILE_NAME)))
}

//! Session logging.
//!
//! While the wizard owns the terminal, events go to
//! `<logs dir>/funrun-<UTC timestamp>.log`. Subcommands log to stderr.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use funrun::config::Config;

/// Keeps the file writer alive; buffered lines are flushed when it drops
pub struct LoggingHandle {
    pub _guard: Option<WorkerGuard>,
    /// Set only when logging to a file
    pub log_file_path: Option<PathBuf>,
}

fn log_filename(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("funrun-{}.log", now.format("%Y%m%dT%H%M%SZ"))
}

/// `RUST_LOG` wins, then `--debug`, then `logging.level`
fn filter_directive(config: &Config, debug_override: bool, rust_log: Option<String>) -> String {
    rust_log.unwrap_or_else(|| {
        if debug_override {
            "debug".to_string()
        } else {
            config.logging.level.clone()
        }
    })
}

fn logs_to_file(config: &Config, is_tui_mode: bool) -> bool {
    is_tui_mode && config.logging.to_file
}

pub fn init_logging(
    config: &Config,
    is_tui_mode: bool,
    debug_override: bool,
) -> Result<LoggingHandle> {
    let directive = filter_directive(config, debug_override, std::env::var("RUST_LOG").ok());
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("Invalid log filter '{directive}'"))?;

    let (writer, guard, log_file_path) = if logs_to_file(config, is_tui_mode) {
        let logs_dir = config.logs_path();
        std::fs::create_dir_all(&logs_dir)
            .with_context(|| format!("Failed to create logs directory {}", logs_dir.display()))?;

        let file_name = log_filename(chrono::Utc::now());
        let path = logs_dir.join(&file_name);
        let (non_blocking, guard) =
            tracing_appender::non_blocking(tracing_appender::rolling::never(&logs_dir, &file_name));
        (BoxMakeWriter::new(non_blocking), Some(guard), Some(path))
    } else {
        (BoxMakeWriter::new(std::io::stderr), None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(log_file_path.is_none())
                .with_writer(writer),
        )
        .try_init()
        .context("Failed to install log subscriber")?;

    Ok(LoggingHandle {
        _guard: guard,
        log_file_path,
    })
}

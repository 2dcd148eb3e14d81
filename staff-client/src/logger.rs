//! Logging Infrastructure
//!
//! Console logging with an optional daily rotating file:
//! - pretty output for development, JSON for production
//! - `RUST_LOG` overrides the configured level for every layer
//! - rotated files older than [`LOG_RETENTION_DAYS`] are removed at startup

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, prelude::*};

pub const LOG_FILE_PREFIX: &str = "staffctl";
pub const LOG_FILE_SUFFIX: &str = "log";
pub const LOG_RETENTION_DAYS: i64 = 14;

/// Remove rotated log files (`staffctl.YYYY-MM-DD.log`) older than `keep_days`.
///
/// Returns the number of files deleted.
pub fn cleanup_old_logs(log_dir: &Path, keep_days: i64) -> anyhow::Result<usize> {
    let cutoff = chrono::Local::now().date_naive() - chrono::Duration::days(keep_days);
    let mut removed = 0;

    if !log_dir.exists() {
        return Ok(0);
    }

    for entry in fs::read_dir(log_dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(date_part) = name
            .strip_prefix(LOG_FILE_PREFIX)
            .and_then(|d| d.strip_prefix('.'))
            .and_then(|d| d.strip_suffix(LOG_FILE_SUFFIX))
            .and_then(|d| d.strip_suffix('.'))
            && let Ok(date) = chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            && date < cutoff
        {
            fs::remove_file(&path)?;
            tracing::info!(file = %name, "Deleted old log file");
            removed += 1;
        }
    }

    Ok(removed)
}

/// `RUST_LOG` directives when set and valid, otherwise `level`
fn build_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - Whether to use JSON format (true for production, false for development)
/// * `log_dir` - Optional directory for file logging (e.g., Some("./logs"))
pub fn init_logger(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = tracing_subscriber::registry().with(build_filter(rust_log.as_deref(), level));

    let file_appender = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix(LOG_FILE_PREFIX)
                .filename_suffix(LOG_FILE_SUFFIX)
                .build(dir)?;
            Some((dir, appender))
        }
        None => None,
    };

    if json_format {
        let console_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        match file_appender {
            Some((dir, appender)) => {
                let file_layer = fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_writer(std::sync::Mutex::new(appender));
                subscriber.with(console_layer).with(file_layer).try_init()?;
                cleanup_old_logs(dir, LOG_RETENTION_DAYS)?;
            }
            None => subscriber.with(console_layer).try_init()?,
        }
    } else {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr);

        match file_appender {
            Some((dir, appender)) => {
                let file_layer = fmt::layer()
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .with_writer(std::sync::Mutex::new(appender));
                subscriber.with(console_layer).with(file_layer).try_init()?;
                cleanup_old_logs(dir, LOG_RETENTION_DAYS)?;
            }
            None => subscriber.with(console_layer).try_init()?,
        }
    }

    Ok(())
}

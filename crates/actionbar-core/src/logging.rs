//! File logging for the headless host
//!
//! stdout carries the NDJSON event stream, so tracing output goes to a daily
//! rolling file under `<data_local_dir>/alarm-actionbar/logs/`. The filter is
//! read from `ACTIONBAR_LOG` (e.g. `ACTIONBAR_LOG=actionbar_app=trace`).

use std::path::PathBuf;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Result, ResultExt};

/// Environment variable controlling the log filter
pub const LOG_ENV: &str = "ACTIONBAR_LOG";

const LOG_FILENAME: &str = "actionbar.log";
const DEFAULT_FILTER: &str = "alarm_actionbar=info,actionbar_app=info,warn";

/// Install the global subscriber. Call once, before the host starts.
pub fn init() -> Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(RollingFileAppender::new(
                    Rotation::DAILY,
                    &log_dir,
                    LOG_FILENAME,
                ))
                .with_ansi(false)
                .with_thread_ids(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::debug!("Logging to {}", log_dir.display());
    Ok(())
}

fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("alarm-actionbar")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directory_is_app_scoped() {
        assert!(log_directory().ends_with("alarm-actionbar/logs"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}

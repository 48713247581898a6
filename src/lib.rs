//! Alarm action bar
//!
//! Hosts the reactive menu controller in a headless session driven from
//! stdin, reporting every menu change as JSON on stdout.

pub mod headless;

use std::path::Path;

use actionbar_core::prelude::*;

use headless::{EventOutput, HeadlessEvent};

/// Application entry point for a headless session rooted at `config_dir`
pub async fn run(config_dir: &Path, log_to_file: bool) -> Result<()> {
    // Initialize error handling
    color_eyre::install().map_err(|e| Error::startup(e.to_string()))?;

    // Initialize logging
    if log_to_file {
        actionbar_core::logging::init()?;
    }

    let result = headless::runner::run_headless(config_dir).await;

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
        EventOutput::Stdout.emit(HeadlessEvent::error(e.to_string(), e.is_fatal()));
    }
    result
}

//! Alarm action bar - headless host for the menu controller
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use actionbar_app::config::init_config_dir;
use actionbar_core::prelude::*;
use clap::Parser;

/// Alarm action bar - drive the alarm menu controller from stdin
#[derive(Parser, Debug)]
#[command(name = "actionbar")]
#[command(about = "Headless host for the alarm action bar controller", long_about = None)]
struct Args {
    /// Directory holding `.actionbar/config.toml` (defaults to the current directory)
    #[arg(long, value_name = "PATH")]
    config_dir: Option<PathBuf>,

    /// Write a default `.actionbar/config.toml` and exit
    #[arg(long)]
    init: bool,

    /// Don't write a log file
    #[arg(long)]
    no_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = match args.config_dir {
        Some(dir) if !dir.is_dir() => return Err(Error::ConfigNotFound { path: dir }),
        Some(dir) => dir,
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    if args.init {
        init_config_dir(&config_dir)?;
        eprintln!(
            "Wrote default settings under {}",
            config_dir.join(".actionbar").display()
        );
        return Ok(());
    }

    alarm_actionbar::run(&config_dir, !args.no_log).await
}

//! Configuration file parsing for the alarm action bar
//!
//! Supports:
//! - `.actionbar/config.toml` - Menu and launch settings

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, is_valid_app_id, load_settings, save_settings};
pub use types::*;

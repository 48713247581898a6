//! Configuration types for the alarm action bar
//!
//! Defines:
//! - `Settings` - Global settings
//! - `MenuSettings` - Menu composition and prompt behavior
//! - `LaunchSettings` - External launch parameters

use serde::{Deserialize, Serialize};

/// Application id used when none (or an invalid one) is configured
pub const DEFAULT_APP_ID: &str = "com.better.alarm";

/// Application settings (.actionbar/config.toml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub menu: MenuSettings,

    #[serde(default)]
    pub launch: LaunchSettings,
}

/// Menu settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MenuSettings {
    /// Show the DashClock companion item
    #[serde(default)]
    pub show_dashclock: bool,

    /// Ask before leaving the app for a store page
    #[serde(default)]
    pub confirm_external_launch: bool,
}

/// External launch settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LaunchSettings {
    /// Application id used to build store links
    #[serde(default = "default_app_id")]
    pub app_id: String,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            app_id: default_app_id(),
        }
    }
}

fn default_app_id() -> String {
    DEFAULT_APP_ID.to_string()
}

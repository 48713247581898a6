//! Settings parser for .actionbar/config.toml

use std::path::Path;
use std::sync::OnceLock;

use actionbar_core::prelude::*;
use regex::Regex;

use super::types::{Settings, DEFAULT_APP_ID};

const CONFIG_FILENAME: &str = "config.toml";
const CONFIG_DIR: &str = ".actionbar";

const DEFAULT_CONFIG: &str = r#"# Alarm action bar configuration

[menu]
show_dashclock = false           # Show the DashClock companion item
confirm_external_launch = false  # Ask before opening store pages

[launch]
app_id = "com.better.alarm"      # Used to build store and share links
"#;

fn app_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
            .expect("app id pattern is a valid regex")
    })
}

/// Check an application id has the dotted package form (`com.example.app`)
pub fn is_valid_app_id(app_id: &str) -> bool {
    app_id_pattern().is_match(app_id)
}

/// Load settings from `<dir>/.actionbar/config.toml`
///
/// Returns defaults if the file doesn't exist or can't be parsed.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(CONFIG_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    let mut settings = match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                return Settings::default();
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            return Settings::default();
        }
    };

    if !is_valid_app_id(&settings.launch.app_id) {
        warn!(
            "Invalid launch.app_id {:?}, falling back to {}",
            settings.launch.app_id, DEFAULT_APP_ID
        );
        settings.launch.app_id = DEFAULT_APP_ID.to_string();
    }

    settings
}

/// Write settings to `<dir>/.actionbar/config.toml`
pub fn save_settings(dir: &Path, settings: &Settings) -> Result<()> {
    let config_dir = dir.join(CONFIG_DIR);
    std::fs::create_dir_all(&config_dir)
        .map_err(|e| Error::config(format!("Failed to create {}: {}", CONFIG_DIR, e)))?;

    let content = toml::to_string_pretty(settings)
        .map_err(|e| Error::config(format!("Failed to serialize settings: {}", e)))?;
    std::fs::write(config_dir.join(CONFIG_FILENAME), content)
        .context("writing settings")?;
    Ok(())
}

/// Create a commented default config file if none exists
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let config_dir = dir.join(CONFIG_DIR);

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)
            .map_err(|e| Error::config(format!("Failed to create {} dir: {}", CONFIG_DIR, e)))?;
    }

    let config_path = config_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, DEFAULT_CONFIG).context("writing default config")?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}

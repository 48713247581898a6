//! Headless mode - JSON event output for scripted sessions
//!
//! This module drives the menu controller without any UI toolkit. Every
//! surface mutation, store command, and external launch is written to
//! stdout as structured JSON, so scripts and end-to-end tests can follow the
//! controller without a real menu.
//!
//! # Event Format
//!
//! Events are output as NDJSON (newline-delimited JSON), one event per line.
//! Each event has an "event" field indicating its type, along with event-specific data.
//!
//! # Example Output
//!
//! ```json
//! {"event":"item_visibility","item":"delete_alarm","visible":true,"timestamp":1704700001000}
//! {"event":"prompt_shown","title":"Delete alarm","message":"This alarm will be deleted.","timestamp":1704700002000}
//! {"event":"command","command":{"command":"delete_alarm","id":7},"timestamp":1704700003000}
//! ```

pub mod adapters;
pub mod input;
pub mod runner;

use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use actionbar_core::{ExternalTarget, MenuItem, StoreCommand};
use chrono::Utc;
use serde::Serialize;
use tracing::error;

/// A menu item and whether it is shown
#[derive(Debug, Clone, Serialize)]
pub struct ItemEntry {
    pub item: MenuItem,
    pub visible: bool,
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// Menu items were created
    MenuBuilt {
        items: Vec<ItemEntry>,
        timestamp: i64,
    },

    /// A menu item was shown or hidden
    ItemVisibility {
        item: MenuItem,
        visible: bool,
        timestamp: i64,
    },

    /// The action bar's home/up affordance changed
    BackAffordance { enabled: bool, timestamp: i64 },

    /// A confirmation prompt is waiting for `confirm`/`cancel`/`dismiss`
    PromptShown {
        title: String,
        message: String,
        timestamp: i64,
    },

    /// A command reached the store
    Command {
        command: StoreCommand,
        timestamp: i64,
    },

    /// An external target was opened
    Launch {
        target: ExternalTarget,
        uri: String,
        timestamp: i64,
    },

    /// The controller released its subscription
    Detached { timestamp: i64 },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Write this event as one JSON line
    pub fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        let json = serde_json::to_string(self).map_err(io::Error::other)?;
        writeln!(out, "{}", json)?;
        out.flush()
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    // ─────────────────────────────────────────────────────────
    // Convenience constructors
    // ─────────────────────────────────────────────────────────

    pub fn menu_built(items: &[(MenuItem, bool)]) -> Self {
        Self::MenuBuilt {
            items: items
                .iter()
                .map(|&(item, visible)| ItemEntry { item, visible })
                .collect(),
            timestamp: Self::now(),
        }
    }

    pub fn item_visibility(item: MenuItem, visible: bool) -> Self {
        Self::ItemVisibility {
            item,
            visible,
            timestamp: Self::now(),
        }
    }

    pub fn back_affordance(enabled: bool) -> Self {
        Self::BackAffordance {
            enabled,
            timestamp: Self::now(),
        }
    }

    pub fn prompt_shown(title: &str, message: &str) -> Self {
        Self::PromptShown {
            title: title.to_string(),
            message: message.to_string(),
            timestamp: Self::now(),
        }
    }

    pub fn command(command: StoreCommand) -> Self {
        Self::Command {
            command,
            timestamp: Self::now(),
        }
    }

    pub fn launch(target: ExternalTarget, uri: String) -> Self {
        Self::Launch {
            target,
            uri,
            timestamp: Self::now(),
        }
    }

    pub fn detached() -> Self {
        Self::Detached {
            timestamp: Self::now(),
        }
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}

/// Where headless events go
#[derive(Debug, Clone, Default)]
pub enum EventOutput {
    /// NDJSON on stdout
    #[default]
    Stdout,
    /// Collected in memory
    Buffer(Arc<Mutex<Vec<HeadlessEvent>>>),
}

impl EventOutput {
    pub fn buffer() -> Self {
        Self::Buffer(Arc::new(Mutex::new(Vec::new())))
    }

    /// Events collected so far (always empty for stdout)
    pub fn events(&self) -> Vec<HeadlessEvent> {
        match self {
            EventOutput::Stdout => Vec::new(),
            EventOutput::Buffer(events) => events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone(),
        }
    }

    pub fn emit(&self, event: HeadlessEvent) {
        match self {
            EventOutput::Stdout => {
                let mut stdout = io::stdout().lock();
                if let Err(e) = event.write_to(&mut stdout) {
                    error!("Failed to write headless event to stdout: {}", e);
                }
            }
            EventOutput::Buffer(events) => events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event),
        }
    }
}

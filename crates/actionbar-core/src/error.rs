//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup failed: {message}")]
    Startup { message: String },

    // ─────────────────────────────────────────────────────────────
    // Controller Errors (always absorbed locally)
    // ─────────────────────────────────────────────────────────────
    #[error("Editing state stream has no current value")]
    StreamUnavailable,

    #[error("No menu action mapped to id: {id}")]
    UnmappedAction { id: String },

    #[error("Alarm {id} no longer exists")]
    StaleReference { id: i32 },

    #[error("A confirmation prompt is already pending")]
    DoubleConfirmation,

    #[error("Menu action is not available in the current state: {action}")]
    ActionUnavailable { action: String },

    #[error("Invalid editing state: {message}")]
    InvalidState { message: String },

    // ─────────────────────────────────────────────────────────────
    // Launch Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid launch URI: {0}")]
    InvalidUri(#[from] url::ParseError),

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    // ─────────────────────────────────────────────────────────────
    // Host Loop Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Channel closed unexpectedly")]
    ChannelClosed,
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn startup(message: impl Into<String>) -> Self {
        Self::Startup {
            message: message.into(),
        }
    }

    pub fn unmapped_action(id: impl Into<String>) -> Self {
        Self::UnmappedAction { id: id.into() }
    }

    pub fn stale_reference(id: i32) -> Self {
        Self::StaleReference { id }
    }

    pub fn action_unavailable(action: impl Into<String>) -> Self {
        Self::ActionUnavailable {
            action: action.into(),
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error
    ///
    /// Every error the menu controller can hit is recoverable: it degrades to
    /// a local default instead of surfacing to the UI session.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::StreamUnavailable
                | Error::UnmappedAction { .. }
                | Error::StaleReference { .. }
                | Error::DoubleConfirmation
                | Error::ActionUnavailable { .. }
                | Error::Config { .. }
        )
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Io(_) | Error::Startup { .. } | Error::ConfigNotFound { .. }
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}

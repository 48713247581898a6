//! Collaborator traits consumed by the menu controller
//!
//! The controller never talks to the alarm domain directly. It reads the edit
//! session through a [`StateStream`], sends commands to a [`CommandSink`], and
//! hands external launches to an [`ExternalLauncher`]. Implementations may
//! deliver emissions from any thread.
//!
//! ```text
//!  ┌──────────────┐  subscribe / current_value  ┌────────────────┐
//!  │ StateStream  │ ◄────────────────────────── │                │
//!  └──────────────┘                             │ MenuController │
//!  ┌──────────────┐  send(StoreCommand)         │                │
//!  │ CommandSink  │ ◄────────────────────────── │                │
//!  └──────────────┘                             │                │
//!  ┌──────────────┐  launch(ExternalTarget)     │                │
//!  │ Launcher     │ ◄────────────────────────── │                │
//!  └──────────────┘                             └────────────────┘
//! ```

use actionbar_core::prelude::*;
use actionbar_core::{EditingState, ExternalTarget, StoreCommand};

use crate::subscription::Subscription;

/// Callback invoked for every editing state emission
pub type StateListener = Box<dyn Fn(EditingState) + Send + Sync>;

/// Push-based source of editing state snapshots
pub trait StateStream: Send + Sync {
    /// Register `on_next` for future emissions.
    ///
    /// Implementations may call `on_next` synchronously (including with the
    /// current value during the call) and from any thread.
    fn subscribe(&self, on_next: StateListener) -> Subscription;

    /// Read the latest snapshot without waiting.
    ///
    /// Fails with [`Error::StreamUnavailable`] when no edit session has
    /// ever been published.
    fn current_value(&self) -> Result<EditingState>;
}

/// Fire-and-forget command receiver of the state store
#[cfg_attr(test, mockall::automock)]
pub trait CommandSink: Send + Sync {
    fn send(&self, command: StoreCommand);
}

/// Opens targets outside the application
#[cfg_attr(test, mockall::automock)]
pub trait ExternalLauncher: Send + Sync {
    fn launch(&self, target: ExternalTarget);
}

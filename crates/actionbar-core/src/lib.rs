//! # actionbar-core - Core Domain Types
//!
//! Foundation crate for the alarm action bar controller. Provides the editing
//! state snapshot, the menu projection, the action mapping table, and error
//! handling.
//!
//! This crate has **zero internal dependencies** -- it only depends on external
//! crates (serde, thiserror, tracing, url).
//!
//! ## Public API
//!
//! ### Domain Types (`types`)
//! - [`EditingState`] - Snapshot of the alarm edit session
//! - [`AlarmId`] - Identifier of an alarm
//!
//! ### Menu (`menu`)
//! - [`project()`] - Pure projection from [`EditingState`] to [`MenuDescriptor`]
//! - [`MenuItem`], [`MenuLayout`] - Menu contents and initial visibility
//!
//! ### Actions (`action`)
//! - [`MenuAction`] / [`ACTION_TABLE`] - Host identifier to action mapping
//! - [`StoreCommand`] - Commands sent to the state store
//! - [`ExternalTarget`] - Targets for the external launcher
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with `fatal` vs `recoverable` classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use actionbar_core::prelude::*;
//! ```

pub mod action;
pub mod error;
pub mod logging;
pub mod menu;
pub mod types;

/// Prelude for common imports used throughout the action bar crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use action::{ExternalTarget, MenuAction, StoreCommand, ACTION_TABLE, BACK_SOURCE};
pub use error::{Error, Result, ResultExt};
pub use menu::{project, MenuDescriptor, MenuItem, MenuLayout};
pub use types::{AlarmId, EditingState};

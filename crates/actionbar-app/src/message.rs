//! Message types for the controller inbox (TEA pattern)
//!
//! Everything that reaches the controller from outside the UI context travels
//! as a [`Message`] through its channel, so the surface is only ever touched
//! from the loop that drains it.

use actionbar_core::EditingState;

use crate::confirm::PromptResponse;

/// All messages handled by the menu controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// The store published a new editing state.
    ///
    /// `generation` identifies the subscription that delivered it.
    EditingChanged {
        generation: u64,
        state: EditingState,
    },

    /// The user picked a menu item (host identifier)
    MenuItemSelected(String),

    /// The user answered the live prompt
    PromptResolved(PromptResponse),

    /// The host controller is being destroyed
    Detach,

    /// Stop the host loop
    Quit,
}

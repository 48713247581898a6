//! The host UI's menu and action bar, as seen by the controller

use actionbar_core::{MenuItem, MenuLayout};

use crate::confirm::ConfirmationRequest;

/// Menu and action bar owned by the host UI.
///
/// Only ever called from the UI-owning context.
pub trait MenuSurface {
    /// Create the menu items
    fn build(&mut self, layout: &MenuLayout);

    fn set_item_visible(&mut self, item: MenuItem, visible: bool);

    /// Enable or disable the action bar's home/up affordance
    fn set_back_affordance(&mut self, enabled: bool);

    /// Show a modal prompt; the answer comes back through
    /// [`MenuController::resolve_prompt`](crate::controller::MenuController::resolve_prompt)
    fn show_prompt(&mut self, request: &ConfirmationRequest);
}

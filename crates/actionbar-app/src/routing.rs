//! Action routing
//!
//! Decides what a menu action turns into. Kept separate from the controller so
//! the mapping can be checked without any collaborators.

use actionbar_core::{ExternalTarget, MenuAction, StoreCommand, BACK_SOURCE};

use crate::config::MenuSettings;
use crate::confirm::ConfirmationRequest;

/// What a menu action resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Hand off to the external launcher right away
    Launch(ExternalTarget),
    /// Forward to the state store as-is
    Command(StoreCommand),
    /// Ask first, then run the request's action
    Confirm(ConfirmationRequest),
}

/// Resolve `action` under the given menu settings
pub fn route(action: MenuAction, settings: &MenuSettings) -> Route {
    match action {
        MenuAction::OpenSettings => Route::Command(StoreCommand::OpenSettings),
        MenuAction::NavigateUp => Route::Command(StoreCommand::navigate_back(BACK_SOURCE)),
        MenuAction::Share => Route::Launch(ExternalTarget::Share),
        MenuAction::Review => store_page(ExternalTarget::ReviewListing, settings),
        MenuAction::DashClock => store_page(ExternalTarget::DashClockSearch, settings),
        MenuAction::Mp3Cutter => store_page(ExternalTarget::Mp3CutterSearch, settings),
        MenuAction::DeleteAlarm => Route::Confirm(ConfirmationRequest::delete_alarm()),
        MenuAction::About => Route::Confirm(ConfirmationRequest::about()),
    }
}

fn store_page(target: ExternalTarget, settings: &MenuSettings) -> Route {
    if settings.confirm_external_launch {
        Route::Confirm(ConfirmationRequest::launch(target))
    } else {
        Route::Launch(target)
    }
}

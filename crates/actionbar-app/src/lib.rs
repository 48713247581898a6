//! actionbar-app - Reactive menu controller for the alarm action bar
//!
//! This crate implements the controller that keeps the options menu and the
//! action bar in step with the alarm edit session, routes menu selections,
//! and gates destructive actions behind a confirmation prompt. It also ships
//! an in-memory store implementing the collaborator traits, and settings
//! loading.

pub mod config;
pub mod confirm;
pub mod controller;
pub mod message;
pub mod routing;
pub mod services;
pub mod store;
pub mod subscription;
pub mod surface;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Re-export primary types
pub use config::{load_settings, MenuSettings, Settings};
pub use confirm::{
    ConfirmationRequest, ConfirmationWorkflow, ConfirmedAction, PromptResponse, Resolution,
    WorkflowState,
};
pub use controller::MenuController;
pub use message::Message;
pub use routing::{route, Route};
pub use services::{CommandSink, ExternalLauncher, StateListener, StateStream};
pub use store::{StoreEvent, UiStore};
pub use subscription::Subscription;
pub use surface::MenuSurface;

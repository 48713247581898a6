//! Menu controller
//!
//! Owns the subscription to the editing state stream, projects every
//! emission onto the menu surface, and routes menu selections to the
//! launcher, the command sink, or the confirmation workflow.
//!
//! ## Threading
//!
//! Emissions may arrive on any thread. The subscription callback only posts a
//! [`Message::EditingChanged`] into the controller's inbox; the UI-owning
//! loop drains the inbox (`msg_rx`, or [`MenuController::process_pending`])
//! and is the only place the surface is touched.
//!
//! ## Errors
//!
//! None of the public entry points return errors. Stale state, unmapped
//! actions, and double prompts are logged and absorbed.

use std::sync::Arc;

use tokio::sync::mpsc;

use actionbar_core::prelude::*;
use actionbar_core::{
    project, EditingState, MenuAction, MenuDescriptor, MenuItem, MenuLayout, StoreCommand,
};

use crate::config::MenuSettings;
use crate::confirm::{ConfirmationWorkflow, ConfirmedAction, PromptResponse, Resolution};
use crate::message::Message;
use crate::routing::{route, Route};
use crate::services::{CommandSink, ExternalLauncher, StateStream};
use crate::subscription::Subscription;
use crate::surface::MenuSurface;

/// Reactive controller for the options menu and action bar
pub struct MenuController {
    stream: Arc<dyn StateStream>,
    sink: Arc<dyn CommandSink>,
    launcher: Arc<dyn ExternalLauncher>,
    settings: MenuSettings,

    surface: Option<Box<dyn MenuSurface>>,
    subscription: Subscription,
    /// Bumped on every attach and detach; emissions tagged with an older
    /// value came from a released subscription
    generation: u64,
    workflow: ConfirmationWorkflow,

    /// Last descriptor pushed to the surface
    applied: Option<MenuDescriptor>,
    attached: bool,
    quit_requested: bool,

    msg_tx: mpsc::UnboundedSender<Message>,

    /// Inbox drained by the UI-owning loop
    pub msg_rx: mpsc::UnboundedReceiver<Message>,
}

impl MenuController {
    pub fn new(
        stream: Arc<dyn StateStream>,
        sink: Arc<dyn CommandSink>,
        launcher: Arc<dyn ExternalLauncher>,
        settings: MenuSettings,
    ) -> Self {
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        Self {
            stream,
            sink,
            launcher,
            settings,
            surface: None,
            subscription: Subscription::released(),
            generation: 0,
            workflow: ConfirmationWorkflow::new(),
            applied: None,
            attached: false,
            quit_requested: false,
            msg_tx,
            msg_rx,
        }
    }

    /// Sender for posting messages into the inbox from other contexts
    pub fn msg_sender(&self) -> mpsc::UnboundedSender<Message> {
        self.msg_tx.clone()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn is_subscribed(&self) -> bool {
        !self.subscription.is_released()
    }

    /// Descriptor currently shown on the surface
    pub fn applied_descriptor(&self) -> Option<MenuDescriptor> {
        self.applied
    }

    pub fn workflow(&self) -> &ConfirmationWorkflow {
        &self.workflow
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    // ─────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────

    /// Build the menu on `surface`, show the current state, and subscribe.
    ///
    /// Without a current value the menu starts in the not-editing shape.
    /// Attaching again replaces the previous surface and subscription.
    pub fn attach(&mut self, mut surface: Box<dyn MenuSurface>) {
        if self.attached {
            warn!("Menu attached twice, replacing previous surface");
            self.subscription.release();
        }

        surface.build(&MenuLayout::standard(self.settings.show_dashclock));
        self.surface = Some(surface);
        self.applied = None;

        let initial = match self.stream.current_value() {
            Ok(state) => project(&state),
            Err(e) => {
                debug!("No initial editing state ({}), menu starts idle", e);
                MenuDescriptor::NOT_EDITING
            }
        };
        self.apply(initial);

        self.generation += 1;
        let generation = self.generation;
        let tx = self.msg_tx.clone();
        self.subscription = self.stream.subscribe(Box::new(move |state| {
            // Redeliver onto the UI context; a closed inbox means the
            // controller is gone.
            if tx
                .send(Message::EditingChanged { generation, state })
                .is_err()
            {
                trace!("Editing state dropped, controller inbox closed");
            }
        }));
        debug!("Subscribed to editing state");

        self.attached = true;
        info!("Menu attached: {:?}", initial);
    }

    /// Release the subscription. Safe to call any number of times, and
    /// before `attach`.
    ///
    /// A live prompt is left alone; if it is confirmed later its action is
    /// dropped.
    pub fn detach(&mut self) {
        if self.is_subscribed() {
            debug!("Releasing editing state subscription");
        }
        self.subscription.release();
        self.generation += 1;

        if self.attached {
            info!("Menu detached");
        }
        self.attached = false;
    }

    // ─────────────────────────────────────────────────────────
    // Inbox
    // ─────────────────────────────────────────────────────────

    /// Handle one inbox message on the UI context
    pub fn handle_message(&mut self, msg: Message) {
        match msg {
            Message::EditingChanged { generation, state } => {
                self.on_editing_changed(generation, state)
            }
            Message::MenuItemSelected(id) => self.dispatch(&id),
            Message::PromptResolved(response) => self.resolve_prompt(response),
            Message::Detach => self.detach(),
            Message::Quit => self.quit_requested = true,
        }
    }

    /// Drain the inbox without waiting, in arrival order.
    ///
    /// Returns the number of messages handled.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.handle_message(msg);
            handled += 1;
        }
        handled
    }

    fn on_editing_changed(&mut self, generation: u64, state: EditingState) {
        if !self.attached || generation != self.generation {
            trace!("Editing state from released subscription ignored: {:?}", state);
            return;
        }
        self.apply(project(&state));
    }

    /// Push `descriptor` to the surface. Re-applying the shown descriptor
    /// is a no-op.
    fn apply(&mut self, descriptor: MenuDescriptor) -> bool {
        if self.applied == Some(descriptor) {
            return false;
        }
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };

        surface.set_item_visible(MenuItem::DeleteAlarm, descriptor.show_delete_action);
        surface.set_back_affordance(descriptor.back_affordance_enabled);
        self.applied = Some(descriptor);
        trace!("Applied {:?}", descriptor);
        true
    }

    // ─────────────────────────────────────────────────────────
    // User input
    // ─────────────────────────────────────────────────────────

    /// Act on a menu selection identified by the host's `action_id`
    pub fn dispatch(&mut self, action_id: &str) {
        if let Err(e) = self.try_dispatch(action_id) {
            debug!("Menu action {:?} ignored: {}", action_id, e);
        }
    }

    fn try_dispatch(&mut self, action_id: &str) -> Result<()> {
        if !self.attached {
            return Err(Error::action_unavailable(format!(
                "{} (menu not attached)",
                action_id
            )));
        }

        let action =
            MenuAction::from_id(action_id).ok_or_else(|| Error::unmapped_action(action_id))?;

        match route(action, &self.settings) {
            Route::Launch(target) => {
                debug!("Launching {:?}", target);
                self.launcher.launch(target);
            }
            Route::Command(command) => {
                debug!("Sending {:?}", command);
                self.sink.send(command);
            }
            Route::Confirm(request) => {
                if request.action == ConfirmedAction::DeleteEditedAlarm {
                    self.deletable_state()?;
                }
                self.workflow.request(request)?;
                if let (Some(surface), Some(pending)) =
                    (self.surface.as_mut(), self.workflow.pending())
                {
                    surface.show_prompt(pending);
                }
            }
        }
        Ok(())
    }

    /// Feed the user's answer to the live prompt
    pub fn resolve_prompt(&mut self, response: PromptResponse) {
        let Some(resolution) = self.workflow.resolve(response) else {
            debug!("No prompt pending for {:?}", response);
            return;
        };

        let Resolution::Confirmed(action) = resolution else {
            return;
        };

        if !self.attached {
            debug!("{:?} confirmed after detach, dropped", action);
            return;
        }
        self.run_confirmed(action);
    }

    fn run_confirmed(&mut self, action: ConfirmedAction) {
        match action {
            ConfirmedAction::DeleteEditedAlarm => {
                // Delete before hide; the hide goes out even when there is
                // nothing left to delete.
                match self.deletable_state() {
                    Ok(state) => self.sink.send(StoreCommand::delete_alarm(state.id())),
                    Err(e) => debug!("Skipping delete: {}", e),
                }
                self.sink.send(StoreCommand::HideDetails);
            }
            ConfirmedAction::Launch(target) => self.launcher.launch(target),
            ConfirmedAction::Acknowledge => {}
        }
    }

    /// Fresh read of the stream, `Ok` only if the delete item applies
    fn deletable_state(&self) -> Result<EditingState> {
        let state = self.stream.current_value()?;
        if project(&state).show_delete_action {
            Ok(state)
        } else {
            Err(Error::action_unavailable(MenuAction::DeleteAlarm.id()))
        }
    }
}

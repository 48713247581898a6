//! Headless implementations of the controller's host-side collaborators
//!
//! Each adapter reports what the controller asked of it as a
//! [`HeadlessEvent`] instead of drawing anything.

use actionbar_app::{CommandSink, ConfirmationRequest, ExternalLauncher, MenuSurface, UiStore};
use actionbar_core::prelude::*;
use actionbar_core::{ExternalTarget, MenuItem, MenuLayout, StoreCommand};

use super::{EventOutput, HeadlessEvent};

/// Menu surface that prints every mutation
pub struct HeadlessSurface {
    output: EventOutput,
}

impl HeadlessSurface {
    pub fn new(output: EventOutput) -> Self {
        Self { output }
    }
}

impl MenuSurface for HeadlessSurface {
    fn build(&mut self, layout: &MenuLayout) {
        self.output.emit(HeadlessEvent::menu_built(&layout.items));
    }

    fn set_item_visible(&mut self, item: MenuItem, visible: bool) {
        self.output
            .emit(HeadlessEvent::item_visibility(item, visible));
    }

    fn set_back_affordance(&mut self, enabled: bool) {
        self.output.emit(HeadlessEvent::back_affordance(enabled));
    }

    fn show_prompt(&mut self, request: &ConfirmationRequest) {
        self.output
            .emit(HeadlessEvent::prompt_shown(&request.title, &request.message));
    }
}

/// Launcher that resolves the target's URI and prints it
pub struct HeadlessLauncher {
    app_id: String,
    output: EventOutput,
}

impl HeadlessLauncher {
    pub fn new(app_id: impl Into<String>, output: EventOutput) -> Self {
        Self {
            app_id: app_id.into(),
            output,
        }
    }
}

impl ExternalLauncher for HeadlessLauncher {
    fn launch(&self, target: ExternalTarget) {
        match target.uri(&self.app_id) {
            Ok(uri) => {
                info!("Opening {}", uri);
                self.output
                    .emit(HeadlessEvent::launch(target, uri.to_string()));
            }
            Err(e) => {
                error!("Cannot open {:?}: {}", target, e);
                self.output.emit(HeadlessEvent::error(e.to_string(), false));
            }
        }
    }
}

/// Sink that prints each command before handing it to the store
pub struct ReportingSink {
    store: UiStore,
    output: EventOutput,
}

impl ReportingSink {
    pub fn new(store: UiStore, output: EventOutput) -> Self {
        Self { store, output }
    }
}

impl CommandSink for ReportingSink {
    fn send(&self, command: StoreCommand) {
        self.output.emit(HeadlessEvent::command(command.clone()));
        self.store.send(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actionbar_app::StateStream;
    use actionbar_core::{AlarmId, EditingState};

    #[test]
    fn test_surface_reports_build_and_visibility() {
        let output = EventOutput::buffer();
        let mut surface = HeadlessSurface::new(output.clone());

        surface.build(&MenuLayout::standard(false));
        surface.set_item_visible(MenuItem::DeleteAlarm, true);
        surface.set_back_affordance(true);

        let events = output.events();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], HeadlessEvent::MenuBuilt { .. }));
        assert!(matches!(
            events[1],
            HeadlessEvent::ItemVisibility {
                item: MenuItem::DeleteAlarm,
                visible: true,
                ..
            }
        ));
        assert!(matches!(
            events[2],
            HeadlessEvent::BackAffordance { enabled: true, .. }
        ));
    }

    #[test]
    fn test_launcher_reports_uri() {
        let output = EventOutput::buffer();
        let launcher = HeadlessLauncher::new("com.better.alarm", output.clone());

        launcher.launch(ExternalTarget::ReviewListing);

        match &output.events()[0] {
            HeadlessEvent::Launch { target, uri, .. } => {
                assert_eq!(*target, ExternalTarget::ReviewListing);
                assert_eq!(uri, "market://details?id=com.better.alarm");
            }
            other => panic!("expected launch event, got {:?}", other),
        }
    }

    #[test]
    fn test_sink_reports_then_forwards() {
        let output = EventOutput::buffer();
        let store = UiStore::with_alarms([7]);
        store.edit(7).unwrap();
        let sink = ReportingSink::new(store.clone(), output.clone());

        sink.send(StoreCommand::delete_alarm(7));
        sink.send(StoreCommand::HideDetails);

        assert!(!store.contains(AlarmId(7)));
        assert_eq!(store.current_value().unwrap(), EditingState::not_editing());
        assert_eq!(output.events().len(), 2);
    }
}

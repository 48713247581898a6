//! Controller wired to the in-memory store, end to end

use std::sync::Arc;
use std::thread;

use actionbar_app::test_utils::{RecordingLauncher, RecordingSurface, SurfaceCall};
use actionbar_app::{
    CommandSink, ExternalLauncher, MenuController, MenuSettings, PromptResponse, StateStream,
    StoreEvent, UiStore,
};
use actionbar_core::{AlarmId, EditingState, ExternalTarget, MenuItem, StoreCommand};
use mockall::mock;
use mockall::predicate::eq;

mock! {
    pub Launcher {}

    impl ExternalLauncher for Launcher {
        fn launch(&self, target: ExternalTarget);
    }
}

/// Sink that records each command and then forwards it to the store
struct ForwardingSink {
    store: UiStore,
    sent: std::sync::Mutex<Vec<StoreCommand>>,
}

impl CommandSink for ForwardingSink {
    fn send(&self, command: StoreCommand) {
        self.sent.lock().unwrap().push(command.clone());
        self.store.send(command);
    }
}

struct Fixture {
    store: UiStore,
    sink: Arc<ForwardingSink>,
    surface: RecordingSurface,
    controller: MenuController,
}

fn fixture(alarms: &[i32], launcher: Arc<dyn ExternalLauncher>) -> Fixture {
    let store = UiStore::with_alarms(alarms.iter().copied());
    let sink = Arc::new(ForwardingSink {
        store: store.clone(),
        sent: Default::default(),
    });
    let surface = RecordingSurface::new();
    let mut controller = MenuController::new(
        Arc::new(store.clone()),
        sink.clone(),
        launcher,
        MenuSettings::default(),
    );
    controller.attach(surface.boxed());
    Fixture {
        store,
        sink,
        surface,
        controller,
    }
}

fn delete_visibility(surface: &RecordingSurface) -> Vec<bool> {
    surface
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            SurfaceCall::ItemVisible(MenuItem::DeleteAlarm, visible) => Some(visible),
            _ => None,
        })
        .collect()
}

#[test]
fn test_confirmed_delete_removes_alarm_and_closes_details() {
    let mut f = fixture(&[7], Arc::new(RecordingLauncher::new()));
    let mut events = f.store.events();

    f.store.edit(7).unwrap();
    f.controller.process_pending();
    assert_eq!(delete_visibility(&f.surface), vec![false, true]);

    f.controller.dispatch("set_alarm_menu_delete_alarm");
    assert_eq!(f.surface.prompts(), vec!["Delete alarm".to_string()]);

    f.controller.resolve_prompt(PromptResponse::Confirm);
    f.controller.process_pending();

    assert_eq!(
        *f.sink.sent.lock().unwrap(),
        vec![StoreCommand::delete_alarm(7), StoreCommand::HideDetails]
    );
    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::AlarmDeleted { id: AlarmId(7) }
    );
    assert!(f.store.alarms().is_empty());
    assert_eq!(delete_visibility(&f.surface), vec![false, true, false]);
}

#[test]
fn test_delete_of_already_removed_alarm_still_closes_details() {
    let mut f = fixture(&[7], Arc::new(RecordingLauncher::new()));
    f.store.edit(7).unwrap();
    f.controller.process_pending();

    f.controller.dispatch("set_alarm_menu_delete_alarm");
    // Removed elsewhere while the prompt is up
    f.store.send(StoreCommand::delete_alarm(7));
    f.controller.resolve_prompt(PromptResponse::Confirm);
    f.controller.process_pending();

    assert_eq!(
        *f.sink.sent.lock().unwrap(),
        vec![StoreCommand::delete_alarm(7), StoreCommand::HideDetails]
    );
    assert_eq!(
        f.store.current_value().unwrap(),
        EditingState::not_editing()
    );
}

#[test]
fn test_new_alarm_hides_delete_but_enables_back() {
    let mut f = fixture(&[], Arc::new(RecordingLauncher::new()));

    f.store.create(3);
    f.controller.process_pending();

    let descriptor = f.controller.applied_descriptor().unwrap();
    assert!(!descriptor.show_delete_action);
    assert!(descriptor.back_affordance_enabled);

    f.controller.dispatch("set_alarm_menu_delete_alarm");
    assert!(f.surface.prompts().is_empty());
}

#[test]
fn test_cancel_and_dismiss_send_nothing() {
    let mut f = fixture(&[1], Arc::new(RecordingLauncher::new()));
    f.store.edit(1).unwrap();
    f.controller.process_pending();

    f.controller.dispatch("set_alarm_menu_delete_alarm");
    f.controller.resolve_prompt(PromptResponse::Cancel);
    f.controller.dispatch("set_alarm_menu_delete_alarm");
    f.controller.resolve_prompt(PromptResponse::Dismiss);

    assert!(f.sink.sent.lock().unwrap().is_empty());
    assert!(f.store.contains(1));
}

#[test]
fn test_back_from_action_bar_reaches_store() {
    let mut f = fixture(&[1], Arc::new(RecordingLauncher::new()));
    let mut events = f.store.events();

    f.controller.dispatch("home");

    assert_eq!(
        events.try_recv().unwrap(),
        StoreEvent::BackPressed {
            source: "ActionBar".to_string()
        }
    );
}

#[test]
fn test_external_items_launch_without_prompt() {
    let mut launcher = MockLauncher::new();
    launcher
        .expect_launch()
        .with(eq(ExternalTarget::ReviewListing))
        .times(1)
        .return_const(());
    launcher
        .expect_launch()
        .with(eq(ExternalTarget::Share))
        .times(1)
        .return_const(());

    let mut f = fixture(&[], Arc::new(launcher));
    f.controller.dispatch("menu_review");
    f.controller.dispatch("menu_share");
    f.controller.dispatch("menu_bugreport");

    assert!(f.surface.prompts().is_empty());
    assert!(f.sink.sent.lock().unwrap().is_empty());
}

#[test]
fn test_detach_twice_then_emissions_are_ignored() {
    let mut f = fixture(&[2], Arc::new(RecordingLauncher::new()));
    assert_eq!(f.store.listener_count(), 1);

    f.controller.detach();
    f.controller.detach();
    assert_eq!(f.store.listener_count(), 0);

    f.store.edit(2).unwrap();
    f.controller.process_pending();
    assert_eq!(delete_visibility(&f.surface), vec![false]);
}

#[test]
fn test_emissions_from_other_threads_apply_in_order() {
    let mut f = fixture(&[1, 2, 3], Arc::new(RecordingLauncher::new()));

    let store = f.store.clone();
    thread::spawn(move || {
        store.edit(1).unwrap();
        store.create(4);
        store.edit(2).unwrap();
    })
    .join()
    .unwrap();

    f.controller.process_pending();
    assert_eq!(delete_visibility(&f.surface), vec![false, true, false, true]);
}

#[test]
fn test_reattach_keeps_single_subscription() {
    let mut f = fixture(&[5], Arc::new(RecordingLauncher::new()));
    f.store.edit(5).unwrap();
    f.controller.process_pending();

    let second = RecordingSurface::new();
    f.controller.attach(second.boxed());

    assert_eq!(f.store.listener_count(), 1);
    assert_eq!(
        second.calls()[1..],
        [
            SurfaceCall::ItemVisible(MenuItem::DeleteAlarm, true),
            SurfaceCall::BackAffordance(true),
        ]
    );
}

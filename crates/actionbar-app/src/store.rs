//! In-memory UI store
//!
//! Reference implementation of the [`StateStream`] and [`CommandSink`]
//! collaborators. It keeps the current edit session in a `watch` channel,
//! pushes every change synchronously to registered listeners, tracks which
//! alarms exist, and publishes navigation requests as [`StoreEvent`]s.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{broadcast, watch};

use actionbar_core::prelude::*;
use actionbar_core::{AlarmId, EditingState, StoreCommand};

use crate::services::{CommandSink, StateListener, StateStream};
use crate::subscription::Subscription;

type Listener = Arc<dyn Fn(EditingState) + Send + Sync>;

const EVENT_CAPACITY: usize = 64;

/// Navigation and domain events published by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    BackPressed { source: String },
    SettingsRequested,
    AlarmDeleted { id: AlarmId },
}

struct StoreInner {
    editing: watch::Sender<Option<EditingState>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener: AtomicU64,
    /// Serializes publication so listeners see values in publish order
    publish: Mutex<()>,
    alarms: Mutex<BTreeSet<AlarmId>>,
    events: broadcast::Sender<StoreEvent>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Shared handle to the store. Clones refer to the same store.
///
/// Listeners are called on the publishing thread and must not publish back
/// into the store.
#[derive(Clone)]
pub struct UiStore {
    inner: Arc<StoreInner>,
}

impl UiStore {
    /// Empty store with no edit session yet
    pub fn new() -> Self {
        let (editing, _) = watch::channel(None);
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                editing,
                listeners: Mutex::new(Vec::new()),
                next_listener: AtomicU64::new(0),
                publish: Mutex::new(()),
                alarms: Mutex::new(BTreeSet::new()),
                events,
            }),
        }
    }

    pub fn with_alarms<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AlarmId>,
    {
        let store = Self::new();
        for id in ids {
            store.add_alarm(id);
        }
        store
    }

    pub fn add_alarm(&self, id: impl Into<AlarmId>) {
        lock(&self.inner.alarms).insert(id.into());
    }

    pub fn contains(&self, id: impl Into<AlarmId>) -> bool {
        lock(&self.inner.alarms).contains(&id.into())
    }

    pub fn alarms(&self) -> Vec<AlarmId> {
        lock(&self.inner.alarms).iter().copied().collect()
    }

    /// Start editing an existing alarm
    pub fn edit(&self, id: impl Into<AlarmId>) -> Result<()> {
        let id = id.into();
        if !self.contains(id) {
            return Err(Error::stale_reference(id.get()));
        }
        self.publish(EditingState::editing(id));
        Ok(())
    }

    /// Create an alarm and start editing it as new
    pub fn create(&self, id: impl Into<AlarmId>) {
        let id = id.into();
        self.add_alarm(id);
        self.publish(EditingState::creating(id));
    }

    /// End the edit session
    pub fn hide_details(&self) {
        self.publish(EditingState::not_editing());
    }

    /// Async view of the current edit session
    pub fn watch(&self) -> watch::Receiver<Option<EditingState>> {
        self.inner.editing.subscribe()
    }

    pub fn events(&self) -> broadcast::Receiver<StoreEvent> {
        self.inner.events.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner.listeners).len()
    }

    fn publish(&self, state: EditingState) {
        let _order = lock(&self.inner.publish);
        self.inner.editing.send_replace(Some(state));

        let listeners: Vec<Listener> = lock(&self.inner.listeners)
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        trace!("Publishing {:?} to {} listener(s)", state, listeners.len());
        for listener in listeners {
            listener(state);
        }
    }

    fn delete(&self, id: AlarmId) {
        let removed = lock(&self.inner.alarms).remove(&id);
        if removed {
            info!("Deleted alarm {}", id);
            self.emit_event(StoreEvent::AlarmDeleted { id });
        } else {
            debug!("Delete ignored: {}", Error::stale_reference(id.get()));
        }
    }

    fn emit_event(&self, event: StoreEvent) {
        // No receivers is fine
        let _ = self.inner.events.send(event);
    }
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStream for UiStore {
    /// Registers `on_next` and replays the current value, if any, before
    /// returning.
    fn subscribe(&self, on_next: StateListener) -> Subscription {
        let listener: Listener = Arc::from(on_next);
        let id = self.inner.next_listener.fetch_add(1, Ordering::Relaxed);

        {
            let _order = lock(&self.inner.publish);
            lock(&self.inner.listeners).push((id, listener.clone()));
            let current = *self.inner.editing.borrow();
            if let Some(state) = current {
                listener(state);
            }
        }
        debug!("Store listener {} subscribed", id);

        let weak = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                lock(&inner.listeners).retain(|(other, _)| *other != id);
                debug!("Store listener {} released", id);
            }
        })
    }

    fn current_value(&self) -> Result<EditingState> {
        let current = *self.inner.editing.borrow();
        current.ok_or(Error::StreamUnavailable)
    }
}

impl CommandSink for UiStore {
    fn send(&self, command: StoreCommand) {
        debug!("Store command: {:?}", command);
        match command {
            StoreCommand::NavigateBack { source } => {
                self.emit_event(StoreEvent::BackPressed { source });
            }
            StoreCommand::HideDetails => self.hide_details(),
            StoreCommand::DeleteAlarm { id } => self.delete(id),
            StoreCommand::OpenSettings => self.emit_event(StoreEvent::SettingsRequested),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn recording_listener() -> (StateListener, Arc<Mutex<Vec<EditingState>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let listener: StateListener = Box::new(move |state| sink.lock().unwrap().push(state));
        (listener, seen)
    }

    #[test]
    fn test_new_store_has_no_current_value() {
        let store = UiStore::new();
        assert!(matches!(
            store.current_value(),
            Err(Error::StreamUnavailable)
        ));
    }

    #[test]
    fn test_edit_publishes_state() {
        let store = UiStore::with_alarms([7]);
        assert_ok!(store.edit(7));
        assert_eq!(store.current_value().unwrap(), EditingState::editing(7));
    }

    #[test]
    fn test_edit_unknown_alarm_fails() {
        let store = UiStore::new();
        assert_err!(store.edit(3));
        assert!(store.current_value().is_err());
    }

    #[test]
    fn test_create_adds_alarm_as_new() {
        let store = UiStore::new();
        store.create(4);
        assert!(store.contains(4));
        assert_eq!(store.current_value().unwrap(), EditingState::creating(4));
    }

    #[test]
    fn test_subscribe_replays_current_value() {
        let store = UiStore::with_alarms([1]);
        store.edit(1).unwrap();

        let (listener, seen) = recording_listener();
        let _sub = store.subscribe(listener);

        assert_eq!(*seen.lock().unwrap(), vec![EditingState::editing(1)]);
    }

    #[test]
    fn test_subscribe_without_session_does_not_replay() {
        let store = UiStore::new();
        let (listener, seen) = recording_listener();
        let _sub = store.subscribe(listener);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listeners_see_changes_in_order() {
        let store = UiStore::with_alarms([1, 2]);
        let (listener, seen) = recording_listener();
        let _sub = store.subscribe(listener);

        store.edit(1).unwrap();
        store.create(5);
        store.hide_details();

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                EditingState::editing(1),
                EditingState::creating(5),
                EditingState::not_editing(),
            ]
        );
    }

    #[test]
    fn test_release_removes_listener() {
        let store = UiStore::with_alarms([1]);
        let (listener, seen) = recording_listener();
        let mut sub = store.subscribe(listener);
        assert_eq!(store.listener_count(), 1);

        sub.release();
        sub.release();
        assert_eq!(store.listener_count(), 0);

        store.edit(1).unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_release_after_store_dropped_is_safe() {
        let store = UiStore::new();
        let (listener, _seen) = recording_listener();
        let mut sub = store.subscribe(listener);
        drop(store);
        sub.release();
        assert!(sub.is_released());
    }

    #[test]
    fn test_delete_removes_alarm() {
        let store = UiStore::with_alarms([7, 8]);
        let mut events = store.events();

        store.send(StoreCommand::delete_alarm(7));

        assert_eq!(store.alarms(), vec![AlarmId(8)]);
        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::AlarmDeleted { id: AlarmId(7) }
        );
    }

    #[test]
    fn test_delete_missing_alarm_is_noop() {
        let store = UiStore::with_alarms([8]);
        let mut events = store.events();

        store.send(StoreCommand::delete_alarm(7));

        assert_eq!(store.alarms(), vec![AlarmId(8)]);
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_hide_details_ends_session() {
        let store = UiStore::with_alarms([7]);
        store.edit(7).unwrap();
        store.send(StoreCommand::HideDetails);
        assert_eq!(store.current_value().unwrap(), EditingState::not_editing());
    }

    #[test]
    fn test_navigation_commands_become_events() {
        let store = UiStore::new();
        let mut events = store.events();

        store.send(StoreCommand::navigate_back("ActionBar"));
        store.send(StoreCommand::OpenSettings);

        assert_eq!(
            events.try_recv().unwrap(),
            StoreEvent::BackPressed {
                source: "ActionBar".to_string()
            }
        );
        assert_eq!(events.try_recv().unwrap(), StoreEvent::SettingsRequested);
    }

    #[tokio::test]
    async fn test_watch_receiver_sees_updates() {
        let store = UiStore::with_alarms([3]);
        let mut rx = store.watch();
        assert!(rx.borrow().is_none());

        store.edit(3).unwrap();
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(EditingState::editing(3)));
    }

    #[tokio::test]
    async fn test_publish_from_other_thread() {
        let store = UiStore::with_alarms([9]);
        let mut rx = store.watch();

        let remote = store.clone();
        tokio::task::spawn_blocking(move || remote.edit(9))
            .await
            .unwrap()
            .unwrap();

        rx.changed().await.unwrap();
        assert_eq!(store.current_value().unwrap(), EditingState::editing(9));
    }
}

//! Test utilities for controller collaborators
//!
//! Recording fakes for the surface, sink, and launcher, plus a
//! [`ManualStream`] whose emissions and subscriptions are under test control.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Weak};

use actionbar_core::prelude::*;
use actionbar_core::{EditingState, ExternalTarget, MenuItem, MenuLayout, StoreCommand};

use crate::confirm::ConfirmationRequest;
use crate::services::{CommandSink, ExternalLauncher, StateListener, StateStream};
use crate::subscription::Subscription;
use crate::surface::MenuSurface;

/// A call observed by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Build(Vec<(MenuItem, bool)>),
    ItemVisible(MenuItem, bool),
    BackAffordance(bool),
    Prompt(String),
}

/// Surface that records every call. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    calls: Arc<Mutex<Vec<SurfaceCall>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A boxed handle sharing this surface's log
    pub fn boxed(&self) -> Box<dyn MenuSurface> {
        Box::new(self.clone())
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Titles of prompts shown so far
    pub fn prompts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Prompt(title) => Some(title),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl MenuSurface for RecordingSurface {
    fn build(&mut self, layout: &MenuLayout) {
        self.record(SurfaceCall::Build(layout.items.clone()));
    }

    fn set_item_visible(&mut self, item: MenuItem, visible: bool) {
        self.record(SurfaceCall::ItemVisible(item, visible));
    }

    fn set_back_affordance(&mut self, enabled: bool) {
        self.record(SurfaceCall::BackAffordance(enabled));
    }

    fn show_prompt(&mut self, request: &ConfirmationRequest) {
        self.record(SurfaceCall::Prompt(request.title.clone()));
    }
}

/// Sink that records commands in order
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    commands: Arc<Mutex<Vec<StoreCommand>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<StoreCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl CommandSink for RecordingSink {
    fn send(&self, command: StoreCommand) {
        self.commands.lock().unwrap().push(command);
    }
}

/// Launcher that records targets in order
#[derive(Debug, Clone, Default)]
pub struct RecordingLauncher {
    targets: Arc<Mutex<Vec<ExternalTarget>>>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn targets(&self) -> Vec<ExternalTarget> {
        self.targets.lock().unwrap().clone()
    }
}

impl ExternalLauncher for RecordingLauncher {
    fn launch(&self, target: ExternalTarget) {
        self.targets.lock().unwrap().push(target);
    }
}

type Listener = Arc<dyn Fn(EditingState) + Send + Sync>;

#[derive(Default)]
struct ManualInner {
    current: Mutex<Option<EditingState>>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
    subscribed: AtomicUsize,
    released: AtomicUsize,
}

/// A push-only stream: subscribing does not replay the current value.
#[derive(Default)]
pub struct ManualStream {
    inner: Arc<ManualInner>,
}

impl ManualStream {
    /// Stream with no current value
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: EditingState) -> Self {
        let stream = Self::new();
        stream.set_current(Some(state));
        stream
    }

    /// Change the current value without notifying listeners
    pub fn set_current(&self, state: Option<EditingState>) {
        *self.inner.current.lock().unwrap() = state;
    }

    /// Set the current value and notify every listener on this thread
    pub fn emit(&self, state: EditingState) {
        self.set_current(Some(state));
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    pub fn live_subscriptions(&self) -> usize {
        self.inner.listeners.lock().unwrap().len()
    }

    pub fn total_subscriptions(&self) -> usize {
        self.inner.subscribed.load(Ordering::SeqCst)
    }

    pub fn total_releases(&self) -> usize {
        self.inner.released.load(Ordering::SeqCst)
    }
}

impl StateStream for ManualStream {
    fn subscribe(&self, on_next: StateListener) -> Subscription {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        self.inner
            .listeners
            .lock()
            .unwrap()
            .push((id, Arc::from(on_next)));
        self.inner.subscribed.fetch_add(1, Ordering::SeqCst);

        let weak: Weak<ManualInner> = Arc::downgrade(&self.inner);
        Subscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.listeners.lock().unwrap().retain(|(other, _)| *other != id);
                inner.released.fetch_add(1, Ordering::SeqCst);
            }
        })
    }

    fn current_value(&self) -> Result<EditingState> {
        let current = *self.inner.current.lock().unwrap();
        current.ok_or(Error::StreamUnavailable)
    }
}

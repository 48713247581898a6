//! Scoped registration with a push-based state stream

use std::fmt;

type Canceller = Box<dyn FnOnce() + Send>;

/// A live registration with a state stream.
///
/// Releasing runs the canceller at most once; afterwards the subscription
/// stays released. Dropping a live subscription releases it.
#[derive(Default)]
pub struct Subscription {
    cancel: Option<Canceller>,
}

impl Subscription {
    /// Create a live subscription that runs `cancel` when released
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A subscription that is already released
    pub fn released() -> Self {
        Self { cancel: None }
    }

    pub fn is_released(&self) -> bool {
        self.cancel.is_none()
    }

    /// Release the registration. No-op if already released.
    pub fn release(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("released", &self.is_released())
            .finish()
    }
}

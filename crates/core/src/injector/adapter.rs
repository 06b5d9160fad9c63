use std::sync::{Condvar, Mutex};

use crate::bootstrap::ResolvedConfiguration;

/// A running application context produced by an injector adapter
pub trait RunningContext {
    /// Block the calling thread until the context terminates
    fn await_termination(&self);

    /// Request a graceful shutdown
    fn shutdown(&self);
}

/// External composition engine consuming a resolved configuration
///
/// The adapter receives the frozen snapshot — layers, stage, profiles,
/// property source and flag resolver — and performs the actual object-graph
/// wiring. Its error type reaches the caller unmodified through
/// [`StartError::Injector`](crate::errors::StartError).
pub trait InjectorAdapter {
    type Context: RunningContext;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Wire and start an application context from the resolved configuration
    fn create(&self, config: &ResolvedConfiguration) -> Result<Self::Context, Self::Error>;
}

/// Blocking shutdown latch for adapter implementations
///
/// A context holds one latch; `await_termination` parks callers until some
/// thread flips it via `shutdown`.
#[derive(Debug, Default)]
pub struct ShutdownLatch {
    done: Mutex<bool>,
    signal: Condvar,
}

impl ShutdownLatch {
    /// Create an open latch
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether shutdown was requested
    pub fn is_shutdown(&self) -> bool {
        *self.lock()
    }

    /// Release every waiter; idempotent
    pub fn shutdown(&self) {
        let mut done = self.lock();
        *done = true;
        self.signal.notify_all();
    }

    /// Block until shutdown is requested
    pub fn await_shutdown(&self) {
        let mut done = self.lock();
        while !*done {
            done = self
                .signal
                .wait(done)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, bool> {
        self.done
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

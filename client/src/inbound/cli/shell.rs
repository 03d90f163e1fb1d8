//! Terminal implementations of the navigation and alert ports.

use std::sync::Mutex;

use crate::domain::Route;
use crate::domain::ports::{Alerter, Navigator};

/// Remembers the most recent navigation request for the router loop.
#[derive(Debug, Default)]
pub struct PendingNavigator {
    pending: Mutex<Option<Route>>,
}

impl PendingNavigator {
    /// Create a navigator with nothing pending.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the pending route, leaving none behind.
    pub fn take(&self) -> Option<Route> {
        match self.pending.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl Navigator for PendingNavigator {
    fn navigate(&self, route: Route) {
        match self.pending.lock() {
            Ok(mut guard) => *guard = Some(route),
            Err(poisoned) => *poisoned.into_inner() = Some(route),
        }
    }
}

/// Queues alert messages until the router prints them.
#[derive(Debug, Default)]
pub struct QueuedAlerter {
    messages: Mutex<Vec<String>>,
}

impl QueuedAlerter {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every queued message, oldest first.
    pub fn drain(&self) -> Vec<String> {
        match self.messages.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Alerter for QueuedAlerter {
    fn alert(&self, message: &str) {
        match self.messages.lock() {
            Ok(mut guard) => guard.push(message.to_owned()),
            Err(poisoned) => poisoned.into_inner().push(message.to_owned()),
        }
    }
}

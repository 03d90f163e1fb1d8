//! Ports to the hosting front end: navigation and blocking alerts.

use crate::domain::Route;

/// Moves the front end to another page.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    /// Navigate to `route`.
    fn navigate(&self, route: Route);
}

/// Shows a blocking, modal-style notice.
#[cfg_attr(test, mockall::automock)]
pub trait Alerter: Send + Sync {
    /// Display `message` and wait for acknowledgement.
    fn alert(&self, message: &str);
}

//! Tagged fetch state shared by the page models, and the unmount guard.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Result of a page's fetch entry point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState<T> {
    /// A fetch is outstanding.
    Loading,
    /// The fetch succeeded.
    Ready(T),
    /// The fetch failed; holds the user-facing message.
    Error(String),
}

impl<T> PageState<T> {
    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Loaded value, if any.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Error(_) => None,
        }
    }

    /// User-facing error message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message.as_str()),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Shared flag recording whether a page is still on screen.
///
/// The router keeps a clone and calls [`MountHandle::unmount`] when it
/// navigates away. Pages check [`MountHandle::is_mounted`] after every await
/// and drop late results instead of writing them into state.
///
/// # Examples
/// ```
/// use complaint_desk::domain::MountHandle;
///
/// let page = MountHandle::new();
/// let router_copy = page.clone();
/// router_copy.unmount();
/// assert!(!page.is_mounted());
/// ```
#[derive(Debug, Clone)]
pub struct MountHandle(Arc<AtomicBool>);

impl MountHandle {
    /// Create a handle in the mounted state.
    pub fn new() -> Self {
        Self(Arc::new(AtomicBool::new(true)))
    }

    /// Whether the owning page is still mounted.
    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Mark the owning page as gone.
    pub fn unmount(&self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for MountHandle {
    fn default() -> Self {
        Self::new()
    }
}

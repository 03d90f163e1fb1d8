//! Dashboard page state: the full complaint list.

use std::sync::Arc;

use tracing::{debug, error};

use super::page_state::{MountHandle, PageState};
use super::ports::{ComplaintApi, Navigator};
use super::route::Route;
use super::view_model::ComplaintRow;
use super::{Complaint, ComplaintId};

/// Shown while the list is loading.
pub const LOADING_COMPLAINTS: &str = "Loading complaints...";
/// Shown when the list could not be fetched.
pub const FETCH_COMPLAINTS_FAILED: &str = "Failed to fetch complaints. Please try again.";
/// Shown instead of an empty table.
pub const NO_COMPLAINTS: &str = "No complaints found. Create your first complaint!";

/// What the dashboard should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    /// Fetch outstanding.
    Loading,
    /// Fetch failed; full-page error with the given message.
    Error(String),
    /// Fetch succeeded with no complaints.
    Empty,
    /// One row per complaint, in backend order.
    Table(Vec<ComplaintRow>),
}

/// Complaint list page.
pub struct DashboardPage<C, N> {
    api: Arc<C>,
    navigator: Arc<N>,
    state: PageState<Vec<Complaint>>,
    mount: MountHandle,
}

impl<C, N> DashboardPage<C, N> {
    /// Create the page in the loading state.
    pub fn new(api: Arc<C>, navigator: Arc<N>) -> Self {
        Self {
            api,
            navigator,
            state: PageState::Loading,
            mount: MountHandle::new(),
        }
    }

    /// Current fetch state.
    pub fn state(&self) -> &PageState<Vec<Complaint>> {
        &self.state
    }

    /// Handle the router uses to unmount this page.
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Project the state for display.
    pub fn view(&self) -> DashboardView {
        match &self.state {
            PageState::Loading => DashboardView::Loading,
            PageState::Error(message) => DashboardView::Error(message.clone()),
            PageState::Ready(complaints) if complaints.is_empty() => DashboardView::Empty,
            PageState::Ready(complaints) => {
                DashboardView::Table(complaints.iter().map(ComplaintRow::from).collect())
            }
        }
    }
}

impl<C, N> DashboardPage<C, N>
where
    C: ComplaintApi,
    N: Navigator,
{
    /// Fetch the complaint list. Called on mount and on manual retry.
    pub async fn fetch(&mut self) -> &PageState<Vec<Complaint>> {
        self.state = PageState::Loading;
        let result = self.api.list_complaints().await;
        if !self.mount.is_mounted() {
            debug!("dashboard unmounted; dropping complaint list response");
            return &self.state;
        }
        self.state = match result {
            Ok(complaints) => {
                debug!(count = complaints.len(), "complaints loaded");
                PageState::Ready(complaints)
            }
            Err(err) => {
                error!(error = %err, "failed to fetch complaints");
                PageState::Error(FETCH_COMPLAINTS_FAILED.to_owned())
            }
        };
        &self.state
    }

    /// Follow a row click to the complaint's detail page.
    pub fn open_complaint(&self, id: ComplaintId) {
        self.navigator.navigate(Route::ComplaintDetail(id));
    }
}

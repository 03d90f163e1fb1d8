//! Complaint detail page state and the status-update flow.
//!
//! A failed update leaves the cached complaint untouched, so the status
//! control keeps showing the last confirmed value. The failure is reported
//! through the blocking [`Alerter`], unlike the inline errors elsewhere.

use std::sync::Arc;

use tracing::{debug, error, info};
use url::Url;

use super::page_state::{MountHandle, PageState};
use super::ports::{Alerter, ComplaintApi, Navigator};
use super::route::Route;
use super::view_model::ComplaintDetailView;
use super::{ApiError, Complaint, ComplaintId, ComplaintStatus};

/// Shown while the complaint is loading.
pub const LOADING_COMPLAINT: &str = "Loading complaint details...";
/// Shown when the complaint could not be fetched.
pub const FETCH_COMPLAINT_FAILED: &str = "Failed to fetch complaint details. Please try again.";
/// Alert raised when a status update fails.
pub const STATUS_UPDATE_FAILED: &str = "Failed to update status. Please try again.";
/// Caption of the control leading back to the dashboard.
pub const BACK_TO_DASHBOARD: &str = "Back to Dashboard";

/// What the detail page should display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    /// Fetch outstanding.
    Loading,
    /// Fetch failed; full-page error offering a way back to the dashboard.
    Error(String),
    /// Complaint loaded.
    Ready(Box<ComplaintDetailView>),
}

/// Outcome of [`ComplaintDetailPage::update_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Requested status equals the cached one; nothing was sent.
    Unchanged,
    /// No complaint is loaded, or an update is already running.
    Unavailable,
    /// The backend accepted the change and the cached copy was replaced.
    Applied,
    /// The backend rejected the change or could not be reached.
    Failed,
    /// The page was unmounted before the response arrived.
    Discarded,
}

/// A status change waiting to be sent.
pub struct PendingStatus<C> {
    api: Arc<C>,
    id: ComplaintId,
    status: ComplaintStatus,
}

impl<C: ComplaintApi> PendingStatus<C> {
    /// Send the change.
    ///
    /// # Errors
    ///
    /// Returns the adapter's [`ApiError`] unchanged.
    pub async fn send(self) -> Result<Complaint, ApiError> {
        self.api.update_status(self.id, self.status).await
    }
}

/// Single complaint page keyed by the route id.
pub struct ComplaintDetailPage<C, N, A> {
    api: Arc<C>,
    navigator: Arc<N>,
    alerter: Arc<A>,
    asset_base: Url,
    id: ComplaintId,
    state: PageState<Complaint>,
    updating: bool,
    mount: MountHandle,
}

impl<C, N, A> ComplaintDetailPage<C, N, A> {
    /// Create the page for `id` in the loading state.
    pub fn new(
        api: Arc<C>,
        navigator: Arc<N>,
        alerter: Arc<A>,
        asset_base: Url,
        id: ComplaintId,
    ) -> Self {
        Self {
            api,
            navigator,
            alerter,
            asset_base,
            id,
            state: PageState::Loading,
            updating: false,
            mount: MountHandle::new(),
        }
    }

    /// Route id the page is keyed by.
    pub fn id(&self) -> ComplaintId {
        self.id
    }

    /// Re-key the page after a route change.
    ///
    /// Returns `true` when the id changed; the page is then back in the
    /// loading state and the caller should [`fetch`](Self::fetch) again.
    pub fn set_id(&mut self, id: ComplaintId) -> bool {
        if id == self.id {
            return false;
        }
        self.id = id;
        self.state = PageState::Loading;
        self.updating = false;
        true
    }

    /// Current fetch state.
    pub fn state(&self) -> &PageState<Complaint> {
        &self.state
    }

    /// Whether a status update is in flight.
    pub fn is_updating(&self) -> bool {
        self.updating
    }

    /// Handle the router uses to unmount this page.
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Project the state for display.
    pub fn view(&self) -> DetailView {
        match &self.state {
            PageState::Loading => DetailView::Loading,
            PageState::Error(message) => DetailView::Error(message.clone()),
            PageState::Ready(complaint) => DetailView::Ready(Box::new(ComplaintDetailView::new(
                complaint,
                &self.asset_base,
                self.updating,
            ))),
        }
    }
}

impl<C, N, A> ComplaintDetailPage<C, N, A>
where
    C: ComplaintApi,
    N: Navigator,
    A: Alerter,
{
    /// Fetch the complaint for the current route id.
    pub async fn fetch(&mut self) -> &PageState<Complaint> {
        self.state = PageState::Loading;
        let id = self.id;
        let result = self.api.get_complaint(id).await;
        if !self.mount.is_mounted() {
            debug!(%id, "detail page unmounted; dropping complaint response");
            return &self.state;
        }
        self.state = match result {
            Ok(complaint) => PageState::Ready(complaint),
            Err(err) => {
                error!(%id, error = %err, "failed to fetch complaint");
                PageState::Error(FETCH_COMPLAINT_FAILED.to_owned())
            }
        };
        &self.state
    }

    /// Ask the backend to move the complaint to `status`.
    ///
    /// Selecting the status already cached sends nothing. On success the
    /// backend's record replaces the cached one wholesale.
    pub async fn update_status(&mut self, status: ComplaintStatus) -> StatusUpdate {
        match self.begin_status_update(status) {
            Ok(pending) => {
                let result = pending.send().await;
                self.finish_status_update(status, result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Enter the updating state for a move to `status`.
    ///
    /// The status control stays disabled until the request's result is
    /// handed to [`finish_status_update`](Self::finish_status_update).
    ///
    /// # Errors
    ///
    /// Returns [`StatusUpdate::Unchanged`] when `status` is already cached and
    /// [`StatusUpdate::Unavailable`] when nothing is loaded or an update is
    /// running.
    pub fn begin_status_update(
        &mut self,
        status: ComplaintStatus,
    ) -> Result<PendingStatus<C>, StatusUpdate> {
        let current = match (&self.state, self.updating) {
            (PageState::Ready(complaint), false) => complaint.status,
            _ => return Err(StatusUpdate::Unavailable),
        };
        if current == status {
            return Err(StatusUpdate::Unchanged);
        }
        self.updating = true;
        Ok(PendingStatus {
            api: Arc::clone(&self.api),
            id: self.id,
            status,
        })
    }

    /// Leave the updating state with the backend's answer.
    pub fn finish_status_update(
        &mut self,
        requested: ComplaintStatus,
        result: Result<Complaint, ApiError>,
    ) -> StatusUpdate {
        self.updating = false;
        let id = self.id;
        if !self.mount.is_mounted() {
            debug!(%id, "detail page unmounted; dropping status update response");
            return StatusUpdate::Discarded;
        }

        match result {
            Ok(updated) => {
                info!(%id, to = %updated.status, "complaint status updated");
                self.state = PageState::Ready(updated);
                StatusUpdate::Applied
            }
            Err(err) => {
                error!(%id, %requested, error = %err, "failed to update complaint status");
                self.alerter.alert(STATUS_UPDATE_FAILED);
                StatusUpdate::Failed
            }
        }
    }

    /// Leave for the dashboard.
    pub fn back_to_dashboard(&self) {
        self.navigator.navigate(Route::Dashboard);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockAlerter, MockComplaintApi, MockNavigator};
    use crate::domain::Category;
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rstest::rstest;

    type Page = ComplaintDetailPage<MockComplaintApi, MockNavigator, MockAlerter>;

    fn complaint(id: i64, status: ComplaintStatus) -> Complaint {
        Complaint {
            id: ComplaintId::new(id),
            title: "Tap leaking".to_owned(),
            description: "Second floor washroom".to_owned(),
            category: Category::Plumbing,
            status,
            assigned_to: Some("Plumber on call".to_owned()),
            raised_by: None,
            attachment_url: None,
            created_at: NaiveDate::from_ymd_opt(2024, 6, 10)
                .and_then(|d| d.and_hms_opt(18, 45, 30))
                .expect("valid timestamp"),
        }
    }

    fn page_with(api: MockComplaintApi, navigator: MockNavigator, alerter: MockAlerter) -> Page {
        ComplaintDetailPage::new(
            Arc::new(api),
            Arc::new(navigator),
            Arc::new(alerter),
            Url::parse("http://localhost:8080").expect("valid url"),
            ComplaintId::new(3),
        )
    }

    fn loaded_api(status: ComplaintStatus) -> MockComplaintApi {
        let mut api = MockComplaintApi::new();
        api.expect_get_complaint()
            .with(eq(ComplaintId::new(3)))
            .times(1)
            .return_once(move |_| Ok(complaint(3, status)));
        api
    }

    #[tokio::test]
    async fn fetch_populates_the_ready_view() {
        let mut page = page_with(
            loaded_api(ComplaintStatus::Open),
            MockNavigator::new(),
            MockAlerter::new(),
        );
        assert_eq!(page.view(), DetailView::Loading);

        page.fetch().await;

        let DetailView::Ready(view) = page.view() else {
            panic!("expected ready view");
        };
        assert_eq!(view.status.label, "OPEN");
        assert_eq!(view.created_at, "6/10/2024, 6:45:30 PM");
    }

    #[tokio::test]
    async fn not_found_renders_error_with_a_way_back() {
        let mut api = MockComplaintApi::new();
        api.expect_get_complaint()
            .times(1)
            .return_once(|_| Err(ApiError::not_found("/complaints/3")));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(Route::Dashboard))
            .times(1)
            .return_const(());
        let mut page = page_with(api, navigator, MockAlerter::new());

        page.fetch().await;

        assert_eq!(page.view(), DetailView::Error(FETCH_COMPLAINT_FAILED.to_owned()));
        page.back_to_dashboard();
    }

    #[rstest]
    #[case(ComplaintStatus::Open)]
    #[case(ComplaintStatus::InProgress)]
    #[case(ComplaintStatus::Resolved)]
    #[tokio::test]
    async fn same_status_skips_the_network(#[case] status: ComplaintStatus) {
        let mut api = loaded_api(status);
        api.expect_update_status().never();
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());
        page.fetch().await;
        let before = page.state().clone();

        let outcome = page.update_status(status).await;

        assert_eq!(outcome, StatusUpdate::Unchanged);
        assert_eq!(page.state(), &before);
    }

    #[tokio::test]
    async fn successful_update_replaces_the_cached_record() {
        let mut api = loaded_api(ComplaintStatus::Open);
        api.expect_update_status()
            .with(eq(ComplaintId::new(3)), eq(ComplaintStatus::Resolved))
            .times(1)
            .return_once(|_, _| {
                let mut updated = complaint(3, ComplaintStatus::Resolved);
                updated.assigned_to = Some("Warden".to_owned());
                Ok(updated)
            });
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());
        page.fetch().await;

        let outcome = page.update_status(ComplaintStatus::Resolved).await;

        assert_eq!(outcome, StatusUpdate::Applied);
        let cached = page.state().ready().expect("ready");
        assert_eq!(cached.status, ComplaintStatus::Resolved);
        assert_eq!(cached.assigned_to.as_deref(), Some("Warden"));
        assert!(!page.is_updating());
    }

    #[tokio::test]
    async fn failed_update_alerts_and_keeps_the_old_status() {
        let mut api = loaded_api(ComplaintStatus::Open);
        api.expect_update_status()
            .times(1)
            .return_once(|_, _| Err(ApiError::http(409_u16, "conflict")));
        let mut alerter = MockAlerter::new();
        alerter
            .expect_alert()
            .withf(|message| message == STATUS_UPDATE_FAILED)
            .times(1)
            .return_const(());
        let mut page = page_with(api, MockNavigator::new(), alerter);
        page.fetch().await;

        let outcome = page.update_status(ComplaintStatus::InProgress).await;

        assert_eq!(outcome, StatusUpdate::Failed);
        assert_eq!(
            page.state().ready().map(|c| c.status),
            Some(ComplaintStatus::Open)
        );
        assert!(!page.is_updating());
    }

    #[tokio::test]
    async fn status_control_is_disabled_while_the_update_is_in_flight() {
        let mut api = loaded_api(ComplaintStatus::Open);
        api.expect_update_status()
            .with(eq(ComplaintId::new(3)), eq(ComplaintStatus::InProgress))
            .times(1)
            .return_once(|_, _| Ok(complaint(3, ComplaintStatus::InProgress)));
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());
        page.fetch().await;

        let pending = page
            .begin_status_update(ComplaintStatus::InProgress)
            .expect("update starts");

        assert!(page.is_updating());
        let DetailView::Ready(view) = page.view() else {
            panic!("expected ready view");
        };
        assert!(view.status_control_disabled);
        assert!(matches!(
            page.begin_status_update(ComplaintStatus::Resolved),
            Err(StatusUpdate::Unavailable)
        ));

        let outcome = page.finish_status_update(ComplaintStatus::InProgress, pending.send().await);

        assert_eq!(outcome, StatusUpdate::Applied);
        let DetailView::Ready(view) = page.view() else {
            panic!("expected ready view");
        };
        assert!(!view.status_control_disabled);
        assert_eq!(view.status.label, "IN PROGRESS");
    }

    #[tokio::test]
    async fn update_before_load_is_unavailable() {
        let mut api = MockComplaintApi::new();
        api.expect_update_status().never();
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());

        let outcome = page.update_status(ComplaintStatus::Resolved).await;

        assert_eq!(outcome, StatusUpdate::Unavailable);
    }

    #[tokio::test]
    async fn changing_the_route_id_returns_to_loading() {
        let mut api = loaded_api(ComplaintStatus::Open);
        api.expect_get_complaint()
            .with(eq(ComplaintId::new(8)))
            .times(1)
            .return_once(|_| Ok(complaint(8, ComplaintStatus::Resolved)));
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());
        page.fetch().await;

        assert!(!page.set_id(ComplaintId::new(3)));
        assert!(page.set_id(ComplaintId::new(8)));
        assert!(page.state().is_loading());

        page.fetch().await;
        assert_eq!(
            page.state().ready().map(|c| c.id),
            Some(ComplaintId::new(8))
        );
    }

    #[tokio::test]
    async fn unmounted_page_discards_status_response() {
        let mut api = loaded_api(ComplaintStatus::Open);
        let handle_slot = Arc::new(std::sync::Mutex::new(None::<MountHandle>));
        let slot = Arc::clone(&handle_slot);
        api.expect_update_status().times(1).return_once(move |_, _| {
            if let Some(handle) = slot.lock().expect("slot lock").as_ref() {
                handle.unmount();
            }
            Ok(complaint(3, ComplaintStatus::Resolved))
        });
        let mut page = page_with(api, MockNavigator::new(), MockAlerter::new());
        page.fetch().await;
        *handle_slot.lock().expect("slot lock") = Some(page.mount_handle());

        let outcome = page.update_status(ComplaintStatus::Resolved).await;

        assert_eq!(outcome, StatusUpdate::Discarded);
        assert_eq!(
            page.state().ready().map(|c| c.status),
            Some(ComplaintStatus::Open)
        );
    }
}

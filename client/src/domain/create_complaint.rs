//! Create-complaint form state.
//!
//! Field edits go through [`ComplaintForm::apply`], which returns a new form
//! value. Submission validates locally first; an invalid form never reaches
//! the API contract.

use std::mem;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use super::page_state::MountHandle;
use super::ports::{ComplaintApi, Navigator, UserApi};
use super::route::Route;
use super::{ApiError, Attachment, Category, Complaint, NewComplaint, User, UserId};

/// Inline message for a form with missing required fields.
pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill in all required fields";
/// Inline message when the backend rejects the complaint.
pub const CREATE_FAILED_MESSAGE: &str = "Failed to create complaint. Please try again.";
/// File picker hint; not enforced.
pub const ATTACHMENT_ACCEPT: &str = "image/*,.pdf,.doc,.docx";

/// Controlled values of the create form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintForm {
    /// Title input.
    pub title: String,
    /// Description input.
    pub description: String,
    /// Category selector; always holds a valid value.
    pub category: Category,
    /// "Raised by" selector; empty until users are loaded.
    pub user_id: Option<UserId>,
    /// Optional file.
    pub attachment: Option<Attachment>,
}

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldChange {
    /// New title text.
    Title(String),
    /// New description text.
    Description(String),
    /// New category.
    Category(Category),
    /// New reporter selection.
    RaisedBy(Option<UserId>),
    /// New (or cleared) attachment.
    Attachment(Option<Attachment>),
}

impl ComplaintForm {
    /// Return the form with `change` applied.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::{ComplaintForm, FieldChange};
    ///
    /// let form = ComplaintForm::default().apply(FieldChange::Title("No hot water".to_owned()));
    /// assert_eq!(form.title, "No hot water");
    /// ```
    #[must_use]
    pub fn apply(self, change: FieldChange) -> Self {
        match change {
            FieldChange::Title(title) => Self { title, ..self },
            FieldChange::Description(description) => Self {
                description,
                ..self
            },
            FieldChange::Category(category) => Self { category, ..self },
            FieldChange::RaisedBy(user_id) => Self { user_id, ..self },
            FieldChange::Attachment(attachment) => Self { attachment, ..self },
        }
    }

    /// Check required fields and build the creation request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] carrying [`REQUIRED_FIELDS_MESSAGE`]
    /// when the title, description, or reporter is missing.
    pub fn validate(&self) -> Result<NewComplaint, ApiError> {
        let user_id = self
            .user_id
            .ok_or_else(|| ApiError::validation(REQUIRED_FIELDS_MESSAGE))?;
        NewComplaint::new(
            self.title.clone(),
            self.description.clone(),
            self.category,
            user_id,
        )
        .map_err(|_| ApiError::validation(REQUIRED_FIELDS_MESSAGE))
    }
}

/// Outcome of [`CreateComplaintPage::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid,
    /// A submission is already in flight.
    Busy,
    /// The complaint was created and the page navigated to the dashboard.
    Created(Box<Complaint>),
    /// The backend rejected the complaint; fields are kept for another try.
    Failed,
    /// The page was unmounted before the response arrived.
    Discarded,
}

/// A validated complaint waiting to be sent.
pub struct PendingSubmit<C> {
    api: Arc<C>,
    request: NewComplaint,
    attachment: Option<Attachment>,
}

impl<C: ComplaintApi> PendingSubmit<C> {
    /// The complaint about to be created.
    pub fn request(&self) -> &NewComplaint {
        &self.request
    }

    /// Send the complaint with its optional file.
    ///
    /// # Errors
    ///
    /// Returns the adapter's [`ApiError`] unchanged.
    pub async fn send(self) -> Result<Complaint, ApiError> {
        self.api.create_complaint(self.request, self.attachment).await
    }
}

/// Create-complaint page.
pub struct CreateComplaintPage<C, U, N> {
    complaints: Arc<C>,
    users_api: Arc<U>,
    navigator: Arc<N>,
    users: Vec<User>,
    form: ComplaintForm,
    submitting: bool,
    error: Option<String>,
    mount: MountHandle,
}

impl<C, U, N> CreateComplaintPage<C, U, N> {
    /// Create an empty form.
    pub fn new(complaints: Arc<C>, users_api: Arc<U>, navigator: Arc<N>) -> Self {
        Self {
            complaints,
            users_api,
            navigator,
            users: Vec::new(),
            form: ComplaintForm::default(),
            submitting: false,
            error: None,
            mount: MountHandle::new(),
        }
    }

    /// Users offered by the "raised by" selector.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Current field values.
    pub fn form(&self) -> &ComplaintForm {
        &self.form
    }

    /// Inline error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Submit and cancel are disabled while submitting.
    pub fn controls_disabled(&self) -> bool {
        self.submitting
    }

    /// Caption of the submit control.
    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Creating..."
        } else {
            "Create Complaint"
        }
    }

    /// Handle the router uses to unmount this page.
    pub fn mount_handle(&self) -> MountHandle {
        self.mount.clone()
    }

    /// Apply a user edit.
    pub fn change(&mut self, change: FieldChange) {
        let form = mem::take(&mut self.form);
        self.form = form.apply(change);
    }
}

impl<C, U, N> CreateComplaintPage<C, U, N>
where
    C: ComplaintApi,
    U: UserApi,
    N: Navigator,
{
    /// Populate the "raised by" selector. Called on mount.
    ///
    /// The first user becomes the default selection. A failure is logged and
    /// leaves the selector empty.
    pub async fn load_users(&mut self) {
        let result = self.users_api.list_users().await;
        if !self.mount.is_mounted() {
            debug!("create page unmounted; dropping user list response");
            return;
        }
        match result {
            Ok(users) => {
                debug!(count = users.len(), "users loaded");
                if let Some(first) = users.first() {
                    let id = first.id();
                    self.change(FieldChange::RaisedBy(Some(id)));
                }
                self.users = users;
            }
            Err(err) => warn!(error = %err, "failed to fetch users"),
        }
    }

    /// Validate and send the form.
    pub async fn submit(&mut self) -> SubmitOutcome {
        match self.begin_submit() {
            Ok(pending) => {
                let result = pending.send().await;
                self.finish_submit(result)
            }
            Err(outcome) => outcome,
        }
    }

    /// Validate the form and enter the submitting state.
    ///
    /// The returned request is sent without borrowing the page, so the
    /// disabled controls can be shown while it is in flight. Hand its result
    /// to [`finish_submit`](Self::finish_submit).
    ///
    /// # Errors
    ///
    /// Returns [`SubmitOutcome::Busy`] while another submission is in flight
    /// and [`SubmitOutcome::Invalid`] when a required field is missing.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit<C>, SubmitOutcome> {
        if self.submitting {
            return Err(SubmitOutcome::Busy);
        }
        let request = self.form.validate().map_err(|err| {
            debug!(error = %err, "create form rejected locally");
            self.error = Some(REQUIRED_FIELDS_MESSAGE.to_owned());
            SubmitOutcome::Invalid
        })?;

        self.submitting = true;
        self.error = None;
        Ok(PendingSubmit {
            api: Arc::clone(&self.complaints),
            request,
            attachment: self.form.attachment.clone(),
        })
    }

    /// Leave the submitting state with the backend's answer.
    pub fn finish_submit(&mut self, result: Result<Complaint, ApiError>) -> SubmitOutcome {
        self.submitting = false;
        if !self.mount.is_mounted() {
            debug!("create page unmounted; dropping create response");
            return SubmitOutcome::Discarded;
        }

        match result {
            Ok(created) => {
                info!(id = %created.id, "complaint created");
                self.navigator.navigate(Route::Dashboard);
                SubmitOutcome::Created(Box::new(created))
            }
            Err(err) => {
                error!(error = %err, "failed to create complaint");
                self.error = Some(CREATE_FAILED_MESSAGE.to_owned());
                SubmitOutcome::Failed
            }
        }
    }

    /// Leave for the dashboard without submitting.
    ///
    /// Ignored while a submission is in flight; returns whether navigation
    /// happened.
    pub fn cancel(&self) -> bool {
        if self.controls_disabled() {
            return false;
        }
        self.navigator.navigate(Route::Dashboard);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ComplaintId;
    use crate::domain::ComplaintStatus;
    use crate::domain::ports::{MockComplaintApi, MockNavigator, MockUserApi};
    use chrono::NaiveDate;
    use mockall::predicate::eq;
    use rstest::rstest;

    type Page = CreateComplaintPage<MockComplaintApi, MockUserApi, MockNavigator>;

    fn users() -> Vec<User> {
        vec![
            User::new(UserId::new(11), "Asha", "student"),
            User::new(UserId::new(12), "Ravi", "warden"),
        ]
    }

    fn created(request: &NewComplaint) -> Complaint {
        Complaint {
            id: ComplaintId::new(100),
            title: request.title().to_owned(),
            description: request.description().to_owned(),
            category: request.category(),
            status: ComplaintStatus::Open,
            assigned_to: None,
            raised_by: None,
            attachment_url: None,
            created_at: NaiveDate::from_ymd_opt(2024, 9, 1)
                .and_then(|d| d.and_hms_opt(8, 0, 0))
                .expect("valid timestamp"),
        }
    }

    fn user_api_returning(list: Vec<User>) -> MockUserApi {
        let mut api = MockUserApi::new();
        api.expect_list_users().times(1).return_once(move || Ok(list));
        api
    }

    fn page(complaints: MockComplaintApi, users: MockUserApi, navigator: MockNavigator) -> Page {
        CreateComplaintPage::new(Arc::new(complaints), Arc::new(users), Arc::new(navigator))
    }

    fn fill(page: &mut Page) {
        page.change(FieldChange::Title("Fan not working".to_owned()));
        page.change(FieldChange::Description("Room 12 ceiling fan".to_owned()));
        page.change(FieldChange::Category(Category::Electrical));
    }

    #[test]
    fn apply_returns_a_new_value_and_keeps_other_fields() {
        let original = ComplaintForm::default().apply(FieldChange::Title("A".to_owned()));
        let edited = original
            .clone()
            .apply(FieldChange::Description("B".to_owned()));
        assert_eq!(original.description, "");
        assert_eq!(edited.title, "A");
        assert_eq!(edited.description, "B");
        assert_eq!(edited.category, Category::Carpentry);
    }

    #[rstest]
    #[case("", "desc", Some(UserId::new(1)))]
    #[case("title", "", Some(UserId::new(1)))]
    #[case("title", "desc", None)]
    fn validate_requires_title_description_and_user(
        #[case] title: &str,
        #[case] description: &str,
        #[case] user_id: Option<UserId>,
    ) {
        let form = ComplaintForm {
            title: title.to_owned(),
            description: description.to_owned(),
            user_id,
            ..ComplaintForm::default()
        };
        let err = form.validate().expect_err("missing field");
        assert_eq!(err, ApiError::validation(REQUIRED_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn loading_users_selects_the_first_one() {
        let mut page = page(
            MockComplaintApi::new(),
            user_api_returning(users()),
            MockNavigator::new(),
        );

        page.load_users().await;

        assert_eq!(page.users().len(), 2);
        assert_eq!(page.form().user_id, Some(UserId::new(11)));
    }

    #[tokio::test]
    async fn empty_user_list_leaves_no_selection() {
        let mut page = page(
            MockComplaintApi::new(),
            user_api_returning(Vec::new()),
            MockNavigator::new(),
        );

        page.load_users().await;

        assert_eq!(page.form().user_id, None);
    }

    #[tokio::test]
    async fn user_fetch_failure_is_silent() {
        let mut users = MockUserApi::new();
        users
            .expect_list_users()
            .times(1)
            .return_once(|| Err(ApiError::network("refused")));
        let mut page = page(MockComplaintApi::new(), users, MockNavigator::new());

        page.load_users().await;

        assert!(page.users().is_empty());
        assert_eq!(page.error(), None);
    }

    #[tokio::test]
    async fn empty_title_is_rejected_without_a_network_call() {
        let mut complaints = MockComplaintApi::new();
        complaints.expect_create_complaint().never();
        let mut page = page(complaints, user_api_returning(users()), MockNavigator::new());
        page.load_users().await;
        page.change(FieldChange::Description("Something".to_owned()));

        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(page.error(), Some(REQUIRED_FIELDS_MESSAGE));
    }

    #[tokio::test]
    async fn success_navigates_to_the_dashboard() {
        let mut complaints = MockComplaintApi::new();
        complaints
            .expect_create_complaint()
            .withf(|request, attachment| {
                request.title() == "Fan not working"
                    && request.category() == Category::Electrical
                    && request.user_id() == UserId::new(11)
                    && attachment.is_none()
            })
            .times(1)
            .returning(|request, _| Ok(created(&request)));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(Route::Dashboard))
            .times(1)
            .return_const(());
        let mut page = page(complaints, user_api_returning(users()), navigator);
        page.load_users().await;
        fill(&mut page);

        let outcome = page.submit().await;

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(!page.is_submitting());
    }

    #[tokio::test]
    async fn failure_keeps_the_entered_fields() {
        let mut complaints = MockComplaintApi::new();
        complaints
            .expect_create_complaint()
            .times(1)
            .return_once(|_, _| Err(ApiError::http(500_u16, "disk full")));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let mut page = page(complaints, user_api_returning(users()), navigator);
        page.load_users().await;
        fill(&mut page);
        let before = page.form().clone();

        let outcome = page.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(page.error(), Some(CREATE_FAILED_MESSAGE));
        assert_eq!(page.form(), &before);
        assert!(!page.controls_disabled());
        assert_eq!(page.submit_label(), "Create Complaint");
    }

    #[tokio::test]
    async fn attachment_is_forwarded() {
        let mut complaints = MockComplaintApi::new();
        complaints
            .expect_create_complaint()
            .withf(|_, attachment| {
                attachment
                    .as_ref()
                    .is_some_and(|file| file.file_name == "photo.jpg")
            })
            .times(1)
            .returning(|request, _| Ok(created(&request)));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().times(1).return_const(());
        let mut page = page(complaints, user_api_returning(users()), navigator);
        page.load_users().await;
        fill(&mut page);
        page.change(FieldChange::Attachment(Some(Attachment::new(
            "photo.jpg",
            vec![0xFF, 0xD8],
        ))));

        page.submit().await;
    }

    #[tokio::test]
    async fn controls_stay_disabled_while_the_request_is_in_flight() {
        let mut complaints = MockComplaintApi::new();
        complaints
            .expect_create_complaint()
            .times(1)
            .returning(|request, _| Ok(created(&request)));
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(Route::Dashboard))
            .times(1)
            .return_const(());
        let mut page = page(complaints, user_api_returning(users()), navigator);
        page.load_users().await;
        fill(&mut page);

        let pending = page.begin_submit().expect("valid form");

        assert!(page.is_submitting());
        assert!(page.controls_disabled());
        assert_eq!(page.submit_label(), "Creating...");
        assert!(!page.cancel());
        assert!(matches!(page.begin_submit(), Err(SubmitOutcome::Busy)));
        assert_eq!(pending.request().title(), "Fan not working");

        let result = pending.send().await;
        let outcome = page.finish_submit(result);

        assert!(matches!(outcome, SubmitOutcome::Created(_)));
        assert!(!page.controls_disabled());
        assert_eq!(page.submit_label(), "Create Complaint");
    }

    #[tokio::test]
    async fn unmounting_mid_submit_discards_the_response() {
        let mut complaints = MockComplaintApi::new();
        complaints
            .expect_create_complaint()
            .times(1)
            .returning(|request, _| Ok(created(&request)));
        let mut navigator = MockNavigator::new();
        navigator.expect_navigate().never();
        let mut page = page(complaints, user_api_returning(users()), navigator);
        page.load_users().await;
        fill(&mut page);

        let pending = page.begin_submit().expect("valid form");
        page.mount_handle().unmount();
        let outcome = page.finish_submit(pending.send().await);

        assert_eq!(outcome, SubmitOutcome::Discarded);
        assert!(!page.is_submitting());
    }

    #[test]
    fn cancel_navigates_home() {
        let mut navigator = MockNavigator::new();
        navigator
            .expect_navigate()
            .with(eq(Route::Dashboard))
            .times(1)
            .return_const(());
        let page = page(MockComplaintApi::new(), MockUserApi::new(), navigator);

        assert!(page.cancel());
    }
}

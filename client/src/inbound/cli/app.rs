//! Router loop that plays the browser shell for the terminal.
//!
//! One command mounts the page for its starting route, runs the requested
//! interaction, and follows any navigation the page asks for. The previous
//! page is unmounted before the next one mounts, so late responses are
//! dropped exactly as they would be in the browser.

use std::io::{self, Write};
use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use super::render;
use super::shell::{PendingNavigator, QueuedAlerter};
use crate::domain::ports::{ComplaintApi, UserApi};
use crate::domain::{
    ComplaintDetailPage, ComplaintStatus, CreateComplaintPage, DashboardPage, DashboardView,
    DetailView, FieldChange, Route, StatusUpdate, SubmitOutcome,
};

/// Upper bound on page transitions followed for one command.
pub const MAX_HOPS: usize = 4;
/// Shown when the user list cannot be fetched.
pub const FETCH_USERS_FAILED: &str = "Failed to fetch users. Please try again.";
/// Shown when the backend rejects a new user.
pub const CREATE_USER_FAILED: &str = "Failed to create user. Please try again.";

/// Interaction performed on the first page mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Only look at the page.
    View,
    /// Pick a status on the detail page.
    SetStatus(ComplaintStatus),
    /// Fill in the create form, then submit it.
    Submit(Vec<FieldChange>),
}

/// Where a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Route of the last page shown.
    pub route: Route,
    /// Whether the command ended on an error.
    pub failed: bool,
}

/// Terminal front end bound to a pair of API adapters.
pub struct App<C, U> {
    complaints: Arc<C>,
    users: Arc<U>,
    navigator: Arc<PendingNavigator>,
    alerter: Arc<QueuedAlerter>,
    asset_base: Url,
}

impl<C, U> App<C, U>
where
    C: ComplaintApi,
    U: UserApi,
{
    /// Bind the front end to its adapters.
    pub fn new(complaints: Arc<C>, users: Arc<U>, asset_base: Url) -> Self {
        Self {
            complaints,
            users,
            navigator: Arc::new(PendingNavigator::new()),
            alerter: Arc::new(QueuedAlerter::new()),
            asset_base,
        }
    }

    /// Mount the page at `path`, after resolving it to a route.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub async fn open<W: Write>(&self, path: &str, out: &mut W) -> io::Result<Outcome> {
        match Route::parse(path) {
            Some(route) => self.run(route, Action::View, out).await,
            None => {
                warn!(path, "no page for path");
                out.write_all(render::navbar().as_bytes())?;
                out.write_all(render::not_found(path).as_bytes())?;
                Ok(Outcome {
                    route: Route::Dashboard,
                    failed: true,
                })
            }
        }
    }

    /// Mount `start`, apply `action`, then follow navigation.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub async fn run<W: Write>(
        &self,
        start: Route,
        action: Action,
        out: &mut W,
    ) -> io::Result<Outcome> {
        let mut route = start;
        let mut action = action;
        let mut hops = 0;
        loop {
            out.write_all(render::navbar().as_bytes())?;
            let failed = match route {
                Route::Dashboard => self.show_dashboard(out).await?,
                Route::ComplaintDetail(id) => {
                    let mut page = ComplaintDetailPage::new(
                        Arc::clone(&self.complaints),
                        Arc::clone(&self.navigator),
                        Arc::clone(&self.alerter),
                        self.asset_base.clone(),
                        id,
                    );
                    let failed = self.drive_detail(&mut page, &action, out).await?;
                    page.mount_handle().unmount();
                    failed
                }
                Route::CreateComplaint => {
                    let mut page = CreateComplaintPage::new(
                        Arc::clone(&self.complaints),
                        Arc::clone(&self.users),
                        Arc::clone(&self.navigator),
                    );
                    let failed = Self::drive_create(&mut page, &action, out).await?;
                    page.mount_handle().unmount();
                    failed
                }
            };

            let Some(next) = self.navigator.take() else {
                return Ok(Outcome { route, failed });
            };
            hops += 1;
            if hops > MAX_HOPS {
                warn!(%next, hops, "navigation limit reached");
                return Ok(Outcome { route, failed });
            }
            debug!(from = %route, to = %next, "navigating");
            out.write_all(b"\n")?;
            route = next;
            action = Action::View;
        }
    }

    async fn show_dashboard<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        let mut page = DashboardPage::new(Arc::clone(&self.complaints), Arc::clone(&self.navigator));
        page.fetch().await;
        let view = page.view();
        page.mount_handle().unmount();
        out.write_all(render::dashboard(&view).as_bytes())?;
        Ok(matches!(view, DashboardView::Error(_)))
    }

    async fn drive_detail<W: Write>(
        &self,
        page: &mut ComplaintDetailPage<C, PendingNavigator, QueuedAlerter>,
        action: &Action,
        out: &mut W,
    ) -> io::Result<bool> {
        page.fetch().await;
        let view = page.view();
        out.write_all(render::complaint_detail(&view).as_bytes())?;
        if matches!(view, DetailView::Error(_)) {
            return Ok(true);
        }

        let Action::SetStatus(status) = action else {
            return Ok(false);
        };
        let update = page.update_status(*status).await;
        for message in self.alerter.drain() {
            writeln!(out, "\nALERT: {message}")?;
        }
        match update {
            StatusUpdate::Applied => {
                out.write_all(b"\n")?;
                out.write_all(render::complaint_detail(&page.view()).as_bytes())?;
                Ok(false)
            }
            StatusUpdate::Unchanged => {
                writeln!(out, "\nStatus already {}; nothing to update.", status.option_label())?;
                Ok(false)
            }
            StatusUpdate::Unavailable | StatusUpdate::Failed | StatusUpdate::Discarded => Ok(true),
        }
    }

    async fn drive_create<W: Write>(
        page: &mut CreateComplaintPage<C, U, PendingNavigator>,
        action: &Action,
        out: &mut W,
    ) -> io::Result<bool> {
        page.load_users().await;
        let Action::Submit(changes) = action else {
            out.write_all(
                render::create_form(page.form(), page.users(), page.error(), page.submit_label())
                    .as_bytes(),
            )?;
            return Ok(false);
        };
        for change in changes {
            page.change(change.clone());
        }

        let outcome = match page.begin_submit() {
            Ok(pending) => {
                writeln!(out, "[{}]", page.submit_label())?;
                let result = pending.send().await;
                page.finish_submit(result)
            }
            Err(outcome) => outcome,
        };
        match outcome {
            SubmitOutcome::Created(created) => {
                writeln!(out, "Created complaint #{}: {}", created.id, created.title)?;
                Ok(false)
            }
            SubmitOutcome::Invalid | SubmitOutcome::Failed => {
                out.write_all(
                    render::create_form(
                        page.form(),
                        page.users(),
                        page.error(),
                        page.submit_label(),
                    )
                    .as_bytes(),
                )?;
                Ok(true)
            }
            SubmitOutcome::Busy | SubmitOutcome::Discarded => Ok(true),
        }
    }

    /// Print every known user.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub async fn list_users<W: Write>(&self, out: &mut W) -> io::Result<bool> {
        match self.users.list_users().await {
            Ok(users) => {
                out.write_all(render::users(&users).as_bytes())?;
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "failed to fetch users");
                writeln!(out, "Error: {FETCH_USERS_FAILED}")?;
                Ok(true)
            }
        }
    }

    /// Register a user and print the stored record.
    ///
    /// # Errors
    ///
    /// Returns an error when writing to `out` fails.
    pub async fn add_user<W: Write>(
        &self,
        name: String,
        role: String,
        out: &mut W,
    ) -> io::Result<bool> {
        match self.users.create_user(name, role).await {
            Ok(user) => {
                writeln!(out, "Created user {}  {}", user.id(), user.caption())?;
                Ok(false)
            }
            Err(err) => {
                warn!(error = %err, "failed to create user");
                writeln!(out, "Error: {CREATE_USER_FAILED}")?;
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;

//! UI-ready projections of complaints.
//!
//! Everything here is a pure function of a [`Complaint`] (plus the asset base
//! URL for attachment links), so front ends only lay the strings out.

use chrono::NaiveDateTime;
use url::Url;

use super::complaint::{Complaint, ComplaintStatus};
use super::route::Route;

/// Timestamp layout matching the en-US locale rendering used by the tables.
pub const TIMESTAMP_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Caption of the attachment link.
pub const ATTACHMENT_LINK_TEXT: &str = "View Attachment";

/// Render a timestamp for display.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use complaint_desk::domain::format_timestamp;
///
/// let at = NaiveDate::from_ymd_opt(2024, 1, 5)
///     .and_then(|d| d.and_hms_opt(14, 3, 9))
///     .expect("valid timestamp");
/// assert_eq!(format_timestamp(at), "1/5/2024, 2:03:09 PM");
/// ```
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Status text and style class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    /// Text with underscores replaced by spaces.
    pub label: String,
    /// Style class.
    pub class: &'static str,
}

impl From<ComplaintStatus> for StatusBadge {
    fn from(status: ComplaintStatus) -> Self {
        Self {
            label: status.badge_label(),
            class: status.css_class(),
        }
    }
}

/// One dashboard table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintRow {
    /// Complaint id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Raw category value.
    pub category: &'static str,
    /// Assignee, empty when unassigned.
    pub assigned_to: String,
    /// Status badge.
    pub status: StatusBadge,
    /// Formatted creation time.
    pub created_at: String,
    /// Where clicking the row leads.
    pub target: Route,
}

impl From<&Complaint> for ComplaintRow {
    fn from(complaint: &Complaint) -> Self {
        Self {
            id: complaint.id.to_string(),
            title: complaint.title.clone(),
            category: complaint.category.as_str(),
            assigned_to: complaint.assigned_to.clone().unwrap_or_default(),
            status: complaint.status.into(),
            created_at: format_timestamp(complaint.created_at),
            target: Route::ComplaintDetail(complaint.id),
        }
    }
}

/// Link to an uploaded attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentLink {
    /// Link caption.
    pub text: &'static str,
    /// Absolute URL.
    pub href: String,
    /// Open in a new browsing context.
    pub new_context: bool,
}

/// Resolve a server-relative attachment path against the asset host.
pub fn resolve_attachment(asset_base: &Url, attachment_url: &str) -> Option<AttachmentLink> {
    if attachment_url.trim().is_empty() {
        return None;
    }
    asset_base
        .join(attachment_url)
        .ok()
        .map(|href| AttachmentLink {
            text: ATTACHMENT_LINK_TEXT,
            href: href.into(),
            new_context: true,
        })
}

/// One entry of the status-update control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusOption {
    /// Value submitted when chosen.
    pub status: ComplaintStatus,
    /// Caption.
    pub label: &'static str,
    /// Bound to the cached status.
    pub selected: bool,
}

/// Detail page projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDetailView {
    /// Complaint id.
    pub id: String,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Raw category value.
    pub category: &'static str,
    /// Status badge.
    pub status: StatusBadge,
    /// Assignee, empty when unassigned.
    pub assigned_to: String,
    /// Reporter as `name (role)`, empty when absent.
    pub raised_by: String,
    /// Formatted creation time.
    pub created_at: String,
    /// Attachment link, when one was uploaded.
    pub attachment: Option<AttachmentLink>,
    /// Status-update control entries.
    pub status_options: [StatusOption; 3],
    /// Control disabled while an update is in flight.
    pub status_control_disabled: bool,
}

impl ComplaintDetailView {
    /// Project a complaint for the detail page.
    pub fn new(complaint: &Complaint, asset_base: &Url, updating: bool) -> Self {
        let status_options = ComplaintStatus::ALL.map(|status| StatusOption {
            status,
            label: status.option_label(),
            selected: status == complaint.status,
        });
        Self {
            id: complaint.id.to_string(),
            title: complaint.title.clone(),
            description: complaint.description.clone(),
            category: complaint.category.as_str(),
            status: complaint.status.into(),
            assigned_to: complaint.assigned_to.clone().unwrap_or_default(),
            raised_by: complaint
                .raised_by
                .as_ref()
                .map(|user| user.caption())
                .unwrap_or_default(),
            created_at: format_timestamp(complaint.created_at),
            attachment: complaint
                .attachment_url
                .as_deref()
                .and_then(|path| resolve_attachment(asset_base, path)),
            status_options,
            status_control_disabled: updating,
        }
    }
}

//! Complaint data model and its closed enumerations.
//!
//! `status` is only changed through the status-update contract. The client
//! places no guard on transitions; any status may be requested and the
//! backend decides.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::error::ApiError;
use super::user::{UserId, UserSummary};

/// Server-assigned complaint identifier, stable for the complaint's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComplaintId(i64);

impl ComplaintId {
    /// Wrap a raw identifier.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ComplaintId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Returned when parsing an unknown enumeration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    kind: &'static str,
    value: String,
}

/// Complaint classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    /// Furniture, doors, and fittings.
    #[default]
    Carpentry,
    /// Wiring, lights, and sockets.
    Electrical,
    /// Taps, drains, and water supply.
    Plumbing,
    /// Harassment reports.
    Ragging,
}

impl Category {
    /// Every category in selector order.
    pub const ALL: [Self; 4] = [
        Self::Carpentry,
        Self::Electrical,
        Self::Plumbing,
        Self::Ragging,
    ];

    /// Wire value, e.g. `CARPENTRY`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Carpentry => "CARPENTRY",
            Self::Electrical => "ELECTRICAL",
            Self::Plumbing => "PLUMBING",
            Self::Ragging => "RAGGING",
        }
    }

    /// Selector caption, e.g. `Carpentry`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Carpentry => "Carpentry",
            Self::Electrical => "Electrical",
            Self::Plumbing => "Plumbing",
            Self::Ragging => "Ragging",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "category",
                value: s.to_owned(),
            })
    }
}

/// Complaint lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplaintStatus {
    /// Newly raised; the backend default.
    Open,
    /// Work has started.
    InProgress,
    /// Work is finished.
    Resolved,
}

impl ComplaintStatus {
    /// Every status in update-control order.
    pub const ALL: [Self; 3] = [Self::Open, Self::InProgress, Self::Resolved];

    /// Wire value, e.g. `IN_PROGRESS`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
        }
    }

    /// Badge text: the wire value with the underscore replaced by a space.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::ComplaintStatus;
    ///
    /// assert_eq!(ComplaintStatus::InProgress.badge_label(), "IN PROGRESS");
    /// ```
    pub fn badge_label(self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Badge style class.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Open => "status-open",
            Self::InProgress => "status-in-progress",
            Self::Resolved => "status-resolved",
        }
    }

    /// Caption used by the status-update control.
    pub const fn option_label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().replace([' ', '-'], "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(&normalised))
            .ok_or_else(|| UnknownVariant {
                kind: "status",
                value: s.to_owned(),
            })
    }
}

/// A maintenance complaint as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complaint {
    /// Lookup key.
    pub id: ComplaintId,
    /// Short summary.
    pub title: String,
    /// Free-text details.
    pub description: String,
    /// Classification.
    pub category: Category,
    /// Current lifecycle status.
    pub status: ComplaintStatus,
    /// Staff member handling the complaint; backend-managed and read-only.
    pub assigned_to: Option<String>,
    /// Reporter, when the backend includes it.
    pub raised_by: Option<UserSummary>,
    /// Server-relative path of the uploaded attachment.
    pub attachment_url: Option<String>,
    /// Creation time in the backend's local zone.
    pub created_at: NaiveDateTime,
}

/// Validated creation request.
///
/// Title and description must be non-blank; the constructor is the only way
/// to build one, so a request that reaches the API contract already satisfies
/// the local preconditions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComplaint {
    title: String,
    description: String,
    category: Category,
    user_id: UserId,
}

impl NewComplaint {
    /// Validate and build a creation request.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the title or description is blank.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::{Category, NewComplaint, UserId};
    ///
    /// assert!(NewComplaint::new("", "Leaking tap", Category::Plumbing, UserId::new(1)).is_err());
    /// ```
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        user_id: UserId,
    ) -> Result<Self, ApiError> {
        let title = title.into();
        let description = description.into();
        if title.trim().is_empty() {
            return Err(ApiError::validation("title must not be empty"));
        }
        if description.trim().is_empty() {
            return Err(ApiError::validation("description must not be empty"));
        }
        Ok(Self {
            title,
            description,
            category,
            user_id,
        })
    }

    /// Short summary.
    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    /// Free-text details.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Classification.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Reporting user.
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// Binary file sent alongside a new complaint.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Original file name reported to the backend.
    pub file_name: String,
    /// MIME type, when known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Build an attachment without a declared content type.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Declare the attachment's MIME type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

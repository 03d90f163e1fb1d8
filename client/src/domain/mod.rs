//! Domain primitives, ports, and page state for the complaint tracker.
//!
//! Purpose: keep the complaint lifecycle rules (what is fetched, how it is
//! shown, when mutations are sent) independent of any transport or front
//! end. Adapters in `outbound` implement the API ports; front ends in
//! `inbound` implement [`ports::Navigator`] and [`ports::Alerter`] and render
//! the page views.
//!
//! Public surface:
//! - `Complaint`, `Category`, `ComplaintStatus`, `NewComplaint`, `Attachment`.
//! - `User`, `UserSummary`.
//! - `ApiError`: failure taxonomy for every API call.
//! - `Route`: navigable pages.
//! - `DashboardPage`, `ComplaintDetailPage`, `CreateComplaintPage`: page
//!   state objects with explicit fetch entry points.

mod macros;

pub mod complaint;
pub mod complaint_detail;
pub mod create_complaint;
pub mod dashboard;
pub mod error;
pub mod page_state;
pub mod ports;
pub mod route;
pub mod user;
pub mod view_model;

pub use self::complaint::{
    Attachment, Category, Complaint, ComplaintId, ComplaintStatus, NewComplaint, UnknownVariant,
};
pub use self::complaint_detail::{ComplaintDetailPage, DetailView, PendingStatus, StatusUpdate};
pub use self::create_complaint::{
    ComplaintForm, CreateComplaintPage, FieldChange, PendingSubmit, SubmitOutcome,
};
pub use self::dashboard::{DashboardPage, DashboardView};
pub use self::error::ApiError;
pub use self::page_state::{MountHandle, PageState};
pub use self::route::{NAV_BRAND, NAV_LINKS, NavLink, Route};
pub use self::user::{User, UserId, UserSummary};
pub use self::view_model::{
    AttachmentLink, ComplaintDetailView, ComplaintRow, StatusBadge, StatusOption,
    format_timestamp,
};

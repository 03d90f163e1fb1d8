//! Application routes and the navigation bar model.

use std::fmt;

use super::complaint::ComplaintId;

/// Navigable pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Complaint list at `/`.
    Dashboard,
    /// Creation form at `/create`.
    CreateComplaint,
    /// Detail page at `/complaint/:id`.
    ComplaintDetail(ComplaintId),
}

impl Route {
    /// Path for this route.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::{ComplaintId, Route};
    ///
    /// assert_eq!(Route::ComplaintDetail(ComplaintId::new(12)).path(), "/complaint/12");
    /// ```
    pub fn path(self) -> String {
        match self {
            Self::Dashboard => "/".to_owned(),
            Self::CreateComplaint => "/create".to_owned(),
            Self::ComplaintDetail(id) => format!("/complaint/{id}"),
        }
    }

    /// Resolve a path to a route. Trailing slashes are ignored.
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Some(Self::Dashboard),
            ["create"] => Some(Self::CreateComplaint),
            ["complaint", id] => id.parse().ok().map(Self::ComplaintDetail),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Brand text shown at the left of the navigation bar.
pub const NAV_BRAND: &str = "Hostel Complaint System";

/// One navigation bar link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    /// Link caption.
    pub label: &'static str,
    /// Link target.
    pub route: Route,
}

/// Navigation bar links in display order.
pub const NAV_LINKS: [NavLink; 2] = [
    NavLink {
        label: "Dashboard",
        route: Route::Dashboard,
    },
    NavLink {
        label: "Create Complaint",
        route: Route::CreateComplaint,
    },
];

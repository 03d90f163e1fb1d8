//! Plain-text rendering of page views.
//!
//! Every function is pure and returns the text block for one region of the
//! screen; the router decides what to print and when.

use std::fmt::Write as _;

use crate::domain::complaint_detail::{BACK_TO_DASHBOARD, LOADING_COMPLAINT};
use crate::domain::create_complaint::ATTACHMENT_ACCEPT;
use crate::domain::dashboard::{LOADING_COMPLAINTS, NO_COMPLAINTS};
use crate::domain::{
    Category, ComplaintDetailView, ComplaintForm, ComplaintRow, DashboardView, DetailView,
    NAV_BRAND, NAV_LINKS, User,
};

const COLUMN_GAP: &str = "  ";

/// Navigation bar shown above every page.
pub fn navbar() -> String {
    let links = NAV_LINKS
        .iter()
        .map(|link| format!("{} [{}]", link.label, link.route))
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{NAV_BRAND} :: {links}\n")
}

/// Dashboard page body.
pub fn dashboard(view: &DashboardView) -> String {
    match view {
        DashboardView::Loading => format!("{LOADING_COMPLAINTS}\n"),
        DashboardView::Error(message) => format!("Error: {message}\n"),
        DashboardView::Empty => format!("All Complaints\n\n{NO_COMPLAINTS}\n"),
        DashboardView::Table(rows) => format!("All Complaints\n\n{}", complaint_table(rows)),
    }
}

fn complaint_table(rows: &[ComplaintRow]) -> String {
    let header = ["ID", "Title", "Category", "Assigned To", "Status", "Created At"]
        .map(str::to_owned);
    let body = rows.iter().map(|row| {
        [
            row.id.clone(),
            row.title.clone(),
            row.category.to_owned(),
            row.assigned_to.clone(),
            row.status.label.clone(),
            row.created_at.clone(),
        ]
    });
    columns(std::iter::once(header).chain(body).collect())
}

/// Complaint detail page body.
pub fn complaint_detail(view: &DetailView) -> String {
    match view {
        DetailView::Loading => format!("{LOADING_COMPLAINT}\n"),
        DetailView::Error(message) => format!("Error: {message}\n[{BACK_TO_DASHBOARD}]\n"),
        DetailView::Ready(detail) => detail_fields(detail),
    }
}

fn detail_fields(detail: &ComplaintDetailView) -> String {
    let mut out = format!("Complaint Details  [{BACK_TO_DASHBOARD}]\n\n");
    let mut rows = vec![
        ["ID:".to_owned(), detail.id.clone()],
        ["Title:".to_owned(), detail.title.clone()],
        ["Description:".to_owned(), detail.description.clone()],
        ["Category:".to_owned(), detail.category.to_owned()],
        ["Status:".to_owned(), detail.status.label.clone()],
        ["Assigned To:".to_owned(), detail.assigned_to.clone()],
        ["Raised By:".to_owned(), detail.raised_by.clone()],
        ["Created At:".to_owned(), detail.created_at.clone()],
    ];
    if let Some(link) = &detail.attachment {
        rows.push([
            "Attachment:".to_owned(),
            format!("{} <{}>", link.text, link.href),
        ]);
    }
    out.push_str(&columns(rows));

    let options = detail
        .status_options
        .iter()
        .map(|option| {
            if option.selected {
                format!("({})", option.label)
            } else {
                option.label.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ");
    let suffix = if detail.status_control_disabled {
        " (updating...)"
    } else {
        ""
    };
    let _ = writeln!(out, "\nUpdate Status: {options}{suffix}");
    out
}

/// Create-complaint form, including any inline error.
pub fn create_form(
    form: &ComplaintForm,
    users: &[User],
    error: Option<&str>,
    submit_label: &str,
) -> String {
    let mut out = String::from("Create New Complaint\n");
    if let Some(message) = error {
        let _ = writeln!(out, "! {message}");
    }
    out.push('\n');

    let categories = Category::ALL
        .iter()
        .map(|category| {
            if *category == form.category {
                format!("({})", category.label())
            } else {
                category.label().to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ");
    let raised_by = form
        .user_id
        .and_then(|id| users.iter().find(|user| user.id() == id))
        .map(User::caption)
        .or_else(|| form.user_id.map(|id| format!("user #{id}")))
        .unwrap_or_default();
    let attachment = form.attachment.as_ref().map_or_else(
        || format!("none ({ATTACHMENT_ACCEPT})"),
        |file| file.file_name.clone(),
    );

    out.push_str(&columns(vec![
        ["Title *".to_owned(), form.title.clone()],
        ["Description *".to_owned(), form.description.clone()],
        ["Category *".to_owned(), categories],
        ["Raised By *".to_owned(), raised_by],
        ["Attachment (Optional)".to_owned(), attachment],
    ]));
    let _ = writeln!(out, "\n[{submit_label}]  [Cancel]");
    out
}

/// User listing, one `id  name (role)` line per user.
pub fn users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.\n".to_owned();
    }
    columns(
        users
            .iter()
            .map(|user| [user.id().to_string(), user.caption()])
            .collect(),
    )
}

/// Body for a path no page answers to.
pub fn not_found(path: &str) -> String {
    format!("Page not found: {path}\n")
}

fn columns<const N: usize>(rows: Vec<[String; N]>) -> String {
    let mut widths = [0_usize; N];
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = String::new();
    for row in &rows {
        let mut line = String::new();
        for (index, (cell, width)) in row.iter().zip(widths).enumerate() {
            if index > 0 {
                line.push_str(COLUMN_GAP);
            }
            let _ = write!(line, "{cell:<width$}");
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;

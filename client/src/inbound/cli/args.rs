//! Command-line arguments for `complaint-desk`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::domain::{Category, ComplaintId, ComplaintStatus, UserId};

/// `complaint-desk` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "complaint-desk",
    about = "Browse, raise, and triage hostel maintenance complaints",
    version
)]
pub struct CliArgs {
    /// REST API root. Overrides `COMPLAINTS_API_BASE_URL`.
    #[arg(long = "api-base-url", value_name = "url", global = true)]
    pub api_base_url: Option<String>,
    /// Page or action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show every complaint.
    Dashboard,
    /// Open a page by path, e.g. `/`, `/create` or `/complaint/7`.
    Open {
        /// Page path.
        path: String,
    },
    /// Show one complaint.
    Show {
        /// Complaint id.
        id: ComplaintId,
    },
    /// Move a complaint to another status.
    SetStatus {
        /// Complaint id.
        id: ComplaintId,
        /// `OPEN`, `IN_PROGRESS` or `RESOLVED`.
        status: ComplaintStatus,
    },
    /// Fill in and submit the create-complaint form.
    Create {
        /// Complaint title.
        #[arg(long, default_value = "")]
        title: String,
        /// Complaint description.
        #[arg(long, default_value = "")]
        description: String,
        /// Complaint category.
        #[arg(long, default_value_t = Category::default())]
        category: Category,
        /// Reporting user. Defaults to the first user the backend lists.
        #[arg(long = "user-id", value_name = "id")]
        user_id: Option<UserId>,
        /// File to attach.
        #[arg(long, value_name = "path")]
        file: Option<PathBuf>,
    },
    /// List known users.
    Users,
    /// Register a user.
    AddUser {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Free-form role, e.g. `STUDENT`.
        #[arg(long)]
        role: String,
    },
}

impl Command {
    /// Attachment path named by `create --file`, if any.
    pub fn attachment_path(&self) -> Option<&Path> {
        match self {
            Self::Create { file, .. } => file.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("complaint-desk").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[rstest]
    fn global_base_url_is_accepted_after_the_subcommand() {
        let args = parse(&["dashboard", "--api-base-url", "http://backend:8080/api"]);
        assert_eq!(args.api_base_url.as_deref(), Some("http://backend:8080/api"));
        assert!(matches!(args.command, Command::Dashboard));
    }

    #[rstest]
    #[case("in_progress", ComplaintStatus::InProgress)]
    #[case("RESOLVED", ComplaintStatus::Resolved)]
    fn set_status_parses_wire_values(#[case] raw: &str, #[case] expected: ComplaintStatus) {
        let args = parse(&["set-status", "12", raw]);
        let Command::SetStatus { id, status } = args.command else {
            panic!("expected set-status");
        };
        assert_eq!(id, ComplaintId::new(12));
        assert_eq!(status, expected);
    }

    #[rstest]
    fn create_defaults_mirror_an_untouched_form() {
        let args = parse(&["create"]);
        let Command::Create {
            title,
            description,
            category,
            user_id,
            file,
        } = args.command
        else {
            panic!("expected create");
        };
        assert!(title.is_empty());
        assert!(description.is_empty());
        assert_eq!(category, Category::Carpentry);
        assert_eq!(user_id, None);
        assert_eq!(file, None);
    }

    #[rstest]
    fn attachment_path_is_exposed_for_create_only() {
        let create = parse(&["create", "--file", "photo.png"]);
        assert_eq!(
            create.command.attachment_path(),
            Some(Path::new("photo.png"))
        );
        assert_eq!(parse(&["users"]).command.attachment_path(), None);
    }

    #[rstest]
    fn unknown_status_is_rejected() {
        let result = CliArgs::try_parse_from(["complaint-desk", "set-status", "1", "CLOSED"]);
        assert!(result.is_err());
    }
}

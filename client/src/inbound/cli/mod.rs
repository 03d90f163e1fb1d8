//! Terminal front end.
//!
//! Responsibilities:
//! - parse command-line arguments into page interactions
//! - provide terminal implementations of the navigation and alert ports
//! - render page views as plain text

use std::io::{self, Write};

use crate::domain::ports::{ComplaintApi, UserApi};
use crate::domain::{Attachment, FieldChange, Route};

mod app;
mod args;
mod render;
mod shell;

pub use app::{Action, App, MAX_HOPS, Outcome};
pub use args::{CliArgs, Command};
pub use shell::{PendingNavigator, QueuedAlerter};

/// Run `command` against `app`, writing the screen to `out`.
///
/// `attachment` carries the file already read for `create --file`. Returns
/// `true` when the command ended on an error page.
///
/// # Errors
///
/// Returns an error when writing to `out` fails.
pub async fn execute<C, U, W>(
    app: &App<C, U>,
    command: Command,
    attachment: Option<Attachment>,
    out: &mut W,
) -> io::Result<bool>
where
    C: ComplaintApi,
    U: UserApi,
    W: Write,
{
    let outcome = match command {
        Command::Dashboard => app.run(Route::Dashboard, Action::View, out).await?,
        Command::Open { path } => app.open(&path, out).await?,
        Command::Show { id } => {
            app.run(Route::ComplaintDetail(id), Action::View, out)
                .await?
        }
        Command::SetStatus { id, status } => {
            app.run(Route::ComplaintDetail(id), Action::SetStatus(status), out)
                .await?
        }
        Command::Create {
            title,
            description,
            category,
            user_id,
            file: _,
        } => {
            let mut changes = vec![
                FieldChange::Title(title),
                FieldChange::Description(description),
                FieldChange::Category(category),
            ];
            if user_id.is_some() {
                changes.push(FieldChange::RaisedBy(user_id));
            }
            if attachment.is_some() {
                changes.push(FieldChange::Attachment(attachment));
            }
            app.run(Route::CreateComplaint, Action::Submit(changes), out)
                .await?
        }
        Command::Users => return app.list_users(out).await,
        Command::AddUser { name, role } => return app.add_user(name, role, out).await,
    };
    Ok(outcome.failed)
}

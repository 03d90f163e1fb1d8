//! Transport DTOs for the backend JSON payloads.
//!
//! Responses decode into these first and then map into domain records in
//! one pass. Nullable columns on the backend are optional here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, Complaint, ComplaintId, ComplaintStatus, User, UserId, UserSummary,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComplaintDto {
    pub(super) id: i64,
    pub(super) title: String,
    #[serde(default)]
    pub(super) description: Option<String>,
    pub(super) category: Category,
    pub(super) status: ComplaintStatus,
    pub(super) created_at: NaiveDateTime,
    #[serde(default)]
    pub(super) attachment_url: Option<String>,
    #[serde(default)]
    pub(super) assigned_to: Option<String>,
    #[serde(default)]
    pub(super) raised_by: Option<UserDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UserDto {
    #[serde(default)]
    pub(super) id: Option<i64>,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default)]
    pub(super) role: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct StatusUpdateBody {
    pub(super) status: ComplaintStatus,
}

#[derive(Debug, Serialize)]
pub(super) struct NewUserBody<'a> {
    pub(super) name: &'a str,
    pub(super) role: &'a str,
}

impl From<ComplaintDto> for Complaint {
    fn from(dto: ComplaintDto) -> Self {
        Self {
            id: ComplaintId::new(dto.id),
            title: dto.title,
            description: dto.description.unwrap_or_default(),
            category: dto.category,
            status: dto.status,
            assigned_to: dto.assigned_to,
            raised_by: dto.raised_by.map(UserDto::into_summary),
            attachment_url: dto.attachment_url.filter(|path| !path.trim().is_empty()),
            created_at: dto.created_at,
        }
    }
}

impl UserDto {
    fn into_summary(self) -> UserSummary {
        UserSummary {
            id: self.id.map(UserId::new),
            name: self.name.unwrap_or_default(),
            role: self.role.unwrap_or_default(),
        }
    }

    pub(super) fn into_user(self) -> Result<User, String> {
        let id = self
            .id
            .ok_or_else(|| "user record is missing its id".to_owned())?;
        Ok(User::new(
            UserId::new(id),
            self.name.unwrap_or_default(),
            self.role.unwrap_or_default(),
        ))
    }
}

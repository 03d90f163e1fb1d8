//! User data model.
//!
//! Users are read-only from the client's point of view apart from the
//! creation contract. Roles are free text; the backend does not publish a
//! closed set.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Server-assigned user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    /// Wrap a raw identifier received from the backend.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw numeric identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Application user as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    name: String,
    role: String,
}

impl User {
    /// Build a user from its parts.
    pub fn new(id: UserId, name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: role.into(),
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Free-text role such as `student` or `warden`.
    pub fn role(&self) -> &str {
        self.role.as_str()
    }

    /// Selector caption, `name (role)`.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::{User, UserId};
    ///
    /// let user = User::new(UserId::new(1), "Asha", "student");
    /// assert_eq!(user.caption(), "Asha (student)");
    /// ```
    pub fn caption(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

/// Reporter details embedded in complaint responses.
///
/// The backend includes the reporter's id, but the client only relies on
/// `name` and `role`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    /// Reporter id when the backend provides one.
    pub id: Option<UserId>,
    /// Reporter display name.
    pub name: String,
    /// Reporter role.
    pub role: String,
}

impl UserSummary {
    /// Render as `name (role)`.
    pub fn caption(&self) -> String {
        format!("{} ({})", self.name, self.role)
    }
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: Some(user.id()),
            name: user.name().to_owned(),
            role: user.role().to_owned(),
        }
    }
}

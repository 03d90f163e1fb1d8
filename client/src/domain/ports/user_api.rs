//! Driven port for the user endpoints of the backend.

use async_trait::async_trait;

use crate::domain::{ApiError, User};

/// Typed user operations offered by the backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch every user in backend order.
    async fn list_users(&self) -> Result<Vec<User>, ApiError>;

    /// Register a user and return the stored record.
    async fn create_user(&self, name: String, role: String) -> Result<User, ApiError>;
}

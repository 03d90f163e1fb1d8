//! User port adapter.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::api_client::ApiClient;
use super::dto::{NewUserBody, UserDto};
use crate::domain::ports::UserApi;
use crate::domain::{ApiError, User};

const USERS: &str = "users";

/// [`UserApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpUserApi {
    client: Arc<ApiClient>,
}

impl HttpUserApi {
    /// Wrap a shared API client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserApi for HttpUserApi {
    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        let users: Vec<UserDto> = self.client.get(&[USERS]).await?;
        users
            .into_iter()
            .map(UserDto::into_user)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::decode)
    }

    async fn create_user(&self, name: String, role: String) -> Result<User, ApiError> {
        let body = NewUserBody {
            name: &name,
            role: &role,
        };
        let created: UserDto = self.client.send_json(Method::POST, &[USERS], &body).await?;
        created.into_user().map_err(ApiError::decode)
    }
}

//! Generic HTTP request wrapper bound to one base URL.
//!
//! No retries, no timeout, no caching: every failure is mapped once into
//! [`ApiError`] and returned to the caller.

use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::domain::ApiError;

const DEFAULT_USER_AGENT: &str = concat!("complaint-desk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the backend API rooted at `base_url`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `base_url`, e.g. `http://localhost:8080/api`.
    ///
    /// ```rust,ignore
    /// let client = ApiClient::new(Url::parse("http://localhost:8080/api")?)?;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self { client, base_url })
    }

    /// `GET` a JSON resource.
    pub(crate) async fn get<T>(&self, segments: &[&str]) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(Method::GET, url, |request| request).await
    }

    /// Send a JSON body and decode a JSON response.
    pub(crate) async fn send_json<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(method, url, |request| request.json(body))
            .await
    }

    /// Send a multipart form and decode a JSON response.
    pub(crate) async fn send_multipart<T>(
        &self,
        method: Method,
        segments: &[&str],
        form: Form,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        self.execute(method, url, |request| request.multipart(form))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ApiError::validation(format!(
                    "base URL `{}` cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute<T, F>(&self, method: Method, url: Url, encode: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let request = self
            .client
            .request(method.clone(), url.clone())
            .header(reqwest::header::ACCEPT, "application/json");
        let response = encode(request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_body_error(status, map_transport_error(error)))?;
        debug!(%method, %url, status = status.as_u16(), bytes = body.len(), "api call completed");
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        decode_body(body.as_ref())
    }
}

fn decode_body<T>(body: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body)
        .map_err(|error| ApiError::decode(format!("invalid JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> ApiError {
    ApiError::network(error.to_string())
}

/// A body cut short after a non-success status still reports that status.
fn map_body_error(status: StatusCode, transport: ApiError) -> ApiError {
    if status.is_success() {
        transport
    } else {
        debug!(status = status.as_u16(), error = %transport, "error body unreadable");
        map_status_error(status, &[])
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    };

    match status {
        StatusCode::NOT_FOUND => ApiError::not_found(message),
        _ => ApiError::http(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

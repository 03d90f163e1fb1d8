//! Complaint port adapter.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use super::api_client::ApiClient;
use super::dto::{ComplaintDto, StatusUpdateBody};
use crate::domain::ports::ComplaintApi;
use crate::domain::{
    ApiError, Attachment, Complaint, ComplaintId, ComplaintStatus, NewComplaint,
};

const COMPLAINTS: &str = "complaints";

/// [`ComplaintApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpComplaintApi {
    client: Arc<ApiClient>,
}

impl HttpComplaintApi {
    /// Wrap a shared API client.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ComplaintApi for HttpComplaintApi {
    async fn list_complaints(&self) -> Result<Vec<Complaint>, ApiError> {
        let complaints: Vec<ComplaintDto> = self.client.get(&[COMPLAINTS]).await?;
        Ok(complaints.into_iter().map(Complaint::from).collect())
    }

    async fn get_complaint(&self, id: ComplaintId) -> Result<Complaint, ApiError> {
        let id = id.to_string();
        let complaint: ComplaintDto = self.client.get(&[COMPLAINTS, id.as_str()]).await?;
        Ok(complaint.into())
    }

    async fn create_complaint(
        &self,
        complaint: NewComplaint,
        attachment: Option<Attachment>,
    ) -> Result<Complaint, ApiError> {
        let form = complaint_form(&complaint, attachment)?;
        let created: ComplaintDto = self
            .client
            .send_multipart(Method::POST, &[COMPLAINTS], form)
            .await?;
        Ok(created.into())
    }

    async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, ApiError> {
        let id = id.to_string();
        let updated: ComplaintDto = self
            .client
            .send_json(
                Method::PUT,
                &[COMPLAINTS, id.as_str(), "status"],
                &StatusUpdateBody { status },
            )
            .await?;
        Ok(updated.into())
    }
}

/// Multipart body for complaint creation; used whether or not a file is attached.
fn complaint_form(
    complaint: &NewComplaint,
    attachment: Option<Attachment>,
) -> Result<Form, ApiError> {
    let form = Form::new()
        .text("title", complaint.title().to_owned())
        .text("description", complaint.description().to_owned())
        .text("category", complaint.category().as_str())
        .text("userId", complaint.user_id().to_string());

    let Some(file) = attachment else {
        return Ok(form);
    };
    let mut part = Part::bytes(file.bytes).file_name(file.file_name);
    if let Some(content_type) = file.content_type.as_deref() {
        part = part.mime_str(content_type).map_err(|error| {
            ApiError::validation(format!(
                "invalid attachment content type `{content_type}`: {error}"
            ))
        })?;
    }
    Ok(form.part("file", part))
}

//! Driven port for the complaint endpoints of the backend.

use async_trait::async_trait;

use crate::domain::{
    ApiError, Attachment, Complaint, ComplaintId, ComplaintStatus, NewComplaint,
};

/// Typed complaint operations offered by the backend.
///
/// Implementations perform no retries and no caching; every failure is
/// returned unchanged to the calling page state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintApi: Send + Sync {
    /// Fetch every complaint in backend order.
    async fn list_complaints(&self) -> Result<Vec<Complaint>, ApiError>;

    /// Fetch one complaint. A missing id yields [`ApiError::NotFound`].
    async fn get_complaint(&self, id: ComplaintId) -> Result<Complaint, ApiError>;

    /// Create a complaint, always sent as multipart form data.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let request = NewComplaint::new("Fan broken", "Room 12", Category::Electrical, user_id)?;
    /// let created = api.create_complaint(request, None).await?;
    /// assert_eq!(created.status, ComplaintStatus::Open);
    /// ```
    async fn create_complaint(
        &self,
        complaint: NewComplaint,
        attachment: Option<Attachment>,
    ) -> Result<Complaint, ApiError>;

    /// Request a status change; returns the full updated record.
    async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, ApiError>;
}

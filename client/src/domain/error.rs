//! Error taxonomy shared by the complaint and user API contracts.
//!
//! Page states never show these messages to the user. They log them and
//! replace them with a fixed, user-facing sentence.

use super::macros::define_port_error;

define_port_error! {
    /// Failures surfaced by the backend API contracts.
    pub enum ApiError {
        /// No response was received (connect, DNS, or mid-stream reset).
        Network { message: String } =>
            "network error: {message}",
        /// The backend answered with a non-2xx status other than 404.
        Http { status: u16, message: String } =>
            "request failed with status {status}: {message}",
        /// The backend answered with 404.
        NotFound { message: String } =>
            "resource not found: {message}",
        /// A 2xx response carried a body that could not be decoded.
        Decode { message: String } =>
            "response decode failed: {message}",
        /// A client-side precondition failed before any request was sent.
        Validation { message: String } =>
            "validation failed: {message}",
    }
}

impl ApiError {
    /// HTTP status of the response, when one was received.
    ///
    /// # Examples
    /// ```
    /// use complaint_desk::domain::ApiError;
    ///
    /// assert_eq!(ApiError::http(500_u16, "boom").status(), Some(500));
    /// assert_eq!(ApiError::not_found("/complaints/9").status(), Some(404));
    /// assert_eq!(ApiError::network("refused").status(), None);
    /// ```
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::NotFound { .. } => Some(404),
            Self::Network { .. } | Self::Decode { .. } | Self::Validation { .. } => None,
        }
    }

    /// Whether the request never left the client.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::network(ApiError::network("refused"), None)]
    #[case::http(ApiError::http(502_u16, "bad gateway"), Some(502))]
    #[case::not_found(ApiError::not_found("missing"), Some(404))]
    #[case::decode(ApiError::decode("eof"), None)]
    #[case::validation(ApiError::validation("title"), None)]
    fn reports_status_only_when_a_response_arrived(
        #[case] error: ApiError,
        #[case] expected: Option<u16>,
    ) {
        assert_eq!(error.status(), expected);
    }

    #[test]
    fn only_validation_errors_are_local() {
        assert!(ApiError::validation("empty title").is_validation());
        assert!(!ApiError::http(400_u16, "bad").is_validation());
    }

    #[test]
    fn messages_include_the_status() {
        let err = ApiError::http(503_u16, "maintenance window");
        assert_eq!(
            err.to_string(),
            "request failed with status 503: maintenance window"
        );
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use documind_core::{ChatError, IngestError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// An error rendered as `{"detail": ...}` with its HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<IngestError> for ApiError {
    fn from(error: IngestError) -> Self {
        Self::internal(error.to_string())
    }
}

impl From<ChatError> for ApiError {
    fn from(error: ChatError) -> Self {
        match error {
            ChatError::NoDocument => Self::bad_request(error.to_string()),
            ChatError::Retrieval(_) | ChatError::Generation(_) => {
                Self::internal(format!("AI Error: {error}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { detail: self.detail })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use documind_core::GenerationError;
    use std::time::Duration;

    #[test]
    fn missing_document_is_a_client_error() {
        let error = ApiError::from(ChatError::NoDocument);
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.detail(), "Please upload a PDF first!");
    }

    #[test]
    fn generation_failures_are_prefixed() {
        let error = ApiError::from(ChatError::Generation(GenerationError::Timeout(
            Duration::from_secs(60),
        )));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail(), "AI Error: generation timed out after 60s");
    }

    #[test]
    fn ingest_failures_carry_the_raw_message() {
        let error = ApiError::from(IngestError::PdfParse("invalid file header".to_string()));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.detail(), "pdf parse error: invalid file header");
    }
}

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::StorageError;
use service::ncco::ValidationError;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body must be json")]
    InvalidJson,
    #[error("missing 'id' in request body")]
    MissingBucketId,
    #[error("bucket with id {0} not found")]
    BucketNotFound(String),
    #[error("ncco with id {0} not found")]
    NccoNotFound(String),
    #[error("bucket with id {0} already exists")]
    DuplicateBucket(String),
    #[error("Failed to validate NCCO: {0}")]
    Validation(#[from] ValidationError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::MissingBucketId | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::BucketNotFound(_) | Self::NccoNotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateBucket(_) => StatusCode::CONFLICT,
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateBucket(name) => Self::DuplicateBucket(name),
            StorageError::BucketNotFound(name) => Self::BucketNotFound(name),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        warn!(status = status.as_u16(), error = %msg, "request failed");
        (status, Json(ErrorBody::new(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_map_to_statuses() {
        assert_eq!(ApiError::from(StorageError::DuplicateBucket("b".into())).status(), StatusCode::CONFLICT);
        assert_eq!(ApiError::from(StorageError::BucketNotFound("b".into())).status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::from(ValidationError::Empty).status(), StatusCode::BAD_REQUEST);
    }
}

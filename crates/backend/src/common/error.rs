use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Id lookup failed; the text differs between endpoints.
    #[error("{0}")]
    NotFound(&'static str),
    #[error("No pictures found.")]
    NoPictures,
    #[error("Picture with id {id} already present")]
    AlreadyPresent { id: String, status: StatusCode },
    #[error("picture collection is not available")]
    CollectionUnavailable,
    #[error("Invalid picture id")]
    InvalidId,
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) | ApiError::NoPictures => StatusCode::NOT_FOUND,
            ApiError::AlreadyPresent { status, .. } => *status,
            ApiError::InvalidId | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::CollectionUnavailable | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "internal error");
                "Internal server error".to_string()
            }
            ApiError::CollectionUnavailable => "Internal server error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // handlers resolve the status for duplicates before this conversion
            StoreError::Duplicate(id) => ApiError::AlreadyPresent {
                id,
                status: StatusCode::FOUND,
            },
            other => ApiError::Internal(other.into()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!("bad request body: {rejection}");
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::warn!("bad path: {rejection}");
        ApiError::InvalidId
    }
}

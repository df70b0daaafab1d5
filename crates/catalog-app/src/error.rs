use axum::{response::IntoResponse, Json};
use http::StatusCode;
use serde_json::json;
use tracing::error;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0} not found")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Database error: {0}")]
    DatabaseError(#[source] catalog_dal::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<catalog_dal::Error> for ApiError {
    fn from(value: catalog_dal::Error) -> Self {
        match value {
            catalog_dal::Error::RecordNotFound(what) => ApiError::NotFound(what),
            catalog_dal::Error::InvalidOrderByField(field) => {
                ApiError::InvalidRequest(format!("Cannot order by {field}"))
            }
            other => ApiError::DatabaseError(other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(value: serde_json::Error) -> Self {
        ApiError::InternalError(format!("View model serialization failed: {value}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use backoffice_core::auth::AuthError;
use backoffice_core::shop::ValidationError;
use backoffice_core::storage::{repository_error_to_status_code, RepositoryError};

use super::envelope::ErrorEnvelope;

/// Failures raised by the HTTP layer itself rather than the domain.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("{0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    Forbidden(&'static str),
}

pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn status(&self) -> StatusCode {
        let err = &self.0;

        if let Some(repo_error) = err.downcast_ref::<RepositoryError>() {
            let code = repository_error_to_status_code(repo_error);
            return StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        }
        if let Some(api_error) = err.downcast_ref::<ApiError>() {
            return match api_error {
                ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            };
        }
        if err.is::<ValidationError>()
            || err.is::<JsonRejection>()
            || err.is::<QueryRejection>()
            || err.is::<PathRejection>()
        {
            return StatusCode::BAD_REQUEST;
        }
        if let Some(AuthError::Unavailable(_)) = err.downcast_ref::<AuthError>() {
            return StatusCode::SERVICE_UNAVAILABLE;
        }

        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.0.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self.0, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %message, "Request rejected");
        }

        (status, Json(ErrorEnvelope::new(message))).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

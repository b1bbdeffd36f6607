use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mismetas_core::errors::{DatabaseError, Error as CoreError, FieldErrors};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::auth::AuthError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Unauthenticated => StatusCode::UNAUTHORIZED,
                CoreError::NotFound(_) => StatusCode::NOT_FOUND,
                CoreError::Conflict(_) => StatusCode::CONFLICT,
                CoreError::Database(DatabaseError::UniqueViolation(_)) => StatusCode::CONFLICT,
                CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::Ai(_) => StatusCode::BAD_GATEWAY,
                CoreError::Database(_) | CoreError::Unexpected(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let errors = match &self {
            ApiError::Core(e) => e.field_errors().cloned(),
            _ => None,
        };
        let message = match &self {
            _ if errors.is_some() => "Invalid request data".to_string(),
            ApiError::Core(CoreError::Conflict(message)) => message.clone(),
            ApiError::Core(CoreError::Database(DatabaseError::UniqueViolation(_))) => {
                "Record already exists".to_string()
            }
            // Internal details stay in the log.
            ApiError::Core(CoreError::Database(_)) | ApiError::Internal(_) => {
                "Something went wrong".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
            errors,
        });
        (status, body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized => ApiError::Core(CoreError::Unauthenticated),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use restkit_core::{
    pagination::SourceError,
    response::{ErrorBody, MsgBody},
    validation::describe_first,
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::recovery::server_error_response;

/// Error side of a handler result.
///
/// Returning one of these with `?` ends the handler and renders the
/// matching response. Only [`ApiError::Unexpected`] is treated as a server
/// fault: it is fingerprinted and logged, and the client just sees the
/// fingerprint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// 422 `{code, message}`.
    #[error("{code}: {message}")]
    Invalid { code: String, message: String },

    /// 404 with an empty JSON string body.
    #[error("resource not found")]
    NotFound,

    /// 400 `{msg}`.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// 401 `{msg}`.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// 403 `{msg}`.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// 500 `{msg}`.
    #[error("server error: {0}")]
    ServerError(String),

    /// 422 `{code: "server", message: <fingerprint>}`, logged.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid(code: impl Into<String>, message: impl Into<String>) -> Self {
        ApiError::Invalid {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Client error carrying the text of `err`.
    pub fn invalid_error(code: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::invalid(code, err.to_string())
    }

    /// Client error describing the first violation in `errors`.
    ///
    /// `root` names the validated type and prefixes the violation path.
    pub fn from_validation(code: impl Into<String>, root: &str, errors: &ValidationErrors) -> Self {
        Self::invalid(code, describe_first(root, errors))
    }

    pub fn not_found() -> Self {
        ApiError::NotFound
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ApiError::Forbidden(msg.into())
    }

    pub fn server_error(msg: impl Into<String>) -> Self {
        ApiError::ServerError(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Invalid { .. } | ApiError::Unexpected(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::ServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::Unexpected(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::Invalid { code, message } => {
                tracing::warn!(status = %status, code = %code, message = %message, "API error");
                (status, Json(ErrorBody::new(code, message))).into_response()
            }
            ApiError::NotFound => (status, Json("")).into_response(),
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::ServerError(msg) => {
                tracing::warn!(status = %status, message = %msg, "API error");
                (status, Json(MsgBody::new(msg))).into_response()
            }
            ApiError::Unexpected(err) => server_error_response(&format!("{err:#}")),
        }
    }
}

/// Turns any failed `Result` into a client error with a fixed code.
pub trait ResultExt<T> {
    fn or_invalid(self, code: &str) -> Result<T, ApiError>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn or_invalid(self, code: &str) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::invalid_error(code, e))
    }
}

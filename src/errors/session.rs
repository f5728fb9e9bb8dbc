use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::services::data_stores::redis_service::RedisServiceErr;

/// Every failure the session subsystem can report.
///
/// `KeyNotFound` is an expected outcome that callers branch on. `Unauthorized`
/// always ends the request at the middleware boundary. Backend and signing
/// failures surface unchanged; nothing here retries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("unauthorized")]
    Unauthorized,

    #[error("key not found in session")]
    KeyNotFound,

    #[error("session record does not exist")]
    SessionNotFound,

    #[error("session backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("failed to sign credential: {0}")]
    SigningFailure(String),

    #[error("session key {0} is reserved")]
    ReservedKey(String),

    #[error("session value could not be (de)serialized: {0}")]
    InvalidValue(String),

    /// Reserved: a handler returns this to signal it has already produced its
    /// output. The session core never returns it.
    #[error("no response needed")]
    NoResponse,
}

impl SessionError {
    pub fn is_no_response(&self) -> bool {
        matches!(self, SessionError::NoResponse)
    }
}

impl From<RedisServiceErr> for SessionError {
    fn from(err: RedisServiceErr) -> Self {
        SessionError::BackendUnavailable(err.to_string())
    }
}

impl IntoResponse for SessionError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            SessionError::Unauthorized | SessionError::SessionNotFound => {
                log::debug!("rejecting request: {self}");
                StatusCode::UNAUTHORIZED
            }
            SessionError::KeyNotFound => StatusCode::NOT_FOUND,
            SessionError::ReservedKey(_) => StatusCode::BAD_REQUEST,
            SessionError::NoResponse => return StatusCode::NO_CONTENT.into_response(),
            SessionError::BackendUnavailable(_)
            | SessionError::SigningFailure(_)
            | SessionError::InvalidValue(_) => {
                log::error!("session operation failed: {self}");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong, please try again later.",
                )
                    .into_response();
            }
        };

        (status, self.to_string()).into_response()
    }
}

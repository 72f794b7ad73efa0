// HTTP error responses.
// Decision: errors serialize as a small JSON body with the message in an
// `error` field; the status travels out of band

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use gatekit_core::Error as CoreError;

/// API error
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            status,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match &err {
            CoreError::NotAuthenticated | CoreError::PasswordChangeRejected => {
                StatusCode::UNAUTHORIZED
            }
            CoreError::MissingAuthCode | CoreError::MalformedRecordId(_) => {
                StatusCode::BAD_REQUEST
            }
            CoreError::OAuthNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            CoreError::MissingConfig(_) | CoreError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self::new(status, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let err = ApiError::bad_request("bad form");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.error, "bad form");

        assert_eq!(
            ApiError::unauthorized("nope").status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::internal("boom").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_core_error_mapping() {
        assert_eq!(
            ApiError::from(CoreError::NotAuthenticated).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(CoreError::PasswordChangeRejected).status,
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(CoreError::MissingAuthCode).status,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::OAuthNotConfigured).status,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(CoreError::MissingConfig("SURREALDB_URL")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

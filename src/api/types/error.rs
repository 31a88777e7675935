//! API error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    InvalidRequestError,
    NotFoundError,
    PreconditionFailedError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRequestError => write!(f, "invalid_request_error"),
            Self::NotFoundError => write!(f, "not_found_error"),
            Self::PreconditionFailedError => write!(f, "precondition_failed_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body: `{"error": {"message", "type", "code"}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                error: ApiErrorDetail {
                    message: message.into(),
                    error_type,
                    code: None,
                },
            },
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.response.error.code = Some(code.into());
        self
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, ApiErrorType::InvalidRequestError, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, ApiErrorType::NotFoundError, message)
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::PRECONDITION_FAILED,
            ApiErrorType::PreconditionFailedError,
            message,
        )
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, ApiErrorType::ServerError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.kind().as_str();

        let api_error = match err.kind() {
            ErrorKind::NotFound => Self::not_found(err.message()),
            ErrorKind::PreconditionFailed => Self::precondition_failed(err.message()),
            ErrorKind::Validation | ErrorKind::InvalidId | ErrorKind::Conflict => {
                Self::bad_request(err.to_string())
            }
            ErrorKind::Configuration
            | ErrorKind::Storage
            | ErrorKind::Cache
            | ErrorKind::Internal => {
                tracing::error!(error = %err, "Request failed");
                Self::internal(err.to_string())
            }
        };

        api_error.with_code(code)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {}",
            self.response.error.error_type, self.response.error.message
        )
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_message_verbatim() {
        let api_err: ApiError =
            DomainError::not_found("The product with the given id was not found").into();

        assert_eq!(api_err.status, StatusCode::NOT_FOUND);
        assert_eq!(
            api_err.response.error.message,
            "The product with the given id was not found"
        );
        assert_eq!(api_err.response.error.code, Some("NOT_FOUND".to_string()));
    }

    #[test]
    fn test_precondition_failed_maps_to_412() {
        let api_err: ApiError =
            DomainError::precondition_failed("The country already exists in the culinary culture")
                .into();

        assert_eq!(api_err.status, StatusCode::PRECONDITION_FAILED);
        assert_eq!(
            api_err.response.error.error_type,
            ApiErrorType::PreconditionFailedError
        );
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("x"), StatusCode::BAD_REQUEST),
            (DomainError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::cache("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (domain_err, status) in cases {
            assert_eq!(ApiError::from(domain_err).status, status);
        }
    }

    #[test]
    fn test_error_serialization() {
        let err = ApiError::precondition_failed("not associated").with_code("PRECONDITION_FAILED");
        let json = serde_json::to_value(&err.response).unwrap();

        assert_eq!(json["error"]["type"], "precondition_failed_error");
        assert_eq!(json["error"]["message"], "not associated");
        assert_eq!(json["error"]["code"], "PRECONDITION_FAILED");
    }
}

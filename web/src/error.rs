use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use domain::error::{DomainErrorKind, EntityErrorKind, Error as DomainError, InternalErrorKind};

extern crate log;

pub type Result<T> = core::result::Result<T, Error>;

/// Every failure a handler or extractor can answer with.
#[derive(Debug)]
pub enum Error {
    Domain(DomainError),
    /// Malformed or out-of-range request input (query, path or JSON body).
    Validation { message: String, details: Value },
    NotFound(String),
    MethodNotAllowed(String),
    ServiceUnavailable(String),
    Internal { message: String, details: Value },
}

impl Error {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Error::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Error::Internal {
            message: message.into(),
            details,
        }
    }

    /// The status code, error type and client-safe message, plus technical details.
    pub(crate) fn into_report(self) -> ErrorReport {
        let (status, kind, message, details) = match self {
            Error::Domain(err) => {
                let details = json!({ "reason": err.to_string() });
                let (status, kind, message) = match err.error_kind {
                    DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)) => {
                        match entity_error_kind {
                            EntityErrorKind::NotFound => (
                                StatusCode::NOT_FOUND,
                                ErrorType::NotFound,
                                "Resource not found".to_string(),
                            ),
                            EntityErrorKind::InvalidSortField(field) => (
                                StatusCode::BAD_REQUEST,
                                ErrorType::BadRequest,
                                format!("Invalid sort_by field: {field}"),
                            ),
                            EntityErrorKind::Conflict => (
                                StatusCode::CONFLICT,
                                ErrorType::Conflict,
                                "The resource was modified by another request; reload it and retry"
                                    .to_string(),
                            ),
                            EntityErrorKind::DbTransaction => (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                ErrorType::DatabaseError,
                                "A database error occurred".to_string(),
                            ),
                        }
                    }
                };
                (status, kind, message, Some(details))
            }
            Error::Validation { message, details } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorType::ValidationError,
                message,
                Some(details),
            ),
            Error::NotFound(message) => (StatusCode::NOT_FOUND, ErrorType::NotFound, message, None),
            Error::MethodNotAllowed(message) => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorType::MethodNotAllowed,
                message,
                None,
            ),
            Error::ServiceUnavailable(message) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorType::ServiceUnavailable,
                message,
                None,
            ),
            Error::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorType::InternalError,
                message,
                Some(details),
            ),
        };

        ErrorReport {
            status,
            body: ErrorBody {
                kind,
                message,
                details,
            },
        }
    }
}

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    ValidationError,
    BadRequest,
    NotFound,
    MethodNotAllowed,
    Conflict,
    DatabaseError,
    ServiceUnavailable,
    InternalError,
}

#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    #[serde(rename = "type")]
    pub kind: ErrorType,
    pub message: String,
    pub details: Option<Value>,
}

/// A rendered error kept in the response extensions so that the error-details
/// middleware can log it and decide whether the client may see `details`.
#[derive(Clone, Debug)]
pub struct ErrorReport {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl ErrorReport {
    /// Renders the `{"error": {...}}` envelope, with or without technical details.
    pub fn render(&self, with_details: bool) -> Response {
        let mut body = self.body.clone();
        if !with_details {
            body.details = None;
        }
        (self.status, Json(json!({ "error": body }))).into_response()
    }
}

// List of possible StatusCode variants https://docs.rs/http/latest/http/status/struct.StatusCode.html#associatedconstant.UNPROCESSABLE_ENTITY
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let report = self.into_report();
        // Details are withheld until the middleware has checked the environment.
        let mut response = report.render(false);
        response.extensions_mut().insert(report);
        response
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self::Domain(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::error::Error as DomainError;

    fn domain_error(entity_error_kind: EntityErrorKind) -> Error {
        Error::Domain(DomainError {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Entity(entity_error_kind)),
        })
    }

    #[test]
    fn domain_errors_map_to_status_and_type() {
        let cases = [
            (EntityErrorKind::NotFound, StatusCode::NOT_FOUND, ErrorType::NotFound),
            (EntityErrorKind::Conflict, StatusCode::CONFLICT, ErrorType::Conflict),
            (
                EntityErrorKind::DbTransaction,
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorType::DatabaseError,
            ),
            (
                EntityErrorKind::InvalidSortField("x".to_string()),
                StatusCode::BAD_REQUEST,
                ErrorType::BadRequest,
            ),
        ];

        for (entity_error_kind, status, kind) in cases {
            let report = domain_error(entity_error_kind).into_report();
            assert_eq!(report.status, status);
            assert_eq!(report.body.kind, kind);
        }
    }

    #[test]
    fn invalid_sort_field_message_names_the_field() {
        let report = domain_error(EntityErrorKind::InvalidSortField("nope".to_string())).into_report();
        assert_eq!(report.body.message, "Invalid sort_by field: nope");
    }

    #[tokio::test]
    async fn responses_carry_the_envelope_without_details() {
        let response = Error::validation("limit must be between 1 and 100", json!(["limit"]))
            .into_response();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(response.extensions().get::<ErrorReport>().is_some());

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&body_bytes).unwrap();
        assert_eq!(
            body,
            json!({"error": {
                "type": "validation_error",
                "message": "limit must be between 1 and 100",
                "details": null
            }})
        );
    }
}

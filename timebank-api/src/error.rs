/// Error handling for the API server
///
/// A unified error type that maps to HTTP responses. Handlers return
/// `Result<T, ApiError>`, which converts to a status code plus a JSON body
/// carrying a summary message and a list of detail strings.
///
/// Status mapping: `NotFound` → 404; `CapacityViolation`,
/// `ReferentialConflict`, `DuplicateKey` and request validation → 400;
/// everything unexpected → 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
///
/// Validation failures carry a summary message plus one or more detail
/// strings, so several rule violations can be reported together.
#[derive(Debug)]
pub enum ApiError {
    /// Lookup by id or key failed (404)
    NotFound { message: String, details: Vec<String> },

    /// Requested capacity is below already-consumed hours (400)
    CapacityViolation { message: String, details: Vec<String> },

    /// Delete blocked by a dependent record (400)
    ReferentialConflict { message: String, details: Vec<String> },

    /// Uniqueness constraint violated on create (400)
    DuplicateKey { message: String, details: Vec<String> },

    /// Request body failed field validation (400)
    Validation { message: String, details: Vec<String> },

    /// Internal server error (500)
    Internal(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "not_found", "capacity_violation")
    pub error: String,

    /// Human-readable summary message
    pub message: String,

    /// Detail strings, one per rule violation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl ApiError {
    /// Builds a `NotFound` with a single detail string
    pub fn not_found(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            details: vec![detail.into()],
        }
    }

    /// Builds a `ReferentialConflict` with a single detail string
    pub fn referential_conflict(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::ReferentialConflict {
            message: message.into(),
            details: vec![detail.into()],
        }
    }

    /// Builds a `DuplicateKey` with a single detail string
    pub fn duplicate_key(message: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::DuplicateKey {
            message: message.into(),
            details: vec![detail.into()],
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound { message, .. } => write!(f, "Not found: {}", message),
            ApiError::CapacityViolation { message, .. } => {
                write!(f, "Capacity violation: {}", message)
            }
            ApiError::ReferentialConflict { message, .. } => {
                write!(f, "Referential conflict: {}", message)
            }
            ApiError::DuplicateKey { message, .. } => write!(f, "Duplicate key: {}", message),
            ApiError::Validation { details, .. } => {
                write!(f, "Validation failed: {} errors", details.len())
            }
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, Some(details))
            }
            ApiError::CapacityViolation { message, details } => (
                StatusCode::BAD_REQUEST,
                "capacity_violation",
                message,
                Some(details),
            ),
            ApiError::ReferentialConflict { message, details } => (
                StatusCode::BAD_REQUEST,
                "referential_conflict",
                message,
                Some(details),
            ),
            ApiError::DuplicateKey { message, details } => (
                StatusCode::BAD_REQUEST,
                "duplicate_key",
                message,
                Some(details),
            ),
            ApiError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                Some(details),
            ),
            ApiError::Internal(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// A unique-constraint violation on the email column can still surface from
/// the database when two creates race past the existence check; it maps to
/// the same duplicate-key failure the check would have produced.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    if constraint.contains("email") {
                        return ApiError::duplicate_key(
                            "Failed to save user",
                            "Email already exists",
                        );
                    }
                }
                ApiError::Internal(format!("Database error: {}", db_err))
            }
            _ => ApiError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert password hashing errors to API errors
impl From<timebank_shared::auth::password::PasswordError> for ApiError {
    fn from(err: timebank_shared::auth::password::PasswordError) -> Self {
        ApiError::Internal(format!("Password operation failed: {}", err))
    }
}

/// Validates a request DTO, flattening field errors into detail strings
pub fn validate_request<T: validator::Validate>(req: &T) -> Result<(), ApiError> {
    req.validate().map_err(|e| {
        let details: Vec<String> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "invalid value".to_string());
                    format!("{}: {}", field, message)
                })
            })
            .collect();

        ApiError::Validation {
            message: "Request validation failed".to_string(),
            details,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("Failed to fetch user", "User not found");
        assert_eq!(err.to_string(), "Not found: Failed to fetch user");

        let err = ApiError::Internal("boom".to_string());
        assert_eq!(err.to_string(), "Internal error: boom");
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (
                ApiError::not_found("Failed to fetch user", "User not found"),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::CapacityViolation {
                    message: "Failed to update hour bag".to_string(),
                    details: vec!["consumed hours exceed requested capacity".to_string()],
                },
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::referential_conflict(
                    "Failed to delete hour bag",
                    "hour bag has dependent activities",
                ),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::duplicate_key("Failed to save user", "user already exists"),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_carries_detail_list() {
        let err = ApiError::CapacityViolation {
            message: "Failed to update hour bag".to_string(),
            details: vec![
                "consumed hours exceed requested capacity".to_string(),
                "second violation".to_string(),
            ],
        };

        match err {
            ApiError::CapacityViolation { details, .. } => assert_eq!(details.len(), 2),
            _ => panic!("Expected capacity violation"),
        }
    }

    #[test]
    fn test_validate_request_collects_field_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct Dto {
            #[validate(email(message = "Invalid email format"))]
            email: String,

            #[validate(length(min = 1, message = "Name must not be empty"))]
            name: String,
        }

        let dto = Dto {
            email: "not-an-email".to_string(),
            name: String::new(),
        };

        let err = validate_request(&dto).unwrap_err();
        match err {
            ApiError::Validation { details, .. } => {
                assert_eq!(details.len(), 2);
                assert!(details.iter().any(|d| d.contains("Invalid email format")));
                assert!(details.iter().any(|d| d.contains("Name must not be empty")));
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}

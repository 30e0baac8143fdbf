//! Typed error handling for the employee directory
//!
//! The query engine itself never fails on bad data: malformed values become
//! NaN and unknown filters are ignored. The errors below cover the edges of
//! the system instead.
//!
//! # Error Categories
//!
//! - [`RequestError`]: malformed query-string input rejected by the HTTP facade
//! - [`ExportError`]: the export attachment could not be encoded
//! - [`LoadError`]: the dataset file could not be read or parsed; logged at
//!   startup and never surfaced as a response
//!
//! # Example
//!
//! ```rust,ignore
//! match params.filters() {
//!     Ok(filters) => {
//!         directory.get_employees(order_by, sort_mode, page, limit, filters.as_deref())
//!     }
//!     Err(e) => return DirectoryError::from(e).into_response(),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// The main error type of the directory service
#[derive(Debug)]
pub enum DirectoryError {
    /// Invalid request input
    Request(RequestError),

    /// Export encoding errors
    Export(ExportError),
}

impl fmt::Display for DirectoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirectoryError::Request(e) => write!(f, "{}", e),
            DirectoryError::Export(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for DirectoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DirectoryError::Request(e) => Some(e),
            DirectoryError::Export(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl DirectoryError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            DirectoryError::Request(e) => e.status_code(),
            DirectoryError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::Request(e) => e.error_code(),
            DirectoryError::Export(_) => "EXPORT_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            DirectoryError::Request(RequestError::InvalidFilters { .. }) => {
                Some(serde_json::json!({ "parameter": "filters" }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors caused by malformed request input
#[derive(Debug, Clone, PartialEq)]
pub enum RequestError {
    /// The `filters` parameter is not a valid JSON array of filters
    InvalidFilters { message: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidFilters { message } => {
                write!(f, "Invalid filters parameter: {}", message)
            }
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidFilters { .. } => "INVALID_FILTERS",
        }
    }
}

impl From<RequestError> for DirectoryError {
    fn from(err: RequestError) -> Self {
        DirectoryError::Request(err)
    }
}

// =============================================================================
// Load Errors
// =============================================================================

/// Errors raised while reading the dataset file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed record on line {line}: expected 11 fields, found {fields}")]
    MalformedLine { line: usize, fields: usize },
}

// =============================================================================
// Export Errors
// =============================================================================

/// Errors raised while encoding an export attachment
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to encode export row: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write export workbook: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("failed to flush export buffer: {0}")]
    Buffer(String),
}

impl From<ExportError> for DirectoryError {
    fn from(err: ExportError) -> Self {
        DirectoryError::Export(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_error_display() {
        let err = RequestError::InvalidFilters {
            message: "expected value".to_string(),
        };
        assert!(err.to_string().contains("filters"));
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn test_request_error_is_bad_request() {
        let err = DirectoryError::from(RequestError::InvalidFilters {
            message: "eof".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "INVALID_FILTERS");
    }

    #[test]
    fn test_load_error_display() {
        let err = LoadError::MalformedLine { line: 3, fields: 4 };
        assert!(err.to_string().contains("line 3"));
        assert!(err.to_string().contains("found 4"));
    }

    #[test]
    fn test_export_error_is_internal() {
        let err = DirectoryError::from(ExportError::Buffer("closed".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "EXPORT_ERROR");
        assert!(err.to_response().details.is_none());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_error_response_details() {
        let err = DirectoryError::from(RequestError::InvalidFilters {
            message: "trailing characters".to_string(),
        });
        let response = err.to_response();
        assert_eq!(response.code, "INVALID_FILTERS");
        let details = response.details.expect("details");
        assert_eq!(details["parameter"], "filters");
    }

    #[test]
    fn test_into_response_status() {
        let err = DirectoryError::from(RequestError::InvalidFilters {
            message: "eof".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

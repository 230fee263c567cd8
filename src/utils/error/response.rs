//! HTTP response handling for errors

use super::types::AclError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for AclError {
    fn status_code(&self) -> StatusCode {
        match self {
            AclError::NotFound(_) => StatusCode::NOT_FOUND,
            AclError::ConcurrentModification(_) | AclError::Conflict(_) => StatusCode::CONFLICT,
            AclError::Authorization(_) => StatusCode::FORBIDDEN,
            AclError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AclError::Validation(_) | AclError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AclError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
            AclError::Config(_)
            | AclError::Serialization(_)
            | AclError::Yaml(_)
            | AclError::Io(_)
            | AclError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AclError::NotFound(_) => ("NOT_FOUND", self.to_string()),
            AclError::ConcurrentModification(_) => ("CONCURRENT_MODIFICATION", self.to_string()),
            AclError::Conflict(_) => ("CONFLICT", self.to_string()),
            AclError::Authorization(_) => ("AUTHORIZATION_ERROR", self.to_string()),
            AclError::Unauthorized(_) => ("UNAUTHORIZED", self.to_string()),
            AclError::Validation(_) => ("VALIDATION_ERROR", self.to_string()),
            AclError::BadRequest(_) => ("BAD_REQUEST", self.to_string()),
            AclError::Persistence(_) => (
                "PERSISTENCE_ERROR",
                "ACL store operation failed".to_string(),
            ),
            AclError::Config(_) => ("CONFIG_ERROR", self.to_string()),
            _ => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

//! Error taxonomy for the HTTP API.
//!
//! Client-facing messages stay short and non-technical; the detailed cause
//! is logged at the point of failure with `log::error!` and never put in a
//! response body.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use common::requests::ApiMessage;
use common::validation::FieldErrors;
use thiserror::Error;

/// Failures of the registrations service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The payload failed schema validation. 400 with the joined per-field
    /// messages; nothing is persisted.
    #[error("{0}")]
    Validation(FieldErrors),
    /// Lookup by an unknown id.
    #[error("Registration not found")]
    NotFound,
    /// Any unhandled persistence failure. The string is the generic
    /// client-facing message; the cause was already logged.
    #[error("{0}")]
    Internal(&'static str),
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            // Per-field detail rides along so the form can mark the exact
            // inputs that failed; `message` stays the human-readable line.
            ApiError::Validation(errors) => {
                HttpResponse::build(self.status_code()).json(serde_json::json!({
                    "message": errors.message(),
                    "errors": errors,
                }))
            }
            _ => HttpResponse::build(self.status_code()).json(ApiMessage {
                message: self.to_string(),
            }),
        }
    }
}

/// Failures of the proof upload adapter. The first three are user-correctable
/// and checked before any network call is made.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("No file was attached.")]
    MissingFile,
    #[error("Unsupported file type. Please upload an image or a PDF.")]
    WrongType,
    #[error("File too large. Please upload a file under {0} MB.")]
    TooLarge(usize),
    /// The multipart stream itself was unreadable.
    #[error("Could not read the uploaded file.")]
    Malformed,
    /// The file host answered with a non-success status. Carries the status
    /// and a bounded excerpt of the host's error body.
    #[error("Upload failed: {status} {snippet}")]
    Transport { status: u16, snippet: String },
    /// The request never produced a host response. No retry is attempted;
    /// the user resubmits manually.
    #[error("Could not reach the file host. Please try again.")]
    Network,
    /// The host accepted the file but returned no download URL; treated as a
    /// failure rather than storing a registration with no usable proof link.
    #[error("Upload succeeded but no download link was returned.")]
    MissingLink,
}

impl actix_web::ResponseError for UploadError {
    fn status_code(&self) -> StatusCode {
        match self {
            UploadError::MissingFile
            | UploadError::WrongType
            | UploadError::TooLarge(_)
            | UploadError::Malformed => StatusCode::BAD_REQUEST,
            UploadError::Transport { .. } | UploadError::Network | UploadError::MissingLink => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ApiMessage {
            message: self.to_string(),
        })
    }
}

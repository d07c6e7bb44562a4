use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::fmt;

use crate::application::invoice::{ActionError, ActionMessage, FormErrors};
use crate::domain::invoice::InvoiceError;

use super::dtos::{ErrorResponse, ValidationFailureResponse};

/// API error type that maps application errors to HTTP responses
#[derive(Debug)]
pub enum ApiError {
  /// Rejected form (422 Unprocessable Entity)
  Validation { message: String, errors: FormErrors },

  /// Failed write, reported with its fixed message (404 or 500)
  Action { message: String, not_found: bool },

  /// Malformed query or path (400 Bad Request)
  BadRequest(String),

  /// Missing invoice on a read (404 Not Found)
  NotFound(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation { message, errors } => write!(f, "{} ({})", message, errors),
      ApiError::Action { message, .. } => write!(f, "{}", message),
      ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Action {
        not_found: true, ..
      } => StatusCode::NOT_FOUND,
      ApiError::Action { .. } => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let mut response = HttpResponse::build(self.status_code());
    response.content_type(ContentType::json());

    match self {
      ApiError::Validation { message, errors } => response.json(ValidationFailureResponse {
        message: message.clone(),
        errors: errors.clone(),
      }),
      ApiError::Action { message, .. } => response.json(ActionMessage::new(message.clone())),
      ApiError::BadRequest(msg) => response.json(ErrorResponse {
        error: "bad_request".to_string(),
        message: msg.clone(),
      }),
      ApiError::NotFound(msg) => response.json(ErrorResponse {
        error: "not_found".to_string(),
        message: msg.clone(),
      }),
      ApiError::Internal(msg) => {
        // Don't expose internal error details
        tracing::error!("Internal error: {}", msg);
        response.json(ErrorResponse {
          error: "internal_error".to_string(),
          message: "An internal server error occurred".to_string(),
        })
      }
    }
  }
}

/// Convert ActionError to ApiError
impl From<ActionError> for ApiError {
  fn from(error: ActionError) -> Self {
    let message = error.to_string();
    match error {
      ActionError::Validation { errors, .. } => ApiError::Validation { message, errors },
      ActionError::Persistence { source, .. } => ApiError::Action {
        message,
        not_found: source.is_not_found() || matches!(source, InvoiceError::Validation(_)),
      },
    }
  }
}

/// Convert InvoiceError from read paths to ApiError
impl From<InvoiceError> for ApiError {
  fn from(error: InvoiceError) -> Self {
    match error {
      InvoiceError::InvoiceNotFound(id) => ApiError::NotFound(format!("Invoice {} not found", id)),
      InvoiceError::Validation(e) => ApiError::BadRequest(e.to_string()),
      other => ApiError::Internal(other.to_string()),
    }
  }
}

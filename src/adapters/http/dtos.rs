use serde::Serialize;

use crate::application::invoice::FormErrors;

/// Error body for failures that are not form actions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
  /// Machine-readable error type
  pub error: String,

  /// Human-readable message
  pub message: String,
}

/// Body of a rejected invoice form
#[derive(Debug, Clone, Serialize)]
pub struct ValidationFailureResponse {
  pub message: String,

  /// Messages per form field, e.g. `{"status": ["Please select an invoice status."]}`
  pub errors: FormErrors,
}

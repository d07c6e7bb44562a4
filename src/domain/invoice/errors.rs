use super::value_objects::{InvoiceId, ValueObjectError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InvoiceError {
  #[error("Validation error: {0}")]
  Validation(#[from] ValueObjectError),

  #[error("Invoice not found: {0}")]
  InvoiceNotFound(InvoiceId),

  #[error("Store unavailable: {0}")]
  Unavailable(String),

  #[error("Repository error: {0}")]
  Repository(String),

  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),
}

impl InvoiceError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, InvoiceError::InvoiceNotFound(_))
  }
}

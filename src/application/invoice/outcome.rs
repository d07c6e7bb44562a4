use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::invoice::{InvoiceError, PageCache};

use super::form::FormErrors;

/// Listing page that every invoice action refreshes and returns to
pub const INVOICES_PATH: &str = "/dashboard/invoices";

/// Message payload returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionMessage {
  pub message: String,
}

impl ActionMessage {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

/// Result of a successful form action
///
/// Navigation is a value: the HTTP layer decides how to send the browser to
/// `Redirect` targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
  Redirect(String),
  Message(ActionMessage),
}

impl ActionOutcome {
  pub fn redirect(path: impl Into<String>) -> Self {
    ActionOutcome::Redirect(path.into())
  }

  pub fn message(message: impl Into<String>) -> Self {
    ActionOutcome::Message(ActionMessage::new(message))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceAction {
  Create,
  Update,
  Delete,
}

impl InvoiceAction {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceAction::Create => "create",
      InvoiceAction::Update => "update",
      InvoiceAction::Delete => "delete",
    }
  }

  /// Fixed message for any failed write, whatever the cause
  pub fn failure_message(&self) -> &'static str {
    match self {
      InvoiceAction::Create => "Database Error: Failed to Create Invoice.",
      InvoiceAction::Update => "Database Error: Failed to Update Invoice.",
      InvoiceAction::Delete => "Database Error: Failed to Delete Invoice.",
    }
  }

  pub fn validation_message(&self) -> &'static str {
    match self {
      InvoiceAction::Create => "Missing Fields. Failed to Create Invoice.",
      InvoiceAction::Update => "Missing Fields. Failed to Update Invoice.",
      InvoiceAction::Delete => "Invalid Request. Failed to Delete Invoice.",
    }
  }
}

#[derive(Debug, Error)]
pub enum ActionError {
  /// The form was rejected before anything was written
  #[error("{}", .action.validation_message())]
  Validation {
    action: InvoiceAction,
    errors: FormErrors,
  },

  /// The write failed; nothing was invalidated
  #[error("{}", .action.failure_message())]
  Persistence {
    action: InvoiceAction,
    #[source]
    source: InvoiceError,
  },
}

impl ActionError {
  pub fn validation(action: InvoiceAction, errors: FormErrors) -> Self {
    tracing::debug!(action = action.as_str(), %errors, "Invoice form rejected");
    ActionError::Validation { action, errors }
  }

  /// Logs the underlying cause; callers only ever see the fixed message.
  pub fn persistence(action: InvoiceAction, source: InvoiceError) -> Self {
    tracing::error!(action = action.as_str(), error = %source, "Failed to write invoice");
    ActionError::Persistence { action, source }
  }

  pub fn action(&self) -> InvoiceAction {
    match self {
      ActionError::Validation { action, .. } | ActionError::Persistence { action, .. } => *action,
    }
  }

  pub fn to_message(&self) -> ActionMessage {
    ActionMessage::new(self.to_string())
  }
}

/// Marks `path` stale. A cache failure is logged and swallowed, since the
/// write it follows has already succeeded.
pub async fn revalidate_path(page_cache: &dyn PageCache, path: &str) {
  if let Err(e) = page_cache.invalidate(path).await {
    tracing::warn!(path, error = %e, "Failed to invalidate page cache");
  }
}

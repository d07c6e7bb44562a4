use std::sync::Arc;

use crate::domain::invoice::{InvoiceId, InvoiceService, PageCache};

use super::outcome::{
  ActionError, ActionOutcome, INVOICES_PATH, InvoiceAction, revalidate_path,
};

pub const DELETED_MESSAGE: &str = "Deleted Invoice.";

#[derive(Debug)]
pub struct DeleteInvoiceCommand {
  pub invoice_id: String,
}

pub struct DeleteInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  page_cache: Arc<dyn PageCache>,
}

impl DeleteInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_service,
      page_cache,
    }
  }

  /// Removes the invoice and refreshes the listing in place; no redirect.
  pub async fn execute(&self, command: DeleteInvoiceCommand) -> Result<ActionOutcome, ActionError> {
    let invoice_id = InvoiceId::new(command.invoice_id)
      .map_err(|e| ActionError::persistence(InvoiceAction::Delete, e.into()))?;

    self
      .invoice_service
      .delete_invoice(&invoice_id)
      .await
      .map_err(|e| ActionError::persistence(InvoiceAction::Delete, e))?;

    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    Ok(ActionOutcome::message(DELETED_MESSAGE))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::fixture;
  use crate::domain::invoice::InvoiceRepository;

  fn command(id: &str) -> DeleteInvoiceCommand {
    DeleteInvoiceCommand {
      invoice_id: id.to_string(),
    }
  }

  #[tokio::test]
  async fn test_delete_invoice() {
    let fx = fixture().await;
    let use_case = DeleteInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let outcome = use_case.execute(command("inv_1")).await.unwrap();

    assert_eq!(outcome, ActionOutcome::message("Deleted Invoice."));
    assert!(fx.repo.is_empty());
    assert!(!fx.cache.contains(INVOICES_PATH));
  }

  #[tokio::test]
  async fn test_second_delete_reports_failure() {
    let fx = fixture().await;
    let use_case = DeleteInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    use_case.execute(command("inv_1")).await.unwrap();
    let error = use_case.execute(command("inv_1")).await.unwrap_err();

    assert_eq!(
      error.to_message().message,
      "Database Error: Failed to Delete Invoice."
    );
  }

  #[tokio::test]
  async fn test_unavailable_store_keeps_cache() {
    let fx = fixture().await;
    fx.repo.set_available(false);
    let use_case = DeleteInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let error = use_case.execute(command("inv_1")).await.unwrap_err();

    assert_eq!(
      error.to_message().message,
      "Database Error: Failed to Delete Invoice."
    );
    assert!(fx.cache.contains(INVOICES_PATH));

    fx.repo.set_available(true);
    let id = InvoiceId::new("inv_1").unwrap();
    assert!(fx.repo.find_by_id(&id).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_blank_id_is_rejected() {
    let fx = fixture().await;
    let use_case = DeleteInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let error = use_case.execute(command("  ")).await.unwrap_err();

    assert!(matches!(error, ActionError::Persistence { .. }));
    assert_eq!(fx.repo.len(), 1);
  }
}

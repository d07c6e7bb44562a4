use std::sync::Arc;

use crate::domain::invoice::{InvoiceData, InvoiceId, InvoiceService, PageCache};

use super::form::{InvoiceFormInput, UPDATE_INVOICE_SCHEMA};
use super::outcome::{
  ActionError, ActionOutcome, INVOICES_PATH, InvoiceAction, revalidate_path,
};

#[derive(Debug)]
pub struct UpdateInvoiceCommand {
  pub invoice_id: String,
  pub form: InvoiceFormInput,
}

pub struct UpdateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  page_cache: Arc<dyn PageCache>,
}

impl UpdateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_service,
      page_cache,
    }
  }

  /// Replaces customer, amount and status of an existing invoice. The
  /// redirect is only returned once the write is confirmed.
  pub async fn execute(&self, command: UpdateInvoiceCommand) -> Result<ActionOutcome, ActionError> {
    let form = UPDATE_INVOICE_SCHEMA
      .parse(&command.form)
      .map_err(|errors| ActionError::validation(InvoiceAction::Update, errors))?;

    let invoice_id = InvoiceId::new(command.invoice_id)
      .map_err(|e| ActionError::persistence(InvoiceAction::Update, e.into()))?;

    self
      .invoice_service
      .update_invoice(
        &invoice_id,
        InvoiceData {
          customer_id: form.customer_id,
          amount: form.amount_in_cents,
          status: form.status,
        },
      )
      .await
      .map_err(|e| ActionError::persistence(InvoiceAction::Update, e))?;

    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    Ok(ActionOutcome::redirect(INVOICES_PATH))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{fixture, form, seeded_date};
  use crate::domain::invoice::{InvoiceError, InvoiceRepository, InvoiceStatus};

  fn command(id: &str, customer: &str, amount: &str, status: &str) -> UpdateInvoiceCommand {
    UpdateInvoiceCommand {
      invoice_id: id.to_string(),
      form: form(customer, amount, status),
    }
  }

  #[tokio::test]
  async fn test_update_invoice_keeps_date() {
    let fx = fixture().await;
    let use_case = UpdateInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let outcome = use_case
      .execute(command("inv_1", "cust_2", "10", "paid"))
      .await
      .unwrap();

    assert_eq!(outcome, ActionOutcome::redirect(INVOICES_PATH));
    assert!(!fx.cache.contains(INVOICES_PATH));

    let id = InvoiceId::new("inv_1").unwrap();
    let invoice = fx.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id.value(), "cust_2");
    assert_eq!(invoice.amount.value(), 1000);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
    assert_eq!(invoice.date, seeded_date());
  }

  #[tokio::test]
  async fn test_update_missing_invoice_fails_without_redirect() {
    let fx = fixture().await;
    let use_case = UpdateInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let error = use_case
      .execute(command("inv_404", "cust_2", "10", "paid"))
      .await
      .unwrap_err();

    assert!(matches!(
      error,
      ActionError::Persistence {
        source: InvoiceError::InvoiceNotFound(_),
        ..
      }
    ));
    assert_eq!(
      error.to_message().message,
      "Database Error: Failed to Update Invoice."
    );
    assert!(fx.cache.contains(INVOICES_PATH));
  }

  #[tokio::test]
  async fn test_invalid_form_leaves_row_untouched() {
    let fx = fixture().await;
    let use_case = UpdateInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let error = use_case
      .execute(command("inv_1", "cust_2", "abc", "paid"))
      .await
      .unwrap_err();

    assert!(matches!(error, ActionError::Validation { .. }));
    let id = InvoiceId::new("inv_1").unwrap();
    let invoice = fx.repo.find_by_id(&id).await.unwrap().unwrap();
    assert_eq!(invoice.customer_id.value(), "cust_1");
    assert_eq!(invoice.amount.value(), 4250);
  }

  #[tokio::test]
  async fn test_unavailable_store() {
    let fx = fixture().await;
    fx.repo.set_available(false);
    let use_case = UpdateInvoiceUseCase::new(fx.service.clone(), fx.cache.clone());

    let error = use_case
      .execute(command("inv_1", "cust_2", "10", "paid"))
      .await
      .unwrap_err();

    assert_eq!(
      error.to_message().message,
      "Database Error: Failed to Update Invoice."
    );
    assert!(fx.cache.contains(INVOICES_PATH));
  }
}

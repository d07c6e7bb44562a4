use std::sync::Arc;

use crate::domain::invoice::{InvoiceData, InvoiceService, PageCache};

use super::form::{CREATE_INVOICE_SCHEMA, InvoiceFormInput};
use super::outcome::{
  ActionError, ActionOutcome, INVOICES_PATH, InvoiceAction, revalidate_path,
};

#[derive(Debug)]
pub struct CreateInvoiceCommand {
  pub form: InvoiceFormInput,
}

pub struct CreateInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
  page_cache: Arc<dyn PageCache>,
}

impl CreateInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_service,
      page_cache,
    }
  }

  /// Validates the form, inserts the invoice dated today, then refreshes the
  /// listing and redirects to it.
  pub async fn execute(&self, command: CreateInvoiceCommand) -> Result<ActionOutcome, ActionError> {
    let form = CREATE_INVOICE_SCHEMA
      .parse(&command.form)
      .map_err(|errors| ActionError::validation(InvoiceAction::Create, errors))?;

    self
      .invoice_service
      .create_invoice(InvoiceData {
        customer_id: form.customer_id,
        amount: form.amount_in_cents,
        status: form.status,
      })
      .await
      .map_err(|e| ActionError::persistence(InvoiceAction::Create, e))?;

    revalidate_path(self.page_cache.as_ref(), INVOICES_PATH).await;
    Ok(ActionOutcome::redirect(INVOICES_PATH))
  }
}

use serde::Deserialize;
use std::sync::Arc;

use crate::domain::invoice::{InvoiceError, InvoiceId, InvoiceService};

use super::list_invoices::InvoiceListItemDto;

#[derive(Debug, Deserialize)]
pub struct GetInvoiceCommand {
  pub invoice_id: String,
}

/// Data for prefilling the edit form
pub type InvoiceDetailsResponse = InvoiceListItemDto;

pub struct GetInvoiceUseCase {
  invoice_service: Arc<InvoiceService>,
}

impl GetInvoiceUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>) -> Self {
    Self { invoice_service }
  }

  pub async fn execute(
    &self,
    command: GetInvoiceCommand,
  ) -> Result<InvoiceDetailsResponse, InvoiceError> {
    let invoice_id = InvoiceId::new(command.invoice_id)?;
    let invoice = self.invoice_service.get_invoice(&invoice_id).await?;
    Ok(invoice.into())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::invoice::test_support::{fixture, seeded_date};

  #[tokio::test]
  async fn test_get_invoice() {
    let fx = fixture().await;
    let use_case = GetInvoiceUseCase::new(fx.service.clone());

    let invoice = use_case
      .execute(GetInvoiceCommand {
        invoice_id: "inv_1".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(invoice.customer_id, "cust_1");
    assert_eq!(invoice.amount, 4250);
    assert_eq!(invoice.date, seeded_date());
  }

  #[tokio::test]
  async fn test_get_missing_invoice() {
    let fx = fixture().await;
    let use_case = GetInvoiceUseCase::new(fx.service.clone());

    let result = use_case
      .execute(GetInvoiceCommand {
        invoice_id: "nope".to_string(),
      })
      .await;

    assert!(result.unwrap_err().is_not_found());
  }
}

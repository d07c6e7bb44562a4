use std::sync::Arc;

use super::entities::{Invoice, InvoiceChanges, NewInvoice};
use super::errors::InvoiceError;
use super::ports::InvoiceRepository;
use super::value_objects::{AmountInCents, CustomerId, InvoiceId, InvoiceStatus};

/// Invoice creation data
pub struct InvoiceData {
  pub customer_id: CustomerId,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
}

pub struct InvoiceService {
  invoice_repo: Arc<dyn InvoiceRepository>,
}

impl InvoiceService {
  pub fn new(invoice_repo: Arc<dyn InvoiceRepository>) -> Self {
    Self { invoice_repo }
  }

  pub async fn create_invoice(&self, data: InvoiceData) -> Result<Invoice, InvoiceError> {
    let invoice = NewInvoice::new(data.customer_id, data.amount, data.status);
    let invoice = self.invoice_repo.create(invoice).await?;

    tracing::info!(
      invoice_id = %invoice.id,
      customer_id = %invoice.customer_id,
      amount = invoice.amount.value(),
      "Invoice created"
    );

    Ok(invoice)
  }

  pub async fn update_invoice(
    &self,
    invoice_id: &InvoiceId,
    data: InvoiceData,
  ) -> Result<Invoice, InvoiceError> {
    let changes = InvoiceChanges {
      customer_id: data.customer_id,
      amount: data.amount,
      status: data.status,
    };
    let invoice = self.invoice_repo.update(invoice_id, changes).await?;

    tracing::info!(invoice_id = %invoice.id, status = %invoice.status, "Invoice updated");

    Ok(invoice)
  }

  pub async fn delete_invoice(&self, invoice_id: &InvoiceId) -> Result<(), InvoiceError> {
    self.invoice_repo.delete(invoice_id).await?;

    tracing::info!(invoice_id = %invoice_id, "Invoice deleted");

    Ok(())
  }

  pub async fn get_invoice(&self, invoice_id: &InvoiceId) -> Result<Invoice, InvoiceError> {
    self
      .invoice_repo
      .find_by_id(invoice_id)
      .await?
      .ok_or_else(|| InvoiceError::InvoiceNotFound(invoice_id.clone()))
  }

  pub async fn list_invoices(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.invoice_repo.find_all().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::infrastructure::persistence::memory::InMemoryInvoiceRepository;
  use chrono::Utc;

  fn data(customer: &str, cents: i64, status: InvoiceStatus) -> InvoiceData {
    InvoiceData {
      customer_id: CustomerId::new(customer).unwrap(),
      amount: AmountInCents::new(cents),
      status,
    }
  }

  #[tokio::test]
  async fn test_create_invoice_assigns_id_and_today() {
    let repo = Arc::new(InMemoryInvoiceRepository::new());
    let service = InvoiceService::new(repo.clone());

    let invoice = service
      .create_invoice(data("cust_1", 4250, InvoiceStatus::Pending))
      .await
      .unwrap();

    assert!(!invoice.id.value().is_empty());
    assert_eq!(invoice.date, Utc::now().date_naive());
    assert_eq!(service.get_invoice(&invoice.id).await.unwrap(), invoice);
  }

  #[tokio::test]
  async fn test_update_missing_invoice() {
    let service = InvoiceService::new(Arc::new(InMemoryInvoiceRepository::new()));
    let id = InvoiceId::new("missing").unwrap();

    let result = service
      .update_invoice(&id, data("cust_1", 100, InvoiceStatus::Paid))
      .await;

    assert!(matches!(result, Err(InvoiceError::InvoiceNotFound(_))));
  }

  #[tokio::test]
  async fn test_delete_then_get() {
    let service = InvoiceService::new(Arc::new(InMemoryInvoiceRepository::new()));
    let invoice = service
      .create_invoice(data("cust_1", 100, InvoiceStatus::Pending))
      .await
      .unwrap();

    service.delete_invoice(&invoice.id).await.unwrap();

    let result = service.get_invoice(&invoice.id).await;
    assert!(result.unwrap_err().is_not_found());
  }
}

use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::invoice::{
  AmountInCents, CustomerId, Invoice, InvoiceId, InvoiceService, InvoiceStatus,
};
use crate::infrastructure::cache::InMemoryPageCache;
use crate::infrastructure::persistence::InMemoryInvoiceRepository;

use super::form::InvoiceFormInput;
use super::outcome::INVOICES_PATH;

pub struct Fixture {
  pub repo: Arc<InMemoryInvoiceRepository>,
  pub cache: Arc<InMemoryPageCache>,
  pub service: Arc<InvoiceService>,
}

/// Store holding `inv_1`, and a cache with a warm listing page.
pub async fn fixture() -> Fixture {
  use crate::domain::invoice::PageCache;

  let repo = Arc::new(InMemoryInvoiceRepository::new());
  repo.insert(seeded_invoice()).expect("seed invoice");

  let cache = Arc::new(InMemoryPageCache::new());
  cache
    .store(INVOICES_PATH, "[]".to_string())
    .await
    .expect("warm cache");

  let service = Arc::new(InvoiceService::new(repo.clone()));
  Fixture {
    repo,
    cache,
    service,
  }
}

pub fn seeded_date() -> NaiveDate {
  NaiveDate::from_ymd_opt(2023, 12, 6).expect("valid date")
}

pub fn seeded_invoice() -> Invoice {
  Invoice {
    id: InvoiceId::new("inv_1").expect("valid id"),
    customer_id: CustomerId::new("cust_1").expect("valid customer"),
    amount: AmountInCents::new(4250),
    status: InvoiceStatus::Pending,
    date: seeded_date(),
  }
}

pub fn form(customer_id: &str, amount: &str, status: &str) -> InvoiceFormInput {
  InvoiceFormInput {
    customer_id: Some(customer_id.to_string()),
    amount: Some(amount.to_string()),
    status: Some(status.to_string()),
    ..Default::default()
  }
}

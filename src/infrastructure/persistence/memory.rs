//! In-memory invoice store for development and tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::invoice::{
  Invoice, InvoiceChanges, InvoiceError, InvoiceId, InvoiceRepository, NewInvoice,
};

/// In-memory invoice repository
///
/// Ids are generated as UUID v4 strings, the same shape the Postgres
/// migration produces. `set_available(false)` makes every call fail with
/// `InvoiceError::Unavailable`, which stands in for a database outage.
pub struct InMemoryInvoiceRepository {
  invoices: RwLock<HashMap<String, Invoice>>,
  available: AtomicBool,
}

impl InMemoryInvoiceRepository {
  pub fn new() -> Self {
    Self {
      invoices: RwLock::new(HashMap::new()),
      available: AtomicBool::new(true),
    }
  }

  /// Stores an invoice as-is, keeping its id and date.
  pub fn insert(&self, invoice: Invoice) -> Result<(), InvoiceError> {
    self.ensure_available()?;
    let mut invoices = self
      .invoices
      .write()
      .map_err(|e| InvoiceError::Repository(format!("Failed to acquire write lock: {}", e)))?;
    invoices.insert(invoice.id.value().to_string(), invoice);
    Ok(())
  }

  pub fn set_available(&self, available: bool) {
    self.available.store(available, Ordering::SeqCst);
  }

  pub fn len(&self) -> usize {
    self.invoices.read().map(|i| i.len()).unwrap_or_default()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn ensure_available(&self) -> Result<(), InvoiceError> {
    if self.available.load(Ordering::SeqCst) {
      Ok(())
    } else {
      Err(InvoiceError::Unavailable(
        "in-memory store is switched off".to_string(),
      ))
    }
  }
}

impl Default for InMemoryInvoiceRepository {
  fn default() -> Self {
    Self::new()
  }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let id = InvoiceId::new(Uuid::new_v4().to_string())?;
    let invoice = invoice.into_invoice(id);
    self.insert(invoice.clone())?;
    Ok(invoice)
  }

  async fn update(
    &self,
    id: &InvoiceId,
    changes: InvoiceChanges,
  ) -> Result<Invoice, InvoiceError> {
    self.ensure_available()?;
    let mut invoices = self
      .invoices
      .write()
      .map_err(|e| InvoiceError::Repository(format!("Failed to acquire write lock: {}", e)))?;

    let invoice = invoices
      .get_mut(id.value())
      .ok_or_else(|| InvoiceError::InvoiceNotFound(id.clone()))?;
    invoice.apply(changes);

    Ok(invoice.clone())
  }

  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    self.ensure_available()?;
    let mut invoices = self
      .invoices
      .write()
      .map_err(|e| InvoiceError::Repository(format!("Failed to acquire write lock: {}", e)))?;

    invoices
      .remove(id.value())
      .map(|_| ())
      .ok_or_else(|| InvoiceError::InvoiceNotFound(id.clone()))
  }

  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
    self.ensure_available()?;
    let invoices = self
      .invoices
      .read()
      .map_err(|e| InvoiceError::Repository(format!("Failed to acquire read lock: {}", e)))?;

    Ok(invoices.get(id.value()).cloned())
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    self.ensure_available()?;
    let invoices = self
      .invoices
      .read()
      .map_err(|e| InvoiceError::Repository(format!("Failed to acquire read lock: {}", e)))?;

    let mut all: Vec<Invoice> = invoices.values().cloned().collect();
    all.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.value().cmp(b.id.value())));
    Ok(all)
  }
}

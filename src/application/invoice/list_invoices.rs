use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::invoice::{Invoice, InvoiceError, InvoiceService, InvoiceStatus, PageCache};

use super::outcome::INVOICES_PATH;

#[derive(Debug, Default, Deserialize)]
pub struct ListInvoicesCommand {
  pub status_filter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceListItemDto {
  pub id: String,
  pub customer_id: String,
  /// Cents
  pub amount: i64,
  pub amount_units: Decimal,
  pub status: String,
  pub date: NaiveDate,
}

impl From<Invoice> for InvoiceListItemDto {
  fn from(invoice: Invoice) -> Self {
    Self {
      amount: invoice.amount.value(),
      amount_units: invoice.amount.to_units(),
      status: invoice.status.as_str().to_string(),
      date: invoice.date,
      id: invoice.id.into_inner(),
      customer_id: invoice.customer_id.into_inner(),
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListInvoicesResponse {
  pub invoices: Vec<InvoiceListItemDto>,
}

/// Serialized listing, ready to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceListPage {
  pub body: String,
  pub cache_hit: bool,
}

pub struct ListInvoicesUseCase {
  invoice_service: Arc<InvoiceService>,
  page_cache: Arc<dyn PageCache>,
}

impl ListInvoicesUseCase {
  pub fn new(invoice_service: Arc<InvoiceService>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      invoice_service,
      page_cache,
    }
  }

  /// The unfiltered listing is read through the page cache under
  /// `INVOICES_PATH`; filtered listings always go to the store.
  pub async fn execute(&self, command: ListInvoicesCommand) -> Result<InvoiceListPage, InvoiceError> {
    let status_filter = command
      .status_filter
      .as_deref()
      .map(InvoiceStatus::from_str)
      .transpose()?;

    // Generation seen before querying; `None` means the page is not cached.
    let mut generation = None;
    if status_filter.is_none() {
      match self.page_cache.get(INVOICES_PATH).await {
        Ok(Some(body)) => {
          return Ok(InvoiceListPage {
            body,
            cache_hit: true,
          });
        }
        Ok(None) => {}
        Err(e) => tracing::warn!(error = %e, "Page cache read failed, querying store"),
      }
      match self.page_cache.generation(INVOICES_PATH).await {
        Ok(seen) => generation = Some(seen),
        Err(e) => tracing::warn!(error = %e, "Page cache generation unavailable, not caching"),
      }
    }

    let invoices = self
      .invoice_service
      .list_invoices()
      .await?
      .into_iter()
      .filter(|i| status_filter.is_none_or(|status| i.status == status))
      .map(InvoiceListItemDto::from)
      .collect();

    let body = serde_json::to_string(&ListInvoicesResponse { invoices })
      .map_err(|e| InvoiceError::Repository(format!("Failed to serialize invoices: {}", e)))?;

    if let Some(seen) = generation {
      match self
        .page_cache
        .store_if_current(INVOICES_PATH, body.clone(), seen)
        .await
      {
        Ok(true) => {}
        Ok(false) => tracing::debug!("Invoice listing changed while rendering, not caching"),
        Err(e) => tracing::warn!(error = %e, "Failed to store invoice listing in page cache"),
      }
    }

    Ok(InvoiceListPage {
      body,
      cache_hit: false,
    })
  }
}

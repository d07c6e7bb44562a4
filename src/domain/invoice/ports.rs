use async_trait::async_trait;
use thiserror::Error;

use super::entities::{Invoice, InvoiceChanges, NewInvoice};
use super::errors::InvoiceError;
use super::value_objects::InvoiceId;

#[async_trait]
pub trait InvoiceRepository: Send + Sync {
  /// Inserts a row; the store assigns the id.
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError>;
  /// Returns `InvoiceError::InvoiceNotFound` when no row matches `id`.
  async fn update(&self, id: &InvoiceId, changes: InvoiceChanges)
  -> Result<Invoice, InvoiceError>;
  /// Returns `InvoiceError::InvoiceNotFound` when no row matches `id`.
  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError>;
  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError>;
  /// Newest first.
  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError>;
}

#[derive(Debug, Error)]
pub enum CacheError {
  #[error("Cache backend error: {0}")]
  Backend(String),

  #[error("Redis error: {0}")]
  Redis(#[from] redis::RedisError),
}

/// Rendered page data keyed by route path.
///
/// `invalidate` marks a path stale so the next read goes back to the store.
/// Every path carries a generation that `invalidate` bumps; readers that
/// render from the store take the generation first and publish with
/// `store_if_current`, so a render that raced a write is never cached.
#[async_trait]
pub trait PageCache: Send + Sync {
  async fn get(&self, path: &str) -> Result<Option<String>, CacheError>;
  async fn generation(&self, path: &str) -> Result<u64, CacheError>;
  async fn store(&self, path: &str, body: String) -> Result<(), CacheError>;
  /// Stores `body` only while the generation of `path` is still `seen`.
  /// Returns whether the body was stored.
  async fn store_if_current(&self, path: &str, body: String, seen: u64)
  -> Result<bool, CacheError>;
  async fn invalidate(&self, path: &str) -> Result<(), CacheError>;
}

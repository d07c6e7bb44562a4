use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::invoice::{CacheError, PageCache};

#[derive(Default)]
struct Pages {
  bodies: HashMap<String, String>,
  generations: HashMap<String, u64>,
}

/// Process-local page cache
///
/// Entries never expire on their own; they are dropped by `invalidate`.
#[derive(Default)]
pub struct InMemoryPageCache {
  pages: RwLock<Pages>,
}

impl InMemoryPageCache {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn contains(&self, path: &str) -> bool {
    self
      .pages
      .read()
      .map(|pages| pages.bodies.contains_key(path))
      .unwrap_or(false)
  }
}

#[async_trait]
impl PageCache for InMemoryPageCache {
  async fn get(&self, path: &str) -> Result<Option<String>, CacheError> {
    let pages = self
      .pages
      .read()
      .map_err(|e| CacheError::Backend(format!("Failed to acquire read lock: {}", e)))?;
    Ok(pages.bodies.get(path).cloned())
  }

  async fn generation(&self, path: &str) -> Result<u64, CacheError> {
    let pages = self
      .pages
      .read()
      .map_err(|e| CacheError::Backend(format!("Failed to acquire read lock: {}", e)))?;
    Ok(pages.generations.get(path).copied().unwrap_or_default())
  }

  async fn store(&self, path: &str, body: String) -> Result<(), CacheError> {
    let mut pages = self
      .pages
      .write()
      .map_err(|e| CacheError::Backend(format!("Failed to acquire write lock: {}", e)))?;
    pages.bodies.insert(path.to_string(), body);
    Ok(())
  }

  async fn store_if_current(
    &self,
    path: &str,
    body: String,
    seen: u64,
  ) -> Result<bool, CacheError> {
    let mut pages = self
      .pages
      .write()
      .map_err(|e| CacheError::Backend(format!("Failed to acquire write lock: {}", e)))?;
    if pages.generations.get(path).copied().unwrap_or_default() != seen {
      return Ok(false);
    }
    pages.bodies.insert(path.to_string(), body);
    Ok(true)
  }

  async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
    let mut pages = self
      .pages
      .write()
      .map_err(|e| CacheError::Backend(format!("Failed to acquire write lock: {}", e)))?;
    *pages.generations.entry(path.to_string()).or_default() += 1;
    if pages.bodies.remove(path).is_some() {
      tracing::debug!(path, "Page cache entry invalidated");
    }
    Ok(())
  }
}

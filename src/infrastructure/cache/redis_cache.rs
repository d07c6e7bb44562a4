use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::invoice::{CacheError, PageCache};

// KEYS[1] page, KEYS[2] generation; ARGV seen, body, ttl
const STORE_IF_CURRENT_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[2]) or '0')
if current ~= tonumber(ARGV[1]) then
  return 0
end
redis.call('SET', KEYS[1], ARGV[2], 'EX', ARGV[3])
return 1
"#;

/// Page cache shared between server instances through Redis
///
/// Pages live under `{key_prefix}{path}` and expire after `ttl_seconds` even
/// when nobody invalidates them. The generation of a path lives under
/// `{key_prefix}{path}:generation` and never expires.
#[derive(Clone)]
pub struct RedisPageCache {
  conn: ConnectionManager,
  key_prefix: String,
  ttl_seconds: u64,
}

impl RedisPageCache {
  pub fn new(conn: ConnectionManager, key_prefix: impl Into<String>, ttl_seconds: u64) -> Self {
    Self {
      conn,
      key_prefix: key_prefix.into(),
      ttl_seconds,
    }
  }

  fn key(&self, path: &str) -> String {
    page_key(&self.key_prefix, path)
  }

  fn generation_key(&self, path: &str) -> String {
    format!("{}:generation", self.key(path))
  }
}

fn page_key(prefix: &str, path: &str) -> String {
  format!("{}{}", prefix, path)
}

#[async_trait]
impl PageCache for RedisPageCache {
  async fn get(&self, path: &str) -> Result<Option<String>, CacheError> {
    let mut conn = self.conn.clone();
    let body: Option<String> = conn.get(self.key(path)).await?;
    Ok(body)
  }

  async fn generation(&self, path: &str) -> Result<u64, CacheError> {
    let mut conn = self.conn.clone();
    let generation: Option<u64> = conn.get(self.generation_key(path)).await?;
    Ok(generation.unwrap_or_default())
  }

  async fn store(&self, path: &str, body: String) -> Result<(), CacheError> {
    let mut conn = self.conn.clone();
    let _: () = conn.set_ex(self.key(path), body, self.ttl_seconds).await?;
    Ok(())
  }

  async fn store_if_current(
    &self,
    path: &str,
    body: String,
    seen: u64,
  ) -> Result<bool, CacheError> {
    let mut conn = self.conn.clone();
    let stored: i64 = redis::Script::new(STORE_IF_CURRENT_SCRIPT)
      .key(self.key(path))
      .key(self.generation_key(path))
      .arg(seen)
      .arg(body)
      .arg(self.ttl_seconds)
      .invoke_async(&mut conn)
      .await?;
    Ok(stored == 1)
  }

  async fn invalidate(&self, path: &str) -> Result<(), CacheError> {
    let mut conn = self.conn.clone();
    let (removed, generation): (i64, u64) = redis::pipe()
      .atomic()
      .del(self.key(path))
      .incr(self.generation_key(path), 1)
      .query_async(&mut conn)
      .await?;
    tracing::debug!(path, removed, generation, "Page cache entry invalidated");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use testcontainers_modules::redis::{REDIS_PORT, Redis};
  use testcontainers_modules::testcontainers::{ContainerAsync, runners::AsyncRunner};

  const PATH: &str = "/dashboard/invoices";

  async fn setup_redis() -> (ConnectionManager, ContainerAsync<Redis>) {
    // Start a Redis container
    let container = Redis::default()
      .start()
      .await
      .expect("Failed to start redis container");

    let host = container.get_host().await.expect("Failed to get host");
    let port = container
      .get_host_port_ipv4(REDIS_PORT)
      .await
      .expect("Failed to get port");

    let client = redis::Client::open(format!("redis://{}:{}", host, port))
      .expect("Failed to create redis client");
    let conn = client
      .get_connection_manager()
      .await
      .expect("Failed to connect to redis");

    (conn, container)
  }

  #[test]
  fn test_page_key() {
    assert_eq!(page_key("page:", PATH), "page:/dashboard/invoices");
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_store_sets_ttl() {
    let (conn, _container) = setup_redis().await;
    let cache = RedisPageCache::new(conn.clone(), "page:", 60);

    cache.store(PATH, "[]".to_string()).await.unwrap();

    assert_eq!(cache.get(PATH).await.unwrap().as_deref(), Some("[]"));
    let mut conn = conn;
    let ttl: i64 = conn.ttl("page:/dashboard/invoices").await.unwrap();
    assert!(ttl > 0 && ttl <= 60, "ttl was {}", ttl);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_invalidate_deletes_page_and_bumps_generation() {
    let (conn, _container) = setup_redis().await;
    let cache = RedisPageCache::new(conn.clone(), "page:", 60);

    cache.store(PATH, "[]".to_string()).await.unwrap();
    assert_eq!(cache.generation(PATH).await.unwrap(), 0);

    cache.invalidate(PATH).await.unwrap();

    assert!(cache.get(PATH).await.unwrap().is_none());
    assert_eq!(cache.generation(PATH).await.unwrap(), 1);
    let mut conn = conn;
    let exists: bool = conn.exists("page:/dashboard/invoices").await.unwrap();
    assert!(!exists);
  }

  #[tokio::test]
  #[ignore = "requires a Docker daemon"]
  async fn test_store_if_current() {
    let (conn, _container) = setup_redis().await;
    let cache = RedisPageCache::new(conn.clone(), "page:", 60);

    let seen = cache.generation(PATH).await.unwrap();
    cache.invalidate(PATH).await.unwrap();

    let stored = cache
      .store_if_current(PATH, "stale".to_string(), seen)
      .await
      .unwrap();
    assert!(!stored);
    assert!(cache.get(PATH).await.unwrap().is_none());

    let stored = cache
      .store_if_current(PATH, "fresh".to_string(), seen + 1)
      .await
      .unwrap();
    assert!(stored);
    assert_eq!(cache.get(PATH).await.unwrap().as_deref(), Some("fresh"));

    let mut conn = conn;
    let ttl: i64 = conn.ttl("page:/dashboard/invoices").await.unwrap();
    assert!(ttl > 0 && ttl <= 60, "ttl was {}", ttl);
  }
}

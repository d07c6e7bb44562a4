use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, anyhow};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicer::{
  adapters::http::{InvoiceRouteDependencies, RequestIdMiddleware, configure_invoice_routes},
  domain::invoice::{InvoiceRepository, InvoiceService, PageCache},
  infrastructure::{
    cache::{InMemoryPageCache, RedisPageCache},
    config::{CacheBackend, Config, StorageBackend},
    persistence::{InMemoryInvoiceRepository, PostgresInvoiceRepository},
  },
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "invoicer=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting invoicer");

  let config = Config::load().context("Failed to load configuration")?;
  tracing::info!("Configuration loaded successfully");

  let invoice_repo = connect_invoice_repository(&config).await?;
  let page_cache = connect_page_cache(&config).await?;

  let invoice_service = Arc::new(InvoiceService::new(invoice_repo));
  let deps = InvoiceRouteDependencies::new(invoice_service, page_cache);

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    let deps = deps.clone();
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      .configure(|cfg| configure_invoice_routes(cfg, deps))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))
  .with_context(|| format!("Failed to bind {}:{}", server_host, server_port))?
  .run()
  .await?;

  Ok(())
}

/// Picks the invoice store from `database.backend`, running migrations for Postgres.
async fn connect_invoice_repository(config: &Config) -> anyhow::Result<Arc<dyn InvoiceRepository>> {
  let database = &config.database;

  match database.backend {
    StorageBackend::Memory => {
      tracing::warn!("Using in-memory invoice store; data is lost on restart");
      Ok(Arc::new(InMemoryInvoiceRepository::new()))
    }
    StorageBackend::Postgres => {
      tracing::info!("Connecting to database: {}", database.url);

      let db_pool = tokio::time::timeout(
        Duration::from_secs(database.connect_timeout_seconds),
        PgPoolOptions::new()
          .max_connections(database.max_connections)
          .acquire_timeout(Duration::from_secs(database.acquire_timeout_seconds))
          .connect(&database.url),
      )
      .await
      .map_err(|_| {
        tracing::error!(
          "Database connection timed out after {} seconds. Is PostgreSQL running?",
          database.connect_timeout_seconds
        );
        anyhow!(
          "Database connection timed out after {} seconds",
          database.connect_timeout_seconds
        )
      })?
      .map_err(|e| {
        tracing::error!("Failed to connect to database: {}", e);
        match e {
          sqlx::Error::Io(_) => anyhow!(
            "Could not connect to database. Is PostgreSQL running at {}?",
            database.url
          ),
          other => anyhow!("Database error: {}", other),
        }
      })?;

      tracing::info!("Database connection pool created");

      tracing::info!("Running database migrations");
      sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .context("Failed to run database migrations")?;
      tracing::info!("Database migrations completed");

      Ok(Arc::new(PostgresInvoiceRepository::new(db_pool)))
    }
  }
}

/// Picks the page cache from `cache.backend`.
async fn connect_page_cache(config: &Config) -> anyhow::Result<Arc<dyn PageCache>> {
  match config.cache.backend {
    CacheBackend::Memory => {
      tracing::info!("Using in-memory page cache");
      Ok(Arc::new(InMemoryPageCache::new()))
    }
    CacheBackend::Redis => {
      let redis = config
        .redis
        .as_ref()
        .ok_or_else(|| anyhow!("cache.backend is redis but no [redis] section is configured"))?;

      tracing::info!("Connecting to Redis: {}", redis.url);

      let redis_client = redis::Client::open(redis.url.clone()).map_err(|e| {
        tracing::error!("Failed to create Redis client: {}", e);
        anyhow!("Invalid Redis URL: {}", e)
      })?;

      let redis_conn = tokio::time::timeout(
        Duration::from_secs(redis.connect_timeout_seconds),
        redis_client.get_connection_manager(),
      )
      .await
      .map_err(|_| {
        tracing::error!(
          "Redis connection timed out after {} seconds. Is Redis running?",
          redis.connect_timeout_seconds
        );
        anyhow!(
          "Redis connection timed out after {} seconds",
          redis.connect_timeout_seconds
        )
      })?
      .map_err(|e| {
        tracing::error!("Failed to connect to Redis: {}", e);
        anyhow!("Could not connect to Redis. Is Redis running at {}?", redis.url)
      })?;

      tracing::info!("Redis connection established");

      Ok(Arc::new(RedisPageCache::new(
        redis_conn,
        config.cache.key_prefix.clone(),
        config.cache.ttl_seconds,
      )))
    }
  }
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use crate::domain::invoice::{
  AmountInCents, CustomerId, Invoice, InvoiceChanges, InvoiceId, InvoiceStatus, NewInvoice,
  errors::InvoiceError, ports::InvoiceRepository,
};

/// Database row structure for the invoices table
#[derive(Debug, FromRow)]
struct InvoiceRow {
  id: String,
  customer_id: String,
  amount: i64,
  status: String,
  date: NaiveDate,
}

impl TryFrom<InvoiceRow> for Invoice {
  type Error = InvoiceError;

  fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
    Ok(Invoice {
      id: InvoiceId::new(row.id)?,
      customer_id: CustomerId::new(row.customer_id)?,
      amount: AmountInCents::new(row.amount),
      status: InvoiceStatus::from_str(&row.status)?,
      date: row.date,
    })
  }
}

/// PostgreSQL implementation of the InvoiceRepository trait
///
/// Every method issues exactly one parameterized statement.
pub struct PostgresInvoiceRepository {
  pool: PgPool,
}

impl PostgresInvoiceRepository {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl InvoiceRepository for PostgresInvoiceRepository {
  async fn create(&self, invoice: NewInvoice) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            INSERT INTO invoices (customer_id, amount, status, date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, customer_id, amount, status, date
            "#,
    )
    .bind(invoice.customer_id.value())
    .bind(invoice.amount.value())
    .bind(invoice.status.as_str())
    .bind(invoice.date)
    .fetch_one(&self.pool)
    .await?;

    row.try_into()
  }

  async fn update(
    &self,
    id: &InvoiceId,
    changes: InvoiceChanges,
  ) -> Result<Invoice, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            UPDATE invoices
            SET customer_id = $2, amount = $3, status = $4
            WHERE id = $1
            RETURNING id, customer_id, amount, status, date
            "#,
    )
    .bind(id.value())
    .bind(changes.customer_id.value())
    .bind(changes.amount.value())
    .bind(changes.status.as_str())
    .fetch_optional(&self.pool)
    .await?;

    row
      .ok_or_else(|| InvoiceError::InvoiceNotFound(id.clone()))?
      .try_into()
  }

  async fn delete(&self, id: &InvoiceId) -> Result<(), InvoiceError> {
    let result = sqlx::query(
      r#"
      DELETE FROM invoices
      WHERE id = $1
      "#,
    )
    .bind(id.value())
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      return Err(InvoiceError::InvoiceNotFound(id.clone()));
    }

    Ok(())
  }

  async fn find_by_id(&self, id: &InvoiceId) -> Result<Option<Invoice>, InvoiceError> {
    let row = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            WHERE id = $1
            "#,
    )
    .bind(id.value())
    .fetch_optional(&self.pool)
    .await?;

    row.map(|r| r.try_into()).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Invoice>, InvoiceError> {
    let rows = sqlx::query_as::<_, InvoiceRow>(
      r#"
            SELECT id, customer_id, amount, status, date
            FROM invoices
            ORDER BY date DESC, id ASC
            "#,
    )
    .fetch_all(&self.pool)
    .await?;

    rows.into_iter().map(|r| r.try_into()).collect()
  }
}

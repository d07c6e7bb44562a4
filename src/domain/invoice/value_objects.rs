use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueObjectError {
  #[error("Invalid invoice id: {0}")]
  InvalidInvoiceId(String),
  #[error("Invalid customer id: {0}")]
  InvalidCustomerId(String),
  #[error("Invalid amount: {0}")]
  InvalidAmount(String),
  #[error("Invalid status: {0}")]
  InvalidStatus(String),
}

// Invoice Id - opaque identifier generated by the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceId(String);

impl InvoiceId {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidInvoiceId(
        "Invoice id cannot be empty".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for InvoiceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Customer Id - reference to a customer, existence is not checked here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
  pub fn new(value: impl Into<String>) -> Result<Self, ValueObjectError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
      return Err(ValueObjectError::InvalidCustomerId(
        "Customer id cannot be empty".to_string(),
      ));
    }
    if trimmed.chars().count() > 255 {
      return Err(ValueObjectError::InvalidCustomerId(
        "Customer id cannot exceed 255 characters".to_string(),
      ));
    }
    Ok(Self(trimmed.to_string()))
  }

  pub fn value(&self) -> &str {
    &self.0
  }

  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for CustomerId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// Invoice Status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
  Pending,
  Paid,
}

impl InvoiceStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      InvoiceStatus::Pending => "pending",
      InvoiceStatus::Paid => "paid",
    }
  }
}

impl fmt::Display for InvoiceStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for InvoiceStatus {
  type Err = ValueObjectError;

  /// Only the exact literals are accepted, no case folding.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "pending" => Ok(InvoiceStatus::Pending),
      "paid" => Ok(InvoiceStatus::Paid),
      _ => Err(ValueObjectError::InvalidStatus(format!(
        "Expected 'pending' or 'paid', got '{}'",
        s
      ))),
    }
  }
}

/// Amount stored as an integer count of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmountInCents(i64);

impl AmountInCents {
  pub fn new(cents: i64) -> Self {
    Self(cents)
  }

  /// Converts an amount in currency units to cents: `round(amount * 100)`.
  ///
  /// Midpoints round away from zero. Decimal arithmetic keeps `42.50` at
  /// exactly `4250`.
  pub fn from_units(amount: Decimal) -> Result<Self, ValueObjectError> {
    let cents = amount
      .checked_mul(Decimal::ONE_HUNDRED)
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount is too large".to_string()))?
      .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    cents
      .to_i64()
      .map(Self)
      .ok_or_else(|| ValueObjectError::InvalidAmount("Amount is too large".to_string()))
  }

  pub fn value(&self) -> i64 {
    self.0
  }

  /// Amount in currency units, e.g. `4250` cents is `42.50`.
  pub fn to_units(&self) -> Decimal {
    Decimal::new(self.0, 2)
  }
}

impl fmt::Display for AmountInCents {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.to_units())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal_macros::dec;

  #[test]
  fn test_invoice_id() {
    let id = InvoiceId::new("  inv_1 ").unwrap();
    assert_eq!(id.value(), "inv_1");
    assert!(InvoiceId::new("   ").is_err());
  }

  #[test]
  fn test_customer_id() {
    let id = CustomerId::new("cust_1").unwrap();
    assert_eq!(id.to_string(), "cust_1");
    assert!(CustomerId::new("").is_err());
    assert!(CustomerId::new("x".repeat(256)).is_err());
    // 255 two-byte characters still fit
    assert!(CustomerId::new("é".repeat(255)).is_ok());
  }

  #[test]
  fn test_invoice_status() {
    assert_eq!(InvoiceStatus::from_str("pending").unwrap(), InvoiceStatus::Pending);
    assert_eq!(InvoiceStatus::from_str("paid").unwrap(), InvoiceStatus::Paid);
    assert_eq!(InvoiceStatus::Paid.as_str(), "paid");

    assert!(InvoiceStatus::from_str("overdue").is_err());
    assert!(InvoiceStatus::from_str("Paid").is_err());
    assert!(InvoiceStatus::from_str("").is_err());
  }

  #[test]
  fn test_amount_from_units() {
    assert_eq!(AmountInCents::from_units(dec!(42.50)).unwrap().value(), 4250);
    assert_eq!(AmountInCents::from_units(dec!(10)).unwrap().value(), 1000);
    assert_eq!(AmountInCents::from_units(dec!(0.1)).unwrap().value(), 10);
    assert_eq!(AmountInCents::from_units(dec!(19.99)).unwrap().value(), 1999);
    assert_eq!(AmountInCents::from_units(dec!(0.005)).unwrap().value(), 1);
    assert_eq!(AmountInCents::from_units(dec!(-1.5)).unwrap().value(), -150);
  }

  #[test]
  fn test_amount_overflow() {
    assert!(AmountInCents::from_units(Decimal::MAX).is_err());
  }

  #[test]
  fn test_amount_to_units() {
    let amount = AmountInCents::new(4250);
    assert_eq!(amount.to_units(), dec!(42.50));
    assert_eq!(amount.to_string(), "42.50");
  }
}

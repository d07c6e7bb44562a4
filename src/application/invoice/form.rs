//! Invoice form schema
//!
//! Turns the raw string fields of a submitted invoice form into typed values.
//! The full schema covers every column of an invoice; the create and update
//! schemas omit `id` and `date`, which are never taken from the form.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use validator::{Validate, ValidationErrors};

use crate::domain::invoice::{AmountInCents, CustomerId, InvoiceId, InvoiceStatus};

const CUSTOMER_MESSAGE: &str = "Please select a customer.";
const AMOUNT_MESSAGE: &str = "Please enter an amount.";
const AMOUNT_NUMBER_MESSAGE: &str = "Amount must be a number.";
const AMOUNT_RANGE_MESSAGE: &str = "Amount is too large.";
const STATUS_MESSAGE: &str = "Please select an invoice status.";

lazy_static! {
  // Plain decimal or exponent notation, as a browser number field submits it.
  static ref AMOUNT_LITERAL: Regex =
    Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").expect("valid amount pattern");
}

/// Raw form fields as submitted by the browser
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFormInput {
  pub id: Option<String>,

  #[validate(required)]
  pub customer_id: Option<String>,

  #[validate(required)]
  pub amount: Option<String>,

  #[validate(required)]
  pub status: Option<String>,

  pub date: Option<String>,
}

/// Typed invoice form values
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceFormData {
  /// Only set by schemas that require it
  pub id: Option<InvoiceId>,
  pub customer_id: CustomerId,
  /// Entered amount scaled to cents
  pub amount_in_cents: AmountInCents,
  pub status: InvoiceStatus,
  /// Only set by schemas that require it
  pub date: Option<NaiveDate>,
}

/// Field-level diagnostics keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormErrors(BTreeMap<String, Vec<String>>);

impl FormErrors {
  pub fn add(&mut self, field: &str, message: impl Into<String>) {
    self
      .0
      .entry(field.to_string())
      .or_default()
      .push(message.into());
  }

  pub fn get(&self, field: &str) -> Option<&[String]> {
    self.0.get(field).map(Vec::as_slice)
  }

  pub fn contains(&self, field: &str) -> bool {
    self.0.contains_key(field)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn fields(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }
}

impl fmt::Display for FormErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let messages: Vec<String> = self
      .0
      .iter()
      .map(|(field, messages)| format!("{}: {}", field, messages.join(" ")))
      .collect();
    write!(f, "{}", messages.join("; "))
  }
}

impl std::error::Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
  fn from(errors: ValidationErrors) -> Self {
    let mut form_errors = FormErrors::default();
    for (field, errors) in errors.field_errors() {
      let field: &str = field.as_ref();
      let name = form_field_name(field);
      for error in errors.iter() {
        let message = match (error.code.as_ref(), required_message(name)) {
          ("required", Some(message)) => message.to_string(),
          _ => error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| format!("Invalid field: {}", name)),
        };
        form_errors.add(name, message);
      }
    }
    form_errors
  }
}

fn required_message(name: &str) -> Option<&'static str> {
  match name {
    "customerId" => Some(CUSTOMER_MESSAGE),
    "amount" => Some(AMOUNT_MESSAGE),
    "status" => Some(STATUS_MESSAGE),
    _ => None,
  }
}

fn form_field_name(field: &str) -> &str {
  match field {
    "customer_id" => "customerId",
    other => other,
  }
}

/// Which of the optional columns a schema reads from the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvoiceFormSchema {
  with_id: bool,
  with_date: bool,
}

pub const CREATE_INVOICE_SCHEMA: InvoiceFormSchema = InvoiceFormSchema::FULL.omit_id().omit_date();
pub const UPDATE_INVOICE_SCHEMA: InvoiceFormSchema = InvoiceFormSchema::FULL.omit_id().omit_date();

impl InvoiceFormSchema {
  pub const FULL: InvoiceFormSchema = InvoiceFormSchema {
    with_id: true,
    with_date: true,
  };

  pub const fn omit_id(self) -> Self {
    Self {
      with_id: false,
      ..self
    }
  }

  pub const fn omit_date(self) -> Self {
    Self {
      with_date: false,
      ..self
    }
  }

  /// Validates and coerces every field, collecting all failures.
  pub fn parse(&self, input: &InvoiceFormInput) -> Result<InvoiceFormData, FormErrors> {
    let mut errors = match input.validate() {
      Ok(()) => FormErrors::default(),
      Err(e) => FormErrors::from(e),
    };

    let customer_id = input
      .customer_id
      .as_deref()
      .and_then(|value| match CustomerId::new(value) {
        Ok(id) => Some(id),
        Err(_) => {
          errors.add("customerId", CUSTOMER_MESSAGE);
          None
        }
      });

    let amount = input
      .amount
      .as_deref()
      .and_then(|value| match coerce_amount(value) {
        Ok(amount) => Some(amount),
        Err(message) => {
          errors.add("amount", message);
          None
        }
      });

    let status = input
      .status
      .as_deref()
      .and_then(|value| match InvoiceStatus::from_str(value.trim()) {
        Ok(status) => Some(status),
        Err(_) => {
          errors.add("status", STATUS_MESSAGE);
          None
        }
      });

    let id = if self.with_id {
      match input.id.as_deref().map(InvoiceId::new) {
        Some(Ok(id)) => Some(id),
        _ => {
          errors.add("id", "Invoice id is required.");
          None
        }
      }
    } else {
      None
    };

    let date = if self.with_date {
      match input
        .date
        .as_deref()
        .map(|value| NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d"))
      {
        Some(Ok(date)) => Some(date),
        _ => {
          errors.add("date", "Date must be in YYYY-MM-DD format.");
          None
        }
      }
    } else {
      None
    };

    match (customer_id, amount, status) {
      (Some(customer_id), Some(amount_in_cents), Some(status)) if errors.is_empty() => {
        Ok(InvoiceFormData {
          id,
          customer_id,
          amount_in_cents,
          status,
          date,
        })
      }
      _ => Err(errors),
    }
  }
}

/// Coerces a form string into cents.
///
/// Only plain decimal and exponent notation count as numbers. Literals that
/// `Decimal` cannot hold exactly are read as `f64`, so tiny values round to
/// zero cents and huge ones are reported as out of range.
fn coerce_amount(value: &str) -> Result<AmountInCents, &'static str> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(AMOUNT_MESSAGE);
  }
  if !AMOUNT_LITERAL.is_match(trimmed) {
    return Err(AMOUNT_NUMBER_MESSAGE);
  }

  let amount = match Decimal::from_str(trimmed).or_else(|_| Decimal::from_scientific(trimmed)) {
    Ok(amount) => amount,
    Err(_) => approximate_amount(trimmed)?,
  };

  AmountInCents::from_units(amount).map_err(|_| AMOUNT_RANGE_MESSAGE)
}

fn approximate_amount(literal: &str) -> Result<Decimal, &'static str> {
  let value: f64 = literal.parse().map_err(|_| AMOUNT_NUMBER_MESSAGE)?;
  if !value.is_finite() {
    return Err(AMOUNT_RANGE_MESSAGE);
  }
  if value.abs() < 1e-28 {
    return Ok(Decimal::ZERO);
  }
  Decimal::from_f64(value).ok_or(AMOUNT_RANGE_MESSAGE)
}

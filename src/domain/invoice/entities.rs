use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::value_objects::{AmountInCents, CustomerId, InvoiceId, InvoiceStatus};

// Invoice - a stored row of the invoices table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
  pub id: InvoiceId,
  pub customer_id: CustomerId,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl Invoice {
  /// Replaces the editable fields. `id` and `date` never change after creation.
  pub fn apply(&mut self, changes: InvoiceChanges) {
    self.customer_id = changes.customer_id;
    self.amount = changes.amount;
    self.status = changes.status;
  }
}

// NewInvoice - an invoice that has not been assigned an id by the store yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoice {
  pub customer_id: CustomerId,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
  pub date: NaiveDate,
}

impl NewInvoice {
  /// Dated with the current UTC day.
  pub fn new(customer_id: CustomerId, amount: AmountInCents, status: InvoiceStatus) -> Self {
    Self {
      customer_id,
      amount,
      status,
      date: Utc::now().date_naive(),
    }
  }

  pub fn into_invoice(self, id: InvoiceId) -> Invoice {
    Invoice {
      id,
      customer_id: self.customer_id,
      amount: self.amount,
      status: self.status,
      date: self.date,
    }
  }
}

// InvoiceChanges - the fields an update may replace
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceChanges {
  pub customer_id: CustomerId,
  pub amount: AmountInCents,
  pub status: InvoiceStatus,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_invoice_is_dated_today() {
    let invoice = NewInvoice::new(
      CustomerId::new("cust_1").unwrap(),
      AmountInCents::new(4250),
      InvoiceStatus::Pending,
    );

    assert_eq!(invoice.date, Utc::now().date_naive());

    let stored = invoice.clone().into_invoice(InvoiceId::new("inv_1").unwrap());
    assert_eq!(stored.id.value(), "inv_1");
    assert_eq!(stored.amount, invoice.amount);
    assert_eq!(stored.date, invoice.date);
  }

  #[test]
  fn test_apply_keeps_id_and_date() {
    let date = NaiveDate::from_ymd_opt(2023, 12, 6).unwrap();
    let mut invoice = Invoice {
      id: InvoiceId::new("inv_1").unwrap(),
      customer_id: CustomerId::new("cust_1").unwrap(),
      amount: AmountInCents::new(4250),
      status: InvoiceStatus::Pending,
      date,
    };

    invoice.apply(InvoiceChanges {
      customer_id: CustomerId::new("cust_2").unwrap(),
      amount: AmountInCents::new(1000),
      status: InvoiceStatus::Paid,
    });

    assert_eq!(invoice.id.value(), "inv_1");
    assert_eq!(invoice.date, date);
    assert_eq!(invoice.customer_id.value(), "cust_2");
    assert_eq!(invoice.amount.value(), 1000);
    assert_eq!(invoice.status, InvoiceStatus::Paid);
  }
}

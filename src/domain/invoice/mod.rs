pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{Invoice, InvoiceChanges, NewInvoice};
pub use errors::InvoiceError;
pub use ports::{CacheError, InvoiceRepository, PageCache};
pub use services::{InvoiceData, InvoiceService};
pub use value_objects::{AmountInCents, CustomerId, InvoiceId, InvoiceStatus, ValueObjectError};

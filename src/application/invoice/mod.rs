pub mod create_invoice;
pub mod delete_invoice;
pub mod form;
pub mod get_invoice;
pub mod list_invoices;
pub mod outcome;
pub mod update_invoice;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_invoice::{CreateInvoiceCommand, CreateInvoiceUseCase};
pub use delete_invoice::{DELETED_MESSAGE, DeleteInvoiceCommand, DeleteInvoiceUseCase};
pub use form::{
  CREATE_INVOICE_SCHEMA, FormErrors, InvoiceFormData, InvoiceFormInput, InvoiceFormSchema,
  UPDATE_INVOICE_SCHEMA,
};
pub use get_invoice::{GetInvoiceCommand, GetInvoiceUseCase, InvoiceDetailsResponse};
pub use list_invoices::{
  InvoiceListItemDto, InvoiceListPage, ListInvoicesCommand, ListInvoicesResponse,
  ListInvoicesUseCase,
};
pub use outcome::{
  ActionError, ActionMessage, ActionOutcome, INVOICES_PATH, InvoiceAction, revalidate_path,
};
pub use update_invoice::{UpdateInvoiceCommand, UpdateInvoiceUseCase};

use actix_web::{HttpRequest, error::UrlencodedError, web};
use std::sync::Arc;

use crate::application::invoice::{
  CreateInvoiceUseCase, DeleteInvoiceUseCase, FormErrors, GetInvoiceUseCase, INVOICES_PATH,
  InvoiceAction, ListInvoicesUseCase, UpdateInvoiceUseCase,
};
use crate::domain::invoice::{InvoiceService, PageCache};

use super::errors::ApiError;
use super::handlers::invoices;

/// Use cases behind the invoice routes
#[derive(Clone)]
pub struct InvoiceRouteDependencies {
  pub create_invoice_use_case: Arc<CreateInvoiceUseCase>,
  pub update_invoice_use_case: Arc<UpdateInvoiceUseCase>,
  pub delete_invoice_use_case: Arc<DeleteInvoiceUseCase>,
  pub list_invoices_use_case: Arc<ListInvoicesUseCase>,
  pub get_invoice_use_case: Arc<GetInvoiceUseCase>,
}

impl InvoiceRouteDependencies {
  /// Builds every invoice use case over one service and one page cache.
  pub fn new(invoice_service: Arc<InvoiceService>, page_cache: Arc<dyn PageCache>) -> Self {
    Self {
      create_invoice_use_case: Arc::new(CreateInvoiceUseCase::new(
        invoice_service.clone(),
        page_cache.clone(),
      )),
      update_invoice_use_case: Arc::new(UpdateInvoiceUseCase::new(
        invoice_service.clone(),
        page_cache.clone(),
      )),
      delete_invoice_use_case: Arc::new(DeleteInvoiceUseCase::new(
        invoice_service.clone(),
        page_cache.clone(),
      )),
      list_invoices_use_case: Arc::new(ListInvoicesUseCase::new(
        invoice_service.clone(),
        page_cache,
      )),
      get_invoice_use_case: Arc::new(GetInvoiceUseCase::new(invoice_service)),
    }
  }
}

/// Reports an unreadable form body with the same JSON shape as a rejected form.
fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
  let action = if req.path().ends_with("/create") {
    InvoiceAction::Create
  } else {
    InvoiceAction::Update
  };
  tracing::debug!(action = action.as_str(), error = %err, "Unreadable invoice form");

  let mut errors = FormErrors::default();
  errors.add("form", err.to_string());
  ApiError::Validation {
    message: action.validation_message().to_string(),
    errors,
  }
  .into()
}

/// Configure invoice routes
///
/// Mounts the invoice form actions and listing under `/dashboard/invoices`.
///
/// # Routes
///
/// - GET /dashboard/invoices - Invoice listing (JSON, read through the page cache)
/// - POST /dashboard/invoices/create - Create an invoice from a form
/// - GET /dashboard/invoices/{id} - Single invoice
/// - DELETE /dashboard/invoices/{id} - Delete an invoice
/// - POST /dashboard/invoices/{id}/edit - Update an invoice from a form
/// - POST /dashboard/invoices/{id}/delete - Delete an invoice from a form
///
/// # Example
///
/// ```no_run
/// use actix_web::App;
/// use std::sync::Arc;
/// # use invoicer::adapters::http::routes::{InvoiceRouteDependencies, configure_invoice_routes};
/// # use invoicer::domain::invoice::InvoiceService;
/// # use invoicer::infrastructure::cache::InMemoryPageCache;
/// # use invoicer::infrastructure::persistence::InMemoryInvoiceRepository;
///
/// let service = Arc::new(InvoiceService::new(Arc::new(InMemoryInvoiceRepository::new())));
/// let deps = InvoiceRouteDependencies::new(service, Arc::new(InMemoryPageCache::new()));
/// let app = App::new().configure(|cfg| configure_invoice_routes(cfg, deps));
/// ```
pub fn configure_invoice_routes(cfg: &mut web::ServiceConfig, deps: InvoiceRouteDependencies) {
  cfg.service(
    web::scope(INVOICES_PATH)
      // Store use cases in app data so handlers can access them
      .app_data(web::Data::new(deps.create_invoice_use_case))
      .app_data(web::Data::new(deps.update_invoice_use_case))
      .app_data(web::Data::new(deps.delete_invoice_use_case))
      .app_data(web::Data::new(deps.list_invoices_use_case))
      .app_data(web::Data::new(deps.get_invoice_use_case))
      .app_data(web::FormConfig::default().error_handler(form_error_handler))
      .route("", web::get().to(invoices::list_invoices))
      .route("/create", web::post().to(invoices::create_invoice))
      .service(
        web::resource("/{id}")
          .route(web::get().to(invoices::get_invoice))
          .route(web::delete().to(invoices::delete_invoice)),
      )
      .route("/{id}/edit", web::post().to(invoices::update_invoice))
      .route("/{id}/delete", web::post().to(invoices::delete_invoice)),
  );
}

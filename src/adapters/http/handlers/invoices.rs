use actix_web::{HttpRequest, HttpResponse, http::header, web};
use serde::Deserialize;
use std::sync::Arc;

use crate::adapters::http::errors::ApiError;
use crate::application::invoice::{
  ActionOutcome, CreateInvoiceCommand, CreateInvoiceUseCase, DeleteInvoiceCommand,
  DeleteInvoiceUseCase, GetInvoiceCommand, GetInvoiceUseCase, InvoiceFormInput,
  ListInvoicesCommand, ListInvoicesUseCase, UpdateInvoiceCommand, UpdateInvoiceUseCase,
};

/// Whether the request was sent by htmx, which follows `HX-Redirect`
/// instead of a 303.
fn is_htmx(req: &HttpRequest) -> bool {
  req
    .headers()
    .get("HX-Request")
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Turns an action outcome into the response that performs it.
fn outcome_response(req: &HttpRequest, outcome: ActionOutcome) -> HttpResponse {
  match outcome {
    ActionOutcome::Redirect(to) if is_htmx(req) => {
      HttpResponse::Ok().insert_header(("HX-Redirect", to)).finish()
    }
    ActionOutcome::Redirect(to) => HttpResponse::SeeOther()
      .insert_header((header::LOCATION, to))
      .finish(),
    ActionOutcome::Message(message) => HttpResponse::Ok().json(message),
  }
}

#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
  status: Option<String>,
}

// GET /dashboard/invoices - Invoice listing data
pub async fn list_invoices(
  query: web::Query<ListInvoicesQuery>,
  list_invoices_use_case: web::Data<Arc<ListInvoicesUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let page = list_invoices_use_case
    .execute(ListInvoicesCommand {
      status_filter: query.into_inner().status,
    })
    .await?;

  Ok(
    HttpResponse::Ok()
      .content_type("application/json")
      .insert_header(("X-Cache", if page.cache_hit { "HIT" } else { "MISS" }))
      .body(page.body),
  )
}

// GET /dashboard/invoices/{id} - Single invoice for the edit form
pub async fn get_invoice(
  path: web::Path<String>,
  get_invoice_use_case: web::Data<Arc<GetInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let invoice = get_invoice_use_case
    .execute(GetInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  Ok(HttpResponse::Ok().json(invoice))
}

// POST /dashboard/invoices/create - Create a new invoice
pub async fn create_invoice(
  req: HttpRequest,
  form: web::Form<InvoiceFormInput>,
  create_invoice_use_case: web::Data<Arc<CreateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let outcome = create_invoice_use_case
    .execute(CreateInvoiceCommand {
      form: form.into_inner(),
    })
    .await?;

  Ok(outcome_response(&req, outcome))
}

// POST /dashboard/invoices/{id}/edit - Update an invoice
pub async fn update_invoice(
  req: HttpRequest,
  path: web::Path<String>,
  form: web::Form<InvoiceFormInput>,
  update_invoice_use_case: web::Data<Arc<UpdateInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let outcome = update_invoice_use_case
    .execute(UpdateInvoiceCommand {
      invoice_id: path.into_inner(),
      form: form.into_inner(),
    })
    .await?;

  Ok(outcome_response(&req, outcome))
}

// POST /dashboard/invoices/{id}/delete and DELETE /dashboard/invoices/{id}
pub async fn delete_invoice(
  req: HttpRequest,
  path: web::Path<String>,
  delete_invoice_use_case: web::Data<Arc<DeleteInvoiceUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let outcome = delete_invoice_use_case
    .execute(DeleteInvoiceCommand {
      invoice_id: path.into_inner(),
    })
    .await?;

  Ok(outcome_response(&req, outcome))
}

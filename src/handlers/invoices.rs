//! Invoice handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::{InvoiceId, JsonBody};
use crate::model::{InvoiceUpdate, NewInvoice};
use crate::response::{created, ok, InvoiceBody, InvoiceList, Message};
use crate::service::InvoiceService;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

fn no_invoice(id: i32) -> AppError {
    AppError::NotFound(format!("No invoice with id {} found", id))
}

/// GET /invoices — `{invoices: [{id, comp_code}, ...]}`.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let invoices = InvoiceService::list(&state.pool).await?;
    Ok(ok(InvoiceList { invoices }))
}

/// GET /invoices/:id — invoice with its company nested under `company`.
pub async fn read(State(state): State<AppState>, InvoiceId(id): InvoiceId) -> Result<impl IntoResponse, AppError> {
    let invoice = InvoiceService::get(&state.pool, id).await?.ok_or_else(|| no_invoice(id))?;
    Ok(ok(InvoiceBody { invoice }))
}

/// POST /invoices — body `{comp_code, amt}`; 404 when the company does not exist.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewInvoice>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let invoice = InvoiceService::create(&state.pool, &body)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("not a company: {}", body.comp_code)))?;
    tracing::info!(id = invoice.id, comp_code = %invoice.comp_code, "invoice created");
    Ok(created(InvoiceBody { invoice }))
}

/// PUT /invoices/:id — body `{amt}` and/or `{paid}`.
pub async fn update(
    State(state): State<AppState>,
    InvoiceId(id): InvoiceId,
    JsonBody(body): JsonBody<InvoiceUpdate>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let invoice = InvoiceService::update(&state.pool, id, &body)
        .await?
        .ok_or_else(|| no_invoice(id))?;
    Ok(ok(InvoiceBody { invoice }))
}

/// DELETE /invoices/:id — `{message: "Deleted id: <id>"}`.
pub async fn delete(State(state): State<AppState>, InvoiceId(id): InvoiceId) -> Result<impl IntoResponse, AppError> {
    if !InvoiceService::delete(&state.pool, id).await? {
        return Err(no_invoice(id));
    }
    tracing::info!(id, "invoice deleted");
    Ok(ok(Message::new(format!("Deleted id: {}", id))))
}

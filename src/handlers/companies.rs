//! Company handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::{CompanyUpdate, NewCompany};
use crate::response::{created, ok, CompanyBody, CompanyList, Message};
use crate::service::CompanyService;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};

fn not_a_company(code: &str) -> AppError {
    AppError::NotFound(format!("not a company: {}", code))
}

/// GET /companies — `{companies: [{code, name}, ...]}`.
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let companies = CompanyService::list(&state.pool).await?;
    Ok(ok(CompanyList { companies }))
}

/// GET /companies/:code — `{company: {code, name, description, invoices}}`.
pub async fn read(State(state): State<AppState>, Path(code): Path<String>) -> Result<impl IntoResponse, AppError> {
    let company = CompanyService::get(&state.pool, &code)
        .await?
        .ok_or_else(|| not_a_company(&code))?;
    Ok(ok(CompanyBody { company }))
}

/// POST /companies — body `{code, name, description}`; 201 with the stored row.
pub async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<NewCompany>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let company = CompanyService::create(&state.pool, &body).await?;
    tracing::info!(code = %company.code, "company created");
    Ok(created(CompanyBody { company }))
}

/// PUT /companies/:code — body `{name, description}`, either may be omitted.
pub async fn update(
    State(state): State<AppState>,
    Path(code): Path<String>,
    JsonBody(body): JsonBody<CompanyUpdate>,
) -> Result<impl IntoResponse, AppError> {
    body.validate()?;
    let company = CompanyService::update(&state.pool, &code, &body)
        .await?
        .ok_or_else(|| not_a_company(&code))?;
    Ok(ok(CompanyBody { company }))
}

/// DELETE /companies/:code — removes the company and, by cascade, its invoices.
pub async fn delete(State(state): State<AppState>, Path(code): Path<String>) -> Result<impl IntoResponse, AppError> {
    if !CompanyService::delete(&state.pool, &code).await? {
        return Err(not_a_company(&code));
    }
    tracing::info!(code = %code, "company deleted");
    Ok(ok(Message::new("Deleted")))
}

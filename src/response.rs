//! Response envelopes: every success body is a single-key object.

use crate::model::{CompanySummary, InvoiceSummary};
use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize)]
pub struct CompanyList {
    pub companies: Vec<CompanySummary>,
}

#[derive(Serialize)]
pub struct CompanyBody<T> {
    pub company: T,
}

#[derive(Serialize)]
pub struct InvoiceList {
    pub invoices: Vec<InvoiceSummary>,
}

#[derive(Serialize)]
pub struct InvoiceBody<T> {
    pub invoice: T,
}

#[derive(Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Message { message: message.into() }
    }
}

pub fn ok<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(body))
}

pub fn created<T: Serialize>(body: T) -> (StatusCode, Json<T>) {
    (StatusCode::CREATED, Json(body))
}

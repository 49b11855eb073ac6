//! Extract and validate an invoice id from the path.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Integer invoice id from the single path parameter; anything else is 400.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InvoiceId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for InvoiceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        raw.trim()
            .parse::<i32>()
            .map(InvoiceId)
            .map_err(|_| AppError::BadRequest(format!("invalid invoice id: {}", raw)))
    }
}

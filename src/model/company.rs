//! Company rows and request bodies.

use super::invoice::Invoice;
use crate::error::AppError;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// List projection: `{code, name}`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CompanySummary {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Company {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

/// A company together with every invoice it owns.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub invoices: Vec<Invoice>,
}

#[derive(Debug, Deserialize)]
pub struct NewCompany {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCompany {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("code", &self.code)?;
        require_text("name", &self.name)
    }
}

/// Partial update; omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct CompanyUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CompanyUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none() && self.description.is_none() {
            return Err(AppError::BadRequest("expected at least one of: name, description".into()));
        }
        if let Some(name) = &self.name {
            require_text("name", name)?;
        }
        Ok(())
    }
}

fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{} must not be blank", field)));
    }
    Ok(())
}

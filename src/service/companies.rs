//! SQL for the `companies` table.

use crate::error::AppError;
use crate::model::{Company, CompanyDetail, CompanySummary, CompanyUpdate, Invoice, NewCompany};
use sqlx::PgPool;

pub struct CompanyService;

impl CompanyService {
    /// All companies as `{code, name}`, ordered by code.
    pub async fn list(pool: &PgPool) -> Result<Vec<CompanySummary>, AppError> {
        tracing::debug!("list companies");
        let rows = sqlx::query_as::<_, CompanySummary>("SELECT code, name FROM companies ORDER BY code")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// One company with its invoices (ordered by id). `None` when the code is unknown.
    pub async fn get(pool: &PgPool, code: &str) -> Result<Option<CompanyDetail>, AppError> {
        tracing::debug!(code = %code, "get company");
        let company = sqlx::query_as::<_, Company>(
            "SELECT code, name, description FROM companies WHERE code = $1",
        )
        .bind(code)
        .fetch_optional(pool)
        .await?;
        let Some(company) = company else {
            return Ok(None);
        };

        let invoices = sqlx::query_as::<_, Invoice>(
            r#"
            SELECT id, comp_code, amt, paid, add_date, paid_date
            FROM invoices
            WHERE comp_code = $1
            ORDER BY id
            "#,
        )
        .bind(code)
        .fetch_all(pool)
        .await?;

        Ok(Some(CompanyDetail { company, invoices }))
    }

    pub async fn create(pool: &PgPool, body: &NewCompany) -> Result<Company, AppError> {
        tracing::debug!(code = %body.code, "create company");
        let row = sqlx::query_as::<_, Company>(
            r#"
            INSERT INTO companies (code, name, description)
            VALUES ($1, $2, $3)
            RETURNING code, name, description
            "#,
        )
        .bind(&body.code)
        .bind(&body.name)
        .bind(&body.description)
        .fetch_one(pool)
        .await?;
        Ok(row)
    }

    /// Replace the given fields; omitted ones are kept. `None` when the code is unknown.
    pub async fn update(pool: &PgPool, code: &str, body: &CompanyUpdate) -> Result<Option<Company>, AppError> {
        tracing::debug!(code = %code, "update company");
        let row = sqlx::query_as::<_, Company>(
            r#"
            UPDATE companies
            SET name = COALESCE($1, name),
                description = COALESCE($2, description)
            WHERE code = $3
            RETURNING code, name, description
            "#,
        )
        .bind(&body.name)
        .bind(&body.description)
        .bind(code)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Delete by code; invoices go with it (ON DELETE CASCADE). Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, code: &str) -> Result<bool, AppError> {
        tracing::debug!(code = %code, "delete company");
        let result = sqlx::query("DELETE FROM companies WHERE code = $1")
            .bind(code)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

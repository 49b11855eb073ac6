//! SQL for the `invoices` table.

use crate::error::AppError;
use crate::model::{Invoice, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};
use sqlx::PgPool;

pub struct InvoiceService;

impl InvoiceService {
    /// All invoices as `{id, comp_code}`, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<InvoiceSummary>, AppError> {
        tracing::debug!("list invoices");
        let rows = sqlx::query_as::<_, InvoiceSummary>("SELECT id, comp_code FROM invoices ORDER BY id")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// One invoice joined with its company. `None` when the id is unknown.
    pub async fn get(pool: &PgPool, id: i32) -> Result<Option<InvoiceDetail>, AppError> {
        tracing::debug!(id, "get invoice");
        let row = sqlx::query_as::<_, InvoiceCompanyRow>(
            r#"
            SELECT i.id, i.amt, i.paid, i.add_date, i.paid_date,
                   c.code, c.name, c.description
            FROM invoices i
            JOIN companies c ON c.code = i.comp_code
            WHERE i.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(InvoiceDetail::from))
    }

    /// Insert only if `comp_code` names an existing company. `None` when it does not.
    pub async fn create(pool: &PgPool, body: &NewInvoice) -> Result<Option<Invoice>, AppError> {
        tracing::debug!(comp_code = %body.comp_code, amt = %body.amt, "create invoice");
        let row = sqlx::query_as::<_, Invoice>(
            r#"
            INSERT INTO invoices (comp_code, amt)
            SELECT code, $2 FROM companies WHERE code = $1
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(&body.comp_code)
        .bind(body.amt)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Apply `amt` and/or `paid`. `paid_date` is set to today when `paid` goes false→true and
    /// cleared when it goes true→false. `None` when the id is unknown.
    pub async fn update(pool: &PgPool, id: i32, body: &InvoiceUpdate) -> Result<Option<Invoice>, AppError> {
        tracing::debug!(id, amt = ?body.amt, paid = ?body.paid, "update invoice");
        // Right-hand `paid` is the pre-update value.
        let row = sqlx::query_as::<_, Invoice>(
            r#"
            UPDATE invoices
            SET amt = COALESCE($1, amt),
                paid = COALESCE($2::BOOLEAN, paid),
                paid_date = CASE
                    WHEN $2::BOOLEAN IS NULL THEN paid_date
                    WHEN $2::BOOLEAN AND NOT paid THEN CURRENT_DATE
                    WHEN NOT $2::BOOLEAN THEN NULL
                    ELSE paid_date
                END
            WHERE id = $3
            RETURNING id, comp_code, amt, paid, add_date, paid_date
            "#,
        )
        .bind(body.amt)
        .bind(body.paid)
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Delete by id. Returns whether a row was removed.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, AppError> {
        tracing::debug!(id, "delete invoice");
        let result = sqlx::query("DELETE FROM invoices WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

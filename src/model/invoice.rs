//! Invoice rows and request bodies.

use super::company::Company;
use crate::error::AppError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// List projection: `{id, comp_code}`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct InvoiceSummary {
    pub id: i32,
    pub comp_code: String,
}

/// Full invoice row. `amt` serializes as a decimal string (`"125.00"`).
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Invoice {
    pub id: i32,
    pub comp_code: String,
    pub amt: Decimal,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

/// Invoice joined with its owning company; `comp_code` is replaced by `company`.
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceDetail {
    pub id: i32,
    pub amt: Decimal,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub company: Company,
}

/// Row shape of the invoice/company join.
#[derive(Debug, FromRow)]
pub struct InvoiceCompanyRow {
    pub id: i32,
    pub amt: Decimal,
    pub paid: bool,
    pub add_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<InvoiceCompanyRow> for InvoiceDetail {
    fn from(row: InvoiceCompanyRow) -> Self {
        InvoiceDetail {
            id: row.id,
            amt: row.amt,
            paid: row.paid,
            add_date: row.add_date,
            paid_date: row.paid_date,
            company: Company {
                code: row.code,
                name: row.name,
                description: row.description,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NewInvoice {
    pub comp_code: String,
    pub amt: Decimal,
}

impl NewInvoice {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.comp_code.trim().is_empty() {
            return Err(AppError::BadRequest("comp_code must not be blank".into()));
        }
        validate_amt(self.amt)
    }
}

/// Partial update. `paid` drives `paid_date`: set to today on false→true, cleared on true→false.
#[derive(Debug, Default, Deserialize)]
pub struct InvoiceUpdate {
    #[serde(default)]
    pub amt: Option<Decimal>,
    #[serde(default)]
    pub paid: Option<bool>,
}

impl InvoiceUpdate {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.amt {
            None if self.paid.is_none() => Err(AppError::BadRequest("expected at least one of: amt, paid".into())),
            None => Ok(()),
            Some(amt) => validate_amt(amt),
        }
    }
}

/// `amt` must fit `NUMERIC(10,2)` exactly: positive, at most two decimal places, below 10^8.
fn validate_amt(amt: Decimal) -> Result<(), AppError> {
    if amt <= Decimal::ZERO {
        return Err(AppError::BadRequest("amt must be positive".into()));
    }
    if amt.normalize().scale() > 2 {
        return Err(AppError::BadRequest("amt must have at most 2 decimal places".into()));
    }
    if amt >= Decimal::new(100_000_000, 0) {
        return Err(AppError::BadRequest("amt must be less than 100000000".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn amt_accepts_numbers_and_strings() {
        let from_number: NewInvoice = serde_json::from_value(json!({"comp_code": "pet", "amt": 125})).unwrap();
        let from_string: NewInvoice = serde_json::from_value(json!({"comp_code": "pet", "amt": "125.50"})).unwrap();
        assert_eq!(from_number.amt, Decimal::new(125, 0));
        assert_eq!(from_string.amt, Decimal::new(12550, 2));
    }

    #[test]
    fn non_positive_amounts_are_rejected() {
        for amt in ["0", "-3.10"] {
            let body: NewInvoice = serde_json::from_value(json!({"comp_code": "pet", "amt": amt})).unwrap();
            assert!(matches!(body.validate(), Err(AppError::BadRequest(msg)) if msg == "amt must be positive"));
        }
    }

    #[test]
    fn amounts_the_column_cannot_hold_are_rejected() {
        let cases = [
            (json!(0.001), "amt must have at most 2 decimal places"),
            (json!("0.004"), "amt must have at most 2 decimal places"),
            (json!("125.555"), "amt must have at most 2 decimal places"),
            (json!(1e9), "amt must be less than 100000000"),
            (json!("100000000"), "amt must be less than 100000000"),
        ];
        for (amt, expected) in cases {
            let body: NewInvoice = serde_json::from_value(json!({"comp_code": "pet", "amt": amt})).unwrap();
            assert!(
                matches!(body.validate(), Err(AppError::BadRequest(ref msg)) if msg == expected),
                "{amt}"
            );
        }
    }

    #[test]
    fn amounts_at_the_column_edges_are_accepted() {
        for amt in ["0.01", "125.50", "125.500", "99999999.99"] {
            let body: NewInvoice = serde_json::from_value(json!({"comp_code": "pet", "amt": amt})).unwrap();
            body.validate().unwrap();
        }
    }

    #[test]
    fn missing_comp_code_fails_to_deserialize() {
        assert!(serde_json::from_value::<NewInvoice>(json!({"amt": 10})).is_err());
    }

    #[test]
    fn update_needs_a_field() {
        assert!(InvoiceUpdate::default().validate().is_err());
        InvoiceUpdate { paid: Some(true), ..Default::default() }.validate().unwrap();
        assert!(InvoiceUpdate { amt: Some(Decimal::ZERO), paid: Some(true) }.validate().is_err());
        assert!(InvoiceUpdate { amt: Some(Decimal::new(1, 3)), paid: None }.validate().is_err());
    }

    #[test]
    fn detail_nests_company_in_place_of_comp_code() {
        let row = InvoiceCompanyRow {
            id: 3,
            amt: Decimal::new(9999, 2),
            paid: true,
            add_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            paid_date: NaiveDate::from_ymd_opt(2024, 1, 9),
            code: "ibm".into(),
            name: "IBM".into(),
            description: None,
        };
        let value = serde_json::to_value(InvoiceDetail::from(row)).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 3,
                "amt": "99.99",
                "paid": true,
                "add_date": "2024-01-02",
                "paid_date": "2024-01-09",
                "company": {"code": "ibm", "name": "IBM", "description": null}
            })
        );
        assert!(value.get("comp_code").is_none());
    }
}

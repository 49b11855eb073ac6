//! Routers per resource, merged by `crate::app`.

mod common;
mod companies;
mod invoices;

pub use common::common_routes;
pub use companies::company_routes;
pub use invoices::invoice_routes;

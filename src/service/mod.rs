//! One service per table; each method issues a single parameterized statement.

mod companies;
mod invoices;
pub use companies::CompanyService;
pub use invoices::InvoiceService;

//! Row types, request bodies and their validation.

mod company;
mod invoice;

pub use company::{Company, CompanyDetail, CompanySummary, CompanyUpdate, NewCompany};
pub use invoice::{Invoice, InvoiceCompanyRow, InvoiceDetail, InvoiceSummary, InvoiceUpdate, NewInvoice};

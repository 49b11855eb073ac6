//! Request extractors that reject with `AppError`.

mod invoice_id;
mod json;

pub use invoice_id::InvoiceId;
pub use json::JsonBody;

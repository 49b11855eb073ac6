//! biztime: REST backend for companies and their invoices on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use routes::{common_routes, company_routes, invoice_routes};
pub use service::{CompanyService, InvoiceService};
pub use state::AppState;
pub use store::{create_pool, ensure_schema};

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Full application router: resources, common routes, JSON 404 fallback, tracing and body limit.
pub fn app(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(company_routes(state.clone()))
        .merge(invoice_routes(state))
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(body_limit_bytes)),
        )
}

async fn route_not_found() -> AppError {
    AppError::NotFound("route not found".into())
}

//! Shared application state for all routes.

use sqlx::PgPool;

/// Owned by `main` and cloned into every router; the pool is reference counted internally.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState { pool }
    }
}

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod pricing;
pub mod ui;

use std::sync::Arc;

use sqlx::PgPool;

use crate::pricing::PricingHandler;

/// Shared application state available to all handlers via axum's State extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub pricing: Arc<dyn PricingHandler>,
    /// Request bodies above this many bytes are rejected with 413.
    pub max_body_bytes: usize,
}

/// Body limit used when none is configured (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

impl axum::extract::FromRef<AppState> for PgPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

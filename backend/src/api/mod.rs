pub mod fragments;
pub mod health;
pub mod organizations;
pub mod pricing;

use axum::{Router, extract::DefaultBodyLimit, routing::{get, post}};
use crate::AppState;

pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_body_bytes);

    Router::new()
        .route("/health", get(health::check))
        // Organizations
        .route("/api/organizations", get(organizations::list).post(organizations::create))
        .route(
            "/api/organizations/{id}",
            get(organizations::get)
                .put(organizations::update)
                .delete(organizations::delete),
        )
        // Pricing
        .route("/pricing", post(pricing::forward))
        // Server-rendered fragments
        .route("/fragments/skeleton", get(fragments::skeleton))
        .layer(body_limit)
        .with_state(state)
}

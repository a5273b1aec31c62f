#![allow(dead_code)]
use std::{net::SocketAddr, sync::Arc, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use orgsite_backend::{api, pricing::HttpPricingHandler, AppState, DEFAULT_MAX_BODY_BYTES};

fn database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .expect("TEST_DATABASE_URL must be set; tests write/delete data and should not run against a shared database")
}

/// Spin up a real Axum server on a random port backed by the test database.
/// Test isolation comes from unique organization names and per-test cleanup.
pub async fn setup_test_app() -> (SocketAddr, PgPool) {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url())
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let pricing = HttpPricingHandler::new(None, Duration::from_secs(5))
        .expect("Failed to build pricing handler");
    let state = AppState {
        pool: pool.clone(),
        pricing: Arc::new(pricing),
        max_body_bytes: DEFAULT_MAX_BODY_BYTES,
    };

    let addr = serve(api::router(state)).await;
    (addr, pool)
}

/// Serve any router on a random loopback port.
pub async fn serve(app: axum::Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    addr
}

/// A name no other test run will use.
pub fn unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, &Uuid::new_v4().to_string()[..8])
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::new()
}

pub async fn cleanup_org(pool: &PgPool, id: Uuid) {
    let _ = sqlx::query("DELETE FROM organizations WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await;
}

pub async fn cleanup_org_by_name(pool: &PgPool, name: &str) {
    let _ = sqlx::query("DELETE FROM organizations WHERE name = $1")
        .bind(name)
        .execute(pool)
        .await;
}

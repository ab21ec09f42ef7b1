//! Development HTTP server.
//!
//! The schema exposes no business routes; the server only reports that it
//! is alive and which migrations the database carries.

use crate::storage::AuctionDatabase;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use std::sync::{Arc, Mutex};
use tower_http::trace::TraceLayer;

/// Shared database handle for request handlers.
pub type Db = Arc<Mutex<AuctionDatabase>>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub migrations: usize,
}

pub fn router(db: Db) -> Router {
    Router::new()
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

/// GET /health: liveness plus applied migration count.
pub async fn health(State(db): State<Db>) -> Result<Json<HealthResponse>, StatusCode> {
    let guard = db.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let migrations = guard.applied_migrations().map_err(|e| {
        tracing::error!("failed to read migrations: {:#}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        migrations: migrations.len(),
    }))
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(db: AuctionDatabase, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(Mutex::new(db)));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("development server listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

//! # plankit-server
//!
//! Minimal REST CRUD backend for completed MVP plans, served with
//! `axum` + `tokio`.
//!
//! Endpoints:
//! - GET    /api/health              - Server status
//! - GET    /api/mvp-plans?userId=   - Plans for a user ([] without userId)
//! - GET    /api/mvp-plans/:id       - Single plan or 404
//! - POST   /api/mvp-plans           - Create (400 with itemized issues)
//! - PUT    /api/mvp-plans/:id       - Partial update
//! - DELETE /api/mvp-plans/:id       - Remove (204 / 404)
//!
//! All responses use Content-Type: application/json. CORS is permissive
//! for local development.

pub mod routes;
pub mod storage;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use routes::{
    create_plan, delete_plan, get_plan, health, list_plans, update_plan, AppState, SharedState,
};
pub use storage::{MemStorage, MvpPlan, NewPlan, PlanPatch, PlanStorage, ValidationIssue};

/// Build the API router over a storage backend.
pub fn router(storage: Arc<dyn PlanStorage>) -> Router {
    let state: SharedState = Arc::new(AppState { storage });

    Router::new()
        .route("/api/health", get(health))
        .route("/api/mvp-plans", get(list_plans).post(create_plan))
        .route(
            "/api/mvp-plans/:id",
            get(get_plan).put(update_plan).delete(delete_plan),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serve the plan API on `addr` until the task is stopped.
pub async fn serve(addr: &str, storage: Arc<dyn PlanStorage>) -> anyhow::Result<()> {
    let app = router(storage);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("plan API listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

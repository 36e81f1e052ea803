//! HTTP handlers for the plan CRUD API
//!
//! Error classification: client input problems are 400 with itemized
//! issues, missing plans are 404, anything unexpected is a generic 500.
//! Nothing here can take the server process down.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;
use uuid::Uuid;

use crate::storage::{parse_new_plan, parse_plan_patch, PlanStorage, ValidationIssue};

/// Application state shared across request handlers.
pub struct AppState {
    pub storage: Arc<dyn PlanStorage>,
}

pub type SharedState = Arc<AppState>;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// GET /api/mvp-plans?userId= — plans for one user, `[]` without a userId.
pub async fn list_plans(
    State(app): State<SharedState>,
    Query(params): Query<ListParams>,
) -> Response {
    let Some(user_id) = params.user_id else {
        return Json(Value::Array(Vec::new())).into_response();
    };

    match app.storage.plans_by_user(&user_id).await {
        Ok(plans) => Json(plans).into_response(),
        Err(e) => {
            error!("listing plans for {} failed: {}", user_id, e);
            internal_error("Failed to fetch MVP plans")
        }
    }
}

/// GET /api/mvp-plans/:id
pub async fn get_plan(State(app): State<SharedState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_plan_id(&id) else {
        return not_found();
    };

    match app.storage.get_plan(id).await {
        Ok(Some(plan)) => Json(plan).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!("fetching plan {} failed: {}", id, e);
            internal_error("Failed to fetch MVP plan")
        }
    }
}

/// POST /api/mvp-plans
pub async fn create_plan(State(app): State<SharedState>, Json(body): Json<Value>) -> Response {
    let new_plan = match parse_new_plan(&body) {
        Ok(new_plan) => new_plan,
        Err(issues) => return invalid_plan_data(issues),
    };

    match app.storage.create_plan(new_plan).await {
        Ok(plan) => (StatusCode::CREATED, Json(plan)).into_response(),
        Err(e) => {
            error!("creating plan failed: {}", e);
            internal_error("Failed to create MVP plan")
        }
    }
}

/// PUT /api/mvp-plans/:id
pub async fn update_plan(
    State(app): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let Some(id) = parse_plan_id(&id) else {
        return not_found();
    };

    let patch = match parse_plan_patch(&body) {
        Ok(patch) => patch,
        Err(issues) => return invalid_plan_data(issues),
    };

    match app.storage.update_plan(id, patch).await {
        Ok(Some(plan)) => Json(plan).into_response(),
        Ok(None) => not_found(),
        Err(e) => {
            error!("updating plan {} failed: {}", id, e);
            internal_error("Failed to update MVP plan")
        }
    }
}

/// DELETE /api/mvp-plans/:id
pub async fn delete_plan(State(app): State<SharedState>, Path(id): Path<String>) -> Response {
    let Some(id) = parse_plan_id(&id) else {
        return not_found();
    };

    match app.storage.delete_plan(id).await {
        Ok(true) => StatusCode::NO_CONTENT.into_response(),
        Ok(false) => not_found(),
        Err(e) => {
            error!("deleting plan {} failed: {}", id, e);
            internal_error("Failed to delete MVP plan")
        }
    }
}

/// GET /api/health
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "plankit-server"
    }))
}

/// Identifiers that are not UUIDs cannot name a stored plan, so they
/// fall under "not found" rather than "bad request".
fn parse_plan_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"message": "MVP plan not found"})),
    )
        .into_response()
}

fn invalid_plan_data(issues: Vec<ValidationIssue>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "message": "Invalid plan data",
            "errors": issues,
        })),
    )
        .into_response()
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": message })),
    )
        .into_response()
}

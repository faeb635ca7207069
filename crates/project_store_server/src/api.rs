//! HTTP handlers for the project API.
//!
//! # Responsibility
//! - Translate requests into `ProjectService` calls and results into JSON.
//! - Run blocking store I/O off the async workers.
//!
//! # Invariants
//! - Every error response has the `{"error": ...}` shape.
//! - Handlers never panic; a failed blocking task maps to 500.

use crate::error::ApiError;
use crate::{AppState, SharedProjectService, SERVICE_NAME};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use log::error;
use project_store_core::{
    core_version, format_timestamp, Project, ProjectId, ProjectPayload, ServiceResult,
};
use serde_json::{json, Value};
use std::sync::Arc;

type ApiResult<T> = Result<T, ApiError>;

async fn run_blocking<T, F>(state: &AppState, operation: &'static str, work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce(&SharedProjectService) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    match tokio::task::spawn_blocking(move || work(&service)).await {
        Ok(result) => result.map_err(ApiError::from),
        Err(err) => {
            error!(
                "event=blocking_task module=api status=error operation={} error={}",
                operation, err
            );
            Err(ApiError::Unexpected)
        }
    }
}

pub(crate) async fn list_projects(State(state): State<AppState>) -> ApiResult<Json<Vec<Project>>> {
    let projects = run_blocking(&state, "list", |service| service.list()).await?;
    Ok(Json(projects))
}

pub(crate) async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Project>> {
    let id = ProjectId::from(id);
    let project = run_blocking(&state, "get", move |service| service.get(&id)).await?;
    Ok(Json(project))
}

pub(crate) async fn create_project(
    State(state): State<AppState>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;
    let project = run_blocking(&state, "create", move |service| service.create(payload)).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

pub(crate) async fn update_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProjectPayload>, JsonRejection>,
) -> ApiResult<Json<Project>> {
    let Json(payload) = payload?;
    let id = ProjectId::from(id);
    let project = run_blocking(&state, "update", move |service| {
        service.update(&id, payload)
    })
    .await?;
    Ok(Json(project))
}

pub(crate) async fn delete_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = ProjectId::from(id);
    run_blocking(&state, "delete", move |service| service.delete(&id)).await?;
    Ok(Json(json!({ "message": "Project deleted successfully" })))
}

pub(crate) async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "timestamp": format_timestamp(Utc::now()),
        "version": core_version(),
    }))
}

pub(crate) async fn index() -> Json<Value> {
    Json(json!({
        "service": SERVICE_NAME,
        "version": core_version(),
        "description": "CRUD API for transportation project evaluation scores",
        "endpoints": {
            "health": "GET /api/health",
            "listProjects": "GET /api/projects",
            "getProject": "GET /api/projects/:id",
            "createProject": "POST /api/projects",
            "updateProject": "PUT /api/projects/:id",
            "deleteProject": "DELETE /api/projects/:id",
        },
    }))
}

pub(crate) async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

//! HTTP/JSON surface for the project store.
//!
//! # Responsibility
//! - Wire the core `ProjectService` into an axum router.
//! - Bootstrap process state (store handle, startup seeding) from config.

use axum::routing::get;
use axum::Router;
use log::info;
use project_store_core::{JsonFileStore, ProjectService, ProjectStore, ServiceError};
use std::fmt::{Display, Formatter};
use std::sync::Arc;

mod api;
pub mod config;
pub mod error;

pub use config::ServerConfig;
pub use error::ApiError;

pub const SERVICE_NAME: &str = "project-store";

/// Service handle shared by every request.
pub type SharedProjectService = Arc<ProjectService<Box<dyn ProjectStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub service: SharedProjectService,
}

impl AppState {
    pub fn new(store: impl ProjectStore + 'static) -> Self {
        let store: Box<dyn ProjectStore> = Box::new(store);
        Self::from_service(ProjectService::new(store))
    }

    pub fn from_service(service: ProjectService<Box<dyn ProjectStore>>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Startup failure of the server process.
#[derive(Debug)]
pub enum StartupError {
    Config(String),
    Logging(String),
    Seed(ServiceError),
    Io(std::io::Error),
}

impl Display for StartupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(message) => write!(f, "invalid configuration: {message}"),
            Self::Logging(message) => write!(f, "logging setup failed: {message}"),
            Self::Seed(err) => write!(f, "failed to seed sample projects: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Seed(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Config(_) | Self::Logging(_) => None,
        }
    }
}

impl From<std::io::Error> for StartupError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Opens the configured document store and seeds it when enabled and empty.
pub fn prepare_state(config: &ServerConfig) -> Result<AppState, StartupError> {
    let store = JsonFileStore::new(&config.data_file).with_read_policy(config.read_policy);
    info!(
        "event=store_open module=server status=ok path={} read_policy={:?}",
        store.path().display(),
        store.read_policy()
    );
    let state = AppState::new(store);

    if config.seed_on_start {
        state.service.seed_if_empty().map_err(StartupError::Seed)?;
    }
    Ok(state)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/api/health", get(api::health))
        .route(
            "/api/projects",
            get(api::list_projects).post(api::create_project),
        )
        .route(
            "/api/projects/:id",
            get(api::get_project)
                .put(api::update_project)
                .delete(api::delete_project),
        )
        .fallback(api::route_not_found)
        .with_state(state)
}

//! Core domain logic for the project store.
//! This crate is the single source of truth for record invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{format_timestamp, Project, ProjectId, ProjectPayload};
pub use service::clock::{Clock, SystemClock};
pub use service::project_service::{ProjectService, ServiceError, ServiceResult};
pub use service::seed::{sample_payloads, SAMPLE_PROJECT_COUNT};
pub use store::{
    JsonFileStore, MemoryStore, ProjectStore, ReadFailurePolicy, StoreError, StoreResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}

//! In-process project store.
//!
//! Holds the collection in memory with the same whole-collection semantics as
//! the file store. Used by tests and by embedders that do not need a document
//! on disk.

use super::{ProjectStore, StoreResult};
use crate::model::project::Project;
use std::sync::{Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    projects: Mutex<Vec<Project>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `projects`.
    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
        }
    }
}

impl ProjectStore for MemoryStore {
    fn load(&self) -> StoreResult<Vec<Project>> {
        let projects = self.projects.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(projects.clone())
    }

    fn save(&self, projects: &[Project]) -> StoreResult<()> {
        let mut stored = self.projects.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = projects.to_vec();
        Ok(())
    }
}

//! Project use-case service.
//!
//! # Responsibility
//! - Provide list/get/create/update/delete entry points over a `ProjectStore`.
//! - Assign identity and timestamps; apply shallow-merge updates.
//! - Seed the sample collection into an empty store.
//!
//! # Invariants
//! - Every mutation runs load → mutate → save under one writer lock, so two
//!   concurrent mutations can never overwrite each other's result.
//! - The store is only written after the in-memory mutation succeeded.

use crate::model::project::{Project, ProjectId, ProjectPayload};
use crate::service::clock::{Clock, SystemClock};
use crate::service::seed::sample_payloads;
use crate::store::{ProjectStore, StoreError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level failure.
#[derive(Debug)]
pub enum ServiceError {
    NotFound(ProjectId),
    Persistence(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Persistence(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Persistence(value)
    }
}

/// Use-case service over an injected project store.
pub struct ProjectService<S: ProjectStore> {
    store: S,
    clock: Arc<dyn Clock>,
    write_lock: Mutex<()>,
}

impl<S: ProjectStore> ProjectService<S> {
    /// Creates a service using the system clock.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a service with a caller-provided time source.
    pub fn with_clock(store: S, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every project in insertion order.
    pub fn list(&self) -> ServiceResult<Vec<Project>> {
        Ok(self.store.load()?)
    }

    /// Gets one project by ID.
    pub fn get(&self, id: &ProjectId) -> ServiceResult<Project> {
        self.store
            .load()?
            .into_iter()
            .find(|project| &project.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))
    }

    /// Creates a project from an arbitrary payload and appends it.
    ///
    /// # Contract
    /// - Assigns a fresh ID and `createdAt == updatedAt`.
    /// - Known fields with an unexpected JSON type are stored as given.
    /// - Returns the record as persisted.
    pub fn create(&self, payload: ProjectPayload) -> ServiceResult<Project> {
        let _guard = self.lock_writes();
        let mut projects = self.store.load()?;
        let project = Project::from_payload(payload, self.clock.now());
        projects.push(project.clone());
        self.store.save(&projects)?;

        info!(
            "event=project_create module=service status=ok id={} total={}",
            project.id,
            projects.len()
        );
        Ok(project)
    }

    /// Shallow-merges `payload` over an existing project.
    ///
    /// Returns the merged record. `id` and `createdAt` are never changed.
    pub fn update(&self, id: &ProjectId, payload: ProjectPayload) -> ServiceResult<Project> {
        let _guard = self.lock_writes();
        let mut projects = self.store.load()?;
        let project = projects
            .iter_mut()
            .find(|project| &project.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;
        project.merge_payload(payload, self.clock.now());
        let merged = project.clone();
        self.store.save(&projects)?;

        info!("event=project_update module=service status=ok id={}", id);
        Ok(merged)
    }

    /// Removes a project and returns the removed record.
    pub fn delete(&self, id: &ProjectId) -> ServiceResult<Project> {
        let _guard = self.lock_writes();
        let mut projects = self.store.load()?;
        let position = projects
            .iter()
            .position(|project| &project.id == id)
            .ok_or_else(|| ServiceError::NotFound(id.clone()))?;
        let removed = projects.remove(position);
        self.store.save(&projects)?;

        info!(
            "event=project_delete module=service status=ok id={} remaining={}",
            id,
            projects.len()
        );
        Ok(removed)
    }

    /// Persists the sample collection when the store is empty.
    ///
    /// Returns how many records were written (`0` when data already exists).
    pub fn seed_if_empty(&self) -> ServiceResult<usize> {
        let _guard = self.lock_writes();
        let existing = self.store.load()?;
        if !existing.is_empty() {
            info!(
                "event=seed module=service status=skipped existing={}",
                existing.len()
            );
            return Ok(0);
        }

        let now = self.clock.now();
        let projects = sample_payloads()
            .into_iter()
            .map(|payload| Project::from_payload(payload, now))
            .collect::<Vec<_>>();
        self.store.save(&projects)?;

        info!(
            "event=seed module=service status=ok seeded={}",
            projects.len()
        );
        Ok(projects.len())
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("event=write_lock module=service status=recovered reason=poisoned");
            PoisonError::into_inner(poisoned)
        })
    }
}

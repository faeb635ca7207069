//! JSON document store on local disk.
//!
//! # Responsibility
//! - Read the collection from a single JSON array document.
//! - Only a document that is not an array of objects counts as corrupt; field
//!   values inside a record never fail the load.
//! - Atomically replace the document on save via a `.tmp` sibling + rename.
//!
//! # Invariants
//! - The parent directory is created on first save.
//! - No `.tmp` sibling is left behind after a successful save.

use super::{ProjectStore, ReadFailurePolicy, StoreError, StoreResult};
use crate::model::project::Project;
use log::{debug, error, info};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Project collection persisted as one pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    read_policy: ReadFailurePolicy,
}

impl JsonFileStore {
    /// Creates a store for `path` with the default degrade-on-read-failure policy.
    ///
    /// Nothing is touched on disk until the first `load` or `save`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            read_policy: ReadFailurePolicy::default(),
        }
    }

    pub fn with_read_policy(mut self, read_policy: ReadFailurePolicy) -> Self {
        self.read_policy = read_policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_policy(&self) -> ReadFailurePolicy {
        self.read_policy
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("projects.json"));
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn on_read_failure(&self, err: StoreError) -> StoreResult<Vec<Project>> {
        match self.read_policy {
            ReadFailurePolicy::Degrade => {
                error!(
                    "event=store_load module=store status=degraded policy=degrade error={}",
                    err
                );
                Ok(Vec::new())
            }
            ReadFailurePolicy::Strict => {
                error!(
                    "event=store_load module=store status=error policy=strict error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn write_atomically(&self, bytes: &[u8]) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
                info!(
                    "event=store_init module=store status=ok created_dir={}",
                    parent.display()
                );
            }
        }
        let tmp = self.temp_path();
        std::fs::write(&tmp, bytes)?;
        if let Err(err) = std::fs::rename(&tmp, &self.path) {
            let _ = std::fs::remove_file(&tmp);
            return Err(err);
        }
        Ok(())
    }
}

impl ProjectStore for JsonFileStore {
    fn load(&self) -> StoreResult<Vec<Project>> {
        let started_at = Instant::now();
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=store status=ok count=0 missing=true path={}",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(source) => {
                return self.on_read_failure(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match serde_json::from_slice::<Vec<Project>>(&bytes) {
            Ok(projects) => {
                debug!(
                    "event=store_load module=store status=ok count={} duration_ms={}",
                    projects.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(projects)
            }
            Err(source) => self.on_read_failure(StoreError::Corrupt {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn save(&self, projects: &[Project]) -> StoreResult<()> {
        let started_at = Instant::now();
        let bytes = serde_json::to_vec_pretty(projects).map_err(|err| {
            error!(
                "event=store_save module=store status=error error_code=serialize_failed error={}",
                err
            );
            StoreError::Serialize(err)
        })?;

        match self.write_atomically(&bytes) {
            Ok(()) => {
                debug!(
                    "event=store_save module=store status=ok count={} bytes={} duration_ms={}",
                    projects.len(),
                    bytes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(source) => {
                error!(
                    "event=store_save module=store status=error error_code=write_failed path={} error={}",
                    self.path.display(),
                    source
                );
                Err(StoreError::Write {
                    path: self.path.clone(),
                    source,
                })
            }
        }
    }
}

//! Whole-document storage for the project collection.
//!
//! # Responsibility
//! - Provide the full collection as a value and persist full replacements.
//! - Keep file-format and I/O details out of the service layer.
//!
//! # Invariants
//! - `save` replaces the whole document atomically; readers never observe a
//!   partially written collection.
//! - A missing document is an empty collection, never an error.
//! - Unreadable documents follow the store's `ReadFailurePolicy`.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use crate::model::project::Project;

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage failure for load/save of the persisted document.
#[derive(Debug)]
pub enum StoreError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    Serialize(serde_json::Error),
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    /// Whether this failure happened while reading the document.
    pub fn is_read_failure(&self) -> bool {
        matches!(self, Self::Read { .. } | Self::Corrupt { .. })
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::Corrupt { path, source } => {
                write!(f, "malformed project document `{}`: {source}", path.display())
            }
            Self::Serialize(err) => write!(f, "failed to serialize projects: {err}"),
            Self::Write { path, source } => {
                write!(f, "failed to write `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Corrupt { source, .. } => Some(source),
            Self::Serialize(err) => Some(err),
            Self::Write { source, .. } => Some(source),
        }
    }
}

/// What `load` does when the document exists but cannot be read or parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadFailurePolicy {
    /// Log the failure and report an empty collection.
    #[default]
    Degrade,
    /// Surface the failure to the caller.
    Strict,
}

/// Storage accessor for the project collection.
pub trait ProjectStore: Send + Sync {
    /// Returns every persisted project in insertion order.
    fn load(&self) -> StoreResult<Vec<Project>>;
    /// Replaces the persisted collection with `projects`.
    fn save(&self, projects: &[Project]) -> StoreResult<()>;
}

impl<T: ProjectStore + ?Sized> ProjectStore for Box<T> {
    fn load(&self) -> StoreResult<Vec<Project>> {
        (**self).load()
    }

    fn save(&self, projects: &[Project]) -> StoreResult<()> {
        (**self).save(projects)
    }
}

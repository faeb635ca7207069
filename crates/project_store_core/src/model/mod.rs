//! Domain model for evaluated transportation projects.
//!
//! # Responsibility
//! - Define the canonical project record persisted in the collection document.
//! - Own payload-to-record conversion so every write path shares one shape.
//!
//! # Invariants
//! - Every record is identified by a stable `ProjectId`.
//! - Deletion is a hard removal; there are no tombstones.

pub mod project;

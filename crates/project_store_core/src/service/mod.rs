//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate load → mutate → save cycles over the project store.
//! - Keep HTTP and process wiring decoupled from storage details.

pub mod clock;
pub mod project_service;
pub mod seed;

//! Domain model for the project dashboard.
//!
//! # Responsibility
//! - Define the project record and its enumerations.
//! - Define the `all` pseudo-category used only for view selection.
//!
//! # Invariants
//! - Every project is identified by a stable `ProjectId`.
//! - Core never mutates a fetched record in place; writes go through drafts.

pub mod project;

//! Data store boundary for project records.
//!
//! # Responsibility
//! - Define the fetch/create/update contract the dashboard relies on.
//! - Provide SQLite and snapshot-backed implementations.
//!
//! # Invariants
//! - Store writes validate records before persistence.
//! - Store APIs return semantic errors (`NotFound`) in addition to
//!   transport errors.

pub mod memory_repo;
pub mod project_repo;

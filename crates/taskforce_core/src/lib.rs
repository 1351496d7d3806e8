//! Core domain logic for the Task Force project dashboard.
//! This crate is the single source of truth for project invariants and the
//! project view engine.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod view;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::project::{
    CategoryFilter, Project, ProjectCategory, ProjectDraft, ProjectId, ProjectStatus,
    ProjectValidationError,
};
pub use repo::memory_repo::InMemoryProjectStore;
pub use repo::project_repo::{ProjectStore, RepoError, RepoResult, SqliteProjectStore};
pub use service::dashboard::DashboardSession;
pub use service::project_service::{ProjectService, ProjectServiceError, ServiceResult};
pub use view::engine::{
    build_dashboard, compute_tag_frequency, compute_visible_projects, is_visible,
    sort_by_started_first, DashboardView, TagCounts,
};
pub use view::state::{FormState, ViewState};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

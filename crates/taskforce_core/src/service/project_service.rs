//! Project use-case service.
//!
//! # Responsibility
//! - Provide create/update/status entry points for dashboard callers.
//! - Delegate persistence to a `ProjectStore` implementation.
//! - Emit structured events for every store round-trip.
//!
//! # Invariants
//! - Service APIs never bypass store validation.
//! - Service layer remains storage-agnostic.

use crate::model::project::{Project, ProjectDraft, ProjectId, ProjectStatus};
use crate::repo::project_repo::{ProjectStore, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ProjectServiceError>;

/// Service error for project use-cases.
#[derive(Debug)]
pub enum ProjectServiceError {
    /// Target project does not exist.
    ProjectNotFound(ProjectId),
    /// Form was submitted while closed.
    FormClosed,
    /// Store-level failure.
    Repo(RepoError),
}

impl Display for ProjectServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProjectNotFound(id) => write!(f, "project not found: {id}"),
            Self::FormClosed => write!(f, "project form is not open"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ProjectServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ProjectServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ProjectNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Use-case service over a project store.
pub struct ProjectService<S: ProjectStore> {
    store: S,
}

impl<S: ProjectStore> ProjectService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetches the full snapshot from the store.
    pub fn fetch_all(&self) -> ServiceResult<Vec<Project>> {
        let started_at = Instant::now();
        match self.store.fetch_all() {
            Ok(projects) => {
                info!(
                    "event=projects_fetch module=service status=ok count={} duration_ms={}",
                    projects.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(projects)
            }
            Err(err) => {
                error!(
                    "event=projects_fetch module=service status=error duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err.into())
            }
        }
    }

    /// Creates a project and returns it as stored.
    pub fn create_project(&self, draft: &ProjectDraft) -> ServiceResult<Project> {
        let created = self.store.create_project(draft).map_err(|err| {
            error!("event=project_create module=service status=error error={err}");
            err
        })?;
        info!(
            "event=project_create module=service status=ok project_id={} status_value={}",
            created.id, created.status
        );
        Ok(created)
    }

    /// Overwrites the fields present in `draft` on an existing project.
    pub fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> ServiceResult<()> {
        self.store.update_project(id, draft).map_err(|err| {
            error!("event=project_update module=service status=error project_id={id} error={err}");
            err
        })?;
        info!("event=project_update module=service status=ok project_id={id}");
        Ok(())
    }

    /// Saves the form: updates `editing` when set, creates otherwise, then
    /// returns a fresh snapshot.
    pub fn submit(
        &self,
        editing: Option<ProjectId>,
        draft: &ProjectDraft,
    ) -> ServiceResult<Vec<Project>> {
        match editing {
            Some(id) => self.update_project(id, draft)?,
            None => {
                self.create_project(draft)?;
            }
        }
        self.fetch_all()
    }

    /// Flips `started` to `concept`; any other status becomes `started`.
    ///
    /// Returns the status written to the store.
    pub fn toggle_started(&self, project: &Project) -> ServiceResult<ProjectStatus> {
        let next = if project.status == ProjectStatus::Started {
            ProjectStatus::Concept
        } else {
            ProjectStatus::Started
        };
        self.set_status(project.id, next)?;
        Ok(next)
    }

    /// Writes a new status, e.g. to archive a project as completed.
    pub fn set_status(&self, id: ProjectId, status: ProjectStatus) -> ServiceResult<()> {
        self.store
            .update_project(id, &ProjectDraft::status(status))
            .map_err(|err| {
                error!(
                    "event=project_status module=service status=error project_id={id} error={err}"
                );
                err
            })?;
        info!("event=project_status module=service status=ok project_id={id} status_value={status}");
        Ok(())
    }

    pub fn delete_project(&self, id: ProjectId) -> ServiceResult<()> {
        self.store.delete_project(id)?;
        info!("event=project_delete module=service status=ok project_id={id}");
        Ok(())
    }
}

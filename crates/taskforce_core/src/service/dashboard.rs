//! Dashboard session: snapshot, selection state and store round-trips.
//!
//! # Responsibility
//! - Hold the latest project snapshot next to the `ViewState`.
//! - Route form submissions and status toggles through `ProjectService`.
//! - Re-run the view engine on demand.
//!
//! # Invariants
//! - The snapshot is replaced only after a successful fetch.
//! - The form closes only after a successful save.

use crate::model::project::{Project, ProjectDraft, ProjectId, ProjectStatus};
use crate::repo::project_repo::ProjectStore;
use crate::service::project_service::{ProjectService, ProjectServiceError, ServiceResult};
use crate::view::engine::{build_dashboard, DashboardView};
use crate::view::state::{FormState, ViewState};
use log::{info, warn};

/// One dashboard instance bound to a store.
pub struct DashboardSession<S: ProjectStore> {
    service: ProjectService<S>,
    snapshot: Vec<Project>,
    state: ViewState,
}

impl<S: ProjectStore> DashboardSession<S> {
    /// Creates a session and loads the first snapshot.
    pub fn open(service: ProjectService<S>) -> ServiceResult<Self> {
        let snapshot = service.fetch_all()?;
        Ok(Self {
            service,
            snapshot,
            state: ViewState::default(),
        })
    }

    pub fn snapshot(&self) -> &[Project] {
        &self.snapshot
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ViewState {
        &mut self.state
    }

    /// Refetches from the store. On failure the previous snapshot stays.
    pub fn reload(&mut self) -> ServiceResult<()> {
        match self.service.fetch_all() {
            Ok(snapshot) => {
                info!(
                    "event=dashboard_reload module=service status=ok count={}",
                    snapshot.len()
                );
                self.snapshot = snapshot;
                Ok(())
            }
            Err(err) => {
                warn!(
                    "event=dashboard_reload module=service status=error kept={} error={err}",
                    self.snapshot.len()
                );
                Err(err)
            }
        }
    }

    /// Runs the view engine over the current snapshot and state.
    pub fn view(&self) -> DashboardView {
        build_dashboard(&self.snapshot, &self.state)
    }

    /// Saves the open form, closes it and reloads.
    ///
    /// # Errors
    /// - `FormClosed` when no form is open.
    /// - Store errors; the form stays open so the input is not lost.
    pub fn submit_form(&mut self, draft: &ProjectDraft) -> ServiceResult<()> {
        let editing = match self.state.form {
            FormState::Closed => return Err(ProjectServiceError::FormClosed),
            FormState::Creating => None,
            FormState::Editing(id) => Some(id),
        };
        self.snapshot = self.service.submit(editing, draft)?;
        self.state.close_form();
        Ok(())
    }

    /// Toggles `started` on a project from the snapshot and reloads.
    pub fn toggle_started(&mut self, id: ProjectId) -> ServiceResult<ProjectStatus> {
        let project = self
            .snapshot
            .iter()
            .find(|project| project.id == id)
            .ok_or(ProjectServiceError::ProjectNotFound(id))?;
        let next = self.service.toggle_started(project)?;
        self.reload()?;
        Ok(next)
    }

    /// Moves a project to `status` and reloads.
    pub fn set_status(&mut self, id: ProjectId, status: ProjectStatus) -> ServiceResult<()> {
        self.service.set_status(id, status)?;
        self.reload()
    }
}

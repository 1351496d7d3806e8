//! Snapshot-backed project store.
//!
//! # Responsibility
//! - Serve the hosted store's JSON row export through `ProjectStore`.
//! - Back service tests without a database.
//!
//! # Invariants
//! - Loaded rows are kept as decoded, including `Unknown` enum values.
//! - Write paths validate exactly like the SQLite store.

use crate::model::project::{Project, ProjectDraft, ProjectId};
use crate::repo::project_repo::{ProjectStore, RepoError, RepoResult};
use std::cell::RefCell;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// In-memory project store.
#[derive(Debug, Default)]
pub struct InMemoryProjectStore {
    rows: RefCell<Vec<Project>>,
}

impl InMemoryProjectStore {
    pub fn new(rows: Vec<Project>) -> Self {
        Self {
            rows: RefCell::new(rows),
        }
    }

    /// Decodes a JSON array of project rows.
    ///
    /// `null` tags decode as `""`; unrecognized enum values decode as
    /// `Unknown`.
    pub fn from_json(json: &str) -> RepoResult<Self> {
        let rows: Vec<Project> = serde_json::from_str(json)
            .map_err(|err| RepoError::InvalidData(format!("invalid project snapshot: {err}")))?;
        Ok(Self::new(rows))
    }
}

impl ProjectStore for InMemoryProjectStore {
    fn fetch_all(&self) -> RepoResult<Vec<Project>> {
        let mut rows = self.rows.borrow().clone();
        // Lexicographic on the status label, not lifecycle order; matches the
        // hosted store's `order("status", desc)`.
        rows.sort_by(|a, b| b.status.as_str().cmp(a.status.as_str()));
        Ok(rows)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        Ok(self.rows.borrow().iter().find(|row| row.id == id).cloned())
    }

    fn create_project(&self, draft: &ProjectDraft) -> RepoResult<Project> {
        let mut project = draft.clone().into_project(Uuid::new_v4())?;
        project.created_at = Some(now_epoch_ms());
        self.rows.borrow_mut().push(project.clone());
        Ok(project)
    }

    fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<()> {
        let mut rows = self.rows.borrow_mut();
        let row = rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(RepoError::NotFound(id))?;
        let mut updated = row.clone();
        updated.apply_draft(draft)?;
        *row = updated;
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|row| row.id != id);
        if rows.len() == before {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

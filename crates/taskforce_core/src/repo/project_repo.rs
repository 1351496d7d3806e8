//! Project store contract and SQLite implementation.
//!
//! # Responsibility
//! - Define the read/write boundary the dashboard consumes.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate the resulting record before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - `fetch_all` returns rows ordered by status descending.

use crate::db::DbError;
use crate::model::project::{
    Project, ProjectCategory, ProjectDraft, ProjectId, ProjectStatus, ProjectValidationError,
};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const PROJECT_SELECT_SQL: &str = "SELECT
    id,
    title,
    description,
    status,
    categories,
    tags,
    created_at
FROM projects";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error for project persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ProjectValidationError),
    Db(DbError),
    NotFound(ProjectId),
    InvalidData(String),
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "project not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid project data: {message}"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ProjectValidationError> for RepoError {
    fn from(value: ProjectValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data store boundary for project records.
pub trait ProjectStore {
    /// Returns every project, ordered by status descending.
    fn fetch_all(&self) -> RepoResult<Vec<Project>>;
    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>>;
    /// Creates a record from `draft` and returns it as stored.
    fn create_project(&self, draft: &ProjectDraft) -> RepoResult<Project>;
    /// Overwrites the fields present in `draft`.
    fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<()>;
    fn delete_project(&self, id: ProjectId) -> RepoResult<()>;
}

/// SQLite-backed project store.
pub struct SqliteProjectStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the `projects` table does not exist.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'projects'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(RepoError::MissingRequiredTable("projects"));
        }
        Ok(Self { conn })
    }
}

impl ProjectStore for SqliteProjectStore<'_> {
    fn fetch_all(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(&format!(
            "{PROJECT_SELECT_SQL} ORDER BY status DESC, created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }

    fn get_project(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PROJECT_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_project_row(row)?));
        }
        Ok(None)
    }

    fn create_project(&self, draft: &ProjectDraft) -> RepoResult<Project> {
        let project = draft.clone().into_project(Uuid::new_v4())?;

        let created_at: i64 = self.conn.query_row(
            "INSERT INTO projects (
                id,
                title,
                description,
                status,
                categories,
                tags
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING created_at;",
            params![
                project.id.to_string(),
                project.title.as_str(),
                project.description.as_str(),
                project.status.as_str(),
                project.category.as_str(),
                project.tags.as_str(),
            ],
            |row| row.get(0),
        )?;

        Ok(Project {
            created_at: Some(created_at),
            ..project
        })
    }

    fn update_project(&self, id: ProjectId, draft: &ProjectDraft) -> RepoResult<()> {
        let mut project = self.get_project(id)?.ok_or(RepoError::NotFound(id))?;
        project.apply_draft(draft)?;

        let changed = self.conn.execute(
            "UPDATE projects
             SET
                title = ?1,
                description = ?2,
                status = ?3,
                categories = ?4,
                tags = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?6;",
            params![
                project.title.as_str(),
                project.description.as_str(),
                project.status.as_str(),
                project.category.as_str(),
                project.tags.as_str(),
                id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }

    fn delete_project(&self, id: ProjectId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in projects.id"))
    })?;

    let status_text: String = row.get("status")?;
    let status = ProjectStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in projects.status"
        ))
    })?;

    let category_text: String = row.get("categories")?;
    let category = ProjectCategory::parse(&category_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in projects.categories"
        ))
    })?;

    let project = Project {
        id,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        category,
        tags: row.get("tags")?,
        created_at: row.get("created_at")?,
    };
    project.validate()?;
    Ok(project)
}

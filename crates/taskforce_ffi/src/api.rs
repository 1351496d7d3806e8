//! FFI use-case API for the dashboard UI shell.
//!
//! # Responsibility
//! - Expose dashboard reads and project writes to Dart via FRB.
//! - Flatten core types into string-keyed envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call opens the configured database; no connection is cached.

use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;
use taskforce_core::db::open_db;
use taskforce_core::{
    build_dashboard, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, CategoryFilter, CoreConfig, Project, ProjectCategory, ProjectDraft,
    ProjectId, ProjectService, ProjectStatus, ProjectStore, SqliteProjectStore, ViewState,
};

static DB_PATH: OnceLock<Result<PathBuf, String>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and an error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Initializes logging from `TASKFORCE_LOG_LEVEL` / `TASKFORCE_LOG_DIR`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging_from_env() -> String {
    let config = match CoreConfig::from_env() {
        Ok(config) => config,
        Err(err) => return err.to_string(),
    };
    let log_dir = config.log_dir.to_string_lossy().into_owned();
    init_logging(config.log_level.to_string(), log_dir)
}

/// Project row flattened for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    pub project_id: String,
    pub title: String,
    pub description: String,
    /// `concept|started|completed|abandoned|unknown`.
    pub status: String,
    /// Wire name kept as `categories`.
    pub categories: String,
    /// Trimmed, non-empty tag labels in stored order.
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCountItem {
    pub tag: String,
    pub count: u32,
}

/// Category menu entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilterItem {
    pub id: String,
    pub label: String,
}

/// Dashboard read envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardResponse {
    pub ok: bool,
    /// Visible projects, `started` first.
    pub items: Vec<ProjectItem>,
    /// Tag badges over all projects, sorted by tag.
    pub tag_counts: Vec<TagCountItem>,
    pub message: String,
}

/// Write envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectActionResponse {
    pub ok: bool,
    pub project_id: Option<String>,
    /// Status after the write, when the call changes status.
    pub status: Option<String>,
    pub message: String,
}

impl ProjectActionResponse {
    fn success(message: impl Into<String>, project_id: ProjectId) -> Self {
        Self {
            ok: true,
            project_id: Some(project_id.to_string()),
            status: None,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            project_id: None,
            status: None,
            message: message.into(),
        }
    }
}

/// Lists category filters in menu order.
#[flutter_rust_bridge::frb(sync)]
pub fn category_filters() -> Vec<CategoryFilterItem> {
    CategoryFilter::ALL
        .iter()
        .map(|filter| CategoryFilterItem {
            id: filter.as_str().to_string(),
            label: filter.label().to_string(),
        })
        .collect()
}

/// Lists the categories a project can be filed under, in menu order.
///
/// Same entries as `category_filters` without `all`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_categories() -> Vec<CategoryFilterItem> {
    ProjectCategory::KNOWN
        .iter()
        .map(|category| CategoryFilterItem {
            id: category.as_str().to_string(),
            label: CategoryFilter::from(*category).label().to_string(),
        })
        .collect()
}

/// Computes the dashboard for one selection.
///
/// # FFI contract
/// - `selected_category`: `all` or a category id; anything else fails.
/// - Blank `selected_tag` means no tag filter.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_view(
    selected_category: String,
    selected_tag: Option<String>,
    show_archive: bool,
) -> DashboardResponse {
    let Some(category) = CategoryFilter::parse(&selected_category) else {
        return dashboard_failure(format!("unknown category `{selected_category}`"));
    };
    let mut state = ViewState::default();
    state.select_category(category);
    if let Some(tag) = selected_tag {
        state.select_tag(tag);
    }
    state.set_show_archive(show_archive);

    let snapshot = match with_project_service(|service| {
        service.fetch_all().map_err(|e| e.to_string())
    }) {
        Ok(snapshot) => snapshot,
        Err(err) => return dashboard_failure(format!("dashboard_view failed: {err}")),
    };

    let view = build_dashboard(&snapshot, &state);
    let items = view.projects.iter().map(to_project_item).collect::<Vec<_>>();
    let tag_counts = view
        .tag_counts
        .into_iter()
        .map(|(tag, count)| TagCountItem {
            tag,
            count: u32::try_from(count).unwrap_or(u32::MAX),
        })
        .collect();
    let message = if items.is_empty() {
        "No projects.".to_string()
    } else {
        format!("Showing {} project(s).", items.len())
    };

    DashboardResponse {
        ok: true,
        items,
        tag_counts,
        message,
    }
}

/// Creates a project in `concept` status.
#[flutter_rust_bridge::frb(sync)]
pub fn project_create(
    title: String,
    description: String,
    category: String,
    tags: String,
) -> ProjectActionResponse {
    let Some(category) = ProjectCategory::parse(category.trim()) else {
        return ProjectActionResponse::failure(format!("unknown category `{category}`"));
    };
    let draft = ProjectDraft {
        title: Some(title.trim().to_string()),
        description: Some(description),
        status: None,
        category: Some(category),
        tags: Some(tags),
    };
    match with_project_service(|service| {
        service.create_project(&draft).map_err(|e| e.to_string())
    }) {
        Ok(project) => ProjectActionResponse::success("Project created.", project.id),
        Err(err) => ProjectActionResponse::failure(format!("project_create failed: {err}")),
    }
}

/// Updates the provided fields of one project.
#[flutter_rust_bridge::frb(sync)]
pub fn project_update(
    project_id: String,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    tags: Option<String>,
) -> ProjectActionResponse {
    let id = match parse_project_id(&project_id) {
        Ok(id) => id,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    let category = match category {
        Some(raw) => match ProjectCategory::parse(raw.trim()) {
            Some(category) => Some(category),
            None => return ProjectActionResponse::failure(format!("unknown category `{raw}`")),
        },
        None => None,
    };
    let draft = ProjectDraft {
        title: title.map(|value| value.trim().to_string()),
        description,
        status: None,
        category,
        tags,
    };
    match with_project_service(|service| {
        service.update_project(id, &draft).map_err(|e| e.to_string())
    }) {
        Ok(()) => ProjectActionResponse::success("Project updated.", id),
        Err(err) => ProjectActionResponse::failure(format!("project_update failed: {err}")),
    }
}

/// Flips a project between `started` and `concept`.
#[flutter_rust_bridge::frb(sync)]
pub fn project_toggle_started(project_id: String) -> ProjectActionResponse {
    let id = match parse_project_id(&project_id) {
        Ok(id) => id,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    let result = with_project_service(|service| {
        let project = service
            .store()
            .get_project(id)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("project not found: {id}"))?;
        service
            .toggle_started(&project)
            .map_err(|e| e.to_string())
    });
    match result {
        Ok(status) => with_status(ProjectActionResponse::success("Status toggled.", id), status),
        Err(err) => ProjectActionResponse::failure(format!("project_toggle_started failed: {err}")),
    }
}

/// Writes an explicit status, e.g. `completed` to archive a project.
#[flutter_rust_bridge::frb(sync)]
pub fn project_set_status(project_id: String, status: String) -> ProjectActionResponse {
    let id = match parse_project_id(&project_id) {
        Ok(id) => id,
        Err(message) => return ProjectActionResponse::failure(message),
    };
    let Some(status) = ProjectStatus::parse(status.trim()) else {
        return ProjectActionResponse::failure(format!("unknown status `{status}`"));
    };
    match with_project_service(|service| {
        service.set_status(id, status).map_err(|e| e.to_string())
    }) {
        Ok(()) => with_status(ProjectActionResponse::success("Status updated.", id), status),
        Err(err) => ProjectActionResponse::failure(format!("project_set_status failed: {err}")),
    }
}

fn with_status(mut response: ProjectActionResponse, status: ProjectStatus) -> ProjectActionResponse {
    response.status = Some(status.as_str().to_string());
    response
}

fn dashboard_failure(message: String) -> DashboardResponse {
    DashboardResponse {
        ok: false,
        items: Vec::new(),
        tag_counts: Vec::new(),
        message,
    }
}

fn to_project_item(project: &Project) -> ProjectItem {
    ProjectItem {
        project_id: project.id.to_string(),
        title: project.title.clone(),
        description: project.description.clone(),
        status: project.status.as_str().to_string(),
        categories: project.category.as_str().to_string(),
        tags: project
            .tag_labels()
            .filter(|label| !label.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn parse_project_id(raw: &str) -> Result<ProjectId, String> {
    ProjectId::parse_str(raw.trim()).map_err(|_| format!("invalid project id `{raw}`"))
}

fn resolve_db_path() -> Result<PathBuf, String> {
    DB_PATH
        .get_or_init(|| {
            CoreConfig::from_env()
                .map(|config| config.db_path)
                .map_err(|err| err.to_string())
        })
        .clone()
}

fn with_project_service<T>(
    f: impl FnOnce(&ProjectService<SqliteProjectStore<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path()?;
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error error={err}");
        format!("DB open failed: {err}")
    })?;
    let store =
        SqliteProjectStore::try_new(&conn).map_err(|err| format!("store init failed: {err}"))?;
    let service = ProjectService::new(store);
    f(&service)
}

// These tests write to the configured database (`TASKFORCE_DB_PATH`, or
// `taskforce.sqlite3` under the temp dir), so rows accumulate across runs.
// Each test filters on its own unique tag.
#[cfg(test)]
mod tests {
    use super::{
        category_filters, core_version, dashboard_view, init_logging, ping, project_categories,
        project_create, project_set_status, project_toggle_started, project_update,
    };
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn category_filters_start_with_all() {
        let filters = category_filters();
        assert_eq!(filters.len(), 5);
        assert_eq!(filters[0].id, "all");
        assert_eq!(filters[0].label, "On-going");
    }

    #[test]
    fn project_categories_omit_all_and_match_filter_labels() {
        let categories = project_categories();
        let ids = categories
            .iter()
            .map(|item| item.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["research", "analysis", "engineering", "miscellaneous"]);
        assert_eq!(categories, category_filters()[1..].to_vec());
    }

    #[test]
    fn dashboard_view_rejects_unknown_category() {
        let response = dashboard_view("cooking".to_string(), None, false);
        assert!(!response.ok);
        assert!(response.message.contains("cooking"));
    }

    #[test]
    fn created_project_shows_up_under_its_tag() {
        let tag = unique_token("ffi-tag");
        let created = project_create(
            "ffi project".to_string(),
            String::new(),
            "research".to_string(),
            format!("{tag}, shared"),
        );
        assert!(created.ok, "{}", created.message);
        let project_id = created.project_id.expect("project id");

        let response = dashboard_view("research".to_string(), Some(tag.clone()), false);
        assert!(response.ok, "{}", response.message);
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].project_id, project_id);
        assert_eq!(response.items[0].tags, vec![tag.clone(), "shared".to_string()]);
        assert!(response
            .tag_counts
            .iter()
            .any(|item| item.tag == tag && item.count == 1));
    }

    #[test]
    fn toggle_and_archive_round_trip() {
        let tag = unique_token("ffi-status");
        let created = project_create(
            "status project".to_string(),
            String::new(),
            "analysis".to_string(),
            tag.clone(),
        );
        let project_id = created.project_id.expect("project id");

        let toggled = project_toggle_started(project_id.clone());
        assert!(toggled.ok, "{}", toggled.message);
        assert_eq!(toggled.status.as_deref(), Some("started"));

        let archived = project_set_status(project_id.clone(), "abandoned".to_string());
        assert!(archived.ok, "{}", archived.message);

        let active = dashboard_view("all".to_string(), Some(tag.clone()), false);
        assert!(active.items.is_empty());
        let archive = dashboard_view("all".to_string(), Some(tag), true);
        assert_eq!(archive.items.len(), 1);
        assert_eq!(archive.items[0].status, "abandoned");
    }

    #[test]
    fn update_rejects_unknown_category_and_bad_id() {
        let bad_id = project_update("nope".to_string(), None, None, None, None);
        assert!(!bad_id.ok);

        let created = project_create(
            "update project".to_string(),
            String::new(),
            "engineering".to_string(),
            String::new(),
        );
        let project_id = created.project_id.expect("project id");
        let response = project_update(
            project_id,
            None,
            None,
            Some("cooking".to_string()),
            None,
        );
        assert!(!response.ok);
        assert!(response.message.contains("cooking"));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}

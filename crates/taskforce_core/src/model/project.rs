//! Project domain model.
//!
//! # Responsibility
//! - Define the project record as stored by the backing data store.
//! - Define partial drafts used by create/update write paths.
//! - Sanitize wire-level quirks (null tags, legacy status spelling) at decode.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `tags` is kept verbatim; no uniqueness or normalization at storage time.
//! - Unknown `status`/`categories` values decode to `Unknown` and are
//!   rejected on every write path.

use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a project record.
pub type ProjectId = Uuid;

/// Lifecycle stage of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Idea captured, no work yet.
    Concept,
    /// Work in progress. Pulled to the front of every listing.
    Started,
    /// Finished successfully.
    Completed,
    /// Dropped. Older rows in the hosted store carry the `abandonded` spelling.
    #[serde(alias = "abandonded")]
    Abandoned,
    /// Value not recognized by this build. Matches no view predicate.
    #[serde(other)]
    Unknown,
}

impl ProjectStatus {
    /// Returns the storage/wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Concept => "concept",
            Self::Started => "started",
            Self::Completed => "completed",
            Self::Abandoned => "abandoned",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a storage label. Returns `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "concept" => Some(Self::Concept),
            "started" => Some(Self::Started),
            "completed" => Some(Self::Completed),
            "abandoned" | "abandonded" => Some(Self::Abandoned),
            _ => None,
        }
    }

    /// Whether this status belongs to the archive (completed or abandoned).
    pub fn is_archived(self) -> bool {
        matches!(self, Self::Completed | Self::Abandoned)
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level classification of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectCategory {
    Research,
    Analysis,
    Engineering,
    Miscellaneous,
    /// Value not recognized by this build. Matches no category filter.
    #[serde(other)]
    Unknown,
}

impl ProjectCategory {
    /// Categories a caller may persist, in menu order.
    pub const KNOWN: [ProjectCategory; 4] = [
        ProjectCategory::Research,
        ProjectCategory::Analysis,
        ProjectCategory::Engineering,
        ProjectCategory::Miscellaneous,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::Analysis => "analysis",
            Self::Engineering => "engineering",
            Self::Miscellaneous => "miscellaneous",
            Self::Unknown => "unknown",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "research" => Some(Self::Research),
            "analysis" => Some(Self::Analysis),
            "engineering" => Some(Self::Engineering),
            "miscellaneous" => Some(Self::Miscellaneous),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl Display for ProjectCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category selection in the dashboard, including the `all` pseudo-category.
///
/// `All` never appears on a stored record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Research,
    Analysis,
    Engineering,
    Miscellaneous,
}

impl CategoryFilter {
    /// Filter values in menu order.
    pub const ALL: [CategoryFilter; 5] = [
        CategoryFilter::All,
        CategoryFilter::Research,
        CategoryFilter::Analysis,
        CategoryFilter::Engineering,
        CategoryFilter::Miscellaneous,
    ];

    /// Returns the concrete category, or `None` for `All`.
    pub fn category(self) -> Option<ProjectCategory> {
        match self {
            Self::All => None,
            Self::Research => Some(ProjectCategory::Research),
            Self::Analysis => Some(ProjectCategory::Analysis),
            Self::Engineering => Some(ProjectCategory::Engineering),
            Self::Miscellaneous => Some(ProjectCategory::Miscellaneous),
        }
    }

    /// Menu label shown next to the filter.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "On-going",
            Self::Research => "Research",
            Self::Analysis => "Analysis",
            Self::Engineering => "Engineering",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self.category() {
            Some(category) => category.as_str(),
            None => "all",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            other => ProjectCategory::parse(other).map(Self::from),
        }
    }
}

impl From<ProjectCategory> for CategoryFilter {
    fn from(value: ProjectCategory) -> Self {
        match value {
            ProjectCategory::Research => Self::Research,
            ProjectCategory::Analysis => Self::Analysis,
            ProjectCategory::Engineering => Self::Engineering,
            ProjectCategory::Miscellaneous => Self::Miscellaneous,
            // An unrecognized category cannot be selected; fall back to the
            // unfiltered view.
            ProjectCategory::Unknown => Self::All,
        }
    }
}

/// Validation errors for project write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectValidationError {
    NilId,
    BlankTitle,
    MissingField(&'static str),
    UnknownStatus,
    UnknownCategory,
}

impl Display for ProjectValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "project id must not be nil"),
            Self::BlankTitle => write!(f, "project title must not be blank"),
            Self::MissingField(field) => write!(f, "project field `{field}` is required"),
            Self::UnknownStatus => write!(f, "project status is not a known value"),
            Self::UnknownCategory => write!(f, "project category is not a known value"),
        }
    }
}

impl Error for ProjectValidationError {}

/// Project record as stored by the backing data store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub status: ProjectStatus,
    /// Serialized as `categories` to match the store's column name.
    #[serde(rename = "categories")]
    pub category: ProjectCategory,
    /// Comma-joined free-text labels, stored verbatim.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: String,
    /// Unix epoch milliseconds, assigned by the store.
    #[serde(default)]
    pub created_at: Option<i64>,
}

impl Project {
    /// Creates a `concept` project with a generated id and no tags.
    pub fn new(title: impl Into<String>, category: ProjectCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            status: ProjectStatus::Concept,
            category,
            tags: String::new(),
            created_at: None,
        }
    }

    /// Yields every comma-separated tag label, trimmed.
    ///
    /// Empty pieces (from `""` or trailing commas) are yielded as `""`.
    pub fn tag_labels(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_labels().any(|label| label == tag)
    }

    /// Checks the invariants every persisted project must satisfy.
    pub fn validate(&self) -> Result<(), ProjectValidationError> {
        if self.id.is_nil() {
            return Err(ProjectValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(ProjectValidationError::BlankTitle);
        }
        if !self.status.is_known() {
            return Err(ProjectValidationError::UnknownStatus);
        }
        if !self.category.is_known() {
            return Err(ProjectValidationError::UnknownCategory);
        }
        Ok(())
    }

    /// Overwrites the fields present in `draft`, then re-validates.
    pub fn apply_draft(&mut self, draft: &ProjectDraft) -> Result<(), ProjectValidationError> {
        if let Some(title) = draft.title.as_ref() {
            self.title = title.clone();
        }
        if let Some(description) = draft.description.as_ref() {
            self.description = description.clone();
        }
        if let Some(status) = draft.status {
            self.status = status;
        }
        if let Some(category) = draft.category {
            self.category = category;
        }
        if let Some(tags) = draft.tags.as_ref() {
            self.tags = tags.clone();
        }
        self.validate()
    }
}

/// Partial project used by create and update calls.
///
/// `None` means "leave unchanged" on update and "use the default" on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(
        default,
        rename = "categories",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<ProjectCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl ProjectDraft {
    /// Draft that only changes `status`.
    pub fn status(status: ProjectStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Builds a new record from this draft.
    ///
    /// # Errors
    /// - `MissingField` when `title` or `categories` is absent.
    /// - Any error from [`Project::validate`].
    pub fn into_project(self, id: ProjectId) -> Result<Project, ProjectValidationError> {
        let title = self.title.ok_or(ProjectValidationError::MissingField("title"))?;
        let category = self
            .category
            .ok_or(ProjectValidationError::MissingField("categories"))?;
        let project = Project {
            id,
            title,
            description: self.description.unwrap_or_default(),
            status: self.status.unwrap_or(ProjectStatus::Concept),
            category,
            tags: self.tags.unwrap_or_default(),
            created_at: None,
        };
        project.validate()?;
        Ok(project)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::{CategoryFilter, Project, ProjectCategory, ProjectStatus};

    #[test]
    fn tag_labels_trims_each_piece() {
        let mut project = Project::new("p", ProjectCategory::Research);
        project.tags = " a ,b,, c ".to_string();
        let labels: Vec<&str> = project.tag_labels().collect();
        assert_eq!(labels, vec!["a", "b", "", "c"]);
        assert!(project.has_tag("c"));
        assert!(!project.has_tag(" c "));
    }

    #[test]
    fn category_filter_parses_all_and_categories() {
        assert_eq!(CategoryFilter::parse(" ALL "), Some(CategoryFilter::All));
        assert_eq!(
            CategoryFilter::parse("engineering"),
            Some(CategoryFilter::Engineering)
        );
        assert_eq!(CategoryFilter::parse("cooking"), None);
        assert_eq!(CategoryFilter::All.label(), "On-going");
    }

    #[test]
    fn status_parse_accepts_legacy_spelling() {
        assert_eq!(
            ProjectStatus::parse("abandonded"),
            Some(ProjectStatus::Abandoned)
        );
        assert_eq!(ProjectStatus::parse("paused"), None);
    }
}

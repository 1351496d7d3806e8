//! Project view engine: filter, order and tag aggregation.
//!
//! # Responsibility
//! - Derive the visible, ordered project list from a snapshot and selection.
//! - Count tag occurrences across the full snapshot for filter badges.
//!
//! # Invariants
//! - Pure: no I/O, no logging, no mutation of input records.
//! - Tag counts ignore the current selection.
//! - Ordering is a stable partition with `started` projects first.
//! - Unknown status/category values match no predicate that names them.

use crate::model::project::{CategoryFilter, Project, ProjectStatus};
use crate::view::state::ViewState;
use serde::Serialize;
use std::collections::BTreeMap;

/// Tag label to occurrence count.
pub type TagCounts = BTreeMap<String, usize>;

/// Render-ready output of one engine pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    /// Visible projects, `started` first.
    pub projects: Vec<Project>,
    /// Counts over the whole snapshot.
    pub tag_counts: TagCounts,
}

/// Returns whether `project` is visible under `state`.
///
/// The trailing status clauses overlap with the active-match predicate and
/// are kept as-is: with `All` selected, `completed`, `concept` and `started`
/// projects stay visible even while the archive is shown.
pub fn is_visible(project: &Project, state: &ViewState) -> bool {
    let status = project.status;
    let is_archive_match = state.show_archive && status.is_archived();
    let is_active_match = !state.show_archive
        && status.is_known()
        && match state.selected_category {
            CategoryFilter::All => !status.is_archived(),
            _ => status != ProjectStatus::Abandoned,
        };
    let tag_match = state
        .selected_tag
        .as_deref()
        .map_or(true, |tag| project.has_tag(tag));

    match state.selected_category.category() {
        None => {
            tag_match
                && (is_archive_match
                    || is_active_match
                    || matches!(
                        status,
                        ProjectStatus::Completed | ProjectStatus::Concept | ProjectStatus::Started
                    ))
        }
        Some(category) => {
            let category_match = project.category == category;
            category_match
                && tag_match
                && (is_archive_match
                    || is_active_match
                    || matches!(status, ProjectStatus::Concept | ProjectStatus::Started))
        }
    }
}

/// Filters `projects` down to the ones visible under `state`.
///
/// Input order is preserved.
pub fn compute_visible_projects<'a>(projects: &'a [Project], state: &ViewState) -> Vec<&'a Project> {
    projects
        .iter()
        .filter(|project| is_visible(project, state))
        .collect()
}

/// Moves every `started` project ahead of the rest, keeping relative order
/// inside both groups.
pub fn sort_by_started_first(mut projects: Vec<&Project>) -> Vec<&Project> {
    // `sort_by_key` is stable.
    projects.sort_by_key(|project| project.status != ProjectStatus::Started);
    projects
}

/// Counts trimmed tag labels across `projects`.
///
/// Empty labels (blank `tags`, trailing commas) are skipped so no badge is
/// rendered without text.
pub fn compute_tag_frequency(projects: &[Project]) -> TagCounts {
    let mut counts = TagCounts::new();
    for label in projects.iter().flat_map(|project| project.tag_labels()) {
        if label.is_empty() {
            continue;
        }
        *counts.entry(label.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Runs the full engine pass over one snapshot.
pub fn build_dashboard(projects: &[Project], state: &ViewState) -> DashboardView {
    let visible = sort_by_started_first(compute_visible_projects(projects, state));
    DashboardView {
        projects: visible.into_iter().cloned().collect(),
        tag_counts: compute_tag_frequency(projects),
    }
}

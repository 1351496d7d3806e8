//! Ephemeral dashboard selection state.
//!
//! # Responsibility
//! - Model category/tag/archive selection and form state as one value.
//! - Normalize user input before it reaches the view engine.
//!
//! # Invariants
//! - `selected_tag` is never blank; blank input clears the selection.
//! - State lives only in the view layer and is never persisted by core.

use crate::model::project::{CategoryFilter, ProjectId};
use serde::{Deserialize, Serialize};

/// Whether the project form is open, and for which record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "project_id")]
pub enum FormState {
    #[default]
    Closed,
    Creating,
    Editing(ProjectId),
}

/// Selection state consumed by the view engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub selected_category: CategoryFilter,
    pub selected_tag: Option<String>,
    pub show_archive: bool,
    pub filter_panel_open: bool,
    pub form: FormState,
}

impl ViewState {
    pub fn select_category(&mut self, category: CategoryFilter) {
        self.selected_category = category;
    }

    /// Selects a tag filter. Input is trimmed; blank input clears the filter.
    pub fn select_tag(&mut self, tag: impl AsRef<str>) {
        let trimmed = tag.as_ref().trim();
        self.selected_tag = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    pub fn clear_tag(&mut self) {
        self.selected_tag = None;
    }

    pub fn set_show_archive(&mut self, show_archive: bool) {
        self.show_archive = show_archive;
    }

    pub fn toggle_archive(&mut self) {
        self.show_archive = !self.show_archive;
    }

    pub fn toggle_filter_panel(&mut self) {
        self.filter_panel_open = !self.filter_panel_open;
    }

    pub fn open_create_form(&mut self) {
        self.form = FormState::Creating;
    }

    pub fn open_edit_form(&mut self, id: ProjectId) {
        self.form = FormState::Editing(id);
    }

    pub fn close_form(&mut self) {
        self.form = FormState::Closed;
    }

    pub fn is_form_open(&self) -> bool {
        self.form != FormState::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::{FormState, ViewState};
    use crate::model::project::CategoryFilter;
    use uuid::Uuid;

    #[test]
    fn default_state_is_unfiltered_and_closed() {
        let state = ViewState::default();
        assert_eq!(state.selected_category, CategoryFilter::All);
        assert_eq!(state.selected_tag, None);
        assert!(!state.show_archive);
        assert!(!state.is_form_open());
    }

    #[test]
    fn select_tag_trims_and_clears_on_blank() {
        let mut state = ViewState::default();
        state.select_tag("  rust ");
        assert_eq!(state.selected_tag.as_deref(), Some("rust"));

        state.select_tag("   ");
        assert_eq!(state.selected_tag, None);
    }

    #[test]
    fn clear_tag_drops_selection_and_keeps_other_filters() {
        let mut state = ViewState::default();
        state.select_category(CategoryFilter::Analysis);
        state.select_tag("ml");
        state.set_show_archive(true);

        state.clear_tag();
        assert_eq!(state.selected_tag, None);
        assert_eq!(state.selected_category, CategoryFilter::Analysis);
        assert!(state.show_archive);
    }

    #[test]
    fn toggle_filter_panel_flips_visibility_only() {
        let mut state = ViewState::default();
        assert!(!state.filter_panel_open);

        state.toggle_filter_panel();
        assert!(state.filter_panel_open);
        assert!(!state.show_archive);

        state.toggle_filter_panel();
        assert!(!state.filter_panel_open);
    }

    #[test]
    fn form_transitions() {
        let mut state = ViewState::default();
        let id = Uuid::new_v4();

        state.open_create_form();
        assert_eq!(state.form, FormState::Creating);
        state.open_edit_form(id);
        assert_eq!(state.form, FormState::Editing(id));
        state.close_form();
        assert!(!state.is_form_open());
    }
}

use proptest::prelude::*;
use taskforce_core::{
    compute_tag_frequency, compute_visible_projects, sort_by_started_first, CategoryFilter,
    Project, ProjectCategory, ProjectStatus, ViewState,
};

fn status_strategy() -> impl Strategy<Value = ProjectStatus> {
    prop_oneof![
        Just(ProjectStatus::Concept),
        Just(ProjectStatus::Started),
        Just(ProjectStatus::Completed),
        Just(ProjectStatus::Abandoned),
        Just(ProjectStatus::Unknown),
    ]
}

fn category_strategy() -> impl Strategy<Value = ProjectCategory> {
    prop_oneof![
        Just(ProjectCategory::Research),
        Just(ProjectCategory::Analysis),
        Just(ProjectCategory::Engineering),
        Just(ProjectCategory::Miscellaneous),
    ]
}

fn tags_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!["a", " b", "c ", "", "rust"]), 0..4)
        .prop_map(|labels| labels.join(","))
}

fn project_strategy() -> impl Strategy<Value = Project> {
    ("[a-z]{1,8}", status_strategy(), category_strategy(), tags_strategy()).prop_map(
        |(title, status, category, tags)| {
            let mut project = Project::new(title, category);
            project.status = status;
            project.tags = tags;
            project
        },
    )
}

fn state_strategy() -> impl Strategy<Value = ViewState> {
    (
        prop::sample::select(CategoryFilter::ALL.to_vec()),
        prop::option::of(prop::sample::select(vec!["a", "b", "rust", "zzz"])),
        any::<bool>(),
    )
        .prop_map(|(category, tag, show_archive)| {
            let mut state = ViewState::default();
            state.select_category(category);
            if let Some(tag) = tag {
                state.select_tag(tag);
            }
            state.set_show_archive(show_archive);
            state
        })
}

proptest! {
    #[test]
    fn visible_projects_is_deterministic(
        projects in prop::collection::vec(project_strategy(), 0..12),
        state in state_strategy(),
    ) {
        let first = compute_visible_projects(&projects, &state);
        let second = compute_visible_projects(&projects, &state);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn tag_counts_ignore_selection(
        projects in prop::collection::vec(project_strategy(), 0..12),
        state in state_strategy(),
    ) {
        let baseline = compute_tag_frequency(&projects);
        let view = taskforce_core::build_dashboard(&projects, &state);
        prop_assert_eq!(view.tag_counts, baseline);
    }

    #[test]
    fn started_first_is_a_stable_partition(
        projects in prop::collection::vec(project_strategy(), 0..12),
        state in state_strategy(),
    ) {
        let visible = compute_visible_projects(&projects, &state);
        let ordered = sort_by_started_first(visible.clone());

        prop_assert_eq!(ordered.len(), visible.len());
        let started_prefix = ordered
            .iter()
            .take_while(|p| p.status == ProjectStatus::Started)
            .count();
        prop_assert!(ordered[started_prefix..]
            .iter()
            .all(|p| p.status != ProjectStatus::Started));

        let started: Vec<_> = visible.iter().filter(|p| p.status == ProjectStatus::Started).map(|p| p.id).collect();
        let rest: Vec<_> = visible.iter().filter(|p| p.status != ProjectStatus::Started).map(|p| p.id).collect();
        let expected: Vec<_> = started.into_iter().chain(rest).collect();
        let actual: Vec<_> = ordered.iter().map(|p| p.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn abandoned_only_visible_in_archive(
        projects in prop::collection::vec(project_strategy(), 0..12),
        state in state_strategy(),
    ) {
        let visible = compute_visible_projects(&projects, &state);
        if !state.show_archive {
            prop_assert!(visible.iter().all(|p| p.status != ProjectStatus::Abandoned));
        }
        prop_assert!(visible.iter().all(|p| p.status != ProjectStatus::Unknown));
    }
}

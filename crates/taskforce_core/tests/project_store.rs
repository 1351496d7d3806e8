use rusqlite::params;
use taskforce_core::db::open_db_in_memory;
use taskforce_core::{
    ProjectCategory, ProjectDraft, ProjectStatus, ProjectStore, ProjectValidationError, RepoError,
    SqliteProjectStore,
};
use uuid::Uuid;

fn draft(title: &str, status: ProjectStatus, tags: &str) -> ProjectDraft {
    ProjectDraft {
        title: Some(title.to_string()),
        description: None,
        status: Some(status),
        category: Some(ProjectCategory::Analysis),
        tags: Some(tags.to_string()),
    }
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();

    let created = store
        .create_project(&draft("survey", ProjectStatus::Concept, "ml, data"))
        .unwrap();
    assert!(created.created_at.is_some());

    let loaded = store.get_project(created.id).unwrap().unwrap();
    assert_eq!(loaded, created);
    assert_eq!(loaded.category, ProjectCategory::Analysis);
    assert_eq!(loaded.tags, "ml, data");
}

#[test]
fn create_applies_draft_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();

    let created = store
        .create_project(&ProjectDraft {
            title: Some("bare".to_string()),
            category: Some(ProjectCategory::Miscellaneous),
            ..ProjectDraft::default()
        })
        .unwrap();
    assert_eq!(created.status, ProjectStatus::Concept);
    assert_eq!(created.tags, "");
    assert_eq!(created.description, "");
}

#[test]
fn create_rejects_invalid_drafts_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();

    let err = store
        .create_project(&ProjectDraft {
            title: Some("  ".to_string()),
            category: Some(ProjectCategory::Research),
            ..ProjectDraft::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProjectValidationError::BlankTitle)
    ));

    let err = store
        .create_project(&ProjectDraft {
            title: Some("t".to_string()),
            ..ProjectDraft::default()
        })
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ProjectValidationError::MissingField("categories"))
    ));
    assert!(store.fetch_all().unwrap().is_empty());
}

#[test]
fn update_overwrites_only_present_fields() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();
    let created = store
        .create_project(&draft("survey", ProjectStatus::Concept, "a"))
        .unwrap();

    store
        .update_project(
            created.id,
            &ProjectDraft {
                description: Some("scope v2".to_string()),
                status: Some(ProjectStatus::Started),
                ..ProjectDraft::default()
            },
        )
        .unwrap();

    let loaded = store.get_project(created.id).unwrap().unwrap();
    assert_eq!(loaded.title, "survey");
    assert_eq!(loaded.tags, "a");
    assert_eq!(loaded.description, "scope v2");
    assert_eq!(loaded.status, ProjectStatus::Started);
}

#[test]
fn update_and_delete_missing_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();
    let id = Uuid::new_v4();

    let err = store
        .update_project(id, &ProjectDraft::status(ProjectStatus::Started))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));

    let err = store.delete_project(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn fetch_all_orders_by_status_descending() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();
    for (title, status) in [
        ("a", ProjectStatus::Abandoned),
        ("b", ProjectStatus::Completed),
        ("c", ProjectStatus::Started),
        ("d", ProjectStatus::Concept),
    ] {
        store.create_project(&draft(title, status, "")).unwrap();
    }

    let statuses: Vec<ProjectStatus> = store
        .fetch_all()
        .unwrap()
        .into_iter()
        .map(|project| project.status)
        .collect();
    assert_eq!(
        statuses,
        vec![
            ProjectStatus::Started,
            ProjectStatus::Concept,
            ProjectStatus::Completed,
            ProjectStatus::Abandoned,
        ]
    );
}

#[test]
fn delete_removes_row() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteProjectStore::try_new(&conn).unwrap();
    let created = store
        .create_project(&draft("gone", ProjectStatus::Concept, ""))
        .unwrap();

    store.delete_project(created.id).unwrap();
    assert!(store.get_project(created.id).unwrap().is_none());
}

#[test]
fn read_rejects_invalid_persisted_uuid() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO projects (id, title, status, categories) VALUES (?1, 't', 'concept', 'research');",
        params!["not-a-uuid"],
    )
    .unwrap();

    let store = SqliteProjectStore::try_new(&conn).unwrap();
    let err = store.fetch_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(message) if message.contains("projects.id")));
}

#[test]
fn try_new_requires_projects_table() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let err = SqliteProjectStore::try_new(&conn).err().unwrap();
    assert!(matches!(err, RepoError::MissingRequiredTable("projects")));
}

//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskforce_core` wiring end to end: config, logging, storage and
//!   the view engine.
//! - Print the default dashboard as plain text.

use std::error::Error;
use std::process::ExitCode;
use taskforce_core::db::open_db;
use taskforce_core::{
    init_logging, CoreConfig, DashboardSession, DashboardView, ProjectService, SqliteProjectStore,
};

fn main() -> ExitCode {
    println!("taskforce_core ping={}", taskforce_core::ping());
    println!("taskforce_core version={}", taskforce_core::core_version());

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskforce_cli error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::from_env()?;
    init_logging(config.log_level, &config.log_dir.to_string_lossy())?;

    let conn = open_db(&config.db_path)?;
    let store = SqliteProjectStore::try_new(&conn)?;
    let session = DashboardSession::open(ProjectService::new(store))?;

    println!("db_path={}", config.db_path.display());
    print_view(&session.view());
    Ok(())
}

fn print_view(view: &DashboardView) {
    println!("projects={}", view.projects.len());
    for project in &view.projects {
        println!(
            "  [{}] {} ({}) tags={}",
            project.status, project.title, project.category, project.tags
        );
    }
    let badges = view
        .tag_counts
        .iter()
        .map(|(tag, count)| format!("{tag}:{count}"))
        .collect::<Vec<_>>();
    println!("tags={}", badges.join(" "));
}

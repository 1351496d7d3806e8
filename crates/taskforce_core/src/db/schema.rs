//! `projects` schema steps.
//!
//! Steps run in version order inside one transaction; `PRAGMA user_version`
//! holds the last applied step.

use super::{DbError, DbResult, StoreLocation};
use log::{debug, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "projects_table",
        sql: include_str!("sql/0001_init.sql"),
    },
    SchemaStep {
        version: 2,
        name: "status_created_index",
        sql: include_str!("sql/0002_status_index.sql"),
    },
];

/// Schema version written by this build.
pub const LATEST_SCHEMA_VERSION: u32 = STEPS[STEPS.len() - 1].version;

/// Brings the store at `location` up to `LATEST_SCHEMA_VERSION`.
pub(super) fn upgrade(conn: &mut Connection, location: &StoreLocation) -> DbResult<()> {
    let found: u32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .map_err(|source| DbError::Open {
            location: location.clone(),
            source,
        })?;

    if found > LATEST_SCHEMA_VERSION {
        return Err(DbError::UnsupportedSchemaVersion {
            location: location.clone(),
            found,
            supported: LATEST_SCHEMA_VERSION,
        });
    }
    if found == LATEST_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in STEPS.iter().skip_while(|step| step.version <= found) {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| DbError::SchemaStep {
                version: step.version,
                name: step.name,
                source,
            })?;
        debug!(
            "event=db_migrate module=db status=step version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok mode={} from={found} to={LATEST_SCHEMA_VERSION}",
        location.mode()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{LATEST_SCHEMA_VERSION, STEPS};

    #[test]
    fn steps_are_strictly_increasing_from_one() {
        for (index, step) in STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "{}", step.name);
        }
        assert_eq!(LATEST_SCHEMA_VERSION as usize, STEPS.len());
    }
}

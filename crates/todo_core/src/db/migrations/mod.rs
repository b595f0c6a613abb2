//! Versioned `tasks` schema.
//!
//! Steps run in one transaction from the stored `user_version` up to
//! `schema_version()`. A failing step rolls the whole upgrade back and is
//! reported by version and name.

use crate::db::{DbError, DbResult};
use log::{debug, error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const TASK_SCHEMA: &[Migration] = &[Migration {
    version: 1,
    name: "create_tasks",
    sql: include_str!("0001_init.sql"),
}];

/// Schema version this build writes.
pub fn schema_version() -> u32 {
    target_version(TASK_SCHEMA)
}

/// Brings the `tasks` schema on `conn` up to `schema_version()`.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    migrate(conn, TASK_SCHEMA)
}

fn target_version(steps: &[Migration]) -> u32 {
    steps.last().map_or(0, |step| step.version)
}

fn migrate(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let supported = target_version(steps);

    if found > supported {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new found={found} supported={supported}"
        );
        return Err(DbError::SchemaTooNew { found, supported });
    }
    if found == supported {
        debug!("event=db_migrate module=db status=skipped version={found}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in steps.iter().filter(|step| step.version > found) {
        tx.execute_batch(step.sql)
            .and_then(|()| tx.pragma_update(None, "user_version", step.version))
            .map_err(|source| {
                error!(
                    "event=db_migrate module=db status=error version={} name={} error={}",
                    step.version, step.name, source
                );
                DbError::MigrationFailed {
                    version: step.version,
                    name: step.name,
                    source,
                }
            })?;
        info!(
            "event=db_migrate module=db status=ok version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    Ok(())
}

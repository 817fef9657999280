//! Versioned schema steps for the key-value database.
//!
//! # Invariants
//! - Steps are listed in strictly increasing `version` order.
//! - Pending steps run in one transaction; a failing step leaves the file at
//!   its previous version.

use crate::db::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    sql: &'static str,
}

const KV_STORE_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("0001_kv_store.sql"),
}];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    KV_STORE_MIGRATIONS
        .last()
        .map_or(0, |migration| migration.version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is newer than this build.
/// - `Migration` naming the step that failed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    run_steps(conn, KV_STORE_MIGRATIONS)
}

fn run_steps(conn: &mut Connection, steps: &[Migration]) -> DbResult<()> {
    let from_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let target = steps.last().map_or(0, |step| step.version);

    if from_version > target {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: target,
        });
    }
    let pending: Vec<&Migration> = steps
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        let applied = tx.execute_batch(step.sql).and_then(|()| {
            tx.execute_batch(&format!("PRAGMA user_version = {};", step.version))
        });
        if let Err(source) = applied {
            error!(
                "event=db_migrate module=db status=error version={} error={}",
                step.version, source
            );
            return Err(DbError::Migration {
                version: step.version,
                source,
            });
        }
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        from_version, target
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{run_steps, Migration};
    use crate::db::DbError;
    use rusqlite::Connection;

    #[test]
    fn failing_step_reports_version_and_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        let steps = [
            Migration {
                version: 1,
                sql: "CREATE TABLE first (id INTEGER);",
            },
            Migration {
                version: 2,
                sql: "CREATE TABLE broken (;",
            },
        ];

        let err = run_steps(&mut conn, &steps).unwrap_err();
        assert!(matches!(err, DbError::Migration { version: 2, .. }));
        assert!(err.to_string().contains("migration 2 failed"));

        let version: u32 = conn
            .query_row("PRAGMA user_version;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, 0);
        let first_exists: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE name = 'first');",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(first_exists, 0);
    }
}

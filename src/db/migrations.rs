use anyhow::{bail, Context, Result};
use log::info;
use rusqlite::Connection;

/// Schema scripts in order; entry `n` moves `user_version` from `n` to `n + 1`.
/// Append only.
const MIGRATIONS: &[(&str, &str)] = &[("schema_v1.sql", include_str!("schemas/schema_v1.sql"))];

const CURRENT_SCHEMA_VERSION: usize = MIGRATIONS.len();

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let stored: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;
    let version = usize::try_from(stored)
        .with_context(|| format!("database reports a negative schema version ({stored})"))?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "history database is at schema {} but this build knows up to {}",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    let pending = &MIGRATIONS[version..];
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    for (name, script) in pending {
        tx.execute_batch(script)
            .with_context(|| format!("failed to execute {name}"))?;
        info!("Applied history migration {name}");
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION as i64)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

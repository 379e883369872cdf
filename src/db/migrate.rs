//! Embedded schema migrations.
//!
//! diesel_migrations only drives synchronous connections, so every
//! function here opens a blocking `PgConnection` on the blocking pool.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::MigrationHarness;

use crate::db::MIGRATIONS;
use crate::error::{AppError, AppResult};

fn connect(database_url: &str) -> AppResult<PgConnection> {
    PgConnection::establish(database_url).map_err(|e| AppError::ConnectionPool {
        source: anyhow::Error::from(e),
    })
}

async fn blocking<T, F>(database_url: &str, f: F) -> AppResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut PgConnection) -> AppResult<T> + Send + 'static,
{
    let database_url = database_url.to_string();
    tokio::task::spawn_blocking(move || {
        let mut conn = connect(&database_url)?;
        f(&mut conn)
    })
    .await
    .map_err(|e| AppError::Internal {
        source: anyhow::Error::from(e),
    })?
}

/// Applies every pending migration and returns the applied versions.
pub async fn run_pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    blocking(database_url, |conn| {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::storage("run pending migrations", anyhow::anyhow!("{}", e)))?;
        Ok(applied.iter().map(ToString::to_string).collect())
    })
    .await
}

/// Names of migrations that have not been applied yet.
pub async fn pending_migrations(database_url: &str) -> AppResult<Vec<String>> {
    blocking(database_url, |conn| {
        let pending = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|e| AppError::storage("check pending migrations", anyhow::anyhow!("{}", e)))?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    })
    .await
}

/// Reverts the last `steps` migrations.
///
/// Fails without touching the schema when fewer than `steps` are applied.
pub async fn revert_migrations(database_url: &str, steps: u32) -> AppResult<Vec<String>> {
    blocking(database_url, move |conn| {
        let applied = conn
            .applied_migrations()
            .map_err(|e| AppError::storage("list applied migrations", anyhow::anyhow!("{}", e)))?;

        if applied.len() < steps as usize {
            return Err(AppError::Configuration {
                key: "rollback_steps".to_string(),
                message: format!(
                    "Cannot rollback {} migrations - only {} applied migrations available",
                    steps,
                    applied.len()
                ),
            });
        }

        let mut reverted = Vec::with_capacity(steps as usize);
        for _ in 0..steps {
            let version = conn
                .revert_last_migration(MIGRATIONS)
                .map_err(|e| AppError::storage("revert migration", anyhow::anyhow!("{}", e)))?;
            reverted.push(version.to_string());
        }
        Ok(reverted)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::migration::MigrationSource;
    use diesel::pg::Pg;

    const UP_SQL: [&str; 2] = [
        include_str!("../../migrations/2024-06-01-000000_create_customers/up.sql"),
        include_str!("../../migrations/2024-06-01-000100_create_purchases_and_repairs/up.sql"),
    ];

    #[test]
    fn test_embedded_migrations_are_ordered() {
        let migrations = MigrationSource::<Pg>::migrations(&MIGRATIONS).unwrap();
        let names: Vec<String> = migrations.iter().map(|m| m.name().to_string()).collect();
        assert_eq!(names.len(), 2);
        assert!(names[0].contains("create_customers"));
        assert!(names[1].contains("create_purchases_and_repairs"));
    }

    #[test]
    fn test_text_columns_have_no_length_limit() {
        // Request validation sets no maximum length, so neither may the schema.
        for sql in UP_SQL {
            assert!(!sql.to_uppercase().contains("VARCHAR"), "{}", sql);
        }
    }
}

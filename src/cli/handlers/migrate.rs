//! Migrate command handler
//!
//! Applies, previews or reverts the embedded schema migrations against the
//! configured PostgreSQL database.

use crate::config::StorageBackend;
use crate::config::settings::Settings;
use crate::db::{pending_migrations, revert_migrations, run_pending_migrations};
use crate::error::{AppError, AppResult};

pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command
    ///
    /// # Arguments
    /// * `dry_run` - list pending migrations without applying them
    /// * `rollback` - revert this many of the most recent migrations
    ///
    /// # Errors
    /// - The storage backend is not postgres
    /// - Database connection or migration errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        if self.config.database.backend != StorageBackend::Postgres {
            return Err(AppError::Configuration {
                key: "database.backend".to_string(),
                message: format!(
                    "migrations require the postgres backend, configured backend is '{}'",
                    self.config.database.backend
                ),
            });
        }
        self.config.database.validate()?;

        let url = &self.config.database.url;
        match (dry_run, rollback) {
            (true, _) => {
                println!("Checking for pending migrations...");
                let pending = pending_migrations(url).await?;
                if pending.is_empty() {
                    println!("✓ No pending migrations found - database is up to date");
                } else {
                    println!("Found {} pending migration(s):", pending.len());
                    for name in &pending {
                        println!("  - {}", name);
                    }
                    println!("\nRun without --dry-run to apply these migrations");
                }
            }
            (false, Some(0)) => {
                return Err(AppError::Configuration {
                    key: "rollback_steps".to_string(),
                    message: "Number of rollback steps must be greater than 0".to_string(),
                });
            }
            (false, Some(steps)) => {
                println!("Rolling back {} migration(s)...", steps);
                let reverted = revert_migrations(url, steps).await?;
                for version in &reverted {
                    println!("  - {}", version);
                }
                println!("✓ Rolled back {} migration(s)", reverted.len());
            }
            (false, None) => {
                println!("Running database migrations...");
                let applied = run_pending_migrations(url).await?;
                if applied.is_empty() {
                    println!("✓ No migrations to apply - database is already up to date");
                } else {
                    println!("✓ Applied {} migration(s):", applied.len());
                    for version in &applied {
                        println!("  - {}", version);
                    }
                }
            }
        }

        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postgres_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config
    }

    #[test]
    fn test_migrate_handler_new() {
        let config = postgres_config();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);
    }

    #[tokio::test]
    async fn test_zero_rollback_steps() {
        let handler = MigrateCommandHandler::new(postgres_config());

        match handler.execute(false, Some(0)).await {
            Err(AppError::Configuration { key, message }) => {
                assert_eq!(key, "rollback_steps");
                assert!(message.contains("must be greater than 0"));
            }
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_memory_backend_is_rejected() {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;

        let result = MigrateCommandHandler::new(config).execute(false, None).await;
        assert!(matches!(result, Err(AppError::Configuration { ref key, .. }) if key == "database.backend"));
    }
}

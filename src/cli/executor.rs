//! Command executor for dispatching CLI commands
//!
//! Runs one-shot commands (dry runs, migrations) after parsing and
//! configuration loading. Starting the server is left to `main`.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// What `main` should do once a command has been executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Start the HTTP server with the merged settings
    StartServer,
    /// The command ran to completion; exit
    Done,
}

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns errors from argument validation or command handlers
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<Outcome> {
    cli.validate().map_err(|message| AppError::Configuration {
        key: "cli_arguments".to_string(),
        message,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).validate_only()?;
            Ok(Outcome::Done)
        }
        Some(Commands::Serve { host, port, .. }) => {
            warn_on_privileged_port(host.as_deref(), *port);
            Ok(Outcome::StartServer)
        }
        None => Ok(Outcome::StartServer),
        Some(Commands::Migrate { dry_run, rollback }) => {
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(Outcome::Done)
        }
    }
}

fn warn_on_privileged_port(host: Option<&str>, port: Option<u16>) {
    if let (Some("0.0.0.0"), Some(port)) = (host, port)
        && port < 1024
    {
        tracing::warn!(port, "Binding to 0.0.0.0 on a port below 1024 usually requires root privileges");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    fn memory_config() -> Settings {
        let mut config = Settings::default();
        config.database.backend = StorageBackend::Memory;
        config
    }

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["customer-manager", "serve", "--dry-run"]).unwrap();
        let outcome = execute_command(&cli, memory_config()).await.unwrap();
        assert_eq!(outcome, Outcome::Done);
    }

    #[tokio::test]
    async fn test_execute_serve_starts_server() {
        let cli = Cli::try_parse_from(["customer-manager", "serve"]).unwrap();
        let outcome = execute_command(&cli, memory_config()).await.unwrap();
        assert_eq!(outcome, Outcome::StartServer);

        let cli = Cli::try_parse_from(["customer-manager"]).unwrap();
        let outcome = execute_command(&cli, memory_config()).await.unwrap();
        assert_eq!(outcome, Outcome::StartServer);
    }

    #[tokio::test]
    async fn test_conflicting_migrate_args() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        match execute_command(&cli, memory_config()).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "cli_arguments"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_migrate_requires_postgres_backend() {
        let cli = Cli::try_parse_from(["customer-manager", "migrate"]).unwrap();
        match execute_command(&cli, memory_config()).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.backend"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }
}

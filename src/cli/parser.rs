//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

use crate::config::{Environment, StorageBackend};

/// Back-office API for customers, purchases and repairs
#[derive(Parser, Debug)]
#[command(name = "customer-manager")]
#[command(about = "Back-office API for customers, purchases and repairs")]
#[command(long_about = "
customer-manager serves a JSON REST API for managing the customers of an
eyewear shop together with the glasses they bought and the repairs they
requested. Data lives in PostgreSQL or, for demos and tests, in memory.

EXAMPLES:
    # Start the server with the layered configuration in ./config
    customer-manager serve

    # Start server on custom host and port
    customer-manager serve --host 0.0.0.0 --port 8080

    # Run without a database
    customer-manager serve --storage memory

    # Use a single configuration file
    customer-manager --config /etc/customer-manager/production.toml serve

    # Check configuration without starting server
    customer-manager serve --dry-run

    # Apply, preview or roll back database migrations
    customer-manager migrate
    customer-manager migrate --dry-run
    customer-manager migrate --rollback 1
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute, `serve` when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered files in the
    /// configuration directory. Environment variables still apply on top.
    ///
    /// Example: --config /etc/customer-manager/production.toml
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `{environment}.toml` layer instead of reading
    /// CUSTOMER_MANAGER_APP_ENV. One of development, test, staging,
    /// production.
    #[arg(short, long, value_name = "ENV")]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Examples:
    ///   customer-manager serve                           # Start with defaults
    ///   customer-manager serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   customer-manager serve --dry-run                 # Validate config without starting
    Serve {
        /// Host address to bind to
        ///
        /// Must be a valid IPv4 address, hostname, or 'localhost'.
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on (1-65535)
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Storage backend override
        ///
        /// `postgres` or `memory`; memory needs no database.
        #[arg(long, value_name = "BACKEND")]
        storage: Option<StorageBackend>,

        /// Log level override
        ///
        /// One of error, warn, info, debug, trace. Takes precedence over
        /// configuration files and --verbose/--quiet.
        #[arg(long, value_name = "LEVEL")]
        log_level: Option<Level>,

        /// Validate configuration and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Database migration operations
    ///
    /// Examples:
    ///   customer-manager migrate                    # Apply all pending migrations
    ///   customer-manager migrate --dry-run          # Show pending migrations without applying
    ///   customer-manager migrate --rollback 3       # Rollback the last 3 migrations
    Migrate {
        /// Show pending migrations without applying
        #[arg(long, conflicts_with = "rollback")]
        dry_run: bool,

        /// Number of migrations to rollback (1-100)
        #[arg(long, value_name = "STEPS", conflicts_with = "dry_run", value_parser = super::validation::validate_rollback_steps)]
        rollback: Option<u32>,
    },
}

impl Cli {
    /// Checks argument combinations clap cannot express.
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Commands::Migrate {
            dry_run: true,
            rollback: Some(_),
        }) = self.command
        {
            return Err("Cannot use --dry-run and --rollback together".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use --verbose and --quiet together".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["customer-manager", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["customer-manager", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_default_behavior() {
        let cli = Cli::try_parse_from(["customer-manager"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert!(cli.config.is_none());
        assert!(cli.env.is_none());
    }

    #[test]
    fn test_serve_command() {
        let cli = Cli::try_parse_from([
            "customer-manager",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--storage",
            "memory",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Serve {
                host,
                port,
                storage,
                dry_run,
                ..
            }) => {
                assert_eq!(host, Some("0.0.0.0".to_string()));
                assert_eq!(port, Some(8080));
                assert_eq!(storage, Some(StorageBackend::Memory));
                assert!(!dry_run);
            }
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_storage_is_rejected() {
        let err = Cli::try_parse_from(["customer-manager", "serve", "--storage", "sqlite"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_env_and_log_level_values() {
        let cli = Cli::try_parse_from(["customer-manager", "--env", "prod", "serve", "--log-level", "debug"])
            .unwrap();
        assert_eq!(cli.env, Some(Environment::Production));
        match cli.command {
            Some(Commands::Serve { log_level, .. }) => assert_eq!(log_level, Some(Level::DEBUG)),
            other => panic!("Expected Serve command, got {:?}", other),
        }
    }

    #[test]
    fn test_migrate_command() {
        let cli = Cli::try_parse_from(["customer-manager", "migrate", "--dry-run"]).unwrap();
        match cli.command {
            Some(Commands::Migrate { dry_run, rollback }) => {
                assert!(dry_run);
                assert!(rollback.is_none());
            }
            other => panic!("Expected Migrate command, got {:?}", other),
        }
    }

    #[test]
    fn test_conflicting_verbose_quiet() {
        let err = Cli::try_parse_from(["customer-manager", "--verbose", "--quiet"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_validate_rejects_dry_run_with_rollback() {
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(2),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        assert!(cli.validate().is_err());
    }
}

//! Logger Module
//!
//! Installs a `tracing-subscriber` registry with a console layer, a file
//! layer (full, compact or JSON), or both, filtered by the configured level.

pub mod config;
pub mod error;
pub(crate) mod writer;

pub use config::*;
pub use error::LoggerError;

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use writer::LogFileWriter;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Initialize the global subscriber with the given configuration
///
/// # Errors
/// Fails on an invalid configuration, when the log file cannot be opened,
/// or when a global subscriber is already installed.
pub fn init_logger(config: LoggerConfig) -> anyhow::Result<()> {
    config.validate()?;

    let filter = EnvFilter::try_new(config.level.to_lowercase())
        .map_err(|e| LoggerError::invalid("logger.level", e.to_string()))?;

    tracing_subscriber::registry()
        .with(build_layers(&config)?)
        .with(filter)
        .try_init()
        .map_err(|e| LoggerError::Init(e.to_string()))?;

    Ok(())
}

/// File layer first so console ANSI settings never leak into the file.
fn build_layers(config: &LoggerConfig) -> Result<Vec<BoxedLayer>, LoggerError> {
    let mut layers = Vec::with_capacity(2);

    if config.file.enabled {
        layers.push(file_layer(&config.file)?);
    }
    if config.console.enabled {
        layers.push(console_layer(&config.console));
    }

    Ok(layers)
}

fn console_layer(config: &ConsoleConfig) -> BoxedLayer {
    let ansi = config.colored && std::io::stdout().is_terminal();
    fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .boxed()
}

fn file_layer(config: &FileConfig) -> Result<BoxedLayer, LoggerError> {
    let writer = LogFileWriter::new(config)?;
    let base = fmt::layer().with_ansi(false).with_writer(writer);

    Ok(match config.format {
        LogFormat::Full => base.with_target(true).boxed(),
        LogFormat::Compact => base.with_target(true).compact().boxed(),
        LogFormat::Json => base.json().boxed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_rejects_invalid_level() {
        let config = LoggerConfig {
            level: "loud".to_string(),
            ..Default::default()
        };
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_init_rejects_all_outputs_disabled() {
        let config = LoggerConfig {
            console: ConsoleConfig {
                enabled: false,
                colored: false,
            },
            ..Default::default()
        };
        assert!(init_logger(config).is_err());
    }

    #[test]
    fn test_build_layers_for_each_output() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LoggerConfig::default();
        assert_eq!(build_layers(&config).unwrap().len(), 1);

        config.file = FileConfig {
            enabled: true,
            path: dir.path().join("app.log"),
            append: true,
            format: LogFormat::Compact,
        };
        assert_eq!(build_layers(&config).unwrap().len(), 2);
        assert!(dir.path().join("app.log").exists());
    }
}

//! Value parsers for CLI arguments clap cannot check on its own.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

/// RFC 1123 hostname: dot separated labels of letters, digits and inner hyphens
static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
        .expect("static pattern")
});

const MAX_ROLLBACK_STEPS: u32 = 100;

pub fn validate_port(raw: &str) -> Result<u16, String> {
    match raw.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            raw
        )),
    }
}

/// The configuration file must exist and be a readable regular file.
pub fn validate_config_file_path(raw: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(raw);

    if !path.is_file() {
        return Err(if path.exists() {
            format!("Configuration path is not a file: '{}'", raw)
        } else {
            format!("Configuration file does not exist: '{}'", raw)
        });
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", raw, e))
}

pub fn validate_rollback_steps(raw: &str) -> Result<u32, String> {
    let steps: u32 = raw.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            raw
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {}",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

/// Accepts an IP address or a hostname such as `localhost`.
///
/// Dotted all-numeric input must be a valid IPv4 address, so `999.1.1.1`
/// is not mistaken for a hostname.
pub fn validate_host_address(raw: &str) -> Result<String, String> {
    let host = raw.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }

    if host.parse::<IpAddr>().is_ok() {
        return Ok(host.to_string());
    }

    if host.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(format!("Invalid IPv4 address format: '{}'", raw));
    }

    if host.len() > 253 || !HOSTNAME.is_match(host) {
        return Err(format!("Invalid host address: '{}'", raw));
    }

    Ok(host.to_string())
}

//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.aura/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AuraConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_FILE: &str = "aura.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.aura/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".aura").join("config.toml"))
}

/// Load config from `~/.aura/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AuraConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<AuraConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(AuraConfig::default());
        }
    };
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AuraConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AuraConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: AuraConfig = toml::from_str(&contents)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Aura Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# base_url = "http://localhost:8080"   # Or set AURA_BASE_URL
# timeout_secs = 30                    # Or set AURA_TIMEOUT_SECS

# [logging]
# level = "debug"                      # "off", "error", "warn", "info", "debug", "trace"
# file = "aura.log"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_CONTENT) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_base_url` is from the `--base-url` flag (None = not specified).
pub fn resolve(config: &AuraConfig, cli_base_url: Option<&str>) -> ResolvedConfig {
    resolve_with_env(config, cli_base_url, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &AuraConfig,
    cli_base_url: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli_base_url
        .map(|s| s.to_string())
        .or_else(|| env("AURA_BASE_URL"))
        .or_else(|| config.server.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Timeout: env → config → default
    let timeout_secs = env("AURA_TIMEOUT_SECS")
        .and_then(|s| match s.parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(e) => {
                warn!("Ignoring AURA_TIMEOUT_SECS={s:?}: {e}");
                None
            }
        })
        .or(config.server.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let log_level = config
        .logging
        .level
        .as_deref()
        .and_then(|level| match level.parse::<LevelFilter>() {
            Ok(filter) => Some(filter),
            Err(_) => {
                warn!("Unknown log level {level:?}, using debug");
                None
            }
        })
        .unwrap_or(LevelFilter::Debug);

    let log_file = config
        .logging
        .file
        .clone()
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    ResolvedConfig {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
        log_level,
        log_file: PathBuf::from(log_file),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_default_config_parses() {
        let config = AuraConfig::default();
        assert!(config.server.base_url.is_none());
        assert!(config.logging.level.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve_with_env(&AuraConfig::default(), None, no_env);
        assert_eq!(resolved.base_url, DEFAULT_BASE_URL);
        assert_eq!(resolved.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(resolved.log_level, LevelFilter::Debug);
        assert_eq!(resolved.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AuraConfig {
            server: ServerConfig {
                base_url: Some("http://192.168.1.40:8080".to_string()),
                timeout_secs: Some(5),
            },
            logging: LoggingConfig {
                level: Some("warn".to_string()),
                file: Some("/tmp/aura-test.log".to_string()),
            },
        };
        let resolved = resolve_with_env(&config, None, no_env);
        assert_eq!(resolved.base_url, "http://192.168.1.40:8080");
        assert_eq!(resolved.timeout, Duration::from_secs(5));
        assert_eq!(resolved.log_level, LevelFilter::Warn);
        assert_eq!(resolved.log_file, PathBuf::from("/tmp/aura-test.log"));
    }

    #[test]
    fn test_env_overrides_config_and_cli_overrides_env() {
        let config = AuraConfig {
            server: ServerConfig {
                base_url: Some("http://from-config".to_string()),
                timeout_secs: Some(5),
            },
            ..Default::default()
        };
        let env = |key: &str| match key {
            "AURA_BASE_URL" => Some("http://from-env".to_string()),
            "AURA_TIMEOUT_SECS" => Some("12".to_string()),
            _ => None,
        };

        let resolved = resolve_with_env(&config, None, env);
        assert_eq!(resolved.base_url, "http://from-env");
        assert_eq!(resolved.timeout, Duration::from_secs(12));

        let resolved = resolve_with_env(&config, Some("http://from-cli"), env);
        assert_eq!(resolved.base_url, "http://from-cli");
    }

    #[test]
    fn test_bad_env_timeout_falls_back_to_config() {
        let config = AuraConfig {
            server: ServerConfig {
                timeout_secs: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };
        let env = |key: &str| (key == "AURA_TIMEOUT_SECS").then(|| "soon".to_string());
        let resolved = resolve_with_env(&config, None, env);
        assert_eq!(resolved.timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing; everything else stays default
        let toml_str = r#"
[server]
base_url = "http://bank.local:8080"
"#;
        let config: AuraConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.server.base_url.as_deref(),
            Some("http://bank.local:8080")
        );
        assert!(config.server.timeout_secs.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: AuraConfig = toml::from_str(DEFAULT_CONFIG_CONTENT).unwrap();
        assert!(config.server.base_url.is_none());
    }

    #[test]
    fn test_load_missing_file_generates_default() {
        let dir = std::env::temp_dir().join(format!("aura-config-test-{}", std::process::id()));
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let config = load_config_from(&path).unwrap();
        assert!(config.server.base_url.is_none());
        assert!(path.exists());

        fs::write(&path, "[server]\ntimeout_secs = \"not a number\"\n").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Parse(_))));

        let _ = fs::remove_dir_all(&dir);
    }
}

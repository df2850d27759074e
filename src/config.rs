//! Configuration support for iq-report.
//!
//! Settings are resolved from three layers, highest precedence first:
//! command-line flags, environment variables, and an optional
//! `iq-report.config.yml` file.

use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::shared::error::ReportError;
use crate::shared::security::{validate_regular_file, MAX_CONFIG_FILE_SIZE};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "iq-report.config.yml";
pub const DEFAULT_OUTPUT_DIR: &str = "raw_reports";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub organization_id: Option<String>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
    pub keep_raw: Option<bool>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    validate_regular_file(path, "config file", MAX_CONFIG_FILE_SIZE).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}

/// Settings read from environment variables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub organization_id: Option<String>,
    pub output_dir: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl EnvConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the environment layer from an arbitrary lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = match get("IQ_TIMEOUT_SECS") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| ReportError::ConfigError {
                field: "IQ_TIMEOUT_SECS".to_string(),
                reason: format!("'{}' is not a whole number of seconds ({})", raw, e),
                hint: "Set IQ_TIMEOUT_SECS to a positive integer such as 30".to_string(),
            })?),
            None => None,
        };

        Ok(Self {
            server_url: get("IQ_SERVER_URL"),
            username: get("IQ_USERNAME"),
            password: get("IQ_PASSWORD"),
            organization_id: get("ORGANIZATION_ID"),
            output_dir: get("OUTPUT_DIR"),
            timeout_secs,
        })
    }
}

/// Settings supplied on the command line.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CliOverrides {
    pub server_url: Option<String>,
    pub username: Option<String>,
    pub organization_id: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
    pub keep_raw: bool,
}

/// Fully resolved and validated run configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_url: String,
    pub username: String,
    pub password: String,
    pub organization_id: Option<String>,
    pub output_dir: PathBuf,
    pub timeout_secs: u64,
    pub keep_raw: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("server_url", &self.server_url)
            .field("username", &self.username)
            .field("password", &"***")
            .field("organization_id", &self.organization_id)
            .field("output_dir", &self.output_dir)
            .field("timeout_secs", &self.timeout_secs)
            .field("keep_raw", &self.keep_raw)
            .finish()
    }
}

impl AppConfig {
    /// Merges the three layers and validates the result.
    pub fn resolve(file: ConfigFile, env: EnvConfig, cli: CliOverrides) -> Result<Self> {
        let server_url = cli
            .server_url
            .or(env.server_url)
            .or(file.server_url)
            .ok_or_else(|| missing("IQ_SERVER_URL", "--server-url or IQ_SERVER_URL"))?;
        let server_url = validate_server_url(&server_url)?;

        let username = cli
            .username
            .or(env.username)
            .or(file.username)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("IQ_USERNAME", "--username or IQ_USERNAME"))?;

        let password = env
            .password
            .or(file.password)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| missing("IQ_PASSWORD", "the IQ_PASSWORD environment variable"))?;

        let organization_id = cli
            .organization_id
            .or(env.organization_id)
            .or(file.organization_id)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let output_dir = cli
            .output_dir
            .or_else(|| env.output_dir.map(PathBuf::from))
            .or_else(|| file.output_dir.map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let timeout_secs = cli
            .timeout_secs
            .or(env.timeout_secs)
            .or(file.timeout_secs)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(ReportError::ConfigError {
                field: "timeout".to_string(),
                reason: "Timeout must be greater than zero".to_string(),
                hint: "Use --timeout or IQ_TIMEOUT_SECS with a positive number of seconds"
                    .to_string(),
            }
            .into());
        }

        let keep_raw = cli.keep_raw || file.keep_raw.unwrap_or(false);

        Ok(Self {
            server_url,
            username,
            password,
            organization_id,
            output_dir,
            timeout_secs,
            keep_raw,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn missing(field: &str, source: &str) -> anyhow::Error {
    ReportError::ConfigError {
        field: field.to_string(),
        reason: "Value is missing or blank".to_string(),
        hint: format!("Provide it via {} or {}", source, CONFIG_FILENAME),
    }
    .into()
}

/// Checks the scheme and drops a trailing slash.
fn validate_server_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim();
    let url = reqwest::Url::parse(trimmed).map_err(|e| ReportError::InvalidServerUrl {
        url: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ReportError::InvalidServerUrl {
            url: trimmed.to_string(),
            reason: format!("Unsupported scheme '{}'", url.scheme()),
        }
        .into());
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}

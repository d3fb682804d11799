//! Configuration for scan-enrich.
//!
//! Two surfaces: the reporting-API settings come from the environment
//! (the tool usually runs from CI or cron where secrets live in env
//! vars), and per-deployment column names can come from an optional
//! `scan-enrich.config.yml` beside the data. Command-line flags override
//! the config file; the config file overrides the built-in defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::shared::error::EnrichError;
use crate::shared::Result;

const CONFIG_FILENAME: &str = "scan-enrich.config.yml";

pub const DEFAULT_KEY_COLUMN: &str = "Image ID";
pub const DEFAULT_LABEL_COLUMN: &str = "Container Labels";
pub const DEFAULT_LABEL_KEY: &str = "MAINTAINER";
pub const DEFAULT_ATTRIBUTE_COLUMN: &str = "Maintainer";
pub const DEFAULT_JOB_NAME: &str = "Kubernetes Workload Vulnerability Findings";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 30;
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 2 * 60 * 60;
const DEFAULT_REPORT_TIMEZONE: &str = "America/New_York";

/// Reporting-API settings sourced from the environment.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Tenant hostname, e.g. `secure.example.com`
    pub tenant: String,
    /// Bearer token for the reporting API
    pub api_key: String,
    /// Delay between job-status polls
    pub poll_interval: Duration,
    /// Overall cap on how long to wait for one job
    pub poll_timeout: Duration,
    /// Timezone submitted with report jobs
    pub timezone: String,
}

impl ApiConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Reads the configuration from an arbitrary variable iterator, so
    /// tests never have to mutate the process environment.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars: Vec<(String, String)> = vars.into_iter().collect();

        let tenant = required_var(
            &vars,
            "SECURE_TENANT",
            "Set it to the platform hostname, e.g. secure.example.com",
        )?;
        let api_key = required_var(
            &vars,
            "SECURE_API_KEY",
            "Set it to an API token with reporting permissions",
        )?;
        let poll_interval_secs =
            optional_secs(&vars, "SECURE_POLL_INTERVAL_SECS", DEFAULT_POLL_INTERVAL_SECS)?;
        let poll_timeout_secs =
            optional_secs(&vars, "SECURE_POLL_TIMEOUT_SECS", DEFAULT_POLL_TIMEOUT_SECS)?;
        let timezone = lookup_var(&vars, "SECURE_REPORT_TIMEZONE")
            .unwrap_or_else(|| DEFAULT_REPORT_TIMEZONE.to_string());

        Ok(Self {
            tenant,
            api_key,
            poll_interval: Duration::from_secs(poll_interval_secs),
            poll_timeout: Duration::from_secs(poll_timeout_secs),
            timezone,
        })
    }
}

fn lookup_var(vars: &[(String, String)], name: &str) -> Option<String> {
    vars.iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.clone())
}

fn required_var(vars: &[(String, String)], name: &str, hint: &str) -> Result<String> {
    match lookup_var(vars, name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(EnrichError::MissingEnvVar {
            name: name.to_string(),
            hint: hint.to_string(),
        }
        .into()),
    }
}

fn optional_secs(vars: &[(String, String)], name: &str, default: u64) -> Result<u64> {
    match lookup_var(vars, name) {
        None => Ok(default),
        Some(value) => value.trim().parse::<u64>().map_err(|_| {
            EnrichError::InvalidEnvVar {
                name: name.to_string(),
                details: format!("expected a whole number of seconds, got {:?}", value),
            }
            .into()
        }),
    }
}

/// Optional per-deployment column configuration file schema.
///
/// The two observed deployments of this pipeline disagree on column
/// names ("Container Labels" vs "Namespace Labels", "Maintainer" vs
/// "vsad"); a config file beside the data saves retyping them on every
/// invocation.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub key_column: Option<String>,
    pub label_column: Option<String>,
    pub label_key: Option<String>,
    pub attribute_column: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
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

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    let fields = [
        ("key_column", &config.key_column),
        ("label_column", &config.label_column),
        ("label_key", &config.label_key),
        ("attribute_column", &config.attribute_column),
    ];
    for (name, value) in fields {
        if let Some(value) = value {
            if value.trim().is_empty() {
                bail!(
                    "Invalid config: {} must not be empty.\n\n\
                     💡 Hint: Remove the field to use the default, or set a column name.",
                    name
                );
            }
        }
    }
    Ok(())
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

/// Resolved column names for one invocation.
///
/// Precedence: explicit CLI flag, then config file, then built-in
/// default.
#[derive(Debug, Clone)]
pub struct ColumnSettings {
    pub key_column: String,
    pub label_column: String,
    pub label_key: String,
    pub attribute_column: String,
}

impl ColumnSettings {
    pub fn resolve(
        cli_key_column: Option<String>,
        cli_label_column: Option<String>,
        cli_label_key: Option<String>,
        cli_attribute_column: Option<String>,
        file: Option<&ConfigFile>,
    ) -> Self {
        let from_file = |pick: fn(&ConfigFile) -> &Option<String>| {
            file.and_then(|config| pick(config).clone())
        };
        Self {
            key_column: cli_key_column
                .or_else(|| from_file(|c| &c.key_column))
                .unwrap_or_else(|| DEFAULT_KEY_COLUMN.to_string()),
            label_column: cli_label_column
                .or_else(|| from_file(|c| &c.label_column))
                .unwrap_or_else(|| DEFAULT_LABEL_COLUMN.to_string()),
            label_key: cli_label_key
                .or_else(|| from_file(|c| &c.label_key))
                .unwrap_or_else(|| DEFAULT_LABEL_KEY.to_string()),
            attribute_column: cli_attribute_column
                .or_else(|| from_file(|c| &c.attribute_column))
                .unwrap_or_else(|| DEFAULT_ATTRIBUTE_COLUMN.to_string()),
        }
    }
}

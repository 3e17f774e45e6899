//! Configuration loading for the GroupWatch dashboard.
//!
//! All fields are required unless explicitly marked optional. No defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TuiConfig {
    /// Project URL of the REST backend, without the `/rest/v1` suffix.
    pub api_base_url: String,
    pub auth: AuthConfig,
    pub request_timeout_ms: u64,
    pub refresh_interval_ms: u64,
    pub tables: TablesConfig,
    /// Hide and flag rows through the `excluido` column instead of deleting.
    pub soft_delete: bool,
    pub persistence_path: PathBuf,
    pub log_path: PathBuf,
    pub theme: ThemeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthConfig {
    pub api_key: String,
    /// Session token; the api key doubles as bearer when absent.
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    pub groups: String,
    pub messages: String,
    pub squads: String,
    pub heads: String,
    pub managers: String,
    /// Column holding the display value in the three option tables.
    pub option_column: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration file path (use --config or GROUPWATCH_CONFIG)")]
    MissingConfigPath,
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid config value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
}

impl TuiConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path_from_args().or_else(config_path_from_env);
        let path = path.ok_or(ConfigError::MissingConfigPath)?;
        let config = Self::from_path(&path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: TuiConfig = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_base_url.trim().is_empty() {
            return Err(invalid("api_base_url", "must not be empty"));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(invalid("api_base_url", "must start with http:// or https://"));
        }
        if self.auth.api_key.trim().is_empty() {
            return Err(invalid("auth.api_key", "must not be empty"));
        }
        if self
            .auth
            .access_token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty())
        {
            return Err(invalid("auth.access_token", "must not be empty when set"));
        }
        if self.request_timeout_ms == 0 {
            return Err(invalid("request_timeout_ms", "must be > 0"));
        }
        if self.refresh_interval_ms == 0 {
            return Err(invalid("refresh_interval_ms", "must be > 0"));
        }
        let tables = [
            ("tables.groups", &self.tables.groups),
            ("tables.messages", &self.tables.messages),
            ("tables.squads", &self.tables.squads),
            ("tables.heads", &self.tables.heads),
            ("tables.managers", &self.tables.managers),
            ("tables.option_column", &self.tables.option_column),
        ];
        for (field, value) in tables {
            if value.trim().is_empty() {
                return Err(invalid(field, "must not be empty"));
            }
        }
        if self.persistence_path.as_os_str().is_empty() {
            return Err(invalid("persistence_path", "must not be empty"));
        }
        if self.log_path.as_os_str().is_empty() {
            return Err(invalid("log_path", "must not be empty"));
        }
        if self.theme.name.trim().is_empty() {
            return Err(invalid("theme.name", "must not be empty"));
        }
        if !self.theme.name.eq_ignore_ascii_case("odonto") {
            return Err(invalid("theme.name", "only 'odonto' is supported"));
        }
        Ok(())
    }

    /// Token sent as `Authorization: Bearer`.
    pub fn bearer_token(&self) -> &str {
        self.auth
            .access_token
            .as_deref()
            .unwrap_or(&self.auth.api_key)
    }
}

fn config_path_from_env() -> Option<PathBuf> {
    std::env::var("GROUPWATCH_CONFIG").ok().map(PathBuf::from)
}

fn config_path_from_args() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

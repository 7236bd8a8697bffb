use std::env;
use std::path::PathBuf;

use crate::errors::{ConfigError, HookscopeError};

/// Prefix used by the hookscope binaries when reading the environment.
pub const ENV_PREFIX: &str = "HOOKSCOPE_";

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8086";
const DEFAULT_PAGE_SIZE: usize = 10;

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Configuration shared by the log service and the CLI.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub environment: Environment,
    pub node_name: String,
    pub http_bind: String,
    pub data_file: Option<PathBuf>,
    pub default_page_size: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            node_name: "hookscope-node".to_string(),
            http_bind: DEFAULT_HTTP_BIND.to_string(),
            data_file: None,
            default_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from `HOOKSCOPE_*` variables, reading `.env` first.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_env_with_prefix(ENV_PREFIX)
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `LOGS_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);
        let defaults = Self::default();

        let environment = env::var(key("ENV"))
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let node_name = env::var(key("NODE_NAME")).unwrap_or(defaults.node_name);
        let http_bind = env::var(key("HTTP_BIND")).unwrap_or(defaults.http_bind);
        let data_file = env::var(key("DATA_FILE"))
            .ok()
            .filter(|raw| !raw.trim().is_empty())
            .map(PathBuf::from);

        let page_size_key = key("DEFAULT_PAGE_SIZE");
        let default_page_size = match env::var(&page_size_key) {
            Ok(raw) => parse_page_size(&page_size_key, &raw)?,
            Err(_) => defaults.default_page_size,
        };

        Ok(Self {
            environment,
            node_name,
            http_bind,
            data_file,
            default_page_size,
        })
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }

    /// Returns the NDJSON data file if configured.
    pub fn data_file(&self) -> Option<&PathBuf> {
        self.data_file.as_ref()
    }
}

fn parse_page_size(key: &str, raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw.to_string(),
        }),
    }
}

/// Helper that loads config and converts to the canonical hookscope error type.
pub fn load_core_config() -> Result<CoreConfig, HookscopeError> {
    Ok(CoreConfig::from_env()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_defaults_when_nothing_is_set() {
        let cfg = CoreConfig::from_env_with_prefix("HOOKSCOPE_TEST_EMPTY_").expect("config");
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(Environment::default(), Environment::Development);
        assert_eq!(cfg.http_bind, DEFAULT_HTTP_BIND);
        assert_eq!(cfg.default_page_size, DEFAULT_PAGE_SIZE);
        assert!(cfg.data_file().is_none());
    }

    #[test]
    fn reads_prefixed_values() {
        env::set_var("HOOKSCOPE_TEST_SET_ENV", "prod");
        env::set_var("HOOKSCOPE_TEST_SET_DATA_FILE", "/tmp/logs.ndjson");
        env::set_var("HOOKSCOPE_TEST_SET_DEFAULT_PAGE_SIZE", "25");
        let cfg = CoreConfig::from_env_with_prefix("HOOKSCOPE_TEST_SET_").expect("config");
        assert!(cfg.is_production());
        assert_eq!(cfg.data_file(), Some(&PathBuf::from("/tmp/logs.ndjson")));
        assert_eq!(cfg.default_page_size, 25);
    }

    #[test]
    fn rejects_zero_page_size() {
        env::set_var("HOOKSCOPE_TEST_BAD_DEFAULT_PAGE_SIZE", "0");
        let err = CoreConfig::from_env_with_prefix("HOOKSCOPE_TEST_BAD_").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }
}

//! Runtime settings for the `b` binary, read from `BRAVE_`-prefixed
//! environment variables.
//!
//! | variable           | field        | default                         |
//! |--------------------|--------------|---------------------------------|
//! | `BRAVE_TOKEN`      | `token`      | empty (rejected by the client)  |
//! | `BRAVE_API_BASE`   | `api_base`   | `https://api.search.brave.com`  |
//! | `BRAVE_LOG_DIR`    | `log_dir`    | none (no file sink)             |
//! | `BRAVE_LOG_FORMAT` | `log_format` | `text`                          |
//!
//! Logging settings never block a run: an unrecognised `BRAVE_LOG_FORMAT`
//! falls back to `text`.
use bsearch_common::observability::LogFormat;
use config::{Config, ConfigError, Environment};
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StringDeserializer};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::PathBuf;

pub const ENV_PREFIX: &str = "BRAVE";
pub const DEFAULT_API_BASE: &str = "https://api.search.brave.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Subscription token, sent verbatim as `X-Subscription-Token`.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
    #[serde(default, deserialize_with = "lenient_log_format")]
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            token: String::new(),
            api_base: default_api_base(),
            log_dir: None,
            log_format: LogFormat::default(),
        }
    }
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.into()
}

fn lenient_log_format<'de, D>(de: D) -> Result<LogFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(de)? else {
        return Ok(LogFormat::default());
    };
    let name: StringDeserializer<ValueError> = raw.trim().to_ascii_lowercase().into_deserializer();
    Ok(LogFormat::deserialize(name).unwrap_or_default())
}

/// Builder hides the `config` crate wiring.
pub struct SettingsLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Read from the process environment.
    pub fn new() -> Self {
        Self::with_environment(environment())
    }

    /// Read from an explicit variable map instead of the process environment.
    ///
    /// ```
    /// use bsearch_config::SettingsLoader;
    /// use std::collections::HashMap;
    ///
    /// let vars = HashMap::from([("BRAVE_TOKEN".to_string(), "abc".to_string())]);
    /// let settings = SettingsLoader::from_vars(vars).load().expect("valid settings");
    ///
    /// assert_eq!(settings.token, "abc");
    /// assert_eq!(settings.api_base, "https://api.search.brave.com");
    /// ```
    pub fn from_vars(vars: HashMap<String, String>) -> Self {
        Self::with_environment(environment().source(Some(vars)))
    }

    fn with_environment(env: Environment) -> Self {
        Self {
            builder: Config::builder().add_source(env),
        }
    }

    /// Consume the builder and deserialize the merged sources.
    pub fn load(self) -> Result<Settings, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Prefix of environment variables overriding file settings, e.g.
/// `TAXONOMY_API_BASE_URL` or `TAXONOMY_PATHS__SUBCATEGORIES`.
pub const ENV_PREFIX: &str = "TAXONOMY";

fn default_request_timeout_secs() -> u64 {
    10
}

/// Configuration options for talking to the catalog backend.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// Base URL of the REST backend, without a trailing slash.
    pub api_base_url: String,
    /// Per-request timeout applied by the HTTP client.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub paths: ApiPaths,
}

/// REST paths relative to [`ServerConfig::api_base_url`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiPaths {
    pub categories: String,
    pub subcategories: String,
    pub available_parents: String,
}

impl Default for ApiPaths {
    fn default() -> Self {
        Self {
            categories: "/categories".to_string(),
            subcategories: "/subcategories".to_string(),
            available_parents: "/subcategories/available-parents".to_string(),
        }
    }
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/{app_env}.yaml`, then
    /// `TAXONOMY_*` environment variables. Both files are optional.
    pub fn load(app_env: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }

    /// Parses a YAML document without consulting files or the environment.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()?
            .try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

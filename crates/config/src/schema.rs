use echo_types::validate_app_id;
use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Router (LLM proxy) endpoint used when `base_router_url` is unset.
pub const DEFAULT_ROUTER_URL: &str = "https://echo.router.merit.systems";

/// Control-plane endpoint used when neither `base_path` nor `base_echo_url` is set.
pub const DEFAULT_ECHO_URL: &str = "https://echo.merit.systems";

/// Prefix for environment overrides (`ECHO_APP_ID`, `ECHO_API_KEY`, ...).
const ENV_PREFIX: &str = "ECHO_";

fn default_log_level() -> String {
    "info".to_string()
}

/// Identifies an app and the endpoints its requests go to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoConfig {
    /// UUID v4 of the provisioned app.
    #[serde(default)]
    pub app_id: String,
    /// Legacy control-plane base; wins over `base_echo_url` when both are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_router_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_echo_url: Option<String>,
}

impl EchoConfig {
    /// Config for `app_id` with every endpoint at its default.
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            ..Self::default()
        }
    }

    /// Overrides the router endpoint.
    #[must_use]
    pub fn with_router_url(mut self, url: impl Into<String>) -> Self {
        self.base_router_url = Some(url.into());
        self
    }

    /// Overrides the control-plane endpoint.
    #[must_use]
    pub fn with_echo_url(mut self, url: impl Into<String>) -> Self {
        self.base_echo_url = Some(url.into());
        self
    }

    /// Router base URL without a trailing slash.
    #[must_use]
    pub fn router_url(&self) -> &str {
        self.base_router_url
            .as_deref()
            .unwrap_or(DEFAULT_ROUTER_URL)
            .trim_end_matches('/')
    }

    /// Control-plane base URL without a trailing slash.
    #[must_use]
    pub fn control_plane_url(&self) -> &str {
        self.base_path
            .as_deref()
            .or(self.base_echo_url.as_deref())
            .unwrap_or(DEFAULT_ECHO_URL)
            .trim_end_matches('/')
    }

    /// Runs the app id precondition, labelling failures with `context`.
    ///
    /// # Errors
    ///
    /// Returns [`echo_types::EchoError::InvalidAppId`] if `app_id` is not a UUID v4.
    pub fn validate(&self, context: &str) -> echo_types::Result<()> {
        validate_app_id(&self.app_id, context)
    }
}

/// Top-level configuration for the `echo` binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub echo: EchoConfig,
    /// Static API key used as the bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            echo: EchoConfig::default(),
            api_key: None,
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Parses configuration from a YAML string, merged with defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the YAML is invalid or extraction fails.
    #[allow(clippy::result_large_err)]
    pub fn from_yaml(yaml: &str) -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Yaml::string(yaml))
            .extract()
    }

    /// Loads defaults, then the YAML file at `path` (if any), then `ECHO_*`
    /// environment variables.
    ///
    /// # Errors
    ///
    /// Returns a [`figment::Error`] if the file cannot be parsed or a value
    /// has the wrong type.
    #[allow(clippy::result_large_err)]
    pub fn load(path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        figment.merge(Env::prefixed(ENV_PREFIX)).extract()
    }
}

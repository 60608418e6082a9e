use serde::Deserialize;

/// Environment variable prefix for every client setting
pub const ENV_PREFIX: &str = "USPY_";

const fn default_timeout_secs() -> u64 {
    10
}

/// Deployment flavour, drives log formatting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Client configuration
///
/// Loaded from `USPY_*` environment variables:
/// - `USPY_API_URL` (required): base URL of the review API
/// - `USPY_ENV`: `development` (default) or `production`
/// - `USPY_TIMEOUT_SECS`: per-request timeout, default 10
/// - `USPY_SESSION`: session cookie to reuse an existing login
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
    pub api_url: String,
    #[serde(default)]
    pub env: Environment,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub session: Option<String>,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            env: Environment::default(),
            timeout_secs: default_timeout_secs(),
            session: None,
        }
    }

    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }
}

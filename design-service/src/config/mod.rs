use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use service_core::config as core_config;
use service_core::error::AppError;

/// Default Gemini REST endpoint.
pub const DEFAULT_GENAI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Process configuration, read once at startup and never mutated.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Credential for the AI provider. Without it AI suggestions are disabled.
    #[serde(default)]
    pub api_key: Option<Secret<String>>,
    /// Token-signing secret. Without it designs cannot be saved.
    #[serde(default)]
    pub jwt_secret: Option<Secret<String>>,
    /// Require bearer tokens to be HS256 JWTs signed with `jwt_secret`.
    #[serde(default)]
    pub verify_tokens: bool,
    #[serde(default = "default_genai_model")]
    pub genai_model: String,
    #[serde(default = "default_genai_api_base")]
    pub genai_api_base: String,
    #[serde(default = "default_genai_timeout_secs")]
    pub genai_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_genai_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_genai_api_base() -> String {
    DEFAULT_GENAI_API_BASE.to_string()
}

fn default_genai_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: None,
            jwt_secret: None,
            verify_tokens: false,
            genai_model: default_genai_model(),
            genai_api_base: default_genai_api_base(),
            genai_timeout_secs: default_genai_timeout_secs(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, AppError> {
        core_config::load()
    }

    /// The AI provider key, if set to something non-empty.
    pub fn api_key(&self) -> Option<&str> {
        non_empty(&self.api_key)
    }

    /// The token-signing secret, if set to something non-empty.
    pub fn jwt_secret(&self) -> Option<&str> {
        non_empty(&self.jwt_secret)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn non_empty(secret: &Option<Secret<String>>) -> Option<&str> {
    secret
        .as_ref()
        .map(|s| s.expose_secret().as_str())
        .filter(|s| !s.is_empty())
}

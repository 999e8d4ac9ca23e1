use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: Secret<String>,
    pub base_url: Url,
    pub organization_id: Option<String>,
    pub project_id: Option<String>,
    pub timeout: Duration,
    pub max_retries: u32,
    pub user_agent: String,
}

impl OpenAIConfig {
    /// Creates a new OpenAIConfig with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: default_base_url(),
            organization_id: None,
            project_id: None,
            timeout: default_timeout(),
            max_retries: default_max_retries(),
            user_agent: default_user_agent(),
        }
    }

    /// Creates a new OpenAIConfig from environment variables
    ///
    /// Reads the following environment variables:
    /// - OPENAI_API_KEY (required)
    /// - OPENAI_BASE_URL (optional, defaults to https://api.openai.com/v1)
    /// - OPENAI_ORGANIZATION_ID (optional)
    /// - OPENAI_PROJECT_ID (optional)
    pub fn from_env() -> OpenAIResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Configuration(ConfigurationError::MissingApiKey(
                "OPENAI_API_KEY environment variable not found".to_string(),
            ))
        })?;

        let mut config = Self::new(api_key);

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config = config.with_base_url_str(&base_url)?;
        }

        if let Ok(org_id) = std::env::var("OPENAI_ORGANIZATION_ID") {
            config.organization_id = Some(org_id);
        }

        if let Ok(project_id) = std::env::var("OPENAI_PROJECT_ID") {
            config.project_id = Some(project_id);
        }

        Ok(config)
    }

    /// Validates the configuration
    pub fn validate(&self) -> OpenAIResult<()> {
        let api_key = self.api_key.expose_secret();

        if api_key.trim().is_empty() {
            return Err(OpenAIError::Configuration(
                ConfigurationError::MissingApiKey("API key is empty".to_string()),
            ));
        }

        if api_key.chars().any(char::is_whitespace) {
            return Err(OpenAIError::Configuration(
                ConfigurationError::InvalidApiKeyFormat(
                    "API key must not contain whitespace".to_string(),
                ),
            ));
        }

        if self.timeout.is_zero() {
            return Err(OpenAIError::Configuration(
                ConfigurationError::InvalidTimeout("Timeout must be greater than 0".to_string()),
            ));
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_base_url_str(self, base_url: &str) -> OpenAIResult<Self> {
        let url = Url::parse(base_url).map_err(|e| {
            OpenAIError::Configuration(ConfigurationError::InvalidBaseUrl(format!(
                "{}: {}",
                base_url, e
            )))
        })?;
        Ok(self.with_base_url(url))
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_retries() -> u32 {
    3
}

fn default_user_agent() -> String {
    format!("openai-finetune-classifier/{}", env!("CARGO_PKG_VERSION"))
}

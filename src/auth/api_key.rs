use crate::auth::AuthProvider;
use crate::errors::{AuthenticationError, OpenAIError, OpenAIResult};
use async_trait::async_trait;
use http::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

const ORGANIZATION_HEADER: &str = "openai-organization";
const PROJECT_HEADER: &str = "openai-project";

/// Sends the key as a bearer token, plus the optional organization and project headers.
pub struct ApiKeyProvider {
    api_key: SecretString,
    organization_id: Option<String>,
    project_id: Option<String>,
}

impl ApiKeyProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_secret(SecretString::new(api_key.into()))
    }

    pub fn from_secret(api_key: SecretString) -> Self {
        Self {
            api_key,
            organization_id: None,
            project_id: None,
        }
    }

    pub fn with_organization(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// No `sk-` prefix check: proxies and project keys use other shapes.
    fn is_usable_key(key: &str) -> bool {
        !key.is_empty() && !key.chars().any(char::is_whitespace)
    }

    fn bearer(&self) -> OpenAIResult<HeaderValue> {
        let key = self.api_key.expose_secret();
        if !Self::is_usable_key(key) {
            return Err(OpenAIError::Authentication(AuthenticationError::InvalidApiKey(
                "API key must be non-empty and contain no whitespace".to_string(),
            )));
        }

        let mut value = HeaderValue::from_str(&format!("Bearer {key}")).map_err(|_| {
            OpenAIError::Authentication(AuthenticationError::InvalidApiKey(
                "API key is not a valid header value".to_string(),
            ))
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

fn insert_scope_header(headers: &mut HeaderMap, name: &'static str, value: &str) -> OpenAIResult<()> {
    let value = HeaderValue::from_str(value).map_err(|_| {
        OpenAIError::Authentication(AuthenticationError::InvalidHeader {
            header: name.to_string(),
            value: value.to_string(),
        })
    })?;
    headers.insert(name, value);
    Ok(())
}

#[async_trait]
impl AuthProvider for ApiKeyProvider {
    async fn authenticate(&self, headers: &mut HeaderMap) -> OpenAIResult<()> {
        headers.insert(http::header::AUTHORIZATION, self.bearer()?);

        if let Some(org_id) = &self.organization_id {
            insert_scope_header(headers, ORGANIZATION_HEADER, org_id)?;
        }
        if let Some(project_id) = &self.project_id {
            insert_scope_header(headers, PROJECT_HEADER, project_id)?;
        }
        Ok(())
    }

    fn is_valid(&self) -> bool {
        Self::is_usable_key(self.api_key.expose_secret())
    }
}

use crate::auth::{AuthManager, OpenAIAuthManager};
use crate::client::{OpenAIClient, OpenAIClientImpl, OpenAIConfig};
use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult};
use crate::resilience::{ResilienceConfig, ResilienceHooks, ResilienceOrchestrator, TracingHooks};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

pub struct OpenAIClientBuilder {
    config: Option<OpenAIConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
    auth_manager: Option<Arc<dyn AuthManager>>,
    resilience: Option<Arc<ResilienceOrchestrator>>,
    hooks: Option<Arc<dyn ResilienceHooks>>,
}

impl OpenAIClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
            auth_manager: None,
            resilience: None,
            hooks: None,
        }
    }

    pub fn with_config(mut self, config: OpenAIConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.config = Some(OpenAIConfig::new(api_key));
        self
    }

    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_auth_manager(mut self, auth_manager: Arc<dyn AuthManager>) -> Self {
        self.auth_manager = Some(auth_manager);
        self
    }

    pub fn with_resilience(mut self, resilience: Arc<ResilienceOrchestrator>) -> Self {
        self.resilience = Some(resilience);
        self
    }

    /// Replaces the default tracing hooks of the retry layer
    pub fn with_hooks(mut self, hooks: Arc<dyn ResilienceHooks>) -> Self {
        self.hooks = Some(hooks);
        self
    }

    pub fn build(self) -> OpenAIResult<Arc<dyn OpenAIClient>> {
        Ok(Arc::new(self.build_impl()?))
    }

    pub fn build_impl(self) -> OpenAIResult<OpenAIClientImpl> {
        let config = self.config.ok_or_else(|| {
            OpenAIError::Configuration(ConfigurationError::MissingApiKey(
                "API key must be provided".to_string(),
            ))
        })?;
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        let auth_manager = self
            .auth_manager
            .unwrap_or_else(|| Arc::new(OpenAIAuthManager::new(&config)));

        let resilience = match self.resilience {
            Some(resilience) => resilience,
            None => {
                let hooks = self.hooks.unwrap_or_else(|| Arc::new(TracingHooks));
                Arc::new(ResilienceOrchestrator::with_hooks(
                    ResilienceConfig::from_client_config(&config),
                    hooks,
                ))
            }
        };

        Ok(OpenAIClientImpl::new(config, transport, auth_manager, resilience))
    }
}

impl Default for OpenAIClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

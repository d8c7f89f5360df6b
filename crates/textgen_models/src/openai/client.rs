//! Routing and credentials for OpenAI and Azure OpenAI.

use super::{ChatRequest, ChatResponse, conversions};
use crate::{AdapterOptions, ApiKey, ProviderBackend, TransportRequest};
use textgen_core::{
    Conversation, GenerationParams, Message, ProviderId, RoleTable, SystemPlacement,
};
use textgen_error::{ConfigError, TransportError};
use tracing::{debug, instrument};

/// Chat completions backend.
#[derive(Debug, Clone)]
pub struct OpenAiBackend {
    api_key: ApiKey,
    organization: Option<String>,
    base_url: String,
    api_version: Option<String>,
}

impl OpenAiBackend {
    /// Public endpoint root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openai.com/v1";

    /// Creates the backend from options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is available or the Azure
    /// options are incomplete.
    #[instrument(skip(options))]
    pub fn new(options: &AdapterOptions) -> Result<Self, ConfigError> {
        options.validate(ProviderId::OpenAi)?;
        let backend = Self {
            api_key: options.api_key_for(ProviderId::OpenAi)?,
            organization: options.organization().clone(),
            base_url: options.base_url_or(Self::DEFAULT_BASE_URL),
            api_version: options.api_version().clone(),
        };
        debug!(azure = backend.is_azure(), url = %backend.base_url, "Created OpenAI backend");
        Ok(backend)
    }

    /// True when calls go to an Azure OpenAI deployment.
    pub fn is_azure(&self) -> bool {
        self.api_version.is_some()
    }
}

impl ProviderBackend for OpenAiBackend {
    type Request = ChatRequest;
    type Response = ChatResponse;

    const PROVIDER: ProviderId = ProviderId::OpenAi;
    const ROLES: RoleTable = RoleTable {
        user: "user",
        assistant: "assistant",
        system: SystemPlacement::LeadingTurn("system"),
        merge_consecutive: false,
        leading_user: false,
    };
    const FALLBACK_MAX_TOKENS: u32 = 4096;

    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<ChatRequest, TransportError> {
        conversions::to_chat_request(conversation, params)
    }

    fn route(&self, _model: &str, body: serde_json::Value) -> TransportRequest {
        match &self.api_version {
            Some(version) => TransportRequest::new(
                format!("{}/chat/completions?api-version={}", self.base_url, version),
                body,
            )
            .header("api-key", self.api_key.expose()),
            None => {
                let request =
                    TransportRequest::new(format!("{}/chat/completions", self.base_url), body)
                        .header("Authorization", format!("Bearer {}", self.api_key.expose()));
                match &self.organization {
                    Some(org) => request.header("OpenAI-Organization", org.as_str()),
                    None => request,
                }
            }
        }
    }

    fn decode(&self, response: &ChatResponse) -> Vec<Message> {
        conversions::from_chat_response(response)
    }

    fn logprobs(&self, response: &ChatResponse) -> Vec<serde_json::Value> {
        conversions::logprobs(response)
    }
}

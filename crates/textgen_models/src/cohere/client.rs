//! Routing and credentials for Cohere.

use super::{CohereRequest, CohereResponse, conversions};
use crate::{AdapterOptions, ApiKey, ProviderBackend, TransportRequest};
use textgen_core::{
    Conversation, GenerationParams, Message, ProviderId, RoleTable, SystemPlacement,
};
use textgen_error::{ConfigError, TransportError};
use tracing::{debug, instrument};

/// Cohere generate backend.
#[derive(Debug, Clone)]
pub struct CohereBackend {
    api_key: ApiKey,
    base_url: String,
}

impl CohereBackend {
    /// Public endpoint root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.cohere.ai/v1";

    /// Creates the backend from options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is available.
    #[instrument(skip(options))]
    pub fn new(options: &AdapterOptions) -> Result<Self, ConfigError> {
        options.validate(ProviderId::Cohere)?;
        let backend = Self {
            api_key: options.api_key_for(ProviderId::Cohere)?,
            base_url: options.base_url_or(Self::DEFAULT_BASE_URL),
        };
        debug!(url = %backend.base_url, "Created Cohere backend");
        Ok(backend)
    }
}

impl ProviderBackend for CohereBackend {
    type Request = CohereRequest;
    type Response = CohereResponse;

    const PROVIDER: ProviderId = ProviderId::Cohere;
    const ROLES: RoleTable = RoleTable {
        user: "User",
        assistant: "Chatbot",
        system: SystemPlacement::FoldIntoFirstUser,
        merge_consecutive: false,
        leading_user: false,
    };
    const FALLBACK_MAX_TOKENS: u32 = 4050;

    fn effective_params(&self, params: GenerationParams) -> GenerationParams {
        conversions::clamp_params(params)
    }

    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<CohereRequest, TransportError> {
        conversions::to_cohere_request(conversation, params, Self::ROLES.assistant)
    }

    fn route(&self, _model: &str, body: serde_json::Value) -> TransportRequest {
        TransportRequest::new(format!("{}/generate", self.base_url), body)
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
    }

    fn decode(&self, response: &CohereResponse) -> Vec<Message> {
        conversions::from_cohere_response(response)
    }

    fn logprobs(&self, response: &CohereResponse) -> Vec<serde_json::Value> {
        conversions::logprobs(response)
    }
}

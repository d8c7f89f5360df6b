//! Routing and credentials for the Anthropic messages API.

use super::{AnthropicRequest, AnthropicResponse, conversions};
use crate::{AdapterOptions, ApiKey, ProviderBackend, TransportRequest};
use textgen_core::{
    Conversation, GenerationParams, Message, ProviderId, RoleTable, SystemPlacement,
};
use textgen_error::{ConfigError, TransportError};
use tracing::{debug, instrument};

/// API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Anthropic messages backend.
#[derive(Debug, Clone)]
pub struct AnthropicBackend {
    api_key: ApiKey,
    base_url: String,
}

impl AnthropicBackend {
    /// Public endpoint root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.anthropic.com";

    /// Creates the backend from options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is available.
    #[instrument(skip(options))]
    pub fn new(options: &AdapterOptions) -> Result<Self, ConfigError> {
        options.validate(ProviderId::Anthropic)?;
        let backend = Self {
            api_key: options.api_key_for(ProviderId::Anthropic)?,
            base_url: options.base_url_or(Self::DEFAULT_BASE_URL),
        };
        debug!(url = %backend.base_url, "Created Anthropic backend");
        Ok(backend)
    }
}

impl ProviderBackend for AnthropicBackend {
    type Request = AnthropicRequest;
    type Response = AnthropicResponse;

    const PROVIDER: ProviderId = ProviderId::Anthropic;
    const ROLES: RoleTable = RoleTable {
        user: "user",
        assistant: "assistant",
        system: SystemPlacement::Separate,
        merge_consecutive: true,
        leading_user: true,
    };
    const FALLBACK_MAX_TOKENS: u32 = 4096;

    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<AnthropicRequest, TransportError> {
        conversions::to_anthropic_request(conversation, params)
    }

    fn route(&self, _model: &str, body: serde_json::Value) -> TransportRequest {
        TransportRequest::new(format!("{}/v1/messages", self.base_url), body)
            .header("x-api-key", self.api_key.expose())
            .header("anthropic-version", ANTHROPIC_VERSION)
    }

    fn decode(&self, response: &AnthropicResponse) -> Vec<Message> {
        conversions::from_anthropic_response(response)
    }
}

//! Routing and credentials for Gemini.

use super::{GeminiRequest, GeminiResponse, conversions};
use crate::{AdapterOptions, ApiKey, ProviderBackend, TransportRequest};
use textgen_core::{
    Conversation, GenerationParams, Message, ProviderId, RoleTable, SystemPlacement,
};
use textgen_error::{ConfigError, TransportError};
use tracing::{debug, instrument};

/// Gemini backend.
#[derive(Debug, Clone)]
pub struct GeminiBackend {
    api_key: ApiKey,
    project_id: Option<String>,
    base_url: String,
}

impl GeminiBackend {
    /// Public endpoint root.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Creates the backend from options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is available.
    #[instrument(skip(options))]
    pub fn new(options: &AdapterOptions) -> Result<Self, ConfigError> {
        options.validate(ProviderId::Gemini)?;
        let backend = Self {
            api_key: options.api_key_for(ProviderId::Gemini)?,
            project_id: options.project_id().clone(),
            base_url: options.base_url_or(Self::DEFAULT_BASE_URL),
        };
        debug!(url = %backend.base_url, "Created Gemini backend");
        Ok(backend)
    }
}

impl ProviderBackend for GeminiBackend {
    type Request = GeminiRequest;
    type Response = GeminiResponse;

    const PROVIDER: ProviderId = ProviderId::Gemini;
    const ROLES: RoleTable = RoleTable {
        user: "user",
        assistant: "model",
        system: SystemPlacement::FoldIntoFirstUser,
        merge_consecutive: false,
        leading_user: false,
    };
    const FALLBACK_MAX_TOKENS: u32 = 30720;

    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<GeminiRequest, TransportError> {
        conversions::to_gemini_request(conversation, params)
    }

    fn route(&self, model: &str, body: serde_json::Value) -> TransportRequest {
        let request = TransportRequest::new(
            format!(
                "{}/v1beta/models/{}:generateContent",
                self.base_url,
                model.trim_start_matches("models/")
            ),
            body,
        )
        .header("x-goog-api-key", self.api_key.expose());
        match &self.project_id {
            Some(project) => request.header("x-goog-user-project", project.as_str()),
            None => request,
        }
    }

    fn decode(&self, response: &GeminiResponse) -> Vec<Message> {
        conversions::from_gemini_response(response)
    }
}

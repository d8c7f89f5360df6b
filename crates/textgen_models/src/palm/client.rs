//! Routing and credentials for PaLM.

use super::{PalmRequest, PalmResponse, conversions};
use crate::{AdapterOptions, ApiKey, ProviderBackend, TransportRequest};
use textgen_core::{
    Conversation, GenerationParams, Message, ProviderId, RoleTable, SystemPlacement,
};
use textgen_error::{ConfigError, TransportError};
use tracing::{debug, instrument};

/// PaLM chat backend.
#[derive(Debug, Clone)]
pub struct PalmBackend {
    api_key: ApiKey,
    project_id: Option<String>,
    base_url: String,
}

impl PalmBackend {
    /// Public endpoint root.
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    /// Creates the backend from options.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is available.
    #[instrument(skip(options))]
    pub fn new(options: &AdapterOptions) -> Result<Self, ConfigError> {
        options.validate(ProviderId::Palm)?;
        let backend = Self {
            api_key: options.api_key_for(ProviderId::Palm)?,
            project_id: options.project_id().clone(),
            base_url: options.base_url_or(Self::DEFAULT_BASE_URL),
        };
        debug!(url = %backend.base_url, "Created PaLM backend");
        Ok(backend)
    }
}

impl ProviderBackend for PalmBackend {
    type Request = PalmRequest;
    type Response = PalmResponse;

    const PROVIDER: ProviderId = ProviderId::Palm;
    const ROLES: RoleTable = RoleTable {
        user: "0",
        assistant: "1",
        system: SystemPlacement::Separate,
        merge_consecutive: false,
        leading_user: false,
    };
    const FALLBACK_MAX_TOKENS: u32 = 1024;

    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<PalmRequest, TransportError> {
        conversions::to_palm_request(conversation, params)
    }

    fn route(&self, model: &str, body: serde_json::Value) -> TransportRequest {
        let model = model.trim_start_matches("models/");
        let request = TransportRequest::new(
            format!("{}/v1beta2/models/{}:generateMessage", self.base_url, model),
            body,
        )
        .header("x-goog-api-key", self.api_key.expose());
        match &self.project_id {
            Some(project) => request.header("x-goog-user-project", project.as_str()),
            None => request,
        }
    }

    fn decode(&self, response: &PalmResponse) -> Vec<Message> {
        conversions::from_palm_response(response)
    }
}

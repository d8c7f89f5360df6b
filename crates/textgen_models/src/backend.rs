//! The per-provider translation contract.

use crate::TransportRequest;
use serde::Serialize;
use serde::de::DeserializeOwned;
use textgen_core::{Conversation, GenerationParams, Message, ProviderId, RoleTable};
use textgen_error::TransportError;

/// Translation between the neutral model and one vendor's wire format.
///
/// Implementations are pure: they build native requests and decode native
/// responses, while [`crate::Adapter`] owns the call, caching and accounting.
pub trait ProviderBackend: Send + Sync {
    /// Native request body.
    type Request: Serialize + Send;
    /// Native response body.
    type Response: DeserializeOwned + Send;

    /// Canonical provider id.
    const PROVIDER: ProviderId;
    /// Role vocabulary and system-prompt placement.
    const ROLES: RoleTable;
    /// Output ceiling used when neither config nor model table has one.
    const FALLBACK_MAX_TOKENS: u32;

    /// Parameters as this backend actually sends them.
    ///
    /// Backends that clamp values into an accepted range override this so the
    /// cache key and the reported config match the wire request.
    fn effective_params(&self, params: GenerationParams) -> GenerationParams {
        params
    }

    /// Builds the native request.
    ///
    /// # Errors
    ///
    /// An encode error when the request cannot be assembled.
    fn build_request(
        &self,
        conversation: &Conversation,
        params: &GenerationParams,
    ) -> Result<Self::Request, TransportError>;

    /// Wraps an encoded body with endpoint and credentials.
    fn route(&self, model: &str, body: serde_json::Value) -> TransportRequest;

    /// Decodes candidates, in backend order, as assistant messages.
    fn decode(&self, response: &Self::Response) -> Vec<Message>;

    /// Per-candidate log probabilities, when the backend returned any.
    fn logprobs(&self, _response: &Self::Response) -> Vec<serde_json::Value> {
        Vec::new()
    }
}

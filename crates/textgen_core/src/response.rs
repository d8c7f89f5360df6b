//! Neutral response model returned by every adapter.

use crate::{GenerationParams, Message};
use serde::{Deserialize, Serialize};

/// Token usage reported for a generation.
///
/// Computed locally from the decoded candidates so numbers line up across
/// providers; backend-reported usage stays available in the raw response.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_getters::Getters,
)]
pub struct Usage {
    /// Tokens across all returned candidates.
    total_tokens: u64,
}

impl Usage {
    /// Creates usage data.
    pub fn new(total_tokens: u64) -> Self {
        Self { total_tokens }
    }
}

/// The unified response object.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
pub struct GenerationResponse {
    /// Candidates in backend order, all with the assistant role
    text: Vec<Message>,
    /// Per-candidate log probabilities, when a backend provides them
    #[builder(default)]
    logprobs: Vec<serde_json::Value>,
    /// Parameters actually sent
    config: GenerationParams,
    /// Locally computed usage
    usage: Usage,
    /// Backend-native payload, kept for diagnostics
    #[builder(default)]
    raw_response: serde_json::Value,
}

impl GenerationResponse {
    /// Creates a response from its parts.
    pub fn new(
        text: Vec<Message>,
        logprobs: Vec<serde_json::Value>,
        config: GenerationParams,
        usage: Usage,
        raw_response: serde_json::Value,
    ) -> Self {
        Self {
            text,
            logprobs,
            config,
            usage,
            raw_response,
        }
    }

    /// Returns a builder for GenerationResponse.
    pub fn builder() -> GenerationResponseBuilder {
        GenerationResponseBuilder::default()
    }

    /// Text of the first candidate, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.text.first().map(|m| m.content().as_str())
    }
}

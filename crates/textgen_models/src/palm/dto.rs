//! Data transfer objects for `generateMessage`.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One message in the prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PalmMessage {
    /// "0" for the user, "1" for the model
    pub author: String,
    /// Message text
    pub content: String,
}

/// Prompt: optional context plus the message history.
#[derive(Debug, Clone, PartialEq, Serialize, Getters)]
pub struct PalmPrompt {
    /// Context given to the model first
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    /// Message history, ending with the latest user message
    messages: Vec<PalmMessage>,
}

impl PalmPrompt {
    /// Creates a prompt.
    pub fn new(context: Option<String>, messages: Vec<PalmMessage>) -> Self {
        Self { context, messages }
    }
}

/// `generateMessage` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct PalmRequest {
    /// Prompt
    prompt: PalmPrompt,
    /// Sampling temperature
    temperature: f32,
    /// Number of candidates
    candidate_count: u32,
    /// Nucleus sampling mass
    top_p: f32,
    /// Top-k sampling cutoff
    top_k: u32,
}

impl PalmRequest {
    /// Creates a builder for `PalmRequest`.
    pub fn builder() -> PalmRequestBuilder {
        PalmRequestBuilder::default()
    }
}

/// One candidate.
#[derive(Debug, Clone, Deserialize)]
pub struct PalmCandidate {
    /// Candidate author
    #[serde(default)]
    pub author: Option<String>,
    /// Candidate text
    #[serde(default)]
    pub content: Option<String>,
}

/// `generateMessage` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct PalmResponse {
    /// Candidates; empty when every candidate was filtered
    #[serde(default)]
    pub candidates: Vec<PalmCandidate>,
    /// Content filters that fired
    #[serde(default)]
    pub filters: Vec<serde_json::Value>,
}

//! Anthropic API request and response types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Anthropic API request.
#[derive(Debug, Clone, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct AnthropicRequest {
    /// Model identifier
    model: String,
    /// List of messages
    messages: Vec<AnthropicMessage>,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Optional system prompt
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling mass
    top_p: f32,
    /// Top-k sampling cutoff
    top_k: u32,
    /// Stop sequences
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

impl AnthropicRequest {
    /// Creates a builder for `AnthropicRequest`.
    pub fn builder() -> AnthropicRequestBuilder {
        AnthropicRequestBuilder::default()
    }
}

/// Anthropic message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct AnthropicMessage {
    /// Role of the message sender
    role: String,
    /// Message text
    content: String,
}

impl AnthropicMessage {
    /// Creates a message.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Anthropic API response.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct AnthropicResponse {
    /// Response ID
    #[serde(default)]
    id: Option<String>,
    /// Content blocks
    content: Vec<AnthropicContent>,
    /// Model used
    #[serde(default)]
    model: Option<String>,
    /// Stop reason
    #[serde(default)]
    stop_reason: Option<String>,
    /// Usage information
    #[serde(default)]
    usage: Option<AnthropicUsage>,
}

/// Content in an Anthropic response.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct AnthropicContent {
    /// Content type
    #[serde(rename = "type")]
    content_type: String,
    /// Text content, present on text blocks
    #[serde(default)]
    text: Option<String>,
}

/// Usage information from Anthropic API.
#[derive(Debug, Clone, Deserialize, Getters)]
pub struct AnthropicUsage {
    /// Input tokens
    input_tokens: u32,
    /// Output tokens
    output_tokens: u32,
}

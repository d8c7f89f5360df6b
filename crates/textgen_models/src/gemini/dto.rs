//! Data transfer objects for `generateContent`.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One text part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Part text; absent on non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeminiContent {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// Sampling settings.
#[derive(Debug, Clone, PartialEq, Serialize, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Sampling temperature
    temperature: f32,
    /// Output token ceiling
    max_output_tokens: u32,
    /// Nucleus sampling mass
    top_p: f32,
    /// Top-k sampling cutoff
    top_k: u32,
    /// Number of candidates
    candidate_count: u32,
    /// Stop sequences
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

impl GeminiGenerationConfig {
    /// Creates a builder for `GeminiGenerationConfig`.
    pub fn builder() -> GeminiGenerationConfigBuilder {
        GeminiGenerationConfigBuilder::default()
    }
}

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation turns
    contents: Vec<GeminiContent>,
    /// Sampling settings
    generation_config: GeminiGenerationConfig,
}

impl GeminiRequest {
    /// Creates a request.
    pub fn new(contents: Vec<GeminiContent>, generation_config: GeminiGenerationConfig) -> Self {
        Self {
            contents,
            generation_config,
        }
    }
}

/// One candidate.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Candidate content; absent when the candidate was blocked
    #[serde(default)]
    pub content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
    /// Position among the candidates
    #[serde(default)]
    pub index: Option<u32>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Candidates; absent when the prompt itself was blocked
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Usage as reported by the backend
    #[serde(default)]
    pub usage_metadata: Option<serde_json::Value>,
}

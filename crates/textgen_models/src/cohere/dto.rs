//! Data transfer objects for Cohere `generate`.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// `generate` request body.
#[derive(Debug, Clone, PartialEq, Serialize, Getters, derive_builder::Builder)]
#[builder(setter(into), pattern = "owned")]
pub struct CohereRequest {
    /// Model identifier
    model: String,
    /// Rendered prompt
    prompt: String,
    /// Maximum tokens to generate
    max_tokens: u32,
    /// Sampling temperature
    temperature: f32,
    /// Top-k sampling cutoff
    k: u32,
    /// Nucleus sampling mass, at most 0.99
    p: f32,
    /// Number of generations, 1 to 5
    num_generations: u32,
    /// Frequency penalty
    frequency_penalty: f32,
    /// Presence penalty
    presence_penalty: f32,
    /// Stop sequences
    #[builder(default)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop_sequences: Vec<String>,
}

impl CohereRequest {
    /// Creates a builder for `CohereRequest`.
    pub fn builder() -> CohereRequestBuilder {
        CohereRequestBuilder::default()
    }
}

/// One generation.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereGeneration {
    /// Generation id
    #[serde(default)]
    pub id: Option<String>,
    /// Generated text
    #[serde(default)]
    pub text: Option<String>,
    /// Per-token likelihoods, when requested
    #[serde(default)]
    pub token_likelihoods: Option<serde_json::Value>,
}

/// `generate` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct CohereResponse {
    /// Response id
    #[serde(default)]
    pub id: Option<String>,
    /// Generations in request order
    #[serde(default)]
    pub generations: Vec<CohereGeneration>,
}

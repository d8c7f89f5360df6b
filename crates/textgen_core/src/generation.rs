//! Generation settings supplied by callers and the parameters actually sent.

use crate::ModelLimits;
use serde::{Deserialize, Serialize};

/// Per-call generation settings.
///
/// Adapters copy the config when a call starts, so one instance can be tweaked and
/// reused between calls.
///
/// # Examples
///
/// ```
/// use textgen_core::GenerationConfig;
///
/// let config = GenerationConfig::default()
///     .with_n(2)
///     .with_temperature(0.4)
///     .with_max_tokens(100u32)
///     .with_use_cache(false);
///
/// assert_eq!(*config.n(), 2);
/// assert_eq!(*config.max_tokens(), Some(100));
/// assert!(config.model().is_none());
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GenerationConfig {
    /// Model to call; falls back to the adapter's current model
    #[setters(strip_option, into)]
    model: Option<String>,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling mass
    top_p: f32,
    /// Top-k sampling cutoff
    top_k: u32,
    /// Output token ceiling; falls back to the model limit table
    #[setters(strip_option)]
    max_tokens: Option<u32>,
    /// Number of candidates requested
    n: u32,
    /// Frequency penalty
    frequency_penalty: f32,
    /// Presence penalty
    presence_penalty: f32,
    /// Stop sequences
    stop: Vec<String>,
    /// Whether to consult the response cache before calling the backend
    use_cache: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: None,
            temperature: 0.1,
            top_p: 1.0,
            top_k: 50,
            max_tokens: None,
            n: 1,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            stop: Vec::new(),
            use_cache: true,
        }
    }
}

/// Fully resolved parameters for one backend call.
///
/// This is what gets sent, what gets reported back in the response, and what goes
/// into the cache key.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[builder(setter(into))]
#[setters(prefix = "with_")]
pub struct GenerationParams {
    /// Resolved model identifier
    model: String,
    /// Sampling temperature
    temperature: f32,
    /// Nucleus sampling mass
    top_p: f32,
    /// Top-k sampling cutoff
    top_k: u32,
    /// Resolved output token ceiling
    max_tokens: u32,
    /// Number of candidates requested
    n: u32,
    /// Frequency penalty
    #[builder(default)]
    frequency_penalty: f32,
    /// Presence penalty
    #[builder(default)]
    presence_penalty: f32,
    /// Stop sequences
    #[builder(default)]
    stop: Vec<String>,
}

impl GenerationParams {
    /// Returns a builder for GenerationParams.
    pub fn builder() -> GenerationParamsBuilder {
        GenerationParamsBuilder::default()
    }

    /// Resolves a caller config against an already-resolved model.
    ///
    /// `max_tokens` comes from the config when set, else from `limits` for `model`,
    /// else `fallback_max_tokens`.
    pub fn resolve(
        config: &GenerationConfig,
        model: &str,
        limits: &ModelLimits,
        fallback_max_tokens: u32,
    ) -> Self {
        let max_tokens = config
            .max_tokens
            .or_else(|| limits.get(model))
            .unwrap_or(fallback_max_tokens);

        Self {
            model: model.to_string(),
            temperature: config.temperature,
            top_p: config.top_p,
            top_k: config.top_k,
            max_tokens,
            n: config.n,
            frequency_penalty: config.frequency_penalty,
            presence_penalty: config.presence_penalty,
            stop: config.stop.clone(),
        }
    }
}

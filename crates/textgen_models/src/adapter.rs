//! The generation pipeline shared by every provider.

use crate::{ProviderBackend, Transport};
use async_trait::async_trait;
use std::sync::Arc;
use textgen_cache::{CacheGateway, KeyMaterial};
use textgen_core::{
    GenerationConfig, GenerationParams, GenerationResponse, Message, ModelLimits, ProviderId,
    Usage, count_text_tokens, count_tokens, normalize,
};
use textgen_error::{TextgenResult, TransportError, TransportErrorKind};
use tracing::{Instrument, Span, debug, error, warn};

/// Uniform text-generation surface over every backend.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Canonical provider id.
    fn provider(&self) -> ProviderId;

    /// Current model: the constructor default until a call names another one.
    fn model(&self) -> &str;

    /// Generates candidates for `messages`.
    ///
    /// Takes `&mut self` because the resolved model becomes the current model.
    ///
    /// # Errors
    ///
    /// Transport errors from the backend, unchanged apart from wrapping.
    async fn generate(
        &mut self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> TextgenResult<GenerationResponse>;

    /// Token count of `messages` under the current model.
    fn count_tokens(&self, messages: &[Message]) -> usize {
        count_tokens(messages, self.model())
    }

    /// Token count of a bare string under the current model.
    fn count_text_tokens(&self, text: &str) -> usize {
        count_text_tokens(text, self.model())
    }
}

/// Runs the cache-keyed pipeline for one backend.
///
/// Normalize, resolve parameters, consult the cache, call the backend, decode, count
/// usage, write through. The transport and cache are set once at construction.
pub struct Adapter<B: ProviderBackend> {
    backend: B,
    model: String,
    limits: ModelLimits,
    transport: Arc<dyn Transport>,
    cache: Option<CacheGateway>,
    span: Span,
}

impl<B: ProviderBackend> std::fmt::Debug for Adapter<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Adapter")
            .field("provider", &B::PROVIDER)
            .field("model", &self.model)
            .field("limits", &self.limits.len())
            .field("cache", &self.cache.is_some())
            .finish_non_exhaustive()
    }
}

impl<B: ProviderBackend> Adapter<B> {
    /// Creates an adapter without a cache.
    pub fn new(
        backend: B,
        model: impl Into<String>,
        limits: ModelLimits,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            backend,
            model: model.into(),
            limits,
            transport,
            cache: None,
            span: Span::none(),
        }
    }

    /// Attaches a cache gateway.
    pub fn with_cache(mut self, cache: CacheGateway) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Sets the span every call runs in.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Current model.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Model limits this adapter resolves `max_tokens` against.
    pub fn limits(&self) -> &ModelLimits {
        &self.limits
    }

    /// The wire translation.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs one generation.
    ///
    /// # Errors
    ///
    /// Returns a transport error when the request cannot be encoded, the call fails,
    /// or the response does not have the backend's shape. Cache failures never
    /// surface here.
    pub async fn generate(
        &mut self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> TextgenResult<GenerationResponse> {
        let span = self.span.clone();
        self.run(messages, config.clone()).instrument(span).await
    }

    async fn run(
        &mut self,
        messages: &[Message],
        config: GenerationConfig,
    ) -> TextgenResult<GenerationResponse> {
        let provider = B::PROVIDER.as_str();
        let model = config.model().clone().unwrap_or_else(|| self.model.clone());
        self.model = model.clone();

        let conversation = normalize(messages, &B::ROLES);
        let params = self.backend.effective_params(GenerationParams::resolve(
            &config,
            &model,
            &self.limits,
            B::FALLBACK_MAX_TOKENS,
        ));
        let material = KeyMaterial::new(B::PROVIDER, &conversation, &params);

        if *config.use_cache()
            && let Some(cache) = &self.cache
            && let Some(hit) = cache.lookup(&material)
        {
            debug!(provider, model = %model, "Returning cached response");
            return Ok(hit);
        }

        let request = self.backend.build_request(&conversation, &params)?;
        let body = serde_json::to_value(&request).map_err(|e| {
            error!(provider, error = %e, "Failed to encode request");
            TransportError::new(provider, TransportErrorKind::Encode(e.to_string()))
        })?;

        debug!(
            provider,
            model = %model,
            turns = conversation.turns().len(),
            n = params.n(),
            max_tokens = params.max_tokens(),
            "Sending request"
        );

        let raw = self
            .transport
            .send(self.backend.route(&model, body))
            .await
            .map_err(|e| {
                error!(provider, error = %e, "Generation failed");
                e
            })?;

        let native: B::Response = serde_json::from_value(raw.clone()).map_err(|e| {
            error!(provider, error = %e, "Unexpected response shape");
            TransportError::new(provider, TransportErrorKind::Parse(e.to_string()))
        })?;

        let text = self.backend.decode(&native);
        let logprobs = self.backend.logprobs(&native);
        let usage = Usage::new(count_tokens(&text, &model) as u64);
        debug!(
            provider,
            candidates = text.len(),
            total_tokens = usage.total_tokens(),
            "Decoded response"
        );

        let response = GenerationResponse::new(text, logprobs, params.clone(), usage, raw);
        if let Some(cache) = &self.cache
            && let Err(e) = cache.store(&material, &response)
        {
            warn!(provider, error = %e, "Failed to cache response");
        }

        Ok(response)
    }
}

#[async_trait]
impl<B: ProviderBackend> TextGenerator for Adapter<B> {
    fn provider(&self) -> ProviderId {
        B::PROVIDER
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &mut self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> TextgenResult<GenerationResponse> {
        Adapter::generate(self, messages, config).await
    }
}

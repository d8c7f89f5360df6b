//! The closed set of adapters behind one type.

use crate::{
    Adapter, AdapterOptions, AnthropicBackend, CohereBackend, GeminiBackend, OpenAiBackend,
    PalmBackend, ProviderBackend, TextGenerator, Transport,
};
use async_trait::async_trait;
use std::sync::Arc;
use textgen_cache::CacheGateway;
use textgen_core::{GenerationConfig, GenerationResponse, Message, ModelLimits, ProviderId};
use textgen_error::{ConfigError, ConfigErrorKind, TextgenResult};
use tracing::{info, info_span, instrument};

/// An adapter for one canonical provider.
#[derive(Debug)]
pub enum Generator {
    /// OpenAI or Azure OpenAI
    OpenAi(Adapter<OpenAiBackend>),
    /// PaLM
    Palm(Adapter<PalmBackend>),
    /// Gemini
    Gemini(Adapter<GeminiBackend>),
    /// Cohere
    Cohere(Adapter<CohereBackend>),
    /// Anthropic
    Anthropic(Adapter<AnthropicBackend>),
}

impl Generator {
    /// Builds the adapter for `provider`.
    ///
    /// Model limits are layered: built-in table, then `configured` (from the
    /// configuration file), then `options.models`.
    ///
    /// # Errors
    ///
    /// Configuration errors for a missing credential, invalid options, or a provider
    /// without a bundled adapter.
    #[instrument(skip_all, fields(provider = %provider))]
    pub fn build(
        provider: ProviderId,
        options: &AdapterOptions,
        configured: &ModelLimits,
        transport: Arc<dyn Transport>,
        cache: Option<CacheGateway>,
    ) -> TextgenResult<Self> {
        let limits = ModelLimits::builtin(provider)
            .merged_with(configured)
            .merged_with(options.models());
        let model = options.model_or_default(provider);
        let parts = Parts {
            model,
            limits,
            transport,
            cache,
        };

        let generator = match provider {
            ProviderId::OpenAi => Generator::OpenAi(parts.assemble(OpenAiBackend::new(options)?)),
            ProviderId::Palm => Generator::Palm(parts.assemble(PalmBackend::new(options)?)),
            ProviderId::Gemini => Generator::Gemini(parts.assemble(GeminiBackend::new(options)?)),
            ProviderId::Cohere => Generator::Cohere(parts.assemble(CohereBackend::new(options)?)),
            ProviderId::Anthropic => {
                Generator::Anthropic(parts.assemble(AnthropicBackend::new(options)?))
            }
            ProviderId::HuggingFace => {
                return Err(ConfigError::new(ConfigErrorKind::UnsupportedProvider(
                    "hf: local inference is not bundled with this build".to_string(),
                ))
                .into());
            }
        };

        info!(model = generator.model(), "Created generator");
        Ok(generator)
    }

    fn as_dyn(&self) -> &dyn TextGenerator {
        match self {
            Generator::OpenAi(a) => a,
            Generator::Palm(a) => a,
            Generator::Gemini(a) => a,
            Generator::Cohere(a) => a,
            Generator::Anthropic(a) => a,
        }
    }

    fn as_dyn_mut(&mut self) -> &mut dyn TextGenerator {
        match self {
            Generator::OpenAi(a) => a,
            Generator::Palm(a) => a,
            Generator::Gemini(a) => a,
            Generator::Cohere(a) => a,
            Generator::Anthropic(a) => a,
        }
    }
}

struct Parts {
    model: String,
    limits: ModelLimits,
    transport: Arc<dyn Transport>,
    cache: Option<CacheGateway>,
}

impl Parts {
    fn assemble<B: ProviderBackend>(self, backend: B) -> Adapter<B> {
        let span = info_span!("textgen", provider = B::PROVIDER.as_str());
        let adapter =
            Adapter::new(backend, self.model, self.limits, self.transport).with_span(span);
        match self.cache {
            Some(cache) => adapter.with_cache(cache),
            None => adapter,
        }
    }
}

#[async_trait]
impl TextGenerator for Generator {
    fn provider(&self) -> ProviderId {
        self.as_dyn().provider()
    }

    fn model(&self) -> &str {
        self.as_dyn().model()
    }

    async fn generate(
        &mut self,
        messages: &[Message],
        config: &GenerationConfig,
    ) -> TextgenResult<GenerationResponse> {
        self.as_dyn_mut().generate(messages, config).await
    }
}

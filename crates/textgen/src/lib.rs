//! Provider-agnostic LLM text generation.
//!
//! One request/response contract over OpenAI (and Azure OpenAI), Anthropic,
//! Gemini, PaLM and Cohere, with a cache-keyed generation pipeline: identical
//! requests after normalization are answered from the cache.
//!
//! # Example
//!
//! ```no_run
//! use textgen::{AdapterOptions, GenerationConfig, Message, TextGenerator, llm};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut generator = llm(Some("gemini"), AdapterOptions::default())?;
//! let config = GenerationConfig::default().with_n(2).with_temperature(0.4);
//!
//! let response = generator
//!     .generate(
//!         &[
//!             Message::system("Answer with one word."),
//!             Message::user("What is the capital of France?"),
//!         ],
//!         &config,
//!     )
//!     .await?;
//!
//! for candidate in response.text() {
//!     println!("{}", candidate.content());
//! }
//! # Ok(())
//! # }
//! ```

mod factory;
mod observability;
mod settings;

pub use factory::{DEFAULT_PROVIDER, create, llm, resolve, select};
pub use observability::init_tracing;
pub use settings::{
    CONFIG_PATH_ENV, ENV_PREFIX, ModelEntry, ModelSection, ProviderSection, TextgenConfig,
};

pub use textgen_cache::{CacheGateway, CacheKey, CacheStore, DiskStore, InMemoryStore, KeyMaterial};
pub use textgen_core::{
    Conversation, GenerationConfig, GenerationParams, GenerationResponse, Message, ModelLimits,
    OPENING_USER_TURN, ProviderId, Role, RoleTable, SystemPlacement, Turn, Usage,
    count_text_tokens, count_tokens, normalize,
};
pub use textgen_error::{
    CacheStoreError, CacheStoreErrorKind, ConfigError, ConfigErrorKind, RetryableError,
    TextgenError, TextgenErrorKind, TextgenResult, TransportError, TransportErrorKind,
};
pub use textgen_models::{
    Adapter, AdapterOptions, AnthropicBackend, CohereBackend, GeminiBackend, Generator,
    HttpTransport, OpenAiBackend, PalmBackend, ProviderBackend, TextGenerator, Transport,
    TransportRequest,
};

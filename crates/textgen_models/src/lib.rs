//! Provider adapters for textgen.
//!
//! Each backend implements [`ProviderBackend`], a pure translation between the
//! neutral conversation model and its wire format. [`Adapter`] runs the shared
//! pipeline around it: normalize, resolve parameters, consult the cache, call the
//! [`Transport`], decode, count usage and write through. [`Generator`] closes over
//! every bundled backend.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use textgen_core::{GenerationConfig, Message, ModelLimits, ProviderId};
//! use textgen_models::{AdapterOptions, Generator, HttpTransport, TextGenerator};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = AdapterOptions::default();
//! let transport = Arc::new(HttpTransport::new(ProviderId::Gemini, options.timeout())?);
//! let mut generator =
//!     Generator::build(ProviderId::Gemini, &options, &ModelLimits::default(), transport, None)?;
//!
//! let response = generator
//!     .generate(&[Message::user("Capital of France?")], &GenerationConfig::default())
//!     .await?;
//! println!("{:?}", response.first_text());
//! # Ok(())
//! # }
//! ```

mod adapter;
mod anthropic;
mod backend;
mod cohere;
mod gemini;
mod generator;
mod openai;
mod options;
mod palm;
mod transport;

pub use adapter::{Adapter, TextGenerator};
pub use anthropic::{
    AnthropicBackend, AnthropicContent, AnthropicMessage, AnthropicRequest,
    AnthropicRequestBuilder, AnthropicResponse, AnthropicUsage,
};
pub use backend::ProviderBackend;
pub use cohere::{
    CohereBackend, CohereGeneration, CohereRequest, CohereRequestBuilder, CohereResponse,
};
pub use gemini::{
    GeminiBackend, GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart,
    GeminiRequest, GeminiResponse,
};
pub use generator::Generator;
pub use openai::{
    ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage,
    OpenAiBackend,
};
pub use options::{AdapterOptions, ApiKey};
pub use palm::{PalmBackend, PalmCandidate, PalmMessage, PalmPrompt, PalmRequest, PalmResponse};
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, Transport, TransportRequest};

//! OpenAI chat completions, including Azure OpenAI deployments.
//!
//! Azure routing is selected by setting both `base_url` (the deployment URL) and
//! `api_version`; the key is then sent as `api-key` instead of a bearer token.

mod client;
mod conversions;
mod dto;

pub use client::OpenAiBackend;
pub use dto::{ChatChoice, ChatMessage, ChatRequest, ChatRequestBuilder, ChatResponse, ChatUsage};

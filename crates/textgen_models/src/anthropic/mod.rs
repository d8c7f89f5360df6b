//! Anthropic messages API.
//!
//! The system prompt travels in its own field and the API requires alternating
//! turns, so consecutive same-role turns are merged before sending.

mod client;
mod conversions;
mod types;

pub use client::AnthropicBackend;
pub use types::{
    AnthropicContent, AnthropicMessage, AnthropicRequest, AnthropicRequestBuilder,
    AnthropicResponse, AnthropicUsage,
};

//! Gemini `generateContent`.
//!
//! Gemini has no system turn and calls the assistant `model`; the system prompt
//! is folded into the first user turn.

mod client;
mod conversions;
mod dto;

pub use client::GeminiBackend;
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest,
    GeminiResponse,
};

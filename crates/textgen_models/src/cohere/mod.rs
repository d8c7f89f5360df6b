//! Cohere `generate`.
//!
//! The conversation is rendered into a single prompt. A lone turn is sent as-is;
//! longer histories become `Role: content` lines ending with an open `Chatbot:` line.

mod client;
mod conversions;
mod dto;

pub use client::CohereBackend;
pub use dto::{CohereGeneration, CohereRequest, CohereRequestBuilder, CohereResponse};

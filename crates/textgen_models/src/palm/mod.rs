//! PaLM `generateMessage`.
//!
//! Authors are the strings `"0"` (user) and `"1"` (model); the system prompt is
//! sent as the prompt context. The API has no output ceiling or stop field.

mod client;
mod conversions;
mod dto;

pub use client::PalmBackend;
pub use dto::{PalmCandidate, PalmMessage, PalmPrompt, PalmRequest, PalmResponse};

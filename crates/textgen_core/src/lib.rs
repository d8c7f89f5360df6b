//! Core data types for the textgen LLM client facade.
//!
//! This crate holds the vendor-neutral request/response model, the conversation
//! normalization every adapter runs before building a request, model token limits and
//! token accounting.

mod generation;
mod limits;
mod message;
mod normalize;
mod provider;
mod response;
mod role;
mod tokens;

pub use generation::{GenerationConfig, GenerationParams, GenerationParamsBuilder};
pub use limits::ModelLimits;
pub use message::{Message, MessageBuilder};
pub use normalize::{Conversation, OPENING_USER_TURN, RoleTable, SystemPlacement, Turn, normalize};
pub use provider::ProviderId;
pub use response::{GenerationResponse, GenerationResponseBuilder, Usage};
pub use role::Role;
pub use tokens::{TokenizerProfile, count_text_tokens, count_tokens};

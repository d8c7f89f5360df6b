//! Conversions between the neutral model and Anthropic messages.

use super::{AnthropicMessage, AnthropicRequest, AnthropicResponse};
use textgen_core::{Conversation, GenerationParams, Message};
use textgen_error::{TransportError, TransportErrorKind};

/// Builds a messages request from a normalized conversation.
pub fn to_anthropic_request(
    conversation: &Conversation,
    params: &GenerationParams,
) -> Result<AnthropicRequest, TransportError> {
    let messages: Vec<AnthropicMessage> = conversation
        .turns()
        .iter()
        .map(|turn| AnthropicMessage::new(turn.role().as_str(), turn.content().as_str()))
        .collect();

    AnthropicRequest::builder()
        .model(params.model().clone())
        .messages(messages)
        .max_tokens(*params.max_tokens())
        .system(conversation.system().clone())
        .temperature(*params.temperature())
        .top_p(*params.top_p())
        .top_k(*params.top_k())
        .stop_sequences(params.stop().clone())
        .build()
        .map_err(|e| {
            TransportError::new(
                "anthropic",
                TransportErrorKind::Encode(format!("Failed to build request: {}", e)),
            )
        })
}

/// Concatenates every text block into the single candidate.
pub fn from_anthropic_response(response: &AnthropicResponse) -> Vec<Message> {
    let text: String = response
        .content()
        .iter()
        .filter(|block| block.content_type() == "text")
        .filter_map(|block| block.text().as_deref())
        .collect();

    if text.is_empty() {
        Vec::new()
    } else {
        vec![Message::assistant(text)]
    }
}

//! Conversions between the neutral model and the chat completions format.

use super::{ChatMessage, ChatRequest, ChatResponse};
use textgen_core::{Conversation, GenerationParams, Message};
use textgen_error::{TransportError, TransportErrorKind};

/// Builds a chat request from a normalized conversation.
pub fn to_chat_request(
    conversation: &Conversation,
    params: &GenerationParams,
) -> Result<ChatRequest, TransportError> {
    let messages: Vec<ChatMessage> = conversation
        .turns()
        .iter()
        .map(|turn| ChatMessage {
            role: turn.role().clone(),
            content: Some(turn.content().clone()),
        })
        .collect();

    ChatRequest::builder()
        .model(params.model().clone())
        .messages(messages)
        .max_tokens(*params.max_tokens())
        .temperature(*params.temperature())
        .top_p(*params.top_p())
        .n(*params.n())
        .frequency_penalty(*params.frequency_penalty())
        .presence_penalty(*params.presence_penalty())
        .stop(params.stop().clone())
        .build()
        .map_err(|e| {
            TransportError::new(
                "openai",
                TransportErrorKind::Encode(format!("Failed to build request: {}", e)),
            )
        })
}

/// Decodes choices with text, in response order.
pub fn from_chat_response(response: &ChatResponse) -> Vec<Message> {
    response
        .choices
        .iter()
        .filter_map(|choice| choice.message.content.as_deref())
        .filter(|text| !text.is_empty())
        .map(Message::assistant)
        .collect()
}

/// Log probabilities of the choices that carry them.
pub fn logprobs(response: &ChatResponse) -> Vec<serde_json::Value> {
    response
        .choices
        .iter()
        .filter_map(|choice| choice.logprobs.clone())
        .filter(|value| !value.is_null())
        .collect()
}

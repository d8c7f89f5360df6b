//! Conversions between the neutral model and PaLM messages.

use super::{PalmMessage, PalmPrompt, PalmRequest, PalmResponse};
use textgen_core::{Conversation, GenerationParams, Message};
use textgen_error::{TransportError, TransportErrorKind};

/// Builds a `generateMessage` request; `max_tokens` and stop sequences are not sent.
pub fn to_palm_request(
    conversation: &Conversation,
    params: &GenerationParams,
) -> Result<PalmRequest, TransportError> {
    let messages = conversation
        .turns()
        .iter()
        .map(|turn| PalmMessage {
            author: turn.role().clone(),
            content: turn.content().clone(),
        })
        .collect();

    PalmRequest::builder()
        .prompt(PalmPrompt::new(conversation.system().clone(), messages))
        .temperature(*params.temperature())
        .candidate_count(*params.n())
        .top_p(*params.top_p())
        .top_k(*params.top_k())
        .build()
        .map_err(|e| {
            TransportError::new(
                "palm",
                TransportErrorKind::Encode(format!("Failed to build request: {}", e)),
            )
        })
}

/// Decodes candidates with text, in response order.
pub fn from_palm_response(response: &PalmResponse) -> Vec<Message> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_deref())
        .filter(|text| !text.is_empty())
        .map(Message::assistant)
        .collect()
}

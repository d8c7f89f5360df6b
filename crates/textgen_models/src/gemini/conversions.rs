//! Conversions between the neutral model and Gemini contents.

use super::{GeminiContent, GeminiGenerationConfig, GeminiPart, GeminiRequest, GeminiResponse};
use textgen_core::{Conversation, GenerationParams, Message};
use textgen_error::{TransportError, TransportErrorKind};

/// Builds a `generateContent` request from a normalized conversation.
pub fn to_gemini_request(
    conversation: &Conversation,
    params: &GenerationParams,
) -> Result<GeminiRequest, TransportError> {
    let contents = conversation
        .turns()
        .iter()
        .map(|turn| GeminiContent {
            role: Some(turn.role().clone()),
            parts: vec![GeminiPart {
                text: Some(turn.content().clone()),
            }],
        })
        .collect();

    let generation_config = GeminiGenerationConfig::builder()
        .temperature(*params.temperature())
        .max_output_tokens(*params.max_tokens())
        .top_p(*params.top_p())
        .top_k(*params.top_k())
        .candidate_count(*params.n())
        .stop_sequences(params.stop().clone())
        .build()
        .map_err(|e| {
            TransportError::new(
                "gemini",
                TransportErrorKind::Encode(format!("Failed to build generation config: {}", e)),
            )
        })?;

    Ok(GeminiRequest::new(contents, generation_config))
}

/// Decodes candidates with text, joining each candidate's parts.
pub fn from_gemini_response(response: &GeminiResponse) -> Vec<Message> {
    response
        .candidates
        .iter()
        .filter_map(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .filter(|text| !text.is_empty())
        .map(Message::assistant)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blocked_candidate_is_skipped() {
        let response: GeminiResponse = serde_json::from_value(json!({
            "candidates": [
                {"content": {"role": "model", "parts": [{"text": "Par"}, {"text": "is"}]}, "index": 0},
                {"finishReason": "SAFETY", "index": 1}
            ]
        }))
        .unwrap();

        assert_eq!(from_gemini_response(&response), vec![Message::assistant("Paris")]);
    }

    #[test]
    fn test_blocked_prompt_has_no_candidates() {
        let response: GeminiResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(from_gemini_response(&response).is_empty());
    }
}

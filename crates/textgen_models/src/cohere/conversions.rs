//! Conversions between the neutral model and Cohere prompts.

use super::{CohereRequest, CohereResponse};
use textgen_core::{Conversation, GenerationParams, Message};
use textgen_error::{TransportError, TransportErrorKind};

/// Largest `num_generations` the API accepts.
pub const MAX_GENERATIONS: u32 = 5;
/// Largest `p` the API accepts.
pub const MAX_TOP_P: f32 = 0.99;

/// Renders turns into one prompt.
pub fn render_prompt(conversation: &Conversation, assistant: &str) -> String {
    match conversation.turns().as_slice() {
        [] => String::new(),
        [only] => only.content().clone(),
        turns => {
            let mut prompt = String::new();
            for turn in turns {
                prompt.push_str(turn.role());
                prompt.push_str(": ");
                prompt.push_str(turn.content());
                prompt.push('\n');
            }
            prompt.push_str(assistant);
            prompt.push(':');
            prompt
        }
    }
}

/// Clamps `n` into `1..=5` and caps `p` at 0.99.
pub fn clamp_params(params: GenerationParams) -> GenerationParams {
    let n = (*params.n()).clamp(1, MAX_GENERATIONS);
    let top_p = params.top_p().min(MAX_TOP_P);
    params.with_n(n).with_top_p(top_p)
}

/// Builds a `generate` request, clamping `n` and `p` into the accepted ranges.
pub fn to_cohere_request(
    conversation: &Conversation,
    params: &GenerationParams,
    assistant: &str,
) -> Result<CohereRequest, TransportError> {
    CohereRequest::builder()
        .model(params.model().clone())
        .prompt(render_prompt(conversation, assistant))
        .max_tokens(*params.max_tokens())
        .temperature(*params.temperature())
        .k(*params.top_k())
        .p(params.top_p().min(MAX_TOP_P))
        .num_generations((*params.n()).clamp(1, MAX_GENERATIONS))
        .frequency_penalty(*params.frequency_penalty())
        .presence_penalty(*params.presence_penalty())
        .stop_sequences(params.stop().clone())
        .build()
        .map_err(|e| {
            TransportError::new(
                "cohere",
                TransportErrorKind::Encode(format!("Failed to build request: {}", e)),
            )
        })
}

/// Decodes generations with text, in response order.
pub fn from_cohere_response(response: &CohereResponse) -> Vec<Message> {
    response
        .generations
        .iter()
        .filter_map(|generation| generation.text.as_deref())
        .filter(|text| !text.is_empty())
        .map(Message::assistant)
        .collect()
}

/// Token likelihoods of the generations that carry them.
pub fn logprobs(response: &CohereResponse) -> Vec<serde_json::Value> {
    response
        .generations
        .iter()
        .filter_map(|generation| generation.token_likelihoods.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use textgen_core::{GenerationConfig, ModelLimits, Turn, normalize};

    use crate::ProviderBackend;
    use crate::cohere::CohereBackend;

    #[test]
    fn test_single_turn_prompt_is_plain() {
        let conversation = normalize(
            &[Message::system("Be brief."), Message::user("Capital of France?")],
            &CohereBackend::ROLES,
        );
        assert_eq!(render_prompt(&conversation, "Chatbot"), "Be brief.\nCapital of France?");
    }

    #[test]
    fn test_multi_turn_prompt_ends_with_open_reply() {
        let conversation = normalize(
            &[
                Message::user("Hi"),
                Message::assistant("Hello!"),
                Message::user("Capital of France?"),
            ],
            &CohereBackend::ROLES,
        );
        assert_eq!(conversation.turns()[1], Turn::new("Chatbot", "Hello!"));
        assert_eq!(
            render_prompt(&conversation, "Chatbot"),
            "User: Hi\nChatbot: Hello!\nUser: Capital of France?\nChatbot:"
        );
    }

    #[test]
    fn test_clamp_params_limits_n_and_top_p() {
        let config = GenerationConfig::default().with_n(0).with_top_p(1.0);
        let params = GenerationParams::resolve(&config, "command", &ModelLimits::default(), 4050);

        let clamped = clamp_params(params.clone());
        assert_eq!(*clamped.n(), 1);
        assert_eq!(*clamped.top_p(), MAX_TOP_P);
        assert_eq!(clamped.model(), params.model());

        let within = clamp_params(params.with_n(3).with_top_p(0.5));
        assert_eq!(*within.n(), 3);
        assert_eq!(*within.top_p(), 0.5);
    }
}

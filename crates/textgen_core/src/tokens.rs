//! Token accounting shared by every adapter.

use crate::Message;
use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};

/// Framing overhead per message in chat formats.
const TOKENS_PER_MESSAGE: usize = 3;
/// Tokens that prime the assistant reply.
const REPLY_PRIMING_TOKENS: usize = 3;

/// BPE vocabulary used to count a model's tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenizerProfile {
    /// `cl100k_base`, also the fallback for models the table does not know
    Cl100k,
    /// `o200k_base`
    O200k,
}

impl TokenizerProfile {
    /// Picks the profile for a model identifier.
    pub fn for_model(model: &str) -> Self {
        match get_tokenizer(model) {
            Some(Tokenizer::O200kBase) => TokenizerProfile::O200k,
            _ => TokenizerProfile::Cl100k,
        }
    }

    fn bpe(self) -> Option<&'static CoreBPE> {
        static CL100K: OnceLock<Option<CoreBPE>> = OnceLock::new();
        static O200K: OnceLock<Option<CoreBPE>> = OnceLock::new();

        let cell = match self {
            TokenizerProfile::Cl100k => &CL100K,
            TokenizerProfile::O200k => &O200K,
        };
        cell.get_or_init(|| {
            let loaded = match self {
                TokenizerProfile::Cl100k => tiktoken_rs::cl100k_base(),
                TokenizerProfile::O200k => tiktoken_rs::o200k_base(),
            };
            loaded
                .map_err(|e| {
                    tracing::warn!(
                        profile = ?self,
                        error = %e,
                        "BPE table unavailable, estimating"
                    );
                })
                .ok()
        })
        .as_ref()
    }
}

/// Counts the tokens of a bare string under `model`'s tokenizer.
///
/// # Examples
///
/// ```
/// use textgen_core::count_text_tokens;
///
/// let short = count_text_tokens("Paris", "gpt-4");
/// let long = count_text_tokens("Paris is the capital of France.", "gpt-4");
/// assert!(short > 0 && long > short);
/// ```
pub fn count_text_tokens(text: &str, model: &str) -> usize {
    count_with(TokenizerProfile::for_model(model), text)
}

/// Counts the tokens of a message list under `model`'s tokenizer.
///
/// Each message costs a fixed framing overhead plus its role and content; a
/// non-empty list adds the reply priming overhead. Unknown models use the default
/// profile.
pub fn count_tokens(messages: &[Message], model: &str) -> usize {
    if messages.is_empty() {
        return 0;
    }
    let profile = TokenizerProfile::for_model(model);
    let body: usize = messages
        .iter()
        .map(|m| {
            TOKENS_PER_MESSAGE
                + count_with(profile, m.role().as_str())
                + count_with(profile, m.content())
        })
        .sum();
    body + REPLY_PRIMING_TOKENS
}

fn count_with(profile: TokenizerProfile, text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    match profile.bpe() {
        Some(bpe) => bpe.encode_with_special_tokens(text).len(),
        None => text.chars().count().div_ceil(4),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_are_stable() {
        let messages = vec![Message::assistant("The capital of France is Paris.")];
        assert_eq!(
            count_tokens(&messages, "gemini-1.5-flash"),
            count_tokens(&messages, "gemini-1.5-flash")
        );
    }

    #[test]
    fn test_empty_list_costs_nothing() {
        assert_eq!(count_tokens(&[], "gpt-4"), 0);
    }

    #[test]
    fn test_unknown_model_uses_default_profile() {
        assert_eq!(
            TokenizerProfile::for_model("totally-made-up-model"),
            TokenizerProfile::Cl100k
        );
        let messages = vec![Message::assistant("Paris")];
        assert_eq!(
            count_tokens(&messages, "totally-made-up-model"),
            count_tokens(&messages, "gpt-4")
        );
    }

    #[test]
    fn test_more_content_never_counts_less() {
        let short = vec![Message::assistant("Paris")];
        let long = vec![Message::assistant("Paris"), Message::assistant("Lyon")];
        assert!(count_tokens(&long, "gpt-4") > count_tokens(&short, "gpt-4"));
    }

    #[test]
    fn test_framing_overhead_included() {
        let messages = vec![Message::assistant("Paris")];
        let content = count_text_tokens("Paris", "gpt-4");
        let role = count_text_tokens("assistant", "gpt-4");
        assert_eq!(
            count_tokens(&messages, "gpt-4"),
            TOKENS_PER_MESSAGE + role + content + REPLY_PRIMING_TOKENS
        );
    }
}

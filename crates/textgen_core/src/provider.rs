//! Canonical provider identifiers and alias resolution.

use serde::{Deserialize, Serialize};
use textgen_error::{ConfigError, ConfigErrorKind};

/// Canonical id of a supported backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProviderId {
    /// OpenAI chat completions, including Azure OpenAI deployments
    OpenAi,
    /// Google PaLM `generateMessage`
    Palm,
    /// Google Gemini `generateContent`
    Gemini,
    /// Cohere `generate`
    Cohere,
    /// Hugging Face local inference
    #[serde(rename = "hf")]
    #[strum(serialize = "hf")]
    HuggingFace,
    /// Anthropic messages
    Anthropic,
}

/// Alias table consulted by [`ProviderId::resolve`].
///
/// Order matters: the first matching row wins. `"google"` therefore resolves to
/// PaLM, never to Gemini.
const ALIASES: &[(&str, ProviderId)] = &[
    ("openai", ProviderId::OpenAi),
    ("default", ProviderId::OpenAi),
    ("azureopenai", ProviderId::OpenAi),
    ("azureoai", ProviderId::OpenAi),
    ("palm", ProviderId::Palm),
    ("google", ProviderId::Palm),
    ("gemini", ProviderId::Gemini),
    ("cohere", ProviderId::Cohere),
    ("hf", ProviderId::HuggingFace),
    ("huggingface", ProviderId::HuggingFace),
    ("anthropic", ProviderId::Anthropic),
    ("claude", ProviderId::Anthropic),
];

impl ProviderId {
    /// Resolves a user-supplied provider name to its canonical id.
    ///
    /// Matching ignores case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigErrorKind::UnsupportedProvider`] for unknown names.
    ///
    /// # Examples
    ///
    /// ```
    /// use textgen_core::ProviderId;
    ///
    /// assert_eq!(ProviderId::resolve("AzureOpenAI").unwrap(), ProviderId::OpenAi);
    /// assert_eq!(ProviderId::resolve("claude").unwrap(), ProviderId::Anthropic);
    /// assert!(ProviderId::resolve("mistral").is_err());
    /// ```
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        let needle = name.trim().to_lowercase();
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == needle)
            .map(|(_, id)| *id)
            .ok_or_else(|| {
                ConfigError::new(ConfigErrorKind::UnsupportedProvider(format!(
                    "{}; supported providers are openai, palm, gemini, cohere, hf and anthropic",
                    name
                )))
            })
    }

    /// Canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    /// Environment variable holding this provider's API key.
    pub fn api_key_env(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "OPENAI_API_KEY",
            ProviderId::Palm => "PALM_API_KEY",
            ProviderId::Gemini => "GOOGLE_API_KEY",
            ProviderId::Cohere => "COHERE_API_KEY",
            ProviderId::HuggingFace => "HF_TOKEN",
            ProviderId::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    /// Model used when neither the options nor the call name one.
    pub fn default_model(self) -> &'static str {
        match self {
            ProviderId::OpenAi => "gpt-4o-mini",
            ProviderId::Palm => "chat-bison-001",
            ProviderId::Gemini => "gemini-1.5-flash",
            ProviderId::Cohere => "command",
            ProviderId::HuggingFace => "TheBloke/Llama-2-7b-chat-fp16",
            ProviderId::Anthropic => "claude-3-5-sonnet-20240620",
        }
    }
}

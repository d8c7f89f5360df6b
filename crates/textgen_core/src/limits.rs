//! Per-model output token ceilings.

use crate::ProviderId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from model identifier to its maximum output tokens.
///
/// Built once when an adapter is constructed. Later layers win when merging:
/// built-in defaults, then configuration file entries, then explicit overrides.
///
/// # Examples
///
/// ```
/// use textgen_core::{ModelLimits, ProviderId};
///
/// let limits = ModelLimits::builtin(ProviderId::Gemini)
///     .merged_with(&ModelLimits::from_iter([("gemini-1.5-flash", 1024)]));
///
/// assert_eq!(limits.get("gemini-1.5-flash"), Some(1024));
/// assert_eq!(limits.get("no-such-model"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelLimits(BTreeMap<String, u32>);

impl ModelLimits {
    /// Built-in limits shipped for a provider.
    pub fn builtin(provider: ProviderId) -> Self {
        let entries: &[(&str, u32)] = match provider {
            ProviderId::OpenAi => &[
                ("gpt-4o", 16384),
                ("gpt-4o-mini", 16384),
                ("gpt-4-turbo", 4096),
                ("gpt-4", 8192),
                ("gpt-3.5-turbo", 4096),
                ("gpt-3.5-turbo-16k", 16384),
            ],
            ProviderId::Anthropic => &[
                ("claude-3-5-sonnet-20240620", 8192),
                ("claude-3-opus-20240229", 4096),
                ("claude-3-sonnet-20240229", 4096),
                ("claude-3-haiku-20240307", 4096),
            ],
            ProviderId::Gemini => &[
                ("gemini-1.5-flash", 8192),
                ("gemini-1.5-pro", 8192),
                ("gemini-1.0-pro", 2048),
            ],
            ProviderId::Palm => &[("chat-bison-001", 1024), ("text-bison-001", 1024)],
            ProviderId::Cohere => &[("command", 4050), ("command-light", 4050)],
            ProviderId::HuggingFace => &[],
        };
        entries.iter().copied().collect()
    }

    /// Looks up the ceiling for a model.
    pub fn get(&self, model: &str) -> Option<u32> {
        self.0.get(model).copied()
    }

    /// Inserts or replaces one entry.
    pub fn insert(&mut self, model: impl Into<String>, max_tokens: u32) {
        self.0.insert(model.into(), max_tokens);
    }

    /// Returns a copy of `self` with every entry of `overrides` applied on top.
    pub fn merged_with(mut self, overrides: &ModelLimits) -> Self {
        for (model, max_tokens) in &overrides.0 {
            self.0.insert(model.clone(), *max_tokens);
        }
        self
    }

    /// Number of models with a known ceiling.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no model has a known ceiling.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(model, max_tokens)` in model-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<K: Into<String>> FromIterator<(K, u32)> for ModelLimits {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

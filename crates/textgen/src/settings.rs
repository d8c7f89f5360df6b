//! Layered configuration: built-in defaults, an optional file, then the environment.

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use textgen_core::{ModelLimits, ProviderId};
use textgen_error::{ConfigError, ConfigErrorKind};
use textgen_models::AdapterOptions;
use tracing::{debug, instrument};

/// Environment variable naming an extra configuration file.
pub const CONFIG_PATH_ENV: &str = "TEXTGEN_CONFIG_PATH";

/// Prefix for environment overrides, e.g. `TEXTGEN__MODEL__PROVIDER`.
pub const ENV_PREFIX: &str = "TEXTGEN";

const DEFAULT_CONFIG: &str = include_str!("../config.default.toml");

/// One entry of a provider's model list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Model identifier
    pub name: String,
    /// Maximum output tokens
    pub max_tokens: u32,
}

/// `[providers.<id>]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ProviderSection {
    /// Models with known output ceilings
    models: Vec<ModelEntry>,
}

/// `[model]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct ModelSection {
    /// Provider used when the caller names none
    provider: Option<String>,
    /// Adapter options used when the caller names no provider
    parameters: AdapterOptions,
}

/// The whole configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct TextgenConfig {
    /// Default provider and parameters
    model: ModelSection,
    /// Per-provider settings, keyed by canonical id
    providers: BTreeMap<String, ProviderSection>,
}

impl TextgenConfig {
    /// Loads defaults, then `TEXTGEN_CONFIG_PATH` if set, then the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::Invalid`] when a source cannot be read or parsed.
    #[instrument]
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    /// Loads defaults, then `path` if given, then the environment.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::Invalid`] when a source cannot be read or parsed. A
    /// named file that does not exist is an error.
    #[instrument]
    pub fn load_from(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults();
        if let Some(path) = path {
            debug!(path = %path.display(), "Adding configuration file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(true));
        }
        let builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );
        finish(builder)
    }

    /// Parses a TOML document on top of the built-in defaults, ignoring the
    /// environment.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::Invalid`] when the document cannot be parsed.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        finish(defaults().add_source(File::from_str(document, FileFormat::Toml)))
    }

    /// Limits from `providers.<id>.models`, empty when the section is absent.
    pub fn model_limits(&self, provider: ProviderId) -> ModelLimits {
        self.providers
            .get(provider.as_str())
            .map(|section| {
                section
                    .models
                    .iter()
                    .map(|entry| (entry.name.clone(), entry.max_tokens))
                    .collect()
            })
            .unwrap_or_default()
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<TextgenConfig, ConfigError> {
    builder
        .build()
        .and_then(Config::try_deserialize)
        .map_err(|e| {
            ConfigError::new(ConfigErrorKind::Invalid(format!(
                "Failed to load configuration: {}",
                e
            )))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_carry_model_tables() {
        let config = TextgenConfig::from_toml_str("").unwrap();
        assert!(config.model().provider().is_none());
        assert_eq!(
            config.model_limits(ProviderId::Gemini).get("gemini-1.5-flash"),
            Some(8192)
        );
        assert!(config.model_limits(ProviderId::HuggingFace).is_empty());
    }

    #[test]
    fn test_document_overrides_defaults() {
        let config = TextgenConfig::from_toml_str(
            r#"
            [model]
            provider = "claude"

            [model.parameters]
            model = "claude-3-haiku-20240307"
            timeout_secs = 30

            [providers.anthropic]
            models = [{ name = "claude-3-haiku-20240307", max_tokens = 2048 }]
            "#,
        )
        .unwrap();

        assert_eq!(config.model().provider().as_deref(), Some("claude"));
        assert_eq!(
            config.model().parameters().model().as_deref(),
            Some("claude-3-haiku-20240307")
        );
        assert_eq!(*config.model().parameters().timeout_secs(), Some(30));
        let limits = config.model_limits(ProviderId::Anthropic);
        assert_eq!(limits.get("claude-3-haiku-20240307"), Some(2048));
        assert_eq!(limits.len(), 1);
    }

    #[test]
    fn test_malformed_document_is_invalid() {
        let err = TextgenConfig::from_toml_str("[model\nprovider = ").unwrap_err();
        assert!(matches!(err.kind(), ConfigErrorKind::Invalid(_)));
    }
}

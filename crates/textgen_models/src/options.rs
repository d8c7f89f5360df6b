//! Explicit adapter construction options.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use textgen_core::{ModelLimits, ProviderId};
use textgen_error::{ConfigError, ConfigErrorKind};

use crate::DEFAULT_TIMEOUT;

/// A credential that never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Wraps a key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as sent on the wire.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Every option an adapter recognizes.
///
/// | option         | used by                 | effect                                         |
/// |----------------|-------------------------|------------------------------------------------|
/// | `api_key`      | all                     | credential; else the provider's env variable   |
/// | `project_id`   | gemini, palm            | sent as `x-goog-user-project`                  |
/// | `organization` | openai                  | sent as `OpenAI-Organization`                  |
/// | `model`        | all                     | default model; else the provider default       |
/// | `models`       | all                     | model limit overrides, applied last            |
/// | `base_url`     | all                     | endpoint root; an Azure deployment for openai  |
/// | `api_version`  | openai                  | switches to Azure routing and `api-key` header |
/// | `timeout_secs` | all                     | HTTP timeout, default 120                      |
/// | `cache_dir`    | all                     | disk cache directory                           |
///
/// # Examples
///
/// ```
/// use textgen_models::AdapterOptions;
///
/// let options = AdapterOptions::default()
///     .with_api_key("sk-test")
///     .with_model("gpt-4o");
/// assert_eq!(options.model().as_deref(), Some("gpt-4o"));
/// ```
#[derive(
    Clone,
    Default,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[setters(prefix = "with_", strip_option, into)]
#[serde(default)]
pub struct AdapterOptions {
    /// API key
    api_key: Option<String>,
    /// Google Cloud project
    project_id: Option<String>,
    /// OpenAI organization
    organization: Option<String>,
    /// Default model
    model: Option<String>,
    /// Model limit overrides
    models: ModelLimits,
    /// Endpoint root
    base_url: Option<String>,
    /// Azure OpenAI API version
    api_version: Option<String>,
    /// HTTP timeout in seconds
    timeout_secs: Option<u64>,
    /// Disk cache directory
    cache_dir: Option<PathBuf>,
}

impl std::fmt::Debug for AdapterOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterOptions")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .field("organization", &self.organization)
            .field("model", &self.model)
            .field("models", &self.models)
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .field("cache_dir", &self.cache_dir)
            .finish()
    }
}

impl AdapterOptions {
    /// Resolves the API key from the options, then the process environment.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::MissingCredential`] when neither source has a non-empty key.
    pub fn api_key_for(&self, provider: ProviderId) -> Result<ApiKey, ConfigError> {
        self.api_key_with(provider, |var| std::env::var(var).ok())
    }

    /// Like [`Self::api_key_for`] with a custom environment lookup.
    pub fn api_key_with(
        &self,
        provider: ProviderId,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ApiKey, ConfigError> {
        let env_var = provider.api_key_env();
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| lookup(env_var).filter(|key| !key.trim().is_empty()))
            .map(ApiKey)
            .ok_or_else(|| {
                ConfigError::new(ConfigErrorKind::MissingCredential {
                    provider: provider.to_string(),
                    env_var: env_var.to_string(),
                })
            })
    }

    /// Returns `self` with every option set in `overrides` applied on top.
    ///
    /// Model limits merge entry by entry; every other option is replaced whole.
    pub fn merged_with(&self, overrides: &AdapterOptions) -> AdapterOptions {
        AdapterOptions {
            api_key: overrides.api_key.clone().or_else(|| self.api_key.clone()),
            project_id: overrides.project_id.clone().or_else(|| self.project_id.clone()),
            organization: overrides
                .organization
                .clone()
                .or_else(|| self.organization.clone()),
            model: overrides.model.clone().or_else(|| self.model.clone()),
            models: self.models.clone().merged_with(&overrides.models),
            base_url: overrides.base_url.clone().or_else(|| self.base_url.clone()),
            api_version: overrides
                .api_version
                .clone()
                .or_else(|| self.api_version.clone()),
            timeout_secs: overrides.timeout_secs.or(self.timeout_secs),
            cache_dir: overrides.cache_dir.clone().or_else(|| self.cache_dir.clone()),
        }
    }

    /// Model the adapter starts with.
    pub fn model_or_default(&self, provider: ProviderId) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string())
    }

    /// HTTP timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT)
    }

    /// Checks option combinations that cannot work.
    ///
    /// # Errors
    ///
    /// [`ConfigErrorKind::InvalidOptions`] describing the first problem found.
    pub fn validate(&self, provider: ProviderId) -> Result<(), ConfigError> {
        if self.timeout_secs == Some(0) {
            return Err(ConfigError::new(ConfigErrorKind::InvalidOptions(
                "timeout_secs must be greater than zero".to_string(),
            )));
        }
        if self.api_version.is_some() {
            if provider != ProviderId::OpenAi {
                return Err(ConfigError::new(ConfigErrorKind::InvalidOptions(format!(
                    "api_version only applies to openai, not {}",
                    provider
                ))));
            }
            if self.base_url.is_none() {
                return Err(ConfigError::new(ConfigErrorKind::InvalidOptions(
                    "api_version requires base_url pointing at an Azure deployment".to_string(),
                )));
            }
        }
        if let Some(url) = &self.base_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::new(ConfigErrorKind::InvalidOptions(format!(
                "base_url must be an http(s) URL, got {}",
                url
            ))));
        }
        Ok(())
    }

    /// Endpoint root, or `default` when unset, without a trailing slash.
    pub(crate) fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_key_wins_over_environment() {
        let options = AdapterOptions::default().with_api_key("explicit");
        let key = options
            .api_key_with(ProviderId::Anthropic, |_| Some("from-env".to_string()))
            .unwrap();
        assert_eq!(key.expose(), "explicit");
    }

    #[test]
    fn test_environment_fallback_uses_provider_variable() {
        let key = AdapterOptions::default()
            .api_key_with(ProviderId::Gemini, |var| {
                (var == "GOOGLE_API_KEY").then(|| "google-key".to_string())
            })
            .unwrap();
        assert_eq!(key.expose(), "google-key");
        assert_eq!(format!("{:?}", key), "ApiKey(<redacted>)");
    }

    #[test]
    fn test_missing_credential() {
        let err = AdapterOptions::default()
            .with_api_key("   ")
            .api_key_with(ProviderId::Cohere, |_| None)
            .unwrap_err();
        assert_eq!(
            err.kind(),
            &ConfigErrorKind::MissingCredential {
                provider: "cohere".to_string(),
                env_var: "COHERE_API_KEY".to_string(),
            }
        );
    }

    #[test]
    fn test_validation() {
        assert!(AdapterOptions::default().validate(ProviderId::Palm).is_ok());
        assert!(
            AdapterOptions::default()
                .with_timeout_secs(0u64)
                .validate(ProviderId::Palm)
                .is_err()
        );
        assert!(
            AdapterOptions::default()
                .with_api_version("2024-02-01")
                .validate(ProviderId::OpenAi)
                .is_err()
        );
        assert!(
            AdapterOptions::default()
                .with_api_version("2024-02-01")
                .with_base_url("https://res.openai.azure.com/openai/deployments/gpt4")
                .validate(ProviderId::OpenAi)
                .is_ok()
        );
        assert!(
            AdapterOptions::default()
                .with_base_url("ftp://nope")
                .validate(ProviderId::Cohere)
                .is_err()
        );
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = AdapterOptions::default()
            .with_model("gemini-1.5-pro")
            .with_timeout_secs(30u64)
            .with_models(ModelLimits::from_iter([("a", 1), ("b", 2)]));
        let overrides = AdapterOptions::default()
            .with_api_key("k")
            .with_models(ModelLimits::from_iter([("b", 20)]));

        let merged = base.merged_with(&overrides);
        assert_eq!(merged.model().as_deref(), Some("gemini-1.5-pro"));
        assert_eq!(merged.api_key().as_deref(), Some("k"));
        assert_eq!(merged.timeout(), Duration::from_secs(30));
        assert_eq!(merged.models().get("a"), Some(1));
        assert_eq!(merged.models().get("b"), Some(20));
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", AdapterOptions::default().with_api_key("sk-secret"));
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}

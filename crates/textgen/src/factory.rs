//! Provider resolution and generator construction.

use crate::TextgenConfig;
use std::path::PathBuf;
use std::sync::Arc;
use textgen_cache::{CacheGateway, DiskStore};
use textgen_core::ProviderId;
use textgen_error::{ConfigError, ConfigErrorKind, TextgenResult};
use textgen_models::{AdapterOptions, Generator, HttpTransport};
use tracing::{info, instrument, warn};

/// Provider used when neither the caller nor the configuration names one.
pub const DEFAULT_PROVIDER: &str = "openai";

/// Resolves a provider name or alias to its canonical id.
///
/// # Errors
///
/// [`ConfigErrorKind::UnsupportedProvider`] for unknown names.
pub fn resolve(name: &str) -> Result<ProviderId, ConfigError> {
    ProviderId::resolve(name)
}

/// Creates a generator for `name` with an HTTP transport and a disk cache.
///
/// Model limits layer the built-in table, then `providers.<id>.models` from
/// `config`, then `options.models`. When the cache directory cannot be opened the
/// generator runs without a cache.
///
/// # Errors
///
/// Configuration errors for unknown or unbundled providers, missing credentials
/// and invalid options; a transport error when the HTTP client cannot be built.
#[instrument(skip(options, config))]
pub fn create(
    name: &str,
    options: &AdapterOptions,
    config: &TextgenConfig,
) -> TextgenResult<Generator> {
    let provider = resolve(name)?;
    if provider == ProviderId::HuggingFace {
        return Err(ConfigError::new(ConfigErrorKind::UnsupportedProvider(
            "hf: local inference is not bundled with this build".to_string(),
        ))
        .into());
    }
    options.validate(provider)?;

    let transport = Arc::new(HttpTransport::new(provider, options.timeout())?);
    let cache = open_cache(provider, options);
    Generator::build(
        provider,
        options,
        &config.model_limits(provider),
        transport,
        cache,
    )
}

/// Loads configuration and creates a generator.
///
/// With no `provider`, `model.provider` from the configuration is used (falling
/// back to openai) and `options` are applied over `model.parameters`.
///
/// # Errors
///
/// Everything [`create`] reports, plus configuration loading errors.
#[instrument(skip(options))]
pub fn llm(provider: Option<&str>, options: AdapterOptions) -> TextgenResult<Generator> {
    dotenvy::dotenv().ok();
    let config = TextgenConfig::load()?;
    let (name, options) = select(provider, options, &config);
    create(&name, &options, &config)
}

/// Picks the provider name and effective options for [`llm`].
pub fn select(
    provider: Option<&str>,
    options: AdapterOptions,
    config: &TextgenConfig,
) -> (String, AdapterOptions) {
    match provider {
        Some(name) => (name.to_string(), options),
        None => {
            let name = config.model().provider().clone().unwrap_or_else(|| {
                info!("No provider specified, defaulting to {}", DEFAULT_PROVIDER);
                DEFAULT_PROVIDER.to_string()
            });
            (name, config.model().parameters().merged_with(&options))
        }
    }
}

fn cache_dir(provider: ProviderId, options: &AdapterOptions) -> Option<PathBuf> {
    match options.cache_dir() {
        Some(dir) => Some(dir.join(provider.as_str())),
        None => DiskStore::default_dir(provider.as_str()),
    }
}

fn open_cache(provider: ProviderId, options: &AdapterOptions) -> Option<CacheGateway> {
    let Some(dir) = cache_dir(provider, options) else {
        warn!(provider = provider.as_str(), "No cache directory available, caching disabled");
        return None;
    };
    match DiskStore::open(&dir) {
        Ok(store) => Some(CacheGateway::new(store)),
        Err(e) => {
            warn!(
                provider = provider.as_str(),
                dir = %dir.display(),
                error = %e,
                "Could not open cache directory, caching disabled"
            );
            None
        }
    }
}

//! Cache key derivation.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use textgen_core::{Conversation, GenerationParams, ProviderId};
use textgen_error::{CacheStoreError, CacheStoreErrorKind};

/// Everything a cached response depends on, before digesting.
///
/// Only [`crate::CacheGateway`] turns this into a [`CacheKey`].
#[derive(Debug, Clone, Serialize)]
pub struct KeyMaterial<'a> {
    provider: ProviderId,
    model: &'a str,
    messages: &'a Conversation,
    params: &'a GenerationParams,
}

impl<'a> KeyMaterial<'a> {
    /// Bundles a normalized conversation with its resolved parameters.
    pub fn new(
        provider: ProviderId,
        messages: &'a Conversation,
        params: &'a GenerationParams,
    ) -> Self {
        Self {
            provider,
            model: params.model(),
            messages,
            params,
        }
    }

    /// Canonical bytes: compact JSON with every object's keys sorted.
    pub(crate) fn canonical_bytes(&self) -> Result<Vec<u8>, CacheStoreError> {
        let value = serde_json::to_value(self).map_err(|e| {
            CacheStoreError::new(CacheStoreErrorKind::Serialization(e.to_string()))
        })?;
        serde_json::to_vec(&canonicalize(value)).map_err(|e| {
            CacheStoreError::new(CacheStoreErrorKind::Serialization(e.to_string()))
        })
    }
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            let mut sorted = Map::with_capacity(entries.len());
            for (k, v) in entries {
                sorted.insert(k, canonicalize(v));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// SHA-256 digest identifying a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    pub(crate) fn digest(bytes: &[u8]) -> Self {
        Self(Sha256::digest(bytes).into())
    }

    /// Raw digest bytes, as handed to the store.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

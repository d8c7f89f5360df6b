//! Read-through/write-through access to cached responses.

use crate::{CacheKey, CacheStore, KeyMaterial};
use std::sync::Arc;
use textgen_core::GenerationResponse;
use textgen_error::{CacheStoreError, CacheStoreErrorKind};
use tracing::{debug, instrument, warn};

/// Derives keys and moves responses in and out of a [`CacheStore`].
///
/// Store failures never block generation: lookups degrade to misses and store
/// errors are handed back for the caller to log.
#[derive(Clone)]
pub struct CacheGateway {
    store: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for CacheGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheGateway").finish_non_exhaustive()
    }
}

impl CacheGateway {
    /// Wraps a store.
    pub fn new(store: impl CacheStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Wraps a store that is shared with other owners.
    pub fn shared(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Derives the key for `material`.
    pub fn key(&self, material: &KeyMaterial<'_>) -> Result<CacheKey, CacheStoreError> {
        Ok(CacheKey::digest(&material.canonical_bytes()?))
    }

    /// Returns the stored response for `material`, if there is a usable one.
    #[instrument(skip_all)]
    pub fn lookup(&self, material: &KeyMaterial<'_>) -> Option<GenerationResponse> {
        let key = match self.key(material) {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "Could not derive cache key, treating as miss");
                return None;
            }
        };

        let bytes = match self.store.get(key.as_bytes()) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Cache store unavailable, treating as miss");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(response) => {
                debug!(key = %key, "Cache hit");
                Some(response)
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Undecodable cache entry, treating as miss");
                None
            }
        }
    }

    /// Persists `response` under the key for `material`.
    #[instrument(skip_all)]
    pub fn store(
        &self,
        material: &KeyMaterial<'_>,
        response: &GenerationResponse,
    ) -> Result<(), CacheStoreError> {
        let key = self.key(material)?;
        let bytes = serde_json::to_vec(response).map_err(|e| {
            CacheStoreError::new(CacheStoreErrorKind::Serialization(e.to_string()))
        })?;
        self.store.put(key.as_bytes(), &bytes)?;
        debug!(key = %key, bytes = bytes.len(), "Stored response");
        Ok(())
    }
}

//! Response caching for textgen.
//!
//! A [`CacheGateway`] owns key derivation: callers hand it [`KeyMaterial`] (the
//! normalized conversation plus resolved parameters) and never build keys
//! themselves. Keys are SHA-256 digests of the canonical JSON form of that material.

mod gateway;
mod key;
mod store;

pub use gateway::CacheGateway;
pub use key::{CacheKey, KeyMaterial};
pub use store::{CacheStore, DiskStore, InMemoryStore};

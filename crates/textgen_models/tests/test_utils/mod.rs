//! Test utilities for textgen adapter tests.
//!
//! This module provides a scripted transport and option helpers.

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{MockReply, MockTransport};

use textgen_models::AdapterOptions;

/// Options with an explicit key, so tests never read the environment.
#[allow(dead_code)]
pub fn test_options() -> AdapterOptions {
    AdapterOptions::default().with_api_key("test-key")
}

//! Scripted transport that records every request it receives.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use textgen_error::{TransportError, TransportErrorKind};
use textgen_models::{Transport, TransportRequest};

/// One scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this JSON body
    Json(Value),
    /// Fail with this error kind
    Fail(TransportErrorKind),
}

/// Replays scripted replies in order.
///
/// Once the script runs out every call fails, so an unexpected extra call shows
/// up as a test failure rather than a hang.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<TransportRequest>>,
}

#[allow(dead_code)]
impl MockTransport {
    /// Creates a transport with the given script.
    pub fn new(replies: impl IntoIterator<Item = MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Creates a transport that answers once with `body`.
    pub fn replying(body: Value) -> Self {
        Self::new([MockReply::Json(body)])
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().expect("Lock requests").clone()
    }

    /// Number of requests received so far.
    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("Lock requests").len()
    }

    /// The most recent request.
    pub fn last_request(&self) -> TransportRequest {
        self.requests
            .lock()
            .expect("Lock requests")
            .last()
            .cloned()
            .expect("At least one request")
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<Value, TransportError> {
        self.requests.lock().expect("Lock requests").push(request);
        let reply = self.replies.lock().expect("Lock replies").pop_front();
        match reply {
            Some(MockReply::Json(body)) => Ok(body),
            Some(MockReply::Fail(kind)) => Err(TransportError::new("mock", kind)),
            None => Err(TransportError::new(
                "mock",
                TransportErrorKind::Http("script exhausted".to_string()),
            )),
        }
    }
}

//! Mock transport implementation for testing
//!
//! This module provides a configurable transport that answers requests from
//! canned replies instead of the network. Replies are matched by URL substring,
//! every request is recorded, and a call counter makes it possible to assert
//! that a code path performed no outbound calls at all.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::{HttpRequest, HttpResponse, HttpTransport, TransportError};

/// A canned reply for a matched request
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Respond with this status and body
    Respond(HttpResponse),
    /// Fail as if the request timed out
    Timeout,
    /// Fail as if the connection was refused
    ConnectionRefused,
}

impl MockReply {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        MockReply::Respond(HttpResponse::new(status, body))
    }

    pub fn json(body: serde_json::Value) -> Self {
        MockReply::Respond(HttpResponse::new(200, body.to_string()))
    }
}

/// Mock transport for testing
pub struct MockTransport {
    routes: Vec<(String, MockReply)>,
    fallback: MockReply,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            fallback: MockReply::json(serde_json::json!({ "id": "mock-post-id" })),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl MockTransport {
    /// Create a transport that answers every request with `{"id": "mock-post-id"}`
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer requests whose URL contains `pattern` with `reply`
    ///
    /// Routes are checked in insertion order; the first match wins.
    pub fn with_route(mut self, pattern: &str, reply: MockReply) -> Self {
        self.routes.push((pattern.to_string(), reply));
        self
    }

    /// Replace the reply used when no route matches
    pub fn with_fallback(mut self, reply: MockReply) -> Self {
        self.fallback = reply;
        self
    }

    /// Number of requests received so far
    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Number of requests received whose URL contains `pattern`
    pub fn calls_to(&self, pattern: &str) -> usize {
        self.requests()
            .iter()
            .filter(|request| request.url.contains(pattern))
            .count()
    }

    /// All requests received so far, oldest first
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn reply_for(&self, url: &str) -> MockReply {
        self.routes
            .iter()
            .find(|(pattern, _)| url.contains(pattern.as_str()))
            .map(|(_, reply)| reply.clone())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let reply = self.reply_for(&request.url);
        let timeout = request.timeout;

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);

        match reply {
            MockReply::Respond(response) => Ok(response),
            MockReply::Timeout => Err(TransportError::Timeout(timeout)),
            MockReply::ConnectionRefused => {
                Err(TransportError::Connect("Connection refused (mock)".to_string()))
            }
        }
    }
}

//! Transport seam between the dispatcher and the actual HTTP client.
//!
//! # Design
//! The dispatcher talks to a `HttpTransport` trait object, so tests can
//! substitute in-memory transports and callers can bring their own client.
//! `UreqTransport` is the default implementation: a blocking ureq agent with
//! status-as-error disabled, so 4xx/5xx responses come back as data and all
//! status interpretation stays with the caller. The response body is handed
//! over as an unread stream, not pre-buffered.

use std::time::Duration;

use ureq::RequestBuilder;

use crate::error::FetchError;
use crate::http::{Body, HttpMethod, HttpResponse, OutgoingRequest};

/// An HTTP client capable of executing one request synchronously.
///
/// `execute` runs on the dispatcher's worker thread, never on the caller's
/// thread. Implementations must pass transport failures through as
/// `FetchError::Transport` without retrying or classifying them.
pub trait HttpTransport: Send + Sync {
    fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, FetchError>;
}

/// Default transport backed by a blocking `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransport for UreqTransport {
    fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, FetchError> {
        let OutgoingRequest {
            method,
            url,
            headers,
            body,
            timeout,
        } = request;

        // GET/DELETE bodies are unusual but valid request data; force them
        // onto the wire instead of silently dropping them.
        let response = match (method, body) {
            (HttpMethod::Get, None) => prepare(self.agent.get(&url), &headers, timeout).call(),
            (HttpMethod::Get, Some(b)) => prepare(self.agent.get(&url), &headers, timeout)
                .force_send_body()
                .send(&b[..]),
            (HttpMethod::Delete, None) => {
                prepare(self.agent.delete(&url), &headers, timeout).call()
            }
            (HttpMethod::Delete, Some(b)) => prepare(self.agent.delete(&url), &headers, timeout)
                .force_send_body()
                .send(&b[..]),
            (HttpMethod::Post, Some(b)) => {
                prepare(self.agent.post(&url), &headers, timeout).send(&b[..])
            }
            (HttpMethod::Post, None) => {
                prepare(self.agent.post(&url), &headers, timeout).send_empty()
            }
            (HttpMethod::Put, Some(b)) => {
                prepare(self.agent.put(&url), &headers, timeout).send(&b[..])
            }
            (HttpMethod::Put, None) => {
                prepare(self.agent.put(&url), &headers, timeout).send_empty()
            }
        }
        .map_err(|e| FetchError::Transport(e.to_string()))?;

        let (parts, body) = response.into_parts();

        let mut headers = Vec::with_capacity(parts.headers.len());
        for (name, value) in parts.headers.iter() {
            match value.to_str() {
                Ok(v) => headers.push((name.as_str().to_string(), v.to_string())),
                Err(_) => log::warn!("skipping non-text value for response header {name}"),
            }
        }

        Ok(HttpResponse {
            status: parts.status.as_u16(),
            headers,
            body: Body::from_reader(Box::new(body.into_reader())),
        })
    }
}

/// Apply headers and the per-request deadline to a builder of either
/// typestate (with or without a request body).
fn prepare<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
    timeout: Option<Duration>,
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    match timeout {
        Some(t) => builder.config().timeout_global(Some(t)).build(),
        None => builder,
    }
}

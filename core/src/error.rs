//! Error types for the async fetch client.
//!
//! # Design
//! One enum covers the whole taxonomy. Transport failures keep the
//! underlying client's message unmodified; body-read and decode failures are
//! deliberately the same kind of thing to callers beyond their message
//! content. `BodyClosed` gets a dedicated variant because it marks a usage
//! bug (reading a stream that was already consumed), not an I/O condition.

use std::fmt;

/// Errors delivered through fetch completion callbacks.
#[derive(Debug)]
pub enum FetchError {
    /// The request could not be constructed from a malformed URL.
    InvalidUrl(String),

    /// The HTTP client failed to execute the request.
    Transport(String),

    /// Reading the response body stream failed after a successful round trip.
    BodyRead(String),

    /// The response body could not be decoded into the requested type.
    Decode(String),

    /// The response body stream was already consumed or closed.
    BodyClosed,
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(msg) => write!(f, "invalid url: {msg}"),
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::BodyRead(msg) => write!(f, "reading response body failed: {msg}"),
            FetchError::Decode(msg) => write!(f, "decoding response body failed: {msg}"),
            FetchError::BodyClosed => write!(f, "response body already closed"),
        }
    }
}

impl std::error::Error for FetchError {}

//! Asynchronous HTTP fetch core for single-threaded host environments.
//!
//! # Overview
//! Dispatches HTTP requests without blocking the calling thread, delivers
//! each outcome through a completion callback exactly once, and contains any
//! crash inside the spawned unit of work so it can never halt the host
//! process. Decoder middlewares (`as_text`, `as_json`) layer body
//! consumption and JSON decoding over the raw callback shape.
//!
//! # Design
//! - One worker thread per request; the caller returns immediately.
//! - The transport is an injected `HttpTransport` trait object (ureq by
//!   default), so tests and embedders can substitute their own client.
//! - Every worker runs under a `catch_unwind` boundary wired to a
//!   replaceable `PanicHandler`; a crash produces one log entry and nothing
//!   else.
//! - The response body is a one-shot stream closed by whoever finishes
//!   reading it; ownership transfer replaces locking throughout.
//! - Errors are plain data (`FetchError`); nothing is retried or classified.

pub mod client;
pub mod error;
pub mod http;
pub mod middleware;
pub mod panic_guard;
pub mod transport;

pub use client::{get, FetchClient, FetchResult};
pub use error::FetchError;
pub use http::{Body, HttpMethod, HttpResponse, OutgoingRequest};
pub use middleware::{as_json, as_text};
pub use panic_guard::{default_panic_handler, install_panic_handler, PanicHandler};
pub use transport::{HttpTransport, UreqTransport};

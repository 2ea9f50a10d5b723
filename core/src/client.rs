//! Non-blocking request dispatcher and convenience entry points.
//!
//! # Design
//! One worker thread is spawned per request (the host environment is
//! effectively single-threaded, so workers never race the caller over shared
//! state). The whole unit of work runs under `catch_unwind`: a panic is
//! routed to the client's `PanicHandler` and the worker ends normally, so a
//! crash in one request can never halt the process or a later request. The
//! completion callback is `FnOnce`, which makes more-than-once delivery
//! unrepresentable; a pre-callback panic is the one path where it does not
//! fire at all, and the handler's log entry is the only trace of it.
//!
//! Callers never block: `request` and `get` return as soon as the worker is
//! spawned. The single exception is `get` with a malformed URL, where the
//! callback runs synchronously on the calling thread and no worker exists.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::thread;

use crate::error::FetchError;
use crate::http::{HttpResponse, OutgoingRequest};
use crate::panic_guard::{global_panic_handler, PanicHandler};
use crate::transport::{HttpTransport, UreqTransport};

/// Result handed to a completion callback, exactly once per request.
pub type FetchResult = Result<HttpResponse, FetchError>;

/// Asynchronous fetch client: an injected transport plus a crash policy.
///
/// Stateless across calls; cloning is cheap and clones share the transport.
#[derive(Clone)]
pub struct FetchClient {
    transport: Arc<dyn HttpTransport>,
    panic_handler: PanicHandler,
}

impl FetchClient {
    /// Client over the default ureq transport and the process-wide panic
    /// handler.
    pub fn new() -> Self {
        Self::with_transport(Arc::new(UreqTransport::new()))
    }

    /// Client over a caller-supplied transport.
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            panic_handler: global_panic_handler(),
        }
    }

    /// Replace the crash policy for workers spawned by this client.
    pub fn panic_handler(mut self, handler: PanicHandler) -> Self {
        self.panic_handler = handler;
        self
    }

    /// Dispatch `request` on a fresh worker thread and deliver the outcome
    /// to `f` exactly once.
    ///
    /// Never blocks the calling thread. Transport errors are passed through
    /// unmodified. The response body is owned by `f` once it fires; if `f`
    /// does not read it, dropping the response closes it. If the worker
    /// panics before `f` runs, the panic handler fires instead and `f` is
    /// never invoked.
    pub fn request<F>(&self, request: OutgoingRequest, f: F)
    where
        F: FnOnce(FetchResult) + Send + 'static,
    {
        let transport = Arc::clone(&self.transport);
        let handler = Arc::clone(&self.panic_handler);
        thread::spawn(move || {
            let unit = panic::catch_unwind(AssertUnwindSafe(move || {
                let result = transport.execute(request);
                f(result);
            }));
            if let Err(payload) = unit {
                handler(&*payload);
            }
        });
    }

    /// Dispatch a body-less GET against `url`.
    ///
    /// On a malformed URL the callback runs synchronously on the calling
    /// thread with the construction error, and no worker is spawned.
    pub fn get<F>(&self, url: &str, f: F)
    where
        F: FnOnce(FetchResult) + Send + 'static,
    {
        match OutgoingRequest::get(url) {
            Ok(request) => self.request(request, f),
            Err(err) => f(Err(err)),
        }
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Perform a GET against `url` using the shared default client.
pub fn get<F>(url: &str, f: F)
where
    F: FnOnce(FetchResult) + Send + 'static,
{
    default_client().get(url, f)
}

fn default_client() -> &'static FetchClient {
    static DEFAULT: OnceLock<FetchClient> = OnceLock::new();
    DEFAULT.get_or_init(FetchClient::new)
}

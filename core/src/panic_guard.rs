//! Crash containment for spawned fetch workers.
//!
//! # Design
//! A panic inside a worker must never take the host process down or leak
//! across the dispatch boundary, so every worker wraps its whole unit of
//! work in `catch_unwind` and routes the payload to a `PanicHandler`. The
//! handler is an injectable capability: `FetchClient` holds one by `Arc`,
//! and a process-wide slot (initialized once at startup, never torn down)
//! supplies the default. The default handler writes exactly one log entry
//! per crash, with the panic payload and a captured backtrace, and must
//! never re-raise or invoke a completion callback.

use std::any::Any;
use std::backtrace::Backtrace;
use std::sync::{Arc, OnceLock};

/// Process-wide crash policy shared by all spawned workers.
pub type PanicHandler = Arc<dyn Fn(&(dyn Any + Send)) + Send + Sync>;

static GLOBAL_HANDLER: OnceLock<PanicHandler> = OnceLock::new();

/// Install the process-wide panic handler. Call once at startup, before any
/// client is constructed. Returns `false` if a handler was already
/// installed, leaving the existing one in place.
pub fn install_panic_handler(handler: PanicHandler) -> bool {
    GLOBAL_HANDLER.set(handler).is_ok()
}

/// The installed handler, or the logging default if none was installed.
pub(crate) fn global_panic_handler() -> PanicHandler {
    GLOBAL_HANDLER
        .get()
        .cloned()
        .unwrap_or_else(default_panic_handler)
}

/// Handler that logs the panic payload and a backtrace at error level.
pub fn default_panic_handler() -> PanicHandler {
    Arc::new(|payload| {
        log::error!(
            "fetch worker panicked: {}\n{}",
            panic_message(payload),
            Backtrace::force_capture()
        );
    })
}

/// Best-effort extraction of the human-readable panic message.
fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}

//! Decoder middlewares layered over the raw completion callback.
//!
//! # Design
//! Both adapters are pure transformations: they take a callback with a
//! simpler shape and return the `FetchResult` callback the dispatcher
//! expects, so they compose directly with `get` and `request`. Each one
//! invokes its inner callback exactly once on every path, and whichever
//! adapter reads the body is the one that closes it (reading consumes the
//! one-shot stream). Upstream errors are forwarded untouched without ever
//! looking at a response.

use serde::de::DeserializeOwned;

use crate::client::FetchResult;
use crate::error::FetchError;

/// Adapt a text callback into a dispatcher callback.
///
/// Reads the full body and delivers it as a string. Byte sequences that are
/// not valid UTF-8 are converted lossily rather than rejected. Example:
///
/// ```no_run
/// fetch_core::get("http://localhost:3000/text", fetch_core::as_text(|text| {
///     match text {
///         Ok(text) => println!("{text}"),
///         Err(err) => eprintln!("{err}"),
///     }
/// }));
/// ```
pub fn as_text<F>(f: F) -> impl FnOnce(FetchResult) + Send + 'static
where
    F: FnOnce(Result<String, FetchError>) + Send + 'static,
{
    move |result| match result {
        Err(err) => f(Err(err)),
        Ok(mut response) => match response.body.read_to_vec() {
            Err(err) => f(Err(err)),
            Ok(bytes) => f(Ok(String::from_utf8_lossy(&bytes).into_owned())),
        },
    }
}

/// Adapt a typed callback into a dispatcher callback by JSON-decoding the
/// body.
///
/// The decoded value is delivered through the callback; on a read or decode
/// failure the error is delivered instead and no value is produced, so a
/// failed decode can never leave the caller holding partial data. Example:
///
/// ```no_run
/// #[derive(serde::Deserialize)]
/// struct Payload {
///     #[serde(rename = "SomeField")]
///     some_field: String,
/// }
///
/// fetch_core::get(
///     "http://localhost:3000/json",
///     fetch_core::as_json(|payload: Result<Payload, _>| {
///         if let Ok(payload) = payload {
///             println!("{}", payload.some_field);
///         }
///     }),
/// );
/// ```
pub fn as_json<T, F>(f: F) -> impl FnOnce(FetchResult) + Send + 'static
where
    T: DeserializeOwned,
    F: FnOnce(Result<T, FetchError>) + Send + 'static,
{
    move |result| match result {
        Err(err) => f(Err(err)),
        Ok(mut response) => match response.body.read_to_vec() {
            Err(err) => f(Err(err)),
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Err(err) => f(Err(FetchError::Decode(err.to_string()))),
                Ok(value) => f(Ok(value)),
            },
        },
    }
}

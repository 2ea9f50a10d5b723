//! HTTP request/response data model for the async fetch client.
//!
//! # Design
//! Requests are plain owned data (`String`, `Vec`) built by the caller or by
//! the `get` convenience entry point, then handed to a transport exactly
//! once. Responses carry their body as a one-shot stream: whoever finishes
//! reading it closes it, and ownership transfer (not locking) is what keeps
//! the stream single-owner. Dropping an unread response closes the body.

use std::fmt;
use std::io::Read;
use std::time::Duration;

use crate::error::FetchError;

/// HTTP method for an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// An outgoing HTTP request described as plain data.
///
/// Immutable once handed to the dispatcher; consumed exactly once by the
/// transport. `timeout` of `None` means no deadline (the default for the
/// `get` entry point).
#[derive(Debug, Clone)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
    pub timeout: Option<Duration>,
}

impl OutgoingRequest {
    /// Build a request, validating `url` up front so a malformed URL is
    /// reported before any worker is spawned.
    pub fn new(method: HttpMethod, url: &str) -> Result<Self, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;
        Ok(Self {
            method,
            url: parsed.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        })
    }

    /// Build a body-less GET request against `url`.
    pub fn get(url: &str) -> Result<Self, FetchError> {
        Self::new(HttpMethod::Get, url)
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// An incoming HTTP response.
///
/// The status is passed through as the server sent it; non-2xx codes are
/// data here, never errors. The body starts unread and is closed by
/// whichever party finishes with it.
#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Body,
}

impl HttpResponse {
    /// Case-insensitive lookup of the first header with the given name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A one-shot response body stream.
///
/// `read_to_vec` consumes the stream and closes it, on success and on read
/// failure alike; any later read fails with `FetchError::BodyClosed`.
pub struct Body {
    reader: Option<Box<dyn Read + Send>>,
}

impl Body {
    pub fn from_reader(reader: Box<dyn Read + Send>) -> Self {
        Self {
            reader: Some(reader),
        }
    }

    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::from_reader(Box::new(std::io::Cursor::new(bytes.into())))
    }

    pub fn empty() -> Self {
        Self::from_bytes(Vec::new())
    }

    /// Read the remaining stream fully into memory, closing it.
    pub fn read_to_vec(&mut self) -> Result<Vec<u8>, FetchError> {
        let mut reader = self.reader.take().ok_or(FetchError::BodyClosed)?;
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;
        Ok(buf)
    }

    /// Close the stream without reading it. Idempotent.
    pub fn close(&mut self) {
        self.reader = None;
    }

    pub fn is_closed(&self) -> bool {
        self.reader.is_none()
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_closed() { "closed" } else { "open" };
        write!(f, "Body({state})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_malformed_url() {
        let err = OutgoingRequest::get("not a url").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn get_builds_bodyless_request() {
        let req = OutgoingRequest::get("http://localhost:3000/text").unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/text");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
        assert!(req.timeout.is_none());
    }

    #[test]
    fn builder_helpers_accumulate() {
        let req = OutgoingRequest::new(HttpMethod::Post, "http://localhost:3000/echo")
            .unwrap()
            .header("content-type", "application/json")
            .with_body(r#"{"a":1}"#)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#.as_bytes()));
        assert_eq!(req.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn body_reads_exactly_once() {
        let mut body = Body::from_bytes("hello world");
        assert!(!body.is_closed());
        assert_eq!(body.read_to_vec().unwrap(), b"hello world");
        assert!(body.is_closed());
        let err = body.read_to_vec().unwrap_err();
        assert!(matches!(err, FetchError::BodyClosed));
    }

    #[test]
    fn close_without_reading_discards_stream() {
        let mut body = Body::from_bytes("unread");
        body.close();
        assert!(body.is_closed());
        assert!(matches!(
            body.read_to_vec().unwrap_err(),
            FetchError::BodyClosed
        ));
    }

    #[test]
    fn failing_reader_surfaces_read_error_and_closes() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("stream reset"))
            }
        }

        let mut body = Body::from_reader(Box::new(Broken));
        let err = body.read_to_vec().unwrap_err();
        assert!(matches!(err, FetchError::BodyRead(_)));
        assert!(body.is_closed());
    }

    #[test]
    fn response_header_lookup_is_case_insensitive() {
        let res = HttpResponse {
            status: 200,
            headers: vec![("Content-Type".to_string(), "text/plain".to_string())],
            body: Body::empty(),
        };
        assert_eq!(res.header("content-type"), Some("text/plain"));
        assert_eq!(res.header("x-missing"), None);
    }
}

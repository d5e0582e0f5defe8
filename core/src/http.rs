//! HTTP request and response types exchanged with a [`Transport`].
//!
//! # Design
//! Requests and responses are plain data. The client builds an `HttpRequest`,
//! hands it to a transport, and parses the `HttpResponse` it gets back. Keeping
//! both ends free of any HTTP library's types lets tests swap the transport
//! for a stub and lets the build/parse halves be checked without I/O.
//!
//! [`Transport`]: crate::transport::Transport

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

/// An HTTP request described as plain data.
///
/// Built by `AddressClient::build_lookup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Produced by a transport after executing an `HttpRequest`, then passed to
/// `AddressClient::parse_lookup`. The body is kept as raw bytes so that
/// invalid UTF-8 reaches the decoder instead of being replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Whether the status is in the inclusive 200–299 range.
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.status)
    }
}

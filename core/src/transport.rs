//! Pluggable HTTP execution.
//!
//! # Design
//! `AddressClient` never performs I/O itself; it hands an `HttpRequest` to a
//! `Transport` and gets an `HttpResponse` back. The default implementation,
//! `UreqTransport`, drives a shared `ureq::Agent` on Tokio's blocking pool so
//! the awaiting task only suspends at this boundary. Tests substitute their
//! own implementation to count calls or inject failures.
//!
//! Implementations must report 4xx/5xx as ordinary responses. Status
//! interpretation belongs to the client.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::trace;

use crate::config::DEFAULT_TIMEOUT;
use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes HTTP requests on behalf of `AddressClient`.
///
/// One instance is shared by every in-flight call on a client, so
/// implementations must be safe for concurrent use.
pub trait Transport: Send + Sync + 'static {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// Default transport backed by `ureq`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(Some(DEFAULT_TIMEOUT))
    }
}

impl UreqTransport {
    /// Build a transport whose requests are bounded by `timeout` end to end.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| TransportError::Connection(Box::new(e)))?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse, TransportError> {
    trace!(url = %request.url, "executing request");
    let mut builder = match request.method {
        HttpMethod::Get => agent.get(&request.url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    let mut response = builder.call().map_err(transport_error)?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_vec().map_err(transport_error)?;

    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

fn transport_error(err: ureq::Error) -> TransportError {
    if matches!(err, ureq::Error::Protocol(_)) {
        TransportError::MalformedResponse(err.to_string())
    } else {
        TransportError::Connection(Box::new(err))
    }
}

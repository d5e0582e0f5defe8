//! CEP lookup client.
//!
//! # Design
//! `AddressClient` holds its configuration and a shared transport handle and
//! carries no per-call state, so one instance can serve any number of
//! overlapping lookups. A lookup is split into `build_lookup` (validation and
//! URL construction), the transport round-trip, and `parse_lookup` (status
//! check and decoding). The two halves are pure, which keeps the pipeline
//! testable without I/O; `fetch_address` composes them, and
//! `fetch_address_with` adapts `fetch_address` to a callback.

use std::sync::Arc;

use ::http::Uri;
use tokio::runtime::Handle;
use tracing::debug;

use crate::cep::normalize_cep;
use crate::config::ClientConfig;
use crate::error::{AddressNotFound, ClientError, LookupCancelled};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::Address;

/// Client for the ViaCEP address lookup service.
///
/// The transport is injected at construction; [`AddressClient::new`] uses a
/// `UreqTransport` pointed at the public service.
#[derive(Debug)]
pub struct AddressClient<T = UreqTransport> {
    config: ClientConfig,
    transport: Arc<T>,
}

impl<T> Clone for AddressClient<T> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl Default for AddressClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressClient<UreqTransport> {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Client using the default transport, with the configured timeout.
    pub fn with_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> AddressClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport: Arc::new(transport),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Validate `cep` and build the lookup request for it.
    pub fn build_lookup(&self, cep: &str) -> Result<HttpRequest, ClientError> {
        let digits = normalize_cep(cep).ok_or(ClientError::InvalidCep)?;
        let url = format!("{}/{digits}/json", self.config.base_url());
        check_endpoint(&url)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        })
    }

    /// Check the status of a lookup response and decode its body.
    pub fn parse_lookup(&self, response: HttpResponse) -> Result<Address, ClientError> {
        if !response.is_success() {
            debug!(status = response.status, "lookup rejected");
            return Err(ClientError::InvalidResponse);
        }
        decode_address(&response.body)
    }

    /// Look up the address for `cep`.
    ///
    /// Suspends only while the transport is executing. Dropping the future
    /// abandons the request and leaves the client usable.
    pub async fn fetch_address(&self, cep: &str) -> Result<Address, ClientError> {
        let request = self.build_lookup(cep)?;
        debug!(url = %request.url, "fetching address");
        let response = self.transport.execute(request).await?;
        let address = self.parse_lookup(response)?;
        debug!(cep = %address.cep, city = %address.city, "address fetched");
        Ok(address)
    }

    /// Look up the address for `cep` and deliver the outcome to `callback`.
    ///
    /// Returns immediately. The callback runs exactly once, after the lookup
    /// finishes, and never before this method has returned. The lookup is
    /// spawned on the current Tokio runtime when there is one, otherwise on a
    /// dedicated thread. If the lookup is dropped before finishing, the
    /// callback receives a `NetworkError` caused by [`LookupCancelled`].
    pub fn fetch_address_with<F>(&self, cep: &str, callback: F)
    where
        F: FnOnce(Result<Address, ClientError>) + Send + 'static,
    {
        let client = self.clone();
        let cep = cep.to_owned();
        let guard = CallbackGuard::new(callback);
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    let outcome = client.fetch_address(&cep).await;
                    guard.complete(outcome);
                });
            }
            Err(_) => {
                let spawned = std::thread::Builder::new()
                    .name("viacep-lookup".into())
                    .spawn(move || {
                        match tokio::runtime::Builder::new_current_thread()
                            .enable_all()
                            .build()
                        {
                            Ok(runtime) => {
                                let outcome = runtime.block_on(client.fetch_address(&cep));
                                guard.complete(outcome);
                            }
                            Err(e) => guard.complete(Err(ClientError::NetworkError(Box::new(e)))),
                        }
                    });
                // The closure, and the guard with it, was dropped: the
                // callback has already been told the lookup was cancelled.
                if let Err(e) = spawned {
                    debug!(error = %e, "could not spawn lookup thread");
                }
            }
        }
    }
}

/// Holds a lookup callback until it fires. A guard dropped before
/// `complete` (task dropped by a shutting-down runtime, thread that never
/// started, panic in the transport) delivers a cancellation instead, so the
/// callback runs exactly once.
struct CallbackGuard<F>
where
    F: FnOnce(Result<Address, ClientError>),
{
    callback: Option<F>,
}

impl<F> CallbackGuard<F>
where
    F: FnOnce(Result<Address, ClientError>),
{
    fn new(callback: F) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    fn complete(mut self, outcome: Result<Address, ClientError>) {
        if let Some(callback) = self.callback.take() {
            callback(outcome);
        }
    }
}

impl<F> Drop for CallbackGuard<F>
where
    F: FnOnce(Result<Address, ClientError>),
{
    fn drop(&mut self) {
        if let Some(callback) = self.callback.take() {
            debug!("lookup dropped before completion");
            callback(Err(ClientError::NetworkError(Box::new(LookupCancelled))));
        }
    }
}

/// The URL must parse as an absolute http(s) URI with a host.
fn check_endpoint(url: &str) -> Result<(), ClientError> {
    let uri: Uri = url.parse().map_err(|_| ClientError::InvalidEndpoint)?;
    match (uri.scheme_str(), uri.host()) {
        (Some("http" | "https"), Some(host)) if !host.is_empty() => Ok(()),
        _ => Err(ClientError::InvalidEndpoint),
    }
}

/// Decode a lookup body. The service answers unknown CEPs with 200 and an
/// `erro` marker in place of the address fields.
fn decode_address(body: &[u8]) -> Result<Address, ClientError> {
    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ClientError::DecodingError(Box::new(e)))?;
    if let Some(marker) = value.get("erro") {
        if marker.as_bool() == Some(true) || marker.as_str() == Some("true") {
            return Err(ClientError::DecodingError(Box::new(AddressNotFound)));
        }
    }
    serde_json::from_value(value).map_err(|e| ClientError::DecodingError(Box::new(e)))
}

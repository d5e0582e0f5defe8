//! Error types for the ViaCEP client.
//!
//! # Design
//! `ClientError` is a closed set: every failure of a lookup lands in exactly
//! one of its five variants, in pipeline order. Transport and decoding
//! failures keep their underlying cause, reachable through
//! `std::error::Error::source`. `TransportError` is what a [`Transport`]
//! reports; the client folds it into `ClientError`.
//!
//! [`Transport`]: crate::transport::Transport

use thiserror::Error;

/// A boxed, thread-safe error used as the cause of wrapped failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned by `AddressClient` lookups.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The input is not eight digits once hyphens are removed.
    #[error("the provided CEP format is invalid, expected 8 digits")]
    InvalidCep,

    /// The lookup URL could not be constructed from the configured base.
    #[error("the request endpoint could not be constructed")]
    InvalidEndpoint,

    /// The transport failed before a response was received.
    #[error("network error occurred: {0}")]
    NetworkError(#[source] BoxError),

    /// The response was not HTTP or its status was outside 200–299.
    #[error("the server returned an invalid response")]
    InvalidResponse,

    /// The body was not JSON or did not have the shape of an address.
    #[error("failed to decode response: {0}")]
    DecodingError(#[source] BoxError),
}

/// Discriminant of a [`ClientError`], comparable without its cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientErrorKind {
    InvalidCep,
    InvalidEndpoint,
    NetworkError,
    InvalidResponse,
    DecodingError,
}

impl ClientError {
    pub fn kind(&self) -> ClientErrorKind {
        match self {
            ClientError::InvalidCep => ClientErrorKind::InvalidCep,
            ClientError::InvalidEndpoint => ClientErrorKind::InvalidEndpoint,
            ClientError::NetworkError(_) => ClientErrorKind::NetworkError,
            ClientError::InvalidResponse => ClientErrorKind::InvalidResponse,
            ClientError::DecodingError(_) => ClientErrorKind::DecodingError,
        }
    }
}

/// Failures reported by a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// DNS, connect, TLS, timeout or I/O failure.
    #[error("connection failed: {0}")]
    Connection(#[source] BoxError),

    /// Something answered, but not with a well-formed HTTP response.
    #[error("malformed HTTP response: {0}")]
    MalformedResponse(String),
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Connection(source) => ClientError::NetworkError(source),
            TransportError::MalformedResponse(_) => ClientError::InvalidResponse,
        }
    }
}

/// The service answered 200 with its `{"erro": true}` marker.
#[derive(Debug, Error)]
#[error("the service has no address for the requested CEP")]
pub struct AddressNotFound;

/// A callback lookup was dropped before it finished, for example because its
/// runtime shut down.
#[derive(Debug, Error)]
#[error("the lookup was cancelled before it completed")]
pub struct LookupCancelled;

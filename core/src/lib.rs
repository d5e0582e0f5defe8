//! Client for the ViaCEP Brazilian postal code (CEP) lookup service.
//!
//! # Overview
//! `is_valid_cep` checks a CEP's format without touching the network.
//! `AddressClient` turns a CEP into an [`Address`] by validating it, building
//! the lookup URL, issuing a GET through its [`Transport`], checking the status
//! and decoding the JSON body. Each step fails with its own [`ClientError`]
//! variant.
//!
//! # Design
//! - `AddressClient` is stateless apart from its config and an `Arc` to the
//!   transport; clones share the transport.
//! - `build_lookup` / `parse_lookup` expose the pure halves of a lookup so the
//!   I/O boundary is explicit and testable.
//! - `fetch_address_with` is a callback adapter over `fetch_address`; there is
//!   one pipeline.
//! - There is no retry and no caching. Every call goes to the service.

pub mod cep;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use cep::{format_cep, is_valid_cep, normalize_cep};
pub use client::AddressClient;
pub use config::{ClientConfig, ConfigError};
pub use error::{
    AddressNotFound, BoxError, ClientError, ClientErrorKind, LookupCancelled, TransportError,
};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::Address;

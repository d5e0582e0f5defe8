//! Lookups against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `AddressClient` with
//! its default ureq transport over real HTTP. Validates that URL construction,
//! status handling and decoding work end-to-end with the server.

use std::net::SocketAddr;
use std::sync::mpsc;
use std::time::Duration;

use pretty_assertions::assert_eq;
use viacep_core::{Address, AddressClient, ClientConfig, ClientErrorKind};

/// Start the mock server on a random port in a background thread.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr) -> AddressClient {
    let config = ClientConfig::new(&format!("http://{addr}/ws/"))
        .with_timeout(Some(Duration::from_secs(5)));
    AddressClient::with_config(config)
}

fn praca_da_se() -> Address {
    Address {
        cep: "01001-000".to_string(),
        street: "Praça da Sé".to_string(),
        complement: "lado ímpar".to_string(),
        neighborhood: "Sé".to_string(),
        city: "São Paulo".to_string(),
        state_code: "SP".to_string(),
        ibge_code: "3550308".to_string(),
        gia_code: "1004".to_string(),
        area_code: "11".to_string(),
        siafi_code: "7107".to_string(),
    }
}

#[tokio::test]
async fn lookup_lifecycle() {
    let client = client_for(start_server());

    // Step 1: plain and hyphenated input reach the same record.
    let plain = client.fetch_address("01001000").await.unwrap();
    assert_eq!(plain, praca_da_se());
    let hyphenated = client.fetch_address("01001-000").await.unwrap();
    assert_eq!(hyphenated, plain);

    // Step 2: a record with blank fields decodes to empty strings.
    let rio = client.fetch_address("20010-000").await.unwrap();
    assert_eq!(rio.state_code, "RJ");
    assert_eq!(rio.gia_code, "");

    // Step 3: unknown CEP -- service answers 200 with its `erro` marker.
    let err = client.fetch_address("99999999").await.unwrap_err();
    assert_eq!(err.kind(), ClientErrorKind::DecodingError);

    // Step 4: malformed CEP never leaves the client.
    let err = client.fetch_address("12345").await.unwrap_err();
    assert_eq!(err.kind(), ClientErrorKind::InvalidCep);
}

#[tokio::test]
async fn non_success_status_is_invalid_response() {
    let addr = start_server();
    // No such route on the server: 404.
    let client = AddressClient::with_config(ClientConfig::new(&format!("http://{addr}/nowhere")));

    let err = client.fetch_address("01001000").await.unwrap_err();
    assert_eq!(err.kind(), ClientErrorKind::InvalidResponse);
}

#[tokio::test]
async fn refused_connection_is_network_error() {
    // Bind then drop to get a port with nothing listening.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = client_for(addr);

    let err = client.fetch_address("01001000").await.unwrap_err();
    assert_eq!(err.kind(), ClientErrorKind::NetworkError);
    assert!(std::error::Error::source(&err).is_some());
}

#[tokio::test]
async fn callback_form_over_http() {
    let client = client_for(start_server());

    let (tx, rx) = tokio::sync::oneshot::channel();
    client.fetch_address_with("70040-010", move |outcome| {
        let _ = tx.send(outcome);
    });
    let address = rx.await.unwrap().unwrap();
    assert_eq!(address.city, "Brasília");
    assert_eq!(address.state_code, "DF");
}

#[test]
fn callback_form_without_runtime() {
    let client = client_for(start_server());

    let (tx, rx) = mpsc::channel();
    client.fetch_address_with("01001000", move |outcome| {
        tx.send(outcome.map(|a| a.cep)).unwrap();
    });
    let cep = rx.recv_timeout(Duration::from_secs(10)).unwrap().unwrap();
    assert_eq!(cep, "01001-000");
}

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::debug;

/// An address as the ViaCEP service serializes it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    pub cep: String,
    pub logradouro: String,
    pub complemento: String,
    pub bairro: String,
    pub localidade: String,
    pub uf: String,
    pub ibge: String,
    pub gia: String,
    pub ddd: String,
    pub siafi: String,
}

/// Addresses keyed by their 8-digit CEP.
pub type Directory = Arc<HashMap<String, Address>>;

pub fn app() -> Router {
    app_with(fixtures())
}

/// Router serving `addresses` in place of the built-in fixtures.
pub fn app_with(addresses: impl IntoIterator<Item = Address>) -> Router {
    let directory: Directory = Arc::new(
        addresses
            .into_iter()
            .map(|address| (address.cep.replace('-', ""), address))
            .collect(),
    );
    Router::new()
        .route("/ws/{cep}/json", get(lookup))
        .with_state(directory)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Same contract as the real service: 400 for anything that is not exactly
/// eight digits, 200 with `{"erro": true}` for a well-formed CEP it does not
/// know.
async fn lookup(State(directory): State<Directory>, Path(cep): Path<String>) -> Response {
    if cep.len() != 8 || !cep.bytes().all(|b| b.is_ascii_digit()) {
        debug!(%cep, "rejecting malformed CEP");
        return StatusCode::BAD_REQUEST.into_response();
    }
    match directory.get(&cep) {
        Some(address) => Json(address.clone()).into_response(),
        None => Json(serde_json::json!({ "erro": true })).into_response(),
    }
}

pub fn fixtures() -> Vec<Address> {
    vec![
        Address {
            cep: "01001-000".into(),
            logradouro: "Praça da Sé".into(),
            complemento: "lado ímpar".into(),
            bairro: "Sé".into(),
            localidade: "São Paulo".into(),
            uf: "SP".into(),
            ibge: "3550308".into(),
            gia: "1004".into(),
            ddd: "11".into(),
            siafi: "7107".into(),
        },
        Address {
            cep: "20010-000".into(),
            logradouro: "Rua Primeiro de Março".into(),
            complemento: String::new(),
            bairro: "Centro".into(),
            localidade: "Rio de Janeiro".into(),
            uf: "RJ".into(),
            ibge: "3304557".into(),
            gia: String::new(),
            ddd: "21".into(),
            siafi: "6001".into(),
        },
        Address {
            cep: "70040-010".into(),
            logradouro: "Setor Bancário Sul Quadra 1".into(),
            complemento: String::new(),
            bairro: "Asa Sul".into(),
            localidade: "Brasília".into(),
            uf: "DF".into(),
            ibge: "5300108".into(),
            gia: String::new(),
            ddd: "61".into(),
            siafi: "9701".into(),
        },
    ]
}

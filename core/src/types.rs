//! Domain records for the ViaCEP API.
//!
//! # Design
//! Field names are English; the JSON keys the service sends are mapped with
//! per-field `serde(rename)`. Every field defaults to an empty string because
//! the service omits or blanks fields that do not apply to a given CEP (for
//! example `gia` outside São Paulo). Keys the service adds beyond these ten
//! (`unidade`, `estado`, `regiao`) are ignored.
//!
//! The mock-server crate defines its own copy of this schema; integration tests
//! catch any drift between the two.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A Brazilian address returned by a successful CEP lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Address {
    /// Postal code in display form, `XXXXX-XXX`.
    pub cep: String,
    #[serde(rename = "logradouro")]
    pub street: String,
    #[serde(rename = "complemento")]
    pub complement: String,
    #[serde(rename = "bairro")]
    pub neighborhood: String,
    #[serde(rename = "localidade")]
    pub city: String,
    /// Two-letter state code (UF).
    #[serde(rename = "uf")]
    pub state_code: String,
    /// IBGE municipality code.
    #[serde(rename = "ibge")]
    pub ibge_code: String,
    /// São Paulo state tax (GIA) code; empty elsewhere.
    #[serde(rename = "gia")]
    pub gia_code: String,
    /// Telephone area code (DDD).
    #[serde(rename = "ddd")]
    pub area_code: String,
    /// Federal SIAFI municipality code.
    #[serde(rename = "siafi")]
    pub siafi_code: String,
}

/// Renders the ten fields as labeled lines, one per field.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CEP: {}", self.cep)?;
        writeln!(f, "Logradouro: {}", self.street)?;
        writeln!(f, "Complemento: {}", self.complement)?;
        writeln!(f, "Bairro: {}", self.neighborhood)?;
        writeln!(f, "Localidade: {}", self.city)?;
        writeln!(f, "UF: {}", self.state_code)?;
        writeln!(f, "IBGE: {}", self.ibge_code)?;
        writeln!(f, "GIA: {}", self.gia_code)?;
        writeln!(f, "DDD: {}", self.area_code)?;
        write!(f, "SIAFI: {}", self.siafi_code)
    }
}

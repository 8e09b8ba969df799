use std::fmt::Formatter;
use std::str::FromStr;

use log::info;
use reqwest::Client;

use crate::lookup::error::LookupError;
use crate::lookup::models::{Address, BrasilApiAddress, ViaCepAddress};

pub mod error;
pub mod models;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    BrasilApi,
    ViaCep,
}

impl Provider {
    pub fn name(&self) -> &'static str {
        match self {
            Provider::BrasilApi => "BrasilApi",
            Provider::ViaCep => "ViaCep",
        }
    }

    /// Decodes a response body into this provider's record shape.
    pub fn decode(&self, body: &[u8]) -> Result<Address, LookupError> {
        let address = match self {
            Provider::BrasilApi => {
                Address::BrasilApi(serde_json::from_slice::<BrasilApiAddress>(body)?)
            },
            Provider::ViaCep => {
                Address::ViaCep(serde_json::from_slice::<ViaCepAddress>(body)?)
            },
        };
        Ok(address)
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brasilapi" => Ok(Provider::BrasilApi),
            "viacep" => Ok(Provider::ViaCep),
            _ => Err(s.trim().to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub provider: Provider,
    pub base_url: String,
    pub suffix: String,
}

impl Endpoint {
    pub fn url(&self, postal_code: &str) -> String {
        format!("{}{}{}", self.base_url, postal_code, self.suffix)
    }
}

/// Performs a single lookup against `endpoint`. No retries.
pub async fn lookup(
    client: &Client,
    endpoint: &Endpoint,
    postal_code: &str,
    check_status: bool
) -> Result<Address, LookupError> {
    let url = endpoint.url(postal_code);
    info!("Fetching {} at {}", endpoint.provider, url);

    let resp = client
        .get(&url)
        .send()
        .await
        .map_err(LookupError::Network)?;

    let status = resp.status();
    if check_status && !status.is_success() {
        return Err(LookupError::Status(status.as_u16()));
    }

    let body = resp
        .bytes()
        .await
        .map_err(LookupError::Read)?;

    info!("{} answered with status {} ({} bytes)", endpoint.provider, status, body.len());
    endpoint.provider.decode(&body)
}

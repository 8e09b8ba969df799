use serde::{Deserialize, Deserializer, Serialize};

use crate::lookup::Provider;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrasilApiAddress {
    #[serde(deserialize_with = "null_as_empty")]
    pub cep: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub state: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub city: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub neighborhood: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub street: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub service: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViaCepAddress {
    #[serde(deserialize_with = "null_as_empty")]
    pub cep: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub logradouro: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub complemento: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub bairro: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub localidade: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub uf: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ibge: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub gia: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub ddd: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub siafi: String,
}

/// Reads a string field, treating `null` the same as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
    where D: Deserializer<'de>
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// An address as returned by whichever provider answered.
///
/// Serialized untagged so the printed JSON is the provider's own record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Address {
    BrasilApi(BrasilApiAddress),
    ViaCep(ViaCepAddress),
}

impl Address {
    pub fn provider(&self) -> Provider {
        match self {
            Address::BrasilApi(_) => Provider::BrasilApi,
            Address::ViaCep(_) => Provider::ViaCep,
        }
    }
}

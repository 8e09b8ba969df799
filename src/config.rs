use std::env;
use std::fmt::Formatter;
use std::time::Duration;

use dotenv::dotenv;
use lazy_static::lazy_static;
use regex::Regex;

use crate::lookup::{Endpoint, Provider};

const DEFAULT_POSTAL_CODE: &str = "86050070";
const DEFAULT_TIMEOUT_MS: u64 = 1000;
// Upper bound on the race deadline; the runtime timer rejects very large ones
const MAX_TIMEOUT_MS: u64 = 24 * 3600 * 1000;
const BRASIL_API_BASE_URL: &str = "https://brasilapi.com.br/api/cep/v1/";
const VIA_CEP_BASE_URL: &str = "http://viacep.com.br/ws/";
const VIA_CEP_FORMAT: &str = "/json";

lazy_static! {
    static ref POSTAL_CODE: Regex = Regex::new(r"^([0-9]{5})-?([0-9]{3})$")
        .expect("Could not create postal code regex");
}

#[derive(Debug, PartialEq)]
pub enum ConfigError {
    InvalidPostalCode(String),
    InvalidNumber { var: &'static str, value: String },
    InvalidFlag { var: &'static str, value: String },
    UnknownProvider(String),
    NoProviders,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let msg = match self {
            ConfigError::InvalidPostalCode(value) => {
                format!("'{}' is not a valid postal code (expected 8 digits)", value)
            },
            ConfigError::InvalidNumber { var, value } => {
                format!("{} must be an integer no larger than {}, got '{}'", var, MAX_TIMEOUT_MS, value)
            },
            ConfigError::InvalidFlag { var, value } => {
                format!("{} must be true or false, got '{}'", var, value)
            },
            ConfigError::UnknownProvider(name) => {
                format!("Unknown provider '{}'", name)
            },
            ConfigError::NoProviders => {
                "At least one provider must be enabled".into()
            },
        };
        write!(f, "Config error: {}", msg)
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub postal_code: String,
    pub deadline: Duration,
    /// Treat non-2xx responses as failed lookups
    pub check_status: bool,
    pub endpoints: Vec<Endpoint>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            postal_code: DEFAULT_POSTAL_CODE.to_string(),
            deadline: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            check_status: false,
            endpoints: vec![
                endpoint(Provider::BrasilApi, BRASIL_API_BASE_URL, ""),
                endpoint(Provider::ViaCep, VIA_CEP_BASE_URL, VIA_CEP_FORMAT),
            ],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        dotenv().ok();
        Config::from_vars(|name| env::var(name).ok())
    }

    /// Builds the config from defaults, overridden by whatever `var` returns.
    pub fn from_vars<F>(var: F) -> Result<Config, ConfigError>
        where F: Fn(&str) -> Option<String>
    {
        let postal_code = match var("CEP_POSTAL_CODE") {
            Some(value) => normalize_postal_code(&value)?,
            None => DEFAULT_POSTAL_CODE.to_string(),
        };

        let timeout_ms = match var("CEP_TIMEOUT_MS") {
            Some(value) => match value.trim().parse::<u64>() {
                Ok(ms) if ms <= MAX_TIMEOUT_MS => ms,
                _ => return Err(ConfigError::InvalidNumber { var: "CEP_TIMEOUT_MS", value }),
            },
            None => DEFAULT_TIMEOUT_MS,
        };

        let check_status = match var("CEP_CHECK_STATUS") {
            Some(value) => parse_flag("CEP_CHECK_STATUS", value)?,
            None => false,
        };

        let providers = match var("CEP_PROVIDERS") {
            Some(value) => parse_providers(&value)?,
            None => vec![Provider::BrasilApi, Provider::ViaCep],
        };

        let endpoints = providers
            .into_iter()
            .map(|provider| match provider {
                Provider::BrasilApi => endpoint(
                    provider,
                    &var("BRASIL_API_URL").unwrap_or_else(|| BRASIL_API_BASE_URL.to_string()),
                    ""
                ),
                Provider::ViaCep => endpoint(
                    provider,
                    &var("VIA_CEP_URL").unwrap_or_else(|| VIA_CEP_BASE_URL.to_string()),
                    &var("VIA_CEP_FORMAT").unwrap_or_else(|| VIA_CEP_FORMAT.to_string())
                ),
            })
            .collect();

        Ok(Config {
            postal_code,
            deadline: Duration::from_millis(timeout_ms),
            check_status,
            endpoints,
        })
    }
}

fn endpoint(provider: Provider, base_url: &str, suffix: &str) -> Endpoint {
    Endpoint {
        provider,
        base_url: base_url.to_owned(),
        suffix: suffix.to_owned(),
    }
}

/// Accepts `86050070` or `86050-070` and returns the 8 bare digits.
pub fn normalize_postal_code(value: &str) -> Result<String, ConfigError> {
    let captures = POSTAL_CODE
        .captures(value.trim())
        .ok_or_else(|| ConfigError::InvalidPostalCode(value.to_owned()))?;
    Ok(format!("{}{}", &captures[1], &captures[2]))
}

fn parse_flag(var: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidFlag { var, value }),
    }
}

fn parse_providers(value: &str) -> Result<Vec<Provider>, ConfigError> {
    let mut providers = Vec::new();
    for name in value.split(',').filter(|name| !name.trim().is_empty()) {
        let provider = name
            .parse::<Provider>()
            .map_err(ConfigError::UnknownProvider)?;
        if !providers.contains(&provider) {
            providers.push(provider);
        }
    }
    if providers.is_empty() {
        return Err(ConfigError::NoProviders);
    }
    Ok(providers)
}

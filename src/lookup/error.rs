use std::fmt::Formatter;

use crate::lookup::Provider;

#[derive(Debug)]
pub enum LookupError {
    /// Connection or transport failure while sending the request
    Network(reqwest::Error),
    /// Response arrived but its body could not be read
    Read(reqwest::Error),
    /// Body was not a valid payload for the provider
    Decode(serde_json::Error),
    /// Non-2xx status, only reported when status checking is enabled
    Status(u16),
}

impl std::fmt::Display for LookupError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            LookupError::Network(inner) => {
                write!(f, "network error: {}", inner)
            },
            LookupError::Read(inner) => {
                write!(f, "could not read response body: {}", inner)
            },
            LookupError::Decode(inner) => {
                write!(f, "invalid response payload: {}", inner)
            },
            LookupError::Status(code) => {
                write!(f, "unexpected status code {}", code)
            },
        }
    }
}

impl std::error::Error for LookupError {}

impl From<serde_json::Error> for LookupError {
    fn from(error: serde_json::Error) -> Self {
        LookupError::Decode(error)
    }
}

/// A lookup that did not produce an address, tagged with its service.
#[derive(Debug)]
pub struct Failure {
    pub provider: Provider,
    pub error: LookupError,
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

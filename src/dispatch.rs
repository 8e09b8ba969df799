use futures::FutureExt;
use log::{error, info};
use reqwest::Client;

use crate::config::Config;
use crate::lookup::error::Failure;
use crate::lookup::lookup;
use crate::lookup::models::Address;
use crate::race::{first_success, RaceOutcome};

const USER_AGENT: &str = concat!("cep-race/", env!("CARGO_PKG_VERSION"));

pub fn build_client() -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .build()
}

/// Looks the configured postal code up on every endpoint at once and keeps
/// the first address that comes back.
pub async fn dispatch(client: &Client, config: &Config) -> RaceOutcome<Address, Failure> {
    info!(
        "Racing {} provider(s) for postal code {} (deadline {} ms)",
        config.endpoints.len(),
        config.postal_code,
        config.deadline.as_millis()
    );

    let contenders = config.endpoints.iter().map(|endpoint| {
        lookup(client, endpoint, &config.postal_code, config.check_status)
            .map(move |result| result.map_err(|err| {
                let failure = Failure { provider: endpoint.provider, error: err };
                error!("Lookup failed on {}", failure);
                failure
            }))
    });

    let outcome = first_success(contenders, config.deadline).await;
    match &outcome {
        RaceOutcome::Winner { value, .. } => info!("{} answered first", value.provider()),
        RaceOutcome::Exhausted(failures) => error!("All {} lookup(s) failed", failures.len()),
        RaceOutcome::TimedOut(_) => error!("No provider answered within {} ms", config.deadline.as_millis()),
    }
    outcome
}

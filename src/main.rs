use std::io;

use env_logger::Env;
use log::error;

use crate::config::Config;
use crate::dispatch::{build_client, dispatch};
use crate::output::render;

mod config;
mod dispatch;
mod lookup;
mod output;
mod race;

#[actix_rt::main]
async fn main() -> io::Result<()> {
    env_logger::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|err| {
        error!("{}", err);
        io::Error::new(io::ErrorKind::InvalidInput, err)
    })?;

    let client = build_client().map_err(|err| {
        error!("Error while building HTTP client: {}", err);
        io::Error::new(io::ErrorKind::Other, err)
    })?;

    let outcome = dispatch(&client, &config).await;
    for line in render(&outcome) {
        println!("{}", line);
    }

    Ok(())
}

#![warn(clippy::all, rust_2018_idioms)]

use clap::Parser;
use pubsubcalc::{config::Config, error::ServerError};

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    let config = Config::parse();

    pubsubcalc::start_server(config).await
}

mod cli_args;
mod client;
mod config;
mod dashboard;
mod error;
mod utils;

use crate::{cli_args::CliArgs, error::Error};
use clap::Parser;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode, Error> {
    CliArgs::parse().run().await
}

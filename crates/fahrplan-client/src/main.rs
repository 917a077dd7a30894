//! fahrplan CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use fahrplan_core::tracing::{TracingConfig, init_tracing};

use fahrplan_client::app;
use fahrplan_client::cli::Cli;
use fahrplan_client::config::ClientConfig;
use fahrplan_client::error::{ClientError, ClientResult};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> ClientResult<()> {
    let config = if let Some(ref path) = cli.config {
        ClientConfig::load_from(path).map_err(ClientError::Config)?
    } else {
        ClientConfig::load().map_err(ClientError::Config)?
    };

    for line in app::run(cli, &config)? {
        println!("{}", line);
    }
    Ok(())
}

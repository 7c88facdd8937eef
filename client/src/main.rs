//! `barber` entry-point: loads settings, wires adapters and runs one command.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use barber_client::ClientSettings;
use barber_client::inbound::cli::{Cli, ClientApp, ClientPorts};
use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let cli = Cli::parse();
    // argv belongs to the subcommands.
    let settings = ClientSettings::load_from_iter([OsString::from("barber")])
        .map_err(|error| eyre!("load client settings: {error}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let ports = ClientPorts::from_settings(&settings, runtime.handle().clone())?;
    let app = ClientApp::new(ports);

    let status = runtime.block_on(app.run(cli.command, &mut io::stdout().lock()))?;
    Ok(status.into())
}

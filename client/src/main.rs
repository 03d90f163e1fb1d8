//! `complaint-desk` entry-point: loads settings, wires the HTTP adapters, and
//! runs one command against the backend.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use complaint_desk::config::ClientSettings;
use complaint_desk::inbound::cli::{self, App, CliArgs};
use complaint_desk::outbound::attachment_file::read_attachment;
use complaint_desk::outbound::http::{ApiClient, HttpComplaintApi, HttpUserApi};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = ClientSettings::load_layered()?.with_api_base_url(args.api_base_url.clone());
    let api_base = settings.api_base_url()?;
    let asset_base = settings.asset_base_url()?;
    info!(api = %api_base, assets = %asset_base, "using backend");

    let attachment = args
        .command
        .attachment_path()
        .map(|path| {
            read_attachment(path).wrap_err_with(|| format!("read attachment '{}'", path.display()))
        })
        .transpose()?;

    let client = Arc::new(ApiClient::new(api_base).wrap_err("create HTTP client")?);
    let app = App::new(
        Arc::new(HttpComplaintApi::new(Arc::clone(&client))),
        Arc::new(HttpUserApi::new(client)),
        asset_base,
    );

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("create Tokio runtime")?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failed = runtime.block_on(cli::execute(&app, args.command, attachment, &mut out))?;

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

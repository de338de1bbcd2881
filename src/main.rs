use anyhow::Context;
use clap::Parser;
use colored::*;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use epo_remote::cli::Cli;
use epo_remote::commands::{run_action, run_query, ActionRequest};
use epo_remote::config::{Config, Settings};
use epo_remote::error::EpoError;
use epo_remote::ui::{create_spinner, fail_spinner, print_error, print_records, print_result};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG가 있으면 그쪽이 우선
    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<EpoError>() {
                Some(epo) if !matches!(epo, EpoError::Config(_)) => print_error(epo),
                _ => eprintln!("{} {:#}", "[X]".red().bold(), e),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    if cli.init_config {
        let path = Config::init().context("failed to write default config")?;
        eprintln!("{} Wrote {}", "[OK]".green(), path.display());
        return Ok(());
    }

    let config = Config::load().context("failed to load config")?;
    let settings = Settings::resolve(&cli, &config)?;
    debug!(domain = %settings.domain, user = %settings.credentials.username, "settings resolved");

    if let Some(action) = &cli.action {
        let request = ActionRequest::from_strings(action.as_str(), &cli.params, &cli.args);
        let spinner = create_spinner(&format!("Running {}...", action));
        match run_action(&settings, &request).await {
            Ok(result) => {
                spinner.finish_and_clear();
                print_result(&result);
            }
            Err(e) => {
                fail_spinner(&spinner, &format!("{} failed", action));
                return Err(e.into());
            }
        }
        return Ok(());
    }

    let spinner = create_spinner("Running query...");
    match run_query(&settings).await {
        Ok(records) => {
            spinner.finish_and_clear();
            print_records(&records);
            Ok(())
        }
        Err(e) => {
            fail_spinner(&spinner, "Query failed");
            Err(e.into())
        }
    }
}

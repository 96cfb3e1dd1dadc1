#![allow(clippy::print_stdout)]

mod args;
mod commands;

use anyhow::Context;
use args::Cli;
use clap::Parser;
use commands::Output;
use std::process::ExitCode;
use tforge::domain::config::AppConfig;
use tforge::features::deployment::Registry;
use tforge::features::management::ContractScreen;
use tforge::kernel::config::load_config_or_default;
use tforge_logger::Logger;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cfg: AppConfig =
        load_config_or_default(cli.config.as_deref()).context("Critical: Configuration is malformed")?;

    let _log = Logger::from_config(env!("CARGO_BIN_NAME"), &cfg.logging)?;

    let registry = Registry::load(&cfg.catalog).context("Feature catalog rejected")?;

    let screen = ContractScreen::from_config(&cfg.security);

    commands::run(cli.command, &registry, &screen, &Output::new(cli.json))
}

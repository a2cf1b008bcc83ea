mod cli;
mod commands;
mod paths;
mod ui;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Mode};
use inventory::HostLookup;
use std::io::{self, Write};
use std::process::ExitCode;
use tfstate::State;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            ui::error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "tfinventory", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let path = paths::state_path(cli.state.as_deref());
    let state = State::load(&path)
        .with_context(|| format!("Failed to load state from {}", path.display()))?;

    let mut stdout = io::stdout().lock();
    let code = match cli.mode() {
        Mode::List => {
            commands::list::run(&mut stdout, &state, &cli.ansible_config())?;
            ExitCode::SUCCESS
        }
        Mode::Inventory => {
            commands::inventory::run(&mut stdout, &state)?;
            ExitCode::SUCCESS
        }
        Mode::Host(hostname) => match commands::host::run(&mut stdout, &state, hostname)? {
            HostLookup::Found => ExitCode::SUCCESS,
            HostLookup::NotFound => ExitCode::FAILURE,
        },
    };
    stdout.flush().context("Error writing inventory")?;

    Ok(code)
}

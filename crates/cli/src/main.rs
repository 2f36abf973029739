// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! h5 - H5 Helper session registry CLI

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

mod color;
mod commands;
mod env;
mod exit_error;
mod logging;
mod output;
mod setup;
mod table;

use output::OutputFormat;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use commands::{demo, session, shell};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "h5",
    version,
    about = "H5 Helper - Game analysis session registry"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Config file with seed sessions (overrides H5_CONFIG)
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect configured sessions
    Session(session::SessionArgs),
    /// Run registry commands from stdin or a script
    Shell(shell::ShellArgs),
    /// Run the two-session walkthrough on an empty registry
    Demo,
}

fn cli_command() -> clap::Command {
    Cli::command()
}

fn main() {
    logging::setup_logging();

    if let Err(e) = run() {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains the source error text, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    match command {
        Commands::Session(args) => {
            let registry = setup::load_registry(cli.config.as_deref())?;
            session::handle(args.command, &registry, format)?
        }
        Commands::Shell(args) => {
            let registry = setup::load_registry(cli.config.as_deref())?;
            shell::handle(args, registry, format)?
        }
        // The walkthrough always starts empty so its output is predictable.
        Commands::Demo => demo::handle(format)?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

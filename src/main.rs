//! Summon CLI - fetch, compile and cache units on demand
//!
//! Usage: summon <COMMAND>
//!
//! Commands:
//!   resolve       Look up a unit, fetching and compiling it on a miss
//!   compile       Compile source files as one batch
//!   exists        Check whether a unit is already compiled
//!   check-config  Validate the configuration

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Resolve { name, output } => {
            commands::resolve::cmd_resolve(config, &name, output.as_deref(), cli.json)?;
        }
        Commands::Compile {
            files,
            root,
            out_dir,
        } => {
            commands::compile::cmd_compile(config, &files, &root, out_dir.as_deref(), cli.json)?;
        }
        Commands::Exists { name } => {
            if !commands::exists::cmd_exists(config, &name, cli.json)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::CheckConfig => commands::check_config::cmd_check_config(config, cli.json)?,
    }

    Ok(ExitCode::SUCCESS)
}

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Summon - fetch, compile and cache units on demand
#[derive(Parser, Debug)]
#[command(name = "summon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to ./summon.toml, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for CI (NDJSON engine events on stderr)
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a compiled unit, fetching and compiling it on a miss
    Resolve {
        /// Qualified name, e.g. remote/algo/Sort
        name: String,

        /// Write the artifact payload to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compile source files as one batch, skipping units already compiled
    Compile {
        /// Source files; names are their paths relative to --root
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Directory the unit names are relative to
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Also write the produced artifacts here
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Check whether a unit is already compiled (never fetches)
    Exists {
        /// Qualified name
        name: String,
    },

    /// Validate the configuration and print the effective settings
    CheckConfig,
}

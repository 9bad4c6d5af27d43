//! citefetch - Fetch citation metadata for PubMed ids
//!
//! Resolves a list of PubMed ids through the Semantic Scholar Graph API
//! and writes a flat JSON summary of each paper.

use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "citefetch")]
#[command(about = "Fetch Semantic Scholar metadata for PubMed ids")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file path (default: ./citefetch.toml or ~/.config/citefetch/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch papers for a list of PubMed ids and write them as JSON
    Fetch(cmd::fetch::FetchArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = Arc::new(citefetch_core::ProgressContext::new());
    let multi = progress.is_tty().then(|| progress.multi());
    citefetch_core::init_logging(
        citefetch_core::Verbosity::from_flags(cli.quiet, cli.debug),
        multi,
    );

    let config = match cli.config {
        Some(path) => Config::from_file(&path)?,
        None => Config::load()?,
    };

    match cli.command {
        Command::Fetch(args) => cmd::fetch::run(args, &config, &progress),
        Command::Config => cmd::show_config::run(&config),
    }
}

//! Fetch subcommand - resolve a PubMed id list through Semantic Scholar

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use citefetch_core::SharedProgress;
use citefetch_semantic_scholar::config::parse_param;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct FetchArgs {
    /// File with one PubMed id per line
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// JSON file to write (overwritten)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Ids per batch request (1-100)
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Extra query parameter for every batch request (repeatable)
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Batch endpoint URL
    #[arg(long)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds (default: none)
    #[arg(long)]
    pub timeout: Option<u64>,
}

impl FetchArgs {
    /// Merge with file config: flags win, then config file, then defaults.
    fn into_run_args(self, config: &Config) -> citefetch_semantic_scholar::FetchArgs {
        citefetch_semantic_scholar::FetchArgs {
            input: self.input.unwrap_or_else(|| config.paths.input.clone()),
            output: self.output.unwrap_or_else(|| config.paths.output.clone()),
            batch_url: self.api_url.unwrap_or_else(|| config.s2.batch_url.clone()),
            api_key: config.s2.api_key.clone(),
            batch_size: self.batch_size.unwrap_or(config.s2.batch_size),
            params: self.params,
            timeout_secs: self.timeout.or(config.http.timeout_secs),
        }
    }
}

pub fn run(args: FetchArgs, config: &Config, progress: &SharedProgress) -> Result<()> {
    let run_config = citefetch_semantic_scholar::Config::try_from(args.into_run_args(config))
        .context("Invalid fetch configuration")?;
    log::debug!(
        "input={}, output={}, endpoint={}, batch_size={}",
        run_config.input.display(),
        run_config.output.display(),
        run_config.batch_url,
        run_config.batch_size
    );

    let mut stdout = std::io::stdout().lock();
    citefetch_semantic_scholar::run(&run_config, progress, &mut stdout)?;
    Ok(())
}

//! Fetch run configuration

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use crate::api::{BatchQuery, DEFAULT_BATCH_URL, MAX_BATCH_SIZE};

/// Default list of PubMed ids, one per line
pub const DEFAULT_INPUT: &str = "bulk_get_papers_by_pmid/pmid-p53-set.txt";

/// Default JSON output path
pub const DEFAULT_OUTPUT: &str = "papers_data.json";

/// Fields requested for every paper
pub const PAPER_FIELDS: &str =
    "externalIds,title,authors,year,citationCount,fieldsOfStudy,publicationDate";

/// Namespace tag prepended to every input line
pub const ID_PREFIX: &str = "PMID:";

/// Caller-facing arguments for a fetch run (plain struct, no clap derive).
#[derive(Debug)]
pub struct FetchArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub batch_url: String,
    pub api_key: Option<String>,
    pub batch_size: usize,
    pub params: Vec<(String, String)>,
    pub timeout_secs: Option<u64>,
}

impl Default for FetchArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            batch_url: DEFAULT_BATCH_URL.to_string(),
            api_key: None,
            batch_size: MAX_BATCH_SIZE,
            params: Vec::new(),
            timeout_secs: None,
        }
    }
}

/// Validated runtime configuration for one fetch run
#[derive(Debug)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub batch_url: String,
    /// Empty when no key was supplied
    pub api_key: String,
    pub batch_size: NonZeroUsize,
    pub query: BatchQuery,
    pub timeout: Option<Duration>,
}

impl TryFrom<FetchArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: FetchArgs) -> Result<Self, Self::Error> {
        let batch_size = NonZeroUsize::new(args.batch_size)
            .ok_or_else(|| anyhow::anyhow!("Batch size must be at least 1"))?;
        anyhow::ensure!(
            batch_size.get() <= MAX_BATCH_SIZE,
            "Batch size {} exceeds the endpoint limit of {MAX_BATCH_SIZE}",
            batch_size
        );
        anyhow::ensure!(!args.batch_url.is_empty(), "Batch URL must not be empty");
        if let Some((key, _)) = args.params.iter().find(|(k, _)| k == "fields") {
            anyhow::bail!("Query parameter '{key}' is fixed and cannot be overridden");
        }

        let query = args
            .params
            .into_iter()
            .fold(BatchQuery::new(PAPER_FIELDS), |q, (k, v)| q.with_param(k, v));

        Ok(Self {
            input: args.input,
            output: args.output,
            batch_url: args.batch_url,
            api_key: args.api_key.unwrap_or_default(),
            batch_size,
            query,
            timeout: args.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Parse a `KEY=VALUE` query parameter
pub fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}

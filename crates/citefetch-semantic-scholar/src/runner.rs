//! Main execution logic for a fetch run

use std::collections::HashSet;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use citefetch_core::{HttpError, ProgressContext, fmt_num};

use crate::api::{RawPaper, Session};
use crate::config::{Config, ID_PREFIX};
use crate::papers::get_papers;
use crate::stats::{FetchSummary, citation_range};
use crate::transform::{PaperSummary, summarize};

/// Read ids, fetch every paper, write the JSON array and report.
///
/// Progress lines go to `out`. Nothing is written to `config.output` unless
/// every batch was fetched and every record projected. When no paper was
/// found the (empty) output is still written and the run fails.
pub fn run(
    config: &Config,
    progress: &ProgressContext,
    out: &mut impl Write,
) -> anyhow::Result<FetchSummary> {
    let start = Instant::now();

    let ids = read_ids(&config.input)?;
    writeln!(out, "Fetching data for {} papers...", ids.len())?;

    if config.api_key.is_empty() {
        log::warn!("No S2 API key set; requests go out with an empty key");
    }
    let session = Session::new(
        config.batch_url.as_str(),
        config.api_key.as_str(),
        config.timeout,
    )
    .context("Cannot create HTTP client")?;

    let stream = get_papers(session, &ids, config.batch_size, config.query.clone());
    let batches = stream.total_batches();
    log::info!(
        "requesting {} ids in {} batches of up to {}",
        fmt_num(ids.len()),
        fmt_num(batches),
        config.batch_size
    );
    let pb = progress.batch_bar("papers", batches);
    let (papers, not_found) = collect_summaries(stream.with_progress(pb.clone()))?;
    pb.finish_and_clear();

    write_output(&config.output, &papers)?;
    writeln!(
        out,
        "Wrote {} papers to {}",
        papers.len(),
        config.output.display()
    )?;

    let Some((min, max)) = citation_range(&papers) else {
        anyhow::bail!(
            "No papers found for any of the {} requested ids; citation range is undefined",
            ids.len()
        );
    };
    writeln!(out, "Citation range: {min} - {max}")?;

    let summary = FetchSummary {
        requested: ids.len(),
        batches,
        found: papers.len(),
        not_found,
        citation_range: Some((min, max)),
        output: config.output.clone(),
        elapsed: start.elapsed(),
    };
    if progress.is_tty() {
        summary.print();
    } else {
        summary.log();
    }
    Ok(summary)
}

/// Read the id file and prefix every line with the PubMed namespace.
pub fn read_ids(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    let ids = prefix_ids(&content);
    log::debug!("{}: {} ids", path.display(), ids.len());
    Ok(ids)
}

/// One id per line, trimmed. Blank and repeated lines are kept as-is.
fn prefix_ids(content: &str) -> Vec<String> {
    let raw: Vec<&str> = content.lines().map(str::trim).collect();

    let blank = raw.iter().filter(|l| l.is_empty()).count();
    if blank > 0 {
        log::warn!("{blank} blank lines in input are sent as empty ids");
    }
    let mut seen = HashSet::with_capacity(raw.len());
    let duplicates = raw.iter().filter(|l| !seen.insert(**l)).count();
    if duplicates > 0 {
        log::warn!("{duplicates} duplicate ids in input");
    }

    raw.into_iter()
        .map(|line| format!("{ID_PREFIX}{line}"))
        .collect()
}

/// Project every record in stream order, dropping `null`s.
///
/// Returns the summaries and how many records were `null`. The first fetch
/// or projection error aborts.
pub fn collect_summaries(
    papers: impl Iterator<Item = Result<RawPaper, HttpError>>,
) -> anyhow::Result<(Vec<PaperSummary>, usize)> {
    let mut summaries = Vec::new();
    let mut not_found = 0;
    for (i, paper) in papers.enumerate() {
        let paper = paper.context("Paper batch request failed")?;
        match summarize(&paper).with_context(|| format!("Malformed paper record #{i}"))? {
            Some(summary) => summaries.push(summary),
            None => not_found += 1,
        }
    }
    Ok((summaries, not_found))
}

fn write_output(path: &Path, papers: &[PaperSummary]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(papers).context("Cannot serialize papers")?;
    std::fs::write(path, json).with_context(|| format!("Cannot write {}", path.display()))?;
    log::debug!("wrote {} records to {}", papers.len(), path.display());
    Ok(())
}

//! Run statistics and reporting

use std::path::PathBuf;
use std::time::Duration;

use citefetch_core::fmt_num;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};

use crate::transform::PaperSummary;

/// Outcome of a completed fetch run
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSummary {
    /// Ids read from the input file
    pub requested: usize,
    /// Requests sent to the batch endpoint
    pub batches: usize,
    /// Records written to the output file
    pub found: usize,
    /// `null` slots in the responses
    pub not_found: usize,
    /// (min, max) citation count; `None` when nothing was found
    pub citation_range: Option<(u64, u64)>,
    pub output: PathBuf,
    pub elapsed: Duration,
}

impl FetchSummary {
    /// Log the summary (non-TTY mode).
    pub fn log(&self) {
        log::info!(
            "fetched {} / {} papers in {} batches ({} not found) [{:.1}s] -> {}",
            fmt_num(self.found),
            fmt_num(self.requested),
            fmt_num(self.batches),
            fmt_num(self.not_found),
            self.elapsed.as_secs_f64(),
            self.output.display()
        );
    }

    /// Print the summary as a table on stderr (TTY mode).
    pub fn print(&self) {
        eprintln!("\n{}", self.table());
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_header(vec![
                Cell::new("Papers").fg(Color::Cyan),
                Cell::new("Value").fg(Color::Cyan),
            ]);
        let range = match self.citation_range {
            Some((min, max)) => format!("{min} - {max}"),
            None => "-".to_string(),
        };
        let rows = [
            ("Requested", fmt_num(self.requested)),
            ("Batches", fmt_num(self.batches)),
            ("Found", fmt_num(self.found)),
            ("Not found", fmt_num(self.not_found)),
            ("Citations", range),
            ("Output", self.output.display().to_string()),
            ("Elapsed", format!("{:.1}s", self.elapsed.as_secs_f64())),
        ];
        for (label, value) in rows {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
        table
    }
}

/// Lowest and highest citation count, `None` for an empty slice.
pub fn citation_range(papers: &[PaperSummary]) -> Option<(u64, u64)> {
    let counts = papers.iter().map(|p| p.citations);
    Some((counts.clone().min()?, counts.max()?))
}

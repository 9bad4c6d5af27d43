//! Citefetch S2 - Semantic Scholar paper batch fetcher
//!
//! Resolves PubMed ids through the Graph API batch endpoint and
//! flattens each paper into a fixed-schema summary record.

pub mod api;
pub mod config;
pub mod papers;
pub mod runner;
pub mod stats;
pub mod transform;

// Re-exports
pub use api::{BatchQuery, RawPaper, Session};
pub use config::{Config, FetchArgs};
pub use papers::{PaperStream, get_papers};
pub use runner::run;
pub use stats::FetchSummary;
pub use transform::{FieldError, PaperSummary, summarize};

//! Citefetch Core - Shared infrastructure for paper metadata fetchers
//!
//! Batching, blocking HTTP plumbing, logging and progress reporting
//! used by the source-specific crates.

pub mod batch;
pub mod http;
pub mod logging;
pub mod progress;

// Re-exports for convenience
pub use batch::{batch_count, batched};
pub use http::{HttpError, SHARED_RUNTIME, build_client};
pub use logging::{IndicatifLogger, Verbosity, init_logging};
pub use progress::{ProgressContext, SharedProgress, fmt_num};

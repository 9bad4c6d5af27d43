//! Lazy, batch-at-a-time stream of papers

use std::num::NonZeroUsize;

use citefetch_core::{HttpError, batch_count, batched};
use indicatif::ProgressBar;

use crate::api::{BatchQuery, RawPaper, Session};

/// Forward-only stream over the papers for a list of ids.
///
/// Owns the [`Session`] for its whole lifetime. A batch is requested only
/// once every record of the previous one has been handed out, so records come
/// out in input order, `null` placeholders included. The first failed batch
/// is reported once and ends the stream.
pub struct PaperStream {
    session: Session,
    query: BatchQuery,
    batches: std::vec::IntoIter<Vec<String>>,
    current: std::vec::IntoIter<RawPaper>,
    total_batches: usize,
    progress: ProgressBar,
    failed: bool,
}

impl PaperStream {
    pub fn new(
        session: Session,
        ids: &[String],
        batch_size: NonZeroUsize,
        query: BatchQuery,
    ) -> Self {
        let batches: Vec<Vec<String>> = batched(ids, batch_size).map(<[String]>::to_vec).collect();
        Self {
            session,
            query,
            batches: batches.into_iter(),
            current: Vec::new().into_iter(),
            total_batches: batch_count(ids.len(), batch_size),
            progress: ProgressBar::hidden(),
            failed: false,
        }
    }

    /// Advance `progress` by one for every batch fetched.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub fn total_batches(&self) -> usize {
        self.total_batches
    }

    fn fetch_next_batch(&mut self) -> Option<Result<(), HttpError>> {
        let batch = self.batches.next()?;
        let n = self.total_batches - self.batches.len();
        log::debug!("batch {n}/{}: requesting {} ids", self.total_batches, batch.len());
        match self.session.get_paper_batch(&batch, &self.query) {
            Ok(papers) => {
                self.progress.inc(1);
                self.current = papers.into_iter();
                Some(Ok(()))
            }
            Err(e) => {
                log::debug!("batch {n}/{} failed: {e}", self.total_batches);
                Some(Err(e))
            }
        }
    }
}

impl Iterator for PaperStream {
    type Item = Result<RawPaper, HttpError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(paper) = self.current.next() {
                return Some(Ok(paper));
            }
            if self.failed {
                return None;
            }
            match self.fetch_next_batch()? {
                Ok(()) => continue,
                Err(e) => {
                    self.failed = true;
                    self.progress.abandon();
                    return Some(Err(e));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for PaperStream {}

/// Open a session-backed stream over `ids`.
pub fn get_papers(
    session: Session,
    ids: &[String],
    batch_size: NonZeroUsize,
    query: BatchQuery,
) -> PaperStream {
    PaperStream::new(session, ids, batch_size, query)
}

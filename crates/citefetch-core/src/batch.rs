//! Order-preserving fixed-size batching

use std::num::NonZeroUsize;

/// Split `items` into contiguous batches of at most `batch_size` elements.
///
/// Every batch except possibly the last holds exactly `batch_size` items;
/// concatenating the batches in order yields `items` unchanged.
pub fn batched<T>(items: &[T], batch_size: NonZeroUsize) -> std::slice::Chunks<'_, T> {
    items.chunks(batch_size.get())
}

/// Number of batches `batched` produces for `len` items.
pub const fn batch_count(len: usize, batch_size: NonZeroUsize) -> usize {
    len.div_ceil(batch_size.get())
}

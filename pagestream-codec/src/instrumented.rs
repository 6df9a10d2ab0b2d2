//! Call-counting wrapper around a [`Decompressor`].
//!
//! The page reader promises that peeking at and skipping pages never pays
//! decompression cost. That promise is only checkable from outside if the
//! dispatch records how often it ran, so tests wrap the production
//! decompressor in [`InstrumentedDecompressor`] and assert on a
//! [`CodecStatsSnapshot`] afterwards.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use pagestream_result::Result;

use crate::{BlockDecompressor, Compression, Decompressor};

/// Thread-safe container for dispatch statistics.
#[derive(Debug, Default)]
pub struct CodecStats {
    /// Calls that reached a real codec backend.
    pub decompress_calls: AtomicU64,
    /// Calls satisfied by the `Uncompressed` identity fast path.
    pub identity_calls: AtomicU64,
    /// Compressed bytes handed to backends.
    pub compressed_bytes_in: AtomicU64,
    /// Uncompressed bytes produced by backends.
    pub uncompressed_bytes_out: AtomicU64,
    /// Calls that returned an error.
    pub failed_calls: AtomicU64,
}

impl CodecStats {
    /// Capture a point-in-time snapshot of the accumulated counters.
    pub fn snapshot(&self) -> CodecStatsSnapshot {
        CodecStatsSnapshot {
            decompress_calls: self.decompress_calls.load(Ordering::Relaxed),
            identity_calls: self.identity_calls.load(Ordering::Relaxed),
            compressed_bytes_in: self.compressed_bytes_in.load(Ordering::Relaxed),
            uncompressed_bytes_out: self.uncompressed_bytes_out.load(Ordering::Relaxed),
            failed_calls: self.failed_calls.load(Ordering::Relaxed),
        }
    }
}

/// Plain-value view of [`CodecStats`] for assertions and logging.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CodecStatsSnapshot {
    pub decompress_calls: u64,
    pub identity_calls: u64,
    pub compressed_bytes_in: u64,
    pub uncompressed_bytes_out: u64,
    pub failed_calls: u64,
}

impl CodecStatsSnapshot {
    /// Total dispatch invocations, identity path included.
    pub fn total_calls(&self) -> u64 {
        self.decompress_calls + self.identity_calls + self.failed_calls
    }
}

/// A [`Decompressor`] that forwards to an inner dispatch while counting
/// calls and bytes.
pub struct InstrumentedDecompressor<D: Decompressor = BlockDecompressor> {
    inner: D,
    stats: Arc<CodecStats>,
}

impl Default for InstrumentedDecompressor<BlockDecompressor> {
    fn default() -> Self {
        Self::new(BlockDecompressor)
    }
}

impl<D: Decompressor> InstrumentedDecompressor<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            stats: Arc::new(CodecStats::default()),
        }
    }

    /// Shared handle to the live counters. Clones observe the same totals,
    /// so a test can keep one handle while the reader owns the wrapper.
    pub fn stats(&self) -> Arc<CodecStats> {
        Arc::clone(&self.stats)
    }
}

impl<D: Decompressor> Decompressor for InstrumentedDecompressor<D> {
    fn decompress(
        &self,
        codec: Compression,
        input: &Bytes,
        uncompressed_size: usize,
    ) -> Result<Bytes> {
        match self.inner.decompress(codec, input, uncompressed_size) {
            Ok(out) => {
                if codec == Compression::Uncompressed {
                    self.stats.identity_calls.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.stats.decompress_calls.fetch_add(1, Ordering::Relaxed);
                    self.stats
                        .compressed_bytes_in
                        .fetch_add(input.len() as u64, Ordering::Relaxed);
                    self.stats
                        .uncompressed_bytes_out
                        .fetch_add(out.len() as u64, Ordering::Relaxed);
                }
                Ok(out)
            }
            Err(e) => {
                self.stats.failed_calls.fetch_add(1, Ordering::Relaxed);
                Err(e)
            }
        }
    }
}

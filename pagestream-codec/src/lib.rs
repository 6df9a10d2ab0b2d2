//! Block compression dispatch for the column-chunk read path.
//!
//! A column chunk fixes one codec for every page it contains; this crate maps
//! that codec identifier plus a compressed buffer and its expected expanded
//! size to the uncompressed bytes. The dispatch is stateless and
//! side-effect-free: it never looks inside page semantics, only at byte
//! buffers and sizes.
//!
//! Two call surfaces are provided:
//!
//! - Free functions [`compress`] and [`decompress`] for code that works with
//!   a fixed dispatch.
//! - The [`Decompressor`] trait for code that needs a seam, with
//!   [`BlockDecompressor`] as the production implementation and
//!   [`InstrumentedDecompressor`] as a call-counting wrapper used by tests
//!   to prove that peek/skip paths never pay decompression cost.

pub mod codec;
pub mod instrumented;

pub use codec::{Compression, compress, decompress};
pub use instrumented::{CodecStats, CodecStatsSnapshot, InstrumentedDecompressor};

use bytes::Bytes;
use pagestream_result::Result;

/// Decompression seam used by the page reader.
///
/// Implementations must be pure with respect to page semantics: the same
/// `(codec, input, uncompressed_size)` triple always produces the same bytes
/// or the same error.
pub trait Decompressor: Send + Sync {
    /// Expand `input` to exactly `uncompressed_size` bytes.
    fn decompress(
        &self,
        codec: Compression,
        input: &Bytes,
        uncompressed_size: usize,
    ) -> Result<Bytes>;
}

/// Stateless production dispatch; delegates to [`decompress`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BlockDecompressor;

impl Decompressor for BlockDecompressor {
    fn decompress(
        &self,
        codec: Compression,
        input: &Bytes,
        uncompressed_size: usize,
    ) -> Result<Bytes> {
        decompress(codec, input, uncompressed_size)
    }
}

use std::{fmt, io};
use thiserror::Error;

/// Unified error type for the pagestream crates.
///
/// The variants mirror the failure modes of the column-chunk read path:
/// protocol misuse by the caller, structural corruption in the page stream,
/// and codec-level decode failures. Each carries a human-readable message
/// with enough context (chunk, page index, codec) to diagnose the failure
/// without a debugger.
///
/// `Error` is `Send + Sync`, so a failed chunk read can cross thread
/// boundaries when a scan is split across workers.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error from a streaming codec backend.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The caller violated the page reader protocol.
    ///
    /// Raised when the dictionary page is read twice, when a data page is
    /// pulled before the dictionary on a dictionary-bearing chunk, or when
    /// the cursor is peeked or skipped past the end of the chunk. These are
    /// programming errors in the calling code, not data problems; fix the
    /// call sequence rather than retrying.
    #[error("protocol violation: {0}")]
    Precondition(String),

    /// The page stream does not have the structure the chunk metadata
    /// promised.
    ///
    /// Examples: the first page of a dictionary-bearing chunk is not a
    /// dictionary page, or a V2 data page claims level sections longer than
    /// its entire uncompressed payload. Treat as a corrupt-file signal.
    #[error("malformed column chunk: {0}")]
    Format(String),

    /// A compression codec rejected its input or produced output of the
    /// wrong length.
    ///
    /// Fatal for the chunk being read. Higher layers may fail the query or
    /// re-fetch at the file/split level; the read path itself never retries.
    #[error("decode failed: {0}")]
    Decode(String),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// Should never surface during normal operation.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap any displayable codec error as a [`Error::Decode`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pagestream_result::Error;
    ///
    /// let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
    /// let err = Error::decode(io_err);
    /// assert!(matches!(err, Error::Decode(msg) if msg.contains("truncated")));
    /// ```
    #[inline]
    pub fn decode<E: fmt::Display>(err: E) -> Self {
        Error::Decode(err.to_string())
    }
}

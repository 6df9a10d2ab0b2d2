//! Pull-based decoder for one column chunk's page stream.
//!
//! The reader wraps a peekable cursor over the chunk's compressed pages and
//! enforces the one ordering rule of the container format: when the chunk
//! has a dictionary page, it is physically first and must be consumed before
//! any data page is read, peeked, or skipped. Dictionary-coded data pages
//! are meaningless without the dictionary resolved, so the protocol fails
//! fast instead of letting a consumer misread undecoded dictionary indices.
//!
//! Peeking ([`PageReader::get_next_page`]) returns the next page still in
//! its compressed form. Page-level statistics travel in the header fields
//! next to the payload, so a consumer can judge a page's relevance against
//! its predicate and, via [`PageReader::skip_next_page`], reject it without
//! ever paying decompression cost. Decompression is typically far more
//! expensive than reading those fields, which is what makes
//! statistics-driven page pruning affordable.

use std::iter::Peekable;

use bytes::Bytes;
use pagestream_codec::{BlockDecompressor, Compression, Decompressor};
use pagestream_result::{Error, Result};
use tracing::trace;

use crate::page::{DataPage, DataPageV1, DataPageV2, DictionaryPage, Page};

/// Decodes the compressed page stream of one column chunk.
///
/// Constructed once per chunk, owned by a single consumer, and discarded
/// when the chunk is fully read or abandoned. Beyond the cursor it wraps,
/// the entire state is five scalars: the chunk codec, the two write-once
/// hints, the dictionary-read flag, and the data-page counter.
pub struct PageReader<I, D = BlockDecompressor>
where
    I: Iterator<Item = Page>,
    D: Decompressor,
{
    codec: Compression,
    /// Chunk label (column path) used to contextualize errors.
    chunk: String,
    compressed_pages: Peekable<I>,
    decompressor: D,
    has_dictionary_page: bool,
    has_only_dictionary_encoded_pages: bool,
    has_no_nulls: bool,
    dictionary_already_read: bool,
    data_page_read_count: usize,
}

impl<I> PageReader<I>
where
    I: Iterator<Item = Page>,
{
    /// Build a reader over `compressed_pages` using the production codec
    /// dispatch.
    ///
    /// `has_dictionary_page` is prior knowledge from the chunk metadata, not
    /// re-derived from the stream; the two hint flags are computed once from
    /// row-group statistics (see [`crate::statistics`]).
    pub fn new(
        codec: Compression,
        chunk: impl Into<String>,
        compressed_pages: I,
        has_dictionary_page: bool,
        has_only_dictionary_encoded_pages: bool,
        has_no_nulls: bool,
    ) -> Self {
        Self::with_decompressor(
            codec,
            chunk,
            compressed_pages,
            has_dictionary_page,
            has_only_dictionary_encoded_pages,
            has_no_nulls,
            BlockDecompressor,
        )
    }

    /// Build a reader straight from row-group column-chunk metadata,
    /// deriving both hint flags (see [`crate::statistics`]).
    ///
    /// `null_count` is the column's reported null total from row-group
    /// statistics; `encodings` and `encoding_stats` are the chunk's encoding
    /// census as written by the file.
    pub fn from_chunk_metadata(
        codec: Compression,
        chunk: impl Into<String>,
        compressed_pages: I,
        has_dictionary_page: bool,
        null_count: Option<u64>,
        encodings: &[crate::page::Encoding],
        encoding_stats: Option<&[crate::statistics::PageEncodingStats]>,
    ) -> Self {
        Self::new(
            codec,
            chunk,
            compressed_pages,
            has_dictionary_page,
            crate::statistics::only_dictionary_encoded(encodings, encoding_stats),
            crate::statistics::has_no_nulls(null_count),
        )
    }
}

impl<I, D> PageReader<I, D>
where
    I: Iterator<Item = Page>,
    D: Decompressor,
{
    /// Like [`PageReader::new`] but with an explicit decompression seam.
    /// Tests use this to count codec calls.
    pub fn with_decompressor(
        codec: Compression,
        chunk: impl Into<String>,
        compressed_pages: I,
        has_dictionary_page: bool,
        has_only_dictionary_encoded_pages: bool,
        has_no_nulls: bool,
        decompressor: D,
    ) -> Self {
        Self {
            codec,
            chunk: chunk.into(),
            compressed_pages: compressed_pages.peekable(),
            decompressor,
            has_dictionary_page,
            has_only_dictionary_encoded_pages,
            has_no_nulls,
            dictionary_already_read: false,
            data_page_read_count: 0,
        }
    }

    /// Row-group statistics reported exactly zero nulls for this column.
    pub fn has_no_nulls(&self) -> bool {
        self.has_no_nulls
    }

    /// Every data page in this chunk is dictionary-encoded.
    pub fn has_only_dictionary_encoded_pages(&self) -> bool {
        self.has_only_dictionary_encoded_pages
    }

    /// Whether pages actually carry compressed payloads. A coarse hint for
    /// consumers weighing peek/skip against reading directly.
    pub fn are_pages_compressed(&self) -> bool {
        self.codec != Compression::Uncompressed
    }

    /// Consume and decompress the chunk's dictionary page.
    ///
    /// `Ok(None)` when the chunk has no dictionary page; the stream is not
    /// touched in that case. Exactly-once semantics otherwise: a second
    /// call, or a call after any data page was read, is a protocol error.
    pub fn read_dictionary_page(&mut self) -> Result<Option<DictionaryPage>> {
        if !self.has_dictionary_page {
            return Ok(None);
        }
        if self.dictionary_already_read {
            return Err(Error::Precondition(format!(
                "dictionary page of column chunk '{}' was already read",
                self.chunk
            )));
        }
        if self.data_page_read_count != 0 {
            return Err(Error::Precondition(format!(
                "dictionary page of column chunk '{}' must be read first, \
                 but {} data pages were already read",
                self.chunk, self.data_page_read_count
            )));
        }
        let first_page = self.compressed_pages.next().ok_or_else(|| {
            Error::Format(format!(
                "column chunk '{}' promises a dictionary page but its page stream is empty",
                self.chunk
            ))
        })?;
        let dictionary = match first_page {
            Page::Dictionary(dictionary) => dictionary,
            other => {
                return Err(Error::Format(format!(
                    "dictionary page must be the first page in column chunk '{}' but got {}",
                    self.chunk,
                    other.name()
                )));
            }
        };
        let bytes = self.decompress(
            &dictionary.bytes,
            dictionary.uncompressed_size,
            "dictionary page",
        )?;
        self.dictionary_already_read = true;
        trace!(chunk = %self.chunk, values = dictionary.value_count, "read dictionary page");
        Ok(Some(DictionaryPage { bytes, ..dictionary }))
    }

    /// Consume and decompress the next data page.
    ///
    /// `Ok(None)` at the end of the chunk; exhaustion is the normal terminal
    /// signal, not an error. A V2 page that was written uncompressed passes
    /// through byte-identical.
    pub fn read_page(&mut self) -> Result<Option<DataPage>> {
        self.verify_dictionary_read("read a data page")?;
        let Some(page) = self.compressed_pages.next() else {
            return Ok(None);
        };
        let page_index = self.data_page_read_count;
        self.data_page_read_count += 1;
        let data = match page {
            Page::Data(data) => data,
            Page::Dictionary(_) => {
                return Err(Error::Format(format!(
                    "unexpected dictionary page amid the data pages of column chunk '{}'",
                    self.chunk
                )));
            }
        };
        trace!(chunk = %self.chunk, page_index, "read data page");
        match data {
            DataPage::V1(page) => {
                // Levels and values share one compressed payload.
                let bytes = self.decompress(
                    &page.bytes,
                    page.uncompressed_size,
                    &format!("data page {page_index}"),
                )?;
                Ok(Some(DataPage::V1(DataPageV1 { bytes, ..page })))
            }
            DataPage::V2(page) => {
                if !page.is_compressed {
                    return Ok(Some(DataPage::V2(page)));
                }
                // Level sections are stored as plaintext, so only the value
                // section expands; its true size is the page total minus the
                // level sections.
                let levels_len = page.repetition_levels.len() + page.definition_levels.len();
                let data_size =
                    page.uncompressed_size
                        .checked_sub(levels_len)
                        .ok_or_else(|| {
                            Error::Format(format!(
                                "data page {page_index} of column chunk '{}' carries {levels_len} \
                                 bytes of level sections but only {} bytes uncompressed in total",
                                self.chunk, page.uncompressed_size
                            ))
                        })?;
                let bytes = self.decompress(
                    &page.bytes,
                    data_size,
                    &format!("data page {page_index}"),
                )?;
                Ok(Some(DataPage::V2(DataPageV2 {
                    bytes,
                    is_compressed: false,
                    ..page
                })))
            }
        }
    }

    /// Whether the underlying page stream has at least one more page.
    pub fn has_next(&mut self) -> bool {
        self.compressed_pages.peek().is_some()
    }

    /// Look at the next data page without advancing and without
    /// decompressing.
    ///
    /// The returned page is still in its compressed form; only its header
    /// fields (counts, statistics) are meaningful. Calling past the end of
    /// the chunk is a protocol error, as consumers are expected to gate on
    /// [`PageReader::has_next`].
    pub fn get_next_page(&mut self) -> Result<&DataPage> {
        self.verify_dictionary_read("peek at a data page")?;
        match self.compressed_pages.peek() {
            Some(Page::Data(data)) => Ok(data),
            Some(Page::Dictionary(_)) => Err(Error::Format(format!(
                "unexpected dictionary page amid the data pages of column chunk '{}'",
                self.chunk
            ))),
            None => Err(Error::Precondition(format!(
                "peeked past the end of column chunk '{}'",
                self.chunk
            ))),
        }
    }

    /// Advance past the next page without decompressing it.
    ///
    /// The cheap rejection path for pages whose statistics (inspected via
    /// [`PageReader::get_next_page`]) rule them out.
    pub fn skip_next_page(&mut self) -> Result<()> {
        self.verify_dictionary_read("skip a data page")?;
        match self.compressed_pages.next() {
            Some(page) => {
                trace!(chunk = %self.chunk, page = page.name(), "skipped page");
                Ok(())
            }
            None => Err(Error::Precondition(format!(
                "skipped past the end of column chunk '{}'",
                self.chunk
            ))),
        }
    }

    fn verify_dictionary_read(&self, action: &str) -> Result<()> {
        if self.has_dictionary_page && !self.dictionary_already_read {
            return Err(Error::Precondition(format!(
                "cannot {action} of column chunk '{}' before its dictionary page is read",
                self.chunk
            )));
        }
        Ok(())
    }

    fn decompress(&self, input: &Bytes, uncompressed_size: usize, target: &str) -> Result<Bytes> {
        self.decompressor
            .decompress(self.codec, input, uncompressed_size)
            .map_err(|e| match e {
                Error::Decode(msg) => Error::Decode(format!(
                    "{target} of column chunk '{}' ({} codec): {msg}",
                    self.chunk, self.codec
                )),
                other => other,
            })
    }
}

//! Immutable page variants for one column chunk.
//!
//! The two data-page formats differ in which bytes are compressed: a V1 page
//! compresses levels and values together, while a V2 page always stores its
//! repetition/definition level sections as plaintext and only compresses the
//! value section. Modeling them as a sum type keeps every consumer honest
//! about that difference through exhaustive matching.
//!
//! Payloads are [`Bytes`] so that cloning a page, passing the V2 level
//! slices through a decode, or taking the identity path for an uncompressed
//! chunk never copies buffer contents.

use bytes::Bytes;

use crate::statistics::PageStatistics;

/// Value/level encoding identifier carried in page headers.
///
/// Only the container protocol cares about these here: the reader uses them
/// to tell dictionary-coded chunks apart, and carries them through to the
/// value decoder untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Encoding {
    Plain,
    PlainDictionary,
    Rle,
    BitPacked,
    DeltaBinaryPacked,
    DeltaLengthByteArray,
    DeltaByteArray,
    RleDictionary,
    ByteStreamSplit,
}

/// The optional page holding the distinct values referenced by
/// dictionary-encoded data pages. Physically first in the chunk when
/// present.
#[derive(Clone, Debug, PartialEq)]
pub struct DictionaryPage {
    pub bytes: Bytes,
    pub uncompressed_size: usize,
    pub value_count: u32,
    pub encoding: Encoding,
}

/// Format-1 data page: levels and values compressed as one payload.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPageV1 {
    pub bytes: Bytes,
    pub uncompressed_size: usize,
    pub value_count: u32,
    /// Row index of the page's first row within the row group, when an
    /// offset index was available to supply it.
    pub first_row_index: Option<u64>,
    pub repetition_level_encoding: Encoding,
    pub definition_level_encoding: Encoding,
    pub value_encoding: Encoding,
}

/// Format-2 data page: explicit row/null counts, level sections stored as
/// plaintext ahead of the (possibly compressed) value section, and optional
/// inline statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct DataPageV2 {
    pub row_count: u32,
    pub null_count: u32,
    pub value_count: u32,
    /// Never compressed, whatever the chunk codec says.
    pub repetition_levels: Bytes,
    /// Never compressed, whatever the chunk codec says.
    pub definition_levels: Bytes,
    pub data_encoding: Encoding,
    /// The value section only; levels live in their own fields.
    pub bytes: Bytes,
    /// Total uncompressed size of the page, level sections included.
    pub uncompressed_size: usize,
    pub first_row_index: Option<u64>,
    pub statistics: Option<PageStatistics>,
    /// Some writers emit plaintext V2 value sections even when the chunk
    /// codec is not `Uncompressed`; false means `bytes` is already usable.
    pub is_compressed: bool,
}

/// Either physical data-page format.
#[derive(Clone, Debug, PartialEq)]
pub enum DataPage {
    V1(DataPageV1),
    V2(DataPageV2),
}

impl DataPage {
    pub fn value_count(&self) -> u32 {
        match self {
            DataPage::V1(page) => page.value_count,
            DataPage::V2(page) => page.value_count,
        }
    }

    pub fn first_row_index(&self) -> Option<u64> {
        match self {
            DataPage::V1(page) => page.first_row_index,
            DataPage::V2(page) => page.first_row_index,
        }
    }

    /// Inline statistics, present only on V2 pages whose writer recorded
    /// them. This is what peek-driven page pruning inspects.
    pub fn statistics(&self) -> Option<&PageStatistics> {
        match self {
            DataPage::V1(_) => None,
            DataPage::V2(page) => page.statistics.as_ref(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DataPage::V1(_) => "data page v1",
            DataPage::V2(_) => "data page v2",
        }
    }
}

/// Any page of a column chunk, as yielded by the compressed page source.
#[derive(Clone, Debug, PartialEq)]
pub enum Page {
    Dictionary(DictionaryPage),
    Data(DataPage),
}

impl Page {
    pub fn name(&self) -> &'static str {
        match self {
            Page::Dictionary(_) => "dictionary page",
            Page::Data(page) => page.name(),
        }
    }
}

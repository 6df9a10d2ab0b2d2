//! Column-chunk page decoding for the columnar read path.
//!
//! A column chunk arrives as an ordered stream of compressed, framed pages:
//! at most one dictionary page followed by data pages in one of two physical
//! formats. This crate turns that stream into decompressed pages ready for
//! value materialization, while letting the consumer inspect a page's
//! statistics *before* paying decompression cost for it.
//!
//! The crate is split along the seams of the problem:
//!
//! - [`page`]: the immutable tagged-union model of pages
//!   ([`DictionaryPage`], [`DataPageV1`], [`DataPageV2`]). A compressed page
//!   and its decompressed counterpart are distinct values of the same
//!   variant; decoding never mutates in place.
//! - [`statistics`]: row-group level inputs computed once before a reader is
//!   built (null-count hint, dictionary-only-encoding hint) plus the inline
//!   [`PageStatistics`] V2 pages may carry.
//! - [`reader`]: the [`PageReader`] state machine enforcing
//!   dictionary-before-data ordering and exposing the pull protocol
//!   (`read_dictionary_page` / `read_page` / `get_next_page` /
//!   `skip_next_page`).
//!
//! Everything here is single-threaded and pull-based; a [`PageReader`] is
//! owned by exactly one consumer for the lifetime of one chunk and can be
//! abandoned at any point without cleanup.

pub mod page;
pub mod reader;
pub mod statistics;

pub use page::{DataPage, DataPageV1, DataPageV2, DictionaryPage, Encoding, Page};
pub use reader::PageReader;
pub use statistics::{PageEncodingStats, PageStatistics, PageType};

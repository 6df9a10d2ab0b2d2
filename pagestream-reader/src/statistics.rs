//! Row-group level inputs to the page reader.
//!
//! Both hints computed here are fixed before a [`crate::PageReader`] is
//! built and never change during the chunk's lifetime. They come from
//! row-group/column-chunk metadata, not from the pages themselves, which is
//! why this module knows nothing about page payloads.

use bytes::Bytes;

use crate::page::Encoding;

/// Inline statistics a V2 data page may carry alongside its compressed
/// payload. Min/max are kept as raw encoded bytes; interpreting them is the
/// value decoder's business.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageStatistics {
    pub null_count: Option<u64>,
    pub distinct_count: Option<u64>,
    pub min_value: Option<Bytes>,
    pub max_value: Option<Bytes>,
}

/// Physical page kind, as recorded in per-chunk encoding statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PageType {
    Dictionary,
    DataV1,
    DataV2,
}

/// One row of the per-chunk encoding census some writers record: how many
/// pages of `page_type` used `encoding`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageEncodingStats {
    pub page_type: PageType,
    pub encoding: Encoding,
    pub count: u64,
}

/// True iff the row-group column statistics report exactly zero nulls.
///
/// A schema may declare a column optional even though the written data has
/// no nulls; this hint lets the materializer switch to the faster
/// non-nullable path in that case. Absent statistics give `false`: without
/// a reported count nothing can be assumed.
pub fn has_no_nulls(null_count: Option<u64>) -> bool {
    null_count == Some(0)
}

/// True iff every data page in the chunk is dictionary-encoded.
///
/// When the writer recorded per-page encoding statistics they are
/// authoritative: a dictionary page must exist and no data page may use a
/// non-dictionary value encoding. Older writers only record the flat set of
/// encodings used anywhere in the chunk; for those, `PlainDictionary` must
/// be present and nothing besides the level encodings (`Rle`, `BitPacked`)
/// may remain once it is removed.
pub fn only_dictionary_encoded(
    encodings: &[Encoding],
    encoding_stats: Option<&[PageEncodingStats]>,
) -> bool {
    if let Some(stats) = encoding_stats {
        let has_dictionary_pages = stats
            .iter()
            .any(|s| s.page_type == PageType::Dictionary && s.count > 0);
        let has_non_dictionary_data = stats.iter().any(|s| {
            s.page_type != PageType::Dictionary
                && s.count > 0
                && !matches!(
                    s.encoding,
                    Encoding::PlainDictionary | Encoding::RleDictionary
                )
        });
        return has_dictionary_pages && !has_non_dictionary_data;
    }

    let mut saw_dictionary = false;
    let mut saw_other = false;
    for encoding in encodings {
        match encoding {
            Encoding::PlainDictionary => saw_dictionary = true,
            Encoding::Rle | Encoding::BitPacked => {}
            _ => saw_other = true,
        }
    }
    saw_dictionary && !saw_other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_nulls_requires_reported_zero() {
        assert!(has_no_nulls(Some(0)));
        assert!(!has_no_nulls(Some(1)));
        assert!(!has_no_nulls(None));
    }

    #[test]
    fn encoding_stats_are_authoritative() {
        let stats = [
            PageEncodingStats {
                page_type: PageType::Dictionary,
                encoding: Encoding::Plain,
                count: 1,
            },
            PageEncodingStats {
                page_type: PageType::DataV1,
                encoding: Encoding::RleDictionary,
                count: 3,
            },
        ];
        // The flat encoding set would reject this chunk; the stats know
        // better.
        assert!(only_dictionary_encoded(
            &[Encoding::Plain, Encoding::RleDictionary],
            Some(&stats)
        ));
    }

    #[test]
    fn one_plain_data_page_defeats_the_hint() {
        let stats = [
            PageEncodingStats {
                page_type: PageType::Dictionary,
                encoding: Encoding::Plain,
                count: 1,
            },
            PageEncodingStats {
                page_type: PageType::DataV2,
                encoding: Encoding::RleDictionary,
                count: 7,
            },
            PageEncodingStats {
                page_type: PageType::DataV2,
                encoding: Encoding::Plain,
                count: 1,
            },
        ];
        assert!(!only_dictionary_encoded(&[], Some(&stats)));
    }

    #[test]
    fn fallback_ignores_level_encodings() {
        assert!(only_dictionary_encoded(
            &[
                Encoding::PlainDictionary,
                Encoding::Rle,
                Encoding::BitPacked
            ],
            None
        ));
        assert!(!only_dictionary_encoded(
            &[Encoding::PlainDictionary, Encoding::Plain],
            None
        ));
        assert!(!only_dictionary_encoded(&[Encoding::Plain], None));
    }
}

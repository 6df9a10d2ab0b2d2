//! Codec identifiers and the block compress/decompress functions.

use std::fmt;
use std::io::{Read, Write};

use bytes::Bytes;
use pagestream_result::{Error, Result};

/// Compression algorithm applied to every page of one column chunk.
///
/// The identifier is fixed per chunk by the file writer; the read path only
/// dispatches on it and never re-derives it from page contents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Pages are stored as plaintext; decompression is the identity.
    Uncompressed,
    /// Raw (unframed) Snappy blocks.
    Snappy,
    /// Gzip-framed DEFLATE.
    Gzip,
    /// Raw LZ4 blocks without a length prefix; the expected expanded size
    /// comes from the page header instead.
    Lz4Raw,
    /// Zstandard.
    Zstd,
}

impl Compression {
    pub fn name(&self) -> &'static str {
        match self {
            Compression::Uncompressed => "uncompressed",
            Compression::Snappy => "snappy",
            Compression::Gzip => "gzip",
            Compression::Lz4Raw => "lz4_raw",
            Compression::Zstd => "zstd",
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand `input` to exactly `uncompressed_size` bytes.
///
/// `Compression::Uncompressed` is an identity fast path that returns a
/// zero-copy clone of the input handle. Every other codec materializes a new
/// buffer and fails with [`Error::Decode`] when the backend rejects the
/// input or when the expansion does not land on `uncompressed_size`: a
/// correct page header and intact payload always agree on the expanded
/// length, so a mismatch means the bytes cannot be trusted.
pub fn decompress(codec: Compression, input: &Bytes, uncompressed_size: usize) -> Result<Bytes> {
    let out = match codec {
        Compression::Uncompressed => return Ok(input.clone()),
        Compression::Snappy => snap::raw::Decoder::new()
            .decompress_vec(input)
            .map_err(|e| Error::Decode(format!("snappy: {e}")))?,
        Compression::Gzip => {
            let mut out = Vec::with_capacity(uncompressed_size);
            flate2::read::GzDecoder::new(input.as_ref())
                .read_to_end(&mut out)
                .map_err(|e| Error::Decode(format!("gzip: {e}")))?;
            out
        }
        Compression::Lz4Raw => lz4_flex::block::decompress(input, uncompressed_size)
            .map_err(|e| Error::Decode(format!("lz4_raw: {e}")))?,
        Compression::Zstd => zstd::bulk::decompress(input, uncompressed_size)
            .map_err(|e| Error::Decode(format!("zstd: {e}")))?,
    };
    if out.len() != uncompressed_size {
        return Err(Error::Decode(format!(
            "{codec} expanded {} bytes to {}, expected {uncompressed_size}",
            input.len(),
            out.len(),
        )));
    }
    Ok(Bytes::from(out))
}

/// Compress `input` with `codec`.
///
/// The inverse of [`decompress`]; used by writers and by round-trip tests.
/// Levels are fixed per codec since page payloads are small and the read
/// path never renegotiates them.
pub fn compress(codec: Compression, input: &[u8]) -> Result<Vec<u8>> {
    match codec {
        Compression::Uncompressed => Ok(input.to_vec()),
        Compression::Snappy => snap::raw::Encoder::new()
            .compress_vec(input)
            .map_err(|e| Error::Decode(format!("snappy: {e}"))),
        Compression::Gzip => {
            let mut enc =
                flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            enc.write_all(input)?;
            Ok(enc.finish()?)
        }
        Compression::Lz4Raw => Ok(lz4_flex::block::compress(input)),
        Compression::Zstd => {
            zstd::bulk::compress(input, 3).map_err(|e| Error::Decode(format!("zstd: {e}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODECS: [Compression; 5] = [
        Compression::Uncompressed,
        Compression::Snappy,
        Compression::Gzip,
        Compression::Lz4Raw,
        Compression::Zstd,
    ];

    fn plaintext() -> Vec<u8> {
        // Compressible but not trivial: repeated tokens with a varying tail.
        let mut data = Vec::new();
        for i in 0..512u32 {
            data.extend_from_slice(b"page-payload-");
            data.extend_from_slice(&i.to_le_bytes());
        }
        data
    }

    #[test]
    fn roundtrip_every_codec() {
        let original = plaintext();
        for codec in CODECS {
            let compressed = compress(codec, &original).unwrap();
            let restored =
                decompress(codec, &Bytes::from(compressed), original.len()).unwrap();
            assert_eq!(restored.as_ref(), original.as_slice(), "codec {codec}");
        }
    }

    #[test]
    fn uncompressed_is_zero_copy_identity() {
        let input = Bytes::from_static(b"already plaintext");
        let out = decompress(Compression::Uncompressed, &input, input.len()).unwrap();
        assert_eq!(out, input);
        // Same backing allocation, not a copy.
        assert_eq!(out.as_ptr(), input.as_ptr());
    }

    #[test]
    fn corrupt_input_is_a_decode_error() {
        let garbage = Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef, 0x01, 0x02]);
        for codec in [Compression::Snappy, Compression::Gzip, Compression::Zstd] {
            let err = decompress(codec, &garbage, 1024).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "codec {codec}: {err}");
        }
    }

    #[test]
    fn wrong_expected_size_is_a_decode_error() {
        let original = plaintext();
        for codec in [Compression::Snappy, Compression::Gzip] {
            let compressed = Bytes::from(compress(codec, &original).unwrap());
            let err = decompress(codec, &compressed, original.len() + 1).unwrap_err();
            assert!(matches!(err, Error::Decode(_)), "codec {codec}: {err}");
        }
    }

    #[test]
    fn empty_payload_roundtrip() {
        for codec in [
            Compression::Uncompressed,
            Compression::Snappy,
            Compression::Gzip,
            Compression::Zstd,
        ] {
            let compressed = compress(codec, &[]).unwrap();
            let restored = decompress(codec, &Bytes::from(compressed), 0).unwrap();
            assert!(restored.is_empty(), "codec {codec}");
        }
    }
}

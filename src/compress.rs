//! Compression strategies for binary columns
//!
//! A strategy is injected into a field descriptor at schema-build time and
//! applied whenever a value travels through the binary path. A failed
//! compress/uncompress returns `None`, which degrades the affected field to
//! absent rather than failing the whole row (primary keys excepted; the row
//! builder rejects a degraded key outright).

use std::io::{Read, Write};

/// Byte-array transform applied around binary cells.
///
/// Both directions return `None` on failure; `None` is the sentinel the
/// coercion engine consumes when degrading a field to absent.
pub trait Compressor: Send + Sync {
    fn compress(&self, input: &[u8]) -> Option<Vec<u8>>;
    fn uncompress(&self, input: &[u8]) -> Option<Vec<u8>>;

    /// Strategy name, used in descriptor debug output and warnings.
    fn name(&self) -> &'static str;
}

/// Identity transform, the default for every field.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompression;

impl Compressor for NoCompression {
    fn compress(&self, input: &[u8]) -> Option<Vec<u8>> {
        Some(input.to_vec())
    }

    fn uncompress(&self, input: &[u8]) -> Option<Vec<u8>> {
        Some(input.to_vec())
    }

    fn name(&self) -> &'static str {
        "none"
    }
}

/// Raw deflate stream at fast compression level.
#[derive(Debug, Clone, Copy, Default)]
pub struct Deflate;

impl Compressor for Deflate {
    fn compress(&self, input: &[u8]) -> Option<Vec<u8>> {
        let mut encoder =
            flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::fast());
        if encoder.write_all(input).is_err() {
            tracing::warn!(strategy = "deflate", "compress failed");
            return None;
        }
        match encoder.finish() {
            Ok(out) => Some(out),
            Err(err) => {
                tracing::warn!(strategy = "deflate", error = %err, "compress failed");
                None
            }
        }
    }

    fn uncompress(&self, input: &[u8]) -> Option<Vec<u8>> {
        let mut decoder = flate2::read::DeflateDecoder::new(input);
        let mut out = Vec::new();
        match decoder.read_to_end(&mut out) {
            Ok(_) => Some(out),
            Err(err) => {
                tracing::warn!(strategy = "deflate", error = %err, "uncompress failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "deflate"
    }
}

/// Gzip framing around deflate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gzip;

impl Compressor for Gzip {
    fn compress(&self, input: &[u8]) -> Option<Vec<u8>> {
        let mut encoder =
            flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
        if encoder.write_all(input).is_err() {
            tracing::warn!(strategy = "gzip", "compress failed");
            return None;
        }
        match encoder.finish() {
            Ok(out) => Some(out),
            Err(err) => {
                tracing::warn!(strategy = "gzip", error = %err, "compress failed");
                None
            }
        }
    }

    fn uncompress(&self, input: &[u8]) -> Option<Vec<u8>> {
        let mut decoder = flate2::read::GzDecoder::new(input);
        let mut out = Vec::new();
        match decoder.read_to_end(&mut out) {
            Ok(_) => Some(out),
            Err(err) => {
                tracing::warn!(strategy = "gzip", error = %err, "uncompress failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "gzip"
    }
}

/// Snappy block format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snappy;

impl Compressor for Snappy {
    fn compress(&self, input: &[u8]) -> Option<Vec<u8>> {
        Some(snap::raw::Encoder::new().compress_vec(input).ok()?)
    }

    fn uncompress(&self, input: &[u8]) -> Option<Vec<u8>> {
        match snap::raw::Decoder::new().decompress_vec(input) {
            Ok(out) => Some(out),
            Err(err) => {
                tracing::warn!(strategy = "snappy", error = %err, "uncompress failed");
                None
            }
        }
    }

    fn name(&self) -> &'static str {
        "snappy"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[u8] = b"widestore compression round trip sample payload payload payload";

    // =========================================================================
    // Round Trip Tests
    // =========================================================================

    #[test]
    fn test_no_compression_round_trip() {
        let c = NoCompression;
        let packed = c.compress(SAMPLE).unwrap();
        assert_eq!(packed, SAMPLE);
        assert_eq!(c.uncompress(&packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_deflate_round_trip() {
        let c = Deflate;
        let packed = c.compress(SAMPLE).unwrap();
        assert_ne!(packed, SAMPLE);
        assert_eq!(c.uncompress(&packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_gzip_round_trip() {
        let c = Gzip;
        let packed = c.compress(SAMPLE).unwrap();
        assert_ne!(packed, SAMPLE);
        assert_eq!(c.uncompress(&packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_snappy_round_trip() {
        let c = Snappy;
        let packed = c.compress(SAMPLE).unwrap();
        assert_eq!(c.uncompress(&packed).unwrap(), SAMPLE);
    }

    #[test]
    fn test_empty_input_round_trips() {
        for c in [&Deflate as &dyn Compressor, &Gzip, &Snappy, &NoCompression] {
            let packed = c.compress(&[]).unwrap();
            assert_eq!(c.uncompress(&packed).unwrap(), Vec::<u8>::new(), "{}", c.name());
        }
    }

    // =========================================================================
    // Failure Sentinel Tests
    // =========================================================================

    #[test]
    fn test_gzip_uncompress_garbage_fails() {
        assert!(Gzip.uncompress(b"not a gzip stream").is_none());
    }

    #[test]
    fn test_deflate_uncompress_garbage_fails() {
        assert!(Deflate.uncompress(&[0xff, 0xff, 0xff, 0xff]).is_none());
    }

    #[test]
    fn test_snappy_uncompress_garbage_fails() {
        assert!(Snappy.uncompress(&[0xff, 0xff, 0xff, 0xff]).is_none());
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(NoCompression.name(), "none");
        assert_eq!(Deflate.name(), "deflate");
        assert_eq!(Gzip.name(), "gzip");
        assert_eq!(Snappy.name(), "snappy");
    }
}

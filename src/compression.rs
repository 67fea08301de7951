//! Detection and inflation of gzip-compressed SVG data (`.svgz`).

use std::io::Read;

use flate2::read::GzDecoder;

use crate::error::LoadingError;
use crate::locator::{Locator, Scheme};

// Header of a gzip data stream
const GZ_MAGIC_0: u8 = 0x1f;
const GZ_MAGIC_1: u8 = 0x8b;

/// Decides whether `data` must be inflated before parsing.
///
/// File-like locators carry a reliable extension, so for them the decision
/// comes from the locator's `.svgz` suffix alone, independent of the buffer
/// contents.  Inline payloads carry no extension; for those the buffer's
/// leading bytes are sniffed for the gzip magic.
pub fn is_compressed(locator: &Locator, data: &[u8]) -> bool {
    match locator.scheme() {
        Scheme::InlineData => data.len() >= 2 && data[0..2] == [GZ_MAGIC_0, GZ_MAGIC_1],
        _ => locator.has_compressed_suffix(),
    }
}

/// Inflates a gzip-framed buffer in full.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>, LoadingError> {
    let mut decoder = GzDecoder::new(data);
    let mut inflated = Vec::new();

    decoder
        .read_to_end(&mut inflated)
        .map_err(|e| LoadingError::CorruptCompressedStream(e.to_string()))?;

    Ok(inflated)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use flate2::write::GzEncoder;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn inline_data_is_sniffed_by_magic() {
        let locator = Locator::classify("data:image/svg+xml;base64,AAAA", false).unwrap();
        assert!(is_compressed(&locator, &gzip(b"<svg/>")));
        assert!(!is_compressed(&locator, b"<svg/>"));
    }

    #[test]
    fn file_locators_go_by_suffix_not_contents() {
        let svgz = Locator::classify("file:///tmp/foo.svgz", false).unwrap();
        let svg = Locator::classify("file:///tmp/foo.svg", false).unwrap();

        // plain contents with a .svgz name still count as compressed
        assert!(is_compressed(&svgz, b"<svg/>"));

        // gzipped contents with a .svg name do not
        assert!(!is_compressed(&svg, &gzip(b"<svg/>")));
    }

    #[test]
    fn decompress_round_trips() {
        let inflated = decompress(&gzip(b"<svg/>")).unwrap();
        assert_eq!(inflated, b"<svg/>");
    }

    #[test]
    fn decompress_rejects_corrupt_streams() {
        let mut compressed = gzip(b"<svg/>");
        compressed.truncate(compressed.len() / 2);
        compressed.extend_from_slice(b"garbage");

        assert!(matches!(
            decompress(&compressed),
            Err(LoadingError::CorruptCompressedStream(_))
        ));
    }

    #[test]
    fn decompress_rejects_non_gzip_input() {
        assert!(matches!(
            decompress(b"<svg/>"),
            Err(LoadingError::CorruptCompressedStream(_))
        ));
    }
}

//! Classification of locator strings into fetchable schemes.

use std::fmt;

use url::Url;

use crate::error::LoadingError;

/// Marker substring in a packaged locator which requests loading relative to
/// the deploying site instead of from embedded resources.
const SITE_OF_ORIGIN_MARKER: &str = "siteoforigin";

/// Trailing suffix that marks a gzip-compressed SVG resource.
const COMPRESSED_SUFFIX: &str = ".svgz";

/// How a locator's bytes are to be fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// A `file:` URL on the local filesystem.
    Local,

    /// An `http:` or `https:` URL.
    RemoteHttp,

    /// A `resource:` URL, resolved by identifier against the consuming
    /// application's embedded resources or its site of origin.
    Packaged,

    /// A `data:` URL carrying the document inline.
    InlineData,
}

/// A parsed, validated reference to where an SVG resource lives.
///
/// The scheme is derived once at construction and never changes.  The
/// original text is kept for diagnostics and for the pieces of resolution
/// that work on the raw string, like the site-of-origin marker.
#[derive(Debug, Clone)]
pub struct Locator {
    scheme: Scheme,
    origin: String,
    url: Option<Url>,
    is_from_site_of_origin: bool,
}

impl Locator {
    /// Classifies a locator string.
    ///
    /// With `design_time_preview` set, text that is not a fully-qualified
    /// URL is forced to the `Packaged` scheme, so that authoring tools can
    /// preview resources which only resolve inside the packaged
    /// application.
    ///
    /// An empty or unrecognized scheme token fails with
    /// [`LoadingError::UnsupportedLocator`]; classification performs no
    /// I/O.
    pub fn classify(text: &str, design_time_preview: bool) -> Result<Locator, LoadingError> {
        let trimmed = text.trim();

        if starts_with_ignore_case(trimmed, "data:") {
            return Ok(Locator {
                scheme: Scheme::InlineData,
                origin: trimmed.to_string(),
                url: None,
                is_from_site_of_origin: false,
            });
        }

        match Url::parse(trimmed) {
            Ok(url) => {
                let scheme = match url.scheme() {
                    "file" => Scheme::Local,
                    "http" | "https" => Scheme::RemoteHttp,
                    "resource" => Scheme::Packaged,
                    _ => return Err(LoadingError::UnsupportedLocator(trimmed.to_string())),
                };

                let is_from_site_of_origin = scheme == Scheme::Packaged
                    && trimmed.to_ascii_lowercase().contains(SITE_OF_ORIGIN_MARKER);

                Ok(Locator {
                    scheme,
                    origin: trimmed.to_string(),
                    url: Some(url),
                    is_from_site_of_origin,
                })
            }

            Err(_) if design_time_preview && !trimmed.is_empty() => Ok(Locator {
                scheme: Scheme::Packaged,
                origin: trimmed.to_string(),
                url: None,
                is_from_site_of_origin: false,
            }),

            Err(_) => Err(LoadingError::UnsupportedLocator(trimmed.to_string())),
        }
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// The original textual form of the locator.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Whether this packaged locator asked for site-of-origin resolution.
    pub fn is_from_site_of_origin(&self) -> bool {
        self.is_from_site_of_origin
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    /// Whether the locator's trailing suffix marks a gzip-compressed
    /// resource.
    ///
    /// This is a metadata-based decision; inline payloads carry no suffix
    /// and get sniffed by content instead.
    pub fn has_compressed_suffix(&self) -> bool {
        let path = match self.url {
            Some(ref url) => url.path(),
            None => self.origin.as_str(),
        };

        ends_with_ignore_case(path, COMPRESSED_SUFFIX)
    }

    /// The resource-relative path of a `Packaged` locator.
    pub fn packaged_path(&self) -> &str {
        match self.url {
            Some(ref url) => url.path().trim_start_matches('/'),
            None => &self.origin,
        }
    }

    /// The explicit application segment of a `Packaged` locator, if any.
    ///
    /// `resource://someapp/images/foo.svg` names `someapp`; the
    /// site-of-origin marker is not an application name.
    pub fn packaged_authority(&self) -> Option<&str> {
        self.url.as_ref().and_then(|url| match url.host_str() {
            Some(host)
                if !host.is_empty() && !host.eq_ignore_ascii_case(SITE_OF_ORIGIN_MARKER) =>
            {
                Some(host)
            }
            _ => None,
        })
    }

    /// True when resolving this locator requires knowing the host
    /// application's identity.
    pub fn needs_host_identity(&self) -> bool {
        self.scheme == Scheme::Packaged
            && !self.is_from_site_of_origin
            && self.packaged_authority().is_none()
    }
}

// Byte-wise comparisons; slicing the string itself could split a multibyte
// character and panic on hostile input.
fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    let text = text.as_bytes();
    let prefix = prefix.as_bytes();
    text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
}

fn ends_with_ignore_case(text: &str, suffix: &str) -> bool {
    let text = text.as_bytes();
    let suffix = suffix.as_bytes();
    text.len() >= suffix.len() && text[text.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.origin.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_file_urls_as_local() {
        let locator = Locator::classify("file:///tmp/foo.svg", false).unwrap();
        assert_eq!(locator.scheme(), Scheme::Local);
        assert!(!locator.is_from_site_of_origin());
    }

    #[test]
    fn classifies_http_and_https_as_remote() {
        let http = Locator::classify("http://example.com/foo.svg", false).unwrap();
        let https = Locator::classify("https://example.com/foo.svg", false).unwrap();
        assert_eq!(http.scheme(), Scheme::RemoteHttp);
        assert_eq!(https.scheme(), Scheme::RemoteHttp);
    }

    #[test]
    fn classifies_resource_urls_as_packaged() {
        let locator = Locator::classify("resource://someapp/images/foo.svg", false).unwrap();
        assert_eq!(locator.scheme(), Scheme::Packaged);
        assert_eq!(locator.packaged_authority(), Some("someapp"));
        assert_eq!(locator.packaged_path(), "images/foo.svg");
        assert!(!locator.needs_host_identity());
    }

    #[test]
    fn classifies_data_prefix_as_inline() {
        let locator = Locator::classify("data:image/svg+xml;base64,AAAA", false).unwrap();
        assert_eq!(locator.scheme(), Scheme::InlineData);
    }

    #[test]
    fn detects_site_of_origin_marker_case_insensitively() {
        let locator = Locator::classify("resource://SiteOfOrigin/foo.svg", false).unwrap();
        assert!(locator.is_from_site_of_origin());
        assert_eq!(locator.packaged_authority(), None);
        assert!(!locator.needs_host_identity());
    }

    #[test]
    fn relative_packaged_locator_needs_host_identity() {
        let locator = Locator::classify("resource:///images/foo.svg", false).unwrap();
        assert!(locator.needs_host_identity());
        assert_eq!(locator.packaged_path(), "images/foo.svg");
    }

    #[test]
    fn design_time_forces_packaged_for_unqualified_text() {
        let locator = Locator::classify("images/foo.svg", true).unwrap();
        assert_eq!(locator.scheme(), Scheme::Packaged);
        assert_eq!(locator.packaged_path(), "images/foo.svg");
        assert!(locator.needs_host_identity());
    }

    #[test]
    fn design_time_keeps_fully_qualified_schemes() {
        let locator = Locator::classify("file:///tmp/foo.svg", true).unwrap();
        assert_eq!(locator.scheme(), Scheme::Local);
    }

    #[test]
    fn rejects_unqualified_text_outside_design_time() {
        assert!(matches!(
            Locator::classify("images/foo.svg", false),
            Err(LoadingError::UnsupportedLocator(_))
        ));
    }

    #[test]
    fn rejects_unrecognized_scheme() {
        assert!(matches!(
            Locator::classify("ftp://example.com/foo.svg", false),
            Err(LoadingError::UnsupportedLocator(_))
        ));
    }

    #[test]
    fn rejects_empty_text_even_at_design_time() {
        assert!(matches!(
            Locator::classify("   ", true),
            Err(LoadingError::UnsupportedLocator(_))
        ));
    }

    #[test]
    fn compressed_suffix_is_case_insensitive() {
        let lower = Locator::classify("file:///tmp/foo.svgz", false).unwrap();
        let upper = Locator::classify("file:///tmp/FOO.SVGZ", false).unwrap();
        let plain = Locator::classify("file:///tmp/foo.svg", false).unwrap();
        assert!(lower.has_compressed_suffix());
        assert!(upper.has_compressed_suffix());
        assert!(!plain.has_compressed_suffix());
    }

    #[test]
    fn multibyte_text_never_panics() {
        assert!(Locator::classify("dätaé", false).is_err());

        let locator = Locator::classify("éñ.svgz", true).unwrap();
        assert!(locator.has_compressed_suffix());
    }

    #[test]
    fn compressed_suffix_works_on_forced_packaged_locators() {
        let locator = Locator::classify("images/foo.svgz", true).unwrap();
        assert!(locator.has_compressed_suffix());
    }
}

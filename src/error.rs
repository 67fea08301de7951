//! Error types.

use thiserror::Error;

/// Errors that can happen while resolving and decoding an SVG locator.
///
/// All of these are for resources that cannot yield a drawing; none of them
/// should abort a larger conversion batch, so they collapse into a plain
/// "no drawing produced" at the [`convert_to_drawing`] boundary.  To see
/// which stage failed, set the `SVGLOAD_LOG=1` environment variable.
///
/// [`convert_to_drawing`]: crate::SvgConverter::convert_to_drawing
#[non_exhaustive]
#[derive(Debug, Clone, Error)]
pub enum LoadingError {
    /// The locator's scheme token is missing or unrecognized, or a `data:`
    /// locator's framing delimiters are missing or out of order.
    #[error("unsupported locator: {0}")]
    UnsupportedLocator(String),

    /// I/O failure while fetching a local, remote, or site-of-origin
    /// resource.
    #[error("resource unreachable: {0}")]
    Unreachable(String),

    /// A packaged resource is absent.  Expected, not exceptional.
    #[error("packaged resource not found: {0}")]
    NotFound(String),

    /// A `data:` locator whose mime type or transfer encoding does not
    /// declare a base64-encoded SVG document.
    #[error("unsupported data URI encoding: {0}")]
    UnsupportedEncoding(String),

    /// The base64 payload could not be decoded.
    #[error("malformed payload: {0}")]
    Malformed(String),

    /// A gzip stream was signaled but could not be inflated.
    #[error("corrupt compressed stream: {0}")]
    CorruptCompressedStream(String),
}

//! Acquisition of raw bytes for each locator scheme.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use base64::Engine;

use crate::error::LoadingError;
use crate::locator::{Locator, Scheme};

/// Required mime type of an inline data locator.
const SVG_MIME_TYPE: &str = "image/svg+xml";

/// Required transfer encoding of an inline data locator.
const BASE64_ENCODING: &str = "base64";

/// Fully materialized bytes for one resource.
pub struct BinaryData {
    pub data: Vec<u8>,
    pub content_type: Option<String>,
}

/// Everything the fetcher needs besides the locator itself.
///
/// Built per call by the converter; `host_identity` is populated only when
/// the locator actually needs it.
pub struct FetchContext<'a> {
    pub agent: &'a ureq::Agent,
    pub embedded: &'a HashMap<String, Vec<u8>>,
    pub site_of_origin_base: Option<&'a Path>,
    pub host_identity: Option<&'a str>,
}

/// Reads the entire contents addressed by `locator`.
pub fn acquire_data(
    locator: &Locator,
    ctx: &FetchContext<'_>,
) -> Result<BinaryData, LoadingError> {
    match locator.scheme() {
        Scheme::Local | Scheme::RemoteHttp => fetch_uri(locator, ctx.agent),
        Scheme::Packaged => fetch_packaged(locator, ctx),
        Scheme::InlineData => decode_data_uri(locator.origin()),
    }
}

fn unreachable(locator: &Locator, err: impl fmt::Display) -> LoadingError {
    LoadingError::Unreachable(format!("{}: {}", locator, err))
}

/// Local and remote locators are fetched through the same path; only the
/// transport differs, and every failure maps to `Unreachable`.
fn fetch_uri(locator: &Locator, agent: &ureq::Agent) -> Result<BinaryData, LoadingError> {
    let data = match locator.scheme() {
        Scheme::Local => {
            let path = locator
                .url()
                .and_then(|url| url.to_file_path().ok())
                .ok_or_else(|| unreachable(locator, "not a file path"))?;

            fs::read(&path).map_err(|e| unreachable(locator, e))?
        }

        _ => {
            let response = agent
                .get(locator.origin())
                .call()
                .map_err(|e| unreachable(locator, e))?;

            let mut body = Vec::new();
            response
                .into_reader()
                .read_to_end(&mut body)
                .map_err(|e| unreachable(locator, e))?;
            body
        }
    };

    Ok(BinaryData {
        data,
        content_type: guess_content_type(locator),
    })
}

fn fetch_packaged(locator: &Locator, ctx: &FetchContext<'_>) -> Result<BinaryData, LoadingError> {
    // Exactly one strategy is tried per locator; there is no fallback
    // between site-of-origin and embedded lookup.
    if locator.is_from_site_of_origin() {
        fetch_site_of_origin(locator, ctx.site_of_origin_base)
    } else {
        fetch_embedded(locator, ctx)
    }
}

/// Resolves a packaged locator relative to the deployed application's own
/// directory.
fn fetch_site_of_origin(
    locator: &Locator,
    base: Option<&Path>,
) -> Result<BinaryData, LoadingError> {
    let base = match base {
        Some(dir) => dir.to_path_buf(),
        None => default_site_of_origin()
            .ok_or_else(|| unreachable(locator, "no site-of-origin directory"))?,
    };

    let path = base.join(locator.packaged_path());

    match fs::read(&path) {
        Ok(data) => Ok(BinaryData {
            data,
            content_type: guess_content_type(locator),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(LoadingError::NotFound(locator.origin().to_string()))
        }
        Err(e) => Err(unreachable(locator, e)),
    }
}

fn default_site_of_origin() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

/// Looks a packaged locator up in the embedded-resource registry.
///
/// A locator without an explicit application segment is qualified with the
/// resolved host identity when one is available.  Absence of the resource
/// is expected, not exceptional.
fn fetch_embedded(locator: &Locator, ctx: &FetchContext<'_>) -> Result<BinaryData, LoadingError> {
    let path = locator.packaged_path();

    let key = match locator.packaged_authority() {
        Some(authority) => format!("{}/{}", authority, path),
        None => match ctx.host_identity {
            Some(identity) => format!("{}/{}", identity, path),
            None => path.to_string(),
        },
    };

    match ctx.embedded.get(&normalize_resource_key(&key)) {
        Some(bytes) => Ok(BinaryData {
            data: bytes.clone(),
            content_type: guess_content_type(locator),
        }),
        None => Err(LoadingError::NotFound(locator.origin().to_string())),
    }
}

/// Normalizes an embedded-resource identifier for case-insensitive lookup.
pub fn normalize_resource_key(key: &str) -> String {
    key.trim_start_matches('/')
        .replace('\\', "/")
        .to_ascii_lowercase()
}

/// Decodes an inline `data:` locator.
///
/// The framing is positional: the first colon, the first semicolon, and
/// the first comma of the whitespace-stripped origin delimit the mime
/// type, the transfer encoding, and the payload, in that order.  Missing
/// or out-of-order delimiters are rejected outright rather than guessing
/// what was meant.
fn decode_data_uri(origin: &str) -> Result<BinaryData, LoadingError> {
    let squeezed: String = origin.chars().filter(|c| !c.is_whitespace()).collect();

    let bad_framing = || LoadingError::UnsupportedLocator(origin.to_string());

    let colon = squeezed.find(':').ok_or_else(bad_framing)?;
    let semicolon = squeezed.find(';').ok_or_else(bad_framing)?;
    let comma = squeezed.find(',').ok_or_else(bad_framing)?;

    if colon >= semicolon || semicolon >= comma {
        return Err(bad_framing());
    }

    let mime_type = &squeezed[colon + 1..semicolon];
    let encoding = &squeezed[semicolon + 1..comma];
    let payload = &squeezed[comma + 1..];

    if !mime_type.eq_ignore_ascii_case(SVG_MIME_TYPE) {
        return Err(LoadingError::UnsupportedEncoding(mime_type.to_string()));
    }

    if !encoding.eq_ignore_ascii_case(BASE64_ENCODING) {
        return Err(LoadingError::UnsupportedEncoding(encoding.to_string()));
    }

    let data = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| LoadingError::Malformed(e.to_string()))?;

    Ok(BinaryData {
        data,
        content_type: Some(SVG_MIME_TYPE.to_string()),
    })
}

fn guess_content_type(locator: &Locator) -> Option<String> {
    let lower = locator.origin().to_ascii_lowercase();
    if lower.ends_with(".svg") || lower.ends_with(".svgz") {
        Some(SVG_MIME_TYPE.to_string())
    } else {
        None
    }
}

//! Resolve and decode SVG resource locators into vector drawings.
//!
//! Given an opaque locator string, this crate determines how to fetch its
//! bytes — local filesystem, remote HTTP, an application-packaged
//! resource, or an inline `data:` payload — transparently undoes gzip
//! compression (`.svgz`), and hands the clean buffer to an SVG-to-drawing
//! parser supplied through the [`DrawingParser`] seam.  The `usvg` cargo
//! feature provides a ready-made parser backed by the `usvg` crate.
//!
//! The entry point is [`SvgConverter::convert_to_drawing`], which returns
//! `Some(graph)` on success and `None` for anything that cannot produce a
//! drawing; missing, unreachable, and malformed resources are expected
//! conditions, not errors.  Set the `SVGLOAD_LOG=1` environment variable
//! for stage-by-stage diagnostics.

pub use crate::api::SvgConverter;
pub use crate::error::LoadingError;
pub use crate::host::{HostRuntime, SystemRuntime};
pub use crate::locator::{Locator, Scheme};
pub use crate::parser::DrawingParser;
pub use crate::settings::DecodingSettings;

#[cfg(feature = "usvg")]
pub use crate::parser::UsvgParser;

mod api;
mod compression;
mod error;
mod host;
mod io;
mod locator;
mod parser;
mod settings;

#[doc(hidden)]
pub mod log;

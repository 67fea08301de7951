//! Public API for the locator-to-drawing pipeline.

use std::collections::HashMap;
use std::path::PathBuf;

use once_cell::sync::OnceCell;

use crate::compression;
use crate::error::LoadingError;
use crate::host::{self, HostRuntime, SystemRuntime};
use crate::io::{self, BinaryData, FetchContext};
use crate::locator::Locator;
use crate::parser::DrawingParser;
use crate::settings::DecodingSettings;
use crate::svgload_log;

/// Converts SVG resource locators into drawing graphs.
///
/// This is the crate's entry point.  A converter is built around a
/// [`DrawingParser`] and then configured in builder style: embedded
/// resources, a site-of-origin directory, a custom [`HostRuntime`].
///
/// Conversion is synchronous and blocking; callers on a
/// responsiveness-sensitive thread should invoke it elsewhere and marshal
/// the result back.  The memoized host identity is the only state shared
/// between calls.
///
/// ```
/// use svgload::{DecodingSettings, DrawingParser, SvgConverter};
///
/// struct Utf8Parser;
///
/// impl DrawingParser for Utf8Parser {
///     type Graph = String;
///
///     fn parse(&self, data: &[u8], _settings: &DecodingSettings) -> Option<String> {
///         String::from_utf8(data.to_vec()).ok()
///     }
/// }
///
/// let converter = SvgConverter::new(Utf8Parser);
/// let drawing = converter.convert_to_drawing(
///     "data:image/svg+xml;base64,PHN2ZyAvPg==",
///     &DecodingSettings::new(),
///     false,
/// );
/// assert_eq!(drawing.as_deref(), Some("<svg />"));
/// ```
pub struct SvgConverter<P: DrawingParser> {
    parser: P,
    agent: ureq::Agent,
    embedded: HashMap<String, Vec<u8>>,
    site_of_origin_base: Option<PathBuf>,
    runtime: Box<dyn HostRuntime>,
    host_identity: OnceCell<Option<String>>,
}

impl<P: DrawingParser> SvgConverter<P> {
    /// Creates a converter around `parser`, probing the process itself
    /// for the host identity.
    pub fn new(parser: P) -> Self {
        Self::with_runtime(parser, Box::new(SystemRuntime))
    }

    /// Creates a converter with an explicit runtime, for hosts that can
    /// answer identity probes better than the process itself.
    pub fn with_runtime(parser: P, runtime: Box<dyn HostRuntime>) -> Self {
        SvgConverter {
            parser,
            agent: ureq::Agent::new(),
            embedded: HashMap::new(),
            site_of_origin_base: None,
            runtime,
            host_identity: OnceCell::new(),
        }
    }

    /// Registers an embedded resource under `identifier`.
    ///
    /// Identifiers are matched case-insensitively.  A locator without an
    /// explicit application segment looks its path up qualified with the
    /// host identity, so resources are usually registered as
    /// `"appname/path/to/resource.svg"`.
    pub fn with_embedded_resource(mut self, identifier: &str, bytes: Vec<u8>) -> Self {
        self.embedded
            .insert(io::normalize_resource_key(identifier), bytes);
        self
    }

    /// Sets the directory that site-of-origin locators resolve against.
    ///
    /// Defaults to the running executable's directory.
    pub fn with_site_of_origin(mut self, base: impl Into<PathBuf>) -> Self {
        self.site_of_origin_base = Some(base.into());
        self
    }

    /// Resolves the host application's identity.
    ///
    /// The first successful resolution wins and is memoized; later calls
    /// return the same value without consulting the runtime again.
    pub fn resolve_host_identity(&self) -> Option<String> {
        self.host_identity
            .get_or_init(|| {
                let identity = host::resolve_host_identity(self.runtime.as_ref());
                if identity.is_none() {
                    svgload_log!(
                        "host identity could not be resolved; \
                         relative packaged locators will not resolve"
                    );
                }
                identity
            })
            .clone()
    }

    /// Overrides the memoized host identity.
    ///
    /// An empty name clears the memoized value so that the next lookup
    /// resolves afresh; a non-empty name pins the identity without
    /// consulting the runtime.
    pub fn set_host_identity_override(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.host_identity = OnceCell::new();
        } else {
            self.host_identity = OnceCell::with_value(Some(name.to_string()));
        }
    }

    /// Converts the resource addressed by `locator_text` into a drawing
    /// graph.
    ///
    /// Absence is the uniform failure signal here: unrecognized locators,
    /// unreachable or missing resources, malformed payloads, and parsers
    /// that produce nothing all yield `None`, never a panic or an error.
    /// Set `SVGLOAD_LOG=1` to see which stage gave up.
    pub fn convert_to_drawing(
        &self,
        locator_text: &str,
        settings: &DecodingSettings,
        design_time_preview: bool,
    ) -> Option<P::Graph> {
        match self.try_convert(locator_text, settings, design_time_preview) {
            Ok(graph) => graph,
            Err(e) => {
                svgload_log!("no drawing produced for {:?}: {}", locator_text, e);
                None
            }
        }
    }

    fn try_convert(
        &self,
        locator_text: &str,
        settings: &DecodingSettings,
        design_time_preview: bool,
    ) -> Result<Option<P::Graph>, LoadingError> {
        let locator = Locator::classify(locator_text, design_time_preview)?;

        // Identity resolution is deferred until a packaged locator
        // actually needs it.
        let identity = if locator.needs_host_identity() {
            self.resolve_host_identity()
        } else {
            None
        };

        let ctx = FetchContext {
            agent: &self.agent,
            embedded: &self.embedded,
            site_of_origin_base: self.site_of_origin_base.as_deref(),
            host_identity: identity.as_deref(),
        };

        let BinaryData { data, .. } = io::acquire_data(&locator, &ctx)?;

        let data = if compression::is_compressed(&locator, &data) {
            compression::decompress(&data)?
        } else {
            data
        };

        Ok(self.parser.parse(&data, settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullParser;

    impl DrawingParser for NullParser {
        type Graph = ();

        fn parse(&self, _data: &[u8], _settings: &DecodingSettings) -> Option<()> {
            Some(())
        }
    }

    #[test]
    fn override_pins_the_identity() {
        let mut converter = SvgConverter::new(NullParser);
        converter.set_host_identity_override("someapp");
        assert_eq!(converter.resolve_host_identity().as_deref(), Some("someapp"));
    }

    #[test]
    fn empty_override_clears_the_memoized_identity() {
        let mut converter = SvgConverter::new(NullParser);
        converter.set_host_identity_override("someapp");
        converter.set_host_identity_override("");

        // resolves afresh from the runtime, which names the test binary
        let resolved = converter.resolve_host_identity();
        assert_ne!(resolved.as_deref(), Some("someapp"));
    }
}

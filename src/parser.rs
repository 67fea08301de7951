//! The seam to the external SVG-to-drawing parser.

use crate::settings::DecodingSettings;

/// Parses decoded SVG bytes into a drawing graph.
///
/// The pipeline owns classification, fetching, and decompression only; the
/// markup parser is a collaborator supplied by the caller.  A `None`
/// return means "no drawing could be produced" and is never treated as an
/// error by the pipeline.
pub trait DrawingParser {
    /// The drawing-graph type produced by this parser.
    type Graph;

    fn parse(&self, data: &[u8], settings: &DecodingSettings) -> Option<Self::Graph>;
}

#[cfg(feature = "usvg")]
pub use usvg_parser::UsvgParser;

#[cfg(feature = "usvg")]
mod usvg_parser {
    use super::DrawingParser;
    use crate::settings::DecodingSettings;

    /// Parser backed by the `usvg` crate, producing a [`usvg::Tree`].
    ///
    /// Honors [`DecodingSettings::culture_override`] through usvg's
    /// language list and [`DecodingSettings::render_text_as_geometry`]
    /// through its text-rendering mode.  The remaining settings have no
    /// usvg counterpart and are hints for parsers that emit host-native
    /// constructs.
    #[derive(Debug, Default)]
    pub struct UsvgParser;

    impl DrawingParser for UsvgParser {
        type Graph = usvg::Tree;

        fn parse(&self, data: &[u8], settings: &DecodingSettings) -> Option<usvg::Tree> {
            let mut options = usvg::Options::default();

            if let Some(ref culture) = settings.culture_override {
                options.languages = vec![culture.clone()];
            }

            if settings.render_text_as_geometry {
                options.text_rendering = usvg::TextRendering::GeometricPrecision;
            }

            usvg::Tree::from_data(data, &options).ok()
        }
    }
}

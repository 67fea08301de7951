//! Configuration handed through to the drawing parser.

/// Settings for one conversion call.
///
/// A `DecodingSettings` is constructed fresh for each call from the
/// caller's current values, is immutable once handed to the pipeline, and
/// is passed unchanged to the parser.  The pipeline itself does not
/// interpret any of these fields.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingSettings {
    /// Whether the parser should emit portable helper references instead
    /// of host-native constructs for text and embedded-image handling.
    pub include_runtime_helpers: bool,

    /// Whether text runs are converted to path geometry.
    pub render_text_as_geometry: bool,

    /// Whether path geometry may be simplified while building the drawing.
    pub optimize_path_geometry: bool,

    /// Locale used by the parser for language-conditional content.  When
    /// unset, the parser's own default locale applies.
    pub culture_override: Option<String>,
}

impl Default for DecodingSettings {
    fn default() -> Self {
        DecodingSettings {
            include_runtime_helpers: true,
            render_text_as_geometry: false,
            optimize_path_geometry: true,
            culture_override: None,
        }
    }
}

impl DecodingSettings {
    /// Creates settings with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_runtime_helpers(mut self, include: bool) -> Self {
        self.include_runtime_helpers = include;
        self
    }

    pub fn with_text_as_geometry(mut self, as_geometry: bool) -> Self {
        self.render_text_as_geometry = as_geometry;
        self
    }

    pub fn with_optimized_path_geometry(mut self, optimize: bool) -> Self {
        self.optimize_path_geometry = optimize;
        self
    }

    /// Sets the locale for language-conditional content.
    ///
    /// Setting an empty or absent value is a no-op; the prior value is
    /// retained.
    pub fn with_culture(mut self, culture: Option<&str>) -> Self {
        if let Some(culture) = culture {
            let culture = culture.trim();
            if !culture.is_empty() {
                self.culture_override = Some(culture.to_string());
            }
        }
        self
    }
}

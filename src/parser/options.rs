//! Heading-extraction thresholds.

use crate::model::{font_flags, UNTITLED};

/// Options controlling heading and title detection.
///
/// Heading candidacy is decided per span: there is no comparison against
/// the document's body text size beyond `min_heading_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractorOptions {
    /// Smallest font size (points) a heading may use
    pub min_heading_size: f32,

    /// Minimum heading length in characters (inclusive)
    pub min_heading_length: usize,

    /// Maximum heading length in characters (inclusive)
    pub max_heading_length: usize,

    /// Flag bits that make a span a heading regardless of its text pattern
    pub emphasis_flags: u32,

    /// Number of distinct font sizes mapped to levels (at most 3)
    pub max_levels: usize,

    /// How many leading spans are examined for the title
    pub title_scan_spans: usize,

    /// Title length must be strictly greater than this
    pub title_min_length: usize,

    /// Title length must be strictly less than this
    pub title_max_length: usize,

    /// Title used when no span qualifies
    pub fallback_title: String,
}

impl ExtractorOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the minimum heading font size.
    pub fn with_min_heading_size(mut self, size: f32) -> Self {
        self.min_heading_size = size;
        self
    }

    /// Set the inclusive heading length bounds.
    pub fn with_heading_length(mut self, min: usize, max: usize) -> Self {
        self.min_heading_length = min;
        self.max_heading_length = max;
        self
    }

    /// Set the flag bits treated as emphasis.
    pub fn with_emphasis_flags(mut self, flags: u32) -> Self {
        self.emphasis_flags = flags;
        self
    }

    /// Set the number of heading levels (clamped to 1..=3).
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels.clamp(1, 3);
        self
    }

    /// Set how many leading spans are scanned for the title.
    pub fn with_title_scan_spans(mut self, spans: usize) -> Self {
        self.title_scan_spans = spans;
        self
    }

    /// Set the exclusive title length bounds.
    pub fn with_title_length(mut self, min: usize, max: usize) -> Self {
        self.title_min_length = min;
        self.title_max_length = max;
        self
    }

    /// Set the fallback title.
    pub fn with_fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            min_heading_size: 10.0,
            min_heading_length: 3,
            max_heading_length: 200,
            emphasis_flags: font_flags::BOLD,
            max_levels: 3,
            title_scan_spans: 10,
            title_min_length: 5,
            title_max_length: 100,
            fallback_title: UNTITLED.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ExtractorOptions::default();
        assert_eq!(options.min_heading_size, 10.0);
        assert_eq!(options.min_heading_length, 3);
        assert_eq!(options.max_heading_length, 200);
        assert_eq!(options.emphasis_flags, 16);
        assert_eq!(options.title_scan_spans, 10);
        assert_eq!(options.fallback_title, "Untitled Document");
    }

    #[test]
    fn test_options_builder() {
        let options = ExtractorOptions::new()
            .with_min_heading_size(12.5)
            .with_heading_length(4, 80)
            .with_max_levels(7)
            .with_fallback_title("Unknown");

        assert_eq!(options.min_heading_size, 12.5);
        assert_eq!(options.min_heading_length, 4);
        assert_eq!(options.max_heading_length, 80);
        assert_eq!(options.max_levels, 3);
        assert_eq!(options.fallback_title, "Unknown");
    }
}

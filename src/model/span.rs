//! Text spans with formatting metadata.

use serde::{Deserialize, Serialize};

/// Font flag bits attached to a span.
///
/// The layout is the common one used by PDF text extractors:
/// bit 0 superscript, bit 1 italic, bit 2 serif, bit 3 monospace, bit 4 bold.
pub mod font_flags {
    /// Superscript glyphs.
    pub const SUPERSCRIPT: u32 = 1 << 0;
    /// Italic or oblique face.
    pub const ITALIC: u32 = 1 << 1;
    /// Serif face.
    pub const SERIF: u32 = 1 << 2;
    /// Monospaced face.
    pub const MONOSPACE: u32 = 1 << 3;
    /// Bold face.
    pub const BOLD: u32 = 1 << 4;

    /// Derive flag bits from a base font name such as `Helvetica-BoldOblique`.
    pub fn from_font_name(name: &str) -> u32 {
        let lower = name.to_lowercase();
        let mut flags = 0;

        if lower.contains("bold") || lower.contains("black") || lower.contains("heavy") {
            flags |= BOLD;
        }
        if lower.contains("italic") || lower.contains("oblique") {
            flags |= ITALIC;
        }
        if lower.contains("courier") || lower.contains("mono") {
            flags |= MONOSPACE;
        }
        if lower.contains("times") || (lower.contains("serif") && !lower.contains("sans")) {
            flags |= SERIF;
        }

        flags
    }
}

/// Axis-aligned bounding box in PDF user space: `(x0, y0, x1, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Create a bounding box from its corners.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the box.
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }
}

/// A run of text sharing one font, as produced by a document source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content (trimmed, never empty when produced by a source)
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Font flag bits, see [`font_flags`]
    pub font_flags: u32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Page number (1-indexed)
    pub page: u32,
    /// Approximate bounding box
    pub bbox: BoundingBox,
    /// Position of this span in the document-wide scan order
    pub original_order: usize,
}

impl TextSpan {
    /// Create a span; flags are derived from the font name.
    pub fn new(text: impl Into<String>, font_size: f32, font_name: impl Into<String>, page: u32) -> Self {
        let font_name = font_name.into();
        Self {
            text: text.into(),
            font_size,
            font_flags: font_flags::from_font_name(&font_name),
            font_name,
            page,
            bbox: BoundingBox::default(),
            original_order: 0,
        }
    }

    /// Override the font flag bits.
    pub fn with_flags(mut self, flags: u32) -> Self {
        self.font_flags = flags;
        self
    }

    /// Set the bounding box.
    pub fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = bbox;
        self
    }

    /// Set the scan-order index.
    pub fn with_order(mut self, order: usize) -> Self {
        self.original_order = order;
        self
    }

    /// Whether the bold bit is set.
    pub fn is_bold(&self) -> bool {
        self.font_flags & font_flags::BOLD != 0
    }

    /// Whether the italic bit is set.
    pub fn is_italic(&self) -> bool {
        self.font_flags & font_flags::ITALIC != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_span_bold_detection() {
        let span = TextSpan::new("Hello", 12.0, "Helvetica-Bold", 1);
        assert!(span.is_bold());
        assert!(!span.is_italic());

        let span = TextSpan::new("Hello", 12.0, "Arial-BoldItalic", 1);
        assert!(span.is_bold());
        assert!(span.is_italic());

        let span = TextSpan::new("Hello", 12.0, "Times-Roman", 1);
        assert!(!span.is_bold());
        assert_eq!(span.font_flags, font_flags::SERIF);
    }

    #[test]
    fn test_font_flags_from_name() {
        assert_eq!(font_flags::from_font_name("Courier"), font_flags::MONOSPACE);
        assert_eq!(font_flags::from_font_name("DejaVuSans"), 0);
        assert_eq!(
            font_flags::from_font_name("Helvetica-BoldOblique"),
            font_flags::BOLD | font_flags::ITALIC
        );
    }

    #[test]
    fn test_with_flags_overrides_name() {
        let span = TextSpan::new("Plain", 11.0, "Helvetica", 2).with_flags(16);
        assert!(span.is_bold());
        assert_eq!(span.page, 2);
    }

    #[test]
    fn test_bounding_box_dimensions() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 32.0);
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 12.0);
    }
}

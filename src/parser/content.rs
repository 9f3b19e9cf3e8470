//! Content-stream walking: turns a page's text operators into spans.

use std::collections::BTreeMap;

use lopdf::{Document as LopdfDocument, Object};

use crate::error::{Error, Result};
use crate::model::{font_flags, BoundingBox, TextSpan};

/// Approximate descender depth relative to the font size.
const DESCENDER: f32 = 0.2;
/// Approximate ascender height relative to the font size.
const ASCENDER: f32 = 0.8;
/// Average glyph width relative to the font size, used for bbox widths.
const AVG_CHAR_WIDTH: f32 = 0.5;
/// TJ adjustment (thousandths of text space) treated as a word gap.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Baseline difference, relative to the font size, still treated as one line.
const BASELINE_TOLERANCE: f32 = 0.3;
/// Horizontal gap, relative to the font size, that separates two words.
const WORD_GAP: f32 = 0.15;

/// Collects spans from the decoded operations of one page.
///
/// Consecutive show operators that keep the same font, size and baseline
/// are merged into one span, so a heading drawn piece by piece still reads
/// as a single run of text.
pub(crate) struct SpanCollector<'a> {
    doc: &'a LopdfDocument,
    fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
    page: u32,
}

impl<'a> SpanCollector<'a> {
    pub(crate) fn new(
        doc: &'a LopdfDocument,
        fonts: &'a BTreeMap<Vec<u8>, &'a lopdf::Dictionary>,
        page: u32,
    ) -> Self {
        Self { doc, fonts, page }
    }

    /// Walk a raw content stream and return its non-empty text spans.
    pub(crate) fn collect(&self, content: &[u8]) -> Result<Vec<TextSpan>> {
        let content =
            lopdf::content::Content::decode(content).map_err(|e| Error::PdfParse(e.to_string()))?;

        let mut spans = Vec::new();
        let mut pending: Option<PendingSpan> = None;
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut matrix = TextMatrix::default();
        let mut in_text = false;

        for op in content.operations {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix = TextMatrix::default();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if op.operands.len() >= 2 {
                        if let Object::Name(name) = &op.operands[0] {
                            font_key = name.clone();
                            font_name = self.base_font(name);
                        }
                        font_size = get_number(&op.operands[1]).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = op.operands.first().and_then(get_number) {
                        matrix.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if op.operands.len() >= 2 {
                        let tx = get_number(&op.operands[0]).unwrap_or(0.0);
                        let ty = get_number(&op.operands[1]).unwrap_or(0.0);
                        if op.operator == "TD" {
                            matrix.leading = -ty;
                        }
                        matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if op.operands.len() >= 6 {
                        matrix.set(
                            get_number(&op.operands[0]).unwrap_or(1.0),
                            get_number(&op.operands[1]).unwrap_or(0.0),
                            get_number(&op.operands[2]).unwrap_or(0.0),
                            get_number(&op.operands[3]).unwrap_or(1.0),
                            get_number(&op.operands[4]).unwrap_or(0.0),
                            get_number(&op.operands[5]).unwrap_or(0.0),
                        );
                    }
                }
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" if in_text => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    let text = match op.operator.as_str() {
                        "TJ" => match op.operands.first() {
                            Some(Object::Array(items)) => self.decode_array(&font_key, items),
                            _ => String::new(),
                        },
                        "\"" => self.decode_operand(&font_key, op.operands.get(2)),
                        _ => self.decode_operand(&font_key, op.operands.first()),
                    };
                    if text.is_empty() {
                        continue;
                    }

                    let (x, y) = matrix.position();
                    let size = font_size * matrix.scale();
                    let chars = text.chars().count() as f32;
                    let end_x = x + chars * size * AVG_CHAR_WIDTH;
                    matrix.advance(chars * font_size * AVG_CHAR_WIDTH);

                    if let Some(open) = pending
                        .as_mut()
                        .filter(|p| p.continues(&font_name, size, x, y))
                    {
                        open.push(&text, x, end_x);
                    } else {
                        spans.extend(pending.take().and_then(|p| p.finish(self.page)));
                        pending = Some(PendingSpan {
                            text,
                            font_name: font_name.clone(),
                            font_size: size,
                            x0: x,
                            baseline: y,
                            end_x,
                        });
                    }
                }
                "'" | "\"" => matrix.next_line(),
                _ => {}
            }
        }
        spans.extend(pending.and_then(|p| p.finish(self.page)));

        Ok(spans)
    }

    fn base_font(&self, key: &[u8]) -> String {
        self.fonts
            .get(key)
            .and_then(|font| font.get(b"BaseFont").ok())
            .and_then(|o| o.as_name().ok())
            .map(|n| String::from_utf8_lossy(n).to_string())
            .unwrap_or_else(|| String::from_utf8_lossy(key).to_string())
    }

    fn decode_bytes(&self, font_key: &[u8], bytes: &[u8]) -> String {
        // lopdf asserts the dictionary type before reading the encoding
        let encoding = self
            .fonts
            .get(font_key)
            .filter(|f| f.type_is(b"Font"))
            .and_then(|f| f.get_font_encoding(self.doc).ok());

        match encoding {
            Some(ref enc) => LopdfDocument::decode_text(enc, bytes)
                .unwrap_or_else(|_| decode_text_simple(bytes)),
            None => decode_text_simple(bytes),
        }
    }

    fn decode_operand(&self, font_key: &[u8], operand: Option<&Object>) -> String {
        match operand {
            Some(Object::String(bytes, _)) => self.decode_bytes(font_key, bytes),
            _ => String::new(),
        }
    }

    /// Decode a TJ array; large negative kerning becomes a space.
    fn decode_array(&self, font_key: &[u8], items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode_bytes(font_key, bytes)),
                other => {
                    let adjustment = -get_number(other).unwrap_or(0.0);
                    if adjustment > TJ_SPACE_THRESHOLD
                        && !combined.is_empty()
                        && !combined.ends_with(' ')
                        && !combined.ends_with('\u{00A0}')
                    {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Text gathered for one span until the font, size or baseline changes.
struct PendingSpan {
    text: String,
    font_name: String,
    font_size: f32,
    x0: f32,
    baseline: f32,
    end_x: f32,
}

impl PendingSpan {
    /// Whether text shown at `(x, y)` in this font continues the span.
    fn continues(&self, font_name: &str, font_size: f32, x: f32, y: f32) -> bool {
        self.font_name == font_name
            && (self.font_size - font_size).abs() < 0.01
            && (self.baseline - y).abs() <= self.font_size * BASELINE_TOLERANCE
            && x >= self.x0
    }

    fn push(&mut self, text: &str, x: f32, end_x: f32) {
        let gap = x - self.end_x;
        if gap > self.font_size * WORD_GAP
            && !self.text.ends_with(char::is_whitespace)
            && !text.starts_with(char::is_whitespace)
        {
            self.text.push(' ');
        }
        self.text.push_str(text);
        self.end_x = self.end_x.max(end_x);
    }

    /// The finished span; `None` when only whitespace was shown.
    fn finish(self, page: u32) -> Option<TextSpan> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }

        let size = self.font_size;
        let bbox = BoundingBox::new(
            self.x0,
            self.baseline - size * DESCENDER,
            self.end_x,
            self.baseline + size * ASCENDER,
        );

        Some(
            TextSpan::new(text, size, &self.font_name, page)
                .with_flags(font_flags::from_font_name(&self.font_name))
                .with_bbox(bbox),
        )
    }
}

/// Text state between BT and ET: the line matrix plus the estimated
/// advance of text shown since the line started.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    leading: f32,
    line_advance: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            leading: 12.0,
            line_advance: 0.0,
        }
    }
}

impl TextMatrix {
    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        let leading = self.leading;
        *self = Self {
            a,
            b,
            c,
            d,
            e,
            f,
            leading,
            line_advance: 0.0,
        };
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.e += tx * self.a + ty * self.c;
        self.f += tx * self.b + ty * self.d;
        self.line_advance = 0.0;
    }

    /// Move the current point along the line by `tx` text-space units.
    fn advance(&mut self, tx: f32) {
        self.line_advance += tx;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    fn position(&self) -> (f32, f32) {
        (
            self.e + self.line_advance * self.a,
            self.f + self.line_advance * self.b,
        )
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Decode bytes when the font has no usable encoding: UTF-16BE with BOM,
/// then UTF-8, then Latin-1.
pub(crate) fn decode_text_simple(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&utf16);
    }

    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }

    bytes.iter().map(|&b| b as char).collect()
}

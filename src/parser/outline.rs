//! Heading detection and outline assembly.
//!
//! Candidates are picked span by span from their text pattern and font
//! flags, deduplicated, then leveled by ranking the distinct font sizes of
//! the surviving candidates. Only the largest three sizes become levels;
//! candidates at any other size are dropped.

use std::collections::HashSet;

use regex::{Regex, RegexSet};

use crate::model::{Extraction, HeadingCandidate, HeadingLevel, Outline, TextSpan};

use super::backend::DocumentSource;
use super::options::ExtractorOptions;

/// Extracts a title and leveled outline from a span stream.
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    options: ExtractorOptions,
    whitespace: Regex,
    disallowed: Regex,
    numbered: Regex,
    heading_patterns: RegexSet,
}

impl OutlineExtractor {
    /// Create an extractor with default options.
    pub fn new() -> Self {
        Self::with_options(ExtractorOptions::default())
    }

    /// Create an extractor with custom options.
    pub fn with_options(options: ExtractorOptions) -> Self {
        Self {
            options,
            whitespace: Regex::new(r"\s+").unwrap(),
            disallowed: Regex::new(r"[^\w\s\-.,:;!?()\[\]{}]").unwrap(),
            numbered: Regex::new(r"^\d+\.?\s+").unwrap(),
            heading_patterns: RegexSet::new([
                r"^\d+\.?\s+",
                r"^[A-Z][a-z\s]+$",
                r"^[A-Z\s]+$",
                r"^Chapter\s+\d+",
                r"^Section\s+\d+",
                r"^Part\s+\d+",
            ])
            .unwrap(),
        }
    }

    /// Options in use.
    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Normalize span text: collapse whitespace, trim, drop characters
    /// outside letters, digits, whitespace and basic punctuation.
    pub fn clean_text(&self, text: &str) -> String {
        let collapsed = self.whitespace.replace_all(text, " ");
        self.disallowed
            .replace_all(collapsed.trim(), "")
            .into_owned()
    }

    /// Whether cleaned text at this size and with these flags looks like a heading.
    pub fn is_heading_candidate(&self, text: &str, font_size: f32, font_flags: u32) -> bool {
        let len = text.chars().count();
        if len < self.options.min_heading_length || len > self.options.max_heading_length {
            return false;
        }
        if font_size < self.options.min_heading_size {
            return false;
        }

        self.heading_patterns.is_match(text) || font_flags & self.options.emphasis_flags != 0
    }

    /// Pick the document title from the first spans on page 1.
    ///
    /// The largest font wins; on equal sizes the earliest span wins.
    pub fn extract_title(&self, spans: &[TextSpan]) -> String {
        let mut best: Option<(String, f32)> = None;

        for span in spans.iter().take(self.options.title_scan_spans) {
            if span.page != 1 {
                continue;
            }
            let text = self.clean_text(&span.text);
            let len = text.chars().count();
            if len <= self.options.title_min_length || len >= self.options.title_max_length {
                continue;
            }
            if self.numbered.is_match(&text) {
                continue;
            }

            let larger = best
                .as_ref()
                .map_or(true, |(_, size)| span.font_size > *size);
            if larger {
                best = Some((text, span.font_size));
            }
        }

        best.map(|(text, _)| text)
            .unwrap_or_else(|| self.options.fallback_title.clone())
    }

    /// Detect, deduplicate and level the headings of a span stream.
    ///
    /// `original_order` of each candidate is the span's index in `spans`.
    pub fn extract_headings(&self, spans: &[TextSpan]) -> Vec<HeadingCandidate> {
        let candidates = spans.iter().enumerate().filter_map(|(i, span)| {
            let text = self.clean_text(&span.text);
            self.is_heading_candidate(&text, span.font_size, span.font_flags)
                .then(|| HeadingCandidate {
                    text,
                    font_size: span.font_size,
                    font_flags: span.font_flags,
                    page: span.page,
                    original_order: i,
                    level: None,
                })
        });

        let mut seen = HashSet::new();
        let unique: Vec<HeadingCandidate> = candidates
            .filter(|c| seen.insert(c.dedup_key()))
            .collect();

        self.classify_levels(unique)
    }

    /// Assign H1..H3 by distinct font size and drop everything smaller.
    ///
    /// The result is in reading order: page, then scan order.
    pub fn classify_levels(&self, mut candidates: Vec<HeadingCandidate>) -> Vec<HeadingCandidate> {
        let mut sizes: Vec<f32> = candidates.iter().map(|c| c.font_size).collect();
        sizes.sort_by(|a, b| b.total_cmp(a));
        sizes.dedup();
        sizes.truncate(self.options.max_levels.min(HeadingLevel::ALL.len()));

        candidates.retain_mut(|c| {
            match sizes.iter().position(|size| *size == c.font_size) {
                Some(rank) => {
                    c.level = HeadingLevel::from_rank(rank);
                    true
                }
                None => false,
            }
        });

        candidates.sort_by_key(|c| (c.page, c.original_order));
        candidates
    }

    /// Build the outline for a span stream.
    pub fn extract(&self, spans: &[TextSpan]) -> Outline {
        if spans.is_empty() {
            return Outline::new(self.options.fallback_title.clone(), Vec::new());
        }

        let title = self.extract_title(spans);
        let headings = self
            .extract_headings(spans)
            .iter()
            .filter_map(HeadingCandidate::to_entry)
            .collect();

        Outline::new(title, headings)
    }

    /// Build the outline for a document source.
    ///
    /// A source that fails to produce spans yields the fallback outline,
    /// marked as degraded.
    pub fn extract_from_source<S: DocumentSource + ?Sized>(&self, source: &S) -> Extraction<Outline> {
        match source.spans() {
            Ok(spans) => Extraction::Complete(self.extract(&spans)),
            Err(cause) => {
                log::warn!("Span extraction failed: {}", cause);
                Extraction::degraded(
                    Outline::new(self.options.fallback_title.clone(), Vec::new()),
                    cause,
                )
            }
        }
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}

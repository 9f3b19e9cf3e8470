//! # pdfsections
//!
//! Heading outlines and persona-driven section ranking for PDF documents.
//!
//! The crate has two stages. The first reads the text spans of a PDF with
//! their font metadata and builds an outline: a title plus H1/H2/H3
//! headings with page numbers. The second takes the outlines of a document
//! collection, ranks each document's headings by TF-IDF similarity to a
//! persona and a job to be done, and extracts a short excerpt from the page
//! of every ranked heading.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsections::{extract_outline_file, rank_outline, render};
//!
//! fn main() -> pdfsections::Result<()> {
//!     // Build the outline of a PDF
//!     let outline = extract_outline_file("manual.pdf").into_value();
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!
//!     // Rank its headings for a persona and job
//!     let ranked = rank_outline("manual.pdf", &outline, "Safety Inspector", "audit kitchen safety");
//!     for section in ranked {
//!         println!("{} {} (p. {})", section.rank, section.section_title, section.page);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Outline extraction**: font-size levels, bold and pattern based heading detection
//! - **Section ranking**: TF-IDF cosine similarity against persona and job keywords
//! - **Excerpts**: sentence filtering on the page of each ranked heading
//! - **Collections**: directory-level processing with JSON reports
//! - **Best effort**: unreadable inputs yield degraded defaults instead of errors

pub mod batch;
pub mod collection;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod rank;
pub mod render;

// Re-export commonly used types
pub use batch::{BatchItem, OutlineBatch};
pub use collection::{
    process_collection, CollectionOptions, CollectionOutcome, CollectionProcessor,
    CollectionReport, CollectionRequest,
};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf};
pub use error::{Error, Result};
pub use model::{
    Extraction, HeadingLevel, Outline, OutlineEntry, RankedSection, SectionHeading,
    SubsectionSummary, TextSpan,
};
pub use parser::{DocumentSource, ExtractorOptions, LopdfSource, OutlineExtractor};
pub use rank::{
    extract_subsections_summary, parse_persona_and_job, score_sections, RankOptions,
    SectionRanker,
};
pub use render::JsonFormat;

use std::path::Path;

/// Extract the outline of a PDF file with default options.
///
/// Never fails: a file that cannot be opened or parsed yields the
/// `"Untitled Document"` outline, marked as degraded.
///
/// # Example
///
/// ```no_run
/// use pdfsections::extract_outline_file;
///
/// let outline = extract_outline_file("document.pdf");
/// if let Some(cause) = outline.cause() {
///     eprintln!("degraded: {}", cause);
/// }
/// println!("{}", outline.value().title);
/// ```
pub fn extract_outline_file<P: AsRef<Path>>(path: P) -> Extraction<Outline> {
    extract_outline_with(path, &OutlineExtractor::new())
}

/// Extract the outline of a PDF file with a configured extractor.
///
/// # Example
///
/// ```no_run
/// use pdfsections::{extract_outline_with, ExtractorOptions, OutlineExtractor};
///
/// let extractor = OutlineExtractor::with_options(
///     ExtractorOptions::new().with_min_heading_size(12.0),
/// );
/// let outline = extract_outline_with("document.pdf", &extractor).into_value();
/// ```
pub fn extract_outline_with<P: AsRef<Path>>(path: P, extractor: &OutlineExtractor) -> Extraction<Outline> {
    let path = path.as_ref();
    match LopdfSource::open(path) {
        Ok(source) => extractor.extract_from_source(&source),
        Err(cause) => {
            log::warn!("Cannot open {}: {}", path.display(), cause);
            Extraction::degraded(fallback_outline(extractor), cause)
        }
    }
}

/// Extract the outline of an in-memory PDF with default options.
pub fn extract_outline_bytes(data: &[u8]) -> Extraction<Outline> {
    let extractor = OutlineExtractor::new();
    match detect_format_from_bytes(data).and_then(|_| LopdfSource::from_bytes(data)) {
        Ok(source) => extractor.extract_from_source(&source),
        Err(cause) => Extraction::degraded(fallback_outline(&extractor), cause),
    }
}

/// Rank an outline's headings for a persona and job (top 5).
pub fn rank_outline(document: &str, outline: &Outline, persona: &str, job: &str) -> Vec<RankedSection> {
    let headings: Vec<SectionHeading> = outline.headings.iter().map(SectionHeading::from).collect();
    let keywords = parse_persona_and_job(persona, job);
    score_sections(document, &headings, &keywords)
}

fn fallback_outline(extractor: &OutlineExtractor) -> Outline {
    Outline::new(extractor.options().fallback_title.clone(), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::UNTITLED;

    #[test]
    fn test_missing_file_degrades() {
        let outline = extract_outline_file("/nonexistent/file.pdf");
        assert!(outline.is_degraded());
        assert!(matches!(outline.cause(), Some(Error::Io(_))));
        assert_eq!(outline.value().title, UNTITLED);
        assert!(outline.value().is_empty());
    }

    #[test]
    fn test_bytes_not_pdf_degrades() {
        let outline = extract_outline_bytes(b"<!DOCTYPE html><html></html>");
        assert!(matches!(outline.cause(), Some(Error::UnknownFormat)));
        assert_eq!(outline.into_value().title, UNTITLED);
    }

    #[test]
    fn test_empty_bytes_degrade() {
        assert!(extract_outline_bytes(&[]).is_degraded());
    }

    #[test]
    fn test_truncated_pdf_degrades() {
        let outline = extract_outline_bytes(b"%PDF-1.7\n%truncated");
        assert!(outline.is_degraded());
        assert_eq!(outline.value().title, UNTITLED);
    }

    #[test]
    fn test_custom_fallback_title() {
        let extractor =
            OutlineExtractor::with_options(ExtractorOptions::new().with_fallback_title("Unknown"));
        let outline = extract_outline_with("/nonexistent/file.pdf", &extractor);
        assert_eq!(outline.value().title, "Unknown");
    }

    #[test]
    fn test_rank_outline() {
        let outline = Outline::new(
            "Kitchen Manual",
            vec![
                OutlineEntry::new(HeadingLevel::H1, "Introduction to Safety", 1),
                OutlineEntry::new(HeadingLevel::H2, "Kitchen Tools", 2),
                OutlineEntry::new(HeadingLevel::H2, "Safety Procedures", 3),
            ],
        );
        let ranked = rank_outline(
            "manual.pdf",
            &outline,
            "Safety Inspector",
            "inspect kitchen safety procedures",
        );
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].section_title, "Safety Procedures");
        assert_eq!(ranked[0].page, 3);
    }

    #[test]
    fn test_rank_empty_outline() {
        let ranked = rank_outline("a.pdf", &Outline::untitled(), "Chef", "cook");
        assert!(ranked.is_empty());
    }
}

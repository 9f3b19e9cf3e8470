//! Short excerpts for ranked sections.

use crate::error::Error;
use crate::model::Extraction;
use crate::parser::DocumentSource;

use super::options::RankOptions;

/// Build an excerpt from a page's raw text.
///
/// The text is split on `.`; a fragment is kept when it contains the
/// section title (case-insensitive) or has more than `min_words` words.
/// The first `max_sentences` kept fragments are trimmed and joined with
/// `". "`, followed by a final `.`. Returns an empty string when nothing
/// is kept.
pub fn summarize_page_text(
    page_text: &str,
    section_title: &str,
    max_sentences: usize,
    min_words: usize,
) -> String {
    let title = section_title.to_lowercase();
    let kept: Vec<&str> = page_text
        .split('.')
        .filter(|s| s.to_lowercase().contains(&title) || s.split_whitespace().count() > min_words)
        .map(str::trim)
        .take(max_sentences)
        .collect();

    if kept.is_empty() {
        return String::new();
    }
    format!("{}.", kept.join(". "))
}

/// Excerpt for a section on `page` of `source`, using default limits.
///
/// An unreadable page yields an empty excerpt marked as degraded.
pub fn extract_subsections_summary<S: DocumentSource + ?Sized>(
    source: &S,
    page: u32,
    section_title: &str,
) -> Extraction<String> {
    summarize_with_options(source, page, section_title, &RankOptions::default())
}

/// Like [`extract_subsections_summary`] with explicit limits.
pub fn summarize_with_options<S: DocumentSource + ?Sized>(
    source: &S,
    page: u32,
    section_title: &str,
    options: &RankOptions,
) -> Extraction<String> {
    if page == 0 {
        return Extraction::degraded(String::new(), Error::PageOutOfRange(0, source.page_count()));
    }

    match source.page_text(page) {
        Ok(text) => Extraction::Complete(summarize_page_text(
            &text,
            section_title,
            options.summary_sentences,
            options.summary_min_words,
        )),
        Err(cause) => Extraction::degraded(String::new(), cause),
    }
}

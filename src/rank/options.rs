//! Ranking and summary options.

/// Options for section ranking and excerpt building.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankOptions {
    /// Sections kept per document
    pub top_k: usize,

    /// Sentences kept in an excerpt
    pub summary_sentences: usize,

    /// A sentence with more words than this is kept even without the title
    pub summary_min_words: usize,
}

impl RankOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of sections kept per document.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the number of sentences per excerpt.
    pub fn with_summary_sentences(mut self, sentences: usize) -> Self {
        self.summary_sentences = sentences;
        self
    }

    /// Set the word count above which sentences are always kept.
    pub fn with_summary_min_words(mut self, words: usize) -> Self {
        self.summary_min_words = words;
        self
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            top_k: 5,
            summary_sentences: 3,
            summary_min_words: 6,
        }
    }
}

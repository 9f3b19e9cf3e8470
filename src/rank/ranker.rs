//! Section ranking by TF-IDF cosine similarity.

use crate::model::{RankedSection, SectionHeading};

use super::options::RankOptions;
use super::tfidf::TfidfVectorizer;

/// Ranks a document's headings against a keyword query.
#[derive(Debug, Clone, Default)]
pub struct SectionRanker {
    options: RankOptions,
}

impl SectionRanker {
    /// Create a ranker with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ranker with custom options.
    pub fn with_options(options: RankOptions) -> Self {
        Self { options }
    }

    /// Options in use.
    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Cosine similarity of each heading to the keyword query, in input order.
    ///
    /// The corpus is every heading text plus the space-joined keywords as
    /// one extra document.
    pub fn similarities(&self, headings: &[SectionHeading], keywords: &[String]) -> Vec<f64> {
        if headings.is_empty() {
            return Vec::new();
        }

        let mut corpus: Vec<&str> = headings.iter().map(|h| h.text.as_str()).collect();
        let query = keywords.join(" ");
        corpus.push(&query);

        let mut vectorizer = TfidfVectorizer::new();
        let mut vectors = vectorizer.fit_transform(&corpus);
        let query_vector = vectors.pop().unwrap_or_default();

        vectors
            .iter()
            .map(|v| v.dot(&query_vector).clamp(0.0, 1.0))
            .collect()
    }

    /// Top `top_k` headings of one document, most relevant first.
    ///
    /// Equal scores keep their input order.
    pub fn rank(
        &self,
        document: &str,
        headings: &[SectionHeading],
        keywords: &[String],
    ) -> Vec<RankedSection> {
        let scores = self.similarities(headings, keywords);

        let mut order: Vec<usize> = (0..headings.len()).collect();
        order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
        order.truncate(self.options.top_k);

        order
            .into_iter()
            .enumerate()
            .map(|(i, idx)| RankedSection {
                document: document.to_string(),
                page: headings[idx].page,
                section_title: headings[idx].text.clone(),
                relevance_score: scores[idx],
                rank: i + 1,
            })
            .collect()
    }
}

/// Rank headings with default options (top 5).
pub fn score_sections(
    document: &str,
    headings: &[SectionHeading],
    keywords: &[String],
) -> Vec<RankedSection> {
    SectionRanker::new().rank(document, headings, keywords)
}

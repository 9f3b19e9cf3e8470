//! Sparse TF-IDF vectors and cosine similarity.
//!
//! Tokens are lowercased runs of two or more word characters. Weights are
//! raw term counts times a smoothed idf, `ln((1 + n) / (1 + df)) + 1`, and
//! every vector is scaled to unit length so cosine similarity is a dot
//! product.

use std::collections::HashMap;

use regex::Regex;

/// A unit-length sparse vector indexed by vocabulary position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    weights: HashMap<usize, f64>,
}

impl SparseVector {
    /// Whether the vector has no non-zero component.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weight of one vocabulary entry.
    pub fn get(&self, index: usize) -> f64 {
        self.weights.get(&index).copied().unwrap_or(0.0)
    }

    /// Dot product; for unit vectors this is the cosine similarity.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.weights.len() <= other.weights.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .weights
            .iter()
            .map(|(index, w)| w * large.get(*index))
            .sum()
    }

    fn normalize(&mut self) {
        let norm = self.weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for w in self.weights.values_mut() {
                *w /= norm;
            }
        }
    }
}

/// Vocabulary and idf weights fitted on a corpus.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    token: Regex,
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Create an unfitted vectorizer.
    pub fn new() -> Self {
        Self {
            token: Regex::new(r"\b\w\w+\b").unwrap(),
            vocabulary: HashMap::new(),
            idf: Vec::new(),
        }
    }

    /// Lowercased tokens of a document.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        self.token
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Number of distinct terms seen during fitting.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Fit vocabulary and idf on `corpus` and return one unit vector per document.
    pub fn fit_transform<S: AsRef<str>>(&mut self, corpus: &[S]) -> Vec<SparseVector> {
        let tokenized: Vec<Vec<String>> = corpus.iter().map(|d| self.tokenize(d.as_ref())).collect();

        self.vocabulary.clear();
        let mut doc_freq: Vec<usize> = Vec::new();
        for tokens in &tokenized {
            let mut seen_here = vec![false; self.vocabulary.len()];
            for token in tokens {
                let next = self.vocabulary.len();
                let index = *self.vocabulary.entry(token.clone()).or_insert(next);
                if index == doc_freq.len() {
                    doc_freq.push(0);
                    seen_here.push(false);
                }
                if !seen_here[index] {
                    seen_here[index] = true;
                    doc_freq[index] += 1;
                }
            }
        }

        let n = corpus.len() as f64;
        self.idf = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        tokenized.iter().map(|tokens| self.vectorize(tokens)).collect()
    }

    /// Vectorize a document with the fitted vocabulary; unknown terms are ignored.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.vectorize(&self.tokenize(text))
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut vector = SparseVector::default();
        for token in tokens {
            if let Some(&index) = self.vocabulary.get(token) {
                *vector.weights.entry(index).or_insert(0.0) += 1.0;
            }
        }
        for (index, w) in vector.weights.iter_mut() {
            *w *= self.idf[*index];
        }
        vector.normalize();
        vector
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}

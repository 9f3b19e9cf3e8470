//! Ranking and summary records.

use serde::{Deserialize, Serialize};

use super::OutlineEntry;

/// The part of a heading the ranker looks at.
///
/// Deserializes from outline JSON entries; any `level` field is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionHeading {
    pub text: String,
    pub page: u32,
}

impl SectionHeading {
    /// Create a heading reference.
    pub fn new(text: impl Into<String>, page: u32) -> Self {
        Self {
            text: text.into(),
            page,
        }
    }
}

impl From<&OutlineEntry> for SectionHeading {
    fn from(entry: &OutlineEntry) -> Self {
        Self::new(entry.text.clone(), entry.page)
    }
}

/// A heading scored against a persona/job query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Document file name
    pub document: String,
    /// Page the heading appears on
    pub page: u32,
    /// Heading text
    pub section_title: String,
    /// Cosine similarity in `[0, 1]`
    pub relevance_score: f64,
    /// 1 = most relevant within the document
    pub rank: usize,
}

/// Excerpt drawn from the page of a ranked section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionSummary {
    pub document: String,
    pub page: u32,
    pub refined_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HeadingLevel;

    #[test]
    fn test_section_heading_ignores_level() {
        let heading: SectionHeading =
            serde_json::from_str(r#"{"level": "H4", "text": "Tips", "page": 3}"#).unwrap();
        assert_eq!(heading, SectionHeading::new("Tips", 3));
    }

    #[test]
    fn test_section_heading_from_entry() {
        let entry = OutlineEntry::new(HeadingLevel::H2, "Packing", 5);
        assert_eq!(SectionHeading::from(&entry), SectionHeading::new("Packing", 5));
    }
}

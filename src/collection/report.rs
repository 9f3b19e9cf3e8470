//! Collection output report.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{RankedSection, SubsectionSummary};

/// The report written for one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub metadata: ReportMetadata,
    pub extracted_sections: Vec<ExtractedSection>,
    pub subsection_analysis: Vec<SubsectionAnalysis>,
}

/// Request echo and run information.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File names of every PDF found in the collection
    pub documents: Vec<String>,
    /// Persona exactly as given in the request
    pub persona: Value,
    /// Job exactly as given in the request
    pub job_to_be_done: Value,
    /// Local time the report was produced, ISO-8601 without offset
    pub timestamp: String,
}

/// One ranked section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    pub importance_rank: usize,
}

impl From<&RankedSection> for ExtractedSection {
    fn from(section: &RankedSection) -> Self {
        Self {
            document: section.document.clone(),
            page_number: section.page,
            section_title: section.section_title.clone(),
            importance_rank: section.rank,
        }
    }
}

/// Excerpt for one ranked section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionAnalysis {
    pub document: String,
    pub page_number: u32,
    pub refined_text: String,
}

impl From<SubsectionSummary> for SubsectionAnalysis {
    fn from(summary: SubsectionSummary) -> Self {
        Self {
            document: summary.document,
            page_number: summary.page,
            refined_text: summary.refined_text,
        }
    }
}

/// Current local time in the report's timestamp format.
pub fn timestamp_now() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extracted_section_from_ranked() {
        let ranked = RankedSection {
            document: "guide.pdf".to_string(),
            page: 4,
            section_title: "Packing List".to_string(),
            relevance_score: 0.42,
            rank: 2,
        };
        let section = ExtractedSection::from(&ranked);
        assert_eq!(section.page_number, 4);
        assert_eq!(section.importance_rank, 2);
    }

    #[test]
    fn test_report_json_shape() {
        let report = CollectionReport {
            metadata: ReportMetadata {
                documents: vec!["a.pdf".to_string()],
                persona: json!({"role": "Planner"}),
                job_to_be_done: json!("Plan"),
                timestamp: "2025-01-01T10:00:00.000000".to_string(),
            },
            extracted_sections: vec![],
            subsection_analysis: vec![SubsectionAnalysis::from(SubsectionSummary {
                document: "a.pdf".to_string(),
                page: 1,
                refined_text: "Text.".to_string(),
            })],
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["metadata"]["persona"]["role"], "Planner");
        assert_eq!(value["metadata"]["job_to_be_done"], "Plan");
        assert_eq!(value["subsection_analysis"][0]["page_number"], 1);
        assert!(value["extracted_sections"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp_now();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
        assert_eq!(ts.len(), 26);
    }
}

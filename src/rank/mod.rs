//! Persona-driven section ranking and excerpt extraction.

mod keywords;
mod options;
mod ranker;
mod summary;
pub mod tfidf;

pub use keywords::{parse_persona_and_job, value_to_text};
pub use options::RankOptions;
pub use ranker::{score_sections, SectionRanker};
pub use summary::{extract_subsections_summary, summarize_page_text, summarize_with_options};

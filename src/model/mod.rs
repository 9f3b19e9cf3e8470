//! Data model shared by the outline extractor and the section ranker.
//!
//! Spans come from a document source, heading candidates and outlines are
//! produced by the extractor, ranked sections and summaries by the ranker.

mod extraction;
mod outline;
mod section;
mod span;

pub use extraction::Extraction;
pub use outline::{HeadingCandidate, HeadingLevel, Outline, OutlineEntry, UNTITLED};
pub use section::{RankedSection, SectionHeading, SubsectionSummary};
pub use span::{font_flags, BoundingBox, TextSpan};

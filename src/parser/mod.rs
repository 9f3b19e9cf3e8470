//! Outline extraction: document sources and the heading heuristic.

mod backend;
mod content;
mod options;
mod outline;

pub use backend::{DocumentSource, LopdfSource};
pub use options::ExtractorOptions;
pub use outline::OutlineExtractor;

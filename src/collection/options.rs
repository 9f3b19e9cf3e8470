//! Collection layout and processing options.

use crate::parser::ExtractorOptions;
use crate::rank::RankOptions;
use crate::render::JsonFormat;

/// Where a collection keeps its files, and how it is processed.
#[derive(Debug, Clone)]
pub struct CollectionOptions {
    /// Request file name inside the collection
    pub input_file: String,

    /// Report file name inside the collection
    pub output_file: String,

    /// Folder holding the PDFs
    pub pdf_dir: String,

    /// Folder holding one outline JSON per PDF (`<stem>.json`)
    pub heading_dir: String,

    /// Sub-directories of a base directory starting with this are collections
    pub collection_prefix: String,

    /// Report formatting
    pub json_format: JsonFormat,

    /// Ranking and summary settings
    pub rank: RankOptions,

    /// Heading extraction settings, used when building outline folders
    pub extractor: ExtractorOptions,

    /// Extract and save a missing outline instead of skipping the document
    pub extract_missing: bool,
}

impl CollectionOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request file name.
    pub fn with_input_file(mut self, name: impl Into<String>) -> Self {
        self.input_file = name.into();
        self
    }

    /// Set the report file name.
    pub fn with_output_file(mut self, name: impl Into<String>) -> Self {
        self.output_file = name.into();
        self
    }

    /// Set the collection directory prefix.
    pub fn with_collection_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.collection_prefix = prefix.into();
        self
    }

    /// Set the report JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set ranking options.
    pub fn with_rank_options(mut self, rank: RankOptions) -> Self {
        self.rank = rank;
        self
    }

    /// Extract outlines for PDFs whose heading file is missing.
    pub fn with_extract_missing(mut self, extract: bool) -> Self {
        self.extract_missing = extract;
        self
    }

    /// Set heading extraction options.
    pub fn with_extractor_options(mut self, extractor: ExtractorOptions) -> Self {
        self.extractor = extractor;
        self
    }
}

impl Default for CollectionOptions {
    fn default() -> Self {
        Self {
            input_file: "challenge1b_input.json".to_string(),
            output_file: "challenge1b_output.json".to_string(),
            pdf_dir: "PDFs".to_string(),
            heading_dir: "heading_jsons".to_string(),
            collection_prefix: "Collection".to_string(),
            json_format: JsonFormat::Pretty,
            rank: RankOptions::default(),
            extractor: ExtractorOptions::default(),
            extract_missing: false,
        }
    }
}

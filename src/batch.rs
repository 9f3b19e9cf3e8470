//! Outline extraction over a directory of PDFs.
//!
//! Every `*.pdf` directly inside the input directory produces a
//! `<stem>.json` outline in the output directory. A file that cannot be
//! read still gets an outline (the fallback title, no headings); only a
//! failed write marks the item as failed.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::Outline;
use crate::parser::{ExtractorOptions, OutlineExtractor};
use crate::render::{to_json, JsonFormat};

/// Result of extracting one file.
#[derive(Debug)]
pub struct BatchItem {
    /// Source PDF
    pub input: PathBuf,
    /// Outline JSON path
    pub output: PathBuf,
    /// True if the PDF could not be read and a fallback outline was written
    pub degraded: bool,
    /// Number of headings written, or the write error
    pub result: Result<usize>,
}

/// Writes outline JSON files for a folder of PDFs.
#[derive(Debug, Clone)]
pub struct OutlineBatch {
    extractor: OutlineExtractor,
    format: JsonFormat,
}

impl OutlineBatch {
    /// Create a batch runner with default extraction options.
    pub fn new() -> Self {
        Self::with_options(ExtractorOptions::default())
    }

    /// Create a batch runner with custom extraction options.
    pub fn with_options(options: ExtractorOptions) -> Self {
        Self {
            extractor: OutlineExtractor::with_options(options),
            format: JsonFormat::Pretty,
        }
    }

    /// Set the JSON format of written files.
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    /// PDFs the batch would process, sorted by name.
    pub fn inputs<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<PathBuf>> {
        crate::collection::list_pdfs(input_dir.as_ref())
    }

    /// Extract one PDF into `output_dir`.
    pub fn process_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, input: P, output_dir: Q) -> BatchItem {
        let input = input.as_ref().to_path_buf();
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = output_dir.as_ref().join(format!("{}.json", stem));

        let extraction = crate::extract_outline_with(&input, &self.extractor);
        let degraded = extraction.is_degraded();
        let outline = extraction.into_value();

        let result = self.write(&outline, &output).map(|()| outline.len());
        match &result {
            Ok(count) => log::info!("{} -> {} ({} headings)", input.display(), output.display(), count),
            Err(e) => log::warn!("Cannot write {}: {}", output.display(), e),
        }

        BatchItem {
            input,
            output,
            degraded,
            result,
        }
    }

    /// Extract every PDF in `input_dir` into `output_dir`, creating it if
    /// needed.
    pub fn run<P: AsRef<Path>, Q: AsRef<Path>>(&self, input_dir: P, output_dir: Q) -> Result<Vec<BatchItem>> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let inputs = self.inputs(input_dir)?;
        if inputs.is_empty() {
            log::warn!("No PDF files to process");
        }

        Ok(inputs
            .iter()
            .map(|input| self.process_file(input, output_dir))
            .collect())
    }

    fn write(&self, outline: &Outline, output: &Path) -> Result<()> {
        fs::write(output, to_json(outline, self.format)?)?;
        Ok(())
    }
}

impl Default for OutlineBatch {
    fn default() -> Self {
        Self::new()
    }
}

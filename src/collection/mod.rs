//! Persona-driven processing of document collections.
//!
//! A collection is a directory laid out as:
//!
//! ```text
//! Collection 1/
//! ├── challenge1b_input.json     persona and job to be done
//! ├── PDFs/                      the documents
//! └── heading_jsons/<stem>.json  one outline per document
//! ```
//!
//! Processing ranks every document's headings against the persona/job
//! keywords, pulls a short excerpt from the page of each ranked heading and
//! writes `challenge1b_output.json` next to the input.

mod options;
mod report;
mod request;

pub use options::CollectionOptions;
pub use report::{
    timestamp_now, CollectionReport, ExtractedSection, ReportMetadata, SubsectionAnalysis,
};
pub use request::{CollectionRequest, JOB_KEYS, PERSONA_KEYS};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::model::{SectionHeading, SubsectionSummary};
use crate::parser::{LopdfSource, OutlineExtractor};
use crate::rank::{parse_persona_and_job, summarize_with_options, SectionRanker};
use crate::render::to_json;

/// Outline file as far as ranking is concerned.
#[derive(Debug, Deserialize)]
struct HeadingFile {
    #[serde(default)]
    outline: Vec<SectionHeading>,
}

/// Result of processing one collection inside [`CollectionProcessor::run_each`].
#[derive(Debug)]
pub struct CollectionOutcome {
    /// Collection directory
    pub collection: PathBuf,
    /// Path of the written report, or why the collection was skipped
    pub result: Result<PathBuf>,
}

impl CollectionOutcome {
    /// Whether a report was written.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Processes collection directories.
#[derive(Debug, Clone, Default)]
pub struct CollectionProcessor {
    options: CollectionOptions,
    ranker: SectionRanker,
}

impl CollectionProcessor {
    /// Create a processor with default layout and ranking.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom options.
    pub fn with_options(options: CollectionOptions) -> Self {
        let ranker = SectionRanker::with_options(options.rank.clone());
        Self { options, ranker }
    }

    /// Options in use.
    pub fn options(&self) -> &CollectionOptions {
        &self.options
    }

    /// Sub-directories of `base` whose name starts with the collection
    /// prefix, sorted by name.
    pub fn discover<P: AsRef<Path>>(&self, base: P) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in fs::read_dir(base.as_ref())? {
            let path = entry?.path();
            let matches = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(&self.options.collection_prefix));
            if matches && path.is_dir() {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Build the report for one collection without writing it.
    pub fn process<P: AsRef<Path>>(&self, collection: P) -> Result<CollectionReport> {
        let dir = collection.as_ref();

        let input = dir.join(&self.options.input_file);
        if !input.is_file() {
            return Err(Error::MissingInput(format!(
                "{} not found in {}",
                self.options.input_file,
                dir.display()
            )));
        }
        let request = CollectionRequest::load(&input)?;

        let pdf_dir = require_dir(dir, &self.options.pdf_dir)?;
        let heading_dir = dir.join(&self.options.heading_dir);
        if !heading_dir.is_dir() {
            if self.options.extract_missing {
                fs::create_dir_all(&heading_dir)?;
            } else {
                require_dir(dir, &self.options.heading_dir)?;
            }
        }

        let pdfs = list_pdfs(&pdf_dir)?;
        if pdfs.is_empty() {
            return Err(Error::MissingInput(format!(
                "no PDF files in {}",
                pdf_dir.display()
            )));
        }

        let keywords = parse_persona_and_job(&request.persona_text(), &request.job_text());
        log::debug!("Keywords for {}: {:?}", dir.display(), keywords);

        let mut documents = Vec::with_capacity(pdfs.len());
        let mut extracted_sections = Vec::new();
        let mut subsection_analysis = Vec::new();

        for pdf in &pdfs {
            let name = file_name(pdf);
            documents.push(name.clone());

            let headings = match self.load_headings(pdf, &heading_dir) {
                Some(headings) => headings,
                None => continue,
            };

            let ranked = self.ranker.rank(&name, &headings, &keywords);

            let source = match LopdfSource::open(pdf) {
                Ok(source) => Some(source),
                Err(e) => {
                    log::warn!("Cannot read {} for excerpts: {}", name, e);
                    None
                }
            };

            for section in &ranked {
                extracted_sections.push(ExtractedSection::from(section));

                let refined_text = match &source {
                    Some(source) => {
                        let excerpt = summarize_with_options(
                            source,
                            section.page,
                            &section.section_title,
                            &self.options.rank,
                        );
                        if let Some(cause) = excerpt.cause() {
                            log::warn!("No excerpt for {} page {}: {}", name, section.page, cause);
                        }
                        excerpt.into_value()
                    }
                    None => String::new(),
                };

                subsection_analysis.push(SubsectionAnalysis::from(SubsectionSummary {
                    document: name.clone(),
                    page: section.page,
                    refined_text,
                }));
            }
        }

        Ok(CollectionReport {
            metadata: ReportMetadata {
                documents,
                persona: request.persona,
                job_to_be_done: request.job,
                timestamp: timestamp_now(),
            },
            extracted_sections,
            subsection_analysis,
        })
    }

    /// Process a collection and write its report. Returns the report path.
    pub fn run<P: AsRef<Path>>(&self, collection: P) -> Result<PathBuf> {
        let dir = collection.as_ref();
        log::info!("Processing collection {}", dir.display());

        let report = self.process(dir)?;
        let output = dir.join(&self.options.output_file);
        fs::write(&output, to_json(&report, self.options.json_format)?)?;

        log::info!(
            "Wrote {} ({} sections from {} documents)",
            output.display(),
            report.extracted_sections.len(),
            report.metadata.documents.len()
        );
        Ok(output)
    }

    /// Run every collection found under `base`.
    ///
    /// A failing collection is logged and reported in its outcome; the
    /// remaining collections are still processed.
    pub fn run_all<P: AsRef<Path>>(&self, base: P) -> Result<Vec<CollectionOutcome>> {
        let collections = self.discover(base)?;
        if collections.is_empty() {
            log::warn!(
                "No directories starting with '{}' found",
                self.options.collection_prefix
            );
        }
        Ok(self.run_each(collections, |_| {}))
    }

    /// Run the given collections in order, calling `on_done` after each.
    pub fn run_each<F>(&self, collections: Vec<PathBuf>, mut on_done: F) -> Vec<CollectionOutcome>
    where
        F: FnMut(&CollectionOutcome),
    {
        collections
            .into_iter()
            .map(|collection| {
                let result = self.run(&collection);
                if let Err(e) = &result {
                    log::warn!("Skipping {}: {}", collection.display(), e);
                }
                let outcome = CollectionOutcome { collection, result };
                on_done(&outcome);
                outcome
            })
            .collect()
    }

    /// Headings for one PDF, or `None` when the document should be skipped.
    fn load_headings(&self, pdf: &Path, heading_dir: &Path) -> Option<Vec<SectionHeading>> {
        let stem = pdf.file_stem()?.to_string_lossy();
        let heading_file = heading_dir.join(format!("{}.json", stem));

        if !heading_file.is_file() {
            if self.options.extract_missing {
                return self.extract_headings(pdf, &heading_file);
            }
            log::warn!("No heading file for {}, skipping", pdf.display());
            return None;
        }

        let parsed = fs::read_to_string(&heading_file)
            .map_err(Error::from)
            .and_then(|text| Ok(serde_json::from_str::<HeadingFile>(&text)?));
        match parsed {
            Ok(file) if file.outline.is_empty() => {
                log::warn!("No headings in {}, skipping", heading_file.display());
                None
            }
            Ok(file) => Some(file.outline),
            Err(e) => {
                log::warn!("Cannot read {}: {}, skipping", heading_file.display(), e);
                None
            }
        }
    }

    /// Extract an outline for `pdf`, save it to `heading_file` and return
    /// its headings.
    fn extract_headings(&self, pdf: &Path, heading_file: &Path) -> Option<Vec<SectionHeading>> {
        let extractor = OutlineExtractor::with_options(self.options.extractor.clone());
        let outline = crate::extract_outline_with(pdf, &extractor).into_value();

        match to_json(&outline, self.options.json_format)
            .and_then(|json| Ok(fs::write(heading_file, json)?))
        {
            Ok(()) => log::info!("Extracted outline to {}", heading_file.display()),
            Err(e) => log::warn!("Cannot save {}: {}", heading_file.display(), e),
        }

        if outline.is_empty() {
            log::warn!("No headings found in {}, skipping", pdf.display());
            return None;
        }
        Some(outline.headings.iter().map(SectionHeading::from).collect())
    }
}

/// Process one collection directory with default options.
pub fn process_collection<P: AsRef<Path>>(collection: P) -> Result<PathBuf> {
    CollectionProcessor::new().run(collection)
}

/// `*.pdf` files directly inside `dir`, sorted by name.
pub(crate) fn list_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut pdfs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            pdfs.push(path);
        }
    }
    pdfs.sort();
    Ok(pdfs)
}

fn require_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    let dir = parent.join(name);
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(Error::MissingInput(format!(
            "{} folder not found in {}",
            name,
            parent.display()
        )))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
    }

    fn collection(base: &Path, name: &str) -> PathBuf {
        let dir = base.join(name);
        fs::create_dir_all(dir.join("PDFs")).unwrap();
        fs::create_dir_all(dir.join("heading_jsons")).unwrap();
        write(
            &dir.join("challenge1b_input.json"),
            r#"{"persona": {"role": "Travel Planner"}, "job_to_be_done": {"task": "Plan a trip"}}"#,
        );
        dir
    }

    #[test]
    fn test_discover_sorted_with_prefix() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("Collection 2")).unwrap();
        fs::create_dir(base.path().join("Collection 1")).unwrap();
        fs::create_dir(base.path().join("other")).unwrap();
        write(&base.path().join("Collection.txt"), "not a dir");

        let found = CollectionProcessor::new().discover(base.path()).unwrap();
        let names: Vec<String> = found.iter().map(|p| file_name(p)).collect();
        assert_eq!(names, vec!["Collection 1", "Collection 2"]);
    }

    #[test]
    fn test_list_pdfs_sorted() {
        let dir = TempDir::new().unwrap();
        write(&dir.path().join("b.pdf"), "");
        write(&dir.path().join("a.pdf"), "");
        write(&dir.path().join("notes.txt"), "");

        let names: Vec<String> = list_pdfs(dir.path())
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_missing_input_file() {
        let base = TempDir::new().unwrap();
        let dir = base.path().join("Collection 1");
        fs::create_dir_all(&dir).unwrap();
        let result = CollectionProcessor::new().process(&dir);
        assert!(matches!(result, Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_missing_persona() {
        let base = TempDir::new().unwrap();
        let dir = collection(base.path(), "Collection 1");
        write(&dir.join("challenge1b_input.json"), r#"{"task": "Plan"}"#);
        let result = CollectionProcessor::new().process(&dir);
        assert!(matches!(result, Err(Error::MissingField(f)) if f == "persona"));
    }

    #[test]
    fn test_missing_pdf_folder() {
        let base = TempDir::new().unwrap();
        let dir = collection(base.path(), "Collection 1");
        fs::remove_dir(dir.join("PDFs")).unwrap();
        let result = CollectionProcessor::new().process(&dir);
        assert!(matches!(result, Err(Error::MissingInput(_))));
    }

    #[test]
    fn test_no_pdfs() {
        let base = TempDir::new().unwrap();
        let dir = collection(base.path(), "Collection 1");
        let result = CollectionProcessor::new().process(&dir);
        assert!(matches!(result, Err(Error::MissingInput(m)) if m.contains("no PDF")));
    }

    #[test]
    fn test_documents_without_headings_are_listed_but_not_ranked() {
        let base = TempDir::new().unwrap();
        let dir = collection(base.path(), "Collection 1");
        write(&dir.join("PDFs/a.pdf"), "not really a pdf");
        write(&dir.join("PDFs/b.pdf"), "not really a pdf");
        write(&dir.join("heading_jsons/b.json"), r#"{"title": "B", "outline": []}"#);

        let report = CollectionProcessor::new().process(&dir).unwrap();
        assert_eq!(report.metadata.documents, vec!["a.pdf", "b.pdf"]);
        assert!(report.extracted_sections.is_empty());
        assert!(report.subsection_analysis.is_empty());
    }

    #[test]
    fn test_unreadable_pdf_gets_empty_excerpts() {
        let base = TempDir::new().unwrap();
        let dir = collection(base.path(), "Collection 1");
        write(&dir.join("PDFs/guide.pdf"), "not really a pdf");
        write(
            &dir.join("heading_jsons/guide.json"),
            r#"{"title": "Guide", "outline": [
                {"level": "H1", "text": "Trip Planning Basics", "page": 1},
                {"level": "H2", "text": "Local Food", "page": 2}
            ]}"#,
        );

        let report = CollectionProcessor::new().process(&dir).unwrap();
        assert_eq!(report.extracted_sections.len(), 2);
        assert_eq!(report.extracted_sections[0].section_title, "Trip Planning Basics");
        assert_eq!(report.extracted_sections[0].importance_rank, 1);
        assert_eq!(report.subsection_analysis.len(), 2);
        assert!(report.subsection_analysis.iter().all(|s| s.refined_text.is_empty()));
        assert_eq!(report.metadata.persona["role"], "Travel Planner");
    }

    #[test]
    fn test_run_all_continues_after_failure() {
        let base = TempDir::new().unwrap();
        fs::create_dir(base.path().join("Collection 1")).unwrap();
        let good = collection(base.path(), "Collection 2");
        write(&good.join("PDFs/x.pdf"), "");

        let outcomes = CollectionProcessor::new().run_all(base.path()).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].is_success());
        assert!(outcomes[1].is_success());
        assert!(good.join("challenge1b_output.json").is_file());
    }

    #[test]
    fn test_run_each_reports_every_outcome() {
        let base = TempDir::new().unwrap();
        let missing = base.path().join("Collection 1");
        fs::create_dir(&missing).unwrap();
        let good = collection(base.path(), "Collection 2");
        write(&good.join("PDFs/x.pdf"), "");

        let mut seen = Vec::new();
        let outcomes = CollectionProcessor::new().run_each(
            vec![missing.clone(), good.clone()],
            |outcome| seen.push((outcome.collection.clone(), outcome.is_success())),
        );

        assert_eq!(seen, vec![(missing, false), (good, true)]);
        assert_eq!(outcomes.len(), 2);
    }
}

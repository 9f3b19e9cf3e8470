//! Document source abstraction.
//!
//! The extractor and the summarizer only need two things from a document:
//! the span stream with formatting metadata, and the raw text of a page.
//! [`DocumentSource`] isolates those from the concrete PDF library (lopdf).

use std::path::Path;

use lopdf::{Document as LopdfDocument, Object, ObjectId};

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::TextSpan;

use super::content::SpanCollector;

/// Provider of spans and page text for one document.
pub trait DocumentSource {
    /// All text spans of the document in scan order (page by page).
    ///
    /// Text shown piecewise on one baseline in one font is a single span.
    ///
    /// `original_order` of each span is its index in the returned vector.
    fn spans(&self) -> Result<Vec<TextSpan>>;

    /// Raw text of one page (1-indexed), spans joined with newlines.
    fn page_text(&self, page: u32) -> Result<String>;

    /// Number of pages.
    fn page_count(&self) -> u32;
}

/// [`DocumentSource`] backed by `lopdf::Document`.
pub struct LopdfSource {
    doc: LopdfDocument,
}

impl LopdfSource {
    /// Load from a file path after checking the `%PDF-` header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        detect_format_from_path(path)?;
        let doc = LopdfDocument::load(path)?;
        log::debug!("Loaded {} ({} pages)", path.display(), doc.get_pages().len());
        Ok(Self { doc })
    }

    /// Load from an in-memory byte slice.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let doc = LopdfDocument::load_mem(data)?;
        Ok(Self { doc })
    }

    /// Wrap an already loaded document.
    pub fn from_document(doc: LopdfDocument) -> Self {
        Self { doc }
    }

    fn page_spans(&self, page_num: u32, page_id: ObjectId) -> Result<Vec<TextSpan>> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let content = self.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        SpanCollector::new(&self.doc, &fonts, page_num).collect(&content)
    }

    /// Decompressed content stream(s) of a page; empty for pages without content.
    fn page_content(&self, page_id: ObjectId) -> Result<Vec<u8>> {
        let page_dict = self
            .doc
            .get_dictionary(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;

        let Ok(contents) = page_dict.get(b"Contents") else {
            return Ok(Vec::new());
        };

        match contents {
            Object::Reference(r) => match self.doc.get_object(*r) {
                Ok(Object::Stream(s)) => Ok(s
                    .decompressed_content()
                    .unwrap_or_else(|_| s.content.clone())),
                Ok(Object::Array(arr)) => Ok(self.concat_streams(arr)),
                _ => Err(Error::PdfParse("Invalid content stream".to_string())),
            },
            Object::Array(arr) => Ok(self.concat_streams(arr)),
            _ => Err(Error::PdfParse("Invalid content stream".to_string())),
        }
    }

    fn concat_streams(&self, refs: &[Object]) -> Vec<u8> {
        let mut content = Vec::new();
        for obj in refs {
            if let Object::Reference(r) = obj {
                if let Ok(Object::Stream(s)) = self.doc.get_object(*r) {
                    let data = s
                        .decompressed_content()
                        .unwrap_or_else(|_| s.content.clone());
                    content.extend_from_slice(&data);
                    content.push(b' ');
                }
            }
        }
        content
    }
}

impl DocumentSource for LopdfSource {
    fn spans(&self) -> Result<Vec<TextSpan>> {
        let mut spans = Vec::new();
        for (page_num, page_id) in self.doc.get_pages() {
            spans.extend(self.page_spans(page_num, page_id)?);
        }
        for (i, span) in spans.iter_mut().enumerate() {
            span.original_order = i;
        }
        Ok(spans)
    }

    fn page_text(&self, page: u32) -> Result<String> {
        let pages = self.doc.get_pages();
        let page_id = pages
            .get(&page)
            .ok_or(Error::PageOutOfRange(page, pages.len() as u32))?;

        let lines: Vec<String> = self
            .page_spans(page, *page_id)?
            .into_iter()
            .map(|s| s.text)
            .collect();
        Ok(lines.join("\n"))
    }

    fn page_count(&self) -> u32 {
        self.doc.get_pages().len() as u32
    }
}

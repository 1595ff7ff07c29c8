//! Document → raw text.
//!
//! PDFs are read page by page with `lopdf`; pages without text are skipped and
//! the rest joined with a single space. Plain-text files count as one page.

pub mod error;


pub use error::ExtractionError;

use std::path::Path;

use lopdf::Document as PdfDocument;
use tracing::{debug, warn};

/// One uploaded file: its name and raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, keeping only its file name.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self { file_name, bytes })
    }

    /// Detected kind: extension first, then the `%PDF-` magic.
    pub fn kind(&self) -> Option<DocumentKind> {
        let extension = Path::new(&self.file_name)
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => Some(DocumentKind::Pdf),
            Some("txt" | "md" | "text") => Some(DocumentKind::PlainText),
            _ if self.bytes.starts_with(PDF_MAGIC) => Some(DocumentKind::Pdf),
            _ => None,
        }
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

/// Document → text. Implementations must be deterministic for identical bytes.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, document: &Document) -> Result<String, ExtractionError>;
}

/// Default extractor dispatching on [`DocumentKind`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentTextExtractor;

impl DocumentTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn pdf_pages(document: &Document) -> Result<Vec<String>, ExtractionError> {
        let pdf =
            PdfDocument::load_mem(&document.bytes).map_err(|e| ExtractionError::Unreadable {
                file_name: document.file_name.clone(),
                reason: e.to_string(),
            })?;

        let pages = pdf.get_pages();
        let mut texts = Vec::with_capacity(pages.len());
        for page_number in pages.keys() {
            match pdf.extract_text(&[*page_number]) {
                Ok(text) => texts.push(text),
                Err(e) => {
                    warn!(
                        file = %document.file_name,
                        page = page_number,
                        error = %e,
                        "Skipping page without extractable text"
                    );
                    texts.push(String::new());
                }
            }
        }
        Ok(texts)
    }

    fn text_pages(document: &Document) -> Result<Vec<String>, ExtractionError> {
        let text =
            String::from_utf8(document.bytes.clone()).map_err(|e| ExtractionError::Unreadable {
                file_name: document.file_name.clone(),
                reason: e.to_string(),
            })?;
        Ok(vec![text])
    }
}

impl TextExtractor for DocumentTextExtractor {
    fn extract(&self, document: &Document) -> Result<String, ExtractionError> {
        let pages = match document.kind() {
            Some(DocumentKind::Pdf) => Self::pdf_pages(document)?,
            Some(DocumentKind::PlainText) => Self::text_pages(document)?,
            None => {
                return Err(ExtractionError::UnsupportedFormat {
                    file_name: document.file_name.clone(),
                });
            }
        };

        let page_count = pages.len();
        let text = join_pages(pages).ok_or_else(|| ExtractionError::NoExtractableText {
            file_name: document.file_name.clone(),
            pages: page_count,
        })?;

        debug!(
            file = %document.file_name,
            pages = page_count,
            chars = text.len(),
            "Extracted document text"
        );

        Ok(text)
    }
}

/// Joins non-blank pages with a space; `None` when every page is blank.
pub fn join_pages(pages: Vec<String>) -> Option<String> {
    let kept: Vec<String> = pages
        .into_iter()
        .filter(|page| !page.trim().is_empty())
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

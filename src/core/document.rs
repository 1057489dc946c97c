//! PDF Text Extraction
//!
//! Turns a PDF file into a paginated [`Document`]. Pages that yield no text
//! (scanned images, empty pages, broken content streams) are kept as
//! placeholders so page numbering never has gaps.

use std::path::Path;

use lopdf::Document as PdfDocument;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse PDF {path}: {message}")]
    Parse { path: String, message: String },
}

pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Number of characters shown at each end of the debug report.
const DEBUG_EXCERPT_CHARS: usize = 500;

// ============================================================================
// Document Types
// ============================================================================

/// One physical page of a loaded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Page number (1-indexed, physical order)
    pub page_number: u32,
    /// Extracted text; empty when `extracted` is false
    pub text: String,
    /// Whether any text could be pulled from the page
    pub extracted: bool,
}

impl Page {
    pub fn with_text(page_number: u32, text: impl Into<String>) -> Self {
        Self {
            page_number,
            text: text.into(),
            extracted: true,
        }
    }

    pub fn placeholder(page_number: u32) -> Self {
        Self {
            page_number,
            text: String::new(),
            extracted: false,
        }
    }

    /// The labeled section this page contributes to the document text.
    pub fn labeled(&self) -> String {
        if self.extracted {
            format!("\n--- Page {} ---\n{}", self.page_number, self.text)
        } else {
            format!("\n--- Page {} (No text extracted) ---\n", self.page_number)
        }
    }
}

/// The extracted text of one loaded PDF.
///
/// Built once per load and replaced wholesale by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub filename: String,
    pages: Vec<Page>,
}

impl Document {
    /// Assemble a document from pages, ordering them by page number.
    pub fn new(filename: impl Into<String>, mut pages: Vec<Page>) -> Self {
        pages.sort_by_key(|p| p.page_number);
        Self {
            filename: filename.into(),
            pages,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages that produced no text.
    pub fn missing_pages(&self) -> usize {
        self.pages.iter().filter(|p| !p.extracted).count()
    }

    /// Concatenation of every page's labeled section, in page order.
    pub fn full_text(&self) -> String {
        self.pages.iter().map(Page::labeled).collect()
    }

    /// Length of [`Document::full_text`] in characters.
    pub fn char_count(&self) -> usize {
        self.pages
            .iter()
            .map(|p| p.labeled().chars().count())
            .sum()
    }

    /// Human-readable summary used by the debug view.
    pub fn debug_report(&self) -> String {
        let text = self.full_text();
        let total = text.chars().count();

        let head: String = text.chars().take(DEBUG_EXCERPT_CHARS).collect();
        let tail: String = text
            .chars()
            .skip(total.saturating_sub(DEBUG_EXCERPT_CHARS))
            .collect();

        format!(
            "PDF Debug Information:\n\n\
             Filename: {}\n\
             Total characters: {}\n\
             Pages: {} ({} without text)\n\n\
             First {DEBUG_EXCERPT_CHARS} characters:\n{}\n\n\
             Last {DEBUG_EXCERPT_CHARS} characters:\n{}",
            self.filename,
            total,
            self.page_count(),
            self.missing_pages(),
            head,
            tail,
        )
    }
}

// ============================================================================
// PDF Extractor
// ============================================================================

pub struct PdfExtractor;

impl PdfExtractor {
    /// Extract every page of the PDF at `path`.
    ///
    /// Only a file that cannot be read or parsed as a PDF fails the whole
    /// operation. Individual pages that fail or come back blank become
    /// placeholders.
    pub fn extract(path: &Path) -> Result<Document> {
        let display = path.display().to_string();

        let bytes = std::fs::read(path).map_err(|source| ExtractionError::Io {
            path: display.clone(),
            source,
        })?;

        let doc = PdfDocument::load_mem(&bytes).map_err(|e| ExtractionError::Parse {
            path: display.clone(),
            message: e.to_string(),
        })?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        log::debug!("PDF {display} has {} pages", page_numbers.len());

        let mut pages = Vec::with_capacity(page_numbers.len());
        for page_number in page_numbers {
            let page = match doc.extract_text(&[page_number]) {
                Ok(text) if !text.trim().is_empty() => {
                    log::debug!(
                        "Page {page_number} extracted {} characters",
                        text.chars().count()
                    );
                    Page::with_text(page_number, text)
                }
                Ok(_) => {
                    log::debug!("Page {page_number} has no text layer");
                    Page::placeholder(page_number)
                }
                Err(e) => {
                    log::warn!("Text extraction failed on page {page_number} of {display}: {e}");
                    Page::placeholder(page_number)
                }
            };
            pages.push(page);
        }

        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());

        let document = Document::new(filename, pages);
        log::info!(
            "Extracted {} characters from {} ({} pages, {} without text)",
            document.char_count(),
            document.filename,
            document.page_count(),
            document.missing_pages()
        );

        Ok(document)
    }
}

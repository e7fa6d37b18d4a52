use std::path::{Path, PathBuf};

use lopdf::Document;

use crate::error::{AppError, Result};

/// A paged document the reader can display.
pub trait PageSource {
    /// Number of pages, fixed once the source is open.
    fn page_count(&self) -> usize;

    /// Plain text of the page at a 0-based `index`.
    fn page_text(&self, index: usize) -> Result<String>;
}

/// A PDF on disk, parsed with lopdf.
pub struct PdfFile {
    path: PathBuf,
    document: Document,
    /// lopdf page numbers, ordered, so a 0-based index maps to `page_numbers[index]`.
    page_numbers: Vec<u32>,
}

impl PdfFile {
    /// Load a PDF and index its pages
    pub fn open(path: &Path) -> Result<Self> {
        let document = Document::load(path).map_err(|e| AppError::PdfOpen {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let page_numbers: Vec<u32> = document.get_pages().keys().copied().collect();
        if page_numbers.is_empty() {
            return Err(AppError::PdfOpen {
                path: path.to_path_buf(),
                message: "document has no pages".to_string(),
            });
        }

        log::debug!("Indexed {} pages in {}", page_numbers.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            document,
            page_numbers,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageSource for PdfFile {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn page_text(&self, index: usize) -> Result<String> {
        let page_number = *self.page_numbers.get(index).ok_or_else(|| AppError::PageText {
            page: index + 1,
            message: "page out of range".to_string(),
        })?;

        self.document
            .extract_text(&[page_number])
            .map_err(|e| AppError::PageText {
                page: index + 1,
                message: e.to_string(),
            })
    }
}

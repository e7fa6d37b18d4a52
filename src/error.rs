use std::path::PathBuf;
use thiserror::Error;

/// Everything a pane operation can report back to the user.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Could not open PDF '{path}': {message}")]
    PdfOpen { path: PathBuf, message: String },

    #[error("Could not extract text from page {page}: {message}")]
    PageText { page: usize, message: String },

    #[error("Could not display image '{path}': {message}")]
    ImageDecode { path: PathBuf, message: String },

    #[error("Could not read folder '{path}': {message}")]
    FolderRead { path: PathBuf, message: String },

    #[error("Please open a PDF file first.")]
    NoDocument,

    #[error("Please open image files first.")]
    NoImages,

    #[error("No image files found in the selected folder.")]
    EmptyFolder { path: PathBuf },

    #[error("Slideshow delay must be between {min} and {max} seconds, got {value}")]
    InvalidDelay { value: String, min: u64, max: u64 },

    #[error("Speech synthesis failed: {message}")]
    Speech { message: String },
}

pub type Result<T> = std::result::Result<T, AppError>;

/// How a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

impl Severity {
    pub fn title(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Error => "Error",
        }
    }
}

impl AppError {
    /// Empty selections are informational; everything else is a failure.
    pub fn severity(&self) -> Severity {
        match self {
            AppError::NoDocument | AppError::NoImages | AppError::EmptyFolder { .. } => {
                Severity::Info
            }
            _ => Severity::Error,
        }
    }
}

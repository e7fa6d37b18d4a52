use std::path::Path;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::extract::{PageSource, PdfFile};
use crate::speech::{Narrator, SpeechEngine, SpeechState};

pub const READ_LABEL: &str = "Read Aloud";
pub const STOP_READING_LABEL: &str = "Stop Reading";

/// Left pane: one open document, its current page as text, and read-aloud.
pub struct DocumentPane {
    source: Option<Box<dyn PageSource>>,
    title: String,
    current_page: usize,
    page_text: String,
    display_text: String,
    narrator: Narrator,
}

impl DocumentPane {
    pub fn new(engine: Arc<dyn SpeechEngine>) -> Self {
        Self {
            source: None,
            title: String::new(),
            current_page: 0,
            page_text: String::new(),
            display_text: String::new(),
            narrator: Narrator::new(engine),
        }
    }

    pub fn narrator_mut(&mut self) -> &mut Narrator {
        &mut self.narrator
    }

    /// Open a PDF from disk. On failure the previous document stays open.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        self.stop_reading();

        let pdf = PdfFile::open(path)?;
        let title = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        log::info!("Opened {} ({} pages)", pdf.path().display(), pdf.page_count());
        self.open_source(Box::new(pdf), title)
    }

    /// Replace the current document with an already loaded source.
    pub fn open_source(&mut self, source: Box<dyn PageSource>, title: impl Into<String>) -> Result<()> {
        self.stop_reading();

        let title = title.into();
        if source.page_count() == 0 {
            return Err(AppError::PdfOpen {
                path: title.into(),
                message: "document has no pages".to_string(),
            });
        }

        self.source = Some(source);
        self.title = title;
        self.current_page = 0;
        self.render_current_page();
        Ok(())
    }

    /// Rebuild the displayed text: the page's text, then a page footer.
    pub fn render_current_page(&mut self) {
        let Some(source) = &self.source else {
            return;
        };

        self.display_text.clear();
        self.page_text = match source.page_text(self.current_page) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("{}", e);
                String::new()
            }
        };

        self.display_text.push_str(&self.page_text);
        self.display_text.push_str(&format!(
            "\n\nPage {} of {}",
            self.current_page + 1,
            source.page_count()
        ));
    }

    /// Returns false when already on the last page (or nothing is open).
    pub fn next(&mut self) -> bool {
        if self.current_page + 1 >= self.page_count() {
            return false;
        }
        self.stop_reading();
        self.current_page += 1;
        self.render_current_page();
        true
    }

    /// Returns false when already on the first page (or nothing is open).
    pub fn previous(&mut self) -> bool {
        if self.source.is_none() || self.current_page == 0 {
            return false;
        }
        self.stop_reading();
        self.current_page -= 1;
        self.render_current_page();
        true
    }

    pub fn toggle_reading(&mut self) -> Result<()> {
        if self.narrator.is_reading() {
            self.stop_reading();
            Ok(())
        } else {
            self.start_reading()
        }
    }

    /// Read the current page aloud, replacing any session in progress.
    pub fn start_reading(&mut self) -> Result<()> {
        if self.source.is_none() {
            return Err(AppError::NoDocument);
        }
        self.narrator.start(self.page_text.clone())?;
        Ok(())
    }

    pub fn stop_reading(&mut self) -> bool {
        self.narrator.stop()
    }

    /// Drain speech completions reported by the worker thread.
    pub fn process_speech_events(&mut self) -> Vec<AppError> {
        self.narrator.process_events()
    }

    pub fn is_reading(&self) -> bool {
        self.narrator.is_reading()
    }

    pub fn speech_state(&self) -> SpeechState {
        self.narrator.state()
    }

    pub fn read_button_label(&self) -> &'static str {
        if self.is_reading() {
            STOP_READING_LABEL
        } else {
            READ_LABEL
        }
    }

    pub fn has_document(&self) -> bool {
        self.source.is_some()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.page_count())
    }

    /// Text of the current page, as handed to the speech engine.
    pub fn page_text(&self) -> &str {
        &self.page_text
    }

    /// Page text followed by the "Page N of M" footer.
    pub fn display_text(&self) -> &str {
        &self.display_text
    }
}

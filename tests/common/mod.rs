// Shared fakes and fixtures for the integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use dualscreen::extract::PageSource;
use dualscreen::speech::{CancelToken, SpeechEngine};
use dualscreen::AppError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// Pages held in memory, standing in for a PDF.
pub struct TextPages {
    pages: Vec<String>,
}

impl TextPages {
    pub fn new<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }
}

impl PageSource for TextPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<String, AppError> {
        self.pages.get(index).cloned().ok_or(AppError::PageText {
            page: index + 1,
            message: "page out of range".to_string(),
        })
    }
}

/// Finishes every utterance immediately.
#[derive(Default)]
pub struct InstantEngine {
    pub spoken: Mutex<Vec<String>>,
}

impl SpeechEngine for InstantEngine {
    fn speak(&self, text: &str, _cancel: &CancelToken) -> Result<(), AppError> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn stop(&self) {}
}

/// Keeps "speaking" until its session is cancelled.
#[derive(Default)]
pub struct BlockingEngine {
    pub spoken: Mutex<Vec<String>>,
    pub stops: AtomicUsize,
}

impl SpeechEngine for BlockingEngine {
    fn speak(&self, text: &str, cancel: &CancelToken) -> Result<(), AppError> {
        self.spoken.lock().unwrap().push(text.to_string());
        while !cancel.is_cancelled() {
            thread::sleep(Duration::from_millis(5));
        }
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

/// Always fails, like a synthesiser that is not installed.
pub struct FailingEngine;

impl SpeechEngine for FailingEngine {
    fn speak(&self, _text: &str, _cancel: &CancelToken) -> Result<(), AppError> {
        Err(AppError::Speech {
            message: "no voice available".to_string(),
        })
    }

    fn stop(&self) {}
}

/// Write a PDF with one line of text per page.
pub fn write_pdf(path: &Path, pages: &[&str]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![100.into(), 600.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

/// Write a solid-colour image; the format follows the file extension.
pub fn write_image(path: &Path, width: u32, height: u32) {
    image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]))
        .save(path)
        .unwrap();
}

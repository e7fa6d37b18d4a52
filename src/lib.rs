//! Two synchronised presentation panes: a PDF page shown as text and read
//! aloud, next to a folder of images cycling as a timed slideshow.

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod gui;
pub mod images;
pub mod scheduler;
pub mod speech;

pub use config::{AppConfig, SlideDelay};
pub use document::DocumentPane;
pub use error::{AppError, Result, Severity};
pub use images::ImagePane;

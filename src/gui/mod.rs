mod app;
mod dialogs;
mod document_panel;
mod image_panel;
mod theme;

pub use app::DualScreenApp;

/// Something the user asked for through a button or menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    OpenPdf,
    OpenImages,
    PreviousPage,
    NextPage,
    ToggleReading,
    PreviousImage,
    NextImage,
    ToggleSlideshow,
    SlideshowSpeed,
    Exit,
}

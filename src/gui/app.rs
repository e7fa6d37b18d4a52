use std::sync::Arc;
use std::time::Instant;

use eframe::{egui, CreationContext};
use egui::{Context, Ui, ViewportCommand};
use rfd::FileDialog;

use super::dialogs::{Notices, SpeedDialog};
use super::image_panel::ImageView;
use super::{document_panel, Action};
use crate::config::AppConfig;
use crate::document::DocumentPane;
use crate::error::AppError;
use crate::images::ImagePane;
use crate::speech::CommandEngine;

/// Top-level window: document pane on the left half, image pane on the right.
pub struct DualScreenApp {
    // Left half
    document: DocumentPane,

    // Right half
    images: ImagePane,
    image_view: ImageView,

    // Dialogs
    notices: Notices,
    speed_dialog: Option<SpeedDialog>,
}

impl DualScreenApp {
    pub fn new(cc: &CreationContext, config: AppConfig) -> Self {
        // Apply presentation theme
        super::theme::setup_presentation_theme(&cc.egui_ctx);

        let engine = Arc::new(CommandEngine::new(config.speech.clone()));
        let mut document = DocumentPane::new(engine);

        // Speech workers wake the UI so their completion is drained promptly.
        let repaint_ctx = cc.egui_ctx.clone();
        document
            .narrator_mut()
            .set_waker(move || repaint_ctx.request_repaint());

        // Create the app
        Self {
            document,
            images: ImagePane::new(config.slide_delay, config.image_padding),
            image_view: ImageView::default(),
            notices: Notices::default(),
            speed_dialog: None,
        }
    }

    fn report(&mut self, result: Result<(), AppError>) {
        if let Err(e) = result {
            self.notices.push(&e);
        }
    }

    fn dispatch(&mut self, action: Action, ctx: &Context) {
        match action {
            Action::OpenPdf => {
                self.document.stop_reading();
                if let Some(path) = open_pdf_dialog() {
                    let result = self.document.open(&path);
                    self.report(result);
                }
            }
            Action::OpenImages => {
                self.images.stop();
                if let Some(folder) = open_folder_dialog() {
                    let result = self.images.open_folder(&folder);
                    self.report(result);
                }
            }
            Action::PreviousPage => {
                self.document.previous();
            }
            Action::NextPage => {
                self.document.next();
            }
            Action::ToggleReading => {
                let result = self.document.toggle_reading();
                self.report(result);
            }
            Action::PreviousImage => {
                let result = self.images.previous().map(|_| ());
                self.report(result);
            }
            Action::NextImage => {
                let result = self.images.next().map(|_| ());
                self.report(result);
            }
            Action::ToggleSlideshow => {
                let result = self.images.toggle_slideshow(Instant::now());
                self.report(result);
            }
            Action::SlideshowSpeed => {
                self.speed_dialog = Some(SpeedDialog::new(self.images.delay()));
            }
            Action::Exit => {
                self.document.stop_reading();
                self.images.stop();
                ctx.send_viewport_cmd(ViewportCommand::Close);
            }
        }
    }

    /// Draw the top menu bar
    fn menu_bar(&mut self, ui: &mut Ui) -> Option<Action> {
        let mut action = None;
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open PDF...").clicked() {
                    action = Some(Action::OpenPdf);
                    ui.close_menu();
                }
                if ui.button("Open Images...").clicked() {
                    action = Some(Action::OpenImages);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    action = Some(Action::Exit);
                    ui.close_menu();
                }
            });

            ui.menu_button("Settings", |ui| {
                if ui.button("Slideshow Speed...").clicked() {
                    action = Some(Action::SlideshowSpeed);
                    ui.close_menu();
                }
            });
        });
        action
    }

    /// Drain speech completions and due slideshow advances.
    fn process_background(&mut self, ctx: &Context) {
        for error in self.document.process_speech_events() {
            self.notices.push(&error);
        }

        // Slideshow
        let now = Instant::now();
        for error in self.images.tick(now) {
            self.notices.push(&error);
        }

        if let Some(deadline) = self.images.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
    }
}

impl eframe::App for DualScreenApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.process_background(ctx);

        // Collected while drawing, applied once the frame is laid out
        let mut actions = Vec::new();

        // Menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            actions.extend(self.menu_bar(ui));
        });

        // Exactly half the window for each pane.
        let half_width = ctx.screen_rect().width() / 2.0;

        egui::SidePanel::left("document_pane")
            .resizable(false)
            .exact_width(half_width)
            .show(ctx, |ui| {
                actions.extend(document_panel::show(ui, &self.document));
            });

        // Image pane takes the rest
        egui::CentralPanel::default().show(ctx, |ui| {
            let size = ui.available_size();
            self.images.set_pane_size(size.x, size.y);
            actions.extend(self.image_view.show(ui, ctx, &self.images));
        });

        // Settings dialog
        let speed_outcome = self.speed_dialog.as_mut().and_then(|dialog| dialog.show(ctx));
        if let Some(outcome) = speed_outcome {
            if let Some(delay) = outcome {
                self.images.set_delay(delay);
            }
            self.speed_dialog = None;
        }

        self.notices.show(ctx);

        // Handle actions
        for action in actions {
            self.dispatch(action, ctx);
        }
    }
}

/// Open a file dialog and return the selected PDF path
fn open_pdf_dialog() -> Option<std::path::PathBuf> {
    FileDialog::new()
        .set_title("Select PDF File")
        .add_filter("PDF files", &["pdf"])
        .pick_file()
}

fn open_folder_dialog() -> Option<std::path::PathBuf> {
    FileDialog::new().set_title("Select Image Folder").pick_folder()
}

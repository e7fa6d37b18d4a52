use egui::{RichText, ScrollArea, TextEdit, TextStyle, Ui};

use super::Action;
use crate::document::DocumentPane;

/// Draw the document pane: page text above, controls below.
pub fn show(ui: &mut Ui, pane: &DocumentPane) -> Option<Action> {
    let mut action = None;

    egui::TopBottomPanel::bottom("document_controls")
        .resizable(false)
        .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(10.0, 5.0)))
        .show_inside(ui, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(pane.current_page() > 0, egui::Button::new("◀ Previous"))
                    .clicked()
                {
                    action = Some(Action::PreviousPage);
                }

                if ui
                    .add_enabled(
                        pane.current_page() + 1 < pane.page_count(),
                        egui::Button::new("Next ▶"),
                    )
                    .clicked()
                {
                    action = Some(Action::NextPage);
                }

                let read_icon = if pane.is_reading() { "⏹" } else { "🔊" };
                if ui
                    .button(format!("{} {}", read_icon, pane.read_button_label()))
                    .clicked()
                {
                    action = Some(Action::ToggleReading);
                }

                if ui.button("📂 Open PDF").clicked() {
                    action = Some(Action::OpenPdf);
                }
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::none().inner_margin(egui::Margin::same(10.0)))
        .show_inside(ui, |ui| {
            if !pane.has_document() {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("Open a PDF to begin (File → Open PDF)").weak());
                });
                return;
            }

            if !pane.title().is_empty() {
                ui.label(RichText::new(pane.title()).strong());
                ui.separator();
            }

            ScrollArea::vertical()
                .id_source("document_text_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // Read-only: a &str buffer cannot be edited.
                    let mut text = pane.display_text();
                    ui.add(
                        TextEdit::multiline(&mut text)
                            .font(TextStyle::Body)
                            .desired_width(f32::INFINITY)
                            .frame(false),
                    );
                });
        });

    action
}

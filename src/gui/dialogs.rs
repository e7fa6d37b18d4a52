use std::collections::VecDeque;

use egui::{Align2, Color32, Context, Id, RichText, Vec2};

use crate::config::{SlideDelay, MAX_SLIDE_DELAY_SECS, MIN_SLIDE_DELAY_SECS};
use crate::error::{AppError, Severity};

/// Queue of user-facing notices, shown one at a time.
#[derive(Default)]
pub struct Notices {
    queue: VecDeque<(Severity, String)>,
}

impl Notices {
    pub fn push(&mut self, error: &AppError) {
        match error.severity() {
            Severity::Error => log::error!("{}", error),
            Severity::Info => log::info!("{}", error),
        }

        // A failing slideshow reports the same error on every advance.
        let notice = (error.severity(), error.to_string());
        if self.queue.back() != Some(&notice) {
            self.queue.push_back(notice);
        }
    }

    pub fn show(&mut self, ctx: &Context) {
        let Some((severity, message)) = self.queue.front() else {
            return;
        };

        let mut dismissed = ctx.input(|i| i.key_pressed(egui::Key::Escape));

        egui::Window::new(severity.title())
            .id(Id::new("notice_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.queue.pop_front();
        }
    }
}

/// Settings → Slideshow Speed.
pub struct SpeedDialog {
    input: String,
    error: Option<String>,
}

impl SpeedDialog {
    pub fn new(current: SlideDelay) -> Self {
        Self {
            input: current.whole_secs().to_string(),
            error: None,
        }
    }

    /// Returns `Some(Some(delay))` when accepted, `Some(None)` when cancelled,
    /// and `None` while still open.
    pub fn show(&mut self, ctx: &Context) -> Option<Option<SlideDelay>> {
        let mut outcome = None;

        egui::Window::new("Slideshow Speed")
            .id(Id::new("speed_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Enter slideshow delay in seconds ({}–{}):",
                    MIN_SLIDE_DELAY_SECS, MAX_SLIDE_DELAY_SECS
                ));
                let response = ui.text_edit_singleline(&mut self.input);
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

                if let Some(error) = &self.error {
                    ui.label(RichText::new(error).color(Color32::from_rgb(230, 90, 90)));
                }

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() || submitted {
                        match SlideDelay::parse(&self.input) {
                            Ok(delay) => outcome = Some(Some(delay)),
                            Err(e) => self.error = Some(e.to_string()),
                        }
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(None);
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            outcome = Some(None);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn decode_error(name: &str) -> AppError {
        AppError::ImageDecode {
            path: PathBuf::from(name),
            message: "corrupt".to_string(),
        }
    }

    #[test]
    fn repeated_notice_is_queued_once() {
        let mut notices = Notices::default();
        notices.push(&decode_error("broken.png"));
        notices.push(&decode_error("broken.png"));
        notices.push(&decode_error("broken.png"));
        assert_eq!(notices.queue.len(), 1);

        notices.push(&AppError::NoImages);
        notices.push(&decode_error("broken.png"));
        assert_eq!(notices.queue.len(), 3);
    }
}

use egui::{ColorImage, Context, RichText, TextureHandle, TextureOptions, Ui};

use super::Action;
use crate::images::{ImagePane, RenderedImage};

/// Texture cache for the image pane.
#[derive(Default)]
pub struct ImageView {
    texture: Option<(u64, TextureHandle)>,
}

impl ImageView {
    /// Upload the rendered bitmap if it changed since the last frame.
    fn sync_texture(&mut self, ctx: &Context, rendered: &RenderedImage) {
        if matches!(&self.texture, Some((generation, _)) if *generation == rendered.generation) {
            return;
        }

        let size = [
            rendered.image.width() as usize,
            rendered.image.height() as usize,
        ];
        let rgba = rendered.image.to_rgba8();
        let pixels = rgba.as_flat_samples();

        let texture = ctx.load_texture(
            "slide",
            ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()),
            TextureOptions::LINEAR,
        );
        self.texture = Some((rendered.generation, texture));
    }

    pub fn show(&mut self, ui: &mut Ui, ctx: &Context, pane: &ImagePane) -> Option<Action> {
        let mut action = None;

        egui::TopBottomPanel::bottom("image_controls")
            .resizable(false)
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(10.0, 5.0)))
            .show_inside(ui, |ui| {
                ui.horizontal(|ui| {
                    let count = pane.images().len();
                    if ui
                        .add_enabled(pane.current_index() > 0, egui::Button::new("◀ Previous"))
                        .clicked()
                    {
                        action = Some(Action::PreviousImage);
                    }

                    if ui
                        .add_enabled(pane.current_index() + 1 < count, egui::Button::new("Next ▶"))
                        .clicked()
                    {
                        action = Some(Action::NextImage);
                    }

                    let play_icon = if pane.is_running() { "⏹" } else { "▶" };
                    if ui
                        .button(format!("{} {}", play_icon, pane.play_button_label()))
                        .clicked()
                    {
                        action = Some(Action::ToggleSlideshow);
                    }

                    if ui.button("📂 Open Images").clicked() {
                        action = Some(Action::OpenImages);
                    }

                    ui.label(
                        RichText::new(format!("{} s per slide", pane.delay().whole_secs()))
                            .weak()
                            .small(),
                    );
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::same(10.0)))
            .show_inside(ui, |ui| match pane.rendered() {
                Some(rendered) => {
                    if let Some(name) = pane.folder_name() {
                        ui.label(RichText::new(name).strong());
                        ui.separator();
                    }
                    self.sync_texture(ctx, rendered);
                    if let Some((_, texture)) = &self.texture {
                        ui.vertical_centered(|ui| {
                            // Leave room for the caption if the window shrank since rendering.
                            let mut max_size = ui.available_size();
                            max_size.y = (max_size.y - 30.0).max(1.0);
                            ui.add(
                                egui::Image::new((texture.id(), texture.size_vec2()))
                                    .max_size(max_size)
                                    .maintain_aspect_ratio(true),
                            );
                            ui.label(&rendered.caption);
                        });
                    }
                }
                None => {
                    self.texture = None;
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new("Open an image folder to begin (File → Open Images)")
                                .weak(),
                        );
                    });
                }
            });

        action
    }
}

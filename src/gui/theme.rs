use egui::{Color32, Context, FontId, Rounding, Stroke, TextStyle, Visuals};

/// Dark presentation theme with a larger reading font.
pub fn setup_presentation_theme(ctx: &Context) {
    let mut visuals = Visuals::dark();

    // Background colors
    visuals.panel_fill = Color32::from_rgb(22, 22, 26);
    visuals.window_fill = Color32::from_rgb(32, 32, 38);
    visuals.extreme_bg_color = Color32::from_rgb(14, 14, 18);

    // Widget colors
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(44, 44, 54);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(190, 190, 200));
    visuals.widgets.active.bg_fill = Color32::from_rgb(58, 58, 70);
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::from_rgb(225, 225, 235));

    // Selection colors
    visuals.selection.bg_fill = Color32::from_rgb(0, 92, 128);
    visuals.selection.stroke = Stroke::new(1.0, Color32::from_rgb(0, 140, 230));

    // Rounded corners
    let rounding = Rounding::same(4.0);
    visuals.window_rounding = rounding;
    visuals.menu_rounding = rounding;

    ctx.set_visuals(visuals);

    // Page text is read from across the room.
    let mut style = (*ctx.style()).clone();
    style
        .text_styles
        .insert(TextStyle::Body, FontId::proportional(18.0));
    style
        .text_styles
        .insert(TextStyle::Button, FontId::proportional(16.0));
    ctx.set_style(style);
}

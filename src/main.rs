use eframe::{run_native, NativeOptions};
use egui::ViewportBuilder;

use dualscreen::gui::DualScreenApp;
use dualscreen::AppConfig;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("dualscreen=info"))
        .init();

    let config = AppConfig::default();
    let title = config.window_title.clone();

    // Fill the usable display area; the shell splits it in half each frame.
    let options = NativeOptions {
        viewport: ViewportBuilder::default()
            .with_maximized(true)
            .with_min_inner_size([800.0, 600.0])
            .with_title(&title),
        ..Default::default()
    };

    log::info!("Starting {}", title);

    run_native(
        &title,
        options,
        Box::new(move |cc| Box::new(DualScreenApp::new(cc, config))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}

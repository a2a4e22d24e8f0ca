mod app;
mod drawing;
mod settings;

use app::App;
use eframe::egui;
use leo_coverage::EngineConfig;

fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = EngineConfig::default();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.width as f32 + 340.0, config.height as f32 + 80.0])
            .with_title("LEO Coverage"),
        ..Default::default()
    };

    eframe::run_native(
        "LEO Coverage",
        options,
        Box::new(move |cc| match App::new(cc, config) {
            Ok(app) => Ok(Box::new(app)),
            Err(e) => {
                log::error!("failed to start coverage engine: {e}");
                Err(Box::new(e))
            }
        }),
    )
}

//! Application shell and eframe integration.
//!
//! Defines the App struct, its initialization, and the update loop that
//! advances playback, renders one coverage frame per repaint and uploads it
//! as an egui texture.

use crate::drawing::draw_coverage_map;
use eframe::egui;
use leo_coverage::config::ConstellationParams;
use leo_coverage::texture::texture_path;
use leo_coverage::walker::DEFAULT_TRACK_STEPS;
use leo_coverage::{
    BaseTexture, CoverageEngine, CoverageError, EngineConfig, Playback, Preset, RenderRange,
    SmoothingState,
};

#[derive(Clone, Copy)]
pub(crate) struct ViewSettings {
    pub(crate) show_orbits: bool,
    pub(crate) show_side_panel: bool,
    pub(crate) show_stats: bool,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            show_orbits: true,
            show_side_panel: true,
            show_stats: true,
        }
    }
}

/// Summary of the last frame's site-area table.
#[derive(Clone, Copy, Default)]
pub(crate) struct FrameStats {
    pub(crate) site_count: usize,
    pub(crate) min_area: f64,
    pub(crate) max_area: f64,
    pub(crate) mean_area: f64,
    pub(crate) total_area: f64,
    pub(crate) render_range: Option<RenderRange>,
}

impl FrameStats {
    fn from_areas(areas: &[f64], render_range: RenderRange) -> Self {
        if areas.is_empty() {
            return Self { render_range: Some(render_range), ..Default::default() };
        }
        let total: f64 = areas.iter().sum();
        Self {
            site_count: areas.len(),
            min_area: areas.iter().copied().fold(f64::INFINITY, f64::min),
            max_area: areas.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean_area: total / areas.len() as f64,
            total_area: total,
            render_range: Some(render_range),
        }
    }
}

pub(crate) struct App {
    pub(crate) engine: CoverageEngine,
    pub(crate) base: BaseTexture,
    pub(crate) params: ConstellationParams,
    pub(crate) preset: Preset,
    pub(crate) playback: Playback,
    pub(crate) smoothing: SmoothingState,
    pub(crate) view: ViewSettings,
    pub(crate) stats: FrameStats,
    pub(crate) fps: f32,
    map_texture: Option<egui::TextureHandle>,
}

impl App {
    pub(crate) fn new(
        _cc: &eframe::CreationContext<'_>,
        config: EngineConfig,
    ) -> Result<Self, CoverageError> {
        let engine = CoverageEngine::new(config)?;
        let base = BaseTexture::load_or_fallback(&texture_path(), config.width, config.height);
        Ok(Self {
            engine,
            base,
            params: ConstellationParams::default(),
            preset: Preset::None,
            playback: Playback::default(),
            smoothing: SmoothingState::default(),
            view: ViewSettings::default(),
            stats: FrameStats::default(),
            fps: 0.0,
            map_texture: None,
        })
    }

    fn render_frame(&mut self, ctx: &egui::Context) {
        self.params.time_offset = self.playback.advance();
        let params = self.params.sanitized(self.engine.config().max_sites);

        let (smoothing, frame) = self.engine.render(&params, self.smoothing, &self.base);
        self.smoothing = smoothing;
        self.stats = FrameStats::from_areas(frame.areas, frame.render_range);

        let size = [frame.pixels.width, frame.pixels.height];
        let image = egui::ColorImage::from_rgb(size, &frame.pixels.to_rgb8());
        match &mut self.map_texture {
            Some(handle) => handle.set(image, egui::TextureOptions::LINEAR),
            None => {
                self.map_texture =
                    Some(ctx.load_texture("coverage_map", image, egui::TextureOptions::LINEAR));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps == 0.0 { instant } else { self.fps * 0.9 + instant * 0.1 };
        }

        self.render_frame(ctx);

        if self.view.show_side_panel {
            egui::SidePanel::right("settings_panel")
                .resizable(false)
                .default_width(300.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        self.show_settings(ui);
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(texture) = &self.map_texture {
                let tracks = if self.view.show_orbits {
                    self.params
                        .sanitized(self.engine.config().max_sites)
                        .constellation()
                        .ground_tracks(DEFAULT_TRACK_STEPS)
                } else {
                    Vec::new()
                };
                draw_coverage_map(ui, "coverage_plot", texture, &tracks);
            }
        });

        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.playback.toggle();
        }
        if ctx.input(|i| i.key_pressed(egui::Key::Tab)) {
            self.view.show_side_panel = !self.view.show_side_panel;
        }

        ctx.request_repaint();
    }
}

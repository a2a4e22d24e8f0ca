//! Side-panel controls for the constellation, playback and display options.

use crate::app::App;
use crate::drawing::draw_legend;
use eframe::egui;
use leo_coverage::config::{
    BEAM_SCALE_RANGE, INCLINATION_RANGE, OPACITY_RANGE, PLANES_RANGE, SPEED_RANGE,
};
use leo_coverage::Preset;

impl App {
    pub(crate) fn show_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("LEO Coverage");
        ui.add_space(4.0);

        if ui.button(self.playback.button_label()).clicked() {
            self.playback.toggle();
        }
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Constellation").strong());
        egui::ComboBox::from_label("Preset")
            .selected_text(self.preset.label())
            .show_ui(ui, |ui| {
                for preset in Preset::ALL {
                    if ui
                        .selectable_value(&mut self.preset, preset, preset.label())
                        .clicked()
                    {
                        self.params.apply_preset(preset);
                    }
                }
            });

        let max_sites = self.engine.config().max_sites;
        let mut shape_changed = false;
        shape_changed |= ui
            .add(
                egui::Slider::new(&mut self.params.inclination_deg, INCLINATION_RANGE)
                    .text("Inclination")
                    .suffix("°"),
            )
            .changed();
        shape_changed |= ui
            .add(egui::Slider::new(&mut self.params.satellite_count, 1..=max_sites).text("Satellites"))
            .changed();
        shape_changed |= ui
            .add(egui::Slider::new(&mut self.params.plane_count, PLANES_RANGE).text("Planes"))
            .changed();
        if shape_changed {
            self.preset = Preset::None;
        }

        let walker = self.params.constellation();
        let dropped = self.params.satellite_count.saturating_sub(walker.generated_sats());
        ui.label(format!(
            "{} per plane, {} simulated",
            walker.sats_per_plane(),
            walker.generated_sats()
        ));
        if dropped > 0 {
            ui.small(format!("{dropped} satellites do not fill a plane"));
        }
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Display").strong());
        ui.add(egui::Slider::new(&mut self.params.opacity, OPACITY_RANGE).text("Opacity"));
        ui.add(egui::Slider::new(&mut self.playback.speed, SPEED_RANGE).text("Speed"));
        ui.add(egui::Slider::new(&mut self.params.beam_scale, BEAM_SCALE_RANGE).text("Beam scale"));
        ui.checkbox(&mut self.params.show_walls, "Cell borders");
        ui.checkbox(&mut self.params.show_dots, "Satellite dots");
        ui.checkbox(&mut self.view.show_orbits, "Orbit lines");
        ui.add_space(8.0);

        ui.label(egui::RichText::new("Cell area").strong());
        draw_legend(ui, self.engine.lut());
        ui.add_space(8.0);

        ui.checkbox(&mut self.view.show_stats, "Statistics");
        if self.view.show_stats {
            let stats = self.stats;
            egui::Grid::new("coverage_stats").num_columns(2).show(ui, |ui| {
                ui.label("Sites");
                ui.label(stats.site_count.to_string());
                ui.end_row();
                ui.label("Min area");
                ui.label(format!("{:.2}", stats.min_area));
                ui.end_row();
                ui.label("Max area");
                ui.label(format!("{:.2}", stats.max_area));
                ui.end_row();
                ui.label("Mean area");
                ui.label(format!("{:.2}", stats.mean_area));
                ui.end_row();
                ui.label("Total");
                ui.label(format!("{:.0}", stats.total_area));
                ui.end_row();
                if let Some(range) = stats.render_range {
                    ui.label("Color range");
                    ui.label(format!("{:.2} .. {:.2}", range.min, range.max));
                    ui.end_row();
                }
                ui.label("Time");
                ui.label(format!("{:.2}", self.playback.time));
                ui.end_row();
                ui.label("FPS");
                ui.label(format!("{:.0}", self.fps));
                ui.end_row();
            });
        }

        ui.add_space(8.0);
        ui.small("Space: play/pause, Tab: hide panel");
        let hash = env!("GIT_HASH");
        if !hash.is_empty() {
            ui.small(format!("build {hash}"));
        }
    }
}

//! Map and legend drawing.
//!
//! The coverage frame is shown as a PlotImage spanning the full
//! longitude/latitude extent, with ground tracks drawn as plot lines on top.

use eframe::egui;
use egui_plot::{Line, Plot, PlotImage, PlotPoint, PlotPoints};
use leo_coverage::colormap::{to_rgb8, ColorLut};

const TRACK_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 200, 255);
const LEGEND_HEIGHT: f32 = 14.0;

/// Draws the coverage texture on an equirectangular plot in degrees.
/// `tracks` are polylines of `[lon, lat]` already split at the dateline.
pub(crate) fn draw_coverage_map(
    ui: &mut egui::Ui,
    id: &str,
    texture: &egui::TextureHandle,
    tracks: &[Vec<[f64; 2]>],
) {
    let plot = Plot::new(id)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-90.0)
        .include_y(90.0)
        .show_grid(false)
        .allow_boxed_zoom(false)
        .cursor_color(egui::Color32::TRANSPARENT)
        .label_formatter(|_, point| format_lat_lon(point.y, point.x));

    plot.show(ui, |plot_ui| {
        plot_ui.image(PlotImage::new(
            "",
            texture,
            PlotPoint::new(0.0, 0.0),
            egui::vec2(360.0, 180.0),
        ));

        for segment in tracks {
            if segment.len() < 2 {
                continue;
            }
            plot_ui.line(
                Line::new("", PlotPoints::new(segment.clone()))
                    .color(TRACK_COLOR)
                    .width(1.0),
            );
        }
    });
}

fn format_lat_lon(lat: f64, lon: f64) -> String {
    let ns = if lat >= 0.0 { 'N' } else { 'S' };
    let ew = if lon >= 0.0 { 'E' } else { 'W' };
    format!("{:.1}°{} {:.1}°{}", lat.abs(), ns, lon.abs(), ew)
}

/// Horizontal color bar sampled from the lookup table, low areas on the left.
pub(crate) fn draw_legend(ui: &mut egui::Ui, lut: &ColorLut) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, LEGEND_HEIGHT), egui::Sense::hover());
    let painter = ui.painter_at(rect);

    let columns = width.max(1.0) as usize;
    let step = rect.width() / columns as f32;
    for i in 0..columns {
        let t = i as f64 / (columns - 1).max(1) as f64;
        let [r, g, b] = to_rgb8(lut.lookup(t));
        let x = rect.left() + i as f32 * step;
        painter.rect_filled(
            egui::Rect::from_min_max(
                egui::pos2(x, rect.top()),
                egui::pos2(x + step + 0.5, rect.bottom()),
            ),
            0.0,
            egui::Color32::from_rgb(r, g, b),
        );
    }
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::GRAY),
        egui::StrokeKind::Inside,
    );

    ui.horizontal(|ui| {
        ui.small("small cell");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.small("large cell");
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_lat_lon() {
        assert_eq!(format_lat_lon(12.34, -45.0), "12.3°N 45.0°W");
        assert_eq!(format_lat_lon(-0.5, 179.96), "0.5°S 180.0°E");
    }
}

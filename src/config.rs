//! Configuration types for the coverage engine and constellation presets.
//!
//! Defines EngineConfig (fixed at startup), ConstellationParams (supplied
//! every frame), the UI parameter ranges and named constellation presets.

use crate::compositor::CompositeOptions;
use crate::walker::WalkerConstellation;
use std::ops::RangeInclusive;

pub const DEFAULT_WIDTH: usize = 1100;
pub const DEFAULT_HEIGHT: usize = 550;
pub const DEFAULT_MAX_SITES: usize = 3000;

pub const INCLINATION_RANGE: RangeInclusive<f64> = 0.0..=90.0;
pub const PLANES_RANGE: RangeInclusive<usize> = 1..=80;
pub const OPACITY_RANGE: RangeInclusive<f64> = 0.0..=1.0;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.1..=5.0;
pub const BEAM_SCALE_RANGE: RangeInclusive<f64> = 0.1..=3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub width: usize,
    pub height: usize,
    pub max_sites: usize,
    /// Worker threads for the compute pool, 0 for the rayon default.
    pub num_threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            max_sites: DEFAULT_MAX_SITES,
            num_threads: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConstellationParams {
    pub satellite_count: usize,
    pub plane_count: usize,
    pub inclination_deg: f64,
    pub time_offset: f64,
    pub opacity: f64,
    pub beam_scale: f64,
    pub show_walls: bool,
    pub show_dots: bool,
}

impl Default for ConstellationParams {
    fn default() -> Self {
        Self {
            satellite_count: 600,
            plane_count: 12,
            inclination_deg: 53.0,
            time_offset: 0.0,
            opacity: 0.7,
            beam_scale: 1.0,
            show_walls: true,
            show_dots: true,
        }
    }
}

impl ConstellationParams {
    pub fn constellation(&self) -> WalkerConstellation {
        WalkerConstellation::new(self.satellite_count, self.plane_count, self.inclination_deg)
    }

    pub fn composite_options(&self) -> CompositeOptions {
        CompositeOptions {
            opacity: self.opacity as f32,
            show_walls: self.show_walls,
            show_dots: self.show_dots,
        }
    }

    /// Clamps every field into its UI range; satellites are capped at `max_sites`.
    pub fn sanitized(&self, max_sites: usize) -> Self {
        Self {
            satellite_count: self.satellite_count.min(max_sites),
            plane_count: self.plane_count.clamp(*PLANES_RANGE.start(), *PLANES_RANGE.end()),
            inclination_deg: self.inclination_deg.clamp(*INCLINATION_RANGE.start(), *INCLINATION_RANGE.end()),
            time_offset: self.time_offset,
            opacity: self.opacity.clamp(*OPACITY_RANGE.start(), *OPACITY_RANGE.end()),
            beam_scale: self.beam_scale.clamp(*BEAM_SCALE_RANGE.start(), *BEAM_SCALE_RANGE.end()),
            show_walls: self.show_walls,
            show_dots: self.show_dots,
        }
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        if let Some((inclination_deg, satellite_count, plane_count)) = preset.shape() {
            self.inclination_deg = inclination_deg;
            self.satellite_count = satellite_count;
            self.plane_count = plane_count;
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Preset {
    None,
    Starlink,
    OneWeb,
    Iridium,
    Kuiper,
    Globalstar,
}

impl Preset {
    pub const ALL: [Preset; 6] = [
        Preset::None,
        Preset::Starlink,
        Preset::OneWeb,
        Preset::Iridium,
        Preset::Kuiper,
        Preset::Globalstar,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Preset::None => "Custom",
            Preset::Starlink => "Starlink",
            Preset::OneWeb => "OneWeb",
            Preset::Iridium => "Iridium",
            Preset::Kuiper => "Kuiper",
            Preset::Globalstar => "Globalstar",
        }
    }

    /// `(inclination_deg, satellites, planes)` of the preset's main shell.
    pub fn shape(&self) -> Option<(f64, usize, usize)> {
        match self {
            Preset::None => None,
            Preset::Starlink => Some((53.0, 1584, 72)),
            Preset::OneWeb => Some((87.9, 648, 18)),
            Preset::Iridium => Some((86.4, 66, 6)),
            Preset::Kuiper => Some((51.9, 1156, 34)),
            Preset::Globalstar => Some((52.0, 48, 8)),
        }
    }
}

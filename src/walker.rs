//! Walker-Delta constellation geometry.
//!
//! Produces the unit-sphere sub-point of every satellite for a given
//! simulation time, and the ground track of each orbital plane.

use crate::math::{lat_lon_to_unit, unit_to_lat_lon, wrap_longitude_deg};
use nalgebra::Vector3;
use rayon::prelude::*;
use std::f64::consts::PI;

/// Fixed anomaly offset between consecutive planes, in radians.
pub const PLANE_PHASE_OFFSET: f64 = 0.5;

pub const DEFAULT_TRACK_STEPS: usize = 60;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WalkerConstellation {
    pub total_sats: usize,
    pub num_planes: usize,
    pub inclination_deg: f64,
}

/// A satellite sub-point acting as a Voronoi generator for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    pub index: usize,
    pub plane: usize,
    pub slot: usize,
    pub position: Vector3<f64>,
}

impl Site {
    pub fn new(index: usize, plane: usize, position: Vector3<f64>) -> Self {
        Self { index, plane, slot: 0, position }
    }

    pub fn lat_deg(&self) -> f64 {
        unit_to_lat_lon(&self.position).0.to_degrees()
    }

    pub fn lon_deg(&self) -> f64 {
        wrap_longitude_deg(unit_to_lat_lon(&self.position).1.to_degrees())
    }
}

impl WalkerConstellation {
    pub fn new(total_sats: usize, num_planes: usize, inclination_deg: f64) -> Self {
        Self {
            total_sats,
            num_planes: num_planes.max(1),
            inclination_deg,
        }
    }

    pub fn sats_per_plane(&self) -> usize {
        self.total_sats / self.num_planes.max(1)
    }

    /// Number of sites actually generated. Satellites left over by the
    /// integer split across planes are dropped.
    pub fn generated_sats(&self) -> usize {
        self.sats_per_plane() * self.num_planes.max(1)
    }

    pub fn raan(&self, plane: usize) -> f64 {
        plane as f64 / self.num_planes.max(1) as f64 * 2.0 * PI
    }

    pub fn satellite_positions(&self, time: f64) -> Vec<Site> {
        let num_planes = self.num_planes.max(1);
        let sats_per_plane = self.sats_per_plane();
        let inc = self.inclination_deg.to_radians();
        let (inc_sin, inc_cos) = inc.sin_cos();

        (0..self.generated_sats())
            .into_par_iter()
            .map(|i| {
                let plane = i % num_planes;
                let slot = i / num_planes;
                let raan = self.raan(plane);
                let anomaly = slot as f64 / sats_per_plane as f64 * 2.0 * PI
                    + plane as f64 * PLANE_PHASE_OFFSET
                    + time;

                let (lat, lon) = sub_point(inc_sin, inc_cos, anomaly, raan);
                Site {
                    index: i,
                    plane,
                    slot,
                    position: lat_lon_to_unit(lat, lon),
                }
            })
            .collect()
    }

    /// Ground track of one plane as `[lon, lat]` degree polylines, split
    /// wherever the track crosses the antimeridian.
    pub fn ground_track(&self, plane: usize, steps: usize) -> Vec<Vec<[f64; 2]>> {
        let steps = steps.max(1);
        let inc = self.inclination_deg.to_radians();
        let (inc_sin, inc_cos) = inc.sin_cos();
        let raan = self.raan(plane);

        let mut segments = Vec::new();
        let mut current: Vec<[f64; 2]> = Vec::with_capacity(steps + 1);
        let mut prev_lon: Option<f64> = None;

        for i in 0..=steps {
            let anomaly = i as f64 / steps as f64 * 2.0 * PI;
            let (lat, lon) = sub_point(inc_sin, inc_cos, anomaly, raan);
            let lon_deg = wrap_longitude_deg(lon.to_degrees());
            let lat_deg = lat.to_degrees();

            if let Some(prev) = prev_lon {
                if (lon_deg - prev).abs() > 180.0 {
                    if current.len() > 1 {
                        segments.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                }
            }
            current.push([lon_deg, lat_deg]);
            prev_lon = Some(lon_deg);
        }
        if current.len() > 1 {
            segments.push(current);
        }
        segments
    }

    pub fn ground_tracks(&self, steps: usize) -> Vec<Vec<[f64; 2]>> {
        (0..self.num_planes.max(1))
            .flat_map(|plane| self.ground_track(plane, steps))
            .collect()
    }
}

fn sub_point(inc_sin: f64, inc_cos: f64, anomaly: f64, raan: f64) -> (f64, f64) {
    let (an_sin, an_cos) = anomaly.sin_cos();
    let lat = (inc_sin * an_sin).clamp(-1.0, 1.0).asin();
    let lon = (inc_cos * an_sin).atan2(an_cos) + raan;
    (lat, lon)
}

//! Grid-shaped buffers shared by the per-frame stages.

use crate::math::{pixel_to_lat_lon, row_latitude};
use nalgebra::Vector3;

/// Marker for a pixel that has no site (only possible with zero sites).
pub const UNASSIGNED: u32 = u32::MAX;

/// Row-major `width`×`height` array of site indices.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignmentGrid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<u32>,
}

impl AssignmentGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![UNASSIGNED; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> u32 {
        self.cells[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[u32] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    /// True when the right or bottom neighbour belongs to another site.
    /// The last column and row only look at the neighbour that exists.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        let idx = self.get(x, y);
        (x + 1 < self.width && self.get(x + 1, y) != idx)
            || (y + 1 < self.height && self.get(x, y + 1) != idx)
    }
}

/// Per-row `cos(latitude)` weights correcting equirectangular area distortion.
#[derive(Clone, Debug, PartialEq)]
pub struct LatitudeWeights {
    weights: Vec<f64>,
}

impl LatitudeWeights {
    pub fn new(height: usize) -> Self {
        let weights = (0..height).map(|y| row_latitude(y, height).cos()).collect();
        Self { weights }
    }

    pub fn get(&self, y: usize) -> f64 {
        self.weights[y]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Total weight of a full grid `width` pixels wide.
    pub fn grid_total(&self, width: usize) -> f64 {
        self.weights.iter().sum::<f64>() * width as f64
    }
}

/// Unit vector of every pixel, stored as separable row and column factors.
#[derive(Clone, Debug)]
pub struct PixelDirections {
    lat_sin_cos: Vec<(f64, f64)>,
    lon_sin_cos: Vec<(f64, f64)>,
}

impl PixelDirections {
    pub fn new(width: usize, height: usize) -> Self {
        let lat_sin_cos = (0..height)
            .map(|y| pixel_to_lat_lon(0, y, width, height).0.sin_cos())
            .collect();
        let lon_sin_cos = (0..width)
            .map(|x| pixel_to_lat_lon(x, 0, width, height).1.sin_cos())
            .collect();
        Self { lat_sin_cos, lon_sin_cos }
    }

    pub fn get(&self, x: usize, y: usize) -> Vector3<f64> {
        let (sl, cl) = self.lat_sin_cos[y];
        let (sn, cn) = self.lon_sin_cos[x];
        Vector3::new(cl * cn, cl * sn, sl)
    }
}

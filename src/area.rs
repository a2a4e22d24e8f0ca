//! Latitude-weighted area of every Voronoi cell.
//!
//! Rows are processed in parallel into per-worker partial tables that are
//! summed at the end, so no two workers ever write the same slot.

use crate::grid::{AssignmentGrid, LatitudeWeights, UNASSIGNED};
use rayon::prelude::*;

/// Zeroes `areas` and accumulates each pixel's row weight into the slot of
/// its assigned site. Indices outside `areas` are ignored.
pub fn accumulate_areas(grid: &AssignmentGrid, weights: &LatitudeWeights, areas: &mut [f64]) {
    let slots = areas.len();
    let width = grid.width;

    let totals = grid
        .cells
        .par_chunks(width)
        .enumerate()
        .fold(
            || vec![0.0f64; slots],
            |mut partial, (y, row)| {
                let w = weights.get(y);
                for &idx in row {
                    if idx != UNASSIGNED && (idx as usize) < slots {
                        partial[idx as usize] += w;
                    }
                }
                partial
            },
        )
        .reduce(
            || vec![0.0f64; slots],
            |mut a, b| {
                for (dst, src) in a.iter_mut().zip(b) {
                    *dst += src;
                }
                a
            },
        );

    areas.copy_from_slice(&totals);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_site_owns_everything() {
        let (w, h) = (20, 10);
        let weights = LatitudeWeights::new(h);
        let mut grid = AssignmentGrid::new(w, h);
        grid.cells.fill(0);
        let mut areas = vec![5.0; 4];
        accumulate_areas(&grid, &weights, &mut areas);
        assert_relative_eq!(areas[0], weights.grid_total(w), max_relative = 1e-12);
        assert_eq!(&areas[1..], &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rows_weighted_by_latitude() {
        let h = 6;
        let weights = LatitudeWeights::new(h);
        let mut grid = AssignmentGrid::new(2, h);
        for y in 0..h {
            grid.cells[y * 2] = 0;
            grid.cells[y * 2 + 1] = if y < 3 { 1 } else { 2 };
        }
        let mut areas = vec![0.0; 3];
        accumulate_areas(&grid, &weights, &mut areas);

        let col_total: f64 = weights.as_slice().iter().sum();
        let north: f64 = weights.as_slice()[..3].iter().sum();
        let south: f64 = weights.as_slice()[3..].iter().sum();
        assert_relative_eq!(areas[0], col_total, max_relative = 1e-12);
        assert_relative_eq!(areas[1], north, max_relative = 1e-12);
        assert_relative_eq!(areas[2], south, max_relative = 1e-12);
    }

    #[test]
    fn test_unassigned_pixels_contribute_nothing() {
        let weights = LatitudeWeights::new(4);
        let grid = AssignmentGrid::new(4, 4);
        let mut areas = vec![1.0; 2];
        accumulate_areas(&grid, &weights, &mut areas);
        assert_eq!(areas, vec![0.0, 0.0]);
    }
}

//! Nearest-site assignment over the equirectangular grid.
//!
//! Every pixel is mapped onto the unit sphere and assigned to the site with
//! the largest dot product, which is the site at the smallest great-circle
//! distance. The scan is brute force and fully recomputed each frame.

use crate::grid::{AssignmentGrid, PixelDirections, UNASSIGNED};
use crate::walker::Site;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Index of the site closest to `direction`. Exact ties keep the lowest index.
pub fn nearest_site(direction: &Vector3<f64>, sites: &[Site]) -> Option<usize> {
    let (first, rest) = sites.split_first()?;
    let mut best_idx = 0;
    let mut best_dot = direction.dot(&first.position);
    for (k, site) in rest.iter().enumerate() {
        let dot = direction.dot(&site.position);
        if dot > best_dot {
            best_dot = dot;
            best_idx = k + 1;
        }
    }
    Some(best_idx)
}

/// Overwrites `grid` with the nearest-site index of every pixel.
pub fn assign_sites(sites: &[Site], directions: &PixelDirections, grid: &mut AssignmentGrid) {
    let width = grid.width;
    grid.cells
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cell) in row.iter_mut().enumerate() {
                let direction = directions.get(x, y);
                *cell = nearest_site(&direction, sites).map_or(UNASSIGNED, |k| k as u32);
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(index: usize, x: f64, y: f64, z: f64) -> Site {
        Site::new(index, 0, Vector3::new(x, y, z).normalize())
    }

    #[test]
    fn test_nearest_site_picks_max_dot() {
        let sites = vec![site(0, 1.0, 0.0, 0.0), site(1, 0.0, 1.0, 0.0), site(2, 0.0, 0.0, 1.0)];
        let dir = Vector3::new(0.1, 0.9, 0.2).normalize();
        assert_eq!(nearest_site(&dir, &sites), Some(1));
    }

    #[test]
    fn test_ties_resolve_to_lowest_index() {
        let sites = vec![site(0, 0.0, 0.0, 1.0), site(1, 0.0, 0.0, -1.0)];
        let equator = Vector3::new(1.0, 0.0, 0.0);
        assert_eq!(nearest_site(&equator, &sites), Some(0));

        let duplicate = vec![site(0, 0.0, 1.0, 0.0), site(1, 0.0, 1.0, 0.0)];
        assert_eq!(nearest_site(&Vector3::new(0.0, 1.0, 0.0), &duplicate), Some(0));
    }

    #[test]
    fn test_antipodal_single_site_still_assigned() {
        let sites = vec![site(0, 1.0, 0.0, 0.0)];
        assert_eq!(nearest_site(&Vector3::new(-1.0, 0.0, 0.0), &sites), Some(0));
    }

    #[test]
    fn test_no_sites_leaves_grid_unassigned() {
        let dirs = PixelDirections::new(8, 4);
        let mut grid = AssignmentGrid::new(8, 4);
        grid.cells.fill(3);
        assign_sites(&[], &dirs, &mut grid);
        assert!(grid.cells.iter().all(|&c| c == UNASSIGNED));
    }

    #[test]
    fn test_hemispheres_split_at_equator() {
        let (w, h) = (16, 8);
        let dirs = PixelDirections::new(w, h);
        let mut grid = AssignmentGrid::new(w, h);
        let sites = vec![site(0, 0.0, 0.0, 1.0), site(1, 0.0, 0.0, -1.0)];
        assign_sites(&sites, &dirs, &mut grid);
        for y in 0..h {
            let expected = if y <= h / 2 { 0 } else { 1 };
            assert!(grid.row(y).iter().all(|&c| c == expected), "row {y}");
        }
    }
}

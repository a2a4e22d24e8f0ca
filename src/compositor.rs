//! Turns the assignment grid into the final RGB frame.
//!
//! Each pixel takes the heat color of its cell's area, blended over the base
//! texture. Cell walls and site markers are painted on top, markers last.

use crate::colormap::{to_rgb8, ColorLut};
use crate::grid::{AssignmentGrid, PixelDirections, UNASSIGNED};
use crate::smoothing::RenderRange;
use crate::texture::BaseTexture;
use crate::walker::Site;
use rayon::prelude::*;

pub const WALL_COLOR: [f32; 3] = [0.0, 0.0, 0.0];
pub const MARKER_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
/// Dot product above which a pixel is drawn as its site's marker (about 1.4°).
pub const MARKER_DOT_THRESHOLD: f64 = 0.9997;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompositeOptions {
    pub opacity: f32,
    pub show_walls: bool,
    pub show_dots: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[f32; 3]>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.width + x]
    }

    /// Packed `RGBRGB...` bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&p| to_rgb8(p)).collect()
    }
}

pub struct FrameInputs<'a> {
    pub grid: &'a AssignmentGrid,
    pub areas: &'a [f64],
    pub sites: &'a [Site],
    pub directions: &'a PixelDirections,
    pub base: &'a BaseTexture,
    pub lut: &'a ColorLut,
}

pub fn composite(
    inputs: &FrameInputs<'_>,
    range: RenderRange,
    options: CompositeOptions,
    out: &mut PixelBuffer,
) {
    let width = out.width;
    let opacity = options.opacity;

    out.pixels
        .par_chunks_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, pixel) in row.iter_mut().enumerate() {
                let base = inputs.base.get(x, y);
                let idx = inputs.grid.get(x, y);
                if idx == UNASSIGNED {
                    *pixel = base;
                    continue;
                }
                let site = idx as usize;

                let area = inputs.areas.get(site).copied().unwrap_or(0.0);
                let heat = inputs.lut.lookup(range.normalize(area));
                let mut color = [
                    base[0] * (1.0 - opacity) + heat[0] * opacity,
                    base[1] * (1.0 - opacity) + heat[1] * opacity,
                    base[2] * (1.0 - opacity) + heat[2] * opacity,
                ];

                if options.show_walls && inputs.grid.is_edge(x, y) {
                    color = WALL_COLOR;
                }

                if options.show_dots {
                    if let Some(s) = inputs.sites.get(site) {
                        if inputs.directions.get(x, y).dot(&s.position) > MARKER_DOT_THRESHOLD {
                            color = MARKER_COLOR;
                        }
                    }
                }

                *pixel = color;
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::lat_lon_to_unit;
    use approx::assert_abs_diff_eq;
    use nalgebra::Vector3;

    struct Fixture {
        grid: AssignmentGrid,
        areas: Vec<f64>,
        sites: Vec<Site>,
        directions: PixelDirections,
        base: BaseTexture,
        lut: ColorLut,
    }

    impl Fixture {
        fn hemispheres(w: usize, h: usize) -> Self {
            let mut grid = AssignmentGrid::new(w, h);
            for y in 0..h {
                let site = if y < h / 2 { 0 } else { 1 };
                grid.cells[y * w..(y + 1) * w].fill(site);
            }
            Self {
                grid,
                areas: vec![1.0, 3.0],
                sites: vec![
                    Site::new(0, 0, Vector3::new(0.0, 0.0, 1.0)),
                    Site::new(1, 0, Vector3::new(0.0, 0.0, -1.0)),
                ],
                directions: PixelDirections::new(w, h),
                base: BaseTexture {
                    width: w,
                    height: h,
                    pixels: vec![[0.2, 0.4, 0.6]; w * h],
                },
                lut: ColorLut::default(),
            }
        }

        fn render(&self, range: RenderRange, options: CompositeOptions) -> PixelBuffer {
            let inputs = FrameInputs {
                grid: &self.grid,
                areas: &self.areas,
                sites: &self.sites,
                directions: &self.directions,
                base: &self.base,
                lut: &self.lut,
            };
            let mut out = PixelBuffer::new(self.grid.width, self.grid.height);
            composite(&inputs, range, options, &mut out);
            out
        }
    }

    const PLAIN: CompositeOptions = CompositeOptions {
        opacity: 1.0,
        show_walls: false,
        show_dots: false,
    };

    #[test]
    fn test_heat_colors_follow_area() {
        let fx = Fixture::hemispheres(8, 4);
        let out = fx.render(RenderRange { min: 1.0, max: 3.0 }, PLAIN);
        assert_eq!(out.get(3, 0), fx.lut.lookup(0.0));
        assert_eq!(out.get(3, 3), fx.lut.lookup(1.0));
    }

    #[test]
    fn test_opacity_blends_with_base() {
        let fx = Fixture::hemispheres(8, 4);
        let options = CompositeOptions { opacity: 0.25, ..PLAIN };
        let out = fx.render(RenderRange { min: 1.0, max: 3.0 }, options);
        let heat = fx.lut.lookup(0.0);
        let p = out.get(5, 1);
        for c in 0..3 {
            let want = fx.base.pixels[0][c] * 0.75 + heat[c] * 0.25;
            assert_abs_diff_eq!(p[c], want, epsilon = 1e-6);
        }

        let zero = fx.render(
            RenderRange { min: 1.0, max: 3.0 },
            CompositeOptions { opacity: 0.0, ..PLAIN },
        );
        assert!(zero.pixels.iter().all(|&p| p == fx.base.pixels[0]));
    }

    #[test]
    fn test_walls_only_on_seam() {
        let (w, h) = (8, 6);
        let fx = Fixture::hemispheres(w, h);
        let options = CompositeOptions { show_walls: true, ..PLAIN };
        let out = fx.render(RenderRange { min: 1.0, max: 3.0 }, options);
        for y in 0..h {
            for x in 0..w {
                let is_wall = out.get(x, y) == WALL_COLOR;
                assert_eq!(is_wall, y == h / 2 - 1, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_markers_override_walls() {
        let (w, h) = (360, 180);
        let mut fx = Fixture::hemispheres(w, h);
        // Put site 0 on the seam row so its marker overlaps the wall.
        let (lat, lon) = crate::math::pixel_to_lat_lon(90, h / 2 - 1, w, h);
        fx.sites[0].position = lat_lon_to_unit(lat, lon);
        let options = CompositeOptions { show_walls: true, show_dots: true, ..PLAIN };
        let out = fx.render(RenderRange { min: 1.0, max: 3.0 }, options);
        assert_eq!(out.get(90, h / 2 - 1), MARKER_COLOR);
        assert_eq!(out.get(200, h / 2 - 1), WALL_COLOR);
    }

    #[test]
    fn test_collapsed_range_is_uniform() {
        let mut fx = Fixture::hemispheres(8, 4);
        fx.areas = vec![2.0, 2.0];
        let out = fx.render(RenderRange { min: 2.0, max: 2.0 }, PLAIN);
        let first = out.pixels[0];
        assert!(out.pixels.iter().all(|&p| p == first));
        assert!(first.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_unassigned_shows_base() {
        let mut fx = Fixture::hemispheres(4, 2);
        fx.grid.cells.fill(UNASSIGNED);
        let options = CompositeOptions { show_walls: true, show_dots: true, ..PLAIN };
        let out = fx.render(RenderRange { min: 0.0, max: 1.0 }, options);
        assert!(out.pixels.iter().all(|&p| p == fx.base.pixels[0]));
    }

    #[test]
    fn test_rgb8_packing() {
        let mut buf = PixelBuffer::new(2, 1);
        buf.pixels = vec![[1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        assert_eq!(buf.to_rgb8(), vec![255, 0, 0, 0, 0, 255]);
    }
}

//! Per-frame coverage pipeline.
//!
//! CoverageEngine owns the compute thread pool, the tables that depend only
//! on the grid size, and every grid-shaped buffer. A frame runs orbit
//! generation, site assignment, area accumulation, range smoothing and
//! compositing in that order; each stage finishes before the next starts.

use crate::area::accumulate_areas;
use crate::colormap::ColorLut;
use crate::compositor::{composite, FrameInputs, PixelBuffer};
use crate::config::{ConstellationParams, EngineConfig};
use crate::error::{CoverageError, Result};
use crate::grid::{AssignmentGrid, LatitudeWeights, PixelDirections};
use crate::smoothing::{RenderRange, SmoothingState};
use crate::texture::BaseTexture;
use crate::voronoi::assign_sites;
use crate::walker::{Site, WalkerConstellation};
use std::time::Instant;

/// Borrowed view of one rendered frame.
pub struct Frame<'a> {
    pub sites: &'a [Site],
    pub assignment: &'a AssignmentGrid,
    /// Area of each generated site, indexed like `sites`.
    pub areas: &'a [f64],
    pub render_range: RenderRange,
    pub pixels: &'a PixelBuffer,
}

pub struct CoverageEngine {
    config: EngineConfig,
    pool: rayon::ThreadPool,
    weights: LatitudeWeights,
    directions: PixelDirections,
    lut: ColorLut,
    fallback_base: BaseTexture,
    sites: Vec<Site>,
    grid: AssignmentGrid,
    areas: Vec<f64>,
    pixels: PixelBuffer,
    capacity_warned: bool,
    base_size_warned: bool,
}

impl CoverageEngine {
    pub fn new(config: EngineConfig) -> Result<Self> {
        if config.width == 0 || config.height == 0 {
            return Err(CoverageError::InvalidGrid {
                width: config.width,
                height: config.height,
            });
        }
        if config.max_sites == 0 {
            return Err(CoverageError::ZeroCapacity);
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.num_threads)
            .thread_name(|i| format!("coverage-{i}"))
            .build()?;

        log::info!(
            "coverage engine {}x{}, capacity {} sites, {} threads",
            config.width,
            config.height,
            config.max_sites,
            pool.current_num_threads()
        );

        let (w, h) = (config.width, config.height);
        Ok(Self {
            config,
            pool,
            weights: LatitudeWeights::new(h),
            directions: PixelDirections::new(w, h),
            lut: ColorLut::default(),
            fallback_base: BaseTexture::flat(w, h),
            sites: Vec::with_capacity(config.max_sites),
            grid: AssignmentGrid::new(w, h),
            areas: vec![0.0; config.max_sites],
            pixels: PixelBuffer::new(w, h),
            capacity_warned: false,
            base_size_warned: false,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn width(&self) -> usize {
        self.config.width
    }

    pub fn height(&self) -> usize {
        self.config.height
    }

    pub fn weights(&self) -> &LatitudeWeights {
        &self.weights
    }

    pub fn lut(&self) -> &ColorLut {
        &self.lut
    }

    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn assignment(&self) -> &AssignmentGrid {
        &self.grid
    }

    /// The full site-area table, `max_sites` long. Entries past the
    /// generated site count are zero.
    pub fn area_table(&self) -> &[f64] {
        &self.areas
    }

    /// Generates sites, assigns every pixel and accumulates the cell areas.
    /// Returns the areas of the generated sites.
    pub fn compute(&mut self, params: &ConstellationParams) -> &[f64] {
        let requested = params.satellite_count;
        let capped = requested.min(self.config.max_sites);
        if capped < requested && !self.capacity_warned {
            log::warn!(
                "{} satellites requested, capacity is {}; extra satellites are ignored",
                requested,
                self.config.max_sites
            );
            self.capacity_warned = true;
        }
        let walker = WalkerConstellation::new(capped, params.plane_count, params.inclination_deg);

        let t0 = Instant::now();
        self.sites = self.pool.install(|| walker.satellite_positions(params.time_offset));
        let t1 = Instant::now();
        self.pool
            .install(|| assign_sites(&self.sites, &self.directions, &mut self.grid));
        let t2 = Instant::now();
        self.pool
            .install(|| accumulate_areas(&self.grid, &self.weights, &mut self.areas));
        let t3 = Instant::now();

        log::trace!(
            "{} sites: orbits {:?}, assign {:?}, areas {:?}",
            self.sites.len(),
            t1 - t0,
            t2 - t1,
            t3 - t2
        );

        &self.areas[..self.sites.len()]
    }

    /// Runs a full frame. `smoothing` is the state returned by the previous
    /// frame; the updated state is returned alongside the frame.
    pub fn render(
        &mut self,
        params: &ConstellationParams,
        smoothing: SmoothingState,
        base: &BaseTexture,
    ) -> (SmoothingState, Frame<'_>) {
        self.compute(params);
        let site_count = self.sites.len();

        let smoothing = smoothing.update(&self.areas[..site_count]);
        let render_range = smoothing.render_range(params.beam_scale);

        let base = if base.width == self.config.width && base.height == self.config.height {
            base
        } else {
            if !self.base_size_warned {
                log::warn!(
                    "base texture is {}x{}, grid is {}x{}; using flat texture",
                    base.width,
                    base.height,
                    self.config.width,
                    self.config.height
                );
                self.base_size_warned = true;
            }
            &self.fallback_base
        };

        let t0 = Instant::now();
        let inputs = FrameInputs {
            grid: &self.grid,
            areas: &self.areas[..site_count],
            sites: &self.sites,
            directions: &self.directions,
            base,
            lut: &self.lut,
        };
        let options = params.composite_options();
        let pixels = &mut self.pixels;
        self.pool
            .install(|| composite(&inputs, render_range, options, pixels));
        log::trace!("composite {:?}", t0.elapsed());

        let frame = Frame {
            sites: &self.sites,
            assignment: &self.grid,
            areas: &self.areas[..site_count],
            render_range,
            pixels: &self.pixels,
        };
        (smoothing, frame)
    }
}

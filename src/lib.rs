//! Ground coverage of Walker-Delta constellations as a spherical Voronoi
//! heatmap.
//!
//! Each frame the satellites' sub-points are generated, every pixel of an
//! equirectangular grid is assigned to its nearest sub-point, the cells'
//! true spherical areas are accumulated and the grid is shaded by area.

pub mod area;
pub mod colormap;
pub mod compositor;
pub mod config;
pub mod error;
pub mod grid;
pub mod math;
pub mod pipeline;
pub mod playback;
pub mod smoothing;
pub mod texture;
pub mod voronoi;
pub mod walker;

pub use config::{ConstellationParams, EngineConfig, Preset};
pub use error::{CoverageError, Result};
pub use pipeline::{CoverageEngine, Frame};
pub use playback::{Playback, PlaybackState};
pub use smoothing::{RenderRange, SmoothingState};
pub use texture::BaseTexture;
pub use walker::{Site, WalkerConstellation};

//! Error types surfaced by the coverage engine and its loaders.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverageError {
    /// The parallel compute backend could not be started.
    #[error("failed to build compute thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidGrid { width: usize, height: usize },

    #[error("site capacity must be at least 1")]
    ZeroCapacity,

    #[error("failed to decode texture: {0}")]
    Image(#[from] image::ImageError),

    #[error("failed to read texture: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoverageError>;

//! Base map texture loading.
//!
//! Decodes a JPEG/PNG equirectangular image, resamples it to the coverage
//! grid and normalizes it to `[0, 1]` floats. When no image is available a
//! flat dark-blue placeholder with a single green patch is used instead.

use crate::error::Result;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

pub const TEXTURE_ENV_VAR: &str = "LEO_COVERAGE_TEXTURE";
pub const DEFAULT_TEXTURE: &str = "textures/2k_earth_daymap.jpg";

const FALLBACK_OCEAN: [u8; 3] = [0, 10, 30];
const FALLBACK_LAND: [u8; 3] = [0, 60, 20];

#[derive(Clone, Debug, PartialEq)]
pub struct BaseTexture {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<[f32; 3]>,
}

impl BaseTexture {
    pub fn from_bytes(bytes: &[u8], width: usize, height: usize) -> Result<Self> {
        use std::io::Cursor;
        let mut reader = image::ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
        reader.no_limits();
        let img = reader.decode()?.to_rgb8();
        let resized = if img.width() as usize == width && img.height() as usize == height {
            img
        } else {
            image::imageops::resize(&img, width as u32, height as u32, FilterType::Triangle)
        };
        let pixels = resized.pixels().map(|p| normalize(p.0)).collect();
        Ok(Self { width, height, pixels })
    }

    pub fn load_from_path(path: &Path, width: usize, height: usize) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes, width, height)
    }

    pub fn flat(width: usize, height: usize) -> Self {
        let ocean = normalize(FALLBACK_OCEAN);
        let land = normalize(FALLBACK_LAND);
        let mut pixels = vec![ocean; width * height];
        for y in 100..300.min(height) {
            for x in 100..300.min(width) {
                pixels[y * width + x] = land;
            }
        }
        Self { width, height, pixels }
    }

    /// Loads `path`, falling back to [`BaseTexture::flat`] on any failure.
    pub fn load_or_fallback(path: &Path, width: usize, height: usize) -> Self {
        match Self::load_from_path(path, width, height) {
            Ok(tex) => {
                log::info!("loaded base texture {} ({}x{})", path.display(), width, height);
                tex
            }
            Err(e) => {
                log::warn!("using flat base texture, {}: {}", path.display(), e);
                Self::flat(width, height)
            }
        }
    }

    pub fn get(&self, x: usize, y: usize) -> [f32; 3] {
        self.pixels[y * self.width + x]
    }
}

/// Texture path from the environment, or the bundled default.
pub fn texture_path() -> PathBuf {
    std::env::var_os(TEXTURE_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|| asset_path(DEFAULT_TEXTURE))
}

pub fn asset_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn normalize(p: [u8; 3]) -> [f32; 3] {
    [p[0] as f32 / 255.0, p[1] as f32 / 255.0, p[2] as f32 / 255.0]
}

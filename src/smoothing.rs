//! Temporally smoothed color range.
//!
//! Each frame the 2nd and 98th percentile of the site areas become the
//! target range, and the smoothed range moves a fixed fraction of the way
//! toward it. The state is a plain value threaded through every frame.

pub const PERCENTILE_LOW: f64 = 2.0;
pub const PERCENTILE_HIGH: f64 = 98.0;
pub const SMOOTHING_RATE: f64 = 0.1;
/// Target range used when there are no sites.
pub const FALLBACK_RANGE: (f64, f64) = (0.0, 1.0);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SmoothingState {
    pub smooth_min: f64,
    pub smooth_max: f64,
}

impl Default for SmoothingState {
    fn default() -> Self {
        Self { smooth_min: 0.0, smooth_max: 100.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderRange {
    pub min: f64,
    pub max: f64,
}

impl RenderRange {
    /// Maps `value` into `[0, 1]`. A collapsed range divides by one instead.
    pub fn normalize(&self, value: f64) -> f64 {
        let mut denom = self.max - self.min;
        if denom == 0.0 {
            denom = 1.0;
        }
        ((value - self.min) / denom).clamp(0.0, 1.0)
    }
}

impl SmoothingState {
    pub fn new(smooth_min: f64, smooth_max: f64) -> Self {
        Self { smooth_min, smooth_max }
    }

    /// Moves toward the percentile range of `areas` and returns the new state.
    pub fn update(self, areas: &[f64]) -> Self {
        let (target_min, target_max) = target_range(areas);
        self.toward(target_min, target_max)
    }

    pub fn toward(self, target_min: f64, target_max: f64) -> Self {
        Self {
            smooth_min: self.smooth_min + (target_min - self.smooth_min) * SMOOTHING_RATE,
            smooth_max: self.smooth_max + (target_max - self.smooth_max) * SMOOTHING_RATE,
        }
    }

    /// Widens or narrows the smoothed range around its midpoint.
    pub fn render_range(&self, beam_scale: f64) -> RenderRange {
        let mid = (self.smooth_min + self.smooth_max) / 2.0;
        let half = (self.smooth_max - self.smooth_min) / 2.0 * beam_scale;
        RenderRange { min: mid - half, max: mid + half }
    }
}

pub fn target_range(areas: &[f64]) -> (f64, f64) {
    if areas.is_empty() {
        return FALLBACK_RANGE;
    }
    let mut sorted = areas.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    (
        percentile_sorted(&sorted, PERCENTILE_LOW),
        percentile_sorted(&sorted, PERCENTILE_HIGH),
    )
}

/// Linear interpolation between closest ranks. `p` is in percent and clamped
/// to `[0, 100]`; `sorted` must be ascending and non-empty.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let last = sorted.len() - 1;
    let rank = p.clamp(0.0, 100.0) / 100.0 * last as f64;
    let lo = (rank.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

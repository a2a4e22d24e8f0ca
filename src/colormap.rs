//! Heatmap color lookup table.

pub const LUT_SIZE: usize = 512;

/// Stops of the piecewise-linear ramp, dark blue through cyan, green and
/// yellow to dark red.
const RAMP: [(f32, [f32; 3]); 7] = [
    (0.00, [0.0, 0.0, 0.5]),
    (0.15, [0.0, 0.0, 1.0]),
    (0.35, [0.0, 1.0, 1.0]),
    (0.55, [0.0, 1.0, 0.0]),
    (0.75, [1.0, 1.0, 0.0]),
    (0.90, [1.0, 0.0, 0.0]),
    (1.00, [0.5, 0.0, 0.0]),
];

pub fn ramp_color(t: f32) -> [f32; 3] {
    let t = t.clamp(0.0, 1.0);
    for pair in RAMP.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t < t1 {
            let f = (t - t0) / (t1 - t0);
            return [
                c0[0] + (c1[0] - c0[0]) * f,
                c0[1] + (c1[1] - c0[1]) * f,
                c0[2] + (c1[2] - c0[2]) * f,
            ];
        }
    }
    RAMP[RAMP.len() - 1].1
}

#[derive(Clone, Debug)]
pub struct ColorLut {
    entries: Vec<[f32; 3]>,
}

impl Default for ColorLut {
    fn default() -> Self {
        Self::with_size(LUT_SIZE)
    }
}

impl ColorLut {
    pub fn with_size(size: usize) -> Self {
        let size = size.max(2);
        let last = (size - 1) as f32;
        let entries = (0..size).map(|i| ramp_color(i as f32 / last)).collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Color for a normalized value; out-of-range input is clamped.
    pub fn lookup(&self, norm: f64) -> [f32; 3] {
        let last = self.entries.len() - 1;
        let idx = (norm.clamp(0.0, 1.0) * last as f64).floor() as usize;
        self.entries[idx.min(last)]
    }
}

pub fn to_rgb8(c: [f32; 3]) -> [u8; 3] {
    [
        (c[0].clamp(0.0, 1.0) * 255.0) as u8,
        (c[1].clamp(0.0, 1.0) * 255.0) as u8,
        (c[2].clamp(0.0, 1.0) * 255.0) as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_lut_endpoints() {
        let lut = ColorLut::default();
        assert_eq!(lut.len(), LUT_SIZE);
        assert_eq!(lut.lookup(0.0), [0.0, 0.0, 0.5]);
        assert_eq!(lut.lookup(1.0), [0.5, 0.0, 0.0]);
    }

    #[test]
    fn test_lookup_clamps() {
        let lut = ColorLut::default();
        assert_eq!(lut.lookup(-3.0), lut.lookup(0.0));
        assert_eq!(lut.lookup(7.0), lut.lookup(1.0));
        assert_eq!(lut.lookup(f64::NAN), lut.lookup(0.0));
    }

    #[test]
    fn test_ramp_is_continuous_at_stops() {
        for &(t, color) in &RAMP[1..RAMP.len() - 1] {
            let below = ramp_color(t - 1e-6);
            for c in 0..3 {
                assert_abs_diff_eq!(below[c], color[c], epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_ramp_midpoints() {
        let green = ramp_color(0.55);
        assert_abs_diff_eq!(green[0], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(green[1], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(green[2], 0.0, epsilon = 1e-6);

        let orange = ramp_color(0.825);
        assert_abs_diff_eq!(orange[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(orange[1], 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(to_rgb8([0.0, 1.0, 0.5]), [0, 255, 127]);
        assert_eq!(to_rgb8([-1.0, 2.0, 1.0]), [0, 255, 255]);
    }
}

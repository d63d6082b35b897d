// File: crates/cellplot-core/src/scale.rs
// Summary: Linear value-to-pixel transforms for the X and Y axes.

/// Maps a data interval onto a pixel interval.
/// `v0` lands on `px0`, `v1` on `px1`; either interval may run backwards.
#[derive(Clone, Copy, Debug)]
pub struct LinearScale {
    pub px0: f32,
    pub px1: f32,
    pub v0: f64,
    pub v1: f64,
}

impl LinearScale {
    pub fn new(px0: f32, px1: f32, v0: f64, mut v1: f64) -> Self {
        if (v1 - v0).abs() < 1e-12 { v1 = v0 + 1.0; }
        Self { px0, px1, v0, v1 }
    }

    /// Horizontal scale: `min` at the left edge.
    pub fn horizontal(left: f32, right: f32, min: f64, max: f64) -> Self {
        Self::new(left, right, min, max)
    }

    /// Vertical scale: `min` at the bottom edge (screen y grows downwards).
    pub fn vertical(top: f32, bottom: f32, min: f64, max: f64) -> Self {
        Self::new(bottom, top, min, max)
    }

    #[inline]
    pub fn to_px(&self, v: f64) -> f32 {
        // halved so spans near f64::MAX stay finite
        let t = (v * 0.5 - self.v0 * 0.5) / (self.v1 * 0.5 - self.v0 * 0.5);
        self.px0 + (t as f32) * (self.px1 - self.px0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_puts_min_at_bottom() {
        let s = LinearScale::vertical(10.0, 110.0, -100.0, 60.0);
        assert!((s.to_px(-100.0) - 110.0).abs() < 1e-4);
        assert!((s.to_px(60.0) - 10.0).abs() < 1e-4);
        assert!((s.to_px(-20.0) - 60.0).abs() < 1e-4);
    }

    #[test]
    fn backwards_range_mirrors() {
        let s = LinearScale::horizontal(0.0, 100.0, 10.0, 0.0);
        assert!((s.to_px(10.0) - 0.0).abs() < 1e-4);
        assert!((s.to_px(2.5) - 75.0).abs() < 1e-4);
    }

    #[test]
    fn full_f64_range_maps_inside_pixels() {
        let s = LinearScale::vertical(0.0, 100.0, -1.7e308, 1.7e308);
        assert!((s.to_px(0.0) - 50.0).abs() < 1e-3);
        assert!((s.to_px(1.7e308) - 0.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_range_is_widened() {
        let s = LinearScale::horizontal(0.0, 100.0, 5.0, 5.0);
        assert!(s.to_px(5.0).is_finite());
        assert!((s.to_px(6.0) - 100.0).abs() < 1e-4);
    }
}

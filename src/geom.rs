//! Small shared value types: surface sizes, pointer ratios and frame time.

/// The original effects were tuned per display frame; motion constants are
/// expressed per reference frame of this length.
pub const REFERENCE_FRAME: f64 = 1.0 / 60.0;

/// Number of reference frames covered by `dt` seconds.
pub fn frames(dt: f64) -> f64 {
    dt / REFERENCE_FRAME
}

/// Surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Element count for an area-proportional effect.
    pub fn count_for(&self, divisor: f64) -> usize {
        if divisor <= 0.0 || self.area() <= 0.0 {
            return 0;
        }
        (self.area() / divisor).floor() as usize
    }
}

/// Pointer position divided by the viewport size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerRatio {
    pub x: f64,
    pub y: f64,
}

impl PointerRatio {
    pub fn from_client(x: f64, y: f64, viewport: Size) -> Self {
        let ratio = |v: f64, extent: f64| if extent > 0.0 { (v / extent).clamp(0.0, 1.0) } else { 0.0 };
        Self {
            x: ratio(x, viewport.width),
            y: ratio(y, viewport.height),
        }
    }
}

/// Moves `current` toward `target` by `factor` per reference frame,
/// frame-rate independently.
pub fn ease_toward(current: f64, target: f64, factor: f64, dt: f64) -> f64 {
    let keep = (1.0 - factor).powf(frames(dt));
    target + (current - target) * keep
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_floors_area() {
        assert_eq!(Size::new(800.0, 600.0).count_for(8000.0), 60);
        assert_eq!(Size::new(100.0, 79.0).count_for(8000.0), 0);
        assert_eq!(Size::new(0.0, 600.0).count_for(8000.0), 0);
    }

    #[test]
    fn ease_matches_single_frame_lerp() {
        let v = ease_toward(0.0, 1.0, 0.08, REFERENCE_FRAME);
        assert!((v - 0.08).abs() < 1e-12);
    }

    #[test]
    fn pointer_ratio_clamps() {
        let p = PointerRatio::from_client(1200.0, -5.0, Size::new(1000.0, 500.0));
        assert_eq!(p, PointerRatio { x: 1.0, y: 0.0 });
    }
}

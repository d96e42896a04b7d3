use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltOptions {
    /// Maximum rotation in degrees on either axis.
    pub max: f64,
    pub perspective: f64,
    /// Transition time in ms when entering or leaving.
    pub speed: u32,
    pub glare: bool,
    pub max_glare: f64,
}

impl Default for TiltOptions {
    fn default() -> Self {
        Self {
            max: 15.0,
            perspective: 1000.0,
            speed: 500,
            glare: true,
            max_glare: 0.5,
        }
    }
}

/// Element box in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltPose {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub glare_angle: f64,
    pub glare_opacity: f64,
}

impl TiltOptions {
    /// Pose of a card with the pointer at client `(x, y)`.
    pub fn pose(&self, rect: Rect, x: f64, y: f64) -> TiltPose {
        let ratio = |v: f64, start: f64, extent: f64| {
            if extent > 0.0 {
                ((v - start) / extent).clamp(0.0, 1.0)
            } else {
                0.5
            }
        };
        let px = ratio(x, rect.left, rect.width);
        let py = ratio(y, rect.top, rect.height);
        let dx = x - (rect.left + rect.width / 2.0);
        let dy = y - (rect.top + rect.height / 2.0);
        TiltPose {
            rotate_x: py * self.max * 2.0 - self.max,
            rotate_y: self.max - px * self.max * 2.0,
            glare_angle: dx.atan2(-dy).to_degrees(),
            glare_opacity: if self.glare { py * self.max_glare } else { 0.0 },
        }
    }

    pub fn transform(&self, pose: &TiltPose) -> String {
        format!(
            "perspective({}px) rotateX({:.2}deg) rotateY({:.2}deg) scale3d(1, 1, 1)",
            self.perspective, pose.rotate_x, pose.rotate_y
        )
    }

    pub fn transition(&self) -> String {
        format!("transform {}ms cubic-bezier(.03,.98,.52,.99)", self.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: Rect = Rect { left: 100.0, top: 100.0, width: 200.0, height: 100.0 };

    #[test]
    fn center_is_flat_and_corners_hit_max() {
        let opts = TiltOptions::default();
        let flat = opts.pose(CARD, 200.0, 150.0);
        assert_eq!((flat.rotate_x, flat.rotate_y), (0.0, 0.0));
        assert!((flat.glare_opacity - 0.25).abs() < 1e-12);

        let corner = opts.pose(CARD, 100.0, 200.0);
        assert_eq!((corner.rotate_x, corner.rotate_y), (15.0, 15.0));
        let outside = opts.pose(CARD, 1000.0, -50.0);
        assert_eq!((outside.rotate_x, outside.rotate_y), (-15.0, -15.0));
    }

    #[test]
    fn transform_string() {
        let opts = TiltOptions::default();
        assert_eq!(
            opts.transform(&TiltPose::default()),
            "perspective(1000px) rotateX(0.00deg) rotateY(0.00deg) scale3d(1, 1, 1)"
        );
    }
}
